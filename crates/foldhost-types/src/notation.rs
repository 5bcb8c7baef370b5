use std::str::FromStr;

use chumsky::prelude::*;

use crate::{NumericType, TypeCategory, TypeError};

type ParserError<'src> = extra::Err<Rich<'src, char>>;

fn category<'src>() -> impl Parser<'src, &'src str, TypeCategory, ParserError<'src>> + Clone {
    choice((
        just("integer").to(TypeCategory::Integer),
        just("real").to(TypeCategory::Real),
        just("complex").to(TypeCategory::Complex),
        just("character").to(TypeCategory::Character),
        just("logical").to(TypeCategory::Logical),
    ))
    .labelled("type category")
}

fn kind<'src>() -> impl Parser<'src, &'src str, u8, ParserError<'src>> + Clone {
    text::int(10)
        .try_map(|digits: &str, span| {
            digits
                .parse::<u8>()
                .map_err(|err| Rich::custom(span, format!("kind `{digits}`: {err}")))
        })
        .labelled("kind")
}

/// `category(kind)` or `category(kind=K)`, whitespace allowed between tokens.
fn numeric_type<'src>() -> impl Parser<'src, &'src str, NumericType, ParserError<'src>> {
    let selector = just("kind")
        .padded()
        .then(just('='))
        .or_not()
        .ignore_then(kind().padded());

    category()
        .padded()
        .then(selector.delimited_by(just('('), just(')')))
        .padded()
        .then_ignore(end())
        .try_map(|(category, kind), span| {
            NumericType::try_new(category, kind).map_err(|err| Rich::custom(span, err.to_string()))
        })
}

impl FromStr for NumericType {
    type Err = TypeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        numeric_type()
            .parse(input)
            .into_result()
            .map_err(|errors| TypeError::Parse {
                input: input.to_string(),
                message: errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            })
    }
}
