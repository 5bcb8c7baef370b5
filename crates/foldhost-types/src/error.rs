use crate::{NumericType, TypeCategory};

/// Failure to form a [`NumericType`] from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// Kinds are positive by construction.
    #[error("kind of {category} must be positive")]
    ZeroKind { category: TypeCategory },
    /// The text is not in `category(kind)` or `category(kind=K)` notation.
    #[error("invalid numeric type `{input}`: {message}")]
    Parse { input: String, message: String },
}

/// Failure to form a [`Scalar`](crate::Scalar) from raw parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScalarError {
    #[error(transparent)]
    Type(#[from] TypeError),
    /// The kind has no storage layout known to this crate.
    #[error("{ty} has no known storage format")]
    UnknownFormat { ty: NumericType },
    #[error("value {value} does not fit in {ty}")]
    IntegerOutOfRange { ty: NumericType, value: i128 },
    #[error("bit pattern {bits:#x} is wider than {ty}")]
    BitsOutOfRange { ty: NumericType, bits: u128 },
    #[error("image of {ty} must be {expected} bytes, found {found}")]
    ImageLength {
        ty: NumericType,
        expected: usize,
        found: usize,
    },
    #[error("code unit {unit:#x} does not fit in {ty}")]
    CharacterOutOfRange { ty: NumericType, unit: u32 },
    /// A complex value needs two reals of one kind.
    #[error("complex parts must be reals of the same kind, found {re} and {im}")]
    MismatchedParts { re: NumericType, im: NumericType },
}
