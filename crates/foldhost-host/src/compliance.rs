use std::fmt::{Display, Formatter};

use crate::{FloatModel, HostTarget};

/// A fact about the target that a native representation depends on.
///
/// A registry slot is native only when every one of its predicates holds.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum CompliancePredicate {
    /// The target has a 128-bit integer primitive.
    Int128Available,
    /// `float` is a 4-byte IEEE 754 type.
    FloatIsBinary32,
    /// `double` is an 8-byte IEEE 754 type.
    DoubleIsBinary64,
    /// `long double` has 64 explicit significand bits and a 15-bit exponent,
    /// stored in a slot of 10 to 16 bytes.
    LongDoubleIsX87Extended,
    /// `long double` is a 16-byte type with 113 significand bits and a
    /// 15-bit exponent.
    LongDoubleIsBinary128,
}

impl CompliancePredicate {
    pub fn holds(self, target: &HostTarget) -> bool {
        match self {
            CompliancePredicate::Int128Available => target.int128,
            CompliancePredicate::FloatIsBinary32 => target.float.is_some_and(|m| is_ieee(m, 4)),
            CompliancePredicate::DoubleIsBinary64 => target.double.is_some_and(|m| is_ieee(m, 8)),
            CompliancePredicate::LongDoubleIsX87Extended => target.long_double.is_some_and(|m| {
                (10..=16).contains(&m.storage_bytes) && m.digits == 64 && m.max_exponent == 16384
            }),
            CompliancePredicate::LongDoubleIsBinary128 => target.long_double.is_some_and(|m| {
                m.storage_bytes == 16 && m.digits == 113 && m.max_exponent == 16384
            }),
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            CompliancePredicate::Int128Available => "int128",
            CompliancePredicate::FloatIsBinary32 => "float=binary32",
            CompliancePredicate::DoubleIsBinary64 => "double=binary64",
            CompliancePredicate::LongDoubleIsX87Extended => "long double=x87",
            CompliancePredicate::LongDoubleIsBinary128 => "long double=binary128",
        }
    }
}

fn is_ieee(model: FloatModel, storage_bytes: usize) -> bool {
    model.iec559 && model.storage_bytes == storage_bytes
}

impl Display for CompliancePredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x87_predicate_ignores_padding() {
        for storage_bytes in [10, 12, 16] {
            let target = HostTarget::builder()
                .long_double(FloatModel {
                    storage_bytes,
                    ..FloatModel::X87_PADDED_16
                })
                .build();
            assert!(CompliancePredicate::LongDoubleIsX87Extended.holds(&target));
            assert!(!CompliancePredicate::LongDoubleIsBinary128.holds(&target));
        }
    }

    #[test]
    fn test_double_sized_long_double_satisfies_neither() {
        let target = HostTarget::builder().long_double(FloatModel::DOUBLE).build();
        assert!(!CompliancePredicate::LongDoubleIsX87Extended.holds(&target));
        assert!(!CompliancePredicate::LongDoubleIsBinary128.holds(&target));
    }

    #[test]
    fn test_non_ieee_float_is_rejected() {
        let target = HostTarget::builder()
            .float(FloatModel {
                iec559: false,
                ..FloatModel::FLOAT
            })
            .build();
        assert!(!CompliancePredicate::FloatIsBinary32.holds(&target));
        assert!(!CompliancePredicate::DoubleIsBinary64.holds(&target));
    }
}
