use std::fmt::{Display, Formatter};

use crate::{RealFormat, TypeCategory, TypeError};

/// Identity of an intrinsic type: a category paired with a positive kind.
///
/// Two descriptors are the same type exactly when category and kind agree.
/// Descriptors carry no ordering of their own; widening is expressed only
/// through [`PromotionChain`](crate::PromotionChain).
///
/// # Usage
///
/// ```
/// use foldhost_types::{NumericType, TypeCategory};
///
/// let ty: NumericType = "complex(kind=8)".parse().unwrap();
/// assert_eq!(ty, NumericType::complex(8));
/// assert_eq!(ty.part(), Some(NumericType::real(8)));
/// assert_eq!(ty.to_string(), "complex(8)");
/// assert_eq!(ty.category(), TypeCategory::Complex);
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawNumericType")
)]
pub struct NumericType {
    category: TypeCategory,
    kind: u8,
}

/// Unchecked wire form of [`NumericType`]; deserialization goes through
/// [`NumericType::try_new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawNumericType {
    category: TypeCategory,
    kind: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawNumericType> for NumericType {
    type Error = TypeError;

    fn try_from(raw: RawNumericType) -> Result<Self, TypeError> {
        NumericType::try_new(raw.category, raw.kind)
    }
}

impl NumericType {
    /// Every intrinsic type of the surrounding type system, grouped by category.
    pub const INTRINSIC: [NumericType; 24] = [
        NumericType::integer(1),
        NumericType::integer(2),
        NumericType::integer(4),
        NumericType::integer(8),
        NumericType::integer(16),
        NumericType::real(2),
        NumericType::real(3),
        NumericType::real(4),
        NumericType::real(8),
        NumericType::real(10),
        NumericType::real(16),
        NumericType::complex(2),
        NumericType::complex(3),
        NumericType::complex(4),
        NumericType::complex(8),
        NumericType::complex(10),
        NumericType::complex(16),
        NumericType::character(1),
        NumericType::character(2),
        NumericType::character(4),
        NumericType::logical(1),
        NumericType::logical(2),
        NumericType::logical(4),
        NumericType::logical(8),
    ];

    /// Panics if `kind` is zero.
    pub const fn new(category: TypeCategory, kind: u8) -> Self {
        assert!(kind > 0, "numeric kind must be positive");
        NumericType { category, kind }
    }

    pub fn try_new(category: TypeCategory, kind: u8) -> Result<Self, TypeError> {
        if kind == 0 {
            return Err(TypeError::ZeroKind { category });
        }
        Ok(NumericType { category, kind })
    }

    pub const fn integer(kind: u8) -> Self {
        NumericType::new(TypeCategory::Integer, kind)
    }

    pub const fn real(kind: u8) -> Self {
        NumericType::new(TypeCategory::Real, kind)
    }

    pub const fn complex(kind: u8) -> Self {
        NumericType::new(TypeCategory::Complex, kind)
    }

    pub const fn character(kind: u8) -> Self {
        NumericType::new(TypeCategory::Character, kind)
    }

    pub const fn logical(kind: u8) -> Self {
        NumericType::new(TypeCategory::Logical, kind)
    }

    pub const fn category(self) -> TypeCategory {
        self.category
    }

    pub const fn kind(self) -> u8 {
        self.kind
    }

    /// Same category, different kind.
    pub const fn with_kind(self, kind: u8) -> Self {
        NumericType::new(self.category, kind)
    }

    pub fn is_intrinsic(self) -> bool {
        NumericType::INTRINSIC.contains(&self)
    }

    /// The real type of each component of a complex type.
    pub const fn part(self) -> Option<NumericType> {
        match self.category {
            TypeCategory::Complex => Some(NumericType::real(self.kind)),
            _ => None,
        }
    }

    /// The complex type whose components are this real type.
    pub const fn complex_of(self) -> Option<NumericType> {
        match self.category {
            TypeCategory::Real => Some(NumericType::complex(self.kind)),
            _ => None,
        }
    }

    /// Floating-point layout of a real type, or of each part of a complex type.
    pub const fn real_format(self) -> Option<RealFormat> {
        match self.category {
            TypeCategory::Real | TypeCategory::Complex => RealFormat::for_kind(self.kind),
            _ => None,
        }
    }

    /// Number of bytes that carry data in the abstract representation.
    ///
    /// Logical values carry a single tag byte whatever their kind; the rest of
    /// their storage is padding. Character values are measured per code unit.
    pub const fn significant_bytes(self) -> Option<usize> {
        match self.category {
            TypeCategory::Integer => {
                if self.kind as usize <= size_of::<u128>() {
                    Some(self.kind as usize)
                } else {
                    None
                }
            }
            TypeCategory::Real => match RealFormat::for_kind(self.kind) {
                Some(format) => Some(format.storage_bytes()),
                None => None,
            },
            TypeCategory::Complex => match RealFormat::for_kind(self.kind) {
                Some(format) => Some(2 * format.storage_bytes()),
                None => None,
            },
            TypeCategory::Logical => Some(1),
            TypeCategory::Character => Some(self.kind as usize),
        }
    }
}

impl Display for NumericType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.category, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_category_and_kind() {
        assert_eq!(NumericType::real(8), NumericType::new(TypeCategory::Real, 8));
        assert_ne!(NumericType::real(8), NumericType::complex(8));
        assert_ne!(NumericType::real(8), NumericType::real(4));
    }

    #[test]
    fn test_zero_kind_is_rejected() {
        assert_eq!(
            NumericType::try_new(TypeCategory::Logical, 0),
            Err(TypeError::ZeroKind {
                category: TypeCategory::Logical
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_wire_form_checks_kind() {
        let raw = |kind| RawNumericType {
            category: TypeCategory::Real,
            kind,
        };
        assert_eq!(NumericType::try_from(raw(8)), Ok(NumericType::real(8)));
        assert_eq!(
            NumericType::try_from(raw(0)),
            Err(TypeError::ZeroKind {
                category: TypeCategory::Real
            })
        );
    }

    #[test]
    #[should_panic(expected = "numeric kind must be positive")]
    fn test_new_panics_on_zero_kind() {
        let _ = NumericType::new(TypeCategory::Integer, 0);
    }

    #[test]
    fn test_complex_and_real_are_paired() {
        assert_eq!(NumericType::complex(10).part(), Some(NumericType::real(10)));
        assert_eq!(NumericType::real(4).complex_of(), Some(NumericType::complex(4)));
        assert_eq!(NumericType::integer(4).part(), None);
        assert_eq!(NumericType::logical(4).complex_of(), None);
    }

    #[test]
    fn test_significant_bytes() {
        assert_eq!(NumericType::integer(16).significant_bytes(), Some(16));
        assert_eq!(NumericType::real(10).significant_bytes(), Some(10));
        assert_eq!(NumericType::real(3).significant_bytes(), Some(2));
        assert_eq!(NumericType::complex(10).significant_bytes(), Some(20));
        assert_eq!(NumericType::logical(8).significant_bytes(), Some(1));
        assert_eq!(NumericType::character(4).significant_bytes(), Some(4));
        assert_eq!(NumericType::real(5).significant_bytes(), None);
        assert_eq!(NumericType::integer(32).significant_bytes(), None);
    }

    #[test]
    fn test_intrinsic_set() {
        assert!(NumericType::real(10).is_intrinsic());
        assert!(NumericType::logical(8).is_intrinsic());
        assert!(!NumericType::logical(16).is_intrinsic());
        assert!(!NumericType::integer(3).is_intrinsic());
        assert_eq!(NumericType::complex(3).to_string(), "complex(3)");
    }
}
