use std::fmt::{Display, Formatter};

/// Coarse classification of an intrinsic type.
///
/// A category alone never identifies a type; it is always paired with a kind
/// in [`NumericType`](crate::NumericType).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeCategory {
    Integer,
    Real,
    Complex,
    Character,
    Logical,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 5] = [
        TypeCategory::Integer,
        TypeCategory::Real,
        TypeCategory::Complex,
        TypeCategory::Character,
        TypeCategory::Logical,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TypeCategory::Integer => "integer",
            TypeCategory::Real => "real",
            TypeCategory::Complex => "complex",
            TypeCategory::Character => "character",
            TypeCategory::Logical => "logical",
        }
    }

    /// Real and complex kinds can be widened along a promotion chain.
    pub const fn is_floating(self) -> bool {
        matches!(self, TypeCategory::Real | TypeCategory::Complex)
    }
}

impl Display for TypeCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
