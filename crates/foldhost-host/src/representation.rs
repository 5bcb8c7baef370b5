use std::fmt::{Display, Formatter};

use crate::CompliancePredicate;

/// Significant bytes of the x87 double extended format.
pub const EXTENDED_SIGNIFICANT_BYTES: usize = 10;

/// Native floating-point type backing a real kind.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum HostRealType {
    F32,
    F64,
    /// x87 double extended held in a `long double` slot of `storage_bytes`.
    Extended { storage_bytes: u8 },
    /// IEEE 754 binary128 held in a `long double` slot.
    Quad,
}

impl HostRealType {
    pub const fn storage_bytes(self) -> usize {
        match self {
            HostRealType::F32 => 4,
            HostRealType::F64 => 8,
            HostRealType::Extended { storage_bytes } => storage_bytes as usize,
            HostRealType::Quad => 16,
        }
    }

    pub const fn significant_bytes(self) -> usize {
        match self {
            HostRealType::F32 => 4,
            HostRealType::F64 => 8,
            HostRealType::Extended { .. } => EXTENDED_SIGNIFICANT_BYTES,
            HostRealType::Quad => 16,
        }
    }
}

/// Handle naming a native type.
///
/// Handles compare by identity; two slots sharing a handle share one native
/// type, which is what reverse lookup relies on.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum HostType {
    I8,
    I16,
    I32,
    I64,
    I128,
    Real(HostRealType),
    /// Ordered `(re, im)` pair of a native real type.
    Complex(HostRealType),
    /// One-byte unsigned boolean tag.
    LogicalTag,
    /// The abstract character representation itself.
    Character { kind: u8 },
}

impl HostType {
    /// Bytes one value occupies in memory; per code unit for characters.
    pub const fn storage_bytes(self) -> usize {
        match self {
            HostType::I8 | HostType::LogicalTag => 1,
            HostType::I16 => 2,
            HostType::I32 => 4,
            HostType::I64 => 8,
            HostType::I128 => 16,
            HostType::Real(real) => real.storage_bytes(),
            HostType::Complex(real) => 2 * real.storage_bytes(),
            HostType::Character { kind } => kind as usize,
        }
    }

    /// Bytes that carry data, padding excluded.
    pub const fn significant_bytes(self) -> usize {
        match self {
            HostType::Real(real) => real.significant_bytes(),
            HostType::Complex(real) => 2 * real.significant_bytes(),
            other => other.storage_bytes(),
        }
    }

    pub const fn padding_bytes(self) -> usize {
        self.storage_bytes() - self.significant_bytes()
    }

    /// Rust spelling of the native type.
    pub const fn rust_name(self) -> &'static str {
        match self {
            HostType::I8 => "i8",
            HostType::I16 => "i16",
            HostType::I32 => "i32",
            HostType::I64 => "i64",
            HostType::I128 => "i128",
            HostType::Real(real) => real_name(real),
            HostType::Complex(HostRealType::F32) => "HostComplex<f32>",
            HostType::Complex(HostRealType::F64) => "HostComplex<f64>",
            HostType::Complex(HostRealType::Extended { .. }) => "HostComplex<ExtendedSlot>",
            HostType::Complex(HostRealType::Quad) => "HostComplex<QuadSlot>",
            HostType::LogicalTag => "u8",
            HostType::Character { .. } => "Scalar",
        }
    }
}

const fn real_name(real: HostRealType) -> &'static str {
    match real {
        HostRealType::F32 => "f32",
        HostRealType::F64 => "f64",
        HostRealType::Extended { .. } => "ExtendedSlot",
        HostRealType::Quad => "QuadSlot",
    }
}

impl Display for HostType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rust_name())
    }
}

/// Layout of the native type chosen for a descriptor, together with the
/// target facts that made it eligible.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct HostRepresentation {
    host_type: HostType,
    compliance: &'static [CompliancePredicate],
}

impl HostRepresentation {
    pub(crate) const fn new(
        host_type: HostType,
        compliance: &'static [CompliancePredicate],
    ) -> Self {
        HostRepresentation {
            host_type,
            compliance,
        }
    }

    pub const fn host_type(&self) -> HostType {
        self.host_type
    }

    pub const fn storage_bytes(&self) -> usize {
        self.host_type.storage_bytes()
    }

    pub const fn significant_bytes(&self) -> usize {
        self.host_type.significant_bytes()
    }

    pub const fn padding_bytes(&self) -> usize {
        self.host_type.padding_bytes()
    }

    pub const fn compliance(&self) -> &'static [CompliancePredicate] {
        self.compliance
    }

    /// The representation of a complex kind whose parts are this real type.
    pub(crate) const fn as_complex_pair(&self) -> Option<HostRepresentation> {
        match self.host_type {
            HostType::Real(real) => Some(HostRepresentation::new(
                HostType::Complex(real),
                self.compliance,
            )),
            _ => None,
        }
    }
}
