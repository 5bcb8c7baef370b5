use std::hash::{Hash, Hasher};

use foldhost_types::{Scalar, ScalarImage};

use crate::{EXTENDED_SIGNIFICANT_BYTES, HostRealType, HostType};

/// Ordered pair of native reals, laid out as C's `_Complex` and C++'s
/// `std::complex`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct HostComplex<T> {
    pub re: T,
    pub im: T,
}

/// Storage of a C `long double` holding an x87 double extended value.
///
/// Only the first ten bytes carry data; the rest of the slot is ABI padding
/// and takes no part in comparison or conversion.
#[derive(Clone, Copy, Debug)]
pub struct ExtendedSlot {
    storage: [u8; 16],
    storage_bytes: u8,
}

impl ExtendedSlot {
    /// Slot whose padding is zero.
    pub fn from_significant(
        significant: [u8; EXTENDED_SIGNIFICANT_BYTES],
        storage_bytes: usize,
    ) -> Self {
        assert!(
            (EXTENDED_SIGNIFICANT_BYTES..=16).contains(&storage_bytes),
            "extended slot of {storage_bytes} bytes cannot hold an x87 value"
        );
        let mut storage = [0; 16];
        storage[..EXTENDED_SIGNIFICANT_BYTES].copy_from_slice(&significant);
        ExtendedSlot {
            storage,
            storage_bytes: storage_bytes as u8,
        }
    }

    /// Slot copied verbatim from memory, padding included.
    pub fn from_storage(bytes: &[u8]) -> Self {
        assert!(
            (EXTENDED_SIGNIFICANT_BYTES..=16).contains(&bytes.len()),
            "extended slot of {} bytes cannot hold an x87 value",
            bytes.len()
        );
        let mut storage = [0; 16];
        storage[..bytes.len()].copy_from_slice(bytes);
        ExtendedSlot {
            storage,
            storage_bytes: bytes.len() as u8,
        }
    }

    pub fn storage(&self) -> &[u8] {
        &self.storage[..usize::from(self.storage_bytes)]
    }

    pub fn significant(&self) -> &[u8] {
        &self.storage[..EXTENDED_SIGNIFICANT_BYTES]
    }

    pub fn padding(&self) -> &[u8] {
        &self.storage[EXTENDED_SIGNIFICANT_BYTES..usize::from(self.storage_bytes)]
    }

    pub fn storage_bytes(&self) -> usize {
        usize::from(self.storage_bytes)
    }

    /// The 80 significant bits.
    pub fn to_bits(&self) -> u128 {
        let mut bytes = [0; 16];
        bytes[..EXTENDED_SIGNIFICANT_BYTES].copy_from_slice(self.significant());
        u128::from_le_bytes(bytes)
    }
}

impl PartialEq for ExtendedSlot {
    fn eq(&self, other: &Self) -> bool {
        self.storage_bytes == other.storage_bytes && self.significant() == other.significant()
    }
}

impl Eq for ExtendedSlot {}

impl Hash for ExtendedSlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.storage_bytes.hash(state);
        self.significant().hash(state);
    }
}

/// Storage of a C `long double` holding an IEEE 754 binary128 value.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct QuadSlot([u8; 16]);

impl QuadSlot {
    pub const fn from_le_bytes(bytes: [u8; 16]) -> Self {
        QuadSlot(bytes)
    }

    pub const fn from_bits(bits: u128) -> Self {
        QuadSlot(bits.to_le_bytes())
    }

    pub const fn to_le_bytes(self) -> [u8; 16] {
        self.0
    }

    pub const fn to_bits(self) -> u128 {
        u128::from_le_bytes(self.0)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum HostInteger {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
}

/// A value of one of the native real types. Equality is bitwise.
#[derive(Clone, Copy, Debug)]
pub enum HostReal {
    F32(f32),
    F64(f64),
    Extended(ExtendedSlot),
    Quad(QuadSlot),
}

impl HostReal {
    pub fn host_type(&self) -> HostRealType {
        match self {
            HostReal::F32(_) => HostRealType::F32,
            HostReal::F64(_) => HostRealType::F64,
            HostReal::Extended(slot) => HostRealType::Extended {
                storage_bytes: slot.storage_bytes,
            },
            HostReal::Quad(_) => HostRealType::Quad,
        }
    }

    pub(crate) fn push_significant(&self, image: &mut ScalarImage) {
        match self {
            HostReal::F32(value) => image.extend_from_slice(&value.to_le_bytes()),
            HostReal::F64(value) => image.extend_from_slice(&value.to_le_bytes()),
            HostReal::Extended(slot) => image.extend_from_slice(slot.significant()),
            HostReal::Quad(slot) => image.extend_from_slice(&slot.to_le_bytes()),
        }
    }

    pub(crate) fn push_storage(&self, image: &mut ScalarImage) {
        match self {
            HostReal::Extended(slot) => image.extend_from_slice(slot.storage()),
            dense => dense.push_significant(image),
        }
    }
}

impl PartialEq for HostReal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostReal::F32(lhs), HostReal::F32(rhs)) => lhs.to_bits() == rhs.to_bits(),
            (HostReal::F64(lhs), HostReal::F64(rhs)) => lhs.to_bits() == rhs.to_bits(),
            (HostReal::Extended(lhs), HostReal::Extended(rhs)) => lhs == rhs,
            (HostReal::Quad(lhs), HostReal::Quad(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl Eq for HostReal {}

impl Hash for HostReal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            HostReal::F32(value) => {
                0_u8.hash(state);
                value.to_bits().hash(state);
            }
            HostReal::F64(value) => {
                1_u8.hash(state);
                value.to_bits().hash(state);
            }
            HostReal::Extended(slot) => {
                2_u8.hash(state);
                slot.hash(state);
            }
            HostReal::Quad(slot) => {
                3_u8.hash(state);
                slot.hash(state);
            }
        }
    }
}

/// A value held in its native representation.
///
/// Produced by [`HostRegistry::to_native`](crate::HostRegistry::to_native)
/// and consumed by [`HostRegistry::from_native`](crate::HostRegistry::from_native).
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum HostValue {
    Integer(HostInteger),
    Real(HostReal),
    Complex(HostComplex<HostReal>),
    Logical(u8),
    Character(Scalar),
}

impl HostValue {
    /// Handle of the native type this value is stored in.
    pub fn host_type(&self) -> HostType {
        match self {
            HostValue::Integer(HostInteger::I8(_)) => HostType::I8,
            HostValue::Integer(HostInteger::I16(_)) => HostType::I16,
            HostValue::Integer(HostInteger::I32(_)) => HostType::I32,
            HostValue::Integer(HostInteger::I64(_)) => HostType::I64,
            HostValue::Integer(HostInteger::I128(_)) => HostType::I128,
            HostValue::Real(real) => HostType::Real(real.host_type()),
            HostValue::Complex(pair) => HostType::Complex(pair.re.host_type()),
            HostValue::Logical(_) => HostType::LogicalTag,
            HostValue::Character(scalar) => HostType::Character {
                kind: scalar.numeric_type().kind(),
            },
        }
    }

    pub fn as_complex32(&self) -> Option<HostComplex<f32>> {
        match self {
            HostValue::Complex(HostComplex {
                re: HostReal::F32(re),
                im: HostReal::F32(im),
            }) => Some(HostComplex { re: *re, im: *im }),
            _ => None,
        }
    }

    pub fn as_complex64(&self) -> Option<HostComplex<f64>> {
        match self {
            HostValue::Complex(HostComplex {
                re: HostReal::F64(re),
                im: HostReal::F64(im),
            }) => Some(HostComplex { re: *re, im: *im }),
            _ => None,
        }
    }

    pub fn as_logical(&self) -> Option<bool> {
        match self {
            HostValue::Logical(tag) => Some(*tag != 0),
            _ => None,
        }
    }
}

macro_rules! native_primitive {
    ($ty:ty, $outer:ident, $inner:ident :: $variant:ident, $getter:ident) => {
        impl From<$ty> for HostValue {
            fn from(value: $ty) -> Self {
                HostValue::$outer($inner::$variant(value))
            }
        }

        impl HostValue {
            pub fn $getter(&self) -> Option<$ty> {
                match self {
                    HostValue::$outer($inner::$variant(value)) => Some(*value),
                    _ => None,
                }
            }
        }
    };
}

native_primitive!(i8, Integer, HostInteger::I8, as_i8);
native_primitive!(i16, Integer, HostInteger::I16, as_i16);
native_primitive!(i32, Integer, HostInteger::I32, as_i32);
native_primitive!(i64, Integer, HostInteger::I64, as_i64);
native_primitive!(i128, Integer, HostInteger::I128, as_i128);
native_primitive!(f32, Real, HostReal::F32, as_f32);
native_primitive!(f64, Real, HostReal::F64, as_f64);
native_primitive!(ExtendedSlot, Real, HostReal::Extended, as_extended);
native_primitive!(QuadSlot, Real, HostReal::Quad, as_quad);

impl From<HostComplex<f32>> for HostValue {
    fn from(value: HostComplex<f32>) -> Self {
        HostValue::Complex(HostComplex {
            re: HostReal::F32(value.re),
            im: HostReal::F32(value.im),
        })
    }
}

impl From<HostComplex<f64>> for HostValue {
    fn from(value: HostComplex<f64>) -> Self {
        HostValue::Complex(HostComplex {
            re: HostReal::F64(value.re),
            im: HostReal::F64(value.im),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_equality_ignores_padding() {
        let mut dirty = [0xAB; 16];
        dirty[..10].copy_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0x80, 0xFF, 0x3F]);
        let from_memory = ExtendedSlot::from_storage(&dirty);
        let clean = ExtendedSlot::from_significant([0, 0, 0, 0, 0, 0, 0, 0x80, 0xFF, 0x3F], 16);
        assert_eq!(from_memory, clean);
        assert_eq!(from_memory.padding(), &[0xAB; 6]);
        assert_eq!(clean.padding(), &[0; 6]);
        assert_eq!(clean.to_bits(), 0x3FFF_8000_0000_0000_0000);
    }

    #[test]
    fn test_real_equality_is_bitwise() {
        assert_eq!(HostReal::F64(f64::NAN), HostReal::F64(f64::NAN));
        assert_ne!(HostReal::F32(0.0), HostReal::F32(-0.0));
        assert_ne!(HostReal::F32(1.0), HostReal::F64(1.0));
    }

    #[test]
    fn test_host_type_of_values() {
        assert_eq!(HostValue::from(7_i16).host_type(), HostType::I16);
        assert_eq!(
            HostValue::from(HostComplex { re: 1.0_f32, im: 2.0 }).host_type(),
            HostType::Complex(HostRealType::F32)
        );
        assert_eq!(
            HostValue::from(ExtendedSlot::from_storage(&[0; 12])).host_type(),
            HostType::Real(HostRealType::Extended { storage_bytes: 12 })
        );
        assert_eq!(HostValue::Logical(1).host_type(), HostType::LogicalTag);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(HostValue::from(2.5_f64).as_f64(), Some(2.5));
        assert_eq!(HostValue::from(2.5_f64).as_f32(), None);
        assert_eq!(HostValue::from(-3_i64).as_i64(), Some(-3));
        assert_eq!(
            HostValue::from(HostComplex { re: 1.0_f64, im: -1.0 }).as_complex64(),
            Some(HostComplex { re: 1.0, im: -1.0 })
        );
        assert_eq!(HostValue::Logical(2).as_logical(), Some(true));
    }

    #[test]
    fn test_quad_bits_round_trip() {
        let bits = 0x3FFF_0000_0000_0000_0000_0000_0000_0000_u128;
        assert_eq!(QuadSlot::from_bits(bits).to_bits(), bits);
        assert_eq!(QuadSlot::from_bits(bits).to_le_bytes()[15], 0x3F);
    }
}
