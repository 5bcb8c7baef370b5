use foldhost_types::{NumericType, Scalar, ScalarImage};

use crate::{
    EXTENDED_SIGNIFICANT_BYTES, ExtendedSlot, HostComplex, HostInteger, HostReal, HostRealType,
    HostRegistry, HostType, HostValue, QuadSlot,
};

// Layouts the reinterpreting casts rely on.
const _: () = {
    assert!(size_of::<i8>() == 1);
    assert!(size_of::<i16>() == 2);
    assert!(size_of::<i32>() == 4);
    assert!(size_of::<i64>() == 8);
    assert!(size_of::<i128>() == 16);
    assert!(size_of::<f32>() == 4);
    assert!(size_of::<f64>() == 8);
    assert!(size_of::<QuadSlot>() == 16);
    assert!(size_of::<HostComplex<f32>>() == 2 * size_of::<f32>());
    assert!(size_of::<HostComplex<f64>>() == 2 * size_of::<f64>());
    assert!(size_of::<HostComplex<QuadSlot>>() == 2 * size_of::<QuadSlot>());
};

impl HostRegistry {
    /// Converts a scalar to its native representation without changing a bit.
    ///
    /// # Panics
    ///
    /// Panics if the scalar's type has no native representation on this
    /// registry's target. Check [`HostRegistry::exists`] first.
    pub fn to_native(&self, value: &Scalar) -> HostValue {
        let ty = value.numeric_type();
        let host_type = self.native_representation_of(ty).host_type();
        match (value, host_type) {
            (Scalar::Character { .. }, _) => HostValue::Character(value.clone()),
            (Scalar::Logical { value, .. }, _) => HostValue::Logical(u8::from(*value)),
            (Scalar::Complex { kind, re, im }, HostType::Complex(real)) => {
                let image = value.image();
                if image.len() == host_type.storage_bytes() {
                    let (re, im) = image.split_at(real.storage_bytes());
                    HostValue::Complex(HostComplex {
                        re: decode_real(re, real),
                        im: decode_real(im, real),
                    })
                } else {
                    let re = Scalar::Real { kind: *kind, bits: *re };
                    let im = Scalar::Real { kind: *kind, bits: *im };
                    HostValue::Complex(HostComplex {
                        re: self.real_to_native(&re),
                        im: self.real_to_native(&im),
                    })
                }
            }
            (Scalar::Real { .. }, HostType::Real(real)) => {
                HostValue::Real(decode_real(&value.image(), real))
            }
            (Scalar::Integer { .. }, _) => {
                HostValue::Integer(decode_integer(&value.image(), host_type))
            }
            _ => panic!("{ty} is not stored as {host_type}"),
        }
    }

    /// Converts a native value back to the scalar of type `ty` without
    /// changing a bit.
    ///
    /// # Panics
    ///
    /// Panics if `ty` has no native representation on this registry's target
    /// or if `value` is not stored in that representation.
    pub fn from_native(&self, value: &HostValue, ty: NumericType) -> Scalar {
        let host_type = self.native_representation_of(ty).host_type();
        assert_eq!(
            value.host_type(),
            host_type,
            "{ty} is stored as {host_type}, not {}",
            value.host_type()
        );
        let kind = ty.kind();
        match value {
            HostValue::Integer(integer) => Scalar::Integer {
                kind,
                bits: integer_bits(*integer),
            },
            HostValue::Real(real) => Scalar::Real {
                kind,
                bits: real_bits(real),
            },
            HostValue::Complex(pair) => {
                assert_eq!(
                    pair.re.host_type(),
                    pair.im.host_type(),
                    "parts of {ty} are stored in different native types"
                );
                let abstract_bytes = ty.significant_bytes().unwrap_or_default();
                if abstract_bytes == host_type.storage_bytes() {
                    let mut image = ScalarImage::new();
                    pair.re.push_storage(&mut image);
                    pair.im.push_storage(&mut image);
                    let (re, im) = image.split_at(image.len() / 2);
                    Scalar::Complex {
                        kind,
                        re: read_le(re),
                        im: read_le(im),
                    }
                } else {
                    let part = NumericType::real(kind);
                    Scalar::Complex {
                        kind,
                        re: self.real_from_native(&pair.re, part),
                        im: self.real_from_native(&pair.im, part),
                    }
                }
            }
            HostValue::Logical(tag) => Scalar::Logical {
                kind,
                value: *tag != 0,
            },
            HostValue::Character(scalar) => scalar.clone(),
        }
    }

    fn real_to_native(&self, part: &Scalar) -> HostReal {
        match self.to_native(part) {
            HostValue::Real(real) => real,
            other => panic!("{} is not stored as {}", part.numeric_type(), other.host_type()),
        }
    }

    fn real_from_native(&self, part: &HostReal, ty: NumericType) -> u128 {
        let expected = self.native_representation_of(ty).host_type();
        assert_eq!(
            HostType::Real(part.host_type()),
            expected,
            "complex part of {ty} is not stored as {expected}"
        );
        real_bits(part)
    }
}

fn fixed<const N: usize>(image: &[u8]) -> [u8; N] {
    match image.try_into() {
        Ok(bytes) => bytes,
        Err(_) => panic!("image of {} bytes does not fill a {N}-byte slot", image.len()),
    }
}

fn decode_real(image: &[u8], real: HostRealType) -> HostReal {
    match real {
        HostRealType::F32 => HostReal::F32(f32::from_le_bytes(fixed(image))),
        HostRealType::F64 => HostReal::F64(f64::from_le_bytes(fixed(image))),
        HostRealType::Extended { storage_bytes } => HostReal::Extended(
            ExtendedSlot::from_significant(
                fixed::<EXTENDED_SIGNIFICANT_BYTES>(image),
                usize::from(storage_bytes),
            ),
        ),
        HostRealType::Quad => HostReal::Quad(QuadSlot::from_le_bytes(fixed(image))),
    }
}

fn decode_integer(image: &[u8], host_type: HostType) -> HostInteger {
    match host_type {
        HostType::I8 => HostInteger::I8(i8::from_le_bytes(fixed(image))),
        HostType::I16 => HostInteger::I16(i16::from_le_bytes(fixed(image))),
        HostType::I32 => HostInteger::I32(i32::from_le_bytes(fixed(image))),
        HostType::I64 => HostInteger::I64(i64::from_le_bytes(fixed(image))),
        HostType::I128 => HostInteger::I128(i128::from_le_bytes(fixed(image))),
        other => panic!("{other} is not an integer type"),
    }
}

fn integer_bits(integer: HostInteger) -> u128 {
    match integer {
        HostInteger::I8(value) => read_le(&value.to_le_bytes()),
        HostInteger::I16(value) => read_le(&value.to_le_bytes()),
        HostInteger::I32(value) => read_le(&value.to_le_bytes()),
        HostInteger::I64(value) => read_le(&value.to_le_bytes()),
        HostInteger::I128(value) => read_le(&value.to_le_bytes()),
    }
}

fn real_bits(real: &HostReal) -> u128 {
    let mut image = ScalarImage::new();
    real.push_significant(&mut image);
    read_le(&image)
}

fn read_le(bytes: &[u8]) -> u128 {
    let mut buffer = [0; 16];
    buffer[..bytes.len()].copy_from_slice(bytes);
    u128::from_le_bytes(buffer)
}
