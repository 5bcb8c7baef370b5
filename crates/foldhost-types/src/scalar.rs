use smallvec::SmallVec;

use crate::format::width_mask;
use crate::{NumericType, RealFormat, ScalarError, TypeCategory};

/// Little-endian bytes of a scalar's significant content.
pub type ScalarImage = SmallVec<[u8; 32]>;

/// Compile-time value of an intrinsic type, held as raw bits.
///
/// This is the representation the constant folder computes with. It stores
/// bit patterns rather than host numbers, so every kind can be carried
/// whether or not the host has a matching primitive. Equality and hashing
/// are bitwise: two NaNs with the same payload are equal, `0.0` and `-0.0`
/// are not.
///
/// Integer bits are two's complement truncated to `kind` bytes. Real bits
/// follow [`RealFormat::for_kind`]. Character values keep one code unit per
/// element.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Scalar {
    Integer { kind: u8, bits: u128 },
    Real { kind: u8, bits: u128 },
    Complex { kind: u8, re: u128, im: u128 },
    Logical { kind: u8, value: bool },
    Character { kind: u8, units: Vec<u32> },
}

impl Scalar {
    /// Integer of `kind` bytes holding `value`.
    pub fn integer(kind: u8, value: i128) -> Result<Scalar, ScalarError> {
        let ty = NumericType::try_new(TypeCategory::Integer, kind)?;
        let bits = integer_width(ty)?;
        if bits < 128 {
            let min = -(1_i128 << (bits - 1));
            let max = (1_i128 << (bits - 1)) - 1;
            if value < min || value > max {
                return Err(ScalarError::IntegerOutOfRange { ty, value });
            }
        }
        Ok(Scalar::Integer {
            kind,
            bits: value as u128 & width_mask(bits),
        })
    }

    pub fn integer_from_bits(kind: u8, bits: u128) -> Result<Scalar, ScalarError> {
        let ty = NumericType::try_new(TypeCategory::Integer, kind)?;
        check_width(ty, bits, integer_width(ty)?)?;
        Ok(Scalar::Integer { kind, bits })
    }

    pub fn real_from_bits(kind: u8, bits: u128) -> Result<Scalar, ScalarError> {
        let ty = NumericType::try_new(TypeCategory::Real, kind)?;
        check_width(ty, bits, real_format(ty)?.storage_bits)?;
        Ok(Scalar::Real { kind, bits })
    }

    pub fn complex_from_bits(kind: u8, re: u128, im: u128) -> Result<Scalar, ScalarError> {
        let ty = NumericType::try_new(TypeCategory::Complex, kind)?;
        let width = real_format(ty)?.storage_bits;
        check_width(ty, re, width)?;
        check_width(ty, im, width)?;
        Ok(Scalar::Complex { kind, re, im })
    }

    pub fn real32(value: f32) -> Scalar {
        Scalar::Real {
            kind: 4,
            bits: value.to_bits() as u128,
        }
    }

    pub fn real64(value: f64) -> Scalar {
        Scalar::Real {
            kind: 8,
            bits: value.to_bits() as u128,
        }
    }

    pub fn logical(kind: u8, value: bool) -> Result<Scalar, ScalarError> {
        NumericType::try_new(TypeCategory::Logical, kind)?;
        Ok(Scalar::Logical { kind, value })
    }

    pub fn character(kind: u8, text: &str) -> Result<Scalar, ScalarError> {
        let ty = NumericType::try_new(TypeCategory::Character, kind)?;
        let units = text
            .chars()
            .map(|c| {
                let unit = c as u32;
                if kind < 4 && u128::from(unit) > width_mask(8 * u32::from(kind)) {
                    Err(ScalarError::CharacterOutOfRange { ty, unit })
                } else {
                    Ok(unit)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Scalar::Character { kind, units })
    }

    /// Complex value assembled from two reals of the same kind.
    pub fn from_parts(re: &Scalar, im: &Scalar) -> Result<Scalar, ScalarError> {
        match (re, im) {
            (
                Scalar::Real { kind, bits: re },
                Scalar::Real {
                    kind: im_kind,
                    bits: im,
                },
            ) if kind == im_kind => Ok(Scalar::Complex {
                kind: *kind,
                re: *re,
                im: *im,
            }),
            _ => Err(ScalarError::MismatchedParts {
                re: re.numeric_type(),
                im: im.numeric_type(),
            }),
        }
    }

    pub fn numeric_type(&self) -> NumericType {
        match self {
            Scalar::Integer { kind, .. } => NumericType::integer(*kind),
            Scalar::Real { kind, .. } => NumericType::real(*kind),
            Scalar::Complex { kind, .. } => NumericType::complex(*kind),
            Scalar::Logical { kind, .. } => NumericType::logical(*kind),
            Scalar::Character { kind, .. } => NumericType::character(*kind),
        }
    }

    /// Sign-extended value of an integer scalar.
    ///
    /// `None` for other categories and for integer kinds wider than 128 bits
    /// or of zero width.
    pub fn integer_value(&self) -> Option<i128> {
        match self {
            Scalar::Integer { kind, bits } => {
                let shift = 128_u32
                    .checked_sub(8 * u32::from(*kind))
                    .filter(|shift| *shift < 128)?;
                Some(((*bits as i128) << shift) >> shift)
            }
            _ => None,
        }
    }

    /// Real and imaginary parts of a complex scalar.
    pub fn parts(&self) -> Option<(Scalar, Scalar)> {
        match self {
            Scalar::Complex { kind, re, im } => Some((
                Scalar::Real {
                    kind: *kind,
                    bits: *re,
                },
                Scalar::Real {
                    kind: *kind,
                    bits: *im,
                },
            )),
            _ => None,
        }
    }

    /// Significant bytes, least significant first; complex values store the
    /// real part before the imaginary part.
    pub fn image(&self) -> ScalarImage {
        let mut image = ScalarImage::new();
        match self {
            Scalar::Integer { kind, bits } => push_le(&mut image, *bits, usize::from(*kind)),
            Scalar::Real { kind, bits } => push_le(&mut image, *bits, real_bytes(*kind)),
            Scalar::Complex { kind, re, im } => {
                push_le(&mut image, *re, real_bytes(*kind));
                push_le(&mut image, *im, real_bytes(*kind));
            }
            Scalar::Logical { value, .. } => image.push(u8::from(*value)),
            Scalar::Character { kind, units } => {
                for unit in units {
                    push_le(&mut image, u128::from(*unit), usize::from(*kind));
                }
            }
        }
        image
    }

    /// Inverse of [`Scalar::image`].
    pub fn from_image(ty: NumericType, image: &[u8]) -> Result<Scalar, ScalarError> {
        let kind = ty.kind();
        let expected = ty
            .significant_bytes()
            .ok_or(ScalarError::UnknownFormat { ty })?;
        let length_ok = match ty.category() {
            TypeCategory::Character => image.len() % expected == 0,
            _ => image.len() == expected,
        };
        if !length_ok {
            return Err(ScalarError::ImageLength {
                ty,
                expected,
                found: image.len(),
            });
        }
        let scalar = match ty.category() {
            TypeCategory::Integer => Scalar::Integer {
                kind,
                bits: read_le(image),
            },
            TypeCategory::Real => Scalar::Real {
                kind,
                bits: read_le(image),
            },
            TypeCategory::Complex => {
                let (re, im) = image.split_at(expected / 2);
                Scalar::Complex {
                    kind,
                    re: read_le(re),
                    im: read_le(im),
                }
            }
            TypeCategory::Logical => Scalar::Logical {
                kind,
                value: image[0] != 0,
            },
            TypeCategory::Character => {
                let units = image
                    .chunks(expected)
                    .map(|chunk| read_le(chunk) as u32)
                    .collect();
                Scalar::Character { kind, units }
            }
        };
        Ok(scalar)
    }
}

fn integer_width(ty: NumericType) -> Result<u32, ScalarError> {
    match ty.significant_bytes() {
        Some(bytes) => Ok(8 * bytes as u32),
        None => Err(ScalarError::UnknownFormat { ty }),
    }
}

fn real_format(ty: NumericType) -> Result<RealFormat, ScalarError> {
    ty.real_format().ok_or(ScalarError::UnknownFormat { ty })
}

fn check_width(ty: NumericType, bits: u128, width: u32) -> Result<(), ScalarError> {
    if bits & !width_mask(width) != 0 {
        return Err(ScalarError::BitsOutOfRange { ty, bits });
    }
    Ok(())
}

fn real_bytes(kind: u8) -> usize {
    RealFormat::for_kind(kind).map_or(0, RealFormat::storage_bytes)
}

fn push_le(image: &mut ScalarImage, bits: u128, bytes: usize) {
    image.extend_from_slice(&bits.to_le_bytes()[..bytes.min(16)]);
    image.resize(image.len() + bytes.saturating_sub(16), 0);
}

fn read_le(bytes: &[u8]) -> u128 {
    bytes
        .iter()
        .take(16)
        .rev()
        .fold(0, |acc, byte| (acc << 8) | u128::from(*byte))
}
