/// Storage layout of a binary floating-point kind.
///
/// Every format is laid out as `sign | exponent | significand field`, most
/// significant bit first. The significand field holds `binary_precision - 1`
/// bits for formats with a hidden integer bit and `binary_precision` bits for
/// the x87 extended format, which stores its integer bit explicitly.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealFormat {
    pub binary_precision: u32,
    pub exponent_bits: u32,
    pub storage_bits: u32,
    pub explicit_integer_bit: bool,
}

impl RealFormat {
    pub const BINARY16: RealFormat = RealFormat::implicit(11, 5, 16);
    pub const BFLOAT16: RealFormat = RealFormat::implicit(8, 8, 16);
    pub const BINARY32: RealFormat = RealFormat::implicit(24, 8, 32);
    pub const BINARY64: RealFormat = RealFormat::implicit(53, 11, 64);
    pub const X87_EXTENDED: RealFormat = RealFormat {
        binary_precision: 64,
        exponent_bits: 15,
        storage_bits: 80,
        explicit_integer_bit: true,
    };
    pub const BINARY128: RealFormat = RealFormat::implicit(113, 15, 128);

    const fn implicit(binary_precision: u32, exponent_bits: u32, storage_bits: u32) -> Self {
        RealFormat {
            binary_precision,
            exponent_bits,
            storage_bits,
            explicit_integer_bit: false,
        }
    }

    /// Format of a real kind, or `None` for kinds the type system does not define.
    pub const fn for_kind(kind: u8) -> Option<RealFormat> {
        match kind {
            2 => Some(RealFormat::BINARY16),
            3 => Some(RealFormat::BFLOAT16),
            4 => Some(RealFormat::BINARY32),
            8 => Some(RealFormat::BINARY64),
            10 => Some(RealFormat::X87_EXTENDED),
            16 => Some(RealFormat::BINARY128),
            _ => None,
        }
    }

    pub const fn storage_bytes(self) -> usize {
        (self.storage_bits / 8) as usize
    }

    /// Largest unbiased exponent plus one, as reported by C's `max_exponent`.
    pub const fn max_exponent(self) -> i32 {
        1 << (self.exponent_bits - 1)
    }

    pub const fn significand_field_bits(self) -> u32 {
        self.storage_bits - 1 - self.exponent_bits
    }

    pub const fn bit_mask(self) -> u128 {
        width_mask(self.storage_bits)
    }

    pub const fn sign_bit(self) -> u128 {
        1 << (self.storage_bits - 1)
    }

    pub const fn exponent_mask(self) -> u128 {
        width_mask(self.exponent_bits) << self.significand_field_bits()
    }

    pub const fn significand_mask(self) -> u128 {
        width_mask(self.significand_field_bits())
    }

    const fn integer_bit(self) -> u128 {
        if self.explicit_integer_bit {
            1 << (self.significand_field_bits() - 1)
        } else {
            0
        }
    }

    pub const fn zero(self, negative: bool) -> u128 {
        if negative { self.sign_bit() } else { 0 }
    }

    pub const fn infinity(self, negative: bool) -> u128 {
        self.zero(negative) | self.exponent_mask() | self.integer_bit()
    }

    pub const fn quiet_nan(self) -> u128 {
        let quiet = if self.explicit_integer_bit {
            1 << (self.significand_field_bits() - 2)
        } else {
            1 << (self.significand_field_bits() - 1)
        };
        self.exponent_mask() | self.integer_bit() | quiet
    }

    pub const fn largest_finite(self, negative: bool) -> u128 {
        let exponent = (width_mask(self.exponent_bits) - 1) << self.significand_field_bits();
        self.zero(negative) | exponent | self.significand_mask()
    }

    pub const fn smallest_subnormal(self, negative: bool) -> u128 {
        self.zero(negative) | 1
    }

    /// Bit pattern of `1.0`.
    pub const fn one(self) -> u128 {
        let bias = width_mask(self.exponent_bits - 1);
        (bias << self.significand_field_bits()) | self.integer_bit()
    }
}

/// Mask covering the low `bits` bits.
pub const fn width_mask(bits: u32) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        (1 << bits) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_formats_match_rust_floats() {
        assert_eq!(RealFormat::BINARY32.binary_precision, f32::MANTISSA_DIGITS);
        assert_eq!(RealFormat::BINARY32.max_exponent(), f32::MAX_EXP);
        assert_eq!(RealFormat::BINARY64.binary_precision, f64::MANTISSA_DIGITS);
        assert_eq!(RealFormat::BINARY64.max_exponent(), f64::MAX_EXP);

        let single = RealFormat::BINARY32;
        assert_eq!(single.infinity(false), f32::INFINITY.to_bits() as u128);
        assert_eq!(single.infinity(true), f32::NEG_INFINITY.to_bits() as u128);
        assert_eq!(single.largest_finite(false), f32::MAX.to_bits() as u128);
        assert_eq!(single.largest_finite(true), f32::MIN.to_bits() as u128);
        assert_eq!(single.one(), 1.0f32.to_bits() as u128);
        assert_eq!(single.zero(true), (-0.0f32).to_bits() as u128);
        assert!(f32::from_bits(single.quiet_nan() as u32).is_nan());

        let double = RealFormat::BINARY64;
        assert_eq!(double.largest_finite(false), f64::MAX.to_bits() as u128);
        assert_eq!(double.one(), 1.0f64.to_bits() as u128);
        assert_eq!(double.smallest_subnormal(false), 1);
        assert!(f64::from_bits(double.quiet_nan() as u64).is_nan());
    }

    #[test]
    fn test_wide_formats_share_exponent_range() {
        assert_eq!(RealFormat::X87_EXTENDED.max_exponent(), 16384);
        assert_eq!(RealFormat::BINARY128.max_exponent(), 16384);
        assert_eq!(RealFormat::X87_EXTENDED.significand_field_bits(), 64);
        assert_eq!(RealFormat::BINARY128.significand_field_bits(), 112);
        assert_eq!(RealFormat::X87_EXTENDED.storage_bytes(), 10);
    }

    #[test]
    fn test_x87_special_values_carry_integer_bit() {
        let x87 = RealFormat::X87_EXTENDED;
        assert_eq!(x87.one(), 0x3FFF_8000_0000_0000_0000);
        assert_eq!(x87.infinity(false), 0x7FFF_8000_0000_0000_0000);
        assert_eq!(x87.quiet_nan(), 0x7FFF_C000_0000_0000_0000);
        assert_eq!(x87.bit_mask(), width_mask(80));
    }

    #[test]
    fn test_unknown_kinds_have_no_format() {
        assert_eq!(RealFormat::for_kind(1), None);
        assert_eq!(RealFormat::for_kind(12), None);
        assert_eq!(RealFormat::for_kind(3), Some(RealFormat::BFLOAT16));
    }
}
