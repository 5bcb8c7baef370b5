/// Numeric limits of one host floating-point type, as C's `<float.h>` and
/// `std::numeric_limits` report them.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FloatModel {
    pub storage_bytes: usize,
    /// Significand digits in base 2, including the integer bit.
    pub digits: u32,
    pub max_exponent: i32,
    /// Conforms to IEC 60559 (IEEE 754) arithmetic and encoding.
    pub iec559: bool,
}

impl FloatModel {
    pub const FLOAT: FloatModel = FloatModel {
        storage_bytes: size_of::<f32>(),
        digits: f32::MANTISSA_DIGITS,
        max_exponent: f32::MAX_EXP,
        iec559: true,
    };

    pub const DOUBLE: FloatModel = FloatModel {
        storage_bytes: size_of::<f64>(),
        digits: f64::MANTISSA_DIGITS,
        max_exponent: f64::MAX_EXP,
        iec559: true,
    };

    /// x87 double extended, padded to 16 bytes (x86_64 System V).
    pub const X87_PADDED_16: FloatModel = FloatModel::x87(16);

    /// x87 double extended, padded to 12 bytes (i386 System V).
    pub const X87_PADDED_12: FloatModel = FloatModel::x87(12);

    pub const BINARY128: FloatModel = FloatModel {
        storage_bytes: 16,
        digits: 113,
        max_exponent: 16384,
        iec559: true,
    };

    const fn x87(storage_bytes: usize) -> FloatModel {
        FloatModel {
            storage_bytes,
            digits: 64,
            max_exponent: 16384,
            iec559: true,
        }
    }
}

/// Numeric facts of a compilation target.
///
/// [`HostTarget::current`] describes the machine this crate was built for and
/// is fixed at compile time. Other profiles can be described with the
/// builder, which is how registries for hypothetical targets are made:
///
/// ```
/// use foldhost_host::{FloatModel, HostTarget};
///
/// let ieee_only = HostTarget::builder()
///     .float(FloatModel::FLOAT)
///     .double(FloatModel::DOUBLE)
///     .build();
/// assert!(ieee_only.int128);
/// assert!(ieee_only.long_double.is_none());
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, bon::Builder)]
pub struct HostTarget {
    pub float: Option<FloatModel>,
    pub double: Option<FloatModel>,
    /// C `long double` of the target ABI, the only carrier of extended and
    /// quad precision.
    pub long_double: Option<FloatModel>,
    #[builder(default = true)]
    pub int128: bool,
}

impl HostTarget {
    pub const fn current() -> HostTarget {
        HostTarget {
            float: Some(FloatModel::FLOAT),
            double: Some(FloatModel::DOUBLE),
            long_double: Some(current_long_double()),
            int128: true,
        }
    }
}

impl Default for HostTarget {
    fn default() -> Self {
        HostTarget::current()
    }
}

const fn current_long_double() -> FloatModel {
    if cfg!(target_env = "msvc") || cfg!(all(target_arch = "aarch64", target_vendor = "apple")) {
        FloatModel::DOUBLE
    } else if cfg!(all(target_arch = "x86_64", target_os = "android")) {
        FloatModel::BINARY128
    } else if cfg!(target_arch = "x86_64") {
        FloatModel::X87_PADDED_16
    } else if cfg!(all(target_arch = "x86", not(target_os = "android"))) {
        FloatModel::X87_PADDED_12
    } else if cfg!(any(
        target_arch = "aarch64",
        target_arch = "riscv64",
        target_arch = "s390x",
        target_arch = "loongarch64"
    )) {
        FloatModel::BINARY128
    } else {
        FloatModel::DOUBLE
    }
}
