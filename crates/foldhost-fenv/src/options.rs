/// IEEE 754 rounding direction.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum RoundingMode {
    #[default]
    TiesToEven,
    TowardZero,
    Upward,
    Downward,
}

/// Environment a scope evaluates in, on top of masked traps and clear flags.
///
/// ```
/// use foldhost_fenv::{RoundingMode, ScopeOptions};
///
/// let options = ScopeOptions::builder()
///     .flush_subnormals_to_zero(true)
///     .rounding(RoundingMode::TowardZero)
///     .build();
/// assert!(options.flush_subnormals_to_zero);
/// assert_eq!(ScopeOptions::default().rounding, None);
/// ```
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, bon::Builder)]
pub struct ScopeOptions {
    /// Treat subnormal operands and results as zero.
    #[builder(default)]
    pub flush_subnormals_to_zero: bool,
    /// Keep the caller's rounding mode when `None`.
    pub rounding: Option<RoundingMode>,
}
