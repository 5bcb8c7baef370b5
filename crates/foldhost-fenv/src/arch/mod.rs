//! Access to the calling thread's floating-point control and status state.

use crate::{FloatingPointFlags, ScopeOptions};

#[cfg(target_arch = "x86_64")]
mod x86_64;
#[cfg(target_arch = "x86_64")]
pub(crate) use self::x86_64::SseX87 as Native;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "aarch64")]
pub(crate) use self::aarch64::Armv8 as Native;

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
mod fallback;
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) use self::fallback::Unobservable as Native;

pub(crate) type Environment = <Native as FloatingPointUnit>::Environment;

/// A floating-point unit whose state can be saved, prepared and restored.
pub(crate) trait FloatingPointUnit {
    /// Control and status registers as saved on entry.
    type Environment: Clone + Copy + std::fmt::Debug + PartialEq;

    /// Whether [`FloatingPointUnit::raised`] observes real hardware flags.
    const SUPPORTED: bool;

    fn save() -> Self::Environment;

    fn restore(environment: &Self::Environment);

    /// Masks every trap, clears the sticky flags and applies `options` on top
    /// of `environment`.
    fn prepare(environment: &Self::Environment, options: &ScopeOptions);

    /// Sticky flags set since the last [`FloatingPointUnit::prepare`].
    fn raised() -> FloatingPointFlags;
}

/// Decodes exception bits ordered invalid, divide-by-zero, overflow,
/// underflow and inexact from bit 0 up, as FPSR orders them.
pub(crate) fn flags_from_status(status: u32) -> FloatingPointFlags {
    let mut flags = FloatingPointFlags::empty();
    flags.set(FloatingPointFlags::INVALID, status & (1 << 0) != 0);
    flags.set(FloatingPointFlags::DIVIDE_BY_ZERO, status & (1 << 1) != 0);
    flags.set(FloatingPointFlags::OVERFLOW, status & (1 << 2) != 0);
    flags.set(FloatingPointFlags::UNDERFLOW, status & (1 << 3) != 0);
    flags.set(FloatingPointFlags::INEXACT, status & (1 << 4) != 0);
    flags
}
