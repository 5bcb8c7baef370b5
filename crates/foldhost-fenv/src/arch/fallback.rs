use super::FloatingPointUnit;
use crate::{FloatingPointFlags, ScopeOptions};

/// Targets whose floating-point state this crate cannot reach.
///
/// Scopes still nest and pair up, but never observe a flag and leave the
/// rounding mode alone.
pub(crate) struct Unobservable;

impl FloatingPointUnit for Unobservable {
    type Environment = ();

    const SUPPORTED: bool = false;

    fn save() {}

    fn restore(_: &()) {}

    fn prepare(_: &(), _: &ScopeOptions) {}

    fn raised() -> FloatingPointFlags {
        FloatingPointFlags::empty()
    }
}
