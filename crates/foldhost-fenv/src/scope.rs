use std::cell::RefCell;
use std::marker::PhantomData;

use crate::arch::{Environment, FloatingPointUnit, Native};
use crate::{FloatingPointFlags, ScopeOptions};

struct Frame {
    saved: Environment,
}

thread_local! {
    static FRAMES: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// Bracket around one unit of constant evaluation on the current thread.
///
/// Entering saves the thread's floating-point environment, masks every trap
/// and clears the sticky exception flags. [`FloatingPointScope::finish`]
/// reports the flags raised in between and puts the saved environment back.
/// A scope that is dropped without finishing still restores the environment,
/// so an early return or a panic cannot leak the scope's settings.
///
/// The guard is tied to the thread that created it and cannot be sent to
/// another one.
///
/// ```
/// use foldhost_fenv::{FloatingPointFlags, FloatingPointScope, ScopeOptions};
/// use std::hint::black_box;
///
/// let scope = FloatingPointScope::enter(ScopeOptions::default());
/// let quotient = black_box(black_box(1.0_f64) / black_box(0.0));
/// assert!(quotient.is_infinite());
/// let raised = scope.finish();
/// if FloatingPointScope::is_supported() {
///     assert_eq!(raised, FloatingPointFlags::DIVIDE_BY_ZERO);
/// }
/// ```
#[must_use = "dropping the scope restores the environment immediately"]
#[derive(Debug)]
pub struct FloatingPointScope {
    depth: usize,
    finished: bool,
    _thread_bound: PhantomData<*const ()>,
}

impl FloatingPointScope {
    /// Opens the outermost scope of this thread.
    ///
    /// # Panics
    ///
    /// Panics if a scope is already active on this thread. Recursive
    /// evaluation must use [`FloatingPointScope::enter_nested`].
    pub fn enter(options: ScopeOptions) -> Self {
        let active = Self::active_depth();
        assert!(
            active == 0,
            "floating-point scope entered while {active} scope(s) are active on this thread"
        );
        Self::push(options)
    }

    /// Opens a scope inside the active one.
    ///
    /// The outer scope's flags are saved with the rest of the environment and
    /// come back when this scope finishes.
    pub fn enter_nested(options: ScopeOptions) -> Self {
        Self::push(options)
    }

    fn push(options: ScopeOptions) -> Self {
        let saved = Native::save();
        Native::prepare(&saved, &options);
        let depth = FRAMES.with_borrow_mut(|frames| {
            frames.push(Frame { saved });
            frames.len()
        });
        tracing::trace!(depth, ?options, "entered floating-point scope");
        FloatingPointScope {
            depth,
            finished: false,
            _thread_bound: PhantomData,
        }
    }

    /// Flags raised so far, without leaving the scope.
    pub fn raised(&self) -> FloatingPointFlags {
        Native::raised()
    }

    /// Position of this scope on the thread's stack, starting at 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of scopes active on the current thread.
    pub fn active_depth() -> usize {
        FRAMES.with_borrow(Vec::len)
    }

    /// Whether scopes observe hardware flags on this target.
    pub const fn is_supported() -> bool {
        Native::SUPPORTED
    }

    /// Leaves the scope, restoring the environment saved on entry.
    ///
    /// # Panics
    ///
    /// Panics if a scope entered after this one is still active.
    pub fn finish(mut self) -> FloatingPointFlags {
        let raised = Native::raised();
        self.exit();
        if !raised.is_empty() {
            tracing::debug!(depth = self.depth, ?raised, "floating-point exceptions raised");
        }
        raised
    }

    fn exit(&mut self) {
        let saved = FRAMES.with_borrow_mut(|frames| {
            if frames.len() != self.depth && !std::thread::panicking() {
                panic!(
                    "floating-point scope at depth {} finished while {} scope(s) are active",
                    self.depth,
                    frames.len()
                );
            }
            let saved = frames.get(self.depth - 1).map(|frame| frame.saved);
            frames.truncate(self.depth - 1);
            saved
        });
        self.finished = true;
        if let Some(saved) = saved {
            Native::restore(&saved);
        }
        tracing::trace!(depth = self.depth, "left floating-point scope");
    }
}

impl Drop for FloatingPointScope {
    fn drop(&mut self) {
        if !self.finished {
            self.exit();
        }
    }
}

/// Opens the outermost scope with default options.
pub fn enter_floating_point_scope() -> FloatingPointScope {
    FloatingPointScope::enter(ScopeOptions::default())
}

/// Closes `scope` and returns the flags raised inside it.
pub fn exit_floating_point_scope(scope: FloatingPointScope) -> FloatingPointFlags {
    scope.finish()
}

/// Point-in-time copy of the current thread's floating-point environment.
///
/// Only useful for comparison: two snapshots are equal when the control and
/// status state they captured is identical.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentSnapshot(Environment);

pub fn current_environment() -> EnvironmentSnapshot {
    EnvironmentSnapshot(Native::save())
}

#[cfg(test)]
mod tests {
    use std::hint::black_box;

    use super::*;
    use crate::RoundingMode;

    #[test]
    fn test_empty_pair_raises_nothing_and_restores() {
        let before = current_environment();
        let scope = enter_floating_point_scope();
        assert_eq!(FloatingPointScope::active_depth(), 1);
        assert_eq!(exit_floating_point_scope(scope), FloatingPointFlags::empty());
        assert_eq!(FloatingPointScope::active_depth(), 0);
        assert_eq!(current_environment(), before);
    }

    #[test]
    fn test_divide_by_zero_is_captured_then_cleared() {
        if !FloatingPointScope::is_supported() {
            return;
        }
        let scope = enter_floating_point_scope();
        let quotient = black_box(black_box(1.0_f64) / black_box(0.0_f64));
        assert_eq!(quotient, f64::INFINITY);
        assert_eq!(scope.finish(), FloatingPointFlags::DIVIDE_BY_ZERO);

        let scope = enter_floating_point_scope();
        assert_eq!(scope.finish(), FloatingPointFlags::empty());
    }

    #[test]
    fn test_invalid_and_overflow() {
        if !FloatingPointScope::is_supported() {
            return;
        }
        let scope = enter_floating_point_scope();
        assert!(black_box(black_box(0.0_f64) / black_box(0.0_f64)).is_nan());
        assert_eq!(scope.raised(), FloatingPointFlags::INVALID);
        assert!(black_box(black_box(f64::MAX) * black_box(2.0_f64)).is_infinite());
        assert_eq!(
            scope.finish(),
            FloatingPointFlags::INVALID | FloatingPointFlags::OVERFLOW | FloatingPointFlags::INEXACT
        );
    }

    #[test]
    fn test_nested_scope_restores_outer_flags() {
        let outer = enter_floating_point_scope();
        black_box(black_box(1.0_f32) / black_box(0.0_f32));
        let inner = FloatingPointScope::enter_nested(ScopeOptions::default());
        assert_eq!(inner.depth(), 2);
        assert_eq!(inner.raised(), FloatingPointFlags::empty());
        assert_eq!(inner.finish(), FloatingPointFlags::empty());
        let raised = outer.finish();
        if FloatingPointScope::is_supported() {
            assert_eq!(raised, FloatingPointFlags::DIVIDE_BY_ZERO);
        }
    }

    #[test]
    fn test_dropped_scope_restores_environment() {
        let before = current_environment();
        {
            let _scope = FloatingPointScope::enter(
                ScopeOptions::builder()
                    .rounding(RoundingMode::TowardZero)
                    .flush_subnormals_to_zero(true)
                    .build(),
            );
            black_box(black_box(1.0_f64) / black_box(0.0_f64));
        }
        assert_eq!(FloatingPointScope::active_depth(), 0);
        assert_eq!(current_environment(), before);
    }

    #[test]
    fn test_rounding_mode_applies_inside_scope() {
        if !FloatingPointScope::is_supported() {
            return;
        }
        let nearest = black_box(1.0_f64) / black_box(3.0_f64);
        let scope =
            FloatingPointScope::enter(ScopeOptions::builder().rounding(RoundingMode::Upward).build());
        let upward = black_box(black_box(1.0_f64) / black_box(3.0_f64));
        assert_eq!(scope.finish(), FloatingPointFlags::INEXACT);
        assert_eq!(upward.to_bits(), nearest.to_bits() + 1);
    }

    #[test]
    fn test_flush_to_zero_applies_inside_scope() {
        if !FloatingPointScope::is_supported() {
            return;
        }
        let gradual = black_box(f64::MIN_POSITIVE) / black_box(4.0_f64);
        assert!(gradual > 0.0);
        let scope = FloatingPointScope::enter(
            ScopeOptions::builder().flush_subnormals_to_zero(true).build(),
        );
        let flushed = black_box(black_box(f64::MIN_POSITIVE) / black_box(4.0_f64));
        drop(scope);
        assert_eq!(flushed, 0.0);
    }

    #[test]
    fn test_default_scope_clears_callers_flush_to_zero() {
        if !FloatingPointScope::is_supported() {
            return;
        }
        let outer = FloatingPointScope::enter(
            ScopeOptions::builder().flush_subnormals_to_zero(true).build(),
        );
        assert_eq!(black_box(black_box(f64::MIN_POSITIVE) / black_box(4.0_f64)), 0.0);

        let inner = FloatingPointScope::enter_nested(ScopeOptions::default());
        let gradual = black_box(black_box(f64::MIN_POSITIVE) / black_box(4.0_f64));
        assert_eq!(inner.finish(), FloatingPointFlags::empty());
        assert_eq!(gradual, f64::MIN_POSITIVE / 4.0);

        let flushed = black_box(black_box(f64::MIN_POSITIVE) / black_box(4.0_f64));
        drop(outer);
        assert_eq!(flushed, 0.0);
    }

    #[test]
    #[should_panic(expected = "entered while 1 scope(s) are active")]
    fn test_plain_nested_enter_panics() {
        let _outer = enter_floating_point_scope();
        let _inner = enter_floating_point_scope();
    }

    #[test]
    #[should_panic(expected = "finished while 2 scope(s) are active")]
    fn test_out_of_order_finish_panics() {
        let outer = enter_floating_point_scope();
        let _inner = FloatingPointScope::enter_nested(ScopeOptions::default());
        outer.finish();
    }
}
