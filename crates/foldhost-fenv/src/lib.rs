//! Scoped control of the thread's floating-point environment.
//!
//! Constant folding evaluates on the host's floating-point unit, whose trap
//! masks, rounding mode and sticky exception flags are hidden per-thread
//! state. A [`FloatingPointScope`] brackets one evaluation: it starts from a
//! known environment, collects the exceptions raised inside, and leaves the
//! environment exactly as it found it.

mod arch;
mod flags;
mod options;
mod scope;

pub use flags::FloatingPointFlags;
pub use options::{RoundingMode, ScopeOptions};
pub use scope::{
    EnvironmentSnapshot, FloatingPointScope, current_environment, enter_floating_point_scope,
    exit_floating_point_scope,
};
