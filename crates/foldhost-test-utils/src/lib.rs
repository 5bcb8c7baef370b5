//! Fixtures and law checkers shared by the workspace's tests.

pub mod laws;
mod targets;
mod values;

pub use targets::{all_profiles, ieee_only, no_int128, quad_long_double, x87_padded};
pub use values::boundary_values;
