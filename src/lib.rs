//! Bridge between a constant folder's intrinsic types and the host's native
//! numeric types.
//!
//! - [`types`] describes intrinsic types and carries scalar values as bits.
//! - [`host`] maps each type to the native type holding the same bits, casts
//!   between the two, and widens types the host cannot hold.
//! - [`fenv`] brackets native evaluation in a floating-point scope.
//!
//! ```
//! use foldhost::prelude::*;
//!
//! let host = HostRegistry::host();
//! let ty: NumericType = "real(kind=2)".parse().unwrap();
//! let promotion = host.bigger_or_same(ty).unwrap();
//!
//! let scope = FloatingPointScope::enter(ScopeOptions::default());
//! let native = host.to_native(&Scalar::real32(1.5));
//! let doubled = native.as_f32().unwrap() * 2.0;
//! let result = host.from_native(&HostValue::from(doubled), promotion.chosen);
//! assert_eq!(scope.finish(), FloatingPointFlags::empty());
//! assert_eq!(result, Scalar::real32(3.0));
//! ```

pub use foldhost_fenv as fenv;
pub use foldhost_host as host;
pub use foldhost_types as types;

pub mod prelude {
    pub use foldhost_fenv::{
        FloatingPointFlags, FloatingPointScope, RoundingMode, ScopeOptions,
        enter_floating_point_scope, exit_floating_point_scope,
    };
    pub use foldhost_host::{
        Correspondence, HostComplex, HostRegistry, HostRepresentation, HostTarget, HostType,
        HostValue, Promotion,
    };
    pub use foldhost_types::{NumericType, Scalar, ScalarError, TypeCategory, TypeError};
}
