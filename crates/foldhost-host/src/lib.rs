//! Native representations of intrinsic types on a build target.
//!
//! A [`HostRegistry`] answers, for every [`NumericType`](foldhost_types::NumericType),
//! whether the target has a native type holding exactly the same bits. For
//! types that do, the registry converts scalars to and from [`HostValue`]s
//! without touching a bit. For types that do not, [`HostRegistry::bigger_or_same`]
//! finds the nearest wider kind that does.
//!
//! ```
//! use foldhost_host::HostRegistry;
//! use foldhost_types::{NumericType, Scalar};
//!
//! let host = HostRegistry::host();
//! let x = Scalar::real64(-0.0);
//! let native = host.to_native(&x);
//! assert_eq!(native.as_f64().map(f64::to_bits), Some(0x8000_0000_0000_0000));
//! assert_eq!(host.from_native(&native, NumericType::real(8)), x);
//!
//! let promotion = host.bigger_or_same(NumericType::real(2)).unwrap();
//! assert_eq!(promotion.chosen, NumericType::real(4));
//! ```

mod cast;
mod compliance;
mod registry;
mod representation;
mod resolver;
mod target;
mod value;

pub use compliance::CompliancePredicate;
pub use registry::{Correspondence, HostRegistry};
pub use representation::{EXTENDED_SIGNIFICANT_BYTES, HostRealType, HostRepresentation, HostType};
pub use resolver::Promotion;
pub use target::{FloatModel, HostTarget};
pub use value::{ExtendedSlot, HostComplex, HostInteger, HostReal, HostValue, QuadSlot};
