//! Intrinsic type descriptors and compile-time scalar values.
//!
//! A type is identified by a [`TypeCategory`] and a kind. The kind is a
//! category-specific selector (for most categories, a byte width) and is
//! never interpreted here beyond the layouts described by [`RealFormat`].
//!
//! ```
//! use foldhost_types::{NumericType, PromotionChain, Scalar, TypeCategory};
//!
//! let ty = NumericType::real(10);
//! assert_eq!(ty.significant_bytes(), Some(10));
//!
//! let chain = PromotionChain::for_category(TypeCategory::Real).unwrap();
//! assert_eq!(chain.walk(ty.kind()).collect::<Vec<_>>(), vec![16]);
//!
//! let half = Scalar::real64(0.5);
//! assert_eq!(half.numeric_type(), NumericType::real(8));
//! ```

mod category;
mod chain;
mod descriptor;
mod error;
mod format;
mod notation;
mod scalar;

pub use category::TypeCategory;
pub use chain::{ChainWalk, PromotionChain};
pub use descriptor::NumericType;
pub use error::{ScalarError, TypeError};
pub use format::{RealFormat, width_mask};
pub use scalar::{Scalar, ScalarImage};
