//! Lenient value coercion
//!
//! Total conversions from untyped JSON values into bounded numbers, plus the
//! min/max range projection used for relative visual weighting:
//! - Numeric coercion with caller-supplied defaults
//! - `[0, 1]` clamping
//! - Range normalization

pub mod numeric;
pub mod range;

pub use numeric::{clamp01, coerce_number, finite_number};
pub use range::RangeNormalizer;
