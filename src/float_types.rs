// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Side-classification tolerance used across the crate.
///
/// Every plane-side test goes through [`Line::point_side`] and compares
/// against this constant: a signed distance above `+EPSILON` is front,
/// below `-EPSILON` is back, anything in between counts as on the line.
/// It is a fixed module-wide constant rather than a builder parameter;
/// callers working at unusual coordinate scales should scale their
/// geometry, not the tolerance.
///
/// [`Line::point_side`]: crate::line::Line::point_side
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Side-classification tolerance used across the crate.
///
/// See the `f32` documentation of this constant; under `f64` the tighter
/// `1e-6` is used.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-6;
