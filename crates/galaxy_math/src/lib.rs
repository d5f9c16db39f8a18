//! Numeric helpers for the galaxy view.
//!
//! Pure, stateless functions shared by the motion engine and the planet
//! attribute deriver:
//!
//! - **Interpolation** - [`lerp`], [`lerp_vec2`], [`smooth_lerp`]
//! - **Ranges** - [`clamp`], [`normalize`]
//! - **Geometry** - [`distance`], [`angle`], [`polar_to_cartesian`]
//! - **Easing** - [`ease_in_out_cubic`], [`ease_out_quad`]
//!
//! All coordinates are `f64` screen pixels.

mod easing;
mod vec2;

pub use easing::{ease_in_out_cubic, ease_out_quad, smooth_lerp};
pub use vec2::Vec2;

// =============================================================================
// INTERPOLATION
// =============================================================================

/// Linear interpolation between `a` and `b`.
///
/// `t = 0` yields `a`, `t = 1` yields `b`. Values of `t` outside `[0, 1]`
/// extrapolate.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Component-wise linear interpolation for [`Vec2`].
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

// =============================================================================
// RANGES
// =============================================================================

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics; `min` must not exceed `max`
/// (checked in debug builds).
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min <= max, "clamp: min {min} > max {max}");
    value.max(min).min(max)
}

/// Map `value` from `[min, max]` onto `[-1, 1]`.
///
/// The result is not clamped: values outside the source range map outside
/// `[-1, 1]`. `min == max` is a caller error and yields a non-finite result.
#[inline]
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min)) * 2.0 - 1.0
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    (b - a).length()
}

/// Angle in radians of the vector from `a` to `b`, in `(-PI, PI]`.
#[inline]
pub fn angle(a: Vec2, b: Vec2) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Convert polar coordinates around `center` to Cartesian.
#[inline]
pub fn polar_to_cartesian(center: Vec2, radius: f64, angle_rad: f64) -> Vec2 {
    Vec2::new(
        center.x + radius * angle_rad.cos(),
        center.y + radius * angle_rad.sin(),
    )
}
