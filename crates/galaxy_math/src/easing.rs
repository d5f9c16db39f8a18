//! Easing curves.
//!
//! Each curve maps `t` in `[0, 1]` onto `[0, 1]` with `f(0) = 0` and `f(1) = 1`.

use crate::lerp;

/// Lerp weighted by the smoothstep curve `t*t*(3 - 2t)`.
pub fn smooth_lerp(a: f64, b: f64, t: f64) -> f64 {
    let smooth = t * t * (3.0 - 2.0 * t);
    lerp(a, b, smooth)
}

/// Cubic ease-in-out.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Quadratic ease-out.
pub fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}
