/// Fast mathematical operations using SIMD-accelerated `glam` types.
///
/// Offsets and path points throughout bubblekit are [`Vec2`] values in
/// screen pixels, with `x` growing to the right and `y` growing downwards.
///
/// # Examples
///
/// ```
/// use bubblekit_core::math::Vec2;
///
/// let anchor = Vec2::new(100.0, 150.0);
/// let popup = anchor + Vec2::new(0.0, 208.0);
/// assert_eq!(popup.y, 358.0);
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::*;

/// Tolerance used by the comparison helpers below.
pub const EPSILON: f32 = 0.001;

/// `true` when `a` and `b` differ by at most [`EPSILON`].
#[inline]
pub fn near_equal(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

#[inline]
pub fn near_zero(a: f32) -> bool {
    near_equal(a, 0.0)
}

/// `a > b` by more than [`EPSILON`].
#[inline]
pub fn great_not_equal(a: f32, b: f32) -> bool {
    a - b > EPSILON
}

/// `a < b` by more than [`EPSILON`].
#[inline]
pub fn less_not_equal(a: f32, b: f32) -> bool {
    b - a > EPSILON
}

/// `a >= b` within [`EPSILON`].
#[inline]
pub fn great_or_equal(a: f32, b: f32) -> bool {
    a - b > -EPSILON
}

/// `a <= b` within [`EPSILON`].
#[inline]
pub fn less_or_equal(a: f32, b: f32) -> bool {
    b - a > -EPSILON
}

/// Both components within [`EPSILON`].
#[inline]
pub fn vec2_near_equal(a: Vec2, b: Vec2) -> bool {
    near_equal(a.x, b.x) && near_equal(a.y, b.y)
}

/// Clamps `value` into `[low, high]`, checking the low bound first.
///
/// Unlike [`f32::clamp`] this never panics: an inverted band resolves to
/// `low`, which is what the placement fitter relies on.
#[inline]
pub fn clamp_band(value: f32, low: f32, high: f32) -> f32 {
    if value < low {
        low
    } else if high < value {
        high
    } else {
        value
    }
}
