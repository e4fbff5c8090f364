//! Easing functions
//!
//! Maps normalized animation time (0.0 to 1.0) to an eased output value.
//! All curves are fixed-point-free closed forms; `apply` clamps its input.

/// Easing function applied when interpolating toward a keyframe
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant rate
    #[default]
    Linear,
    /// Accelerate from rest (quadratic)
    EaseIn,
    /// Decelerate to rest (quadratic)
    EaseOut,
    /// Accelerate then decelerate (quadratic)
    EaseInOut,
    /// Stronger acceleration from rest (cubic)
    EaseInCubic,
    /// Stronger deceleration to rest (cubic)
    EaseOutCubic,
}

impl Easing {
    /// Apply the easing curve to a normalized time value
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}
