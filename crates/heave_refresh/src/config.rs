//! Control and spinner tuning
//!
//! Tunables live in plain config structs so hosts can load them from their
//! settings layer. Defaults reproduce the stock control.

use serde::{Deserialize, Serialize};

/// Trigger geometry and settle tuning for the refresh control
///
/// The trigger distance scales with the viewport but never drops below a
/// fixed floor, so short viewports still require a deliberate drag:
/// `trigger_distance = max(trigger_floor, visible_height * trigger_height_ratio)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Minimum trigger distance in layout units
    pub trigger_floor: f32,
    /// Trigger distance as a fraction of the viewport's visible height
    pub trigger_height_ratio: f32,
    /// Pull distance below which a resetting control is considered settled
    pub settle_epsilon: f32,
    /// Trigger distance used when no viewport is attached
    pub fallback_trigger_distance: f32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            trigger_floor: 74.0,
            trigger_height_ratio: 0.198,
            settle_epsilon: 0.01,
            fallback_trigger_distance: 100.0,
        }
    }
}

impl RefreshConfig {
    /// Pull distance at which trigger progress reaches 1.0
    pub fn trigger_distance(&self, visible_height: Option<f32>) -> f32 {
        match visible_height {
            Some(height) => self.trigger_floor.max(height * self.trigger_height_ratio),
            None => self.fallback_trigger_distance,
        }
    }
}

/// Geometry and animation timing for [`SpinnerView`](crate::SpinnerView)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerStyle {
    /// Side length of the square spinner frame
    pub diameter: f32,
    /// Stroke width at rest
    pub line_width: f32,
    /// Duration of one full rotation while refreshing, in milliseconds
    pub spin_duration_ms: u32,
    /// Duration of one half pulse (scale and stroke width), in milliseconds
    pub pulse_duration_ms: u32,
    /// Peak scale of the pulse
    pub pulse_scale: f32,
    /// Peak stroke width of the pulse
    pub pulse_line_width: f32,
    /// Duration of the exit (arc close + fade) animation, in milliseconds
    pub exit_duration_ms: u32,
}

impl Default for SpinnerStyle {
    fn default() -> Self {
        Self {
            diameter: 30.0,
            line_width: 1.0,
            spin_duration_ms: 800,
            pulse_duration_ms: 100,
            pulse_scale: 1.18,
            pulse_line_width: 2.0,
            exit_duration_ms: 300,
        }
    }
}
