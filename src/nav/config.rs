//! Navigation timing and gesture tuning

use serde::{Deserialize, Serialize};

/// How a committed page change is animated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransitionStyle {
    /// Old panel slides out, new panel slides in from the travel side
    #[default]
    Slide,
    /// Book mode: every page between source and target turns in sequence
    #[serde(alias = "book")]
    Flip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub style: TransitionStyle,
    /// Panel transition length; matches the CSS slide speed
    pub duration_ms: f64,
    /// Horizontal travel of entering/exiting panels (px)
    pub slide_offset: f32,
    /// Delay between consecutive page turns in flip mode
    pub flip_stagger_ms: f64,

    /// Accumulated wheel delta needed to commit a page change
    pub wheel_threshold: f32,
    /// Idle gap after the last wheel event before the gesture is evaluated
    pub wheel_debounce_ms: f64,
    /// Extra lock after a committed wheel gesture, on top of `duration_ms`
    pub wheel_cooldown_ms: f64,
    /// Accumulator clamp
    pub wheel_max_accum: f32,

    /// Move the current and peek panels while a gesture is in progress
    pub drag_feedback: bool,
    /// Eased return of dragged panels when a gesture falls short
    pub snap_ms: f64,

    /// Horizontal travel before a touch counts as a swipe
    pub swipe_lock_px: f32,
    /// Required |dx| / |dy| ratio for a swipe
    pub swipe_dominance: f32,
    /// Horizontal travel that commits a swipe
    pub swipe_threshold_px: f32,

    /// Cover exit animation before the panel view appears
    pub cover_exit_ms: f64,
    /// Delay between hiding the panels and the cover coming back
    pub cover_return_ms: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            style: TransitionStyle::Slide,
            duration_ms: 350.0,
            slide_offset: 40.0,
            flip_stagger_ms: 90.0,

            wheel_threshold: 50.0,
            wheel_debounce_ms: 100.0,
            wheel_cooldown_ms: 200.0,
            wheel_max_accum: 400.0,

            drag_feedback: true,
            snap_ms: 180.0,

            swipe_lock_px: 10.0,
            swipe_dominance: 1.2,
            swipe_threshold_px: 40.0,

            cover_exit_ms: 350.0,
            cover_return_ms: 300.0,
        }
    }
}

impl NavConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// How long the wheel stays locked after a committed gesture
    pub fn wheel_lock_ms(&self) -> f64 {
        self.duration_ms + self.wheel_cooldown_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names() {
        let cfg = NavConfig::from_json(r#"{"style": "book"}"#).unwrap();
        assert_eq!(cfg.style, TransitionStyle::Flip);
        assert!(NavConfig::from_json(r#"{"style": "fade"}"#).is_err());
    }

    #[test]
    fn test_json_override() {
        let cfg = NavConfig::from_json(r#"{"style": "flip", "duration_ms": 500}"#).unwrap();
        assert_eq!(cfg.style, TransitionStyle::Flip);
        assert_eq!(cfg.duration_ms, 500.0);
        assert_eq!(cfg.wheel_threshold, 50.0);
        assert_eq!(cfg.wheel_lock_ms(), 700.0);
    }
}
