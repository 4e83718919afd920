//! Particle field tuning
//!
//! Defaults reproduce the live site; a host may override any subset through
//! JSON (`#[serde(default)]` fills the rest).

use serde::{Deserialize, Serialize};

use super::color::Rgb;

/// Reference resolution the base density is expressed against
pub const REFERENCE_AREA: f32 = 1920.0 * 1080.0;

/// Viewport width at or below which the compact profile applies
pub const COMPACT_MAX_WIDTH: f32 = 768.0;

/// Device pixel ratio ceiling for the canvas backing store
pub const MAX_DPR: f32 = 2.0;

/// Environment-driven motion profile, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionProfile {
    #[default]
    Standard,
    /// Small viewport
    Compact,
    /// `prefers-reduced-motion: reduce`
    Reduced,
}

impl MotionProfile {
    /// Reduced motion wins over viewport size
    pub fn detect(reduced_motion: bool, viewport_width: f32) -> Self {
        if reduced_motion {
            MotionProfile::Reduced
        } else if viewport_width <= COMPACT_MAX_WIDTH {
            MotionProfile::Compact
        } else {
            MotionProfile::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MotionProfile::Standard => "standard",
            MotionProfile::Compact => "compact",
            MotionProfile::Reduced => "reduced",
        }
    }

    /// Comets and shards are decorative only
    pub fn effects_enabled(&self) -> bool {
        *self != MotionProfile::Reduced
    }

    fn is_compact(&self) -> bool {
        *self == MotionProfile::Compact
    }
}

/// Particle field configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Base particle count at the reference resolution
    pub count: u32,
    pub compact_count: u32,
    pub reduced_count: u32,
    pub min_count: usize,
    pub max_count: usize,
    pub compact_max_count: usize,
    pub reduced_max_count: usize,

    pub min_size: f32,
    pub max_size: f32,
    pub speed: f32,
    /// Sinusoidal velocity perturbation per tick
    pub drift: f32,
    /// Multiplicative velocity decay per tick
    pub damping: f32,
    /// Off-screen slack before a particle wraps
    pub wrap_pad: f32,

    pub color: Rgb,
    pub particle_alpha: f32,
    pub line_alpha: f32,
    pub link_dist: f32,
    pub link_width: f32,

    pub pointer_radius: f32,
    pub pointer_force: f32,
    pub pointer_line_alpha: f32,
    pub pointer_line_dist: f32,
    pub pointer_glow: bool,
    /// Per-frame easing factor of the glow toward its target
    pub glow_ease: f32,

    pub shard_max: usize,
    pub shard_tail: usize,
    pub shard_speed_min: f32,
    pub shard_speed_max: f32,
    pub shard_interval_min: f64,
    pub shard_interval_max: f64,
    /// Shard lifetime range in milliseconds
    pub shard_life_min: f32,
    pub shard_life_max: f32,

    pub comet_max: usize,
    pub comet_tail: usize,
    pub comet_head_size: f32,
    pub comet_speed_min: f32,
    pub comet_speed_max: f32,
    pub comet_interval_min: f64,
    pub comet_interval_max: f64,

    pub fps_cap: f64,
    /// Stop the frame loop while the page is hidden
    pub pause_offscreen: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 120,
            compact_count: 64,
            reduced_count: 26,
            min_count: 40,
            max_count: 200,
            compact_max_count: 95,
            reduced_max_count: 30,

            min_size: 1.0,
            max_size: 2.5,
            speed: 0.25,
            drift: 0.0003,
            damping: 0.99,
            wrap_pad: 20.0,

            color: Rgb::default(),
            particle_alpha: 0.4,
            line_alpha: 0.07,
            link_dist: 140.0,
            link_width: 0.6,

            pointer_radius: 200.0,
            pointer_force: 0.06,
            pointer_line_alpha: 0.15,
            pointer_line_dist: 220.0,
            pointer_glow: true,
            glow_ease: 0.04,

            shard_max: 18,
            shard_tail: 12,
            shard_speed_min: 0.12,
            shard_speed_max: 0.32,
            shard_interval_min: 900.0,
            shard_interval_max: 2400.0,
            shard_life_min: 5200.0,
            shard_life_max: 12000.0,

            comet_max: 3,
            comet_tail: 120,
            comet_head_size: 18.0,
            comet_speed_min: 1.8,
            comet_speed_max: 3.4,
            comet_interval_min: 1600.0,
            comet_interval_max: 4200.0,

            fps_cap: 120.0,
            pause_offscreen: true,
        }
    }
}

impl FieldConfig {
    /// Parse a partial JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Target pool size for a viewport of `width` x `height` CSS pixels
    pub fn target_particle_count(&self, width: f32, height: f32, profile: MotionProfile) -> usize {
        let (base, ceiling) = match profile {
            MotionProfile::Standard => (self.count, self.max_count),
            MotionProfile::Compact => (self.compact_count, self.compact_max_count),
            MotionProfile::Reduced => (self.reduced_count, self.reduced_max_count),
        };
        let area = (width.max(0.0) * height.max(0.0)) as f64;
        let target = (base as f64 * (area / REFERENCE_AREA as f64)).floor() as usize;
        target
            .clamp(self.min_count, self.max_count.max(self.min_count))
            .min(ceiling)
    }

    pub fn pointer_radius_for(&self, profile: MotionProfile) -> f32 {
        if profile.is_compact() {
            self.pointer_radius * 0.68
        } else {
            self.pointer_radius
        }
    }

    pub fn link_dist_for(&self, profile: MotionProfile) -> f32 {
        if profile.is_compact() {
            self.link_dist * 0.82
        } else {
            self.link_dist
        }
    }

    pub fn pointer_line_dist_for(&self, profile: MotionProfile) -> f32 {
        if profile.is_compact() {
            self.pointer_line_dist * 0.72
        } else {
            self.pointer_line_dist
        }
    }

    /// Comet and shard speed multiplier
    pub fn effect_speed_scale(&self, profile: MotionProfile) -> f32 {
        if profile.is_compact() { 0.9 } else { 1.0 }
    }

    /// Minimum milliseconds between admitted frames
    pub fn frame_interval(&self) -> f64 {
        1000.0 / self.fps_cap.max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_viewport_count() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.target_particle_count(1920.0, 1080.0, MotionProfile::Standard), 120);
    }

    #[test]
    fn test_count_clamps() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.target_particle_count(100.0, 100.0, MotionProfile::Standard), 40);
        assert_eq!(cfg.target_particle_count(7680.0, 4320.0, MotionProfile::Standard), 200);
        assert_eq!(cfg.target_particle_count(3840.0, 2160.0, MotionProfile::Compact), 95);
        assert_eq!(cfg.target_particle_count(3840.0, 2160.0, MotionProfile::Reduced), 30);
        // Reduced ceiling sits below the global floor
        assert_eq!(cfg.target_particle_count(100.0, 100.0, MotionProfile::Reduced), 30);
    }

    #[test]
    fn test_profile_detection() {
        assert_eq!(MotionProfile::detect(true, 1920.0), MotionProfile::Reduced);
        assert_eq!(MotionProfile::detect(false, 768.0), MotionProfile::Compact);
        assert_eq!(MotionProfile::detect(false, 1280.0), MotionProfile::Standard);
    }

    #[test]
    fn test_partial_json_override() {
        let cfg = FieldConfig::from_json(r#"{"count": 80, "pointer_glow": false}"#).unwrap();
        assert_eq!(cfg.count, 80);
        assert!(!cfg.pointer_glow);
        assert_eq!(cfg.link_dist, 140.0);
    }

    #[test]
    fn test_compact_scaling() {
        let cfg = FieldConfig::default();
        assert!((cfg.pointer_radius_for(MotionProfile::Compact) - 136.0).abs() < 1e-3);
        assert_eq!(cfg.link_dist_for(MotionProfile::Standard), 140.0);
        assert!((cfg.effect_speed_scale(MotionProfile::Compact) - 0.9).abs() < 1e-6);
    }
}
