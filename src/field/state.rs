//! Particle field state and lifecycle
//!
//! One `ParticleField` owns the particle pool, the comet and shard lists, the
//! pointer and the frame clock. Only `update` mutates the pools; only the
//! pointer methods mutate the pointer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::color::{Rgb, parse_css_color};
use super::config::{FieldConfig, MAX_DPR, MotionProfile};
use super::effects::{Comet, Shard};
use super::frame::FrameLimiter;
use super::glow::GlowGate;
use super::particle::Particle;
use super::surface::Surface;

/// Last known pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub pos: Vec2,
    pub active: bool,
}

impl Default for Pointer {
    fn default() -> Self {
        Self {
            pos: Vec2::splat(-9999.0),
            active: false,
        }
    }
}

/// Whether animation frames are being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Canvas particle field simulator
pub struct ParticleField {
    pub(super) cfg: FieldConfig,
    pub(super) profile: MotionProfile,
    pub(super) rng: Pcg32,
    /// Logical (CSS pixel) viewport size
    pub(super) size: Vec2,
    pub(super) dpr: f32,
    pub(super) particles: Vec<Particle>,
    pub(super) comets: Vec<Comet>,
    pub(super) shards: Vec<Shard>,
    pub(super) pointer: Pointer,
    /// Eased pointer glow opacity
    pub(super) glow: f32,
    pub(super) gate: GlowGate,
    pub(super) color: Rgb,
    pub(super) limiter: FrameLimiter,
    pub(super) last_update: Option<f64>,
    pub(super) next_comet_at: Option<f64>,
    pub(super) next_shard_at: Option<f64>,
    pub(super) run: RunState,
}

impl ParticleField {
    /// Create an empty field; call `resize` to populate it
    pub fn new(cfg: FieldConfig, profile: MotionProfile, seed: u64) -> Self {
        let limiter = FrameLimiter::new(cfg.frame_interval());
        let color = cfg.color;
        Self {
            cfg,
            profile,
            rng: Pcg32::seed_from_u64(seed),
            size: Vec2::ZERO,
            dpr: 1.0,
            particles: Vec::new(),
            comets: Vec::new(),
            shards: Vec::new(),
            pointer: Pointer::default(),
            glow: 0.0,
            gate: GlowGate::new(),
            color,
            limiter,
            last_update: None,
            next_comet_at: None,
            next_shard_at: None,
            run: RunState::Running,
        }
    }

    /// Apply a new viewport size and grow or shrink the pool to match.
    ///
    /// Surviving particles keep their position and velocity. Returns the new
    /// pool size.
    pub fn resize(&mut self, width: f32, height: f32, dpr: f32) -> usize {
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr.min(MAX_DPR) } else { 1.0 };

        let target = self.cfg.target_particle_count(self.size.x, self.size.y, self.profile);
        let before = self.particles.len();
        while self.particles.len() < target {
            let p = Particle::spawn(&mut self.rng, &self.cfg, self.size);
            self.particles.push(p);
        }
        self.particles.truncate(target);

        if before != target {
            log::debug!(
                "Particle pool {} -> {} ({}x{} @{}x, {})",
                before,
                target,
                self.size.x,
                self.size.y,
                self.dpr,
                self.profile.as_str()
            );
        }
        target
    }

    /// Backing-store size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.size.x * self.dpr).round() as u32,
            (self.size.y * self.dpr).round() as u32,
        )
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Pointer {
            pos: Vec2::new(x, y),
            active: true,
        };
    }

    /// Pointer left the page or the touch ended; the last position is kept
    /// so the glow can fade out in place.
    pub fn release_pointer(&mut self) {
        self.pointer.active = false;
    }

    /// Re-read the accent colour; unparsable text keeps the current colour
    pub fn sync_theme_color(&mut self, value: &str) -> bool {
        match parse_css_color(value) {
            Some(rgb) => {
                if rgb != self.color {
                    log::debug!("Particle colour {:?} -> {:?}", self.color.0, rgb.0);
                }
                self.color = rgb;
                true
            }
            None => {
                log::debug!("Ignoring unparsable accent colour {:?}", value);
                false
            }
        }
    }

    /// Stop processing frames (page hidden)
    pub fn pause(&mut self) {
        if self.run == RunState::Running {
            self.run = RunState::Paused;
            log::info!("Particle field paused");
        }
    }

    /// Resume at `now`, re-arming every clock relative to it so no backlog of
    /// spawns fires on the first frame back.
    pub fn resume(&mut self, now: f64) {
        self.run = RunState::Running;
        self.limiter.reset(now);
        self.last_update = Some(now);
        self.next_comet_at = Some(now + self.roll_comet_interval());
        self.next_shard_at = Some(now + self.roll_shard_interval());
        log::info!("Particle field running");
    }

    /// Capped-rate frame entry point: update then render.
    ///
    /// Returns `false` when the frame was dropped.
    pub fn frame(&mut self, timestamp: f64, surface: &mut dyn Surface) -> bool {
        if self.run == RunState::Paused || !self.limiter.admit(timestamp) {
            return false;
        }
        self.update(timestamp);
        self.render(surface);
        true
    }

    pub(super) fn roll_comet_interval(&mut self) -> f64 {
        roll(&mut self.rng, self.cfg.comet_interval_min, self.cfg.comet_interval_max)
    }

    pub(super) fn roll_shard_interval(&mut self) -> f64 {
        roll(&mut self.rng, self.cfg.shard_interval_min, self.cfg.shard_interval_max)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    pub fn profile(&self) -> MotionProfile {
        self.profile
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn dpr(&self) -> f32 {
        self.dpr
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn comets(&self) -> &[Comet] {
        &self.comets
    }

    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn glow_level(&self) -> f32 {
        self.glow
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_running(&self) -> bool {
        self.run == RunState::Running
    }

    /// Capability handed to UI that should hide the pointer glow
    pub fn glow_gate(&self) -> GlowGate {
        self.gate.clone()
    }
}

fn roll(rng: &mut Pcg32, min: f64, max: f64) -> f64 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}
