//! Per-frame field update

use super::effects::{Comet, NOMINAL_FRAME_MS, Shard};
use super::state::ParticleField;

/// Bounds on the wall-clock delta fed to comets and shards (ms)
const MIN_EFFECT_DT_MS: f64 = 8.0;
const MAX_EFFECT_DT_MS: f64 = 40.0;

impl ParticleField {
    /// Advance particles, comets and shards to `now` (milliseconds)
    pub fn update(&mut self, now: f64) {
        let dt_ms = match self.last_update {
            Some(last) => (now - last).clamp(MIN_EFFECT_DT_MS, MAX_EFFECT_DT_MS),
            None => NOMINAL_FRAME_MS as f64,
        };
        self.last_update = Some(now);

        let pointer = self
            .pointer
            .active
            .then(|| (self.pointer.pos, self.cfg.pointer_radius_for(self.profile)));

        for p in &mut self.particles {
            p.step(&self.cfg, pointer, self.size);
        }

        self.update_effects(now, dt_ms as f32);
    }

    fn update_effects(&mut self, now: f64, dt_ms: f32) {
        if self.profile.effects_enabled() {
            if self.next_comet_at.is_none() {
                self.next_comet_at = Some(now + self.roll_comet_interval());
            }
            if self.next_comet_at.is_some_and(|at| now >= at) {
                self.spawn_comet();
                self.next_comet_at = Some(now + self.roll_comet_interval());
            }

            if self.next_shard_at.is_none() {
                self.next_shard_at = Some(now + self.roll_shard_interval());
            }
            if self.next_shard_at.is_some_and(|at| now >= at) {
                self.spawn_shard();
                self.next_shard_at = Some(now + self.roll_shard_interval());
            }
        }

        let dt = dt_ms / NOMINAL_FRAME_MS;
        let bounds = self.size;
        self.comets.retain_mut(|c| c.advance(dt, bounds));
        self.shards.retain_mut(|s| s.advance(dt, dt_ms, bounds));
    }

    /// Launch a comet unless the population cap is reached
    pub fn spawn_comet(&mut self) -> bool {
        if self.comets.len() >= self.cfg.comet_max {
            return false;
        }
        let scale = self.cfg.effect_speed_scale(self.profile);
        let comet = Comet::spawn(&mut self.rng, &self.cfg, self.size, scale);
        self.comets.push(comet);
        true
    }

    /// Launch a shard unless capped or motion is reduced
    pub fn spawn_shard(&mut self) -> bool {
        if !self.profile.effects_enabled() || self.shards.len() >= self.cfg.shard_max {
            return false;
        }
        let scale = self.cfg.effect_speed_scale(self.profile);
        let shard = Shard::spawn(&mut self.rng, &self.cfg, self.size, scale);
        self.shards.push(shard);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::field::config::{FieldConfig, MotionProfile};
    use crate::field::state::ParticleField;

    fn field(profile: MotionProfile) -> ParticleField {
        let mut f = ParticleField::new(FieldConfig::default(), profile, 9);
        f.resize(1600.0, 900.0, 1.0);
        f
    }

    #[test]
    fn test_speed_stays_bounded_without_pointer() {
        let mut f = field(MotionProfile::Standard);
        let mut t = 0.0;
        for _ in 0..10_000 {
            t += 1000.0 / 60.0;
            f.update(t);
        }
        for p in f.particles() {
            assert!(p.vel.length() < 0.5, "runaway speed {}", p.vel.length());
        }
    }

    #[test]
    fn test_speed_bounded_under_constant_pointer() {
        let mut f = field(MotionProfile::Standard);
        f.set_pointer(800.0, 450.0);
        let mut t = 0.0;
        for _ in 0..5_000 {
            t += 1000.0 / 60.0;
            f.update(t);
        }
        // Terminal speed under max force 0.06 with 0.99 damping is ~6
        for p in f.particles() {
            assert!(p.vel.length() < 7.0);
        }
    }

    #[test]
    fn test_positions_stay_in_padded_bounds() {
        let mut f = field(MotionProfile::Standard);
        f.set_pointer(100.0, 100.0);
        let pad = f.config().wrap_pad;
        let size = f.size();
        for i in 0..2_000 {
            f.update(i as f64 * 16.0);
            for p in f.particles() {
                assert!(p.pos.x >= -pad && p.pos.x <= size.x + pad);
                assert!(p.pos.y >= -pad && p.pos.y <= size.y + pad);
            }
        }
    }

    #[test]
    fn test_effect_caps_hold() {
        let mut f = field(MotionProfile::Standard);
        for _ in 0..10 {
            f.spawn_comet();
        }
        for _ in 0..40 {
            f.spawn_shard();
        }
        assert_eq!(f.comets().len(), 3);
        assert_eq!(f.shards().len(), 18);
        assert!(!f.spawn_shard());
    }

    #[test]
    fn test_reduced_motion_spawns_nothing() {
        let mut f = field(MotionProfile::Reduced);
        assert!(!f.spawn_shard());
        for i in 0..3_000 {
            f.update(i as f64 * 16.0);
        }
        assert!(f.comets().is_empty());
        assert!(f.shards().is_empty());
    }

    #[test]
    fn test_effects_spawn_and_expire() {
        let mut f = field(MotionProfile::Standard);
        let mut t = 0.0;
        let mut saw_comet = false;
        let mut saw_shard = false;
        for _ in 0..2_000 {
            t += 16.0;
            f.update(t);
            saw_comet |= !f.comets().is_empty();
            saw_shard |= !f.shards().is_empty();
            assert!(f.comets().len() <= 3);
            assert!(f.shards().len() <= 18);
        }
        assert!(saw_comet && saw_shard);

        // Stop spawning and let everything run out
        f.next_comet_at = Some(f64::MAX);
        f.next_shard_at = Some(f64::MAX);
        for _ in 0..2_000 {
            t += 16.0;
            f.update(t);
        }
        assert!(f.comets().is_empty());
        assert!(f.shards().is_empty());
    }

    #[test]
    fn test_resume_does_not_burst() {
        let mut f = field(MotionProfile::Standard);
        f.resume(0.0);
        f.update(16.0);
        f.pause();
        // A minute in a background tab
        f.resume(60_000.0);
        f.update(60_016.0);
        assert!(f.comets().len() <= 1);
        assert!(f.shards().len() <= 1);
        assert!(f.next_comet_at.is_some_and(|at| at >= 60_000.0 + 1600.0));
    }

    #[test]
    fn test_inverted_overrides_fall_back_to_minimum() {
        let cfg = FieldConfig::from_json(r#"{"comet_speed_min": 5.0}"#).unwrap();
        let mut f = ParticleField::new(cfg, MotionProfile::Standard, 9);
        f.resize(1600.0, 900.0, 1.0);
        assert!(f.spawn_comet());
        // The leading axis always carries the full speed
        assert!(f.comets()[0].vel.length() >= 5.0 - 1e-4);

        let cfg = FieldConfig::from_json(r#"{"shard_life_min": 20000, "shard_speed_min": 1.0}"#).unwrap();
        let mut f = ParticleField::new(cfg, MotionProfile::Standard, 9);
        f.resize(1600.0, 900.0, 1.0);
        assert!(f.spawn_shard());
        assert_eq!(f.shards()[0].max_life, 20_000.0);
        assert!((f.shards()[0].vel.length() - 1.0).abs() < 1e-4);
    }
}
