//! Drifting point particles

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::config::FieldConfig;

/// A single background particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Per-particle brightness factor (0.2 - 0.8)
    pub alpha: f32,
    /// Oscillation phase driving the organic drift
    pub phase: f32,
    pub phase_speed: f32,
}

impl Particle {
    /// Random particle somewhere inside `bounds`
    pub fn spawn<R: Rng>(rng: &mut R, cfg: &FieldConfig, bounds: Vec2) -> Self {
        let pos = Vec2::new(
            rng.random::<f32>() * bounds.x,
            rng.random::<f32>() * bounds.y,
        );
        Self::spawn_at(rng, cfg, pos)
    }

    pub fn spawn_at<R: Rng>(rng: &mut R, cfg: &FieldConfig, pos: Vec2) -> Self {
        let heading = rng.random::<f32>() * TAU;
        let speed = cfg.speed * (0.3 + rng.random::<f32>() * 0.7);
        Self {
            pos,
            vel: Vec2::from_angle(heading) * speed,
            size: cfg.min_size + rng.random::<f32>() * (cfg.max_size - cfg.min_size),
            alpha: 0.2 + rng.random::<f32>() * 0.6,
            phase: rng.random::<f32>() * TAU,
            phase_speed: 0.002 + rng.random::<f32>() * 0.003,
        }
    }

    /// Advance one tick: drift, pointer pull, damping, integrate, wrap.
    ///
    /// `pointer` is `Some((position, radius))` while the pointer is active.
    pub fn step(&mut self, cfg: &FieldConfig, pointer: Option<(Vec2, f32)>, bounds: Vec2) {
        self.phase += self.phase_speed;
        self.vel.x += self.phase.sin() * cfg.drift;
        self.vel.y += (self.phase * 1.3).cos() * cfg.drift;

        if let Some((target, radius)) = pointer {
            let delta = target - self.pos;
            let dist = delta.length();
            if dist < radius && dist > 1.0 {
                let force = cfg.pointer_force * (1.0 - dist / radius);
                self.vel += delta / dist * force;
            }
        }

        self.vel *= cfg.damping;
        self.pos += self.vel;
        self.pos = wrap_position(self.pos, bounds, cfg.wrap_pad);
    }
}

/// Toroidal wrap with `pad` slack on every edge
pub fn wrap_position(pos: Vec2, bounds: Vec2, pad: f32) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, bounds.x, pad), wrap_axis(pos.y, bounds.y, pad))
}

fn wrap_axis(v: f32, extent: f32, pad: f32) -> f32 {
    if v < -pad {
        extent + pad
    } else if v > extent + pad {
        -pad
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_ranges() {
        let cfg = FieldConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, &cfg, Vec2::new(800.0, 600.0));
            assert!(p.pos.x >= 0.0 && p.pos.x <= 800.0);
            assert!(p.size >= cfg.min_size && p.size <= cfg.max_size);
            let speed = p.vel.length();
            assert!(speed >= cfg.speed * 0.3 - 1e-4 && speed <= cfg.speed + 1e-4);
            assert!(p.alpha >= 0.2 && p.alpha <= 0.8);
        }
    }

    #[test]
    fn test_wrap_right_edge_reappears_left() {
        let bounds = Vec2::new(100.0, 100.0);
        assert_eq!(wrap_position(Vec2::new(120.5, 50.0), bounds, 20.0), Vec2::new(-20.0, 50.0));
        assert_eq!(wrap_position(Vec2::new(50.0, -20.5), bounds, 20.0), Vec2::new(50.0, 120.0));
        // Inside the slack band nothing moves
        assert_eq!(wrap_position(Vec2::new(-19.0, 119.0), bounds, 20.0), Vec2::new(-19.0, 119.0));
    }

    #[test]
    fn test_step_wraps_preserving_velocity() {
        let cfg = FieldConfig {
            drift: 0.0,
            ..Default::default()
        };
        let mut p = Particle {
            pos: Vec2::new(119.0, 50.0),
            vel: Vec2::new(5.0, 0.0),
            size: 1.0,
            alpha: 0.5,
            phase: 0.0,
            phase_speed: 0.0,
        };
        p.step(&cfg, None, Vec2::new(100.0, 100.0));
        assert_eq!(p.pos.x, -20.0);
        assert!((p.vel.x - 4.95).abs() < 1e-5);
    }

    #[test]
    fn test_pointer_attracts() {
        let cfg = FieldConfig {
            drift: 0.0,
            ..Default::default()
        };
        let mut p = Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            size: 1.0,
            alpha: 0.5,
            phase: 0.0,
            phase_speed: 0.0,
        };
        p.step(&cfg, Some((Vec2::new(200.0, 100.0), 200.0)), Vec2::new(1000.0, 1000.0));
        // force = 0.06 * (1 - 100/200) = 0.03, then damped
        assert!((p.vel.x - 0.03 * 0.99).abs() < 1e-6);
        assert_eq!(p.vel.y, 0.0);

        // Outside the radius the pointer has no pull
        let mut far = p.clone();
        far.vel = Vec2::ZERO;
        far.step(&cfg, Some((Vec2::new(900.0, 100.0), 200.0)), Vec2::new(1000.0, 1000.0));
        assert_eq!(far.vel, Vec2::ZERO);
    }
}
