//! Comets and shards: short-lived streaks layered over the particle field

use glam::Vec2;
use rand::Rng;
use std::collections::VecDeque;

use super::config::FieldConfig;

/// Off-screen margin past which a comet is culled
pub const COMET_MARGIN: f32 = 140.0;
/// Off-screen margin past which a shard is culled
pub const SHARD_MARGIN: f32 = 90.0;
/// Frame time the normalised delta is measured against (60 Hz)
pub const NOMINAL_FRAME_MS: f32 = 16.67;

/// Bounded position history, oldest first
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vec2>,
    cap: usize,
}

impl Trail {
    pub fn new(cap: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(cap.min(256)),
            cap,
        }
    }

    /// Append the newest point, evicting the oldest past capacity
    pub fn push(&mut self, p: Vec2) {
        self.points.push_back(p);
        while self.points.len() > self.cap {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive segments from tail to head with their position `t` in (0, 1]
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2, f32)> + '_ {
        let n = self.points.len() as f32;
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .enumerate()
            .map(move |(i, (a, b))| (*a, *b, (i + 1) as f32 / n))
    }
}

/// Screen-crossing streak; life counts normalised frame ticks
#[derive(Debug, Clone)]
pub struct Comet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub tail: Trail,
}

/// Slow streak drifting toward an interior point; life counts milliseconds
#[derive(Debug, Clone)]
pub struct Shard {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub tail: Trail,
}

impl Comet {
    /// Enter from the left, right or top edge heading across the screen
    pub fn spawn<R: Rng>(rng: &mut R, cfg: &FieldConfig, bounds: Vec2, speed_scale: f32) -> Self {
        let speed = sample(rng, cfg.comet_speed_min, cfg.comet_speed_max) * speed_scale;
        let side: f32 = rng.random();
        let (pos, vel) = if side < 0.34 {
            let y = rng.random::<f32>() * bounds.y * 0.65;
            let vy = rng.random_range(-0.25..=0.65) * speed;
            (Vec2::new(-60.0, y), Vec2::new(speed, vy))
        } else if side < 0.68 {
            let y = rng.random::<f32>() * bounds.y * 0.65;
            let vy = rng.random_range(-0.25..=0.65) * speed;
            (Vec2::new(bounds.x + 60.0, y), Vec2::new(-speed, vy))
        } else {
            let x = rng.random::<f32>() * bounds.x;
            let vx = rng.random_range(-0.55..=0.55) * speed;
            (Vec2::new(x, -60.0), Vec2::new(vx, speed))
        };

        // Enough ticks to cross the longer screen side
        let life = ((bounds.x.max(bounds.y) + 180.0) / vel.length().max(0.2)).floor();
        Self {
            pos,
            vel,
            life,
            max_life: life,
            tail: Trail::new(cfg.comet_tail),
        }
    }

    /// Advance by `dt` normalised ticks; returns `false` once it should be culled
    pub fn advance(&mut self, dt: f32, bounds: Vec2) -> bool {
        self.pos += self.vel * dt;
        self.tail.push(self.pos);
        self.life -= dt;
        self.life > 0.0 && within_margin(self.pos, bounds, COMET_MARGIN)
    }
}

impl Shard {
    /// Enter from any edge heading for a point in the middle 60% of the screen
    pub fn spawn<R: Rng>(rng: &mut R, cfg: &FieldConfig, bounds: Vec2, speed_scale: f32) -> Self {
        let side: f32 = rng.random();
        let pos = if side < 0.25 {
            Vec2::new(-20.0, rng.random::<f32>() * bounds.y)
        } else if side < 0.5 {
            Vec2::new(bounds.x + 20.0, rng.random::<f32>() * bounds.y)
        } else if side < 0.75 {
            Vec2::new(rng.random::<f32>() * bounds.x, -20.0)
        } else {
            Vec2::new(rng.random::<f32>() * bounds.x, bounds.y + 20.0)
        };

        let target = Vec2::new(
            lerp(bounds.x * 0.2, bounds.x * 0.8, rng.random()),
            lerp(bounds.y * 0.2, bounds.y * 0.8, rng.random()),
        );
        let delta = target - pos;
        let dist = delta.length().max(1.0);
        let speed = sample(rng, cfg.shard_speed_min, cfg.shard_speed_max) * speed_scale;
        let max_life = sample(rng, cfg.shard_life_min, cfg.shard_life_max);

        Self {
            pos,
            vel: delta / dist * speed,
            life: max_life,
            max_life,
            size: rng.random_range(0.9..=1.9),
            tail: Trail::new(cfg.shard_tail),
        }
    }

    /// Advance by `dt` ticks and `dt_ms` of wall clock; returns `false` once culled
    pub fn advance(&mut self, dt: f32, dt_ms: f32, bounds: Vec2) -> bool {
        self.pos += self.vel * dt;
        self.tail.push(self.pos);
        self.life -= dt_ms;
        self.life > 0.0 && within_margin(self.pos, bounds, SHARD_MARGIN)
    }

    /// Remaining life as a fraction in [0, 1]
    pub fn vitality(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

fn within_margin(pos: Vec2, bounds: Vec2, margin: f32) -> bool {
    pos.x >= -margin && pos.x <= bounds.x + margin && pos.y >= -margin && pos.y <= bounds.y + margin
}

/// Uniform in `[min, max]`, or `min` when an override inverts the range
fn sample<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_trail_evicts_oldest() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.push(Vec2::splat(i as f32));
        }
        assert_eq!(trail.len(), 3);
        let segs: Vec<_> = trail.segments().collect();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].0, Vec2::splat(2.0));
        assert_eq!(segs[1].1, Vec2::splat(4.0));
        // Head segment is fully opaque
        assert!((segs[1].2 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_comet_starts_off_screen_and_crosses() {
        let cfg = FieldConfig::default();
        let bounds = Vec2::new(1280.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            let mut comet = Comet::spawn(&mut rng, &cfg, bounds, 1.0);
            assert!(comet.pos.x < 0.0 || comet.pos.x > bounds.x || comet.pos.y < 0.0);
            assert!(comet.life > 0.0);
            let mut ticks = 0;
            while comet.advance(1.0, bounds) {
                ticks += 1;
                assert!(comet.tail.len() <= cfg.comet_tail);
            }
            assert!(ticks as f32 <= comet.max_life);
        }
    }

    #[test]
    fn test_shard_heads_inward_and_expires() {
        let cfg = FieldConfig::default();
        let bounds = Vec2::new(1000.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut shard = Shard::spawn(&mut rng, &cfg, bounds, 1.0);
        let center = bounds / 2.0;
        let before = (shard.pos - center).length();
        shard.advance(10.0, 160.0, bounds);
        assert!((shard.pos - center).length() < before);

        let mut elapsed = 0.0;
        while shard.advance(1.0, 16.0, bounds) {
            elapsed += 16.0;
            assert!(shard.tail.len() <= cfg.shard_tail);
        }
        assert!(elapsed <= shard.max_life);
        assert_eq!(shard.vitality(), 0.0);
    }
}
