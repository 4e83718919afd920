//! Field rendering: links, effects, pointer glow, particles

use glam::Vec2;

use super::state::ParticleField;
use super::surface::Surface;

/// Glow below this opacity is not drawn
const GLOW_CUTOFF: f32 = 0.005;

impl ParticleField {
    /// Draw the current frame. Also eases the pointer glow one step.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        surface.clear(self.size);

        let radius = self.cfg.pointer_radius_for(self.profile);
        self.draw_links(surface, radius);
        self.draw_effects(surface);
        self.draw_glow(surface, radius);
        self.draw_particles(surface, radius);
    }

    fn draw_links(&self, surface: &mut dyn Surface, radius: f32) {
        let link_dist = self.cfg.link_dist_for(self.profile);
        let pointer_line_dist = self.cfg.pointer_line_dist_for(self.profile);
        let link_dist2 = link_dist * link_dist;
        let pointer_dist2 = pointer_line_dist * pointer_line_dist;
        let pointer = self.pointer.active.then_some(self.pointer.pos);

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let d2 = a.pos.distance_squared(b.pos);
                if d2 > link_dist2 {
                    continue;
                }
                let dist = d2.sqrt();
                let mut alpha = self.cfg.line_alpha * (1.0 - dist / link_dist);

                if let Some(m) = pointer {
                    let md = ((a.pos + b.pos) * 0.5).distance(m);
                    if md < radius {
                        alpha += self.cfg.pointer_line_alpha * (1.0 - md / radius);
                    }
                }

                surface.stroke_line(a.pos, b.pos, self.color.with_alpha(alpha), self.cfg.link_width);
            }

            if let Some(m) = pointer {
                let d2 = a.pos.distance_squared(m);
                if d2 < pointer_dist2 {
                    let alpha = self.cfg.pointer_line_alpha * (1.0 - d2.sqrt() / pointer_line_dist);
                    surface.stroke_line(a.pos, m, self.color.with_alpha(alpha), self.cfg.link_width);
                }
            }
        }
    }

    fn draw_effects(&self, surface: &mut dyn Surface) {
        let c = self.color;

        for comet in &self.comets {
            for (a, b, t) in comet.tail.segments() {
                surface.stroke_line(a, b, c.with_alpha(0.34 * t), 0.8 + t * 3.1);
            }
            let stops = [
                (0.0, c.with_alpha(0.95)),
                (0.35, c.with_alpha(0.45)),
                (1.0, c.with_alpha(0.0)),
            ];
            surface.fill_radial(comet.pos, self.cfg.comet_head_size, &stops);
        }

        for shard in &self.shards {
            let life = shard.vitality();
            if life <= 0.0 {
                continue;
            }
            let alpha = (0.75 * life).min(1.0);
            for (a, b, t) in shard.tail.segments() {
                surface.stroke_line(a, b, c.with_alpha(0.22 * t * alpha), 0.5 + t * 1.4);
            }
            let stops = [
                (0.0, c.with_alpha(0.9 * alpha)),
                (0.55, c.with_alpha(0.38 * alpha)),
                (1.0, c.with_alpha(0.0)),
            ];
            surface.fill_radial(shard.pos, (shard.size * 2.8).max(2.0), &stops);
        }
    }

    fn draw_glow(&mut self, surface: &mut dyn Surface, radius: f32) {
        let target = if self.pointer.active && self.cfg.pointer_glow && !self.gate.is_suppressed() {
            1.0
        } else {
            0.0
        };
        self.glow += (target - self.glow) * self.cfg.glow_ease;

        if self.glow > GLOW_CUTOFF {
            let stops = [
                (0.0, self.color.with_alpha(0.06 * self.glow)),
                (1.0, self.color.with_alpha(0.0)),
            ];
            surface.fill_radial(self.pointer.pos, radius * 0.6, &stops);
        }
    }

    fn draw_particles(&self, surface: &mut dyn Surface, radius: f32) {
        for p in &self.particles {
            let alpha = brightness(
                self.cfg.particle_alpha * p.alpha,
                p.pos,
                self.pointer.active.then_some(self.pointer.pos),
                radius,
            );
            let stops = [
                (0.0, self.color.with_alpha(alpha)),
                (0.4, self.color.with_alpha(alpha * 0.4)),
                (1.0, self.color.with_alpha(0.0)),
            ];
            surface.fill_radial(p.pos, p.size * 3.0, &stops);
            surface.fill_circle(p.pos, p.size, self.color.with_alpha(alpha));
        }
    }
}

/// Boost alpha up to 2.5x near the pointer, capped at 1
fn brightness(alpha: f32, pos: Vec2, pointer: Option<Vec2>, radius: f32) -> f32 {
    match pointer {
        Some(m) => {
            let dist = pos.distance(m);
            if dist < radius {
                (alpha * (1.0 + 1.5 * (1.0 - dist / radius))).min(1.0)
            } else {
                alpha
            }
        }
        None => alpha,
    }
}
