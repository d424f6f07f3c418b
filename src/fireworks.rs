//! Particle-based fireworks shown when a todo is completed. The animation is
//! stepped on a fixed tick, spawns a few staggered explosions, and burns out
//! after a bounded number of frames.

use egui::{Color32, Painter, Pos2, Rect, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(50);
const MAX_FRAMES: u32 = 80;
const SPAWN_EVERY: u32 = 15;
const LAST_SPAWN_FRAME: u32 = 45;

const PALETTE: [Color32; 8] = [
    Color32::from_rgb(255, 99, 71),
    Color32::from_rgb(255, 215, 0),
    Color32::from_rgb(64, 224, 208),
    Color32::from_rgb(255, 105, 180),
    Color32::from_rgb(135, 206, 250),
    Color32::from_rgb(152, 251, 152),
    Color32::from_rgb(238, 130, 238),
    Color32::from_rgb(255, 165, 0),
];

/// The shapes an explosion can scatter its particles in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionKind {
    Burst,
    Fountain,
    Spiral,
    Heart,
    Star,
}

const KINDS: [ExplosionKind; 5] = [
    ExplosionKind::Burst,
    ExplosionKind::Fountain,
    ExplosionKind::Spiral,
    ExplosionKind::Heart,
    ExplosionKind::Star,
];

struct Particle {
    pos: Pos2,
    vel: Vec2,
    life: u32,
    max_life: u32,
    size: f32,
    color: Color32,
    gravity: f32,
    drag: f32,
}

pub struct Fireworks {
    particles: Vec<Particle>,
    rng: SmallRng,
    frame: u32,
    width: f32,
    height: f32,
    last_tick: Instant,
}

impl Fireworks {
    /// Starts a show sized to the canvas it will be painted on.
    pub fn new(width: f32, height: f32) -> Self {
        let mut show = Fireworks {
            particles: Vec::new(),
            rng: SmallRng::from_entropy(),
            frame: 0,
            width,
            height,
            last_tick: Instant::now(),
        };
        show.spawn_random_explosion();
        show
    }

    /// Advances the animation when the tick interval has elapsed. Call once
    /// per UI frame.
    pub fn update(&mut self) {
        if self.last_tick.elapsed() >= FRAME_INTERVAL {
            self.step();
            self.last_tick = Instant::now();
        }
    }

    pub fn finished(&self) -> bool {
        self.frame >= MAX_FRAMES || self.particles.is_empty()
    }

    /// Draws every live particle into `rect`, fading it out over its lifetime.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let painter = painter.with_clip_rect(rect);
        for p in &self.particles {
            let fade = p.life as f32 / p.max_life as f32;
            let color = Color32::from_rgba_unmultiplied(
                p.color.r(),
                p.color.g(),
                p.color.b(),
                (fade * 255.0) as u8,
            );
            let pos = rect.min + p.pos.to_vec2();
            painter.circle_filled(pos, p.size * (0.4 + 0.6 * fade), color);
        }
    }

    pub fn add_explosion(&mut self, x: f32, y: f32, kind: ExplosionKind) {
        let count = 30 + self.rng.gen_range(0..40);
        let speed = 4.0 + self.rng.gen_range(0.0..4.0);
        let life = 20 + self.rng.gen_range(0..15);

        for i in 0..count {
            let vel = self.initial_velocity(kind, i, count, speed);
            let color = PALETTE[self.rng.gen_range(0..PALETTE.len())];
            let gravity = match kind {
                ExplosionKind::Fountain => 0.3,
                _ => 0.18,
            };
            self.particles.push(Particle {
                pos: Pos2::new(x, y),
                vel,
                life,
                max_life: life,
                size: self.rng.gen_range(1.5..3.5),
                color,
                gravity,
                drag: 0.98,
            });
        }
    }

    fn spawn_random_explosion(&mut self) {
        let x = self.rng.gen_range(0.2..0.8) * self.width;
        let y = self.rng.gen_range(0.15..0.6) * self.height;
        let kind = KINDS[self.rng.gen_range(0..KINDS.len())];
        self.add_explosion(x, y, kind);
    }

    fn step(&mut self) {
        self.frame += 1;
        if self.frame % SPAWN_EVERY == 0 && self.frame <= LAST_SPAWN_FRAME {
            self.spawn_random_explosion();
        }

        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            p.vel.y += p.gravity;
            p.vel *= p.drag;
            p.pos += p.vel;
            p.life = p.life.saturating_sub(1);
        }
        self.particles
            .retain(|p| p.life > 0 && p.pos.y < height + 20.0 && p.pos.x > -20.0 && p.pos.x < width + 20.0);
    }

    fn initial_velocity(&mut self, kind: ExplosionKind, i: u32, count: u32, speed: f32) -> Vec2 {
        let t = i as f32 / count as f32;
        match kind {
            ExplosionKind::Burst => {
                let angle = self.rng.gen_range(0.0..2.0 * PI);
                let s = speed * (0.5 + self.rng.gen_range(0.0..0.5));
                Vec2::new(angle.cos() * s, angle.sin() * s)
            }
            ExplosionKind::Fountain => {
                // Upwards in a narrow cone, gravity pulls it back down.
                let angle = -PI / 2.0 + (self.rng.gen_range(0.0..1.0) - 0.5) * PI / 3.0;
                let s = speed * (0.7 + self.rng.gen_range(0.0..0.6));
                Vec2::new(angle.cos() * s, angle.sin() * s)
            }
            ExplosionKind::Spiral => {
                let angle = t * 4.0 * PI;
                let s = speed * (0.3 + 0.7 * t);
                Vec2::new(angle.cos() * s, angle.sin() * s)
            }
            ExplosionKind::Heart => {
                // Classic heart curve, flipped for screen coordinates.
                let a = t * 2.0 * PI;
                let hx = 16.0 * a.sin().powi(3);
                let hy = 13.0 * a.cos()
                    - 5.0 * (2.0 * a).cos()
                    - 2.0 * (3.0 * a).cos()
                    - (4.0 * a).cos();
                Vec2::new(hx / 16.0 * speed * 0.6, -hy / 16.0 * speed * 0.6)
            }
            ExplosionKind::Star => {
                // Ten spokes with alternating reach trace a five-pointed rim.
                let spoke = i % 10;
                let angle = spoke as f32 / 10.0 * 2.0 * PI - PI / 2.0;
                let s = speed * if spoke % 2 == 0 { 1.0 } else { 0.45 };
                Vec2::new(angle.cos() * s, angle.sin() * s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explosions_spawn_a_bounded_particle_count() {
        let mut show = Fireworks::new(400.0, 240.0);
        let initial = show.particles.len();
        assert!((30..70).contains(&initial), "initial count {initial}");

        show.add_explosion(200.0, 100.0, ExplosionKind::Burst);
        assert!(show.particles.len() > initial);
        for p in &show.particles {
            assert!(p.life >= 20 && p.life < 35);
            assert_eq!(p.life, p.max_life);
        }
    }

    #[test]
    fn stepping_moves_particles_and_ages_them() {
        let mut show = Fireworks::new(400.0, 240.0);
        let before: Vec<(Pos2, u32)> = show.particles.iter().map(|p| (p.pos, p.life)).collect();

        show.step();
        for (p, (pos, life)) in show.particles.iter().zip(before) {
            assert!(p.life < life);
            assert!(p.pos != pos || p.vel == Vec2::ZERO);
        }
    }

    #[test]
    fn the_show_burns_out() {
        let mut show = Fireworks::new(400.0, 240.0);
        for _ in 0..MAX_FRAMES {
            show.step();
        }
        assert!(show.finished());
    }

    #[test]
    fn fountain_particles_start_upwards() {
        let mut show = Fireworks::new(400.0, 240.0);
        show.particles.clear();
        show.add_explosion(200.0, 200.0, ExplosionKind::Fountain);
        assert!(show.particles.iter().all(|p| p.vel.y < 0.0));
    }
}
