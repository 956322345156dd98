//! Particle collection and per-frame update

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{PALETTE, Particle, ParticleKind};
use crate::consts::*;
use crate::renderer::{GlowCircle, Surface};

/// Owns every live particle and the RNG that spawns them
#[derive(Debug, Clone)]
pub struct ParticleEngine {
    particles: Vec<Particle>,
    bounds: Vec2,
    rng: Pcg32,
}

impl ParticleEngine {
    /// Create an engine for a `width` x `height` canvas, pre-filled with the
    /// ambient floor
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut engine = Self {
            particles: Vec::with_capacity(AMBIENT_FLOOR * 2),
            bounds: Vec2::new(width.max(0.0), height.max(0.0)),
            rng: Pcg32::seed_from_u64(seed),
        };
        engine.replenish_ambient();
        engine
    }

    /// Follow the canvas size. Existing particles keep their positions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn center(&self) -> Vec2 {
        self.bounds / 2.0
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn ambient_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_ambient()).count()
    }

    pub fn burst_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_burst()).count()
    }

    pub fn confetti_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_confetti()).count()
    }

    /// Advance every particle one frame, drop the dead ones and top the
    /// ambient population back up to the floor
    pub fn tick(&mut self) {
        let bounds = self.bounds;
        for particle in self.particles.iter_mut() {
            particle.step(bounds, BURST_GRAVITY);
        }
        self.particles.retain(Particle::is_alive);
        self.replenish_ambient();
    }

    /// Clear the surface and draw every particle in collection order
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for particle in &self.particles {
            surface.fill_glow_circle(GlowCircle {
                center: particle.pos,
                radius: particle.radius,
                color: particle.color,
                opacity: particle.opacity,
                blur: GLOW_BLUR,
            });
        }
    }

    /// Radial spray of burst particles from `origin`
    pub fn burst(&mut self, origin: Vec2) {
        for i in 0..BURST_PARTICLES {
            let angle = TAU * i as f32 / BURST_PARTICLES as f32;
            let speed = self.rng.random_range(3.0..8.0_f32);
            let particle = Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius: self.rng.random_range(2.0..6.0_f32),
                opacity: 1.0,
                color: self.random_color(),
                life: BURST_LIFE,
                kind: ParticleKind::Burst,
            };
            self.particles.push(particle);
        }
    }

    /// Point within `spread` of the canvas centre on each axis
    pub fn near_center(&mut self, spread: f32) -> Vec2 {
        let offset = Vec2::new(
            (self.rng.random::<f32>() - 0.5) * 2.0 * spread,
            (self.rng.random::<f32>() - 0.5) * 2.0 * spread,
        );
        self.center() + offset
    }

    /// Independent spawn delays (ms) for a confetti rain of `count` pieces
    pub fn confetti_delays(&mut self, count: usize) -> Vec<f64> {
        (0..count)
            .map(|_| self.rng.random::<f64>() * CONFETTI_MAX_DELAY_MS)
            .collect()
    }

    /// Drop one confetti piece in from a random point along the top edge
    pub fn spawn_confetti(&mut self) {
        let particle = Particle {
            pos: Vec2::new(self.rng.random::<f32>() * self.bounds.x, CONFETTI_SPAWN_Y),
            vel: Vec2::new(
                self.rng.random_range(-2.0..2.0_f32),
                self.rng.random_range(2.0..5.0_f32),
            ),
            radius: self.rng.random_range(2.0..8.0_f32),
            opacity: 1.0,
            color: self.random_color(),
            life: CONFETTI_LIFE,
            kind: ParticleKind::Confetti {
                rotation: self.rng.random_range(0.0..360.0_f32),
                rotation_speed: self.rng.random_range(-5.0..5.0_f32),
            },
        };
        self.particles.push(particle);
    }

    /// Drop everything (teardown)
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn replenish_ambient(&mut self) {
        let missing = AMBIENT_FLOOR.saturating_sub(self.ambient_count());
        for _ in 0..missing {
            let particle = self.random_ambient();
            self.particles.push(particle);
        }
    }

    fn random_ambient(&mut self) -> Particle {
        Particle {
            pos: Vec2::new(
                self.rng.random::<f32>() * self.bounds.x,
                self.rng.random::<f32>() * self.bounds.y,
            ),
            vel: Vec2::new(
                self.rng.random_range(-0.25..0.25_f32),
                self.rng.random_range(-0.25..0.25_f32),
            ),
            radius: self.rng.random_range(1.0..3.0_f32),
            opacity: self.rng.random_range(0.2..0.7_f32),
            color: self.random_color(),
            life: self.rng.random_range(100..300),
            kind: ParticleKind::Ambient,
        }
    }

    fn random_color(&mut self) -> &'static str {
        PALETTE[self.rng.random_range(0..PALETTE.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records draw calls
    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        circles: Vec<(Vec2, f32, String, f32, f64)>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.clears += 1;
            self.circles.clear();
        }

        fn fill_glow_circle(&mut self, c: GlowCircle<'_>) {
            self.circles
                .push((c.center, c.radius, c.color.to_string(), c.opacity, c.blur));
        }
    }

    #[test]
    fn test_new_engine_starts_at_ambient_floor() {
        let engine = ParticleEngine::new(800.0, 600.0, 7);
        assert_eq!(engine.len(), AMBIENT_FLOOR);
        assert_eq!(engine.ambient_count(), AMBIENT_FLOOR);
        for p in engine.particles() {
            assert!(p.pos.x >= 0.0 && p.pos.x <= 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 600.0);
            assert!((100..300).contains(&p.life));
            assert!(PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn test_ambient_floor_survives_every_tick() {
        let mut engine = ParticleEngine::new(320.0, 240.0, 42);
        // Long enough for every initial ambient particle to expire
        for _ in 0..700 {
            engine.tick();
            assert!(engine.ambient_count() >= AMBIENT_FLOOR);
        }
    }

    #[test]
    fn test_ambient_floor_after_mass_expiry() {
        let mut engine = ParticleEngine::new(320.0, 240.0, 3);
        for p in engine.particles.iter_mut() {
            p.life = 1;
        }
        engine.tick();
        assert_eq!(engine.ambient_count(), AMBIENT_FLOOR);
    }

    #[test]
    fn test_burst_spawns_fifteen_at_origin() {
        let mut engine = ParticleEngine::new(800.0, 600.0, 1);
        let origin = Vec2::new(120.0, 80.0);
        engine.burst(origin);

        let bursts: Vec<_> = engine.particles().iter().filter(|p| p.is_burst()).collect();
        assert_eq!(bursts.len(), BURST_PARTICLES);
        for (i, p) in bursts.iter().enumerate() {
            assert_eq!(p.pos, origin);
            assert_eq!(p.opacity, 1.0);
            assert_eq!(p.life, BURST_LIFE);
            let speed = p.vel.length();
            assert!((3.0..8.0 + 1e-3).contains(&speed), "speed {speed}");
            // Equal angular spacing
            let expected = TAU * i as f32 / BURST_PARTICLES as f32;
            let actual = p.vel.y.atan2(p.vel.x).rem_euclid(TAU);
            let diff = (actual - expected).abs();
            assert!(diff < 1e-3 || (TAU - diff) < 1e-3);
        }
    }

    #[test]
    fn test_burst_removed_on_sixtieth_tick() {
        let mut engine = ParticleEngine::new(800.0, 600.0, 9);
        engine.burst(Vec2::new(400.0, 300.0));

        for _ in 0..59 {
            engine.tick();
        }
        assert_eq!(engine.burst_count(), BURST_PARTICLES);
        for p in engine.particles().iter().filter(|p| p.is_burst()) {
            assert_eq!(p.life, 1);
            assert!((p.opacity - 1.0 / 60.0).abs() < 1e-6);
        }

        engine.tick();
        assert_eq!(engine.burst_count(), 0);
        // Bursts are never replenished
        engine.tick();
        assert_eq!(engine.burst_count(), 0);
    }

    #[test]
    fn test_confetti_spawn_and_lifetime() {
        let mut engine = ParticleEngine::new(500.0, 400.0, 11);
        engine.spawn_confetti();
        let piece = engine
            .particles()
            .iter()
            .find(|p| p.is_confetti())
            .cloned()
            .expect("confetti spawned");
        assert_eq!(piece.pos.y, CONFETTI_SPAWN_Y);
        assert!(piece.pos.x >= 0.0 && piece.pos.x <= 500.0);
        assert_eq!(piece.life, CONFETTI_LIFE);
        assert!(piece.vel.y >= 2.0);

        for _ in 0..CONFETTI_LIFE - 1 {
            engine.tick();
        }
        assert_eq!(engine.confetti_count(), 1);
        engine.tick();
        assert_eq!(engine.confetti_count(), 0);
    }

    #[test]
    fn test_confetti_delays_in_range() {
        let mut engine = ParticleEngine::new(100.0, 100.0, 5);
        let delays = engine.confetti_delays(CELEBRATION_CONFETTI);
        assert_eq!(delays.len(), CELEBRATION_CONFETTI);
        assert!(delays.iter().all(|d| (0.0..CONFETTI_MAX_DELAY_MS).contains(d)));
    }

    #[test]
    fn test_near_center_stays_in_spread() {
        let mut engine = ParticleEngine::new(1000.0, 800.0, 21);
        for _ in 0..100 {
            let p = engine.near_center(CELEBRATION_SPREAD);
            assert!((p.x - 500.0).abs() <= CELEBRATION_SPREAD);
            assert!((p.y - 400.0).abs() <= CELEBRATION_SPREAD);
        }
    }

    #[test]
    fn test_draw_clears_then_draws_in_order() {
        let mut engine = ParticleEngine::new(200.0, 200.0, 2);
        engine.burst(Vec2::new(10.0, 20.0));

        let mut surface = RecordingSurface::default();
        engine.draw(&mut surface);

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), engine.len());
        for (circle, particle) in surface.circles.iter().zip(engine.particles()) {
            assert_eq!(circle.0, particle.pos);
            assert_eq!(circle.1, particle.radius);
            assert_eq!(circle.2, particle.color);
            assert_eq!(circle.3, particle.opacity);
            assert_eq!(circle.4, GLOW_BLUR);
        }
    }

    #[test]
    fn test_zero_sized_canvas_does_not_panic() {
        let mut engine = ParticleEngine::new(0.0, 0.0, 8);
        engine.spawn_confetti();
        engine.tick();
        assert!(engine.ambient_count() >= AMBIENT_FLOOR);
    }

    #[test]
    fn test_same_seed_same_particles() {
        let mut a = ParticleEngine::new(640.0, 480.0, 99);
        let mut b = ParticleEngine::new(640.0, 480.0, 99);
        a.burst(Vec2::new(1.0, 2.0));
        b.burst(Vec2::new(1.0, 2.0));
        for _ in 0..10 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.life, pb.life);
        }
    }
}
