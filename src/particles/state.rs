//! Particle data

use glam::Vec2;

use crate::consts::BURST_LIFE;

/// Colours particles are drawn from
pub const PALETTE: [&str; 6] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#feca57", "#ff9ff3", "#54a0ff",
];

/// Lifecycle/physics rules a particle follows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    /// Background mote, wraps at the canvas edges
    Ambient,
    /// Click spray, fades with life and falls under gravity
    Burst,
    /// Falling celebration piece
    Confetti {
        /// Degrees
        rotation: f32,
        /// Degrees per frame
        rotation_speed: f32,
    },
}

/// A single kinematic body
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// 0-1
    pub opacity: f32,
    pub color: &'static str,
    /// Frames remaining
    pub life: i32,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn is_ambient(&self) -> bool {
        matches!(self.kind, ParticleKind::Ambient)
    }

    pub fn is_burst(&self) -> bool {
        matches!(self.kind, ParticleKind::Burst)
    }

    pub fn is_confetti(&self) -> bool {
        matches!(self.kind, ParticleKind::Confetti { .. })
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Advance one frame inside a `bounds`-sized canvas
    pub fn step(&mut self, bounds: Vec2, gravity: f32) {
        self.pos += self.vel;
        self.life -= 1;

        match &mut self.kind {
            ParticleKind::Ambient => {
                // Wrap to the opposite edge
                if self.pos.x < 0.0 {
                    self.pos.x = bounds.x;
                }
                if self.pos.x > bounds.x {
                    self.pos.x = 0.0;
                }
                if self.pos.y < 0.0 {
                    self.pos.y = bounds.y;
                }
                if self.pos.y > bounds.y {
                    self.pos.y = 0.0;
                }
            }
            ParticleKind::Burst => {
                self.opacity = (self.life as f32 / BURST_LIFE as f32).clamp(0.0, 1.0);
                self.vel.y += gravity;
            }
            ParticleKind::Confetti {
                rotation,
                rotation_speed,
            } => {
                *rotation += *rotation_speed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(kind: ParticleKind, pos: Vec2, vel: Vec2) -> Particle {
        Particle {
            pos,
            vel,
            radius: 2.0,
            opacity: 1.0,
            color: PALETTE[0],
            life: BURST_LIFE,
            kind,
        }
    }

    #[test]
    fn test_ambient_wraps_each_edge() {
        let bounds = Vec2::new(100.0, 50.0);

        let mut p = particle(ParticleKind::Ambient, Vec2::new(0.5, 10.0), Vec2::new(-1.0, 0.0));
        p.step(bounds, 0.1);
        assert_eq!(p.pos.x, 100.0);

        let mut p = particle(ParticleKind::Ambient, Vec2::new(99.5, 10.0), Vec2::new(1.0, 0.0));
        p.step(bounds, 0.1);
        assert_eq!(p.pos.x, 0.0);

        let mut p = particle(ParticleKind::Ambient, Vec2::new(10.0, 0.2), Vec2::new(0.0, -0.5));
        p.step(bounds, 0.1);
        assert_eq!(p.pos.y, 50.0);

        let mut p = particle(ParticleKind::Ambient, Vec2::new(10.0, 49.9), Vec2::new(0.0, 0.5));
        p.step(bounds, 0.1);
        assert_eq!(p.pos.y, 0.0);
        // Ambient opacity is left alone
        assert_eq!(p.opacity, 1.0);
    }

    #[test]
    fn test_burst_fades_and_falls() {
        let mut p = particle(ParticleKind::Burst, Vec2::ZERO, Vec2::new(0.0, -2.0));
        p.step(Vec2::new(10.0, 10.0), 0.1);
        assert_eq!(p.life, BURST_LIFE - 1);
        assert!((p.opacity - 59.0 / 60.0).abs() < 1e-6);
        assert!((p.vel.y - -1.9).abs() < 1e-6);
        // No wrap for bursts
        assert_eq!(p.pos, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn test_confetti_spins_without_wrapping() {
        let kind = ParticleKind::Confetti {
            rotation: 10.0,
            rotation_speed: 2.5,
        };
        let mut p = particle(kind, Vec2::new(5.0, 9.0), Vec2::new(0.0, 3.0));
        p.step(Vec2::new(10.0, 10.0), 0.1);
        assert_eq!(p.pos.y, 12.0);
        assert_eq!(p.opacity, 1.0);
        assert_eq!(
            p.kind,
            ParticleKind::Confetti {
                rotation: 12.5,
                rotation_speed: 2.5
            }
        );
    }
}
