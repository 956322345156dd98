//! Particle effects
//!
//! Three kinds share one collection:
//! - ambient: slow drifting motes, wrapped at the edges and kept at a floor count
//! - burst: radial spray from a click, fading out under gravity
//! - confetti: celebratory pieces falling from the top edge
//!
//! Life is counted in frames; the engine advances once per display refresh.

pub mod engine;
pub mod state;

pub use engine::ParticleEngine;
pub use state::{PALETTE, Particle, ParticleKind};
