//! Birthday Universe - a five-stage animated birthday greeting
//!
//! Core modules:
//! - `stage`: Stage progression and per-stage presentation
//! - `particles`: Ambient, burst and confetti particle kinematics
//! - `timeline`: Deferred fire-once timers on a host-driven clock
//! - `universe`: The controller tying stages, particles, sound and language together
//! - `language`: Bilingual text toggle mechanism
//! - `renderer`: Drawing surface abstraction (2D canvas on web)
//! - `audio`: Sound cues (Web Audio on web)
//! - `platform`: Host clock and page glue

pub mod audio;
pub mod language;
pub mod particles;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod stage;
pub mod timeline;
pub mod universe;

pub use audio::SoundCue;
pub use language::{Annotated, Language, LanguageToggle};
pub use particles::{Particle, ParticleEngine, ParticleKind};
pub use settings::Settings;
pub use stage::{StageController, StagePresentation};
pub use universe::{BirthdayUniverse, Effect};

/// Journey configuration constants
pub mod consts {
    /// Number of stages in the journey
    pub const TOTAL_STAGES: u8 = 5;
    /// Deepest "behind-N" layer; older stages stay at this depth
    pub const MAX_RECEDING_DEPTH: u8 = 4;

    /// Delay between an accepted interaction and the stage change (ms)
    pub const ADVANCE_DELAY_MS: f64 = 1000.0;
    /// Exit animation length before the final message appears (ms)
    pub const EXIT_DELAY_MS: f64 = 1000.0;
    /// Screen shake duration (ms)
    pub const SHAKE_DURATION_MS: f64 = 500.0;
    /// Lifetime of the sparkle marker shown at the pointer (ms)
    pub const SPARKLE_DURATION_MS: f64 = 1000.0;

    /// Ambient particle floor maintained after every tick
    pub const AMBIENT_FLOOR: usize = 50;
    /// Particles per click burst
    pub const BURST_PARTICLES: usize = 15;
    /// Burst particle lifetime in frames
    pub const BURST_LIFE: i32 = 60;
    /// Downward acceleration applied to burst particles each frame
    pub const BURST_GRAVITY: f32 = 0.1;
    /// Confetti lifetime in frames
    pub const CONFETTI_LIFE: i32 = 300;
    /// Confetti spawn height (just above the top edge)
    pub const CONFETTI_SPAWN_Y: f32 = -10.0;
    /// Upper bound of the random confetti spawn delay (ms)
    pub const CONFETTI_MAX_DELAY_MS: f64 = 2000.0;
    /// Confetti pieces in the celebration rain
    pub const CELEBRATION_CONFETTI: usize = 100;

    /// Bursts fired during the celebration
    pub const CELEBRATION_BURSTS: usize = 5;
    /// Gap between celebration bursts (ms)
    pub const CELEBRATION_BURST_STAGGER_MS: f64 = 300.0;
    /// Half-width of the square around the centre where celebration bursts land
    pub const CELEBRATION_SPREAD: f32 = 100.0;

    /// Viewports narrower than this (CSS px) use the compact animation timing
    pub const COMPACT_VIEWPORT_WIDTH: f32 = 768.0;
    /// Stage animation duration on compact viewports
    pub const COMPACT_ANIMATION_DURATION: &str = "2s";

    /// Shadow blur used for the particle glow pass
    pub const GLOW_BLUR: f64 = 10.0;
}
