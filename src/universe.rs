//! The greeting controller
//!
//! `BirthdayUniverse` is built once at startup and owned by the host. Input
//! comes in through [`BirthdayUniverse::interact`], time through
//! [`BirthdayUniverse::pump`] and [`BirthdayUniverse::frame`]. Everything the
//! host has to do in response (DOM classes, sounds, shake, timer wake-ups)
//! is queued as [`Effect`]s and collected with [`BirthdayUniverse::take_effects`].

use glam::Vec2;

use crate::audio::SoundCue;
use crate::consts::*;
use crate::language::{Language, LanguageToggle};
use crate::particles::ParticleEngine;
use crate::settings::Settings;
use crate::stage::{JourneyPhase, Progress, StageController, StagePresentation, starfield_color};
use crate::timeline::Timeline;

/// Work waiting on the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
enum Deferred {
    /// Delayed stage change after an accepted interaction
    Advance,
    /// Exit animation done; show the final message
    RevealFinal,
    /// One of the staggered celebration bursts
    CelebrationBurst,
    /// One confetti piece from a rain
    Confetti,
    EndShake,
    RemoveSparkle(u32),
}

/// Something the host must apply
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// New presentation for every stage, indexed by `rank - 1`
    Stages(Vec<StagePresentation>),
    /// Tint the starfield behind `rank`
    Starfield { rank: u8, color: &'static str },
    /// Show the final message surface
    FinalMessage,
    Sound(SoundCue),
    /// Start (true) or stop (false) the page shake
    Shake(bool),
    /// Show a sparkle marker at the pointer
    Sparkle { id: u32, pos: Vec2 },
    RemoveSparkle(u32),
    /// Re-apply all annotated text in this language
    Language(Language),
    /// Call [`BirthdayUniverse::pump`] again at this host time (ms)
    Wake { due: f64 },
}

/// Owned state for the whole greeting
#[derive(Debug, Clone)]
pub struct BirthdayUniverse {
    stages: StageController,
    particles: ParticleEngine,
    language: LanguageToggle,
    timeline: Timeline<Deferred>,
    settings: Settings,
    effects: Vec<Effect>,
    next_sparkle_id: u32,
    shaking: bool,
}

impl BirthdayUniverse {
    pub fn new(settings: Settings, width: f32, height: f32, seed: u64) -> Self {
        Self {
            stages: StageController::new(),
            particles: ParticleEngine::new(width, height, seed),
            language: LanguageToggle::new(settings.language),
            timeline: Timeline::new(),
            settings,
            effects: Vec::new(),
            next_sparkle_id: 1,
            shaking: false,
        }
    }

    /// Show the first stage and the starting language
    pub fn start(&mut self) {
        self.show_stages();
        self.effects.push(Effect::Language(self.language.current()));
        log::info!("Birthday universe ready, {} stages to go", TOTAL_STAGES);
    }

    pub fn stages(&self) -> &StageController {
        &self.stages
    }

    pub fn particles(&self) -> &ParticleEngine {
        &self.particles
    }

    pub fn language(&self) -> Language {
        self.language.current()
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    /// Timers still waiting
    pub fn pending_timers(&self) -> usize {
        self.timeline.pending()
    }

    /// Take everything queued for the host
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Interaction on `rank`'s element at `pos`. Anything but the active
    /// stage is ignored and leaves no trace. Returns whether it was accepted.
    ///
    /// Delays count from the last [`pump`](Self::pump), so the host pumps to
    /// the event time first.
    pub fn interact(&mut self, rank: u8, pos: Vec2) -> bool {
        if !self.stages.accept_interaction(rank) {
            log::debug!("Ignoring interaction on stage {}", rank);
            return false;
        }

        self.sparkle(pos);
        self.effects.push(Effect::Sound(SoundCue::Click));
        self.particles.burst(pos);
        self.shake();
        self.schedule(ADVANCE_DELAY_MS, Deferred::Advance);

        log::info!("Stage {} clicked! Total clicks: {}", rank, self.stages.clicks());
        true
    }

    /// Move to the next stage, or begin the exit from the last one
    pub fn advance(&mut self) {
        match self.stages.advance() {
            Progress::Advanced(rank) => {
                self.show_stages();
                log::info!("Advancing to stage {}", rank);
            }
            Progress::Terminal => self.begin_exit(),
        }
    }

    /// Fire every timer due at `now` (host ms), including ones they schedule
    pub fn pump(&mut self, now: f64) {
        loop {
            let due = self.timeline.advance_to(now);
            if due.is_empty() {
                break;
            }
            for item in due {
                self.fire(item);
            }
        }
    }

    /// One display refresh: fire due timers, then advance the particles
    pub fn frame(&mut self, now: f64) {
        self.pump(now);
        self.particles.tick();
    }

    /// Five staggered bursts around the centre, a confetti rain and the
    /// celebration cue
    pub fn celebrate(&mut self) {
        for i in 0..CELEBRATION_BURSTS {
            self.schedule(
                i as f64 * CELEBRATION_BURST_STAGGER_MS,
                Deferred::CelebrationBurst,
            );
        }
        self.confetti_rain(CELEBRATION_CONFETTI);
        self.effects.push(Effect::Sound(SoundCue::Celebration));
    }

    /// Schedule `count` confetti pieces, each after its own random delay
    pub fn confetti_rain(&mut self, count: usize) {
        for delay in self.particles.confetti_delays(count) {
            self.schedule(delay, Deferred::Confetti);
        }
    }

    /// Switch language and ask the host to re-apply text
    pub fn toggle_language(&mut self) -> Language {
        let language = self.language.toggle();
        self.effects.push(Effect::Language(language));
        log::info!("Language switched to: {:?}", language);
        language
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.particles.resize(width, height);
    }

    /// Drop all particles, timers and queued effects
    pub fn teardown(&mut self) {
        self.particles.clear();
        self.timeline.clear();
        self.effects.clear();
        log::info!("Birthday universe cleaned up");
    }

    fn fire(&mut self, item: Deferred) {
        match item {
            Deferred::Advance => self.advance(),
            Deferred::RevealFinal => self.reveal_final(),
            Deferred::CelebrationBurst => {
                let pos = self.particles.near_center(CELEBRATION_SPREAD);
                self.particles.burst(pos);
            }
            Deferred::Confetti => self.particles.spawn_confetti(),
            Deferred::EndShake => {
                self.shaking = false;
                self.effects.push(Effect::Shake(false));
            }
            Deferred::RemoveSparkle(id) => self.effects.push(Effect::RemoveSparkle(id)),
        }
    }

    fn begin_exit(&mut self) {
        if self.stages.phase() != JourneyPhase::Exiting {
            return;
        }
        self.show_stages();
        self.schedule(EXIT_DELAY_MS, Deferred::RevealFinal);
    }

    fn reveal_final(&mut self) {
        self.stages.reveal_final();
        self.effects.push(Effect::Stages(self.stages.presentations()));
        self.effects.push(Effect::FinalMessage);
        self.celebrate();
        log::info!("Final message revealed! Happy Birthday!");
    }

    fn show_stages(&mut self) {
        let rank = self.stages.current();
        self.effects.push(Effect::Stages(self.stages.presentations()));
        self.effects.push(Effect::Starfield {
            rank,
            color: starfield_color(rank),
        });
    }

    fn shake(&mut self) {
        if !self.settings.effective_screen_shake() {
            return;
        }
        self.shaking = true;
        self.effects.push(Effect::Shake(true));
        self.schedule(SHAKE_DURATION_MS, Deferred::EndShake);
    }

    fn sparkle(&mut self, pos: Vec2) {
        let id = self.next_sparkle_id;
        self.next_sparkle_id = self.next_sparkle_id.wrapping_add(1);
        self.effects.push(Effect::Sparkle { id, pos });
        self.schedule(SPARKLE_DURATION_MS, Deferred::RemoveSparkle(id));
    }

    fn schedule(&mut self, delay_ms: f64, item: Deferred) {
        let due = self.timeline.schedule(delay_ms, item);
        self.effects.push(Effect::Wake { due });
    }
}
