//! Stage progression and presentation
//!
//! Stages are ranked 1..=TOTAL_STAGES. The active stage sits in front, the
//! ones already visited recede behind it in layers, and the rest wait hidden.
//! Presentation is always recomputed for every stage at once.

use crate::consts::{COMPACT_VIEWPORT_WIDTH, MAX_RECEDING_DEPTH, TOTAL_STAGES};

/// Every class the host may have put on a stage element
pub const STAGE_CLASSES: [&str; 6] = [
    "active", "behind-1", "behind-2", "behind-3", "behind-4", "exiting",
];

/// Starfield tint per stage
const STARFIELD_COLORS: [&str; TOTAL_STAGES as usize] = [
    "rgba(255, 107, 107, 0.8)", // Red
    "rgba(78, 205, 196, 0.8)",  // Teal
    "rgba(69, 183, 209, 0.8)",  // Blue
    "rgba(254, 202, 87, 0.8)",  // Yellow
    "rgba(255, 159, 243, 0.8)", // Pink
];

/// Starfield tint for ranks outside the table
pub const DEFAULT_STARFIELD_COLOR: &str = "rgba(255, 255, 255, 0.8)";

/// How a single stage is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePresentation {
    /// Not yet reached (or dismissed after the finale)
    Inactive,
    /// In front, accepting interaction
    Active,
    /// Already visited, pushed back `depth` layers (1..=4)
    Receding { depth: u8 },
    /// Last stage playing its exit animation
    Exiting,
}

impl StagePresentation {
    /// CSS classes the host puts on the stage element
    pub fn classes(&self) -> &'static [&'static str] {
        match self {
            StagePresentation::Inactive => &[],
            StagePresentation::Active => &["active"],
            StagePresentation::Receding { depth } => match depth {
                1 => &["behind-1"],
                2 => &["behind-2"],
                3 => &["behind-3"],
                _ => &["behind-4"],
            },
            // Exit animation runs on top of the active styling
            StagePresentation::Exiting => &["active", "exiting"],
        }
    }
}

/// Presentation of `rank` while `active` is the front stage
pub fn presentation_for(rank: u8, active: u8) -> StagePresentation {
    if rank == active {
        StagePresentation::Active
    } else if rank < active {
        StagePresentation::Receding {
            depth: (active - rank).min(MAX_RECEDING_DEPTH),
        }
    } else {
        StagePresentation::Inactive
    }
}

/// Presentation of every stage, indexed by `rank - 1`
pub fn layout(active: u8) -> Vec<StagePresentation> {
    (1..=TOTAL_STAGES)
        .map(|rank| presentation_for(rank, active))
        .collect()
}

/// Starfield tint for a stage. Ranks past the end repeat the last colour.
pub fn starfield_color(rank: u8) -> &'static str {
    match rank {
        0 => DEFAULT_STARFIELD_COLOR,
        r => STARFIELD_COLORS[(r as usize - 1).min(STARFIELD_COLORS.len() - 1)],
    }
}

/// Accessible label for a stage's interactive element
pub fn aria_label(rank: u8) -> String {
    format!("Stage {}: Click to continue the magical journey", rank)
}

/// CSS filter for a stage's clickable element, brighter while hovered or pressed
pub fn doll_filter(highlighted: bool) -> &'static str {
    if highlighted {
        "brightness(1.2) drop-shadow(0 0 30px rgba(255, 255, 255, 0.8))"
    } else {
        "drop-shadow(0 0 20px rgba(255, 255, 255, 0.6))"
    }
}

/// Narrow screens get slower, simpler stage animations
pub fn is_compact_viewport(width: f32) -> bool {
    width < COMPACT_VIEWPORT_WIDTH
}

/// Where the journey currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyPhase {
    /// Clicking through the stages
    Exploring,
    /// Last stage is animating out
    Exiting,
    /// Final message shown
    Finale,
}

/// Result of [`StageController::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Moved on to this rank
    Advanced(u8),
    /// Already on the last stage; the exit transition has begun
    Terminal,
}

/// Owns the progression index and interaction bookkeeping
#[derive(Debug, Clone)]
pub struct StageController {
    current: u8,
    phase: JourneyPhase,
    clicks: u32,
    /// An accepted interaction is waiting for its delayed advance
    transition_pending: bool,
}

impl Default for StageController {
    fn default() -> Self {
        Self::new()
    }
}

impl StageController {
    pub fn new() -> Self {
        Self {
            current: 1,
            phase: JourneyPhase::Exploring,
            clicks: 0,
            transition_pending: false,
        }
    }

    /// Current progression index
    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn phase(&self) -> JourneyPhase {
        self.phase
    }

    /// Accepted interactions so far
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn is_last(&self) -> bool {
        self.current >= TOTAL_STAGES
    }

    pub fn transition_pending(&self) -> bool {
        self.transition_pending
    }

    /// Rank currently accepting interaction, if any
    pub fn active_rank(&self) -> Option<u8> {
        match self.phase {
            JourneyPhase::Exploring => Some(self.current),
            _ => None,
        }
    }

    /// Whether the final message surface is showing
    pub fn final_message_visible(&self) -> bool {
        self.phase == JourneyPhase::Finale
    }

    /// Presentation of every stage, indexed by `rank - 1`
    pub fn presentations(&self) -> Vec<StagePresentation> {
        let mut stages = layout(self.current);
        let current = &mut stages[self.current as usize - 1];
        match self.phase {
            JourneyPhase::Exploring => {}
            JourneyPhase::Exiting => *current = StagePresentation::Exiting,
            JourneyPhase::Finale => *current = StagePresentation::Inactive,
        }
        stages
    }

    /// Record an interaction on `rank`. Returns false (and changes nothing)
    /// unless `rank` is the active stage and no transition is already queued.
    pub fn accept_interaction(&mut self, rank: u8) -> bool {
        if self.active_rank() != Some(rank) || self.transition_pending {
            return false;
        }
        self.clicks += 1;
        self.transition_pending = true;
        true
    }

    /// Move to the next stage, or start the exit transition from the last one
    pub fn advance(&mut self) -> Progress {
        self.transition_pending = false;
        if self.phase != JourneyPhase::Exploring {
            return Progress::Terminal;
        }
        if self.is_last() {
            self.phase = JourneyPhase::Exiting;
            Progress::Terminal
        } else {
            self.current += 1;
            Progress::Advanced(self.current)
        }
    }

    /// Finish the exit transition: the last stage leaves, the final message shows
    pub fn reveal_final(&mut self) {
        self.phase = JourneyPhase::Finale;
    }
}
