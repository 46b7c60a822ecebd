//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here. Display handles, storage and
//! audio are kept outside; the session reports what happened through
//! [`GameEvent`]s instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Stable identifier for spawned entities (pipes, clouds, puffs)
pub type EntityId = u32;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start trigger
    #[default]
    Idle,
    /// Simulation advancing every frame, flaps accepted
    Running,
    /// Frozen until the next start trigger
    GameOver,
}

/// The frog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top edge, pixels from the top of the world
    pub y: f32,
    /// Vertical velocity in pixels per step (positive is down)
    pub vel: f32,
    pub left: f32,
    pub width: f32,
    /// Cached once from the display layer
    pub height: f32,
}

impl Player {
    pub fn new(tuning: &Tuning, height: f32) -> Self {
        Self {
            y: tuning.player_start_y,
            vel: 0.0,
            left: tuning.player_left,
            width: tuning.player_width,
            height,
        }
    }

    /// Back to the launch position, motionless
    pub fn reset(&mut self, start_y: f32) {
        self.y = start_y;
        self.vel = 0.0;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A top/bottom pipe pair sharing one scroll position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub top_height: f32,
    pub gap: f32,
    pub bottom_height: f32,
    /// Already scored
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Y where the bottom pipe begins
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.top_height + self.gap
    }

    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.top_height + self.gap / 2.0
    }
}

/// Background cloud size tiers (larger drifts slower)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloudSize {
    Small,
    Medium,
    Large,
}

impl CloudSize {
    pub const ALL: [CloudSize; 3] = [CloudSize::Small, CloudSize::Medium, CloudSize::Large];

    /// Drift speed range in pixels per step; tiers never overlap
    pub fn speed_range(&self) -> std::ops::Range<f32> {
        match self {
            CloudSize::Small => 0.4..0.6,
            CloudSize::Medium => 0.25..0.4,
            CloudSize::Large => 0.1..0.25,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudSize::Small => "small",
            CloudSize::Medium => "medium",
            CloudSize::Large => "large",
        }
    }
}

/// Decorative background cloud, no collision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub id: EntityId,
    pub size: CloudSize,
    pub pos: Vec2,
    pub speed: f32,
    /// Frame timestamp (ms) at creation
    pub born_ms: f64,
}

/// Flavours of flap feedback, shared by the sound and the puff it leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlapVariant {
    #[default]
    ShortWet,
    LongRippling,
    Squeaky,
    Explosive,
    DeepRumble,
}

impl FlapVariant {
    /// Selection table; the plain variants appear twice so Explosive stays rare
    pub const TABLE: [FlapVariant; 7] = [
        FlapVariant::ShortWet,
        FlapVariant::LongRippling,
        FlapVariant::Squeaky,
        FlapVariant::DeepRumble,
        FlapVariant::ShortWet,
        FlapVariant::LongRippling,
        FlapVariant::Explosive,
    ];

    /// How long the matching puff stays on screen
    pub fn puff_lifetime_ms(&self) -> f32 {
        match self {
            FlapVariant::Squeaky => 600.0,
            FlapVariant::Explosive => 1000.0,
            FlapVariant::ShortWet => 1200.0,
            FlapVariant::LongRippling => 1500.0,
            FlapVariant::DeepRumble => 1300.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlapVariant::ShortWet => "wet",
            FlapVariant::LongRippling => "rippling",
            FlapVariant::Squeaky => "squeaky",
            FlapVariant::Explosive => "explosive",
            FlapVariant::DeepRumble => "rumble",
        }
    }
}

/// Transient visual left behind the frog on each flap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puff {
    pub id: EntityId,
    pub variant: FlapVariant,
    pub pos: Vec2,
    pub age_ms: f32,
}

impl Puff {
    pub fn new(id: EntityId, variant: FlapVariant, player: &Player) -> Self {
        Self {
            id,
            variant,
            pos: Vec2::new(PUFF_OFFSET_X, player.y + PUFF_OFFSET_Y),
            age_ms: 0.0,
        }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.age_ms >= self.variant.puff_lifetime_ms()
    }
}

/// Score bookkeeping for the current run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    pub score: u32,
    /// Never decreases across runs
    pub best_score: u32,
    /// End-of-run compare-and-update already ran
    pub settled: bool,
}

impl RunState {
    pub fn new(best_score: u32) -> Self {
        Self {
            score: 0,
            best_score,
            settled: false,
        }
    }

    /// Fresh run, keeping the best
    pub fn reset(&mut self) {
        self.score = 0;
        self.settled = false;
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Hit a top or bottom pipe
    Obstacle,
    /// Fell off the bottom of the world
    FellOut,
}

/// Things the coordinator reacts to (sound, storage, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flapped,
    Scored { score: u32 },
    Crashed { cause: CrashCause, score: u32 },
    /// Strict improvement; emitted at most once per run
    NewBest { best: u32 },
}
