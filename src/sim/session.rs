//! The game session
//!
//! One owned object holding every piece of mutable run state, handed by
//! reference to the pacer, spawner, physics, collision and scoring code.
//! Phase transitions happen only here:
//!
//! ```text
//!   Idle ──start──> Running ──crash / fall──> GameOver
//!                    ^   │ start                  │
//!                    └───┘ (restart)              │
//!                    ^────────────start───────────┘
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::pacer::FramePacer;
use super::physics;
use super::scoring;
use super::spawner::{self, SpawnTimers};
use super::state::{
    Cloud, CrashCause, EntityId, FlapVariant, GameEvent, GamePhase, Obstacle, Player, Puff,
    RunState,
};
use crate::WorldSize;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct GameSession {
    pub tuning: Tuning,
    pub world: WorldSize,
    pub phase: GamePhase,
    pub run: RunState,
    pub player: Player,
    /// Live pipe pairs, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Background clouds, oldest first
    pub clouds: Vec<Cloud>,
    /// Flap puffs, oldest first
    pub puffs: Vec<Puff>,
    pub pacer: FramePacer,
    pub timers: SpawnTimers,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: EntityId,
}

impl GameSession {
    /// Create an idle session. `player_height` is the height reported once by
    /// the display layer; `best_score` comes from storage.
    pub fn new(
        tuning: Tuning,
        world: WorldSize,
        player_height: f32,
        best_score: u32,
        seed: u64,
    ) -> Self {
        Self {
            player: Player::new(&tuning, player_height),
            pacer: FramePacer::new(&tuning),
            timers: SpawnTimers::new(&tuning),
            tuning,
            world,
            phase: GamePhase::Idle,
            run: RunState::new(best_score),
            obstacles: Vec::new(),
            clouds: Vec::new(),
            puffs: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Begin a fresh run from any phase.
    ///
    /// Clears all spawned entities, resets score, frog, pacer and spawn
    /// timers. The best score carries over.
    pub fn start(&mut self) {
        let previous = self.phase;
        self.obstacles.clear();
        self.clouds.clear();
        self.puffs.clear();
        self.run.reset();
        self.player.reset(self.tuning.player_start_y);
        self.pacer.reset();
        self.timers.reset(&self.tuning);
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Run started (from {:?}, best {})", previous, self.run.best_score);
    }

    /// Upward impulse. Ignored unless running.
    pub fn flap(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => {
                physics::flap(&mut self.player, self.tuning.flap_velocity);
                self.events.push(GameEvent::Flapped);
                true
            }
            GamePhase::Idle | GamePhase::GameOver => false,
        }
    }

    /// Spawn the visual puff for a flap (no-op outside a run)
    pub fn spawn_puff(&mut self, variant: FlapVariant) {
        if self.is_running() {
            spawner::spawn_puff(self, variant);
        }
    }

    /// Running -> GameOver. Settles the best score once; a repeat call in
    /// any other phase does nothing.
    pub fn end_run(&mut self, cause: CrashCause) {
        match self.phase {
            GamePhase::Running => {}
            GamePhase::Idle | GamePhase::GameOver => return,
        }
        self.phase = GamePhase::GameOver;
        let score = self.run.score;
        self.events.push(GameEvent::Crashed { cause, score });
        if let Some(best) = scoring::settle_run(&mut self.run) {
            log::info!("New best score: {}", best);
            self.events.push(GameEvent::NewBest { best });
        }
        log::info!("Game over ({:?}), final score {}", cause, score);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take everything that happened since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
