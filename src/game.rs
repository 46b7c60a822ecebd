//! Game coordinator
//!
//! Owns the session and its collaborators (display, store, effects, frame
//! loop) and is the only place where simulation events turn into side
//! effects. External failures are logged and dropped here so the session
//! never sees them.

use thiserror::Error;

use crate::WorldSize;
use crate::consts::DEFAULT_PLAYER_HEIGHT;
use crate::effects::{Effects, Feedback};
use crate::highscores;
use crate::persistence::KeyValueStore;
use crate::platform::{Action, FrameLoop, LoopToken};
use crate::renderer::{Display, DisplayError, EntityKind, Hud, SceneSync, Style};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameSession, TickOutcome, tick};
use crate::tuning::Tuning;

#[derive(Debug, Error)]
pub enum GameError {
    /// The page (or backend) has no player entity; nothing can run
    #[error("player entity unavailable: {0}")]
    MissingPlayer(#[source] DisplayError),
    #[error(transparent)]
    Backend(#[from] DisplayError),
}

pub struct Game<D, S> {
    session: GameSession,
    scene: SceneSync,
    display: D,
    store: S,
    effects: Effects,
    frame_loop: FrameLoop,
    settings: Settings,
}

impl<D: Display, S: KeyValueStore> Game<D, S> {
    /// Wire up a game in the Idle phase.
    ///
    /// Creates the player entity and measures it once; fails if the display
    /// cannot provide one. Best score and settings are read from `store`.
    pub fn new(
        mut display: D,
        store: S,
        mut effects: Effects,
        tuning: Tuning,
        world: WorldSize,
        seed: u64,
    ) -> Result<Self, GameError> {
        let player = display
            .create_entity(EntityKind::Player, &Style::default())
            .map_err(GameError::MissingPlayer)?;
        let player_height = display
            .query_height(player)
            .filter(|h| *h > 0.0)
            .unwrap_or(DEFAULT_PLAYER_HEIGHT);

        let best = highscores::load(&store);
        let settings = Settings::load(&store);

        let mut session = GameSession::new(tuning, world, player_height, best, seed);
        session.pacer.set_target_fps(settings.target_fps);
        effects.set_volume(settings.effective_volume());

        log::info!(
            "Game ready: world {}x{}, player height {}, best {}",
            world.width,
            world.height,
            player_height,
            best
        );

        let mut game = Self {
            session,
            scene: SceneSync::new(player),
            display,
            store,
            effects,
            frame_loop: FrameLoop::new(),
            settings,
        };
        game.render();
        Ok(game)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_looping(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Apply and persist new preferences
    pub fn update_settings(&mut self, settings: Settings) {
        self.session.pacer.set_target_fps(settings.target_fps);
        self.effects.set_volume(settings.effective_volume());
        settings.save(&mut self.store);
        self.settings = settings;
        self.render();
    }

    /// Begin a run. Any previous loop is cancelled first; the host must drive
    /// `frame` with the returned token only.
    pub fn start(&mut self) -> LoopToken {
        let token = self.frame_loop.arm();
        self.session.start();
        self.effects.rearm();
        self.dispatch_events();
        self.render();
        token
    }

    /// The single input trigger. Returns a token when it started a new run.
    pub fn activate(&mut self) -> Option<LoopToken> {
        match Action::for_phase(self.session.phase) {
            Action::Start => Some(self.start()),
            Action::Flap => {
                self.flap();
                None
            }
        }
    }

    fn flap(&mut self) {
        if !self.session.flap() {
            return;
        }
        if let Some(variant) = self.effects.trigger(Feedback::Flap) {
            if !self.settings.reduced_motion {
                self.session.spawn_puff(variant);
            }
        }
        self.dispatch_events();
    }

    /// One host frame callback. Returns whether the host should re-arm.
    pub fn frame(&mut self, timestamp: f64, token: &LoopToken) -> bool {
        if !token.is_live() {
            return false;
        }

        let outcome = tick(&mut self.session, timestamp);
        self.dispatch_events();
        if outcome != TickOutcome::Deferred {
            self.render();
        }

        if !outcome.keep_running() {
            self.frame_loop.stop();
        }
        token.is_live()
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Started | GameEvent::Flapped => {}
                GameEvent::Scored { score } => log::debug!("Score: {}", score),
                GameEvent::Crashed { cause, score } => {
                    log::debug!("Crashed ({:?}) at {}", cause, score);
                    self.effects.trigger(Feedback::Collision);
                }
                GameEvent::NewBest { best } => {
                    highscores::save(&mut self.store, best);
                }
            }
        }
    }

    fn render(&mut self) {
        self.scene.sync(&mut self.display, &self.session);
        let hud = Hud {
            phase: self.session.phase,
            score: self.session.run.score,
            best: self.session.run.best_score,
            diagnostics: self
                .settings
                .show_fps
                .then(|| self.session.pacer.diagnostics().summary()),
        };
        self.scene.show_hud(&mut self.display, hud);
    }
}
