//! Game mode state machine
//!
//! `Game` owns the mode and is the only thing that changes it. It gates the
//! simulation (only `Playing` advances), maps input actions to transitions,
//! and forwards step results to persistence and the HUD.
//!
//! ```text
//! Ready    --impulse/restart--> Playing
//! Playing  --pause-->           Paused
//! Paused   --pause-->           Playing   (elapsed pause time discarded)
//! Playing  --collision-->       GameOver
//! GameOver --impulse/restart--> Playing
//! ```

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::persistence::{BestScoreStore, load_best_or_default, save_best_quietly};
use crate::platform::{Action, FrameClock, FrameView, Hud, Renderer};
use crate::settings::Settings;
use crate::sim::{Field, Hit, SimulationState, StepOutcome, apply_impulse, update};
use crate::tuning::Tuning;

/// High-level mode. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the first input
    Ready,
    Playing,
    Paused,
    /// Session ended, waiting for restart
    GameOver,
}

/// One game: simulation state, mode, and the collaborators it talks to
pub struct Game<R: Rng = Pcg32> {
    state: SimulationState,
    mode: GameMode,
    field: Field,
    tuning: Tuning,
    rng: R,
    clock: FrameClock,
    store: Box<dyn BestScoreStore>,
    hud: Box<dyn Hud>,
    last_hit: Option<Hit>,
}

impl Game<Pcg32> {
    /// Game seeded from settings, or from OS entropy when no seed is set
    pub fn new(settings: &Settings, store: Box<dyn BestScoreStore>, hud: Box<dyn Hud>) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("Game created with seed: {}", seed);
        Self::with_rng(settings, store, hud, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Game with an injected random source for gap placement
    pub fn with_rng(
        settings: &Settings,
        store: Box<dyn BestScoreStore>,
        mut hud: Box<dyn Hud>,
        rng: R,
    ) -> Self {
        let tuning = settings.tuning.clone().sanitized();
        let field = settings.field();
        let best = load_best_or_default(store.as_ref());
        let state = SimulationState::new(field, &tuning, best);

        hud.set_score_text(0);
        hud.set_best_text(best);

        Self {
            state,
            mode: GameMode::Ready,
            field,
            tuning,
            rng,
            clock: FrameClock::new(),
            store,
            hud,
            last_hit: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// What ended the last session, if it has ended
    pub fn last_hit(&self) -> Option<Hit> {
        self.last_hit
    }

    pub fn store(&self) -> &dyn BestScoreStore {
        self.store.as_ref()
    }

    /// Route a device-independent input action
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Impulse => self.impulse(),
            Action::Restart => self.restart(),
            Action::PauseToggle => self.pause_toggle(),
        }
    }

    /// Flap while playing. In `Ready` and `GameOver` the same input starts a
    /// new session, so one button both plays and restarts.
    pub fn impulse(&mut self) {
        match self.mode {
            GameMode::Playing => apply_impulse(&mut self.state, &self.tuning),
            GameMode::Ready | GameMode::GameOver => self.start(),
            GameMode::Paused => {}
        }
    }

    /// Start a new session from `Ready` or `GameOver`; ignored otherwise
    pub fn restart(&mut self) {
        match self.mode {
            GameMode::Ready | GameMode::GameOver => self.start(),
            GameMode::Playing | GameMode::Paused => {
                log::debug!("Restart ignored while {:?}", self.mode);
            }
        }
    }

    /// `Playing` <-> `Paused`; ignored in other modes
    pub fn pause_toggle(&mut self) {
        match self.mode {
            GameMode::Playing => {
                self.mode = GameMode::Paused;
                log::info!("Paused at score {}", self.state.score);
            }
            GameMode::Paused => {
                // Time spent paused must not reach the engine
                self.clock.reset();
                self.mode = GameMode::Playing;
                log::info!("Resumed");
            }
            GameMode::Ready | GameMode::GameOver => {}
        }
    }

    fn start(&mut self) {
        self.state.reset(self.field, &self.tuning);
        self.clock.reset();
        self.last_hit = None;
        self.mode = GameMode::Playing;
        self.hud.set_score_text(self.state.score);
        self.hud.set_best_text(self.state.best);
        log::info!("Session started (best {})", self.state.best);
    }

    /// Field size changed: keep the body at its horizontal fraction
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = Field::new(width, height);
        self.state.place_body_x(self.field, &self.tuning);
        log::debug!("Field resized to {}x{}", self.field.width, self.field.height);
    }

    /// Advance by `dt` seconds if playing, then apply the step's consequences
    pub fn step(&mut self, dt: f32) -> StepOutcome {
        if self.mode != GameMode::Playing {
            return StepOutcome::default();
        }

        let outcome = update(
            &mut self.state,
            self.field,
            &self.tuning,
            &mut self.rng,
            dt,
        );

        if outcome.scored() {
            self.hud.set_score_text(self.state.score);
            self.hud.set_best_text(self.state.best);
        }

        if let Some(best) = outcome.new_best() {
            save_best_quietly(self.store.as_mut(), best);
        }

        if let Some(hit) = outcome.collision() {
            self.mode = GameMode::GameOver;
            self.last_hit = Some(hit);
            log::info!(
                "Game over ({:?}): score {}, best {}",
                hit,
                self.state.score,
                self.state.best
            );
        }

        outcome
    }

    /// One display frame: timestamp in, simulation step, render out
    pub fn frame(&mut self, now_ms: f64, renderer: &mut dyn Renderer) -> StepOutcome {
        let dt = self.clock.tick(now_ms);
        let outcome = self.step(dt);
        renderer.render(&self.view());
        outcome
    }

    /// Read-only snapshot for the presentation layer
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            body: &self.state.body,
            obstacles: &self.state.obstacles,
            score: self.state.score,
            best: self.state.best,
            mode: self.mode,
            field_width: self.field.width,
            field_height: self.field.height,
            ground_height: self.tuning.ground_height,
        }
    }
}
