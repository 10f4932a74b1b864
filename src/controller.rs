//! Host-facing controller
//!
//! Owns the simulation state and the collaborators it talks to. Each public
//! operation runs the simulation, then dispatches the resulting events to the
//! sound, UI, counter store and scheduler. The events are also handed back
//! so the renderer can react (shadows, gem bursts, hidden gems).

use thiserror::Error;

use crate::audio::SoundSink;
use crate::consts::PICKUPS_KEY;
use crate::persistence::CounterStore;
use crate::sim::{Agent, ContactEvent, GameEvent, GamePhase, GameState, TickInput};
use crate::tuning::{Tuning, TuningError};
use crate::ui::GameUi;

/// Host timer facility for deferred despawn
pub trait Scheduler {
    /// Request that the ball be removed after `delay` seconds. The host calls
    /// [`Controller::despawn`] when it fires.
    fn schedule_despawn(&mut self, delay: f32);
}

/// Wiring errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required collaborator was never provided
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// Tuning failed validation
    #[error(transparent)]
    Tuning(#[from] TuningError),
}

/// Builder for [`Controller`]; every collaborator is required
#[derive(Default)]
pub struct ControllerBuilder {
    tuning: Tuning,
    sound: Option<Box<dyn SoundSink>>,
    ui: Option<Box<dyn GameUi>>,
    counters: Option<Box<dyn CounterStore>>,
    scheduler: Option<Box<dyn Scheduler>>,
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn sound(mut self, sound: impl SoundSink + 'static) -> Self {
        self.sound = Some(Box::new(sound));
        self
    }

    pub fn ui(mut self, ui: impl GameUi + 'static) -> Self {
        self.ui = Some(Box::new(ui));
        self
    }

    pub fn counters(mut self, counters: impl CounterStore + 'static) -> Self {
        self.counters = Some(Box::new(counters));
        self
    }

    pub fn scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Some(Box::new(scheduler));
        self
    }

    pub fn build(self) -> Result<Controller, ConfigError> {
        self.tuning.validate()?;
        Ok(Controller {
            state: GameState::new(self.tuning),
            sound: self.sound.ok_or(ConfigError::MissingCollaborator("sound"))?,
            ui: self.ui.ok_or(ConfigError::MissingCollaborator("ui"))?,
            counters: self
                .counters
                .ok_or(ConfigError::MissingCollaborator("counter store"))?,
            scheduler: self
                .scheduler
                .ok_or(ConfigError::MissingCollaborator("scheduler"))?,
        })
    }
}

/// The ball controller with its collaborators attached
pub struct Controller {
    state: GameState,
    sound: Box<dyn SoundSink>,
    ui: Box<dyn GameUi>,
    counters: Box<dyn CounterStore>,
    scheduler: Box<dyn Scheduler>,
}

impl Controller {
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::new()
    }

    /// Begin the run (no-op unless not yet started)
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.state.start();
        self.dispatch()
    }

    /// Advance one frame
    pub fn tick(&mut self, dt: f32, input: &TickInput) -> Vec<GameEvent> {
        crate::sim::tick(&mut self.state, input, dt);
        self.dispatch()
    }

    /// Queue a contact for the next tick
    pub fn queue_contact(&mut self, contact: ContactEvent) {
        self.state.push_contact(contact);
    }

    /// Process a contact immediately, as a synchronous collision callback
    pub fn handle_contact(&mut self, contact: ContactEvent) -> Vec<GameEvent> {
        if self.state.agent.present {
            crate::sim::respond_to_contact(&mut self.state, &contact);
        }
        self.dispatch()
    }

    /// Called by the host when the scheduled despawn fires
    pub fn despawn(&mut self) {
        if self.state.agent.present {
            self.state.agent.present = false;
            self.state.contacts.clear();
            log::info!("Ball despawned");
        }
    }

    pub fn score(&self) -> i32 {
        self.state.score
    }

    pub fn gravity(&self) -> f32 {
        self.state.gravity
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn agent(&self) -> &Agent {
        &self.state.agent
    }

    pub fn tuning(&self) -> &Tuning {
        &self.state.tuning
    }

    /// Lifetime gems collected, across runs
    pub fn gems(&self) -> i64 {
        self.counters.get(PICKUPS_KEY)
    }

    fn dispatch(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            match event {
                GameEvent::GameStarted => self.ui.on_game_started(),
                GameEvent::GameOver => self.ui.on_game_over(),
                GameEvent::ScoreChanged(score) => self.ui.on_score_changed(*score),
                GameEvent::Sound(cue) => self.sound.play(*cue),
                GameEvent::GemCollected => match self.counters.increment(PICKUPS_KEY) {
                    Ok(total) => self.ui.on_gems_changed(total),
                    Err(e) => log::warn!("Failed to persist gem count: {}", e),
                },
                GameEvent::DespawnRequested { delay } => self.scheduler.schedule_despawn(*delay),
                GameEvent::GravityChanged(_)
                | GameEvent::ShadowRevealed(_)
                | GameEvent::CollectibleDeactivated(_)
                | GameEvent::EffectSpawned { .. } => {}
            }
        }
        events
    }
}
