//! Game state and lifecycle
//!
//! Everything the controller mutates per tick lives here. External effects
//! (sounds, UI updates, despawn requests) are recorded as [`GameEvent`]s for
//! the host to drain, which keeps the simulation free of platform calls.

use std::collections::VecDeque;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::contact::{CollectibleId, ContactEvent, PlatformId};
use crate::audio::SoundCue;
use crate::consts::SCORE_SENTINEL;
use crate::tuning::Tuning;

/// Lifecycle of a run. Transitions only ever go forward:
/// `NotStarted -> Running -> Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball spawned, waiting for the start trigger (gravity disabled)
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Ball fell through the floor
    Ended,
}

impl GamePhase {
    #[inline]
    pub fn is_running(self) -> bool {
        self == GamePhase::Running
    }
}

/// Side effects produced by the simulation, in the order they happened
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// `start()` took effect
    GameStarted,
    /// The ball fell through the floor
    GameOver,
    /// Score changed to the contained value
    ScoreChanged(i32),
    /// Gravity changed to the contained (signed) value
    GravityChanged(f32),
    /// A sound cue should play
    Sound(SoundCue),
    /// A platform was landed on; its shadow should become visible
    ShadowRevealed(PlatformId),
    /// A collectible was picked up and should be hidden
    CollectibleDeactivated(CollectibleId),
    /// The persistent gem counter should be incremented
    GemCollected,
    /// A short-lived cosmetic effect should spawn
    EffectSpawned { position: Vec3, lifetime: f32 },
    /// The host should remove the ball after `delay` seconds
    DespawnRequested { delay: f32 },
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Cosmetic roll, not gameplay-relevant
    pub rotation: Quat,
    /// False once the host has despawned the ball
    pub present: bool,
}

impl Agent {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            present: true,
        }
    }
}

/// Complete controller state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Only `start()` and the floor check move this forward
    pub(crate) phase: GamePhase,
    pub agent: Agent,
    /// Signed vertical acceleration (negative = down)
    pub gravity: f32,
    /// Successful landings minus one; starts at the sentinel
    pub score: i32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Contacts delivered since the last tick, drained FIFO
    pub contacts: VecDeque<ContactEvent>,
    /// Events not yet taken by the host
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Spawn a ball resting just above the origin, waiting for `start()`
    pub fn new(tuning: Tuning) -> Self {
        let spawn = Vec3::new(0.0, tuning.agent_extent_y, 0.0);
        Self {
            tuning,
            phase: GamePhase::NotStarted,
            agent: Agent::new(spawn),
            gravity: 0.0,
            score: SCORE_SENTINEL,
            time_ticks: 0,
            contacts: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Start the run. Only acts from `NotStarted`; returns whether it did.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            log::debug!("start() ignored in phase {:?}", self.phase);
            return false;
        }

        self.gravity = self.tuning.min_gravity;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::GravityChanged(self.gravity));
        self.events.push(GameEvent::GameStarted);
        log::info!("Run started (gravity {})", self.gravity);
        true
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Queue a contact reported by the collision backend
    ///
    /// Tile contacts only count if they arrive while running; gems are
    /// collectible in any phase.
    pub fn push_contact(&mut self, contact: ContactEvent) {
        if matches!(contact, ContactEvent::Platform { .. }) && !self.phase.is_running() {
            log::debug!("Dropped tile contact in phase {:?}", self.phase);
            return;
        }
        self.contacts.push_back(contact);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_for_start() {
        let state = GameState::new(Tuning::default());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, -1);
        assert_eq!(state.gravity, 0.0);
        assert!(state.agent.present);
    }

    #[test]
    fn test_start_sets_min_gravity() {
        let mut state = GameState::new(Tuning::default());
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.gravity, -35.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GravityChanged(-35.0), GameEvent::GameStarted]
        );
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut state = GameState::new(Tuning::default());
        state.start();
        state.drain_events();
        state.gravity = -55.0;

        assert!(!state.start());
        assert_eq!(state.gravity, -55.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_push_contact_drops_tiles_unless_running() {
        let mut state = GameState::new(Tuning::default());
        let tile = ContactEvent::Platform {
            id: PlatformId(0),
            position: Vec3::ZERO,
            extent_y: 0.5,
        };
        let gem = ContactEvent::Collectible { id: CollectibleId(4) };

        state.push_contact(tile.clone());
        state.push_contact(gem.clone());
        assert_eq!(state.contacts, VecDeque::from(vec![gem.clone()]));

        state.start();
        state.push_contact(tile.clone());
        assert_eq!(state.contacts.len(), 2);

        state.phase = GamePhase::Ended;
        state.contacts.clear();
        state.push_contact(tile);
        state.push_contact(gem);
        assert_eq!(state.contacts.len(), 1);
    }

    #[test]
    fn test_phase_accessor_tracks_lifecycle() {
        let mut state = GameState::new(Tuning::default());
        assert_eq!(state.phase(), GamePhase::NotStarted);
        state.start();
        assert_eq!(state.phase(), GamePhase::Running);
    }

    #[test]
    fn test_start_after_end_is_noop() {
        let mut state = GameState::new(Tuning::default());
        state.phase = GamePhase::Ended;
        assert!(!state.start());
        assert_eq!(state.phase, GamePhase::Ended);
    }
}
