//! Floor breach detection
//!
//! A ball below y = 0 has missed its tile. The run ends exactly once: the
//! ball is stopped, dropped off screen with terminal gravity, and handed to
//! the host for removal after a short delay.

use glam::Vec3;

use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::SoundCue;
use crate::consts::DESPAWN_DELAY;

/// End the run if the ball fell through the floor. Returns whether it fired.
pub fn check_failure(state: &mut GameState) -> bool {
    if !state.phase.is_running() || state.agent.pos.y >= 0.0 {
        return false;
    }

    state.emit(GameEvent::Sound(SoundCue::GameOver));
    state.agent.vel = Vec3::ZERO;

    state.gravity = state.tuning.terminal_gravity();
    state.emit(GameEvent::GravityChanged(state.gravity));

    state.emit(GameEvent::GameOver);
    state.phase = GamePhase::Ended;
    state.emit(GameEvent::DespawnRequested {
        delay: DESPAWN_DELAY,
    });

    log::info!("Game over at z={:.1}, final score {}", state.agent.pos.z, state.score);
    true
}
