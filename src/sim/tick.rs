//! Per-frame simulation tick
//!
//! Order within a tick:
//! 1. drain queued contacts (FIFO)
//! 2. lateral input
//! 3. cosmetic spin
//! 4. ballistic integration
//! 5. floor breach check

use super::contact::respond_to_contact;
use super::failure::check_failure;
use super::lateral::{slide, spin};
use super::state::{GamePhase, GameState};

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal drag delta (pixels) if a pointer/touch is moving this frame
    pub drag_delta_x: Option<f32>,
    /// Keyboard horizontal axis in [-1, 1]
    pub axis: f32,
}

/// Advance the controller by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.agent.present {
        state.contacts.clear();
        return;
    }

    state.time_ticks += 1;

    while let Some(contact) = state.contacts.pop_front() {
        respond_to_contact(state, &contact);
    }

    slide(state, input);
    spin(state, dt);
    integrate(state, dt);
    check_failure(state);
}

/// Semi-implicit Euler step under the current gravity
///
/// Runs while the run is live and during the post-game drop; a ball that
/// has not started hovers.
pub fn integrate(state: &mut GameState, dt: f32) {
    if state.phase == GamePhase::NotStarted || !state.agent.present {
        return;
    }

    state.agent.vel.y += state.gravity * dt;
    state.agent.pos += state.agent.vel * dt;
}
