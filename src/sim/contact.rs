//! Contact response
//!
//! Landing on a tile scores, may raise the difficulty, snaps the ball onto
//! the tile to hide late/early collision detection, and relaunches it.
//! Touching a gem collects it regardless of the run phase.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::difficulty::{GravityUpdate, next_gravity};
use super::state::{GameEvent, GameState};
use super::trajectory::solve_launch;
use crate::audio::SoundCue;
use crate::consts::GEM_EFFECT_LIFETIME;

/// Host handle for a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

/// Host handle for a gem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectibleId(pub u32);

/// A contact reported by the collision backend
#[derive(Debug, Clone, PartialEq)]
pub enum ContactEvent {
    /// Ball touched a tile
    Platform {
        id: PlatformId,
        /// Tile world position (only z is used)
        position: Vec3,
        /// Vertical extent of the tile's bounds
        extent_y: f32,
    },
    /// Ball touched a gem
    Collectible { id: CollectibleId },
}

/// Apply one contact to the state
pub fn respond_to_contact(state: &mut GameState, contact: &ContactEvent) {
    match *contact {
        ContactEvent::Platform {
            id,
            position,
            extent_y,
        } => land_on_platform(state, id, position, extent_y),
        ContactEvent::Collectible { id } => collect(state, id),
    }
}

fn land_on_platform(state: &mut GameState, id: PlatformId, position: Vec3, extent_y: f32) {
    if !state.phase.is_running() || !state.agent.present {
        return;
    }

    state.emit(GameEvent::Sound(SoundCue::Jump));
    state.score += 1;
    state.emit(GameEvent::ScoreChanged(state.score));

    // Relaunch uses the post-update gravity so a threshold landing hops harder at once
    let tuning = &state.tuning;
    if let GravityUpdate::Stepped(gravity) = next_gravity(
        state.score,
        state.gravity,
        tuning.gravity_step,
        tuning.gravity_rate,
        tuning.max_gravity,
    ) {
        log::info!("Score {}: gravity {} -> {}", state.score, state.gravity, gravity);
        state.gravity = gravity;
        state.emit(GameEvent::GravityChanged(gravity));
    }

    // x stays player-owned
    let rest_y = state.tuning.agent_extent_y / 2.0 + extent_y / 2.0;
    state.agent.pos.y = rest_y;
    state.agent.pos.z = position.z;

    state.emit(GameEvent::ShadowRevealed(id));

    let launch = solve_launch(
        state.tuning.jump_height,
        state.tuning.jump_distance,
        state.gravity.abs(),
    );
    state.agent.vel = launch.velocity();
    log::debug!(
        "Landed on {:?} at z={:.2}, score {}, relaunch {:?}",
        id,
        position.z,
        state.score,
        state.agent.vel
    );
}

fn collect(state: &mut GameState, id: CollectibleId) {
    state.emit(GameEvent::Sound(SoundCue::Gem));
    state.emit(GameEvent::CollectibleDeactivated(id));
    state.emit(GameEvent::GemCollected);

    let pos = state.agent.pos;
    state.emit(GameEvent::EffectSpawned {
        position: Vec3::new(pos.x, state.tuning.gem_effect_height, pos.z),
        lifetime: GEM_EFFECT_LIFETIME,
    });
    log::debug!("Collected {:?}", id);
}
