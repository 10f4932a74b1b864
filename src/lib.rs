//! Tile Hop - motion and progression controller for an endless ball runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump arcs, difficulty, lifecycle, contacts)
//! - `controller`: Wires the simulation to its host collaborators
//! - `audio`, `ui`, `persistence`: Collaborator interfaces the host implements
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod controller;
pub mod persistence;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use controller::{ConfigError, Controller, ControllerBuilder, Scheduler};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native demo loop (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Keyboard axis input is this many times more sensitive than drag input
    pub const KEYBOARD_GAIN: f32 = 7.0;

    /// Cosmetic spin of the ball about the world X axis (degrees/second)
    pub const SPIN_DEG_PER_SEC: f32 = 500.0;

    /// Score before the first landing
    pub const SCORE_SENTINEL: i32 = -1;

    /// Terminal gravity sits this far below the strongest play-time gravity
    pub const TERMINAL_GRAVITY_OFFSET: f32 = 50.0;

    /// Delay between game over and removal of the ball (seconds)
    pub const DESPAWN_DELAY: f32 = 1.0;

    /// Lifetime of the gem pickup burst effect (seconds)
    pub const GEM_EFFECT_LIFETIME: f32 = 1.0;

    /// Persistent counter key for collected gems
    pub const PICKUPS_KEY: &str = "NumberOfPickUps";
}
