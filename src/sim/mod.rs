//! Deterministic simulation module
//!
//! All controller logic lives here. This module must be pure and deterministic:
//! - Host supplies dt and input; no internal timers
//! - Contacts are queued and drained in arrival order
//! - No rendering, audio, or storage calls; effects leave as `GameEvent`s

pub mod contact;
pub mod difficulty;
pub mod failure;
pub mod lateral;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use contact::{CollectibleId, ContactEvent, PlatformId, respond_to_contact};
pub use difficulty::{GravityUpdate, next_gravity};
pub use failure::check_failure;
pub use lateral::{lateral_displacement, slide, spin};
pub use state::{Agent, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, integrate, tick};
pub use trajectory::{LaunchSolution, solve_launch};
