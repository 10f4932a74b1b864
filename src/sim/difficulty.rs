//! Difficulty curve
//!
//! Gravity strengthens by one step every `gravity_rate` landings, saturating
//! at `max_gravity`. The sentinel score (and score 0) never triggers a step.

/// Outcome of a difficulty check after a landing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GravityUpdate {
    /// Gravity stays where it is
    Unchanged,
    /// Gravity moves to the contained (signed) value
    Stepped(f32),
}

/// Decide the gravity after `score` was reached
///
/// `gravity` and `max_gravity` are signed (negative = down); `step` is a
/// positive magnitude.
pub fn next_gravity(score: i32, gravity: f32, step: f32, rate: i32, max_gravity: f32) -> GravityUpdate {
    if score <= 0 || rate <= 0 || score % rate != 0 {
        return GravityUpdate::Unchanged;
    }

    let candidate = gravity - step;
    if candidate.abs() <= max_gravity.abs() {
        GravityUpdate::Stepped(candidate)
    } else {
        GravityUpdate::Unchanged
    }
}
