//! Jump arc solver
//!
//! A hop is a symmetric parabola under constant gravity `g`: the ball reaches
//! the apex `h` at half the flight time, so `h = ½·g·(T/2)²` and
//! `T = sqrt(8h / g)`. The launch velocity follows from `T`:
//! - vertical: `v = g·T/2` (equivalently `v² = 2gh`)
//! - forward: `f = d / T`

use glam::Vec3;

/// Launch parameters for one hop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchSolution {
    /// Time from launch to landing back at launch height (seconds)
    pub time_of_flight: f32,
    /// Upward launch speed
    pub vertical_speed: f32,
    /// Forward (+z) launch speed
    pub forward_speed: f32,
}

impl LaunchSolution {
    /// Velocity to assign on relaunch; lateral drift is always zeroed
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        Vec3::new(0.0, self.vertical_speed, self.forward_speed)
    }
}

/// Solve the launch for a hop of `apex_height` covering `forward_distance`
///
/// # Panics
/// If `gravity_magnitude` is not strictly positive and finite. Gravity is
/// bounded away from zero while the game runs, so reaching this is a bug.
pub fn solve_launch(apex_height: f32, forward_distance: f32, gravity_magnitude: f32) -> LaunchSolution {
    assert!(
        gravity_magnitude.is_finite() && gravity_magnitude > 0.0,
        "gravity magnitude must be positive, got {gravity_magnitude}"
    );

    let time_of_flight = (8.0 * apex_height / gravity_magnitude).sqrt();
    LaunchSolution {
        time_of_flight,
        vertical_speed: time_of_flight * gravity_magnitude / 2.0,
        forward_speed: forward_distance / time_of_flight,
    }
}
