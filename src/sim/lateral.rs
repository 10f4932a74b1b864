//! Lateral control and cosmetic spin
//!
//! Drag input wins over the keyboard axis within a tick; the two never add.

use glam::Quat;

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::{KEYBOARD_GAIN, SPIN_DEG_PER_SEC};
use crate::tuning::Tuning;

/// Lateral displacement requested by this tick's input
pub fn lateral_displacement(input: &TickInput, tuning: &Tuning) -> f32 {
    if let Some(drag_x) = input.drag_delta_x {
        drag_x * tuning.sliding_speed
    } else if tuning.use_keyboard {
        input.axis * tuning.sliding_speed * KEYBOARD_GAIN
    } else {
        0.0
    }
}

/// Slide the ball sideways and clamp it to the track
pub fn slide(state: &mut GameState, input: &TickInput) {
    if !state.phase.is_running() {
        return;
    }

    let limit = state.tuning.x_pos_limit;
    let x = state.agent.pos.x + lateral_displacement(input, &state.tuning);
    // NaN input must not escape the clamp
    state.agent.pos.x = if x.is_nan() { 0.0 } else { x.clamp(-limit, limit) };
}

/// Roll the ball forward about the world X axis
pub fn spin(state: &mut GameState, dt: f32) {
    if !state.phase.is_running() {
        return;
    }

    let delta = Quat::from_rotation_x((SPIN_DEG_PER_SEC * dt).to_radians());
    state.agent.rotation = (delta * state.agent.rotation).normalize();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;

    fn running() -> GameState {
        let mut state = GameState::new(Tuning::default());
        state.start();
        state
    }

    #[test]
    fn test_keyboard_is_seven_times_drag() {
        let tuning = Tuning::default();
        let drag = lateral_displacement(
            &TickInput {
                drag_delta_x: Some(1.0),
                axis: 0.0,
            },
            &tuning,
        );
        let key = lateral_displacement(
            &TickInput {
                drag_delta_x: None,
                axis: 1.0,
            },
            &tuning,
        );
        assert!((drag - 0.03).abs() < 1e-6);
        assert!((key - 0.21).abs() < 1e-6);
    }

    #[test]
    fn test_drag_overrides_axis() {
        let tuning = Tuning::default();
        let both = TickInput {
            drag_delta_x: Some(-10.0),
            axis: 1.0,
        };
        assert!((lateral_displacement(&both, &tuning) + 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_keyboard_disabled() {
        let tuning = Tuning {
            use_keyboard: false,
            ..Default::default()
        };
        let input = TickInput {
            drag_delta_x: None,
            axis: 1.0,
        };
        assert_eq!(lateral_displacement(&input, &tuning), 0.0);
    }

    #[test]
    fn test_slide_clamps_hard() {
        let mut state = running();
        state.agent.pos.x = 4.9;
        slide(
            &mut state,
            &TickInput {
                drag_delta_x: Some(100.0),
                axis: 0.0,
            },
        );
        assert_eq!(state.agent.pos.x, 5.0);
    }

    #[test]
    fn test_slide_ignored_before_start() {
        let mut state = GameState::new(Tuning::default());
        slide(
            &mut state,
            &TickInput {
                drag_delta_x: Some(50.0),
                axis: 0.0,
            },
        );
        assert_eq!(state.agent.pos.x, 0.0);
    }

    #[test]
    fn test_spin_only_while_running() {
        let mut state = running();
        spin(&mut state, 0.1);
        let (axis, angle) = state.agent.rotation.to_axis_angle();
        assert!((angle - 50f32.to_radians()).abs() < 1e-4);
        assert!((axis.x - 1.0).abs() < 1e-4);

        state.phase = GamePhase::Ended;
        let before = state.agent.rotation;
        spin(&mut state, 0.1);
        assert_eq!(state.agent.rotation, before);
    }

    proptest! {
        #[test]
        fn prop_x_stays_on_track(
            inputs in proptest::collection::vec(
                (proptest::option::of(-500.0f32..500.0), -1.0f32..=1.0),
                1..200,
            )
        ) {
            let mut state = running();
            for (drag_delta_x, axis) in inputs {
                slide(&mut state, &TickInput { drag_delta_x, axis });
                prop_assert!(state.agent.pos.x.abs() <= 5.0);
            }
        }
    }
}
