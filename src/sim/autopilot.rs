//! Demo-mode controller
//!
//! Aims the body a little below the centre of the next gap it has not yet
//! cleared and asks for an impulse whenever it sinks past that line.

use super::state::{Field, SimulationState};
use crate::tuning::Tuning;

/// How far below the gap centre the body's centre is held (px). The body
/// bobs up to one impulse apex above this line.
const AIM_BELOW_CENTER: f32 = 25.0;

/// Vertical line the autopilot tries to keep the body's centre on
pub fn target_y(state: &SimulationState, field: Field, tuning: &Tuning) -> f32 {
    state
        .obstacles
        .iter()
        .find(|o| !o.scored)
        .map(|o| o.gap_center + AIM_BELOW_CENTER)
        .unwrap_or_else(|| tuning.ground_y(field.height) / 2.0)
}

/// Whether the autopilot wants an impulse this frame
pub fn should_impulse(state: &SimulationState, field: Field, tuning: &Tuning) -> bool {
    if !state.running {
        return false;
    }
    let below_target = state.body.center_y() > target_y(state, field, tuning);
    let not_rising = state.body.vel_y >= 0.0;
    below_target && not_rising
}
