//! Obstacle generation
//!
//! Gap height shrinks with score; the gap centre is drawn uniformly from the
//! band that keeps the whole gap between the top margin and the ground margin.

use rand::Rng;

use super::state::{Field, Obstacle};
use crate::tuning::Tuning;

/// Vertical range `(lowest, highest)` the gap centre may take for `gap` px.
///
/// Degenerate fields (too short for the gap plus margins) collapse the band to
/// its top end instead of inverting it.
pub fn gap_center_band(field: Field, tuning: &Tuning, gap: f32) -> (f32, f32) {
    let top_min = tuning.gap_top_margin;
    let top_max = tuning.ground_y(field.height) - tuning.gap_bottom_margin - gap;
    let lo = top_min + gap / 2.0;
    let hi = top_max.max(top_min) + gap / 2.0;
    (lo, hi)
}

/// Create a new obstacle just past the right edge of the field
pub fn spawn_obstacle<R: Rng + ?Sized>(
    score: u32,
    field: Field,
    tuning: &Tuning,
    rng: &mut R,
) -> Obstacle {
    let gap_height = tuning.gap_height(score);
    let (lo, hi) = gap_center_band(field, tuning, gap_height);
    let t: f32 = rng.random();
    let gap_center = lo + t * (hi - lo);

    Obstacle {
        x: field.width + tuning.spawn_margin,
        width: tuning.obstacle_width,
        gap_center,
        gap_height,
        scored: false,
    }
}
