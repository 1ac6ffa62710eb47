//! Collision detection for the body against the field bounds and obstacles
//!
//! Everything is axis-aligned. Horizontal overlap is strict, so a body that
//! merely touches an obstacle's side is not inside it; likewise a body whose
//! top/bottom sits exactly on a gap edge is still inside the gap.

use super::state::{Body, Field, Hit, Obstacle};
use crate::tuning::Tuning;

/// Result of checking the body against the top of the field and the ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsResult {
    pub hit: Option<Hit>,
    /// Position the body should be clamped to (unchanged when no hit)
    pub clamped_y: f32,
}

/// Check the body against the ceiling (`top <= 0`) and the ground line
/// (`bottom >= ground_y`).
pub fn body_bounds_collision(body: &Body, field: Field, tuning: &Tuning) -> BoundsResult {
    let ground_y = tuning.ground_y(field.height);

    if body.top() <= 0.0 {
        return BoundsResult {
            hit: Some(Hit::Ceiling),
            clamped_y: 0.0,
        };
    }

    if body.bottom() >= ground_y {
        return BoundsResult {
            hit: Some(Hit::Ground),
            clamped_y: ground_y - body.size.y,
        };
    }

    BoundsResult {
        hit: None,
        clamped_y: body.pos.y,
    }
}

/// Whether the body's horizontal extent overlaps the obstacle's
#[inline]
pub fn overlaps_horizontally(body: &Body, obstacle: &Obstacle) -> bool {
    body.right() > obstacle.x && body.left() < obstacle.right()
}

/// Check the body against one obstacle pair
pub fn body_obstacle_collision(body: &Body, obstacle: &Obstacle) -> Option<Hit> {
    if !overlaps_horizontally(body, obstacle) {
        return None;
    }

    if body.top() < obstacle.gap_top() {
        Some(Hit::UpperSegment)
    } else if body.bottom() > obstacle.gap_bottom() {
        Some(Hit::LowerSegment)
    } else {
        None
    }
}

/// Whether the body has fully cleared the obstacle
#[inline]
pub fn body_has_passed(body: &Body, obstacle: &Obstacle) -> bool {
    obstacle.right() < body.left()
}
