//! Simulation state and core entity types
//!
//! Everything the engine mutates lives in [`SimulationState`]. The game mode
//! is deliberately not in here: the state machine in `crate::game` owns it.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Visible play field in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(crate::consts::FIELD_WIDTH, crate::consts::FIELD_HEIGHT)
    }
}

/// The player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner. x only changes on resize.
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, positive = falling (px/s)
    pub vel_y: f32,
}

impl Body {
    /// Body vertically centred in the field, at rest
    pub fn spawn(field: Field, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.body_x(field.width), field.height / 2.0),
            size: Vec2::new(tuning.body_width, tuning.body_height),
            vel_y: 0.0,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// A pair of blocking segments with a passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge (px). Decreases every frame.
    pub x: f32,
    pub width: f32,
    /// Vertical centre of the gap
    pub gap_center: f32,
    pub gap_height: f32,
    /// Set once the body has fully cleared this obstacle
    pub scored: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// y of the upper segment's bottom edge
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height / 2.0
    }

    /// y of the lower segment's top edge
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height / 2.0
    }
}

/// Something that happened during a step, for the state machine and HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new obstacle entered at the right edge
    Spawned { gap_center: f32, gap_height: f32 },
    /// Body cleared an obstacle; carries the new score
    Scored { score: u32 },
    /// Score surpassed the best; the new best must be persisted
    NewBest { best: u32 },
    /// Terminal: the session is over
    Collided(Hit),
}

/// What the body ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hit {
    /// Top of the play field
    Ceiling,
    /// Ground line
    Ground,
    /// Segment above the gap
    UpperSegment,
    /// Segment below the gap
    LowerSegment,
}

/// Complete simulation state for one session (plus the carried best score)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub body: Body,
    /// Oldest (leftmost) first
    pub obstacles: VecDeque<Obstacle>,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Points this session
    pub score: u32,
    /// Best ever, carried across sessions
    pub best: u32,
    /// Cleared by the engine on collision; only a reset sets it again
    pub running: bool,
}

impl SimulationState {
    /// Fresh, not-yet-running state with a known best score
    pub fn new(field: Field, tuning: &Tuning, best: u32) -> Self {
        Self {
            body: Body::spawn(field, tuning),
            obstacles: VecDeque::new(),
            spawn_timer: 0.0,
            score: 0,
            best,
            running: false,
        }
    }

    /// Start a new session. The best score survives.
    pub fn reset(&mut self, field: Field, tuning: &Tuning) {
        self.body = Body::spawn(field, tuning);
        self.obstacles.clear();
        self.spawn_timer = 0.0;
        self.score = 0;
        self.running = true;
    }

    /// Re-place the body horizontally after a field resize
    pub fn place_body_x(&mut self, field: Field, tuning: &Tuning) {
        self.body.pos.x = tuning.body_x(field.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_spawns_centered() {
        let tuning = Tuning::default();
        let body = Body::spawn(Field::new(800.0, 600.0), &tuning);
        assert_eq!(body.pos, Vec2::new(176.0, 300.0));
        assert_eq!(body.vel_y, 0.0);
        assert_eq!(body.right(), 216.0);
        assert_eq!(body.bottom(), 330.0);
    }

    #[test]
    fn test_reset_keeps_best() {
        let tuning = Tuning::default();
        let field = Field::default();
        let mut state = SimulationState::new(field, &tuning, 7);
        state.score = 12;
        state.spawn_timer = 0.4;
        state.obstacles.push_back(Obstacle {
            x: 10.0,
            width: 70.0,
            gap_center: 200.0,
            gap_height: 150.0,
            scored: false,
        });

        state.reset(field, &tuning);
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 7);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawn_timer, 0.0);
        assert!(state.running);
    }

    #[test]
    fn test_gap_edges() {
        let obstacle = Obstacle {
            x: 0.0,
            width: 70.0,
            gap_center: 200.0,
            gap_height: 150.0,
            scored: false,
        };
        assert_eq!(obstacle.gap_top(), 125.0);
        assert_eq!(obstacle.gap_bottom(), 275.0);
        assert_eq!(obstacle.right(), 70.0);
    }

    #[test]
    fn test_field_rejects_degenerate_size() {
        let field = Field::new(0.0, -5.0);
        assert_eq!(field.width, 1.0);
        assert_eq!(field.height, 1.0);
    }
}
