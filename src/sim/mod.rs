//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! input and storage concerns:
//! - Variable timestep, clamped per frame
//! - Randomness only through an injected `rand::Rng`
//! - Obstacles kept in spawn order (leftmost first)

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{BoundsResult, body_bounds_collision, body_has_passed, body_obstacle_collision};
pub use spawn::{gap_center_band, spawn_obstacle};
pub use state::{Body, Field, GameEvent, Hit, Obstacle, SimulationState};
pub use tick::{StepOutcome, apply_impulse, update};
