//! Horse Flappy - a one-button side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, obstacle generation, collisions, scoring)
//! - `game`: Mode state machine gating the simulation and routing input actions
//! - `tuning`: Data-driven game balance and difficulty curves
//! - `persistence`: Best-score storage backends
//! - `platform`: Frame clock and the render/HUD callback seams
//! - `renderer`: Scene draw-list construction for the presentation layer

pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, GameMode};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest simulation step ever applied in one frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1200.0;

    /// Impulse strength at score 0 (pixels/s, upward)
    pub const IMPULSE_BASE: f32 = 5.5 * 60.0;
    /// Extra impulse per point scored
    pub const IMPULSE_GROWTH: f32 = 0.02 * 60.0;
    /// Upper bound on the extra impulse
    pub const IMPULSE_BONUS_CAP: f32 = 2.5 * 60.0;

    /// Obstacle scroll speed (pixels/s)
    pub const SPEED_BASE: f32 = 140.0;
    pub const SPEED_GROWTH: f32 = 6.0;
    pub const SPEED_BONUS_CAP: f32 = 220.0;

    /// Seconds between obstacle spawns
    pub const SPAWN_INTERVAL_BASE: f32 = 1.3;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.01;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.6;

    /// Gap height (pixels)
    pub const GAP_BASE: f32 = 170.0;
    pub const GAP_SHRINK: f32 = 1.5;
    pub const GAP_MIN: f32 = 120.0;
    pub const GAP_MAX: f32 = 190.0;
    /// Clearance kept between a gap and the field top / ground line
    pub const GAP_TOP_MARGIN: f32 = 40.0;
    pub const GAP_BOTTOM_MARGIN: f32 = 40.0;

    /// Ground strip height at the bottom of the field
    pub const GROUND_HEIGHT: f32 = 56.0;

    /// Body dimensions and horizontal placement (fraction of field width)
    pub const BODY_WIDTH: f32 = 40.0;
    pub const BODY_HEIGHT: f32 = 30.0;
    pub const BODY_X_FRACTION: f32 = 0.22;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    /// New obstacles appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Obstacles are dropped once their right edge is this far past the left edge
    pub const DESPAWN_MARGIN: f32 = 20.0;

    /// Default play field (CSS pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// LocalStorage / file keys
    pub const BEST_SCORE_KEY: &str = "horseflappy_best";
    pub const SETTINGS_KEY: &str = "horseflappy_settings";
}
