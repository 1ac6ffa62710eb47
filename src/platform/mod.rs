//! Platform abstraction layer
//!
//! The seams between the game core and whatever hosts it:
//! - Frame timing (`FrameClock`)
//! - Input actions (`Action`)
//! - Render and HUD callbacks (`Renderer`, `Hud`)

use std::collections::VecDeque;

use crate::game::GameMode;
use crate::sim::{Body, Obstacle};

/// Device-independent player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Flap (or start/restart when not playing)
    Impulse,
    Restart,
    PauseToggle,
}

/// Everything the presentation layer may read for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub body: &'a Body,
    /// Oldest (leftmost) first
    pub obstacles: &'a VecDeque<Obstacle>,
    pub score: u32,
    pub best: u32,
    pub mode: GameMode,
    pub field_width: f32,
    pub field_height: f32,
    pub ground_height: f32,
}

/// Called once per frame after the simulation step. Must not mutate game state.
pub trait Renderer {
    fn render(&mut self, view: &FrameView<'_>);
}

/// Score/best text outside the play field
pub trait Hud {
    fn set_score_text(&mut self, score: u32);
    fn set_best_text(&mut self, best: u32);
}

/// HUD that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn set_score_text(&mut self, score: u32) {
        log::trace!("HUD score: {}", score);
    }

    fn set_best_text(&mut self, best: u32) {
        log::trace!("HUD best: {}", best);
    }
}

/// Turns monotonic timestamps (milliseconds) into per-frame deltas (seconds).
///
/// The first timestamp after construction or [`FrameClock::reset`] yields 0:
/// time that passed while nothing was being simulated is dropped, not caught up.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Elapsed seconds since the previous call (never negative)
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1234.0), 0.0);
        assert!((clock.tick(1250.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_reset_drops_elapsed_time() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.reset();
        assert_eq!(clock.tick(60_000.0), 0.0);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert_eq!(clock.tick(400.0), 0.0);
        assert!((clock.tick(410.0) - 0.01).abs() < 1e-6);
    }
}
