//! Per-frame simulation step
//!
//! Order within a frame: spawn timer, spawn, obstacle motion, body
//! integration, bounds, then one pass over the obstacle list for scoring and
//! collisions. Expired obstacles are popped only after that pass.

use rand::Rng;

use super::collision::{body_bounds_collision, body_has_passed, body_obstacle_collision};
use super::spawn::spawn_obstacle;
use super::state::{Field, GameEvent, Hit, SimulationState};
use crate::tuning::Tuning;

/// Everything one step produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    /// Seconds actually integrated (after clamping)
    pub dt_used: f32,
    pub events: Vec<GameEvent>,
}

impl StepOutcome {
    /// The terminal collision, if this step ended the session
    pub fn collision(&self) -> Option<Hit> {
        self.events.iter().find_map(|e| match e {
            GameEvent::Collided(hit) => Some(*hit),
            _ => None,
        })
    }

    /// The new best score, if one was set this step
    pub fn new_best(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|e| match e {
            GameEvent::NewBest { best } => Some(*best),
            _ => None,
        })
    }

    /// Whether the score changed this step
    pub fn scored(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::Scored { .. }))
    }
}

/// Set the body's vertical velocity to the score-scaled impulse
pub fn apply_impulse(state: &mut SimulationState, tuning: &Tuning) {
    if !state.running {
        return;
    }
    state.body.vel_y = tuning.impulse_velocity(state.score);
}

/// Advance the simulation by one frame.
///
/// `dt` is clamped to `[0, tuning.max_frame_dt]`. A state that is not running
/// (collided, or never started) is left untouched.
pub fn update<R: Rng + ?Sized>(
    state: &mut SimulationState,
    field: Field,
    tuning: &Tuning,
    rng: &mut R,
    dt: f32,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if !state.running {
        return outcome;
    }

    let dt = tuning.clamp_dt(dt);
    outcome.dt_used = dt;

    // Difficulty is fixed for the whole frame
    let speed = tuning.obstacle_speed(state.score);
    let spawn_interval = tuning.spawn_interval(state.score);

    state.spawn_timer += dt;
    if state.spawn_timer >= spawn_interval {
        state.spawn_timer = 0.0;
        let obstacle = spawn_obstacle(state.score, field, tuning, rng);
        log::debug!(
            "Spawned obstacle: gap {:.0}px centred at {:.0}",
            obstacle.gap_height,
            obstacle.gap_center
        );
        outcome.events.push(GameEvent::Spawned {
            gap_center: obstacle.gap_center,
            gap_height: obstacle.gap_height,
        });
        state.obstacles.push_back(obstacle);
    }

    for obstacle in state.obstacles.iter_mut() {
        obstacle.x -= speed * dt;
    }

    let body = &mut state.body;
    body.vel_y += tuning.gravity * dt;
    body.pos.y += body.vel_y * dt;

    let mut collided = false;

    let bounds = body_bounds_collision(body, field, tuning);
    if let Some(hit) = bounds.hit {
        if hit == Hit::Ceiling {
            body.vel_y = 0.0;
        }
        body.pos.y = bounds.clamped_y;
        outcome.events.push(GameEvent::Collided(hit));
        collided = true;
    }

    // One pass: scoring is idempotent via the flag, collisions stop at the first hit
    for obstacle in state.obstacles.iter_mut() {
        if !obstacle.scored && body_has_passed(&state.body, obstacle) {
            obstacle.scored = true;
            state.score += 1;
            log::debug!("Scored: {}", state.score);
            outcome.events.push(GameEvent::Scored { score: state.score });
            if state.score > state.best {
                state.best = state.score;
                outcome.events.push(GameEvent::NewBest { best: state.best });
            }
        }

        if collided {
            continue;
        }
        if let Some(hit) = body_obstacle_collision(&state.body, obstacle) {
            outcome.events.push(GameEvent::Collided(hit));
            collided = true;
        }
    }

    let despawn_x = -tuning.despawn_margin;
    while state
        .obstacles
        .front()
        .is_some_and(|o| o.right() < despawn_x)
    {
        state.obstacles.pop_front();
    }

    if collided {
        state.running = false;
    }

    outcome
}
