//! Data-driven game balance
//!
//! All difficulty parameters are pure functions of the current score. Nothing
//! here is stored per session: the engine recomputes them every frame/spawn.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs. `Default` is the shipped balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ceiling on a single integration step (seconds)
    pub max_frame_dt: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,

    pub impulse_base: f32,
    pub impulse_growth: f32,
    pub impulse_bonus_cap: f32,

    pub speed_base: f32,
    pub speed_growth: f32,
    pub speed_bonus_cap: f32,

    pub spawn_interval_base: f32,
    pub spawn_interval_step: f32,
    pub spawn_interval_floor: f32,

    pub gap_base: f32,
    pub gap_shrink: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    pub gap_top_margin: f32,
    pub gap_bottom_margin: f32,

    pub ground_height: f32,

    pub body_width: f32,
    pub body_height: f32,
    /// Horizontal body position as a fraction of field width
    pub body_x_fraction: f32,

    pub obstacle_width: f32,
    pub spawn_margin: f32,
    pub despawn_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_frame_dt: MAX_FRAME_DT,
            gravity: GRAVITY,

            impulse_base: IMPULSE_BASE,
            impulse_growth: IMPULSE_GROWTH,
            impulse_bonus_cap: IMPULSE_BONUS_CAP,

            speed_base: SPEED_BASE,
            speed_growth: SPEED_GROWTH,
            speed_bonus_cap: SPEED_BONUS_CAP,

            spawn_interval_base: SPAWN_INTERVAL_BASE,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,

            gap_base: GAP_BASE,
            gap_shrink: GAP_SHRINK,
            gap_min: GAP_MIN,
            gap_max: GAP_MAX,
            gap_top_margin: GAP_TOP_MARGIN,
            gap_bottom_margin: GAP_BOTTOM_MARGIN,

            ground_height: GROUND_HEIGHT,

            body_width: BODY_WIDTH,
            body_height: BODY_HEIGHT,
            body_x_fraction: BODY_X_FRACTION,

            obstacle_width: OBSTACLE_WIDTH,
            spawn_margin: SPAWN_MARGIN,
            despawn_margin: DESPAWN_MARGIN,
        }
    }
}

impl Tuning {
    /// Repair values that would break the difficulty curves: non-finite
    /// fields, a non-positive step ceiling or spawn floor, and an inverted gap
    /// range. Each repair is logged.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        macro_rules! finite_or_default {
            ($($field:ident),+ $(,)?) => {
                $(
                    if !self.$field.is_finite() {
                        log::warn!(
                            "Tuning {} is not finite, using {}",
                            stringify!($field),
                            defaults.$field
                        );
                        self.$field = defaults.$field;
                    }
                )+
            };
        }

        finite_or_default!(
            max_frame_dt,
            gravity,
            impulse_base,
            impulse_growth,
            impulse_bonus_cap,
            speed_base,
            speed_growth,
            speed_bonus_cap,
            spawn_interval_base,
            spawn_interval_step,
            spawn_interval_floor,
            gap_base,
            gap_shrink,
            gap_min,
            gap_max,
            gap_top_margin,
            gap_bottom_margin,
            ground_height,
            body_width,
            body_height,
            body_x_fraction,
            obstacle_width,
            spawn_margin,
            despawn_margin,
        );

        if self.max_frame_dt <= 0.0 {
            log::warn!(
                "Tuning max_frame_dt {} is not positive, using {}",
                self.max_frame_dt,
                defaults.max_frame_dt
            );
            self.max_frame_dt = defaults.max_frame_dt;
        }
        if self.spawn_interval_floor <= 0.0 {
            log::warn!(
                "Tuning spawn_interval_floor {} is not positive, using {}",
                self.spawn_interval_floor,
                defaults.spawn_interval_floor
            );
            self.spawn_interval_floor = defaults.spawn_interval_floor;
        }
        if self.gap_min > self.gap_max {
            log::warn!(
                "Tuning gap range [{}, {}] is inverted, swapping",
                self.gap_min,
                self.gap_max
            );
            std::mem::swap(&mut self.gap_min, &mut self.gap_max);
        }
        self
    }

    /// Clamp a raw frame delta into `[0, max_frame_dt]`. NaN counts as 0.
    #[inline]
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        // Not `f32::clamp`: that panics when the ceiling is negative or NaN
        dt.max(0.0).min(self.max_frame_dt.max(0.0))
    }

    /// Obstacle scroll speed (px/s), non-decreasing in score
    pub fn obstacle_speed(&self, score: u32) -> f32 {
        self.speed_base + (score as f32 * self.speed_growth).min(self.speed_bonus_cap)
    }

    /// Seconds between spawns, shrinking linearly down to the floor
    pub fn spawn_interval(&self, score: u32) -> f32 {
        let shrink = (score as f32 * self.spawn_interval_step)
            .min(self.spawn_interval_base - self.spawn_interval_floor);
        (self.spawn_interval_base - shrink).max(self.spawn_interval_floor)
    }

    /// Gap height for an obstacle spawned at `score`
    pub fn gap_height(&self, score: u32) -> f32 {
        let lo = self.gap_min.min(self.gap_max);
        let hi = self.gap_min.max(self.gap_max);
        (self.gap_base - score as f32 * self.gap_shrink).max(lo).min(hi)
    }

    /// Vertical velocity set by one impulse (negative = upward)
    pub fn impulse_velocity(&self, score: u32) -> f32 {
        -(self.impulse_base + (score as f32 * self.impulse_growth).min(self.impulse_bonus_cap))
    }

    /// Body x for a field of the given width (whole pixels)
    pub fn body_x(&self, field_width: f32) -> f32 {
        (field_width * self.body_x_fraction).round()
    }

    /// y of the ground line for a field of the given height
    pub fn ground_y(&self, field_height: f32) -> f32 {
        field_height - self.ground_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base_impulse_at_score_zero() {
        let tuning = Tuning::default();
        assert_eq!(tuning.impulse_velocity(0), -(5.5 * 60.0));
    }

    #[test]
    fn test_impulse_bonus_is_capped() {
        let tuning = Tuning::default();
        assert!((tuning.impulse_velocity(10) - -(330.0 + 12.0)).abs() < 1e-3);
        assert_eq!(tuning.impulse_velocity(125), -480.0);
        assert_eq!(tuning.impulse_velocity(10_000), -480.0);
    }

    #[test]
    fn test_gap_at_score_fifty() {
        let tuning = Tuning::default();
        // 170 - 1.5 * 50 = 95, below the floor
        assert_eq!(tuning.gap_height(50), 120.0);
    }

    #[test]
    fn test_gap_baseline() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gap_height(0), 170.0);
        assert_eq!(tuning.gap_height(10), 155.0);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let tuning = Tuning::default();
        assert!((tuning.spawn_interval(0) - 1.3).abs() < 1e-6);
        assert!((tuning.spawn_interval(30) - 1.0).abs() < 1e-5);
        assert!((tuning.spawn_interval(70) - 0.6).abs() < 1e-5);
        assert!((tuning.spawn_interval(500) - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_speed_cap() {
        let tuning = Tuning::default();
        assert_eq!(tuning.obstacle_speed(0), 140.0);
        assert_eq!(tuning.obstacle_speed(10), 200.0);
        assert_eq!(tuning.obstacle_speed(1000), 360.0);
    }

    #[test]
    fn test_clamp_dt_rejects_nan_and_negative() {
        let tuning = Tuning::default();
        assert_eq!(tuning.clamp_dt(f32::NAN), 0.0);
        assert_eq!(tuning.clamp_dt(-1.0), 0.0);
        assert_eq!(tuning.clamp_dt(f32::INFINITY), 0.033);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "gravity": 900.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 900.0);
        assert_eq!(tuning.gap_min, GAP_MIN);
    }

    #[test]
    fn test_bad_ranges_do_not_panic() {
        let tuning = Tuning {
            max_frame_dt: -0.01,
            gap_min: 200.0,
            gap_max: 150.0,
            ..Tuning::default()
        };
        assert_eq!(tuning.clamp_dt(0.016), 0.0);
        assert_eq!(tuning.gap_height(0), 170.0);
        assert_eq!(tuning.gap_height(1000), 150.0);
    }

    #[test]
    fn test_sanitized_repairs_ranges() {
        let tuning = Tuning {
            max_frame_dt: -0.01,
            spawn_interval_floor: 0.0,
            gap_min: 200.0,
            gap_max: 150.0,
            gravity: f32::NAN,
            ..Tuning::default()
        }
        .sanitized();
        assert_eq!(tuning.max_frame_dt, MAX_FRAME_DT);
        assert_eq!(tuning.spawn_interval_floor, SPAWN_INTERVAL_FLOOR);
        assert_eq!((tuning.gap_min, tuning.gap_max), (150.0, 200.0));
        assert_eq!(tuning.gravity, GRAVITY);
    }

    #[test]
    fn test_sanitized_keeps_valid_tuning() {
        let tuning = Tuning {
            gravity: 900.0,
            ..Tuning::default()
        };
        assert_eq!(tuning.clone().sanitized(), tuning);
    }

    proptest! {
        #[test]
        fn prop_dt_always_within_ceiling(dt in proptest::num::f32::ANY) {
            let used = Tuning::default().clamp_dt(dt);
            prop_assert!((0.0..=0.033).contains(&used));
        }

        #[test]
        fn prop_gap_within_bounds(score in 0u32..100_000) {
            let tuning = Tuning::default();
            let gap = tuning.gap_height(score);
            prop_assert!(gap >= tuning.gap_min && gap <= tuning.gap_max);
        }

        #[test]
        fn prop_difficulty_monotone(score in 0u32..10_000) {
            let tuning = Tuning::default();
            prop_assert!(tuning.obstacle_speed(score + 1) >= tuning.obstacle_speed(score));
            prop_assert!(tuning.spawn_interval(score + 1) <= tuning.spawn_interval(score));
            prop_assert!(tuning.gap_height(score + 1) <= tuning.gap_height(score));
            prop_assert!(tuning.impulse_velocity(score + 1) <= tuning.impulse_velocity(score));
        }

        #[test]
        fn prop_sanitized_gap_within_bounds(
            gap_min in proptest::num::f32::ANY,
            gap_max in proptest::num::f32::ANY,
            max_frame_dt in proptest::num::f32::ANY,
            score in 0u32..1000,
            dt in proptest::num::f32::ANY,
        ) {
            let tuning = Tuning { gap_min, gap_max, max_frame_dt, ..Tuning::default() }.sanitized();
            let gap = tuning.gap_height(score);
            prop_assert!(gap >= tuning.gap_min && gap <= tuning.gap_max);
            let used = tuning.clamp_dt(dt);
            prop_assert!(used >= 0.0 && used <= tuning.max_frame_dt);
        }
    }
}
