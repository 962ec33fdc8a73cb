//! Unit conversion between steps, distance, calories and walking time.
//!
//! All constants are fixed; none of them can come from user input.

/// Average step length in kilometres.
pub const STEP_LENGTH_KM: f64 = 0.000762;
pub const CALORIES_PER_STEP: f64 = 0.04;
/// Average walking speed, km/h. Must stay positive.
pub const WALKING_SPEED_KMH: f64 = 5.0;
pub const ML_PER_GLASS: i64 = 250;

pub fn steps_to_km(steps: i64) -> f64 {
    steps as f64 * STEP_LENGTH_KM
}

/// Whole steps needed to cover `km`, rounded down.
pub fn km_to_steps(km: f64) -> i64 {
    (km / STEP_LENGTH_KM).floor() as i64
}

pub fn calories_from_steps(steps: i64) -> f64 {
    steps as f64 * CALORIES_PER_STEP
}

pub fn walking_minutes(km: f64) -> f64 {
    (km / WALKING_SPEED_KMH) * 60.0
}

pub fn glasses_to_ml(glasses: i64) -> i64 {
    glasses * ML_PER_GLASS
}

/// `value` as a percentage of `goal`; 0 when the goal is not positive.
pub fn goal_percent(value: f64, goal: f64) -> f64 {
    if goal > 0.0 { value / goal * 100.0 } else { 0.0 }
}
