//! Angular kinematics. Pure math, no engine dependencies.
//!
//! Every angular velocity in the engine is expressed in radians per
//! simulated day. Periods are signed: a negative period spins the other way.

use std::f64::consts::TAU;

/// Ratio converting hours into days.
pub const HOURS_TO_DAYS: f64 = 1.0 / 24.0;

/// Angular velocity (rad/day) for a period given in some time unit.
///
/// `unit_to_day_ratio` converts one unit of `period` into days
/// (1.0 for days, 1/24 for hours). A zero or non-finite period means the
/// body does not move, so the velocity is 0. The sign of `period` carries
/// through to the result.
#[inline]
pub fn angular_velocity(period: f64, unit_to_day_ratio: f64) -> f64 {
    let period_days = period * unit_to_day_ratio;
    if period_days == 0.0 || !period_days.is_finite() {
        return 0.0;
    }
    TAU / period_days
}

/// Orbital angular velocity from a period in days.
#[inline]
pub fn orbital_velocity(period_days: f64) -> f64 {
    angular_velocity(period_days, 1.0)
}

/// Spin angular velocity from a (signed) rotation period in hours.
#[inline]
pub fn spin_velocity(period_hours: f64) -> f64 {
    angular_velocity(period_hours, HOURS_TO_DAYS)
}

/// Wrap an angle into [0, 2π).
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Shortest signed distance between two angles, in (-π, π].
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let d = wrap_angle(a - b);
    if d > std::f64::consts::PI { d - TAU } else { d }
}
