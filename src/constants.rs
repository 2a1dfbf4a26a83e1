//! Baseline constants and frequency conversions.

use std::f64::consts::PI;

/// Lower bound of the default sweep, in hertz.
pub const DEFAULT_SWEEP_START_HZ: f64 = 1.0e-1;
/// Upper bound of the default sweep, in hertz.
pub const DEFAULT_SWEEP_STOP_HZ: f64 = 1.0e6;
/// Number of points in the default sweep.
pub const DEFAULT_SWEEP_POINTS: usize = 100;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn angular_frequency_of_one_kilohertz() {
        assert_relative_eq!(angular_frequency(1.0e3), 6_283.185_307_179_586, max_relative = 1.0e-12);
        assert_eq!(angular_frequency(0.0), 0.0);
    }
}
