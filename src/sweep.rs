//! Frequency sweep utilities and post-processing helpers.
//!
//! A sweep is a pure function of its [`FrequencyRange`]: iterating the same
//! range twice yields identical points. Each point carries its own `Result`,
//! so a frequency that cannot be evaluated is reported without aborting the
//! rest of the sweep.

use num_complex::Complex;

use crate::circuits::component::Component;
use crate::circuits::terminal::{Terminal, TerminalPair};
use crate::circuits::voltage::voltage_at;
use crate::constants::{DEFAULT_SWEEP_POINTS, DEFAULT_SWEEP_START_HZ, DEFAULT_SWEEP_STOP_HZ};
use crate::errors::{CircuitError, Result};
use crate::math::{CScalar, Scalar};

/// Spacing of the points between the ends of a [`FrequencyRange`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    /// Evenly spaced in hertz.
    Linear,
    /// Evenly spaced in decades.
    #[default]
    Logarithmic,
}

/// Inclusive frequency range sampled at `points` frequencies.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyRange {
    /// First frequency in hertz.
    pub start_hz: Scalar,
    /// Last frequency in hertz.
    pub stop_hz: Scalar,
    /// Number of samples, both ends included.
    pub points: usize,
    /// Point spacing.
    pub spacing: Spacing,
}

impl FrequencyRange {
    /// Logarithmically spaced range; both ends must be positive.
    #[must_use]
    pub const fn log(start_hz: Scalar, stop_hz: Scalar, points: usize) -> Self {
        Self {
            start_hz,
            stop_hz,
            points,
            spacing: Spacing::Logarithmic,
        }
    }

    /// Linearly spaced range; both ends must be non-negative.
    #[must_use]
    pub const fn linear(start_hz: Scalar, stop_hz: Scalar, points: usize) -> Self {
        Self {
            start_hz,
            stop_hz,
            points,
            spacing: Spacing::Linear,
        }
    }

    /// Checks that the ends are finite and admissible for the spacing.
    ///
    /// # Errors
    /// [`CircuitError::InvalidRange`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("start", self.start_hz), ("stop", self.stop_hz)] {
            if !value.is_finite() {
                return Err(CircuitError::InvalidRange(format!("{name} frequency {value} is not finite")));
            }
            match self.spacing {
                Spacing::Logarithmic if value <= 0.0 => {
                    return Err(CircuitError::InvalidRange(format!(
                        "{name} frequency {value} must be positive for a logarithmic sweep"
                    )));
                }
                Spacing::Linear if value < 0.0 => {
                    return Err(CircuitError::InvalidRange(format!(
                        "{name} frequency {value} must not be negative"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Lazy iterator over the sampled frequencies.
    ///
    /// # Errors
    /// Same as [`FrequencyRange::validate`].
    pub fn frequencies(&self) -> Result<Frequencies> {
        self.validate()?;
        let (origin, stop) = match self.spacing {
            Spacing::Linear => (self.start_hz, self.stop_hz),
            Spacing::Logarithmic => (self.start_hz.log10(), self.stop_hz.log10()),
        };
        let step = if self.points > 1 {
            (stop - origin) / (self.points as Scalar - 1.0)
        } else {
            0.0
        };
        Ok(Frequencies {
            range: *self,
            origin,
            step,
            front: 0,
            back: self.points,
        })
    }
}

impl Default for FrequencyRange {
    fn default() -> Self {
        Self::log(DEFAULT_SWEEP_START_HZ, DEFAULT_SWEEP_STOP_HZ, DEFAULT_SWEEP_POINTS)
    }
}

/// Iterator returned by [`FrequencyRange::frequencies`].
#[derive(Debug, Clone)]
pub struct Frequencies {
    range: FrequencyRange,
    origin: Scalar,
    step: Scalar,
    front: usize,
    back: usize,
}

impl Frequencies {
    fn at(&self, index: usize) -> Scalar {
        // Pin both ends so the range bounds are hit exactly.
        if index == 0 {
            return self.range.start_hz;
        }
        if index + 1 == self.range.points {
            return self.range.stop_hz;
        }
        let position = self.origin + self.step * index as Scalar;
        match self.range.spacing {
            Spacing::Linear => position,
            Spacing::Logarithmic => 10f64.powf(position),
        }
    }
}

impl Iterator for Frequencies {
    type Item = Scalar;

    fn next(&mut self) -> Option<Scalar> {
        if self.front >= self.back {
            return None;
        }
        let f = self.at(self.front);
        self.front += 1;
        Some(f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Frequencies {
    fn next_back(&mut self) -> Option<Scalar> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.at(self.back))
    }
}

impl ExactSizeIterator for Frequencies {}

/// Evaluated value at one swept frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsePoint {
    /// Frequency in hertz.
    pub frequency: Scalar,
    /// Impedance or voltage at `frequency`, or why it could not be evaluated.
    pub value: Result<CScalar>,
}

impl ResponsePoint {
    /// `|value|`, when defined.
    #[must_use]
    pub fn amplitude(&self) -> Option<Scalar> {
        self.value.as_ref().ok().map(|v| v.norm())
    }

    /// `arg(value)` in radians, when defined.
    #[must_use]
    pub fn phase(&self) -> Option<Scalar> {
        self.value.as_ref().ok().map(|v| v.arg())
    }

    /// Amplitude/phase form handed to plotting front ends.
    #[must_use]
    pub fn bode(&self) -> Option<BodePoint> {
        self.value.as_ref().ok().map(|v| BodePoint {
            frequency: self.frequency,
            amplitude: v.norm(),
            phase: v.arg(),
        })
    }
}

/// `(frequency, amplitude, phase)` triple of a defined response point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodePoint {
    /// Frequency in hertz.
    pub frequency: Scalar,
    /// Magnitude of the response.
    pub amplitude: Scalar,
    /// Phase of the response in radians.
    pub phase: Scalar,
}

/// Applies `eval` at every frequency of `range`.
///
/// # Errors
/// [`CircuitError::InvalidRange`] if the range is malformed; per-point failures
/// are carried in [`ResponsePoint::value`].
pub fn response<F>(range: &FrequencyRange, mut eval: F) -> Result<impl Iterator<Item = ResponsePoint>>
where
    F: FnMut(Scalar) -> Result<CScalar>,
{
    Ok(range.frequencies()?.map(move |frequency| {
        let value = eval(frequency);
        if let Err(err) = &value {
            log::debug!("sweep point at {frequency} Hz is undefined: {err}");
        }
        ResponsePoint { frequency, value }
    }))
}

/// Impedance of `element` between `pair` across `range`.
///
/// # Errors
/// Same as [`response`].
pub fn impedance_response<'a, E>(
    element: &'a E,
    pair: TerminalPair,
    range: &FrequencyRange,
) -> Result<impl Iterator<Item = ResponsePoint> + 'a>
where
    E: Component + ?Sized,
{
    response(range, move |f| element.impedance(Some(f), pair))
}

/// Voltage at `terminal` of `element` driven by `source` across `range`.
///
/// # Errors
/// Same as [`response`].
pub fn voltage_response<'a, E>(
    element: &'a E,
    terminal: Terminal,
    source: CScalar,
    range: &FrequencyRange,
) -> Result<impl Iterator<Item = ResponsePoint> + 'a>
where
    E: Component + ?Sized,
{
    response(range, move |f| voltage_at(element, terminal, source, Some(f)))
}

/// Keeps the defined points of a sweep in amplitude/phase form.
#[must_use]
pub fn bode(points: impl IntoIterator<Item = ResponsePoint>) -> Vec<BodePoint> {
    let mut skipped = 0usize;
    let out: Vec<BodePoint> = points
        .into_iter()
        .filter_map(|p| {
            let b = p.bode();
            if b.is_none() {
                skipped += 1;
            }
            b
        })
        .collect();
    log::debug!("collected {} bode points, skipped {skipped}", out.len());
    out
}

/// Impedance sweep evaluated on the rayon thread pool, ordered by frequency.
///
/// # Errors
/// Same as [`response`].
#[cfg(feature = "parallel")]
pub fn par_impedance_response<E>(
    element: &E,
    pair: TerminalPair,
    range: &FrequencyRange,
) -> Result<Vec<ResponsePoint>>
where
    E: Component + Sync + ?Sized,
{
    par_response(range, |f| element.impedance(Some(f), pair))
}

/// Voltage sweep evaluated on the rayon thread pool, ordered by frequency.
///
/// # Errors
/// Same as [`response`].
#[cfg(feature = "parallel")]
pub fn par_voltage_response<E>(
    element: &E,
    terminal: Terminal,
    source: CScalar,
    range: &FrequencyRange,
) -> Result<Vec<ResponsePoint>>
where
    E: Component + Sync + ?Sized,
{
    par_response(range, |f| voltage_at(element, terminal, source, Some(f)))
}

#[cfg(feature = "parallel")]
fn par_response<F>(range: &FrequencyRange, eval: F) -> Result<Vec<ResponsePoint>>
where
    F: Fn(Scalar) -> Result<CScalar> + Sync,
{
    use rayon::prelude::*;

    let frequencies: Vec<Scalar> = range.frequencies()?.collect();
    Ok(frequencies
        .into_par_iter()
        .map(|frequency| ResponsePoint {
            frequency,
            value: eval(frequency),
        })
        .collect())
}

/// Generates `n` logarithmically spaced samples between `start_hz` and `stop_hz`.
///
/// # Errors
/// [`CircuitError::InvalidRange`] unless both ends are finite and positive.
pub fn logspace_hz(start_hz: Scalar, stop_hz: Scalar, n: usize) -> Result<Vec<Scalar>> {
    Ok(FrequencyRange::log(start_hz, stop_hz, n).frequencies()?.collect())
}

/// Magnitude of complex sequence.
#[must_use]
pub fn mag(values: impl IntoIterator<Item = Complex<Scalar>>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.norm()).collect()
}

/// Magnitude in dB (20*log10(|x|)), clamping very small values.
#[must_use]
pub fn mag_db(values: impl IntoIterator<Item = Complex<Scalar>>) -> Vec<Scalar> {
    const MIN: Scalar = 1e-300;
    values
        .into_iter()
        .map(|v| 20.0 * (v.norm().max(MIN)).log10())
        .collect()
}

/// Phase in radians of complex sequence.
#[must_use]
pub fn phase_rad(values: impl IntoIterator<Item = Complex<Scalar>>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.arg()).collect()
}

/// Phase in degrees of complex sequence.
#[must_use]
pub fn phase_deg(values: impl IntoIterator<Item = Complex<Scalar>>) -> Vec<Scalar> {
    phase_rad(values).into_iter().map(|r| r.to_degrees()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::component::{Capacitor, Inductor, Resistor};
    use crate::circuits::network::Series;
    use approx::assert_relative_eq;

    #[test]
    fn default_range_spans_seven_decades() {
        let f: Vec<Scalar> = FrequencyRange::default().frequencies().unwrap().collect();
        assert_eq!(f.len(), 100);
        assert_eq!(f[0], 0.1);
        assert_eq!(f[99], 1.0e6);
        assert!(f.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn logspace_hits_decades() {
        let f = logspace_hz(1.0, 1.0e3, 4).unwrap();
        for (got, want) in f.iter().zip([1.0, 10.0, 100.0, 1000.0]) {
            assert_relative_eq!(*got, want, max_relative = 1e-12);
        }
        assert!(logspace_hz(0.0, 1.0e3, 4).is_err());
    }

    #[test]
    fn frequencies_are_restartable_and_reversible() {
        let range = FrequencyRange::linear(0.0, 10.0, 11);
        let forward: Vec<Scalar> = range.frequencies().unwrap().collect();
        let again: Vec<Scalar> = range.frequencies().unwrap().collect();
        let mut backward: Vec<Scalar> = range.frequencies().unwrap().rev().collect();
        backward.reverse();
        assert_eq!(forward, again);
        assert_eq!(forward, backward);
        assert_eq!(range.frequencies().unwrap().len(), 11);
    }

    #[test]
    fn degenerate_ranges() {
        assert_eq!(FrequencyRange::log(5.0, 50.0, 0).frequencies().unwrap().count(), 0);
        let single: Vec<Scalar> = FrequencyRange::log(5.0, 50.0, 1).frequencies().unwrap().collect();
        assert_eq!(single, vec![5.0]);
        assert!(FrequencyRange::linear(-1.0, 10.0, 3).validate().is_err());
        assert!(FrequencyRange::linear(0.0, Scalar::INFINITY, 3).validate().is_err());
    }

    #[test]
    fn impedance_response_tracks_resistor() {
        let r = Resistor::new(100.0).unwrap();
        let points: Vec<ResponsePoint> =
            impedance_response(&r, TerminalPair::OUTER, &FrequencyRange::default()).unwrap().collect();
        assert_eq!(points.len(), 100);
        assert!(points.iter().all(|p| p.amplitude() == Some(100.0) && p.phase() == Some(0.0)));
    }

    #[test]
    fn undefined_points_do_not_abort_sweep() {
        // Zero total impedance at DC, purely inductive everywhere else.
        let shorted = Series::new(Resistor::new(0.0).unwrap(), Inductor::new(1e-3).unwrap());
        let range = FrequencyRange::linear(0.0, 2.0, 3);
        let points: Vec<ResponsePoint> =
            voltage_response(&shorted, Terminal::JUNCTION, CScalar::new(1.0, 0.0), &range)
                .unwrap()
                .collect();
        assert_eq!(points.len(), 3);
        assert!(matches!(
            points[0].value,
            Err(CircuitError::DivisionSingularity { .. })
        ));
        assert_eq!(points[0].amplitude(), None);
        let kept = bode(points);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|b| (b.amplitude - 1.0).abs() < 1e-12));
    }

    #[test]
    fn capacitor_sweep_phase_is_minus_quarter_turn() {
        let c = Capacitor::new(1e-6).unwrap();
        let range = FrequencyRange::log(10.0, 1.0e4, 4);
        for p in impedance_response(&c, TerminalPair::OUTER, &range).unwrap() {
            assert_relative_eq!(p.phase().unwrap(), -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
            assert_relative_eq!(
                p.amplitude().unwrap(),
                1.0 / (2.0 * std::f64::consts::PI * p.frequency * 1e-6),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn mag_phase_roundtrip() {
        let x = vec![Complex::new(1.0, 0.0), Complex::new(0.0, 1.0)];
        let m = mag(x.clone());
        let p = phase_deg(x);
        assert_relative_eq!(m[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 90.0, epsilon = 1e-12);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_sweep_matches_sequential() {
        let net = Series::new(Resistor::new(1.0e4).unwrap(), Capacitor::new(1e-6).unwrap());
        let range = FrequencyRange::default();
        let seq: Vec<ResponsePoint> =
            voltage_response(&net, Terminal::JUNCTION, CScalar::new(1.0, 0.0), &range).unwrap().collect();
        let par = par_voltage_response(&net, Terminal::JUNCTION, CScalar::new(1.0, 0.0), &range).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn mag_db_of_decade() {
        let db = mag_db([Complex::new(10.0, 0.0), Complex::new(0.0, 0.0)]);
        assert_relative_eq!(db[0], 20.0, epsilon = 1e-12);
        assert_relative_eq!(db[1], -6000.0, epsilon = 1e-9);
    }
}
