//! Voltage-divider evaluation shared by every element.
//!
//! With a source `vs` across terminals 1 and 0, the total current is
//! `vs / Z(1, 0)` and the voltage at terminal `t` against ground is
//! `Z(t, 0) · vs / Z(1, 0)`. The same function serves leaves and composites.

use crate::errors::{CircuitError, Result};
use crate::math::{admittance, is_infinite, is_zero, CScalar, Scalar, ONE, ZERO};

use super::component::Component;
use super::terminal::{Terminal, TerminalPair};

/// Default source amplitude, one volt at zero phase.
pub const UNIT_SOURCE: CScalar = ONE;

/// Impedance of `element` between `pair` at `frequency` (Hz).
///
/// # Errors
/// Propagates [`CircuitError::UndefinedValue`] and [`CircuitError::InvalidTerminalPair`].
pub fn impedance<E: Component + ?Sized>(
    element: &E,
    frequency: Option<Scalar>,
    pair: TerminalPair,
) -> Result<CScalar> {
    element.impedance(frequency, pair)
}

/// Voltage at `terminal` against ground with `source` applied across the outer terminals.
///
/// Terminal 1 always reads `source` exactly. When the direct ratio
/// `Z(t, 0) / Z(1, 0)` is not finite, the divider is re-evaluated in
/// admittance form `Y(1, t) / (Y(1, t) + Y(t, 0))`.
///
/// Only the values at the requested frequency are used, no limits are taken.
/// When both sides of the node are open (two capacitors in series at exactly
/// 0 Hz) or both are shorted, the node is floating and the result is
/// [`CircuitError::DivisionSingularity`], even though the limit `f -> 0` may
/// exist. Sweep from a small positive frequency to obtain that limit.
///
/// # Errors
/// [`CircuitError::InvalidTerminalPair`] when `terminal` is not addressable,
/// [`CircuitError::UndefinedValue`] when a child needs a frequency, and
/// [`CircuitError::DivisionSingularity`] when neither form resolves.
pub fn voltage_at<E: Component + ?Sized>(
    element: &E,
    terminal: Terminal,
    source: CScalar,
    frequency: Option<Scalar>,
) -> Result<CScalar> {
    let z_total = element.impedance(frequency, TerminalPair::OUTER)?;
    if terminal == Terminal::EXCITATION {
        return Ok(source);
    }
    if terminal == Terminal::GROUND {
        return Err(CircuitError::invalid_pair(
            element.label(),
            TerminalPair::to_ground(terminal),
        ));
    }
    let z_lower = element.impedance(frequency, TerminalPair::to_ground(terminal))?;
    let ratio = z_lower / z_total;
    if ratio.is_finite() {
        return Ok(ratio * source);
    }

    log::trace!(
        "direct divider ratio for `{}` at terminal {terminal} is {ratio}, using admittance form",
        element.label()
    );
    let z_upper = element.impedance(frequency, TerminalPair::from_excitation(terminal))?;
    match admittance_ratio(admittance(z_upper), admittance(z_lower)) {
        Some(ratio) => Ok(ratio * source),
        None => Err(CircuitError::DivisionSingularity {
            element: element.label().to_owned(),
        }),
    }
}

// Fraction of the source seen across the lower branch, `Yu / (Yu + Yl)`.
fn admittance_ratio(y_upper: CScalar, y_lower: CScalar) -> Option<CScalar> {
    match (is_infinite(y_upper), is_infinite(y_lower)) {
        (true, true) => None,
        (true, false) => Some(ONE),
        (false, true) => Some(ZERO),
        (false, false) => {
            let sum = y_upper + y_lower;
            if is_zero(sum) {
                return None;
            }
            Some(y_upper / sum).filter(|r| r.is_finite())
        }
    }
}

/// Voltage at `terminal` for a one-volt source.
///
/// # Errors
/// Same as [`voltage_at`].
pub fn unit_voltage_at<E: Component + ?Sized>(
    element: &E,
    terminal: Terminal,
    frequency: Option<Scalar>,
) -> Result<CScalar> {
    voltage_at(element, terminal, UNIT_SOURCE, frequency)
}
