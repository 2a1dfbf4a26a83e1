//! Error type shared by every impedance and voltage query.

use thiserror::Error;

use crate::circuits::terminal::{Terminal, TerminalPair};
use crate::math::Scalar;

/// Errors returned by component construction, queries and sweeps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    /// A frequency-dependent element was queried without a frequency.
    #[error("`{element}` has no value without a frequency")]
    UndefinedValue {
        /// Label of the element that could not be evaluated.
        element: String,
    },
    /// The terminal combination is not defined for this element.
    #[error("`{element}` has no terminal pair ({plus}, {minus})")]
    InvalidTerminalPair {
        /// Label of the queried element.
        element: String,
        /// Requested positive terminal.
        plus: Terminal,
        /// Requested negative terminal.
        minus: Terminal,
    },
    /// The divider would require dividing by a zero or unresolvable total impedance.
    #[error("voltage across `{element}` is singular at this frequency")]
    DivisionSingularity {
        /// Label of the element whose divider failed.
        element: String,
    },
    /// A component parameter is out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name, e.g. `resistance`.
        name: &'static str,
        /// Rejected value.
        value: Scalar,
    },
    /// Frequencies must be finite and non-negative.
    #[error("invalid frequency: {0} Hz")]
    InvalidFrequency(Scalar),
    /// A sweep range is malformed.
    #[error("invalid frequency range: {0}")]
    InvalidRange(String),
}

impl CircuitError {
    pub(crate) fn invalid_pair(element: impl Into<String>, pair: TerminalPair) -> Self {
        Self::InvalidTerminalPair {
            element: element.into(),
            plus: pair.plus,
            minus: pair.minus,
        }
    }

    /// True for [`CircuitError::UndefinedValue`], the "not yet evaluable" result.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::UndefinedValue { .. })
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CircuitError>;
