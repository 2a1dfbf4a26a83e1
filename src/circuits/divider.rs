//! Voltage dividers and the paired dividers feeding an op-amp's inputs.

use crate::errors::Result;
use crate::math::{CScalar, Scalar};
use crate::sweep::{response, FrequencyRange, ResponsePoint};

use super::component::Component;
use super::network::{Element, Series};
use super::terminal::Terminal;
use super::voltage::{unit_voltage_at, voltage_at};

/// Series pair whose junction is the output: `top` goes to the source, `bottom` to ground.
#[derive(Debug, Clone)]
pub struct Divider {
    chain: Series,
}

impl Divider {
    /// Creates a divider.
    #[must_use]
    pub fn new<A, B>(top: A, bottom: B) -> Self
    where
        A: Component + Send + Sync + 'static,
        B: Component + Send + Sync + 'static,
    {
        Self {
            chain: Series::new(top, bottom),
        }
    }

    /// Creates a divider from shared handles, e.g. one element reused in two dividers.
    #[must_use]
    pub fn from_elements(top: Element, bottom: Element) -> Self {
        Self {
            chain: Series::from_elements(top, bottom),
        }
    }

    /// Underlying series element.
    #[must_use]
    pub const fn chain(&self) -> &Series {
        &self.chain
    }

    /// Output/input ratio `Z(bottom) / (Z(top) + Z(bottom))` at `frequency`.
    ///
    /// # Errors
    /// See [`voltage_at`].
    pub fn transfer(&self, frequency: Scalar) -> Result<CScalar> {
        unit_voltage_at(&self.chain, Terminal::JUNCTION, Some(frequency))
    }

    /// Output voltage for a source `vs` at `frequency`.
    ///
    /// # Errors
    /// See [`voltage_at`].
    pub fn output(&self, vs: CScalar, frequency: Scalar) -> Result<CScalar> {
        voltage_at(&self.chain, Terminal::JUNCTION, vs, Some(frequency))
    }

    /// Transfer ratio across `range`.
    ///
    /// # Errors
    /// [`crate::errors::CircuitError::InvalidRange`] for a malformed range.
    pub fn response<'a>(&'a self, range: &FrequencyRange) -> Result<impl Iterator<Item = ResponsePoint> + 'a> {
        response(range, move |f| self.transfer(f))
    }
}

/// Voltages presented to both inputs of an op-amp at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputVoltages {
    /// Frequency in hertz.
    pub frequency: Scalar,
    /// Non-inverting input `v+`.
    pub non_inverting: CScalar,
    /// Inverting input `v-`.
    pub inverting: CScalar,
}

impl InputVoltages {
    /// `v+ - v-`.
    #[must_use]
    pub fn differential(&self) -> CScalar {
        self.non_inverting - self.inverting
    }
}

/// Two dividers driven by the same source, one per op-amp input.
#[derive(Debug, Clone)]
pub struct OpAmpInputs {
    /// Divider feeding the non-inverting input.
    pub non_inverting: Divider,
    /// Divider feeding the inverting input.
    pub inverting: Divider,
}

impl OpAmpInputs {
    /// Pairs two dividers.
    #[must_use]
    pub const fn new(non_inverting: Divider, inverting: Divider) -> Self {
        Self {
            non_inverting,
            inverting,
        }
    }

    /// Both input voltages for a unit source at `frequency`.
    ///
    /// # Errors
    /// The first failing divider's error.
    pub fn inputs(&self, frequency: Scalar) -> Result<InputVoltages> {
        Ok(InputVoltages {
            frequency,
            non_inverting: self.non_inverting.transfer(frequency)?,
            inverting: self.inverting.transfer(frequency)?,
        })
    }

    /// Differential input `v+ - v-` for a unit source.
    ///
    /// # Errors
    /// Same as [`OpAmpInputs::inputs`].
    pub fn differential(&self, frequency: Scalar) -> Result<CScalar> {
        self.inputs(frequency).map(|v| v.differential())
    }

    /// Input voltages across `range`, one result per frequency.
    ///
    /// # Errors
    /// [`crate::errors::CircuitError::InvalidRange`] for a malformed range.
    pub fn response<'a>(
        &'a self,
        range: &FrequencyRange,
    ) -> Result<impl Iterator<Item = (Scalar, Result<InputVoltages>)> + 'a> {
        Ok(range.frequencies()?.map(move |f| (f, self.inputs(f))))
    }
}
