//! Passive two-terminal elements and their series/parallel composition.

/// Lumped component definitions and the shared `Component` trait.
pub mod component;
/// Voltage dividers and op-amp input pairs.
pub mod divider;
/// Series and parallel composite elements.
pub mod network;
/// Terminal numbering and terminal pairs.
pub mod terminal;
/// Kirchhoff voltage-divider evaluation.
pub mod voltage;

pub use component::{Capacitor, Component, Inductor, Resistor};
pub use divider::{Divider, InputVoltages, OpAmpInputs};
pub use network::{connect, connect_in_parallel, connect_in_series, ConnectionKind, Element, Parallel, Series};
pub use terminal::{Terminal, TerminalPair};
pub use voltage::{impedance, unit_voltage_at, voltage_at, UNIT_SOURCE};

use crate::errors::Result;
use crate::math::Scalar;

/// Creates a resistor of `ohms`.
///
/// # Errors
/// See [`Resistor::new`].
pub fn resistor(ohms: Scalar) -> Result<Resistor> {
    Resistor::new(ohms)
}

/// Creates a capacitor of `farads`.
///
/// # Errors
/// See [`Capacitor::new`].
pub fn capacitor(farads: Scalar) -> Result<Capacitor> {
    Capacitor::new(farads)
}

/// Creates an inductor of `henries`.
///
/// # Errors
/// See [`Inductor::new`].
pub fn inductor(henries: Scalar) -> Result<Inductor> {
    Inductor::new(henries)
}
