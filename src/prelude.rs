//! Convenience re-exports for building and querying networks.

pub use crate::circuits::{
    capacitor, connect, connect_in_parallel, connect_in_series, impedance, inductor, resistor,
    unit_voltage_at, voltage_at, Capacitor, Component, ConnectionKind, Divider, Element, Inductor,
    InputVoltages, OpAmpInputs, Parallel, Resistor, Series, Terminal, TerminalPair, UNIT_SOURCE,
};
pub use crate::constants::angular_frequency;
pub use crate::errors::{CircuitError, Result};
pub use crate::math::{CScalar, Scalar};
pub use crate::sweep::{
    bode, impedance_response, logspace_hz, mag, mag_db, phase_deg, phase_rad, response,
    voltage_response, BodePoint, FrequencyRange, ResponsePoint, Spacing,
};
#[cfg(feature = "parallel")]
pub use crate::sweep::{par_impedance_response, par_voltage_response};
pub use crate::units::{Capacitance, Inductance, Quantity, Resistance, Unit};
