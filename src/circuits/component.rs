use std::fmt;
use std::sync::Arc;

use crate::constants::angular_frequency;
use crate::errors::{CircuitError, Result};
use crate::math::{CScalar, Scalar};
use crate::units::{Capacitance, Inductance, Quantity, Resistance};

use super::network::{Parallel, Series};
use super::terminal::TerminalPair;

/// Capability shared by every element of a network: an impedance between two
/// of its terminals at a given frequency.
pub trait Component {
    /// Returns the impedance between `pair` at `frequency` (Hz).
    ///
    /// `None` requests the value without a frequency; frequency-dependent
    /// elements answer [`CircuitError::UndefinedValue`].
    ///
    /// Leaves have no interior node and accept only [`TerminalPair::OUTER`];
    /// any other pair is [`CircuitError::InvalidTerminalPair`], not ignored.
    fn impedance(&self, frequency: Option<Scalar>, pair: TerminalPair) -> Result<CScalar>;

    /// Human-readable identifier (e.g. `Resistor [100 Ω]`).
    fn label(&self) -> &str;

    /// Connects `self` in series with `other`; `self` sits on the excitation side.
    fn connect_in_series_with<C>(self, other: C) -> Series
    where
        Self: Sized + Send + Sync + 'static,
        C: Component + Send + Sync + 'static,
    {
        Series::new(self, other)
    }

    /// Connects `self` in parallel with `other`.
    fn connect_in_parallel_with<C>(self, other: C) -> Parallel
    where
        Self: Sized + Send + Sync + 'static,
        C: Component + Send + Sync + 'static,
    {
        Parallel::new(self, other)
    }
}

impl<C: Component + ?Sized> Component for Arc<C> {
    fn impedance(&self, frequency: Option<Scalar>, pair: TerminalPair) -> Result<CScalar> {
        (**self).impedance(frequency, pair)
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn impedance(&self, frequency: Option<Scalar>, pair: TerminalPair) -> Result<CScalar> {
        (**self).impedance(frequency, pair)
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

// A leaf has no interior node, only its outer pair is addressable.
fn require_outer(label: &str, pair: TerminalPair) -> Result<()> {
    if pair.is_outer() {
        Ok(())
    } else {
        Err(CircuitError::invalid_pair(label, pair))
    }
}

fn require_frequency(label: &str, frequency: Option<Scalar>) -> Result<Scalar> {
    match frequency {
        None => Err(CircuitError::UndefinedValue {
            element: label.to_owned(),
        }),
        Some(f) if !f.is_finite() || f < 0.0 => Err(CircuitError::InvalidFrequency(f)),
        Some(f) => Ok(f),
    }
}

fn positive(name: &'static str, value: Scalar) -> Result<Scalar> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CircuitError::InvalidParameter { name, value })
    }
}

/// Lumped resistor model.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "raw::Resistor"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    label: String,
    resistance: Resistance<Scalar>,
}

impl Resistor {
    /// Creates a resistor. Zero ohms is an ideal short and is accepted.
    ///
    /// # Errors
    /// [`CircuitError::InvalidParameter`] for negative or non-finite values.
    pub fn new(resistance_ohms: Scalar) -> Result<Self> {
        if !resistance_ohms.is_finite() || resistance_ohms < 0.0 {
            return Err(CircuitError::InvalidParameter {
                name: "resistance",
                value: resistance_ohms,
            });
        }
        let resistance = Quantity::new(resistance_ohms);
        Ok(Self {
            label: format!("Resistor [{resistance}]"),
            resistance,
        })
    }

    /// Replaces the default label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Resistance magnitude in ohms.
    #[must_use]
    pub const fn resistance(&self) -> Scalar {
        self.resistance.value()
    }
}

impl Component for Resistor {
    fn impedance(&self, _frequency: Option<Scalar>, pair: TerminalPair) -> Result<CScalar> {
        require_outer(&self.label, pair)?;
        Ok(CScalar::new(self.resistance(), 0.0))
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Lumped capacitor model (ideal).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "raw::Capacitor"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Capacitor {
    label: String,
    capacitance: Capacitance<Scalar>,
}

impl Capacitor {
    /// Creates a capacitor.
    ///
    /// # Errors
    /// [`CircuitError::InvalidParameter`] unless the capacitance is finite and positive.
    pub fn new(capacitance_f: Scalar) -> Result<Self> {
        let capacitance = Quantity::new(positive("capacitance", capacitance_f)?);
        Ok(Self {
            label: format!("Capacitor [{capacitance}]"),
            capacitance,
        })
    }

    /// Replaces the default label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns the capacitance magnitude in farads.
    #[must_use]
    pub const fn capacitance(&self) -> Scalar {
        self.capacitance.value()
    }
}

impl Component for Capacitor {
    /// `1 / (j·2π·f·C)`; at DC the capacitor is open and the result is `0 - j·∞`.
    fn impedance(&self, frequency: Option<Scalar>, pair: TerminalPair) -> Result<CScalar> {
        require_outer(&self.label, pair)?;
        let omega = angular_frequency(require_frequency(&self.label, frequency)?);
        if omega == 0.0 {
            Ok(CScalar::new(0.0, Scalar::NEG_INFINITY))
        } else {
            Ok(CScalar::new(0.0, -1.0 / (omega * self.capacitance())))
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Lumped inductor model (ideal).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "raw::Inductor"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Inductor {
    label: String,
    inductance: Inductance<Scalar>,
}

impl Inductor {
    /// Creates an inductor.
    ///
    /// # Errors
    /// [`CircuitError::InvalidParameter`] unless the inductance is finite and positive.
    pub fn new(inductance_h: Scalar) -> Result<Self> {
        let inductance = Quantity::new(positive("inductance", inductance_h)?);
        Ok(Self {
            label: format!("Inductor [{inductance}]"),
            inductance,
        })
    }

    /// Replaces the default label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns the inductance magnitude in henries.
    #[must_use]
    pub const fn inductance(&self) -> Scalar {
        self.inductance.value()
    }
}

impl Component for Inductor {
    fn impedance(&self, frequency: Option<Scalar>, pair: TerminalPair) -> Result<CScalar> {
        require_outer(&self.label, pair)?;
        let omega = angular_frequency(require_frequency(&self.label, frequency)?);
        Ok(CScalar::new(0.0, omega * self.inductance()))
    }

    fn label(&self) -> &str {
        &self.label
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.label)
            }
        })*
    };
}

display_label!(Resistor, Capacitor, Inductor);

// Deserialized leaves go through the validating constructors.
#[cfg(feature = "serde")]
mod raw {
    use crate::errors::CircuitError;
    use crate::math::Scalar;

    macro_rules! raw_leaf {
        ($ty:ident, $field:ident) => {
            #[derive(serde::Deserialize)]
            pub(super) struct $ty {
                #[serde(default)]
                label: Option<String>,
                $field: Scalar,
            }

            impl TryFrom<$ty> for super::$ty {
                type Error = CircuitError;

                fn try_from(raw: $ty) -> Result<Self, Self::Error> {
                    let leaf = Self::new(raw.$field)?;
                    Ok(match raw.label {
                        Some(label) => leaf.with_label(label),
                        None => leaf,
                    })
                }
            }
        };
    }

    raw_leaf!(Resistor, resistance);
    raw_leaf!(Capacitor, capacitance);
    raw_leaf!(Inductor, inductance);
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn resistor_impedance_is_real_at_any_frequency() {
        let r = Resistor::new(100.0).unwrap();
        for f in [None, Some(0.0), Some(200.0), Some(1.0e6)] {
            let z = r.impedance(f, TerminalPair::OUTER).unwrap();
            assert_relative_eq!(z.re, 100.0);
            assert_relative_eq!(z.im, 0.0);
        }
    }

    #[test]
    fn zero_ohm_resistor_is_a_short() {
        let r = Resistor::new(0.0).unwrap();
        assert_eq!(r.impedance(Some(50.0), TerminalPair::OUTER).unwrap(), CScalar::new(0.0, 0.0));
        assert!(Resistor::new(-1.0).is_err());
        assert!(Resistor::new(Scalar::NAN).is_err());
    }

    #[test]
    fn capacitor_impedance_is_reactive() {
        let c = Capacitor::new(1e-6).unwrap();
        let z = c.impedance(Some(200.0), TerminalPair::OUTER).unwrap();
        let expected = CScalar::new(0.0, 2.0 * PI * 200.0 * 1e-6).inv();
        assert_relative_eq!(z.re, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(z.im, expected.im, epsilon = 1.0e-9);
        assert!(z.im < 0.0);
    }

    #[test]
    fn capacitor_is_undefined_without_frequency() {
        let c = Capacitor::new(1e-6).unwrap();
        let err = c.impedance(None, TerminalPair::OUTER).unwrap_err();
        assert!(err.is_undefined());
    }

    #[test]
    fn capacitor_at_dc_is_open() {
        let c = Capacitor::new(1e-6).unwrap();
        let z = c.impedance(Some(0.0), TerminalPair::OUTER).unwrap();
        assert_eq!(z.re, 0.0);
        assert_eq!(z.im, Scalar::NEG_INFINITY);
    }

    #[test]
    fn inductor_impedance_grows_with_frequency() {
        let l = Inductor::new(1e-3).unwrap();
        let z = l.impedance(Some(200.0), TerminalPair::OUTER).unwrap();
        assert_relative_eq!(z.im, 2.0 * PI * 200.0 * 1e-3, epsilon = 1.0e-12);
        assert_eq!(l.impedance(Some(0.0), TerminalPair::OUTER).unwrap(), CScalar::new(0.0, 0.0));
        assert!(l.impedance(None, TerminalPair::OUTER).unwrap_err().is_undefined());
    }

    #[test]
    fn leaves_reject_interior_terminals() {
        let r = Resistor::new(100.0).unwrap();
        let err = r.impedance(None, TerminalPair::from((2, 0))).unwrap_err();
        assert!(matches!(err, CircuitError::InvalidTerminalPair { .. }));
    }

    #[test]
    fn reactive_parameters_must_be_finite_and_positive() {
        for value in [0.0, -1e-3, Scalar::NAN, Scalar::INFINITY] {
            assert!(
                matches!(Capacitor::new(value), Err(CircuitError::InvalidParameter { name: "capacitance", .. })),
                "capacitance {value}"
            );
            assert!(
                matches!(Inductor::new(value), Err(CircuitError::InvalidParameter { name: "inductance", .. })),
                "inductance {value}"
            );
        }
        assert!(Resistor::new(Scalar::INFINITY).is_err());
    }

    #[test]
    fn non_finite_frequency_is_rejected() {
        let c = Capacitor::new(1e-6).unwrap();
        let l = Inductor::new(1e-3).unwrap();
        for f in [Scalar::INFINITY, Scalar::NEG_INFINITY] {
            assert_eq!(
                c.impedance(Some(f), TerminalPair::OUTER).unwrap_err(),
                CircuitError::InvalidFrequency(f)
            );
            assert_eq!(
                l.impedance(Some(f), TerminalPair::OUTER).unwrap_err(),
                CircuitError::InvalidFrequency(f)
            );
        }
        assert!(matches!(
            c.impedance(Some(Scalar::NAN), TerminalPair::OUTER),
            Err(CircuitError::InvalidFrequency(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates_parameters() {
        assert!(serde_json::from_str::<Resistor>(r#"{"resistance":-5.0}"#).is_err());
        assert!(serde_json::from_str::<Resistor>(r#"{"label":"bad","resistance":-5.0}"#).is_err());
        assert!(serde_json::from_str::<Capacitor>(r#"{"capacitance":0.0}"#).is_err());
        assert!(serde_json::from_str::<Inductor>(r#"{"inductance":-1e-3}"#).is_err());

        let r: Resistor = serde_json::from_str(r#"{"resistance":100.0}"#).unwrap();
        assert_eq!(r.label(), "Resistor [100 Ω]");
        let l: Inductor = serde_json::from_str(r#"{"label":"L1","inductance":1e-3}"#).unwrap();
        assert_eq!(l.label(), "L1");
        assert_eq!(l.inductance(), 1e-3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_leaf_deserializes_to_equal_value() {
        let c = Capacitor::new(4.7e-6).unwrap().with_label("C1");
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<Capacitor>(&json).unwrap(), c);
    }

    #[test]
    fn negative_frequency_is_rejected() {
        let l = Inductor::new(1e-3).unwrap();
        assert_eq!(
            l.impedance(Some(-1.0), TerminalPair::OUTER).unwrap_err(),
            CircuitError::InvalidFrequency(-1.0)
        );
    }

    #[test]
    fn default_labels_name_kind_and_value() {
        assert_eq!(Resistor::new(100.0).unwrap().label(), "Resistor [100 Ω]");
        assert_eq!(Inductor::new(1e-3).unwrap().to_string(), "Inductor [0.001 H]");
        assert_eq!(Capacitor::new(1e-6).unwrap().with_label("C1").label(), "C1");
    }
}
