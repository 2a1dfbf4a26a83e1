use std::fmt;
use std::sync::Arc;

use crate::errors::{CircuitError, Result};
use crate::math::{admittance, is_infinite, is_zero, CScalar, Scalar, OPEN, ZERO};

use super::component::Component;
use super::terminal::TerminalPair;

/// Shared handle to any element, leaf or composite.
pub type Element = Arc<dyn Component + Send + Sync>;

/// Connection topology of a composite element.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Series connection (impedances add linearly).
    Series,
    /// Parallel connection (admittances add linearly).
    Parallel,
}

/// Two elements in series.
///
/// Terminal 1 is the free end of `left`, terminal 0 the free end of `right`
/// and terminal 2 the junction between them.
#[derive(Clone)]
pub struct Series {
    label: String,
    left: Element,
    right: Element,
}

impl Series {
    /// Creates a series element; `left` sits on the excitation side.
    #[must_use]
    pub fn new<A, B>(left: A, right: B) -> Self
    where
        A: Component + Send + Sync + 'static,
        B: Component + Send + Sync + 'static,
    {
        Self::from_elements(Arc::new(left), Arc::new(right))
    }

    /// Creates a series element from already shared handles.
    #[must_use]
    pub fn from_elements(left: Element, right: Element) -> Self {
        Self {
            label: format!("({} + {})", left.label(), right.label()),
            left,
            right,
        }
    }

    /// Replaces the default label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Element between terminals 1 and 2.
    #[must_use]
    pub fn left(&self) -> &Element {
        &self.left
    }

    /// Element between terminals 2 and 0.
    #[must_use]
    pub fn right(&self) -> &Element {
        &self.right
    }
}

impl Component for Series {
    fn impedance(&self, frequency: Option<Scalar>, pair: TerminalPair) -> Result<CScalar> {
        let outer = TerminalPair::OUTER;
        if pair == TerminalPair::OUTER {
            Ok(self.left.impedance(frequency, outer)? + self.right.impedance(frequency, outer)?)
        } else if pair == TerminalPair::JUNCTION_TO_GROUND {
            self.right.impedance(frequency, outer)
        } else if pair == TerminalPair::EXCITATION_TO_JUNCTION {
            self.left.impedance(frequency, outer)
        } else {
            Err(CircuitError::invalid_pair(&self.label, pair))
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Two elements in parallel. Only the outer pair `(1, 0)` is addressable.
#[derive(Clone)]
pub struct Parallel {
    label: String,
    left: Element,
    right: Element,
}

impl Parallel {
    /// Creates a parallel element.
    #[must_use]
    pub fn new<A, B>(left: A, right: B) -> Self
    where
        A: Component + Send + Sync + 'static,
        B: Component + Send + Sync + 'static,
    {
        Self::from_elements(Arc::new(left), Arc::new(right))
    }

    /// Creates a parallel element from already shared handles.
    #[must_use]
    pub fn from_elements(left: Element, right: Element) -> Self {
        Self {
            label: format!("({} || {})", left.label(), right.label()),
            left,
            right,
        }
    }

    /// Replaces the default label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// First branch.
    #[must_use]
    pub fn left(&self) -> &Element {
        &self.left
    }

    /// Second branch.
    #[must_use]
    pub fn right(&self) -> &Element {
        &self.right
    }
}

impl Component for Parallel {
    /// Admittance-sum combination `1 / (1/Z1 + 1/Z2)`.
    ///
    /// A shorted branch forces exactly zero, an open branch drops out, and a
    /// vanishing admittance sum yields an open circuit.
    fn impedance(&self, frequency: Option<Scalar>, pair: TerminalPair) -> Result<CScalar> {
        if !pair.is_outer() {
            return Err(CircuitError::invalid_pair(&self.label, pair));
        }
        let z1 = self.left.impedance(frequency, TerminalPair::OUTER)?;
        let z2 = self.right.impedance(frequency, TerminalPair::OUTER)?;
        if is_zero(z1) || is_zero(z2) {
            return Ok(ZERO);
        }
        let total = admittance(z1) + admittance(z2);
        if is_zero(total) {
            Ok(OPEN)
        } else if is_infinite(total) {
            Ok(ZERO)
        } else {
            Ok(total.inv())
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

macro_rules! composite_traits {
    ($($ty:ident),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.label)
                }
            }

            impl fmt::Debug for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($ty))
                        .field("label", &self.label)
                        .field("left", &self.left.label())
                        .field("right", &self.right.label())
                        .finish()
                }
            }
        )*
    };
}

composite_traits!(Series, Parallel);

/// Connects `a` and `b` in series.
#[must_use]
pub fn connect_in_series<A, B>(a: A, b: B) -> Series
where
    A: Component + Send + Sync + 'static,
    B: Component + Send + Sync + 'static,
{
    Series::new(a, b)
}

/// Connects `a` and `b` in parallel.
#[must_use]
pub fn connect_in_parallel<A, B>(a: A, b: B) -> Parallel
where
    A: Component + Send + Sync + 'static,
    B: Component + Send + Sync + 'static,
{
    Parallel::new(a, b)
}

/// Composes `a` and `b` with the given topology.
#[must_use]
pub fn connect<A, B>(kind: ConnectionKind, a: A, b: B) -> Element
where
    A: Component + Send + Sync + 'static,
    B: Component + Send + Sync + 'static,
{
    match kind {
        ConnectionKind::Series => Arc::new(Series::new(a, b)),
        ConnectionKind::Parallel => Arc::new(Parallel::new(a, b)),
    }
}
