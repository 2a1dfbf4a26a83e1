//! Zero-cost unit tags for stored component parameters.

use std::fmt;
use std::marker::PhantomData;

/// Marker trait implemented by unit tags.
pub trait Unit {
    /// SI symbol printed after the value.
    const SYMBOL: &'static str;
}

macro_rules! unit {
    ($(#[$meta:meta])* $name:ident, $symbol:literal) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl Unit for $name {
            const SYMBOL: &'static str = $symbol;
        }
    };
}

unit!(
    /// Ohm (Ω).
    Ohm,
    "Ω"
);
unit!(
    /// Farad (F).
    Farad,
    "F"
);
unit!(
    /// Henry (H).
    Henry,
    "H"
);

/// A value tagged with a unit `U`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        transparent,
        bound(serialize = "T: serde::Serialize", deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct Quantity<T, U> {
    value: T,
    #[cfg_attr(feature = "serde", serde(skip))]
    unit: PhantomData<U>,
}

impl<T: Copy, U> Quantity<T, U> {
    /// Wraps `value`.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            unit: PhantomData,
        }
    }

    /// Raw value.
    #[must_use]
    pub const fn value(&self) -> T {
        self.value
    }
}

// Manual impls so the unit tag does not need to implement the traits itself.
impl<T: Copy, U> Clone for Quantity<T, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy, U> Copy for Quantity<T, U> {}

impl<T: PartialEq, U> PartialEq for Quantity<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug, U: Unit> fmt::Debug for Quantity<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.value, U::SYMBOL)
    }
}

impl<T: fmt::Display, U: Unit> fmt::Display for Quantity<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, U::SYMBOL)
    }
}

/// Resistance in ohms.
pub type Resistance<T> = Quantity<T, Ohm>;
/// Capacitance in farads.
pub type Capacitance<T> = Quantity<T, Farad>;
/// Inductance in henries.
pub type Inductance<T> = Quantity<T, Henry>;
