//! Terminal addressing for two-terminal elements.
//!
//! Every element is driven across its outer terminals: the source sits on
//! [`Terminal::EXCITATION`] and the reference on [`Terminal::GROUND`]. A
//! series composition additionally exposes [`Terminal::JUNCTION`], the node
//! between its two children. Junctions of grandchildren are not addressable
//! from an outer element.

use std::fmt;

/// A named connection point on an element.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(pub u8);

impl Terminal {
    /// Reference node (terminal 0).
    pub const GROUND: Self = Self(0);
    /// Node the source is connected to (terminal 1).
    pub const EXCITATION: Self = Self(1);
    /// Junction between the two children of a series element (terminal 2).
    pub const JUNCTION: Self = Self(2);

    /// Raw terminal index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::EXCITATION
    }
}

impl From<u8> for Terminal {
    fn from(index: u8) -> Self {
        Self(index)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered pair of terminals an impedance is measured between.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalPair {
    /// Positive terminal.
    pub plus: Terminal,
    /// Negative terminal.
    pub minus: Terminal,
}

impl TerminalPair {
    /// The outer pair `(1, 0)`.
    pub const OUTER: Self = Self::new(Terminal::EXCITATION, Terminal::GROUND);
    /// Series junction to ground, `(2, 0)`.
    pub const JUNCTION_TO_GROUND: Self = Self::new(Terminal::JUNCTION, Terminal::GROUND);
    /// Excitation to series junction, `(1, 2)`.
    pub const EXCITATION_TO_JUNCTION: Self = Self::new(Terminal::EXCITATION, Terminal::JUNCTION);

    /// Creates a pair.
    #[must_use]
    pub const fn new(plus: Terminal, minus: Terminal) -> Self {
        Self { plus, minus }
    }

    /// Pair measuring `terminal` against ground.
    #[must_use]
    pub const fn to_ground(terminal: Terminal) -> Self {
        Self::new(terminal, Terminal::GROUND)
    }

    /// Pair measuring the excitation node against `terminal`.
    #[must_use]
    pub const fn from_excitation(terminal: Terminal) -> Self {
        Self::new(Terminal::EXCITATION, terminal)
    }

    /// True for `(1, 0)`.
    #[must_use]
    pub const fn is_outer(self) -> bool {
        self.plus.0 == Terminal::EXCITATION.0 && self.minus.0 == Terminal::GROUND.0
    }
}

impl Default for TerminalPair {
    fn default() -> Self {
        Self::OUTER
    }
}

impl From<(u8, u8)> for TerminalPair {
    fn from((plus, minus): (u8, u8)) -> Self {
        Self::new(Terminal(plus), Terminal(minus))
    }
}

impl fmt::Display for TerminalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.plus, self.minus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pair_is_excitation_to_ground() {
        assert_eq!(TerminalPair::default(), TerminalPair::from((1, 0)));
        assert!(TerminalPair::default().is_outer());
        assert!(!TerminalPair::JUNCTION_TO_GROUND.is_outer());
    }

    #[test]
    fn helpers_build_expected_pairs() {
        assert_eq!(TerminalPair::to_ground(Terminal::JUNCTION), TerminalPair::from((2, 0)));
        assert_eq!(
            TerminalPair::from_excitation(Terminal::JUNCTION),
            TerminalPair::from((1, 2))
        );
        assert_eq!(TerminalPair::from((1, 2)).to_string(), "(1, 2)");
    }
}
