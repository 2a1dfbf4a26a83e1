//! Shared numerical primitives anchored on `num_complex`.

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for impedances and phasors.
pub type CScalar = num_complex::Complex<Scalar>;

/// Complex zero.
pub const ZERO: CScalar = CScalar::new(0.0, 0.0);
/// Complex one.
pub const ONE: CScalar = CScalar::new(1.0, 0.0);

/// Infinite impedance of an open circuit, `+∞ + 0j`.
pub const OPEN: CScalar = CScalar::new(Scalar::INFINITY, 0.0);

/// True when either component of `z` is infinite.
#[must_use]
pub fn is_infinite(z: CScalar) -> bool {
    z.re.is_infinite() || z.im.is_infinite()
}

/// True when `z` is exactly `0 + 0j`.
#[must_use]
pub fn is_zero(z: CScalar) -> bool {
    z.re == 0.0 && z.im == 0.0
}

/// Admittance of a branch with impedance `z`.
///
/// An open branch (infinite impedance) contributes zero admittance and a short
/// (exactly zero impedance) yields `+∞ + 0j`, instead of the NaNs a plain
/// complex division would produce.
#[must_use]
pub fn admittance(z: CScalar) -> CScalar {
    if is_infinite(z) {
        ZERO
    } else if is_zero(z) {
        OPEN
    } else {
        z.inv()
    }
}
