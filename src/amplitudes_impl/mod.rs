//! Perturbative excitation amplitudes
//!
//! Derives the double- and single-excitation amplitudes that feed the
//! spectral vector builder and the effective-Hamiltonian operator:
//!
//! - first-order doubles T2⁽¹⁾ (all tiers),
//! - second-order singles T1⁽²⁾ (all tiers),
//! - second-order doubles T2⁽²⁾ (adc(2)-e and adc(3)),
//! - third-order singles T1⁽³⁾ (adc(3) only).
//!
//! Amplitudes are computed once per system, stored per spin channel in a
//! tier-tagged bundle, and never mutated afterwards.

mod amplitudes;
mod so;

pub use amplitudes::{compute_amplitudes, mp2_energy, Amplitudes, Doubles, Singles};
pub use so::SpinOrbitalAmplitudes;
