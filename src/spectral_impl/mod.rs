//! Spectral vector and effective-Hamiltonian construction
//!
//! Both components work on the combined singles + doubles configuration
//! space: `nocc_so` one-hole configurations followed by the
//! two-hole-one-particle configurations, indexed `a·npair + p` with `p`
//! running over strictly ordered occupied pairs (i > j).

mod hamiltonian;
mod tvector;

pub use hamiltonian::{ShiftedHamiltonian, SigmaBlocks};
pub use tvector::spectral_vector;

use crate::integrals::OrbitalSpace;

/// Index layout of the singles + doubles configuration space.
#[derive(Debug, Clone)]
pub struct ConfigLayout {
    pub nocc: usize,
    pub nvir: usize,
    /// Strictly-lower-triangular occupied pairs (i > j), row-major order.
    pub pairs: Vec<(usize, usize)>,
}

impl ConfigLayout {
    pub fn new(space: &OrbitalSpace) -> Self {
        let nocc = space.nocc_so();
        let mut pairs = Vec::with_capacity(nocc * nocc.saturating_sub(1) / 2);
        for i in 1..nocc {
            for j in 0..i {
                pairs.push((i, j));
            }
        }
        ConfigLayout {
            nocc,
            nvir: space.nvir_so(),
            pairs,
        }
    }

    pub fn npair(&self) -> usize {
        self.pairs.len()
    }

    pub fn n_singles(&self) -> usize {
        self.nocc
    }

    pub fn n_doubles(&self) -> usize {
        self.nvir * self.npair()
    }

    pub fn dim(&self) -> usize {
        self.n_singles() + self.n_doubles()
    }

    /// Position of the (virtual a, occupied pair p) configuration within
    /// the doubles block.
    #[inline]
    pub fn doubles_offset(&self, a: usize, p: usize) -> usize {
        a * self.npair() + p
    }
}

#[cfg(test)]
mod tests;
