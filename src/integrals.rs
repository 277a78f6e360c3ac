//! Orbital bookkeeping and the two-electron integral store
//!
//! The spin-orbital basis is ordered `[occ_α | occ_β | vir_α | vir_β]`, so
//! the first `nocc_so` spin-orbitals are holes and the rest are particles.
//! The store owns the merged orbital-energy list and the antisymmetrized
//! spin-orbital integral tensor `⟨pq‖rs⟩`; occupied/virtual blocks of it are
//! exposed as typed accessors that shift virtual indices past the occupied
//! range.

use nalgebra::DVector;

use crate::error::AdcError;
use crate::tensor::Tensor4;

/// Occupied/virtual orbital counts per spin channel. Fixed for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitalSpace {
    pub nocc_a: usize,
    pub nocc_b: usize,
    pub nvir_a: usize,
    pub nvir_b: usize,
}

impl OrbitalSpace {
    pub fn nocc_so(&self) -> usize {
        self.nocc_a + self.nocc_b
    }

    pub fn nvir_so(&self) -> usize {
        self.nvir_a + self.nvir_b
    }

    pub fn nmo_so(&self) -> usize {
        self.nocc_so() + self.nvir_so()
    }

    pub fn nelec(&self) -> usize {
        self.nocc_a + self.nocc_b
    }

    /// Spin-orbital index of an α occupied orbital.
    #[inline]
    pub fn occ_a(&self, i: usize) -> usize {
        i
    }

    /// Spin-orbital index of a β occupied orbital.
    #[inline]
    pub fn occ_b(&self, i: usize) -> usize {
        self.nocc_a + i
    }

    /// Index of an α virtual orbital within the virtual spin-orbital range.
    #[inline]
    pub fn vir_a(&self, a: usize) -> usize {
        a
    }

    /// Index of a β virtual orbital within the virtual spin-orbital range.
    #[inline]
    pub fn vir_b(&self, a: usize) -> usize {
        self.nvir_a + a
    }

    /// Spin of an occupied spin-orbital index (true = β).
    #[inline]
    pub fn occ_is_beta(&self, i: usize) -> bool {
        i >= self.nocc_a
    }

    /// Spin of a virtual spin-orbital index (true = β).
    #[inline]
    pub fn vir_is_beta(&self, a: usize) -> bool {
        a >= self.nvir_a
    }
}

/// Orbital energies and antisymmetrized two-electron integrals, shared
/// read-only with every component.
#[derive(Debug, Clone)]
pub struct IntegralStore {
    pub space: OrbitalSpace,
    pub mo_energy_a: DVector<f64>,
    pub mo_energy_b: DVector<f64>,
    /// Merged spin-orbital energies in `[occ_α | occ_β | vir_α | vir_β]` order.
    pub mo_energy_so: DVector<f64>,
    /// Antisymmetrized ⟨pq‖rs⟩ over the full spin-orbital basis.
    pub v2e_so: Tensor4,
    nocc: usize,
}

impl IntegralStore {
    pub fn new(
        space: OrbitalSpace,
        mo_energy_a: DVector<f64>,
        mo_energy_b: DVector<f64>,
        v2e_so: Tensor4,
    ) -> Result<Self, AdcError> {
        let nmo_a = space.nocc_a + space.nvir_a;
        let nmo_b = space.nocc_b + space.nvir_b;
        if mo_energy_a.len() != nmo_a {
            return Err(AdcError::BadDimensions {
                what: "mo_energy_a",
                expected: nmo_a,
                got: mo_energy_a.len(),
            });
        }
        if mo_energy_b.len() != nmo_b {
            return Err(AdcError::BadDimensions {
                what: "mo_energy_b",
                expected: nmo_b,
                got: mo_energy_b.len(),
            });
        }
        let nmo_so = space.nmo_so();
        if v2e_so.dims() != [nmo_so; 4] {
            return Err(AdcError::BadDimensions {
                what: "v2e_so",
                expected: nmo_so.pow(4),
                got: v2e_so.len(),
            });
        }

        let mut merged = Vec::with_capacity(nmo_so);
        merged.extend(mo_energy_a.iter().take(space.nocc_a));
        merged.extend(mo_energy_b.iter().take(space.nocc_b));
        merged.extend(mo_energy_a.iter().skip(space.nocc_a));
        merged.extend(mo_energy_b.iter().skip(space.nocc_b));
        let mo_energy_so = DVector::from_vec(merged);

        Ok(IntegralStore {
            space,
            mo_energy_a,
            mo_energy_b,
            mo_energy_so,
            v2e_so,
            nocc: space.nocc_so(),
        })
    }

    /// Energy of an occupied spin-orbital.
    #[inline]
    pub fn e_occ(&self, i: usize) -> f64 {
        self.mo_energy_so[i]
    }

    /// Energy of a virtual spin-orbital (index within the virtual range).
    #[inline]
    pub fn e_vir(&self, a: usize) -> f64 {
        self.mo_energy_so[self.nocc + a]
    }

    // Occupied/virtual blocks of ⟨pq‖rs⟩. Occupied indices run over
    // 0..nocc_so, virtual indices over 0..nvir_so.

    #[inline]
    pub fn oovv(&self, i: usize, j: usize, a: usize, b: usize) -> f64 {
        self.v2e_so[(i, j, self.nocc + a, self.nocc + b)]
    }

    #[inline]
    pub fn vovv(&self, a: usize, k: usize, c: usize, d: usize) -> f64 {
        self.v2e_so[(self.nocc + a, k, self.nocc + c, self.nocc + d)]
    }

    #[inline]
    pub fn ooov(&self, k: usize, l: usize, i: usize, c: usize) -> f64 {
        self.v2e_so[(k, l, i, self.nocc + c)]
    }

    #[inline]
    pub fn vvvv(&self, a: usize, b: usize, c: usize, d: usize) -> f64 {
        self.v2e_so[(self.nocc + a, self.nocc + b, self.nocc + c, self.nocc + d)]
    }

    #[inline]
    pub fn oooo(&self, k: usize, l: usize, i: usize, j: usize) -> f64 {
        self.v2e_so[(k, l, i, j)]
    }

    #[inline]
    pub fn voov(&self, b: usize, k: usize, j: usize, c: usize) -> f64 {
        self.v2e_so[(self.nocc + b, k, j, self.nocc + c)]
    }

    #[inline]
    pub fn vvoo(&self, a: usize, d: usize, i: usize, l: usize) -> f64 {
        self.v2e_so[(self.nocc + a, self.nocc + d, i, l)]
    }

    #[inline]
    pub fn ovoo(&self, y: usize, d: usize, i: usize, l: usize) -> f64 {
        self.v2e_so[(y, self.nocc + d, i, l)]
    }

    #[inline]
    pub fn vooo(&self, a: usize, j: usize, x: usize, y: usize) -> f64 {
        self.v2e_so[(self.nocc + a, j, x, y)]
    }

    #[inline]
    pub fn oovo(&self, x: usize, y: usize, a: usize, i: usize) -> f64 {
        self.v2e_so[(x, y, self.nocc + a, i)]
    }

    #[inline]
    pub fn vovo(&self, b: usize, y: usize, a: usize, v: usize) -> f64 {
        self.v2e_so[(self.nocc + b, y, self.nocc + a, v)]
    }

    #[inline]
    pub fn vvvo(&self, d: usize, e: usize, a: usize, i: usize) -> f64 {
        self.v2e_so[(self.nocc + d, self.nocc + e, self.nocc + a, i)]
    }
}
