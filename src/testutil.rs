//! Shared fixtures for unit tests: small closed-shell systems with
//! spin-orbital integrals assembled from spatial chemist-notation tensors.

use nalgebra::DVector;

use crate::integrals::{IntegralStore, OrbitalSpace};
use crate::tensor::Tensor4;

/// Deterministic xorshift64* stream for reproducible pseudo-random fills.
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        XorShift(seed.max(1))
    }

    pub fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        // map to (-0.5, 0.5)
        (x >> 11) as f64 / (1u64 << 53) as f64 - 0.5
    }
}

fn spin_orbital_map(nocc_sp: usize, nvir_sp: usize) -> Vec<(usize, bool)> {
    let mut map = Vec::with_capacity(2 * (nocc_sp + nvir_sp));
    for i in 0..nocc_sp {
        map.push((i, false));
    }
    for i in 0..nocc_sp {
        map.push((i, true));
    }
    for a in 0..nvir_sp {
        map.push((nocc_sp + a, false));
    }
    for a in 0..nvir_sp {
        map.push((nocc_sp + a, true));
    }
    map
}

/// Antisymmetrized spin-orbital tensor ⟨pq‖rs⟩ from a spatial
/// chemist-notation tensor (pq|rs), in the `[occ_α | occ_β | vir_α | vir_β]`
/// ordering of a closed-shell system.
pub fn so_from_spatial(chemist: &Tensor4, nocc_sp: usize, nvir_sp: usize) -> Tensor4 {
    let map = spin_orbital_map(nocc_sp, nvir_sp);
    let nmo = map.len();
    let mut v = Tensor4::zeros([nmo, nmo, nmo, nmo]);
    for p in 0..nmo {
        for q in 0..nmo {
            for r in 0..nmo {
                for s in 0..nmo {
                    let (sp_p, s_p) = map[p];
                    let (sp_q, s_q) = map[q];
                    let (sp_r, s_r) = map[r];
                    let (sp_s, s_s) = map[s];
                    let mut val = 0.0;
                    if s_p == s_r && s_q == s_s {
                        val += chemist[(sp_p, sp_r, sp_q, sp_s)];
                    }
                    if s_p == s_s && s_q == s_r {
                        val -= chemist[(sp_p, sp_s, sp_q, sp_r)];
                    }
                    v[(p, q, r, s)] = val;
                }
            }
        }
    }
    v
}

/// Closed-shell store from spatial energies and chemist integrals.
pub fn closed_shell_store(
    mo_energy_sp: &[f64],
    nocc_sp: usize,
    chemist: &Tensor4,
) -> (OrbitalSpace, IntegralStore) {
    let nvir_sp = mo_energy_sp.len() - nocc_sp;
    let space = OrbitalSpace {
        nocc_a: nocc_sp,
        nocc_b: nocc_sp,
        nvir_a: nvir_sp,
        nvir_b: nvir_sp,
    };
    let e = DVector::from_vec(mo_energy_sp.to_vec());
    let v2e = so_from_spatial(chemist, nocc_sp, nvir_sp);
    let ints = IntegralStore::new(space, e.clone(), e, v2e).expect("consistent fixture");
    (space, ints)
}

/// H2 / STO-3G at the equilibrium distance: two spatial orbitals, the
/// textbook reference values.
pub fn h2_sto3g() -> (OrbitalSpace, IntegralStore) {
    let e = [-0.578, 0.670];
    let mut g = Tensor4::zeros([2, 2, 2, 2]);
    let j11 = 0.6746;
    let j22 = 0.6975;
    let j12 = 0.6636;
    let k12 = 0.1813;
    g[(0, 0, 0, 0)] = j11;
    g[(1, 1, 1, 1)] = j22;
    g[(0, 0, 1, 1)] = j12;
    g[(1, 1, 0, 0)] = j12;
    g[(0, 1, 0, 1)] = k12;
    g[(1, 0, 0, 1)] = k12;
    g[(0, 1, 1, 0)] = k12;
    g[(1, 0, 1, 0)] = k12;
    closed_shell_store(&e, 1, &g)
}

/// H2 chemist-notation exchange integral, used by the closed-form MP2 check.
pub fn h2_k12() -> f64 {
    0.1813
}

/// Non-interacting closed-shell system: zero two-electron tensor, so every
/// amplitude vanishes and the spectrum reduces to bare orbital poles.
pub fn noninteracting(mo_energy_sp: &[f64], nocc_sp: usize) -> (OrbitalSpace, IntegralStore) {
    let n = mo_energy_sp.len();
    let g = Tensor4::zeros([n, n, n, n]);
    closed_shell_store(mo_energy_sp, nocc_sp, &g)
}

/// Spatial chemist tensor with full 8-fold permutational symmetry, filled
/// from a deterministic pseudo-random stream. The resulting spin-orbital
/// tensor has the exact ⟨pq‖rs⟩ symmetries.
pub fn random_chemist(n: usize, seed: u64) -> Tensor4 {
    let mut rng = XorShift::new(seed);
    let mut g = Tensor4::zeros([n, n, n, n]);
    for p in 0..n {
        for q in 0..=p {
            for r in 0..n {
                for s in 0..=r {
                    if (p, q) < (r, s) {
                        continue;
                    }
                    let v = 0.1 * rng.next_f64();
                    for &(a, b, c, d) in &[
                        (p, q, r, s),
                        (q, p, r, s),
                        (p, q, s, r),
                        (q, p, s, r),
                        (r, s, p, q),
                        (s, r, p, q),
                        (r, s, q, p),
                        (s, r, q, p),
                    ] {
                        g[(a, b, c, d)] = v;
                    }
                }
            }
        }
    }
    g
}

/// Interacting closed-shell fixture with well-separated orbital energies
/// and weak random integrals.
pub fn random_system(nocc_sp: usize, nvir_sp: usize, seed: u64) -> (OrbitalSpace, IntegralStore) {
    let n = nocc_sp + nvir_sp;
    let mut e = Vec::with_capacity(n);
    for i in 0..nocc_sp {
        e.push(-1.0 - 0.3 * i as f64);
    }
    for a in 0..nvir_sp {
        e.push(0.8 + 0.4 * a as f64);
    }
    let g = random_chemist(n, seed);
    closed_shell_store(&e, nocc_sp, &g)
}
