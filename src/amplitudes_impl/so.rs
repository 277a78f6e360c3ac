//! Spin-channel ↔ spin-orbital amplitude conversion
//!
//! The amplitude bundle stores one block per spin channel; the spectral
//! vector builder and the effective Hamiltonian contract amplitudes in the
//! merged spin-orbital basis. The embedding fills the spin-forbidden
//! elements with zero and recovers the cross-signature elements (e.g.
//! ⟨αβ→βα⟩) from the antisymmetry of the same objects, so restriction
//! followed by embedding is the identity on spin-allowed data.

use nalgebra::DMatrix;

use crate::integrals::OrbitalSpace;
use crate::tensor::Tensor4;

use super::amplitudes::{Amplitudes, Doubles, Singles};

/// Amplitudes embedded in the `[occ_α | occ_β | vir_α | vir_β]` basis.
/// Fields beyond T2⁽¹⁾/T1⁽²⁾ are populated per method tier.
#[derive(Debug, Clone)]
pub struct SpinOrbitalAmplitudes {
    pub t2_1: Tensor4,
    pub t1_2: DMatrix<f64>,
    pub t2_2: Option<Tensor4>,
    pub t1_3: Option<DMatrix<f64>>,
}

impl SpinOrbitalAmplitudes {
    pub fn from_channels(amps: &Amplitudes, space: &OrbitalSpace) -> Self {
        SpinOrbitalAmplitudes {
            t2_1: embed_doubles(amps.t2_1(), space),
            t1_2: embed_singles(amps.t1_2(), space),
            t2_2: amps.t2_2().map(|d| embed_doubles(d, space)),
            t1_3: amps.t1_3().map(|s| embed_singles(s, space)),
        }
    }
}

fn doubles_element(d: &Doubles, space: &OrbitalSpace, i: usize, j: usize, a: usize, b: usize) -> f64 {
    let na_o = space.nocc_a;
    let na_v = space.nvir_a;
    let spins = (
        space.occ_is_beta(i),
        space.occ_is_beta(j),
        space.vir_is_beta(a),
        space.vir_is_beta(b),
    );
    match spins {
        (false, false, false, false) => d.aa[(i, j, a, b)],
        (true, true, true, true) => d.bb[(i - na_o, j - na_o, a - na_v, b - na_v)],
        (false, true, false, true) => d.ab[(i, j - na_o, a, b - na_v)],
        (false, true, true, false) => -d.ab[(i, j - na_o, b, a - na_v)],
        (true, false, false, true) => -d.ab[(j, i - na_o, a, b - na_v)],
        (true, false, true, false) => d.ab[(j, i - na_o, b, a - na_v)],
        // spin projection not conserved
        _ => 0.0,
    }
}

pub(super) fn embed_doubles(d: &Doubles, space: &OrbitalSpace) -> Tensor4 {
    let no = space.nocc_so();
    let nv = space.nvir_so();
    let mut t = Tensor4::zeros([no, no, nv, nv]);
    for i in 0..no {
        for j in 0..no {
            for a in 0..nv {
                for b in 0..nv {
                    t[(i, j, a, b)] = doubles_element(d, space, i, j, a, b);
                }
            }
        }
    }
    t
}

pub(super) fn embed_singles(s: &Singles, space: &OrbitalSpace) -> DMatrix<f64> {
    let no = space.nocc_so();
    let nv = space.nvir_so();
    DMatrix::from_fn(no, nv, |i, a| {
        match (space.occ_is_beta(i), space.vir_is_beta(a)) {
            (false, false) => s.a[(i, a)],
            (true, true) => s.b[(i - space.nocc_a, a - space.nvir_a)],
            _ => 0.0,
        }
    })
}

pub(super) fn restrict_doubles(t: &Tensor4, space: &OrbitalSpace) -> Doubles {
    let mut aa = Tensor4::zeros([space.nocc_a, space.nocc_a, space.nvir_a, space.nvir_a]);
    let mut ab = Tensor4::zeros([space.nocc_a, space.nocc_b, space.nvir_a, space.nvir_b]);
    let mut bb = Tensor4::zeros([space.nocc_b, space.nocc_b, space.nvir_b, space.nvir_b]);

    for i in 0..space.nocc_a {
        for j in 0..space.nocc_a {
            for a in 0..space.nvir_a {
                for b in 0..space.nvir_a {
                    aa[(i, j, a, b)] =
                        t[(space.occ_a(i), space.occ_a(j), space.vir_a(a), space.vir_a(b))];
                }
            }
        }
    }
    for i in 0..space.nocc_a {
        for j in 0..space.nocc_b {
            for a in 0..space.nvir_a {
                for b in 0..space.nvir_b {
                    ab[(i, j, a, b)] =
                        t[(space.occ_a(i), space.occ_b(j), space.vir_a(a), space.vir_b(b))];
                }
            }
        }
    }
    for i in 0..space.nocc_b {
        for j in 0..space.nocc_b {
            for a in 0..space.nvir_b {
                for b in 0..space.nvir_b {
                    bb[(i, j, a, b)] =
                        t[(space.occ_b(i), space.occ_b(j), space.vir_b(a), space.vir_b(b))];
                }
            }
        }
    }

    Doubles { aa, ab, bb }
}

pub(super) fn restrict_singles(t: &DMatrix<f64>, space: &OrbitalSpace) -> Singles {
    let a = DMatrix::from_fn(space.nocc_a, space.nvir_a, |i, v| {
        t[(space.occ_a(i), space.vir_a(v))]
    });
    let b = DMatrix::from_fn(space.nocc_b, space.nvir_b, |i, v| {
        t[(space.occ_b(i), space.vir_b(v))]
    });
    Singles { a, b }
}
