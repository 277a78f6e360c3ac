//! Amplitude equations
//!
//! The working equations are evaluated in the merged spin-orbital basis,
//! where each order is a single antisymmetrized contraction divided by its
//! energy denominator; the per-spin-channel blocks of the bundle are then
//! read off by restricting the external indices to a spin signature. The
//! same-spin blocks inherit their pair antisymmetry from the spin-orbital
//! tensors.
//!
//! Energy denominators are used as-is: a (near-)degenerate reference makes
//! them vanish, which is detected after the fact via a finiteness scan
//! rather than guarded per element.

use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::config::Method;
use crate::error::AdcError;
use crate::integrals::{IntegralStore, OrbitalSpace};
use crate::tensor::Tensor4;

use super::so::{restrict_doubles, restrict_singles, SpinOrbitalAmplitudes};

/// Doubles amplitude blocks per spin channel. The αα and ββ blocks are
/// antisymmetric under exchange of the two occupied and of the two virtual
/// indices; the αβ block carries no such symmetry.
#[derive(Debug, Clone)]
pub struct Doubles {
    pub aa: Tensor4,
    pub ab: Tensor4,
    pub bb: Tensor4,
}

/// Singles amplitude blocks per spin channel.
#[derive(Debug, Clone)]
pub struct Singles {
    pub a: DMatrix<f64>,
    pub b: DMatrix<f64>,
}

/// Tier-tagged amplitude bundle. Each variant carries exactly the fields
/// that are defined for its method tier.
#[derive(Debug, Clone)]
pub enum Amplitudes {
    Adc2 {
        t2_1: Doubles,
        t1_2: Singles,
    },
    Adc2X {
        t2_1: Doubles,
        t1_2: Singles,
        t2_2: Doubles,
    },
    Adc3 {
        t2_1: Doubles,
        t1_2: Singles,
        t2_2: Doubles,
        t1_3: Singles,
    },
}

impl Amplitudes {
    pub fn t2_1(&self) -> &Doubles {
        match self {
            Amplitudes::Adc2 { t2_1, .. }
            | Amplitudes::Adc2X { t2_1, .. }
            | Amplitudes::Adc3 { t2_1, .. } => t2_1,
        }
    }

    pub fn t1_2(&self) -> &Singles {
        match self {
            Amplitudes::Adc2 { t1_2, .. }
            | Amplitudes::Adc2X { t1_2, .. }
            | Amplitudes::Adc3 { t1_2, .. } => t1_2,
        }
    }

    pub fn t2_2(&self) -> Option<&Doubles> {
        match self {
            Amplitudes::Adc2 { .. } => None,
            Amplitudes::Adc2X { t2_2, .. } | Amplitudes::Adc3 { t2_2, .. } => Some(t2_2),
        }
    }

    pub fn t1_3(&self) -> Option<&Singles> {
        match self {
            Amplitudes::Adc3 { t1_3, .. } => Some(t1_3),
            _ => None,
        }
    }
}

/// Pair energy denominator ε_i + ε_j − ε_a − ε_b.
#[inline]
fn d2(ints: &IntegralStore, i: usize, j: usize, a: usize, b: usize) -> f64 {
    ints.e_occ(i) + ints.e_occ(j) - ints.e_vir(a) - ints.e_vir(b)
}

/// First-order doubles: ⟨ij‖ab⟩ divided by the pair denominator.
fn t2_first_order(space: &OrbitalSpace, ints: &IntegralStore) -> Tensor4 {
    let no = space.nocc_so();
    let nv = space.nvir_so();
    let mut t = Tensor4::zeros([no, no, nv, nv]);
    for i in 0..no {
        for j in 0..no {
            for a in 0..nv {
                for b in 0..nv {
                    t[(i, j, a, b)] = ints.oovv(i, j, a, b) / d2(ints, i, j, a, b);
                }
            }
        }
    }
    t
}

/// Second-order singles from the first-order doubles.
fn t1_second_order(space: &OrbitalSpace, ints: &IntegralStore, t2_1: &Tensor4) -> DMatrix<f64> {
    let no = space.nocc_so();
    let nv = space.nvir_so();
    DMatrix::from_fn(no, nv, |i, a| {
        let mut s = 0.0;
        for k in 0..no {
            for c in 0..nv {
                for d in 0..nv {
                    s += 0.5 * ints.vovv(a, k, c, d) * t2_1[(i, k, c, d)];
                }
            }
        }
        for k in 0..no {
            for l in 0..no {
                for c in 0..nv {
                    s -= 0.5 * ints.ooov(k, l, i, c) * t2_1[(k, l, a, c)];
                }
            }
        }
        s / (ints.e_occ(i) - ints.e_vir(a))
    })
}

/// Second-order doubles: ladder (vvvv, oooo) plus the antisymmetrized
/// particle-hole ring contraction.
fn t2_second_order(space: &OrbitalSpace, ints: &IntegralStore, t2_1: &Tensor4) -> Tensor4 {
    let no = space.nocc_so();
    let nv = space.nvir_so();

    let ring = |i: usize, j: usize, a: usize, b: usize| {
        let mut s = 0.0;
        for k in 0..no {
            for c in 0..nv {
                s += ints.voov(b, k, j, c) * t2_1[(k, i, c, a)];
            }
        }
        s
    };

    let data: Vec<f64> = (0..no * no * nv * nv)
        .into_par_iter()
        .map(|idx| {
            let b = idx % nv;
            let a = (idx / nv) % nv;
            let j = (idx / (nv * nv)) % no;
            let i = idx / (nv * nv * no);

            let mut s = 0.0;
            for c in 0..nv {
                for d in 0..nv {
                    s += 0.5 * ints.vvvv(a, b, c, d) * t2_1[(i, j, c, d)];
                }
            }
            for k in 0..no {
                for l in 0..no {
                    s += 0.5 * ints.oooo(k, l, i, j) * t2_1[(k, l, a, b)];
                }
            }
            // full antisymmetry over both pairs, signs +, -, -, +
            s += ring(i, j, a, b) - ring(j, i, a, b) - ring(i, j, b, a) + ring(j, i, b, a);
            s / d2(ints, i, j, a, b)
        })
        .collect();

    Tensor4::from_vec([no, no, nv, nv], data)
}

/// Third-order singles from the second-order doubles and singles.
fn t1_third_order(
    space: &OrbitalSpace,
    ints: &IntegralStore,
    t2_2: &Tensor4,
    t1_2: &DMatrix<f64>,
) -> DMatrix<f64> {
    let no = space.nocc_so();
    let nv = space.nvir_so();
    DMatrix::from_fn(no, nv, |i, a| {
        let mut s = 0.0;
        for l in 0..no {
            for d in 0..nv {
                let w = t2_2[(i, l, a, d)] * t1_2[(l, d)];
                s += ints.e_vir(d) * w;
                s -= ints.e_occ(l) * w;
                // only one of the two degenerate diagonal terms is counted
                s += 0.5 * ints.e_vir(a) * w;
                s -= 0.5 * ints.e_occ(i) * w;
                s += t1_2[(l, d)] * ints.vvoo(a, d, i, l);
                s += t1_2[(l, d)] * ints.voov(a, l, i, d);
            }
        }
        for l in 0..no {
            for m in 0..no {
                for d in 0..nv {
                    s -= 0.5 * t2_2[(l, m, a, d)] * ints.ooov(l, m, i, d);
                }
            }
        }
        for l in 0..no {
            for d in 0..nv {
                for e in 0..nv {
                    s += 0.5 * t2_2[(i, l, d, e)] * ints.vovv(a, l, d, e);
                }
            }
        }
        s / (ints.e_occ(i) - ints.e_vir(a))
    })
}

fn singles_finite(s: &DMatrix<f64>) -> bool {
    s.iter().all(|v| v.is_finite())
}

/// Compute the amplitude bundle for the requested method tier.
///
/// Runs once per system. Non-finite amplitudes mean the reference is
/// degenerate and are reported as such instead of being propagated into the
/// spectrum.
pub fn compute_amplitudes(
    method: Method,
    space: &OrbitalSpace,
    ints: &IntegralStore,
) -> Result<Amplitudes, AdcError> {
    let t2_1_so = t2_first_order(space, ints);
    let t1_2_so = t1_second_order(space, ints, &t2_1_so);
    if !t2_1_so.is_finite() || !singles_finite(&t1_2_so) {
        return Err(AdcError::DegenerateReference);
    }

    let t2_1 = restrict_doubles(&t2_1_so, space);
    let t1_2 = restrict_singles(&t1_2_so, space);

    if method == Method::Adc2 {
        return Ok(Amplitudes::Adc2 { t2_1, t1_2 });
    }

    let t2_2_so = t2_second_order(space, ints, &t2_1_so);
    if !t2_2_so.is_finite() {
        return Err(AdcError::DegenerateReference);
    }
    let t2_2 = restrict_doubles(&t2_2_so, space);

    if method == Method::Adc2X {
        return Ok(Amplitudes::Adc2X { t2_1, t1_2, t2_2 });
    }

    let t1_3_so = t1_third_order(space, ints, &t2_2_so, &t1_2_so);
    if !singles_finite(&t1_3_so) {
        return Err(AdcError::DegenerateReference);
    }
    let t1_3 = restrict_singles(&t1_3_so, space);

    Ok(Amplitudes::Adc3 {
        t2_1,
        t1_2,
        t2_2,
        t1_3,
    })
}

/// MP2 correlation energy: 0.25 Σ_ijab T2⁽¹⁾_ijab ⟨ij‖ab⟩.
pub fn mp2_energy(amps: &SpinOrbitalAmplitudes, ints: &IntegralStore) -> f64 {
    let [no, _, nv, _] = amps.t2_1.dims();
    let mut e = 0.0;
    for i in 0..no {
        for j in 0..no {
            for a in 0..nv {
                for b in 0..nv {
                    e += amps.t2_1[(i, j, a, b)] * ints.oovv(i, j, a, b);
                }
            }
        }
    }
    0.25 * e
}
