//! Matrix-free shifted effective Hamiltonian
//!
//! The operator maps a configuration vector r to `(ω + iη)·r − Σ·r`, the
//! residual form consumed directly by the conjugate-gradient solver. The
//! blocks of Σ do not depend on the frequency or on the orbital index, so
//! they are contracted once per run into `SigmaBlocks`; fixing the complex
//! shift then costs nothing and `ShiftedHamiltonian` can be rebuilt per
//! frequency and shared across all orbitals and solver iterations.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

use crate::amplitudes_impl::SpinOrbitalAmplitudes;
use crate::integrals::IntegralStore;
use crate::solver_impl::LinearOperator;
use crate::tensor::Tensor4;

use super::ConfigLayout;

/// Frequency-independent blocks of the effective Hamiltonian over the
/// singles + doubles configuration space.
#[derive(Debug, Clone)]
pub struct SigmaBlocks {
    n_singles: usize,
    n_doubles: usize,
    /// one-hole / one-hole block, includes the orbital-energy diagonal
    m_ss: DMatrix<f64>,
    /// one-hole ← two-hole-one-particle coupling
    c_sd: DMatrix<f64>,
    /// two-hole-one-particle ← one-hole coupling
    c_ds: DMatrix<f64>,
    /// diagonal of the doubles block: ε_x + ε_y − ε_a
    d_diag: DVector<f64>,
    /// off-diagonal doubles block, present for adc(2)-e and adc(3)
    k_dd: Option<DMatrix<f64>>,
}

impl SigmaBlocks {
    pub fn build(
        layout: &ConfigLayout,
        ints: &IntegralStore,
        amps: &SpinOrbitalAmplitudes,
    ) -> Self {
        let mut m_ss = build_m_ss(layout, ints, amps);
        let mut c_sd = build_c_sd(layout, ints);
        let mut c_ds = build_c_ds(layout, ints);
        let d_diag = build_d_diag(layout, ints);
        let k_dd = amps.t2_2.as_ref().map(|_| build_k_dd(layout, ints));

        if let (Some(_), Some(t2_2)) = (&amps.t1_3, &amps.t2_2) {
            add_m_ss_third_order(&mut m_ss, layout, ints, amps, t2_2);
            add_coupling_third_order(&mut c_sd, &mut c_ds, layout, ints, amps);
        }

        SigmaBlocks {
            n_singles: layout.n_singles(),
            n_doubles: layout.n_doubles(),
            m_ss,
            c_sd,
            c_ds,
            d_diag,
            k_dd,
        }
    }

    pub fn dim(&self) -> usize {
        self.n_singles + self.n_doubles
    }
}

/// One-hole block at second order: orbital-energy diagonal, static
/// self-energy from T2⁽¹⁾ with orbital-energy weights, and the two
/// T2⁽¹⁾ · ⟨oo‖vv⟩ ring terms.
fn build_m_ss(layout: &ConfigLayout, ints: &IntegralStore, amps: &SpinOrbitalAmplitudes) -> DMatrix<f64> {
    let no = layout.nocc;
    let nv = layout.nvir;
    let t2_1 = &amps.t2_1;

    DMatrix::from_fn(no, no, |i, j| {
        let mut g = 0.0;
        let mut g_vir = 0.0;
        let mut g_occ = 0.0;
        let mut ring = 0.0;
        for l in 0..no {
            for d in 0..nv {
                for e in 0..nv {
                    let ti = t2_1[(i, l, d, e)];
                    let tj = t2_1[(j, l, d, e)];
                    let p = ti * tj;
                    g += p;
                    g_vir += ints.e_vir(d) * p;
                    g_occ += ints.e_occ(l) * p;
                    ring += ti * ints.oovv(j, l, d, e) + tj * ints.oovv(i, l, d, e);
                }
            }
        }
        let mut v = g_vir - 0.5 * g_occ - 0.25 * (ints.e_occ(i) + ints.e_occ(j)) * g + 0.5 * ring;
        if i == j {
            v += ints.e_occ(i);
        }
        v
    })
}

fn add_m_ss_third_order(
    m_ss: &mut DMatrix<f64>,
    layout: &ConfigLayout,
    ints: &IntegralStore,
    amps: &SpinOrbitalAmplitudes,
    t2_2: &Tensor4,
) {
    let no = layout.nocc;
    let nv = layout.nvir;
    let t2_1 = &amps.t2_1;
    let t1_2 = &amps.t1_2;

    for i in 0..no {
        for j in 0..no {
            let mut v = 0.0;
            for l in 0..no {
                for d in 0..nv {
                    v += t1_2[(l, d)] * (ints.ooov(j, l, i, d) + ints.ovoo(j, d, i, l));
                }
            }
            let mut a = 0.0;
            let mut a_t = 0.0;
            let mut a_vir = 0.0;
            let mut a_occ = 0.0;
            let mut ring = 0.0;
            for l in 0..no {
                for d in 0..nv {
                    for e in 0..nv {
                        let p = t2_1[(i, l, d, e)] * t2_2[(j, l, d, e)];
                        let p_t = t2_1[(j, l, d, e)] * t2_2[(i, l, d, e)];
                        a += p;
                        a_t += p_t;
                        a_vir += ints.e_vir(d) * (p + p_t);
                        a_occ += ints.e_occ(l) * (p + p_t);
                        ring += t2_2[(i, l, d, e)] * ints.oovv(j, l, d, e)
                            + t2_2[(j, l, d, e)] * ints.vvoo(d, e, i, l);
                    }
                }
            }
            v += 0.5 * ring + a_vir - 0.5 * a_occ
                - 0.25 * (ints.e_occ(i) + ints.e_occ(j)) * (a + a_t);
            m_ss[(i, j)] += v;
        }
    }
}

/// ⟨aj‖xy⟩ compressed to ordered pairs: couples the doubles block into the
/// one-hole block.
fn build_c_sd(layout: &ConfigLayout, ints: &IntegralStore) -> DMatrix<f64> {
    DMatrix::from_fn(layout.nocc, layout.n_doubles(), |j, col| {
        let npair = layout.npair();
        let a = col / npair;
        let (x, y) = layout.pairs[col % npair];
        ints.vooo(a, j, x, y)
    })
}

/// ⟨xy‖ai⟩ compressed to ordered pairs: couples the one-hole block into
/// the doubles block.
fn build_c_ds(layout: &ConfigLayout, ints: &IntegralStore) -> DMatrix<f64> {
    DMatrix::from_fn(layout.n_doubles(), layout.nocc, |row, i| {
        let npair = layout.npair();
        let a = row / npair;
        let (x, y) = layout.pairs[row % npair];
        ints.oovo(x, y, a, i)
    })
}

fn add_coupling_third_order(
    c_sd: &mut DMatrix<f64>,
    c_ds: &mut DMatrix<f64>,
    layout: &ConfigLayout,
    ints: &IntegralStore,
    amps: &SpinOrbitalAmplitudes,
) {
    let no = layout.nocc;
    let nv = layout.nvir;
    let npair = layout.npair();
    let t2_1 = &amps.t2_1;

    for j in 0..no {
        for b in 0..nv {
            for (p, &(v, w)) in layout.pairs.iter().enumerate() {
                let mut s = 0.0;
                for d in 0..nv {
                    for e in 0..nv {
                        s += 0.5 * t2_1[(v, w, d, e)] * ints.vovv(b, j, d, e);
                    }
                }
                for l in 0..no {
                    for d in 0..nv {
                        s += t2_1[(v, l, b, d)] * ints.ooov(j, l, w, d);
                        s -= t2_1[(w, l, b, d)] * ints.ooov(j, l, v, d);
                    }
                }
                c_sd[(j, b * npair + p)] += s;
            }
        }
    }

    for a in 0..nv {
        for (p, &(x, y)) in layout.pairs.iter().enumerate() {
            for i in 0..no {
                let mut s = 0.0;
                for d in 0..nv {
                    for e in 0..nv {
                        s += 0.5 * t2_1[(x, y, d, e)] * ints.vvvo(d, e, a, i);
                    }
                }
                for l in 0..no {
                    for d in 0..nv {
                        s += t2_1[(x, l, a, d)] * ints.ovoo(y, d, i, l);
                        s -= t2_1[(y, l, a, d)] * ints.ovoo(x, d, i, l);
                    }
                }
                c_ds[(a * npair + p, i)] += s;
            }
        }
    }
}

fn build_d_diag(layout: &ConfigLayout, ints: &IntegralStore) -> DVector<f64> {
    DVector::from_fn(layout.n_doubles(), |row, _| {
        let npair = layout.npair();
        let a = row / npair;
        let (x, y) = layout.pairs[row % npair];
        ints.e_occ(x) + ints.e_occ(y) - ints.e_vir(a)
    })
}

/// Off-diagonal doubles block: hole-hole ladder paired with the virtual
/// identity plus four particle-hole exchange terms antisymmetrized over
/// both occupied pairs.
fn build_k_dd(layout: &ConfigLayout, ints: &IntegralStore) -> DMatrix<f64> {
    let npair = layout.npair();
    DMatrix::from_fn(layout.n_doubles(), layout.n_doubles(), |row, col| {
        let a = row / npair;
        let (x, y) = layout.pairs[row % npair];
        let b = col / npair;
        let (v, w) = layout.pairs[col % npair];

        let mut s = 0.0;
        if a == b {
            s += ints.oooo(x, y, w, v);
        }
        if w == x {
            s -= ints.vovo(b, y, a, v);
        }
        if w == y {
            s += ints.vovo(b, x, a, v);
        }
        if v == x {
            s += ints.vovo(b, y, a, w);
        }
        if v == y {
            s -= ints.vovo(b, x, a, w);
        }
        s
    })
}

/// The effective Hamiltonian with the complex frequency shift fixed at
/// construction.
pub struct ShiftedHamiltonian<'a> {
    blocks: &'a SigmaBlocks,
    iomega: Complex64,
}

impl<'a> ShiftedHamiltonian<'a> {
    pub fn new(blocks: &'a SigmaBlocks, omega: f64, broadening: f64) -> Self {
        ShiftedHamiltonian {
            blocks,
            iomega: Complex64::new(omega, broadening),
        }
    }

    pub fn dim(&self) -> usize {
        self.blocks.dim()
    }
}

/// Apply a real block matrix to a complex vector by acting on the real and
/// imaginary parts separately.
fn real_mul(m: &DMatrix<f64>, v: &DVector<Complex64>) -> DVector<Complex64> {
    let re = m * v.map(|z| z.re);
    let im = m * v.map(|z| z.im);
    DVector::from_fn(m.nrows(), |k, _| Complex64::new(re[k], im[k]))
}

impl LinearOperator for ShiftedHamiltonian<'_> {
    fn apply(&self, r: &DVector<Complex64>) -> DVector<Complex64> {
        let blocks = self.blocks;
        let ns = blocks.n_singles;
        let nd = blocks.n_doubles;
        let r1 = r.rows(0, ns).into_owned();
        let r2 = r.rows(ns, nd).into_owned();

        let s1 = real_mul(&blocks.m_ss, &r1) + real_mul(&blocks.c_sd, &r2);

        let mut s2 = real_mul(&blocks.c_ds, &r1);
        for k in 0..nd {
            s2[k] += blocks.d_diag[k] * r2[k];
        }
        if let Some(k_dd) = &blocks.k_dd {
            s2 += real_mul(k_dd, &r2);
        }

        DVector::from_fn(ns + nd, |p, _| {
            let sigma = if p < ns { s1[p] } else { s2[p - ns] };
            self.iomega * r[p] - sigma
        })
    }
}
