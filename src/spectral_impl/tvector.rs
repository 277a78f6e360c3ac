//! Spectral ("T") vector construction
//!
//! For a given orbital the T vector collects its overlap with the
//! correlated ionized/attached states: the source term of the linear
//! system. Hole orbitals couple to the one-hole block through a Kronecker
//! delta plus doubles self-overlap corrections; particle orbitals enter
//! through the singles amplitudes and the doubles slice at that particle
//! index.

use nalgebra::DVector;

use crate::amplitudes_impl::SpinOrbitalAmplitudes;

use super::ConfigLayout;

/// Build the T vector for one spin-orbital. Orbitals below `nocc` are
/// holes, the rest are particles.
pub fn spectral_vector(
    layout: &ConfigLayout,
    amps: &SpinOrbitalAmplitudes,
    orb: usize,
) -> DVector<f64> {
    let nocc = layout.nocc;
    let nvir = layout.nvir;
    let t2_1 = &amps.t2_1;
    let mut t = DVector::zeros(layout.dim());

    if orb < nocc {
        // one-hole branch: basis row plus doubles self-overlap
        t[orb] = 1.0;
        for i in 0..nocc {
            let mut s = 0.0;
            for k in 0..nocc {
                for d in 0..nvir {
                    for c in 0..nvir {
                        s += t2_1[(k, orb, d, c)] * t2_1[(i, k, d, c)];
                    }
                }
            }
            t[i] += 0.25 * s;
        }
        if let (Some(t2_2), Some(_)) = (&amps.t2_2, &amps.t1_3) {
            for i in 0..nocc {
                let mut s = 0.0;
                for k in 0..nocc {
                    for d in 0..nvir {
                        for c in 0..nvir {
                            s += t2_1[(k, orb, d, c)] * t2_2[(i, k, d, c)];
                            s += t2_1[(i, k, d, c)] * t2_2[(k, orb, d, c)];
                        }
                    }
                }
                t[i] += 0.25 * s;
            }
        }
    } else {
        let a = orb - nocc;
        for i in 0..nocc {
            t[i] = amps.t1_2[(i, a)];
        }
        if let Some(t1_3) = &amps.t1_3 {
            for i in 0..nocc {
                let mut s = 0.0;
                for k in 0..nocc {
                    for c in 0..nvir {
                        s += t2_1[(i, k, a, c)] * amps.t1_2[(k, c)];
                    }
                }
                t[i] += 0.5 * s + t1_3[(i, a)];
            }
        }

        // two-hole-one-particle block: doubles slice at the particle index,
        // restricted to strictly ordered occupied pairs
        for d in 0..nvir {
            for (p, &(x, y)) in layout.pairs.iter().enumerate() {
                let mut v = t2_1[(x, y, d, a)];
                if let Some(t2_2) = &amps.t2_2 {
                    v += t2_2[(x, y, d, a)];
                }
                t[nocc + layout.doubles_offset(d, p)] = v;
            }
        }
    }

    t
}
