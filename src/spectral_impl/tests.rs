//! Tests for the configuration-space layout, spectral vectors and the
//! shifted operator

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::DVector;
    use num_complex::Complex64;

    use super::super::{spectral_vector, ConfigLayout, ShiftedHamiltonian, SigmaBlocks};
    use crate::amplitudes_impl::{compute_amplitudes, SpinOrbitalAmplitudes};
    use crate::config::Method;
    use crate::integrals::IntegralStore;
    use crate::solver_impl::LinearOperator;
    use crate::testutil::{noninteracting, random_system, XorShift};

    fn so_amplitudes(method: Method, ints: &IntegralStore) -> SpinOrbitalAmplitudes {
        let amps = compute_amplitudes(method, &ints.space, ints).unwrap();
        SpinOrbitalAmplitudes::from_channels(&amps, &ints.space)
    }

    fn random_complex_vector(n: usize, seed: u64) -> DVector<Complex64> {
        let mut rng = XorShift::new(seed);
        DVector::from_fn(n, |_, _| Complex64::new(rng.next_f64(), rng.next_f64()))
    }

    #[test]
    fn test_layout_dimensions() {
        let (space, _) = random_system(2, 3, 1);
        let layout = ConfigLayout::new(&space);

        // 4 occupied spin-orbitals -> 6 strictly ordered pairs
        assert_eq!(layout.nocc, 4);
        assert_eq!(layout.nvir, 6);
        assert_eq!(layout.npair(), 6);
        assert_eq!(layout.n_singles(), 4);
        assert_eq!(layout.n_doubles(), 36);
        assert_eq!(layout.dim(), 40);

        // pair list runs over the strict lower triangle, row-major
        assert_eq!(layout.pairs[0], (1, 0));
        assert_eq!(layout.pairs[1], (2, 0));
        assert_eq!(layout.pairs[2], (2, 1));
        assert_eq!(layout.pairs[3], (3, 0));
    }

    #[test]
    fn test_hole_vector_is_delta_without_interaction() {
        let (space, ints) = noninteracting(&[-1.0, -0.5, 0.6, 1.1], 2);
        let amps = so_amplitudes(Method::Adc2, &ints);
        let layout = ConfigLayout::new(&space);

        for orb in 0..layout.nocc {
            let t = spectral_vector(&layout, &amps, orb);
            for k in 0..layout.dim() {
                let expected = if k == orb { 1.0 } else { 0.0 };
                assert_relative_eq!(t[k], expected, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_particle_vector_vanishes_without_interaction() {
        let (space, ints) = noninteracting(&[-1.0, -0.5, 0.6, 1.1], 2);
        let amps = so_amplitudes(Method::Adc2, &ints);
        let layout = ConfigLayout::new(&space);

        for orb in layout.nocc..layout.nocc + layout.nvir {
            let t = spectral_vector(&layout, &amps, orb);
            assert!(t.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_operator_diagonal_without_interaction() {
        // with zero integrals the operator reduces to (omega + i eta) - e_k
        // on each configuration
        let energies = [-1.0, -0.5, 0.6, 1.1];
        let (space, ints) = noninteracting(&energies, 2);
        let amps = so_amplitudes(Method::Adc2X, &ints);
        let layout = ConfigLayout::new(&space);
        let blocks = SigmaBlocks::build(&layout, &ints, &amps);
        let op = ShiftedHamiltonian::new(&blocks, 0.3, 0.02);

        for k in 0..layout.dim() {
            let mut e = DVector::from_element(layout.dim(), Complex64::new(0.0, 0.0));
            e[k] = Complex64::new(1.0, 0.0);
            let out = op.apply(&e);

            let eps = if k < layout.nocc {
                ints.e_occ(k)
            } else {
                let a = (k - layout.nocc) / layout.npair();
                let (x, y) = layout.pairs[(k - layout.nocc) % layout.npair()];
                ints.e_occ(x) + ints.e_occ(y) - ints.e_vir(a)
            };
            let expected = Complex64::new(0.3 - eps, 0.02);
            for p in 0..layout.dim() {
                let want = if p == k {
                    expected
                } else {
                    Complex64::new(0.0, 0.0)
                };
                assert_relative_eq!(out[p].re, want.re, epsilon = 1e-12);
                assert_relative_eq!(out[p].im, want.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_operator_linearity() {
        let (_, ints) = random_system(2, 2, 11);
        let amps = so_amplitudes(Method::Adc2X, &ints);
        let layout = ConfigLayout::new(&ints.space);
        let blocks = SigmaBlocks::build(&layout, &ints, &amps);
        let op = ShiftedHamiltonian::new(&blocks, -0.2, 0.01);

        let u = random_complex_vector(layout.dim(), 21);
        let v = random_complex_vector(layout.dim(), 22);
        let alpha = Complex64::new(0.7, -0.3);
        let beta = Complex64::new(-1.1, 0.4);

        let lhs = op.apply(&(&u * alpha + &v * beta));
        let rhs = op.apply(&u) * alpha + op.apply(&v) * beta;
        for k in 0..layout.dim() {
            assert_relative_eq!(lhs[k].re, rhs[k].re, epsilon = 1e-10);
            assert_relative_eq!(lhs[k].im, rhs[k].im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_operator_is_complex_symmetric() {
        // the conjugate-gradient variant in use requires u . (A v) == v . (A u)
        // under the bilinear dot, for every tier
        for method in [Method::Adc2, Method::Adc2X, Method::Adc3] {
            let (_, ints) = random_system(2, 2, 5);
            let amps = so_amplitudes(method, &ints);
            let layout = ConfigLayout::new(&ints.space);
            let blocks = SigmaBlocks::build(&layout, &ints, &amps);
            let op = ShiftedHamiltonian::new(&blocks, 0.15, 0.01);

            let u = random_complex_vector(layout.dim(), 31);
            let v = random_complex_vector(layout.dim(), 32);
            let uv = u.dot(&op.apply(&v));
            let vu = v.dot(&op.apply(&u));
            assert_relative_eq!(uv.re, vu.re, epsilon = 1e-10);
            assert_relative_eq!(uv.im, vu.im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_spectral_vector_dimension() {
        let (_, ints) = random_system(2, 2, 9);
        let amps = so_amplitudes(Method::Adc3, &ints);
        let layout = ConfigLayout::new(&ints.space);

        for orb in 0..layout.nocc + layout.nvir {
            let t = spectral_vector(&layout, &amps, orb);
            assert_eq!(t.len(), layout.dim());
            assert!(t.iter().all(|v| v.is_finite()));
        }
    }
}
