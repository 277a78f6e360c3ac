//! Tests for the density-of-states driver

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::super::density_of_states;
    use crate::amplitudes_impl::{compute_amplitudes, SpinOrbitalAmplitudes};
    use crate::config::{Method, SpectrumConfig};
    use crate::integrals::IntegralStore;
    use crate::testutil::{noninteracting, random_system};

    fn so_amplitudes(method: Method, ints: &IntegralStore) -> SpinOrbitalAmplitudes {
        let amps = compute_amplitudes(method, &ints.space, ints).unwrap();
        SpinOrbitalAmplitudes::from_channels(&amps, &ints.space)
    }

    fn spectrum(freq_start: f64, freq_stop: f64, step: f64, broadening: f64) -> SpectrumConfig {
        SpectrumConfig {
            freq_start,
            freq_stop,
            step,
            broadening,
            tol: 1e-8,
            maxiter: 200,
        }
    }

    #[test]
    fn test_noninteracting_sum_rule() {
        // two degenerate hole poles at the occupied energy; the grid
        // integral recovers the number of holes up to Lorentzian tails
        let (_, ints) = noninteracting(&[-0.3, 0.8], 1);
        let amps = so_amplitudes(Method::Adc2, &ints);
        let cfg = spectrum(-1.5, 1.5, 0.01, 0.02);

        let samples = density_of_states(&ints, &amps, &cfg);
        assert_eq!(samples.len(), 300);
        assert!(samples.iter().all(|s| s.converged));
        assert!(samples.iter().all(|s| s.dos >= 0.0));

        let integral: f64 = samples.iter().map(|s| s.dos * cfg.step).sum();
        assert!((integral - 2.0).abs() < 0.05, "integral = {}", integral);
    }

    #[test]
    fn test_noninteracting_peak_position() {
        let (_, ints) = noninteracting(&[-0.3, 0.8], 1);
        let amps = so_amplitudes(Method::Adc2, &ints);
        let cfg = spectrum(-0.5, -0.1, 0.005, 0.02);

        let samples = density_of_states(&ints, &amps, &cfg);
        let peak = samples
            .iter()
            .max_by(|a, b| a.dos.partial_cmp(&b.dos).unwrap())
            .unwrap();
        assert!((peak.omega - (-0.3)).abs() < 0.01, "peak at {}", peak.omega);

        // two degenerate Lorentzians of height 1/(pi eta) each
        let expected_height = 2.0 / (std::f64::consts::PI * cfg.broadening);
        assert_relative_eq!(peak.dos, expected_height, max_relative = 0.01);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let (_, ints) = random_system(1, 2, 13);
        let amps = so_amplitudes(Method::Adc2X, &ints);
        let cfg = spectrum(-0.6, -0.2, 0.05, 0.02);

        let first = density_of_states(&ints, &amps, &cfg);
        let second = density_of_states(&ints, &amps, &cfg);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.omega.to_bits(), b.omega.to_bits());
            assert_eq!(a.dos.to_bits(), b.dos.to_bits());
            assert_eq!(a.converged, b.converged);
        }
    }

    #[test]
    fn test_finite_for_every_tier() {
        for method in [Method::Adc2, Method::Adc2X, Method::Adc3] {
            let (_, ints) = random_system(1, 2, 19);
            let amps = so_amplitudes(method, &ints);
            let cfg = spectrum(-0.8, -0.4, 0.1, 0.05);

            let samples = density_of_states(&ints, &amps, &cfg);
            assert_eq!(samples.len(), 4);
            assert!(samples.iter().all(|s| s.dos.is_finite()));
        }
    }

    #[test]
    fn test_iteration_cap_flags_samples() {
        let (_, ints) = random_system(1, 2, 13);
        let amps = so_amplitudes(Method::Adc2X, &ints);
        let mut cfg = spectrum(-0.5, -0.4, 0.05, 0.02);
        cfg.tol = 1e-16;
        cfg.maxiter = 0;

        let samples = density_of_states(&ints, &amps, &cfg);
        assert!(samples.iter().any(|s| !s.converged));
        assert!(samples.iter().all(|s| s.dos.is_finite()));
    }
}
