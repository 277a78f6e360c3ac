//! Direct ADC Density-of-States Command-Line Interface
//!
//! This is the main entry point for running direct (non-diagonalizing) ADC
//! spectral-function calculations with YAML configuration.

use std::fs;
use std::fs::File;
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use direct_adc::amplitudes_impl::{compute_amplitudes, mp2_energy, SpinOrbitalAmplitudes};
use direct_adc::config::{Args, Config};
use direct_adc::dos_impl::density_of_states;
use direct_adc::io::{load_system, setup_output, write_spectrum};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_output(args.output.as_ref());

    info!("Reading configuration from: {}", args.config_file);
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config: Config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    info!("Configuration loaded:\n{:?}", config);

    // unknown method tiers fail before any amplitude work
    let method = config.method()?;

    info!("Reading system data from: {}", config.system_file);
    let system = load_system(&config.system_file)?;
    let e_scf = system.e_scf;
    let enuc = system.enuc;
    let (space, ints) = system.into_parts()?;

    info!("Starting spectral function calculation");
    info!("Method: {}", config.method);
    info!(
        "Occupied orbitals: {} alpha, {} beta",
        space.nocc_a, space.nocc_b
    );
    info!(
        "Virtual orbitals: {} alpha, {} beta",
        space.nvir_a, space.nvir_b
    );
    info!("Number of electrons: {}", space.nelec());
    info!("Nuclear repulsion energy: {:.10} au", enuc);
    info!("Orbital energies (alpha):");
    for (i, e) in ints.mo_energy_a.iter().enumerate() {
        info!("  Level {}: {:.8} au", i + 1, e);
    }
    info!("Orbital energies (beta):");
    for (i, e) in ints.mo_energy_b.iter().enumerate() {
        info!("  Level {}: {:.8} au", i + 1, e);
    }

    let t0 = Instant::now();
    let amps = compute_amplitudes(method, &space, &ints)?;
    let so_amps = SpinOrbitalAmplitudes::from_channels(&amps, &space);
    info!(
        "Amplitudes computed in {:.3} s",
        t0.elapsed().as_secs_f64()
    );

    let e_mp2 = mp2_energy(&so_amps, &ints);
    info!("SCF energy: {:.10} au", e_scf);
    info!("MP2 correlation energy: {:.10} au", e_mp2);
    info!("Total MP2 energy: {:.10} au", e_scf + e_mp2);

    let spectrum = config.resolve_spectrum(&args);
    info!(
        "Frequency grid: [{}, {}) step {} broadening {}",
        spectrum.freq_start, spectrum.freq_stop, spectrum.step, spectrum.broadening
    );

    let t1 = Instant::now();
    let samples = density_of_states(&ints, &so_amps, &spectrum);
    info!(
        "Spectrum computed in {:.3} s ({} points)",
        t1.elapsed().as_secs_f64(),
        samples.len()
    );

    let unconverged = samples.iter().filter(|s| !s.converged).count();
    if unconverged > 0 {
        info!("{} frequency points did not fully converge", unconverged);
    }

    match args.output {
        Some(ref path) => {
            let mut file = File::create(path)
                .wrap_err_with(|| format!("Unable to create output file: {}", path))?;
            write_spectrum(&mut file, &samples)?;
            info!("Spectrum written to: {}", path);
        }
        None => {
            let stdout = std::io::stdout();
            write_spectrum(&mut stdout.lock(), &samples)?;
        }
    }

    Ok(())
}
