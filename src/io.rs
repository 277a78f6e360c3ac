//! Input/Output operations for ADC calculations
//!
//! System data (orbital energies and the antisymmetrized spin-orbital
//! integral tensor) is read from YAML; the computed spectrum is written as
//! whitespace-separated columns to stdout or a file.

use std::fs;
use std::io::Write;

use color_eyre::eyre::{Result, WrapErr};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::dos_impl::SpectrumSample;
use crate::error::AdcError;
use crate::integrals::{IntegralStore, OrbitalSpace};
use crate::tensor::Tensor4;

/// Setup output configuration (logging, etc.)
pub fn setup_output(output_file: Option<&String>) {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    if let Some(file) = output_file {
        tracing::info!("Spectrum will be written to: {}", file);
    }
}

/// On-disk system description. Orbital energies are listed per spin
/// channel in occupied-then-virtual order; `v2e_so` is the flattened
/// row-major ⟨pq‖rs⟩ tensor over the merged spin-orbital basis.
#[derive(Debug, Deserialize, Serialize)]
pub struct SystemData {
    pub nocc_a: usize,
    pub nocc_b: usize,
    pub nvir_a: usize,
    pub nvir_b: usize,
    /// Reference (SCF) energy, reported alongside the correlation energy.
    pub e_scf: f64,
    /// Nuclear repulsion energy, already contained in `e_scf`.
    pub enuc: f64,
    pub mo_energy_a: Vec<f64>,
    pub mo_energy_b: Vec<f64>,
    pub v2e_so: Vec<f64>,
}

impl SystemData {
    /// Validate the dimensions and hand out the run-time structures.
    pub fn into_parts(self) -> Result<(OrbitalSpace, IntegralStore), AdcError> {
        let space = OrbitalSpace {
            nocc_a: self.nocc_a,
            nocc_b: self.nocc_b,
            nvir_a: self.nvir_a,
            nvir_b: self.nvir_b,
        };
        let nmo = space.nmo_so();
        if self.v2e_so.len() != nmo.pow(4) {
            return Err(AdcError::BadDimensions {
                what: "v2e_so",
                expected: nmo.pow(4),
                got: self.v2e_so.len(),
            });
        }
        let v2e = Tensor4::from_vec([nmo, nmo, nmo, nmo], self.v2e_so);
        let ints = IntegralStore::new(
            space,
            DVector::from_vec(self.mo_energy_a),
            DVector::from_vec(self.mo_energy_b),
            v2e,
        )?;
        Ok((space, ints))
    }
}

/// Load system data from a YAML file.
pub fn load_system(path: &str) -> Result<SystemData> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Unable to read system file: {}", path))?;
    serde_yml::from_str(&content).wrap_err_with(|| format!("Failed to parse system file: {}", path))
}

/// Write the spectrum as `omega dos` columns; unconverged points carry a
/// trailing marker so they are easy to filter downstream.
pub fn write_spectrum<W: Write>(writer: &mut W, samples: &[SpectrumSample]) -> Result<()> {
    writeln!(writer, "# omega  dos")?;
    for s in samples {
        if s.converged {
            writeln!(writer, "{:>12.6} {:>16.8e}", s.omega, s.dos)?;
        } else {
            writeln!(writer, "{:>12.6} {:>16.8e}  unconverged", s.omega, s.dos)?;
        }
    }
    Ok(())
}
