// Main library file for direct ADC spectral calculations

pub mod amplitudes_impl;
pub mod config;
pub mod dos_impl;
pub mod error;
pub mod integrals;
pub mod io;
pub mod solver_impl;
pub mod spectral_impl;
pub mod tensor;

#[cfg(test)]
pub(crate) mod testutil;
