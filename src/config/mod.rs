//! Configuration management for ADC spectral calculations
//!
//! Run parameters come from a YAML file with optional fields that are
//! back-filled by `with_defaults()`; the command line can override the
//! spectrum parameters.

mod args;

pub use args::Args;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdcError;

/// Supported ADC method tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// ADC(2): first-order doubles and second-order singles amplitudes.
    Adc2,
    /// ADC(2)-x: ADC(2) plus second-order doubles and the off-diagonal
    /// doubles-doubles block.
    Adc2X,
    /// ADC(3): ADC(2)-x plus third-order singles and third-order couplings.
    Adc3,
}

impl FromStr for Method {
    type Err = AdcError;

    fn from_str(s: &str) -> Result<Self, AdcError> {
        match s {
            "adc(2)" => Ok(Method::Adc2),
            "adc(2)-e" | "adc(2)-x" => Ok(Method::Adc2X),
            "adc(3)" => Ok(Method::Adc3),
            other => Err(AdcError::UnknownMethod(other.to_string())),
        }
    }
}

/// Main configuration structure for an ADC run.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Method tier: "adc(2)", "adc(2)-e" or "adc(3)".
    pub method: String,
    /// Path to the YAML system-data file (orbital energies and integrals).
    pub system_file: String,
    pub spectrum: SpectrumParams,
}

/// Frequency-grid and solver parameters.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SpectrumParams {
    pub freq_start: Option<f64>,
    pub freq_stop: Option<f64>,
    pub step: Option<f64>,
    pub broadening: Option<f64>,
    pub tol: Option<f64>,
    pub maxiter: Option<usize>,
}

impl Default for SpectrumParams {
    fn default() -> Self {
        SpectrumParams {
            freq_start: Some(-1.0),
            freq_stop: Some(1.0),
            step: Some(0.01),
            broadening: Some(0.01),
            tol: Some(1e-6),
            maxiter: Some(200),
        }
    }
}

impl SpectrumParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.freq_start.is_none() {
            self.freq_start = defaults.freq_start;
        }
        if self.freq_stop.is_none() {
            self.freq_stop = defaults.freq_stop;
        }
        if self.step.is_none() {
            self.step = defaults.step;
        }
        if self.broadening.is_none() {
            self.broadening = defaults.broadening;
        }
        if self.tol.is_none() {
            self.tol = defaults.tol;
        }
        if self.maxiter.is_none() {
            self.maxiter = defaults.maxiter;
        }
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.spectrum = self.spectrum.with_defaults();
        self
    }

    /// Parse the method tier string; unknown tiers fail before any
    /// amplitude work starts.
    pub fn method(&self) -> Result<Method, AdcError> {
        self.method.parse()
    }

    /// Resolve the spectrum section against CLI overrides into the
    /// immutable value handed to the driver.
    pub fn resolve_spectrum(&self, args: &Args) -> SpectrumConfig {
        let p = &self.spectrum;
        SpectrumConfig {
            freq_start: args.freq_start.or(p.freq_start).unwrap_or(-1.0),
            freq_stop: args.freq_stop.or(p.freq_stop).unwrap_or(1.0),
            step: args.step.or(p.step).unwrap_or(0.01),
            broadening: args.broadening.or(p.broadening).unwrap_or(0.01),
            tol: args.tol.or(p.tol).unwrap_or(1e-6),
            maxiter: args.maxiter.or(p.maxiter).unwrap_or(200),
        }
    }
}

/// Fully resolved spectrum parameters, passed by reference to the driver.
#[derive(Debug, Clone, Copy)]
pub struct SpectrumConfig {
    pub freq_start: f64,
    pub freq_stop: f64,
    pub step: f64,
    pub broadening: f64,
    pub tol: f64,
    pub maxiter: usize,
}
