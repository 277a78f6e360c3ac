//! Error types for the ADC library

use thiserror::Error;

/// Errors raised by the ADC core.
#[derive(Debug, Error)]
pub enum AdcError {
    /// The configured method tier is not one of the supported levels.
    /// Raised before any amplitude computation begins.
    #[error("unknown ADC method \"{0}\" (expected adc(2), adc(2)-e or adc(3))")]
    UnknownMethod(String),

    /// A supplied array does not match the dimensions implied by the
    /// orbital counts.
    #[error("dimension mismatch for {what}: expected {expected}, got {got}")]
    BadDimensions {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Non-finite amplitudes were produced, which means the reference is
    /// (near-)degenerate and the perturbative denominators blew up.
    #[error("degenerate reference: amplitude equations produced non-finite values")]
    DegenerateReference,

    /// The conjugate-gradient iteration hit its iteration cap.
    #[error("conjugate gradient did not converge in {iterations} iterations (rms = {rms:.4e})")]
    CgNotConverged { iterations: usize, rms: f64 },
}
