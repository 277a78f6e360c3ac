//! Command-line argument parsing for ADC calculations

use clap::Parser;

/// Direct ADC density-of-states calculation with YAML configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Write the spectrum to this file (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the lower frequency bound
    #[arg(long)]
    pub freq_start: Option<f64>,

    /// Override the upper frequency bound
    #[arg(long)]
    pub freq_stop: Option<f64>,

    /// Override the frequency step
    #[arg(long)]
    pub step: Option<f64>,

    /// Override the Lorentzian broadening
    #[arg(long)]
    pub broadening: Option<f64>,

    /// Override the conjugate-gradient convergence tolerance
    #[arg(long)]
    pub tol: Option<f64>,

    /// Override the maximum number of conjugate-gradient iterations
    #[arg(long)]
    pub maxiter: Option<usize>,
}
