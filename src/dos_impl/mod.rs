//! Density-of-states driver

mod dos;

pub use dos::{density_of_states, SpectrumSample};

#[cfg(test)]
mod tests;
