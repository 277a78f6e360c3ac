//! Conjugate-gradient solver for the shifted complex-symmetric systems

mod cg;

pub use cg::{cg_solve, cg_solve_strict, CgSolution};

use nalgebra::DVector;
use num_complex::Complex64;

/// Matrix-free linear map over complex vectors.
pub trait LinearOperator {
    fn apply(&self, v: &DVector<Complex64>) -> DVector<Complex64>;
}
