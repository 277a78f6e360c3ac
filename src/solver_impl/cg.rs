//! Conjugate gradients with the bilinear (unconjugated) inner product
//!
//! The shifted Hamiltonians are complex symmetric, not Hermitian, so the
//! recurrences use `dot` rather than `dotc`: this is the COCG variant of
//! conjugate gradients, for which symmetry alone is enough. Convergence is
//! measured on the root-mean-square residual so the threshold is
//! independent of the system dimension.

use nalgebra::DVector;
use num_complex::Complex64;
use tracing::debug;

use crate::error::AdcError;

use super::LinearOperator;

/// RMS below which the starting guess is accepted without iterating.
const BOOTSTRAP_RMS: f64 = 1e-8;

/// Outcome of a conjugate-gradient run.
#[derive(Debug, Clone)]
pub struct CgSolution {
    pub x: DVector<Complex64>,
    pub iterations: usize,
    pub rms: f64,
    pub converged: bool,
}

fn rms_of(res: &DVector<Complex64>) -> f64 {
    res.norm() / (res.len() as f64).sqrt()
}

/// Solve `op · x = rhs` starting from `x0`, reporting convergence in the
/// solution rather than failing.
pub fn cg_solve<O: LinearOperator>(
    op: &O,
    rhs: &DVector<Complex64>,
    x0: &DVector<Complex64>,
    tol: f64,
    maxiter: usize,
) -> CgSolution {
    let mut x = x0.clone();
    let mut res = rhs - op.apply(&x);
    let mut rms = rms_of(&res);
    if rms < BOOTSTRAP_RMS {
        return CgSolution {
            x,
            iterations: 0,
            rms,
            converged: true,
        };
    }

    let mut d = res.clone();
    let mut delta_new = res.dot(&res);

    for iter in 0..maxiter {
        let q = op.apply(&d);
        let alpha = delta_new / d.dot(&q);
        x += &d * alpha;
        res -= &q * alpha;

        let delta_old = delta_new;
        delta_new = res.dot(&res);
        let beta = delta_new / delta_old;
        d = &res + &d * beta;

        rms = rms_of(&res);
        debug!(iter = iter + 1, rms, "cg step");
        if rms < tol {
            return CgSolution {
                x,
                iterations: iter + 1,
                rms,
                converged: true,
            };
        }
    }

    CgSolution {
        x,
        iterations: maxiter,
        rms,
        converged: false,
    }
}

/// Like [`cg_solve`] but turns non-convergence into an error.
pub fn cg_solve_strict<O: LinearOperator>(
    op: &O,
    rhs: &DVector<Complex64>,
    x0: &DVector<Complex64>,
    tol: f64,
    maxiter: usize,
) -> Result<CgSolution, AdcError> {
    let sol = cg_solve(op, rhs, x0, tol, maxiter);
    if sol.converged {
        Ok(sol)
    } else {
        Err(AdcError::CgNotConverged {
            iterations: sol.iterations,
            rms: sol.rms,
        })
    }
}
