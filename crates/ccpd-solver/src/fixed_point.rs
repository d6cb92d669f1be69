//! Generic fixed-point iteration driver.
//!
//! Every inner loop of the design pipeline has the same shape: refine an
//! estimate, measure a relative residual, stop on tolerance, bail out on
//! blow-up, give up when the budget runs out. This module captures that
//! shape once; the loops supply only their step closure.

use ccpd_core::numeric::Real;
use tracing::{debug, warn};

/// A residual above this is treated as divergence.
pub const DIVERGENCE_LIMIT: Real = 1.0e6;

/// Iteration budget and convergence tolerance for one loop.
#[derive(Clone, Copy, Debug)]
pub struct IterationControl {
    pub max_iterations: usize,
    pub tolerance: Real,
}

impl IterationControl {
    pub const fn new(max_iterations: usize, tolerance: Real) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }
}

/// How a fixed-point loop ended. Carried as data alongside the last
/// estimate; non-convergence is never an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConvergenceReport {
    Converged { iterations: usize, residual: Real },
    Diverged { iterations: usize, residual: Real },
    Exhausted { iterations: usize, residual: Real },
}

impl ConvergenceReport {
    pub fn converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    pub fn iterations(&self) -> usize {
        match *self {
            Self::Converged { iterations, .. }
            | Self::Diverged { iterations, .. }
            | Self::Exhausted { iterations, .. } => iterations,
        }
    }

    pub fn residual(&self) -> Real {
        match *self {
            Self::Converged { residual, .. }
            | Self::Diverged { residual, .. }
            | Self::Exhausted { residual, .. } => residual,
        }
    }
}

/// Drive `step` to a fixed point. `step` maps the current state to the
/// next state plus a non-negative relative residual; the driver commits
/// each next state before judging it, so the returned state is always
/// the most recent estimate.
///
/// The step closure is fallible so callers can thread their own fatal
/// errors (preconditions, fluid lookups) through with `?`.
pub fn fixed_point<S, E, F>(
    initial: S,
    control: IterationControl,
    mut step: F,
) -> Result<(S, ConvergenceReport), E>
where
    F: FnMut(&S) -> Result<(S, Real), E>,
{
    let mut state = initial;
    let mut residual = Real::INFINITY;

    for iteration in 1..=control.max_iterations {
        let (next, r) = step(&state)?;
        state = next;
        residual = r;
        debug!(iteration, residual, "fixed point step");

        if residual < control.tolerance {
            return Ok((
                state,
                ConvergenceReport::Converged {
                    iterations: iteration,
                    residual,
                },
            ));
        }
        if residual > DIVERGENCE_LIMIT {
            warn!(iteration, residual, "fixed point diverged");
            return Ok((
                state,
                ConvergenceReport::Diverged {
                    iterations: iteration,
                    residual,
                },
            ));
        }
    }

    warn!(
        max_iterations = control.max_iterations,
        residual, "fixed point budget exhausted"
    );
    Ok((
        state,
        ConvergenceReport::Exhausted {
            iterations: control.max_iterations,
            residual,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn contraction_converges() {
        // x <- (x + 2/x) / 2 converges to sqrt(2)
        let control = IterationControl::new(50, 1e-10);
        let (x, report) = fixed_point(1.0_f64, control, |&x| {
            let next = 0.5 * (x + 2.0 / x);
            Ok::<_, Infallible>((next, ((next - x) / x).abs()))
        })
        .unwrap();
        assert!(report.converged());
        assert!((x - 2.0_f64.sqrt()).abs() < 1e-9);
        assert!(report.iterations() < 10);
    }

    #[test]
    fn blow_up_reports_divergence() {
        let control = IterationControl::new(100, 1e-6);
        let (_, report) = fixed_point(1.0_f64, control, |&x| {
            let next = x * 10.0;
            Ok::<_, Infallible>((next, (next - x).abs() / x.abs()))
        })
        .unwrap();
        // residual is constant at 9.0 here, so the loop runs its budget out
        assert!(matches!(report, ConvergenceReport::Exhausted { .. }));

        let (_, report) = fixed_point(1.0_f64, control, |&x| {
            let next = x * x + 2.0;
            Ok::<_, Infallible>((next, (next - x).abs() / x.abs()))
        })
        .unwrap();
        assert!(matches!(report, ConvergenceReport::Diverged { .. }));
    }

    #[test]
    fn budget_exhaustion_keeps_last_estimate() {
        let control = IterationControl::new(3, 1e-12);
        let (x, report) = fixed_point(0.0_f64, control, |&x| {
            Ok::<_, Infallible>((x + 1.0, 1.0))
        })
        .unwrap();
        assert!(matches!(
            report,
            ConvergenceReport::Exhausted { iterations: 3, .. }
        ));
        assert!((x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn step_errors_propagate() {
        #[derive(Debug, PartialEq)]
        struct Boom;
        let control = IterationControl::new(10, 1e-6);
        let out = fixed_point(1.0_f64, control, |_| Err::<(f64, f64), _>(Boom));
        assert_eq!(out.unwrap_err(), Boom);
    }
}
