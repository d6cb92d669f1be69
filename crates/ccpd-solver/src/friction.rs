//! Darcy friction factor from the Colebrook-White equation.

use ccpd_core::numeric::Real;
use tracing::warn;

use crate::error::{SolverError, SolverResult};
use crate::fixed_point::DIVERGENCE_LIMIT;

const LAMINAR_LIMIT: Real = 2300.0;
const TURBULENT_LIMIT: Real = 4000.0;
const NEWTON_BUDGET: usize = 3;
const NEWTON_TOLERANCE: Real = 1e-6;

/// Flow-regime-tagged friction factor. The transitional band has no
/// reliable correlation, so it carries no value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrictionFactor {
    Laminar(Real),
    Transitional,
    Turbulent(Real),
}

impl FrictionFactor {
    /// Numeric value, with the transitional sentinel reading as zero.
    pub fn value(&self) -> Real {
        match *self {
            Self::Laminar(f) | Self::Turbulent(f) => f,
            Self::Transitional => 0.0,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Transitional)
    }
}

/// Solve for the friction factor at the given Reynolds number and
/// relative roughness.
///
/// Laminar flow (Re <= 2300) uses 64/Re. Turbulent flow (Re >= 4000)
/// solves Colebrook-White by Newton on x = 1/sqrt(f), seeded with the
/// Haaland approximation; three iterations take the residual well below
/// tolerance for any physical input.
pub fn friction_factor(reynolds: Real, relative_roughness: Real) -> SolverResult<FrictionFactor> {
    if !(reynolds.is_finite() && reynolds > 0.0) {
        return Err(SolverError::Precondition {
            what: "Reynolds number must be finite and positive",
        });
    }
    if !(relative_roughness.is_finite() && relative_roughness >= 0.0) {
        return Err(SolverError::Precondition {
            what: "relative roughness must be finite and non-negative",
        });
    }

    if reynolds <= LAMINAR_LIMIT {
        return Ok(FrictionFactor::Laminar(64.0 / reynolds));
    }
    if reynolds < TURBULENT_LIMIT {
        warn!(reynolds, "transitional regime, friction factor indeterminate");
        return Ok(FrictionFactor::Transitional);
    }

    let a = relative_roughness / 3.7;
    let b = 2.51 / reynolds;

    // Haaland seed
    let mut x = -1.8 * (6.9 / reynolds + a.powf(1.11)).log10();

    for _ in 0..NEWTON_BUDGET {
        let y = x + 2.0 * (a + b * x).log10();
        if y.abs() > DIVERGENCE_LIMIT {
            // keep the last estimate rather than escalate
            warn!(reynolds, residual = y, "Colebrook iteration diverged");
            break;
        }
        let y_prime = 1.0 + 2.0 * b / (Real::ln(10.0) * (a + b * x));
        let step = y / y_prime;
        x -= step;
        if step.abs() < NEWTON_TOLERANCE {
            break;
        }
    }

    Ok(FrictionFactor::Turbulent(1.0 / (x * x)))
}
