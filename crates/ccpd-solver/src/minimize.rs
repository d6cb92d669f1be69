//! Golden-section search for bound-constrained scalar minimization.

use ccpd_core::numeric::Real;

use crate::error::{SolverError, SolverResult};

const INV_PHI: Real = 0.618_033_988_749_894_8;

#[derive(Clone, Copy, Debug)]
pub struct MinimizeControl {
    /// Stop when the bracket width falls below this.
    pub tolerance: Real,
    pub max_iterations: usize,
}

impl Default for MinimizeControl {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 200,
        }
    }
}

/// Minimize `f` over `[lower, upper]` by golden-section interval
/// shrinking. Assumes `f` is unimodal on the bracket; minima on the
/// boundary converge onto the boundary. Returns the bracket midpoint.
pub fn minimize_scalar<F>(
    mut f: F,
    lower: Real,
    upper: Real,
    control: MinimizeControl,
) -> SolverResult<Real>
where
    F: FnMut(Real) -> Real,
{
    if !(lower.is_finite() && upper.is_finite() && lower < upper) {
        return Err(SolverError::InvalidBracket { lower, upper });
    }

    let mut a = lower;
    let mut b = upper;
    let mut x1 = b - INV_PHI * (b - a);
    let mut x2 = a + INV_PHI * (b - a);
    let mut f1 = f(x1);
    let mut f2 = f(x2);

    for _ in 0..control.max_iterations {
        if (b - a).abs() < control.tolerance {
            break;
        }
        if f1 < f2 {
            b = x2;
            x2 = x1;
            f2 = f1;
            x1 = b - INV_PHI * (b - a);
            f1 = f(x1);
        } else {
            a = x1;
            x1 = x2;
            f1 = f2;
            x2 = a + INV_PHI * (b - a);
            f2 = f(x2);
        }
    }

    Ok(0.5 * (a + b))
}
