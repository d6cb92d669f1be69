//! ccpd-solver: the numeric machinery shared by the design loops.
//!
//! Provides:
//! - A generic fixed-point iteration driver with a three-way outcome
//!   report (converged / diverged / budget exhausted)
//! - Bound-constrained golden-section scalar minimization
//! - The Colebrook friction-factor solve with laminar/transitional/
//!   turbulent regime handling

pub mod error;
pub mod fixed_point;
pub mod friction;
pub mod minimize;

pub use error::{SolverError, SolverResult};
pub use fixed_point::{fixed_point, ConvergenceReport, IterationControl, DIVERGENCE_LIMIT};
pub use friction::{friction_factor, FrictionFactor};
pub use minimize::{minimize_scalar, MinimizeControl};
