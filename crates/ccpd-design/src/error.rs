use thiserror::Error;

use ccpd_core::CoreError;
use ccpd_fluids::FluidError;
use ccpd_solver::SolverError;

pub type DesignResult<T> = Result<T, DesignError>;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Fluid(#[from] FluidError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}
