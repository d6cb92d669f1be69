use thiserror::Error;

pub type SolverResult<T> = Result<T, SolverError>;

#[derive(Error, Debug)]
pub enum SolverError {
    /// A fatal condition the iteration can never recover from.
    /// Distinct from non-convergence, which is reported as data.
    #[error("Precondition violated: {what}")]
    Precondition { what: &'static str },

    #[error("Invalid bracket: [{lower}, {upper}]")]
    InvalidBracket { lower: f64, upper: f64 },
}
