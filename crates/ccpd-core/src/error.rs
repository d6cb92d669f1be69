use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A physical precondition that must hold before a calculation may
    /// run. Never recoverable by iteration.
    #[error("Precondition violated: {what}")]
    Precondition { what: &'static str },
}
