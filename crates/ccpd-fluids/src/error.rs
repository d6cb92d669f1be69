//! Fluid property errors.

use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

#[derive(Error, Debug)]
pub enum FluidError {
    /// Non-physical property values (negative cp, gamma at or below
    /// one, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    #[error("Unknown fluid: {name}")]
    UnknownFluid { name: String },

    #[error("Fluid table parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::NonPhysical { what: "gamma" };
        assert!(err.to_string().contains("gamma"));

        let err = FluidError::UnknownFluid {
            name: "unobtainium".into(),
        };
        assert!(err.to_string().contains("unobtainium"));
    }
}
