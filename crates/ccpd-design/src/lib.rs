//! ccpd-design: the meanline design pipeline for a single-stage
//! centrifugal compressor.
//!
//! The pipeline sizes the machine station by station: inducer (tip
//! diameter + static density), impeller outlet (closed-form triangles +
//! loss-driven rotor efficiency), vaneless diffuser (average-density
//! momentum balance), and wedge diffuser (design-chart evaluation).
//! An outer loop drives the guessed end-to-end efficiency to the value
//! the losses actually permit.

pub mod config;
pub mod error;
pub mod inlet;
pub mod orchestrator;
pub mod outlet;
pub mod vaneless;
pub mod wedge;

pub use config::DesignConfig;
pub use error::{DesignError, DesignResult};
pub use orchestrator::{run_design, DesignOutcome};
