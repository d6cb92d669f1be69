//! ccpd-fluids: working-fluid properties for the compressor design
//! pipeline.
//!
//! The design loops treat the fluid as a calorically perfect ideal gas
//! described by four constants (cp, gamma, R, nu). This crate provides
//! the record, the isentropic/ideal-gas helpers built on it, and a
//! small named library with a built-in table plus JSON loading.

pub mod error;
pub mod library;
pub mod working_fluid;

pub use error::{FluidError, FluidResult};
pub use library::FluidLibrary;
pub use working_fluid::WorkingFluid;
