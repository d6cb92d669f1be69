//! ccpd-core: stable foundation for the centrifugal compressor
//! preliminary design workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for the input record)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)
//! - the compressor data model: velocity vectors/triangles, blades,
//!   thermodynamic variables/states, geometry, stages, and the
//!   top-level design aggregate

pub mod blade;
pub mod compressor;
pub mod error;
pub mod geometry;
pub mod inputs;
pub mod numeric;
pub mod stage;
pub mod thermo;
pub mod units;
pub mod velocity;

// Re-exports: nice ergonomics for downstream crates
pub use blade::Blade;
pub use compressor::{CentrifugalCompressor, DeHallerNumbers};
pub use error::{CoreError, CoreResult};
pub use geometry::CompressorGeometry;
pub use inputs::DesignInputs;
pub use numeric::*;
pub use stage::CompressorStage;
pub use thermo::{ThermodynamicState, ThermodynamicVariable};
pub use velocity::{MachTriangle, VelocityTriangle, VelocityVector};
