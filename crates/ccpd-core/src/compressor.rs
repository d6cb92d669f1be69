use crate::geometry::CompressorGeometry;
use crate::numeric::Real;
use crate::stage::CompressorStage;

/// De Haller numbers (relative velocity ratio W2/W1) per inlet station.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeHallerNumbers {
    pub hub: Real,
    pub mid: Real,
    pub tip: Real,
}

/// The design artifact: performance indicators, geometry, and the four
/// stations (inlet, impeller outlet, vaneless diffuser outlet, vaned
/// diffuser outlet). A fresh value is built on every outer iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CentrifugalCompressor {
    /// End-to-end total pressure ratio P04/P01.
    pub total_compression_ratio: Real,
    /// Impeller total pressure ratio P02/P01.
    pub impeller_compression_ratio: Real,
    /// End-to-end total-to-total efficiency.
    pub total_efficiency: Real,
    /// Stage loading his / U2^2.
    pub stage_loading: Real,
    /// Flow coefficient mdot / (rho01 * U2 * D2/2).
    pub flow_coefficient: Real,
    /// Outlet absolute axial over tangential velocity.
    pub blade_orientation_ratio: Real,
    /// |W1 tangential at midspan| / |W2|.
    pub diffusion_ratio: Real,
    pub de_haller: DeHallerNumbers,
    /// Lieblein diffusion factor at midspan.
    pub diffusion_factor: Real,

    /// Ideal specific work, J/kg.
    pub isentropic_work: Real,
    /// Actual specific work transferred by the rotor, J/kg.
    pub eulerian_work: Real,
    /// Shaft speed, rad/s.
    pub rotational_speed: Real,
    /// Shaft power l_eul * mdot, W.
    pub net_power: Real,

    pub geometry: CompressorGeometry,
    pub inlet: CompressorStage,
    pub outlet: CompressorStage,
    pub vaneless_outlet: CompressorStage,
    pub vaned_outlet: CompressorStage,
}
