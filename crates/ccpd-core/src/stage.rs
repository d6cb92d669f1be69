use crate::blade::Blade;
use crate::numeric::Real;
use crate::thermo::ThermodynamicState;

/// One station of the machine: thermodynamic state, blade triangles,
/// and the annulus flow area in m^2.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompressorStage {
    pub state: ThermodynamicState,
    pub blade: Blade,
    pub flow_area: Real,
}
