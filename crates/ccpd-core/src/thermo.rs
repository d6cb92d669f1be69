use crate::numeric::Real;

/// Total/static/dynamic split of a thermodynamic quantity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThermodynamicVariable {
    pub total: Real,
    pub static_: Real,
    pub dynamic: Real,
}

impl ThermodynamicVariable {
    pub fn new(total: Real, static_: Real, dynamic: Real) -> Self {
        Self {
            total,
            static_,
            dynamic,
        }
    }
}

/// Thermodynamic state at one station of the machine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThermodynamicState {
    pub pressure: ThermodynamicVariable,
    pub density: ThermodynamicVariable,
    pub temperature: ThermodynamicVariable,
    /// Local speed of sound at static conditions, m/s.
    pub speed_of_sound: Real,
}
