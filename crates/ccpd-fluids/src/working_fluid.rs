use serde::{Deserialize, Serialize};

use crate::error::{FluidError, FluidResult};
use ccpd_core::numeric::Real;

/// Calorically perfect ideal gas, SI units throughout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkingFluid {
    /// Specific heat at constant pressure, J/(kg K).
    pub specific_heat: Real,
    /// Ratio of specific heats gamma.
    pub specific_ratio: Real,
    /// Specific gas constant, J/(kg K).
    pub specific_gas_constant: Real,
    /// Kinematic viscosity, m^2/s.
    pub kinematic_viscosity: Real,
}

impl WorkingFluid {
    pub fn validate(&self) -> FluidResult<()> {
        if !(self.specific_heat.is_finite() && self.specific_heat > 0.0) {
            return Err(FluidError::NonPhysical {
                what: "specific heat",
            });
        }
        if !(self.specific_ratio.is_finite() && self.specific_ratio > 1.0) {
            return Err(FluidError::NonPhysical {
                what: "specific heat ratio",
            });
        }
        if !(self.specific_gas_constant.is_finite() && self.specific_gas_constant > 0.0) {
            return Err(FluidError::NonPhysical {
                what: "specific gas constant",
            });
        }
        if !(self.kinematic_viscosity.is_finite() && self.kinematic_viscosity > 0.0) {
            return Err(FluidError::NonPhysical {
                what: "kinematic viscosity",
            });
        }
        Ok(())
    }

    /// (gamma - 1) / gamma, the exponent in T/T0 = (P/P0)^k.
    pub fn isentropic_exponent(&self) -> Real {
        (self.specific_ratio - 1.0) / self.specific_ratio
    }

    /// gamma / (gamma - 1), the exponent in P/P0 = (T/T0)^k.
    pub fn inverse_isentropic_exponent(&self) -> Real {
        self.specific_ratio / (self.specific_ratio - 1.0)
    }

    /// Speed of sound at the given static temperature.
    pub fn speed_of_sound(&self, static_temperature: Real) -> Real {
        (self.specific_ratio * self.specific_gas_constant * static_temperature).sqrt()
    }

    /// rho = P / (R T).
    pub fn ideal_gas_density(&self, pressure: Real, temperature: Real) -> Real {
        pressure / (self.specific_gas_constant * temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn air() -> WorkingFluid {
        WorkingFluid {
            specific_heat: 1006.0,
            specific_ratio: 1.4,
            specific_gas_constant: 287.0,
            kinematic_viscosity: 18.13e-6,
        }
    }

    #[test]
    fn validates_air() {
        air().validate().unwrap();
    }

    #[test]
    fn rejects_gamma_at_unity() {
        let mut bad = air();
        bad.specific_ratio = 1.0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn exponents_are_reciprocal() {
        let f = air();
        let product = f.isentropic_exponent() * f.inverse_isentropic_exponent();
        assert!((product - 1.0).abs() < 1e-12);
    }

    #[test]
    fn speed_of_sound_sea_level() {
        // a(288.15 K) for air is about 340 m/s
        let a = air().speed_of_sound(288.15);
        assert!((a - 340.26).abs() < 0.1);
    }

    #[test]
    fn density_standard_conditions() {
        let rho = air().ideal_gas_density(101_325.0, 288.15);
        assert!((rho - 1.225).abs() < 1e-3);
    }
}
