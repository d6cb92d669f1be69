use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;
use crate::units::{Length, MassRate, Pressure, Temperature};

/// Everything the designer supplies up front. Unit-bearing fields use
/// uom quantities; dimensionless fields are plain `Real`.
#[derive(Clone, Debug)]
pub struct DesignInputs {
    pub mass_flow_rate: MassRate,
    pub inlet_total_pressure: Pressure,
    pub inlet_total_temperature: Temperature,
    /// Target total pressure ratio across the stage.
    pub compression_ratio: Real,
    pub surface_roughness: Length,
    /// Radial gap between blade tip and shroud. Zero means "use the
    /// default fraction of blade thickness".
    pub tip_clearance: Length,
    pub hub_diameter: Length,
    /// Impeller outlet absolute flow angle guess, degrees.
    pub outlet_flow_angle_deg: Real,
    pub specific_diameter: Real,
    pub specific_speed: Real,
    /// Starting guess for the end-to-end total-to-total efficiency.
    pub efficiency_guess: Real,
    pub fluid: String,
    pub material: String,
}

impl DesignInputs {
    /// Fail fast on anything that would poison the loops downstream.
    pub fn validate(&self) -> CoreResult<()> {
        let positives: [(Real, &'static str); 8] = [
            (self.mass_flow_rate.value, "mass flow rate"),
            (self.inlet_total_pressure.value, "inlet total pressure"),
            (self.inlet_total_temperature.value, "inlet total temperature"),
            (self.surface_roughness.value, "surface roughness"),
            (self.hub_diameter.value, "hub diameter"),
            (self.specific_diameter, "specific diameter"),
            (self.specific_speed, "specific speed"),
            (self.efficiency_guess, "efficiency guess"),
        ];
        for (value, what) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidArg { what });
            }
        }
        if !self.compression_ratio.is_finite() || self.compression_ratio <= 0.0 {
            return Err(CoreError::InvalidArg {
                what: "compression ratio",
            });
        }
        if !self.tip_clearance.value.is_finite() || self.tip_clearance.value < 0.0 {
            return Err(CoreError::InvalidArg {
                what: "tip clearance",
            });
        }
        if !self.outlet_flow_angle_deg.is_finite()
            || self.outlet_flow_angle_deg <= 0.0
            || self.outlet_flow_angle_deg >= 90.0
        {
            return Err(CoreError::InvalidArg {
                what: "outlet flow angle (degrees, exclusive of 0 and 90)",
            });
        }
        if self.efficiency_guess > 1.0 {
            return Err(CoreError::InvalidArg {
                what: "efficiency guess above unity",
            });
        }
        Ok(())
    }
}
