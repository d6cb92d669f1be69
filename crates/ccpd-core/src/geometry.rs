use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// Meridional geometry of the stage, filled in as the design progresses.
/// All diameters and heights in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompressorGeometry {
    pub number_of_blades: u32,

    pub inlet_hub_diameter: Real,
    pub inlet_mid_diameter: Real,
    pub inlet_tip_diameter: Real,
    pub inlet_blade_height: Real,
    pub inlet_hub_to_tip_ratio: Real,
    pub inlet_tip_to_outer_ratio: Real,

    /// Impeller outlet diameter D2.
    pub outer_diameter: Real,
    pub outlet_blade_height: Real,
    /// Outlet blade height over outer radius.
    pub outlet_height_ratio: Real,

    /// Vaneless diffuser outlet diameter D3.
    pub vaneless_diffuser_diameter: Real,
    /// Vaned (wedge) diffuser outlet diameter D4.
    pub vaned_diffuser_diameter: Real,
}

impl CompressorGeometry {
    /// Derive blade height, mid diameter, and the inlet diameter ratios
    /// from the hub/tip/outer diameters. The three diameters must be set
    /// and ordered before calling.
    pub fn calculate_inlet_blade_height_and_ratios(&mut self) -> CoreResult<()> {
        if !(self.inlet_hub_diameter > 0.0) {
            return Err(CoreError::Precondition {
                what: "inlet hub diameter must be positive",
            });
        }
        if !(self.inlet_tip_diameter > self.inlet_hub_diameter) {
            return Err(CoreError::Precondition {
                what: "inlet tip diameter must exceed the hub diameter",
            });
        }
        if !(self.outer_diameter > 0.0) {
            return Err(CoreError::Precondition {
                what: "outer diameter must be positive",
            });
        }

        self.inlet_blade_height = (self.inlet_tip_diameter - self.inlet_hub_diameter) / 2.0;
        self.inlet_mid_diameter = (self.inlet_tip_diameter + self.inlet_hub_diameter) / 2.0;
        self.inlet_hub_to_tip_ratio = self.inlet_hub_diameter / self.inlet_tip_diameter;
        self.inlet_tip_to_outer_ratio = self.inlet_tip_diameter / self.outer_diameter;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> CompressorGeometry {
        CompressorGeometry {
            inlet_hub_diameter: 0.4,
            inlet_tip_diameter: 0.6,
            outer_diameter: 0.9,
            ..Default::default()
        }
    }

    #[test]
    fn ratios_from_valid_diameters() {
        let mut g = geometry();
        g.calculate_inlet_blade_height_and_ratios().unwrap();
        assert!((g.inlet_blade_height - 0.1).abs() < 1e-12);
        assert!((g.inlet_mid_diameter - 0.5).abs() < 1e-12);
        assert!((g.inlet_hub_to_tip_ratio - 2.0 / 3.0).abs() < 1e-3);
        assert!((g.inlet_tip_to_outer_ratio - 2.0 / 3.0).abs() < 1e-3);
    }

    #[test]
    fn rejects_zero_hub() {
        let mut g = geometry();
        g.inlet_hub_diameter = 0.0;
        assert!(g.calculate_inlet_blade_height_and_ratios().is_err());
    }

    #[test]
    fn rejects_tip_not_above_hub() {
        let mut g = geometry();
        g.inlet_tip_diameter = 0.4;
        assert!(g.calculate_inlet_blade_height_and_ratios().is_err());
    }

    #[test]
    fn rejects_zero_outer() {
        let mut g = geometry();
        g.outer_diameter = 0.0;
        assert!(g.calculate_inlet_blade_height_and_ratios().is_err());
    }
}
