use std::f64::consts::FRAC_PI_2;

use crate::error::{CoreError, CoreResult};
use crate::geometry::CompressorGeometry;
use crate::numeric::Real;
use crate::velocity::{MachTriangle, VelocityTriangle, VelocityVector};

/// Velocity and Mach triangles at the hub, midspan, and tip stations of
/// one blade row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Blade {
    pub hub: VelocityTriangle,
    pub mid: VelocityTriangle,
    pub tip: VelocityTriangle,
    pub hub_mach: MachTriangle,
    pub mid_mach: MachTriangle,
    pub tip_mach: MachTriangle,
}

impl Blade {
    /// Spread the midspan absolute velocity across the span by the
    /// free-vortex assumption: constant axial velocity and swirl, with
    /// the blade speed varying as omega * D / 2 at each station.
    ///
    /// Requires the inlet hub/mid/tip diameters to be populated on the
    /// geometry and the midspan absolute vector to be set.
    pub fn apply_free_vortex(
        &mut self,
        geometry: &CompressorGeometry,
        rotational_speed: Real,
    ) -> CoreResult<()> {
        if !(geometry.inlet_hub_diameter > 0.0
            && geometry.inlet_mid_diameter > geometry.inlet_hub_diameter
            && geometry.inlet_tip_diameter > geometry.inlet_mid_diameter)
        {
            return Err(CoreError::Precondition {
                what: "inlet hub/mid/tip diameters must be set and ordered",
            });
        }

        let mid_absolute = self.mid.absolute;
        let stations: [(&mut VelocityTriangle, Real); 3] = [
            (&mut self.hub, geometry.inlet_hub_diameter),
            (&mut self.mid, geometry.inlet_mid_diameter),
            (&mut self.tip, geometry.inlet_tip_diameter),
        ];

        for (triangle, diameter) in stations {
            let u = rotational_speed * diameter / 2.0;
            triangle.translational = VelocityVector {
                axial: 0.0,
                tangential: u,
                magnitude: u,
                angle: FRAC_PI_2,
            };
            triangle.absolute = mid_absolute;
            triangle.relative.axial = mid_absolute.axial;
            triangle.relative.tangential = mid_absolute.tangential - u;
            triangle.relative.recompute_polar();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn geometry() -> CompressorGeometry {
        CompressorGeometry {
            inlet_hub_diameter: 0.4,
            inlet_mid_diameter: 0.5,
            inlet_tip_diameter: 0.6,
            ..Default::default()
        }
    }

    #[test]
    fn axial_velocity_constant_across_span() {
        let mut blade = Blade::default();
        blade.mid.absolute = VelocityVector::from_components(5.0, 0.0);
        blade.apply_free_vortex(&geometry(), 29.0).unwrap();

        assert!((blade.hub.relative.axial - 5.0).abs() < 1e-12);
        assert!((blade.tip.relative.axial - 5.0).abs() < 1e-12);
        assert!((blade.hub.translational.magnitude - 29.0 * 0.2).abs() < 1e-12);
        assert!((blade.tip.translational.magnitude - 29.0 * 0.3).abs() < 1e-12);
        // purely axial inflow: relative swirl is minus the blade speed
        assert!((blade.mid.relative.tangential + 29.0 * 0.25).abs() < 1e-12);
    }

    #[test]
    fn rejects_unset_diameters() {
        let mut blade = Blade::default();
        blade.mid.absolute = VelocityVector::from_components(5.0, 0.0);
        let g = CompressorGeometry::default();
        assert!(blade.apply_free_vortex(&g, 29.0).is_err());
    }

    proptest! {
        #[test]
        fn relative_swirl_drops_hub_to_tip(
            omega in 10.0_f64..500.0,
            axial in 1.0_f64..100.0,
            swirl in 0.0_f64..50.0,
        ) {
            let mut blade = Blade::default();
            blade.mid.absolute = VelocityVector::from_components(axial, swirl);
            blade.apply_free_vortex(&geometry(), omega).unwrap();
            // blade speed grows with radius, so the relative swirl falls
            prop_assert!(blade.hub.relative.tangential > blade.mid.relative.tangential);
            prop_assert!(blade.mid.relative.tangential > blade.tip.relative.tangential);
        }
    }
}
