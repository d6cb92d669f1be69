//! Velocity vectors and triangles in the meridional (axial/tangential)
//! plane. Components and polar form are stored side by side and kept in
//! sync only through the explicit `recompute_*` calls.

use crate::numeric::Real;

/// A 2-D velocity in axial/tangential components plus its polar form.
///
/// Angle convention: radians, measured from the axial direction,
/// positive toward the tangential direction (atan2(tangential, axial)).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityVector {
    pub axial: Real,
    pub tangential: Real,
    pub magnitude: Real,
    pub angle: Real,
}

impl VelocityVector {
    pub fn from_components(axial: Real, tangential: Real) -> Self {
        let mut v = Self {
            axial,
            tangential,
            ..Self::default()
        };
        v.recompute_polar();
        v
    }

    pub fn from_polar(magnitude: Real, angle: Real) -> Self {
        let mut v = Self {
            magnitude,
            angle,
            ..Self::default()
        };
        v.recompute_components();
        v
    }

    /// Derive magnitude and angle from the stored components.
    pub fn recompute_polar(&mut self) {
        self.magnitude = self.axial.hypot(self.tangential);
        self.angle = self.tangential.atan2(self.axial);
    }

    /// Derive components from the stored magnitude and angle.
    pub fn recompute_components(&mut self) {
        self.axial = self.magnitude * self.angle.cos();
        self.tangential = self.magnitude * self.angle.sin();
    }
}

/// Absolute, relative, and translational velocities at one blade station.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityTriangle {
    pub absolute: VelocityVector,
    pub relative: VelocityVector,
    pub translational: VelocityVector,
}

/// Mach numbers for the three legs of a velocity triangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MachTriangle {
    pub absolute: Real,
    pub relative: Real,
    pub translational: Real,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_3;

    #[test]
    fn components_to_polar_three_four_five() {
        let v = VelocityVector::from_components(4.0, 3.0);
        assert!((v.magnitude - 5.0).abs() < 1e-12);
        assert!((v.angle - (3.0_f64).atan2(4.0)).abs() < 1e-12);
    }

    #[test]
    fn polar_to_components_sixty_degrees() {
        let v = VelocityVector::from_polar(10.0, FRAC_PI_3);
        assert!((v.axial - 5.0).abs() < 1e-12);
        assert!((v.tangential - 10.0 * FRAC_PI_3.sin()).abs() < 1e-12);
    }

    #[test]
    fn negative_tangential_gives_negative_angle() {
        let v = VelocityVector::from_components(5.0, -5.0);
        assert!(v.angle < 0.0);
        assert!((v.magnitude - 50.0_f64.sqrt()).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn polar_round_trip(axial in 1.0_f64..500.0, tangential in 0.0_f64..500.0) {
            let v = VelocityVector::from_components(axial, tangential);
            let back = VelocityVector::from_polar(v.magnitude, v.angle);
            prop_assert!((back.axial - axial).abs() < 1e-9 * axial.max(1.0));
            prop_assert!((back.tangential - tangential).abs() < 1e-9 * tangential.max(1.0));
        }
    }
}
