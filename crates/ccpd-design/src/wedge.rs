//! Wedge (channel) diffuser evaluated from design-chart constants, plus
//! the end-to-end pressure ratio and total-to-total efficiency.

use tracing::info;

use ccpd_core::numeric::Real;
use ccpd_core::velocity::VelocityVector;
use ccpd_core::CompressorStage;
use ccpd_fluids::WorkingFluid;

/// Channel length over throat width, from the design chart.
pub const LENGTH_WIDTH_RATIO: Real = 8.43;
/// Full divergence angle, degrees.
pub const DIVERGENCE_ANGLE_DEG: Real = 9.49;
/// Throat aspect ratio.
pub const ASPECT_RATIO: Real = 1.0;
/// Static pressure recovery coefficient at that geometry.
pub const PRESSURE_RECOVERY: Real = 0.62;
/// Diffusion efficiency at that geometry.
pub const DIFFUSER_EFFICIENCY: Real = 0.87;

#[derive(Clone, Copy, Debug)]
pub struct WedgeSolution {
    pub stage: CompressorStage,
    /// End-to-end total pressure ratio P04/P01.
    pub compression_ratio: Real,
    /// End-to-end total-to-total efficiency.
    pub total_efficiency: Real,
}

/// Vaned diffuser outlet diameter from the channel length projected at
/// the half-divergence angle.
pub fn vaned_diffuser_diameter(vaneless_diameter: Real, passage_width: Real) -> Real {
    let half_divergence = (DIVERGENCE_ANGLE_DEG / 2.0).to_radians();
    vaneless_diameter + 2.0 * LENGTH_WIDTH_RATIO * passage_width * half_divergence.cos()
}

/// Closed-form station 4 from the vaneless-diffuser exit conditions.
///
/// The chart recovery coefficient fixes the static pressure; the
/// diffusion efficiency splits the ideal temperature rise into the real
/// one; the remaining kinetic energy gives the exit velocity.
pub fn evaluate_wedge_diffuser(
    fluid: &WorkingFluid,
    vaneless: &CompressorStage,
    inlet_total_pressure: Real,
    inlet_total_temperature: Real,
    eulerian_work: Real,
) -> WedgeSolution {
    let k = fluid.isentropic_exponent();
    let total_temperature = vaneless.state.temperature.total;
    let t3_static = vaneless.state.temperature.static_;
    let p3_static = vaneless.state.pressure.static_;
    let p3_total = vaneless.state.pressure.total;

    let static_pressure = PRESSURE_RECOVERY * (p3_total - p3_static) + p3_static;
    let ideal_static_temperature = t3_static * (static_pressure / p3_static).powf(k);
    let static_temperature =
        t3_static + (ideal_static_temperature - t3_static) / DIFFUSER_EFFICIENCY;
    let static_density = fluid.ideal_gas_density(static_pressure, static_temperature);

    let enthalpy_loss = fluid.specific_heat * (static_temperature - ideal_static_temperature);
    let ideal_total_temperature = total_temperature - enthalpy_loss / fluid.specific_heat;
    let total_pressure = static_pressure
        * (ideal_total_temperature / static_temperature).powf(fluid.inverse_isentropic_exponent());

    let velocity =
        (2.0 * fluid.specific_heat * (total_temperature - static_temperature)).sqrt();
    let mach = velocity / fluid.speed_of_sound(static_temperature);

    let compression_ratio = total_pressure / inlet_total_pressure;
    let isentropic_rise = fluid.specific_heat
        * inlet_total_temperature
        * (compression_ratio.powf(k) - 1.0);
    let total_efficiency = isentropic_rise / eulerian_work;

    info!(
        compression_ratio,
        total_efficiency, "wedge diffuser evaluated"
    );

    let mut stage = CompressorStage::default();
    stage.blade.mid.absolute = VelocityVector::from_polar(velocity, 0.0);
    stage.blade.mid_mach.absolute = mach;
    stage.state.temperature.total = total_temperature;
    stage.state.temperature.static_ = static_temperature;
    stage.state.temperature.dynamic = total_temperature - static_temperature;
    stage.state.pressure.total = total_pressure;
    stage.state.pressure.static_ = static_pressure;
    stage.state.pressure.dynamic = total_pressure - static_pressure;
    let total_density = fluid.ideal_gas_density(total_pressure, total_temperature);
    stage.state.density.total = total_density;
    stage.state.density.static_ = static_density;
    stage.state.density.dynamic = total_density - static_density;
    stage.state.speed_of_sound = fluid.speed_of_sound(static_temperature);

    WedgeSolution {
        stage,
        compression_ratio,
        total_efficiency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccpd_core::ThermodynamicVariable;

    fn air() -> WorkingFluid {
        WorkingFluid {
            specific_heat: 1006.0,
            specific_ratio: 1.4,
            specific_gas_constant: 287.0,
            kinematic_viscosity: 18.13e-6,
        }
    }

    #[test]
    fn reference_station_four() {
        let mut vaneless = CompressorStage::default();
        vaneless.state.temperature = ThermodynamicVariable::new(320.0, 300.0, 20.0);
        vaneless.state.pressure = ThermodynamicVariable::new(120_000.0, 100_000.0, 20_000.0);

        let sol = evaluate_wedge_diffuser(&air(), &vaneless, 95_000.0, 298.0, 30_000.0);

        assert!((sol.stage.state.pressure.static_ - 112_400.0).abs() < 1e-6);
        assert!((sol.stage.state.temperature.static_ - 311.71110).abs() < 1e-4);
        assert!((sol.stage.state.density.static_ - 1.256412).abs() < 1e-5);
        assert!((sol.stage.state.pressure.total - 121_173.954).abs() < 1e-2);
        assert!((sol.stage.blade.mid.absolute.magnitude - 129.14048).abs() < 1e-4);
        assert!((sol.stage.blade.mid_mach.absolute - 0.364906).abs() < 1e-5);
        assert!((sol.compression_ratio - 1.275515).abs() < 1e-5);
        assert!((sol.total_efficiency - 0.719519).abs() < 1e-5);
    }

    #[test]
    fn vaned_diameter_extends_the_vaneless_exit() {
        let d4 = vaned_diffuser_diameter(0.8, 0.03);
        let half = (DIVERGENCE_ANGLE_DEG / 2.0).to_radians();
        assert!((d4 - (0.8 + 2.0 * 8.43 * 0.03 * half.cos())).abs() < 1e-12);
        assert!(d4 > 0.8);
    }
}
