//! Vaneless diffuser: an average-density fixed point over the annular
//! passage between the impeller exit and the vaned diffuser inlet.

use std::f64::consts::PI;

use tracing::{debug, info};

use ccpd_core::numeric::{relative_change, Real};
use ccpd_core::velocity::VelocityVector;
use ccpd_core::CompressorStage;
use ccpd_fluids::WorkingFluid;
use ccpd_solver::{fixed_point, ConvergenceReport, IterationControl};

use crate::error::DesignResult;

/// Diffuser outlet over impeller outlet diameter.
pub const DIAMETER_RATIO: Real = 1.2;

#[derive(Clone, Copy, Debug)]
pub struct VanelessContext<'a> {
    pub fluid: &'a WorkingFluid,
    /// Refined impeller outlet station.
    pub outlet: &'a CompressorStage,
    pub outer_diameter: Real,
    /// Passage width, equal to the outlet blade height.
    pub blade_height: Real,
    pub mass_flow_rate: Real,
}

#[derive(Clone, Copy, Debug)]
pub struct VanelessSolution {
    pub stage: CompressorStage,
    /// Diffuser outlet diameter D3.
    pub diameter: Real,
}

#[derive(Clone, Copy, Debug)]
struct VanelessIterate {
    static_density: Real,
    v_tangential: Real,
    v_axial: Real,
    v_magnitude: Real,
    static_temperature: Real,
    mach: Real,
    static_pressure: Real,
    total_pressure: Real,
}

/// Drive the station-3 static density to consistency with the momentum
/// balance, continuity, and the friction-degraded total pressure.
pub fn vaneless_loop(
    ctx: &VanelessContext<'_>,
    control: IterationControl,
) -> DesignResult<(VanelessSolution, ConvergenceReport)> {
    let fluid = ctx.fluid;
    let gamma = fluid.specific_ratio;
    let d2 = ctx.outer_diameter;
    let d3 = DIAMETER_RATIO * d2;
    let b3 = ctx.blade_height;

    let v2 = ctx.outlet.blade.mid.absolute;
    let rho2 = ctx.outlet.state.density.static_;
    let total_temperature = ctx.outlet.state.temperature.total;
    let t2_static = ctx.outlet.state.temperature.static_;
    let p2_static = ctx.outlet.state.pressure.static_;

    let hydraulic_diameter = 4.0 * PI * d3 * b3 / (2.0 * (PI * d3 + b3));

    let initial = VanelessIterate {
        static_density: rho2,
        v_tangential: v2.tangential,
        v_axial: v2.axial,
        v_magnitude: v2.magnitude,
        static_temperature: t2_static,
        mach: ctx.outlet.blade.mid_mach.absolute,
        static_pressure: p2_static,
        total_pressure: ctx.outlet.state.pressure.total,
    };

    let (last, report) = fixed_point(initial, control, |it| {
        let density_avg = (rho2 + it.static_density) / 2.0;
        let velocity_avg = (it.v_magnitude + v2.magnitude) / 2.0;
        let reynolds_avg =
            density_avg * hydraulic_diameter * velocity_avg / fluid.kinematic_viscosity;
        let cf = 0.02 * (1.8e5 / reynolds_avg);

        // angular momentum with wall shear
        let v_tangential = v2.tangential
            / (DIAMETER_RATIO
                + cf / 2.0 * PI * rho2 * v2.tangential * d3 * (d3 - d2) / ctx.mass_flow_rate);
        let v_axial = ctx.mass_flow_rate / (PI * d3 * b3 * it.static_density);
        let v_magnitude = v_axial.hypot(v_tangential);

        let static_temperature =
            total_temperature - v_magnitude * v_magnitude / (2.0 * fluid.specific_heat);
        let mach = v_magnitude / fluid.speed_of_sound(static_temperature);

        // friction enthalpy loss over the radius change
        let enthalpy_loss = cf * d2 / 2.0
            * (1.0 - (1.0 / DIAMETER_RATIO).powf(1.5))
            * v2.magnitude
            * v2.magnitude
            / (1.5 * ctx.blade_height * v2.angle.cos());
        let ideal_total_temperature = total_temperature - enthalpy_loss / fluid.specific_heat;
        let total_pressure = p2_static
            * (ideal_total_temperature / t2_static).powf(fluid.inverse_isentropic_exponent());
        let static_pressure = total_pressure
            / (1.0 + (gamma - 1.0) / 2.0 * mach * mach).powf(fluid.inverse_isentropic_exponent());
        let next_density = fluid.ideal_gas_density(static_pressure, static_temperature);

        debug!(density = next_density, mach, "vaneless density pass");

        let next = VanelessIterate {
            static_density: next_density,
            v_tangential,
            v_axial,
            v_magnitude,
            static_temperature,
            mach,
            static_pressure,
            total_pressure,
        };
        Ok::<_, crate::DesignError>((next, relative_change(next_density, it.static_density)))
    })?;

    info!(
        iterations = report.iterations(),
        converged = report.converged(),
        "vaneless diffuser loop finished"
    );

    let mut stage = CompressorStage::default();
    stage.flow_area = PI * d3 * b3;
    stage.blade.mid.absolute = VelocityVector::from_components(last.v_axial, last.v_tangential);
    stage.state.temperature.total = total_temperature;
    stage.state.temperature.static_ = last.static_temperature;
    stage.state.temperature.dynamic = total_temperature - last.static_temperature;
    stage.state.pressure.total = last.total_pressure;
    stage.state.pressure.static_ = last.static_pressure;
    stage.state.pressure.dynamic = last.total_pressure - last.static_pressure;
    let total_density = fluid.ideal_gas_density(last.total_pressure, total_temperature);
    stage.state.density.total = total_density;
    stage.state.density.static_ = last.static_density;
    stage.state.density.dynamic = total_density - last.static_density;
    stage.state.speed_of_sound = fluid.speed_of_sound(last.static_temperature);
    stage.blade.mid_mach.absolute = last.mach;

    Ok((VanelessSolution { stage, diameter: d3 }, report))
}
