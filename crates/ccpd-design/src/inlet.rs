//! Inducer sizing: tip-diameter minimization, the static-density fixed
//! point, and the post-convergence population of the inlet station.

use std::f64::consts::PI;

use tracing::{debug, info};

use ccpd_core::numeric::{relative_change, Real};
use ccpd_core::velocity::VelocityVector;
use ccpd_core::{CentrifugalCompressor, CompressorStage, CoreError};
use ccpd_fluids::WorkingFluid;
use ccpd_solver::{fixed_point, minimize_scalar, ConvergenceReport, IterationControl, MinimizeControl};

use crate::error::DesignResult;

/// Fraction of the outer diameter bracketing the tip-diameter search.
const TIP_BOUND_LOWER: Real = 0.4;
const TIP_BOUND_UPPER: Real = 0.6;

/// Converged inducer quantities, all SI.
#[derive(Clone, Copy, Debug)]
pub struct InletSolution {
    pub tip_diameter: Real,
    pub flow_area: Real,
    pub velocity_magnitude: Real,
    pub static_temperature: Real,
    pub static_pressure: Real,
    pub static_density: Real,
    pub mach: Real,
}

/// Squared inducer-tip relative velocity as a function of tip diameter:
/// the blade-speed term grows with diameter while the throughflow term
/// shrinks, so the sum has a single interior or boundary minimum.
pub fn relative_tip_velocity_squared(
    rotational_speed: Real,
    mass_flow_rate: Real,
    density: Real,
    hub_diameter: Real,
) -> impl Fn(Real) -> Real {
    move |diameter: Real| {
        let blade = rotational_speed * rotational_speed * diameter * diameter / 4.0;
        let area = PI / 4.0 * (diameter * diameter - hub_diameter * hub_diameter);
        let axial = mass_flow_rate / (density * area);
        blade + axial * axial
    }
}

/// Pick the inducer tip diameter that minimizes the tip relative
/// velocity over `[lower, upper]`.
///
/// A non-finite shaft speed is fatal here: it means the upstream
/// isentropic work came out negative, which no amount of iteration can
/// repair.
pub fn tip_diameter(
    rotational_speed: Real,
    mass_flow_rate: Real,
    density: Real,
    hub_diameter: Real,
    lower: Real,
    upper: Real,
) -> DesignResult<Real> {
    if !rotational_speed.is_finite() {
        return Err(CoreError::Precondition {
            what: "rotational speed is non-finite (isentropic work must be positive)",
        }
        .into());
    }
    if !(density.is_finite() && density > 0.0) {
        return Err(CoreError::Precondition {
            what: "inlet density must be positive",
        }
        .into());
    }

    let objective =
        relative_tip_velocity_squared(rotational_speed, mass_flow_rate, density, hub_diameter);
    let d = minimize_scalar(objective, lower, upper, MinimizeControl::default())?;
    Ok(d)
}

/// Inducer static-density fixed point.
///
/// Each pass resizes the tip for the current density, then recovers the
/// density from continuity and the isentropic total/static relations.
/// The search bracket is `[0.4, 0.6]` of the impeller outer diameter.
pub fn inlet_loop(
    fluid: &WorkingFluid,
    mass_flow_rate: Real,
    inlet_total_pressure: Real,
    inlet_total_temperature: Real,
    hub_diameter: Real,
    rotational_speed: Real,
    outer_diameter: Real,
    control: IterationControl,
) -> DesignResult<(InletSolution, ConvergenceReport)> {
    let gamma = fluid.specific_ratio;
    let lower = TIP_BOUND_LOWER * outer_diameter;
    let upper = TIP_BOUND_UPPER * outer_diameter;

    let initial = InletSolution {
        tip_diameter: 0.0,
        flow_area: 0.0,
        velocity_magnitude: 0.0,
        static_temperature: inlet_total_temperature,
        static_pressure: inlet_total_pressure,
        static_density: fluid.ideal_gas_density(inlet_total_pressure, inlet_total_temperature),
        mach: 0.0,
    };

    let (solution, report) = fixed_point(initial, control, |state| {
        let density = state.static_density;
        let d = tip_diameter(
            rotational_speed,
            mass_flow_rate,
            density,
            hub_diameter,
            lower,
            upper,
        )?;
        let flow_area = PI / 4.0 * (d * d - hub_diameter * hub_diameter);
        let velocity = mass_flow_rate / (density * flow_area);
        let static_temperature =
            inlet_total_temperature - velocity * velocity / (2.0 * fluid.specific_heat);
        let mach = velocity / fluid.speed_of_sound(static_temperature);
        let static_pressure = inlet_total_pressure
            / (1.0 + (gamma - 1.0) / 2.0 * mach * mach).powf(fluid.inverse_isentropic_exponent());
        let next_density = fluid.ideal_gas_density(static_pressure, static_temperature);

        debug!(
            tip_diameter = d,
            velocity, density = next_density, "inlet density pass"
        );

        let next = InletSolution {
            tip_diameter: d,
            flow_area,
            velocity_magnitude: velocity,
            static_temperature,
            static_pressure,
            static_density: next_density,
            mach,
        };
        Ok::<_, crate::DesignError>((next, relative_change(next_density, density)))
    })?;

    info!(
        iterations = report.iterations(),
        converged = report.converged(),
        tip_diameter = solution.tip_diameter,
        "inlet loop finished"
    );
    Ok((solution, report))
}

/// Commit the converged inducer onto the aggregate: geometry ratios,
/// the inlet thermodynamic state, the free-vortex blade triangles, and
/// the inlet Mach numbers.
pub fn finalize_inlet(
    compressor: &mut CentrifugalCompressor,
    fluid: &WorkingFluid,
    solution: &InletSolution,
    inlet_total_pressure: Real,
    inlet_total_temperature: Real,
    hub_diameter: Real,
    rotational_speed: Real,
) -> DesignResult<()> {
    let geometry = &mut compressor.geometry;
    geometry.inlet_hub_diameter = hub_diameter;
    geometry.inlet_tip_diameter = solution.tip_diameter;
    geometry.calculate_inlet_blade_height_and_ratios()?;

    let stage = &mut compressor.inlet;
    stage.flow_area = solution.flow_area;

    let total_density = fluid.ideal_gas_density(inlet_total_pressure, inlet_total_temperature);
    stage.state.pressure.total = inlet_total_pressure;
    stage.state.pressure.static_ = solution.static_pressure;
    stage.state.pressure.dynamic = inlet_total_pressure - solution.static_pressure;
    stage.state.temperature.total = inlet_total_temperature;
    stage.state.temperature.static_ = solution.static_temperature;
    stage.state.temperature.dynamic = inlet_total_temperature - solution.static_temperature;
    stage.state.density.total = total_density;
    stage.state.density.static_ = solution.static_density;
    stage.state.density.dynamic = total_density - solution.static_density;

    // axial inflow, no pre-swirl
    stage.blade.mid.absolute = VelocityVector::from_components(solution.velocity_magnitude, 0.0);
    stage.blade.apply_free_vortex(&compressor.geometry, rotational_speed)?;

    calculate_remaining_inlet_quantities(stage, fluid, inlet_total_temperature)?;
    Ok(())
}

/// Mach triangles and the mid static temperature, referenced to the
/// speed of sound at total conditions.
pub fn calculate_remaining_inlet_quantities(
    stage: &mut CompressorStage,
    fluid: &WorkingFluid,
    inlet_total_temperature: Real,
) -> DesignResult<()> {
    if !(fluid.specific_ratio > 0.0
        && fluid.specific_gas_constant > 0.0
        && fluid.specific_heat > 0.0)
    {
        return Err(CoreError::Precondition {
            what: "fluid constants must be positive",
        }
        .into());
    }
    if !(inlet_total_temperature > 0.0) {
        return Err(CoreError::Precondition {
            what: "inlet total temperature must be positive",
        }
        .into());
    }

    let a = fluid.speed_of_sound(inlet_total_temperature);
    stage.state.speed_of_sound = a;

    let mid_velocity = stage.blade.mid.absolute.magnitude;
    stage.blade.mid_mach.absolute = mid_velocity / a;
    stage.blade.hub_mach.relative = stage.blade.hub.relative.magnitude / a;
    stage.blade.mid_mach.relative = stage.blade.mid.relative.magnitude / a;
    stage.blade.tip_mach.relative = stage.blade.tip.relative.magnitude / a;
    stage.blade.hub_mach.translational = stage.blade.hub.translational.magnitude / a;
    stage.blade.mid_mach.translational = stage.blade.mid.translational.magnitude / a;
    stage.blade.tip_mach.translational = stage.blade.tip.translational.magnitude / a;

    stage.state.temperature.static_ = inlet_total_temperature
        - mid_velocity * mid_velocity / (2.0 * fluid.specific_heat);
    Ok(())
}
