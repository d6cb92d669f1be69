//! Impeller outlet: closed-form velocity triangles from the Euler work,
//! then the loss-driven rotor-efficiency fixed point.

use std::f64::consts::{FRAC_PI_2, PI};

use tracing::{debug, info};

use ccpd_core::numeric::{relative_change, Real};
use ccpd_core::velocity::VelocityVector;
use ccpd_core::{CompressorGeometry, CompressorStage};
use ccpd_fluids::WorkingFluid;
use ccpd_solver::{fixed_point, friction_factor, ConvergenceReport, IterationControl};

use crate::error::DesignResult;

/// Nominal blade thickness, m.
const BLADE_THICKNESS: Real = 0.002;
/// Tip gap assumed when the input clearance is zero, as a fraction of
/// the blade thickness.
const TIP_CLEARANCE_FRACTION: Real = 0.02;

/// Geometric (metal) flow angles at the three inlet stations.
#[derive(Clone, Copy, Debug, Default)]
pub struct StationAngles {
    pub hub: Real,
    pub mid: Real,
    pub tip: Real,
}

/// Enthalpy loss terms, J/kg.
#[derive(Clone, Copy, Debug, Default)]
pub struct LossBreakdown {
    pub incidence: Real,
    pub tip_clearance: Real,
    pub diffusion: Real,
    pub friction: Real,
}

impl LossBreakdown {
    pub fn total(&self) -> Real {
        self.incidence + self.tip_clearance + self.diffusion + self.friction
    }
}

/// Everything the loss loop reads but does not change.
#[derive(Clone, Copy, Debug)]
pub struct OutletContext<'a> {
    pub fluid: &'a WorkingFluid,
    /// Converged inlet station (relative triangles and static state).
    pub inlet: &'a CompressorStage,
    pub geometry: &'a CompressorGeometry,
    pub mass_flow_rate: Real,
    pub eulerian_work: Real,
    pub blade_speed: Real,
    pub inlet_total_temperature: Real,
    pub surface_roughness: Real,
    pub tip_clearance: Real,
}

/// Output of the loss loop: the refined outlet station plus the sizing
/// quantities the downstream diffusers need.
#[derive(Clone, Copy, Debug)]
pub struct OutletSolution {
    pub stage: CompressorStage,
    pub blade_height: Real,
    pub number_of_blades: u32,
    pub slip_factor: Real,
    pub geometric_inlet_angles: StationAngles,
    pub rotor_efficiency: Real,
    pub losses: LossBreakdown,
}

/// Metal angle after blade blockage: the tangential pitch shrinks by
/// one blade thickness per passage.
pub fn geometric_blade_angle(diameter: Real, number_of_blades: u32, flow_angle: Real) -> Real {
    let circumference = PI * diameter;
    ((circumference - Real::from(number_of_blades) * BLADE_THICKNESS) / circumference
        * flow_angle.tan())
    .atan()
}

/// Blade count from the mean relative flow angle and the radius ratio.
pub fn blade_count(mean_relative_angle: Real, outer_diameter: Real, inlet_mid_diameter: Real) -> u32 {
    let raw = 2.0 * PI * mean_relative_angle.cos()
        / (0.4 * (outer_diameter / inlet_mid_diameter).ln());
    raw.ceil() as u32 + 1
}

/// Build the outlet station in closed form from the outlet flow angle,
/// the Euler work, and the blade speed.
pub fn setup_outlet_stage(
    fluid: &WorkingFluid,
    outlet_flow_angle: Real,
    eulerian_work: Real,
    blade_speed: Real,
    inlet_total_temperature: Real,
) -> CompressorStage {
    let mut stage = CompressorStage::default();

    let v_tangential = eulerian_work / blade_speed;
    let v_magnitude = v_tangential / outlet_flow_angle.sin();
    let v_axial = v_magnitude * outlet_flow_angle.cos();
    stage.blade.mid.absolute = VelocityVector::from_components(v_axial, v_tangential);
    stage.blade.mid.translational = VelocityVector {
        axial: 0.0,
        tangential: blade_speed,
        magnitude: blade_speed,
        angle: FRAC_PI_2,
    };
    stage.blade.mid.relative =
        VelocityVector::from_components(v_axial, v_tangential - blade_speed);

    let total_temperature = inlet_total_temperature + eulerian_work / fluid.specific_heat;
    let static_temperature =
        total_temperature - v_magnitude * v_magnitude / (2.0 * fluid.specific_heat);
    stage.state.temperature.total = total_temperature;
    stage.state.temperature.static_ = static_temperature;
    stage.state.temperature.dynamic = total_temperature - static_temperature;

    let a = fluid.speed_of_sound(static_temperature);
    stage.state.speed_of_sound = a;
    stage.blade.mid_mach.absolute = v_magnitude / a;
    stage.blade.mid_mach.relative = stage.blade.mid.relative.magnitude / a;
    stage.blade.mid_mach.translational = blade_speed / a;

    stage
}

/// Transients carried across loss-loop iterations. Committed to the
/// outlet stage only after the loop settles.
#[derive(Clone, Copy, Debug)]
struct LossIterate {
    efficiency: Real,
    total_temperature: Real,
    static_temperature: Real,
    static_pressure: Real,
    total_pressure: Real,
    static_density: Real,
    blade_height: Real,
    number_of_blades: u32,
    slip_factor: Real,
    losses: LossBreakdown,
}

/// Rotor-efficiency fixed point.
///
/// Starting from a loss-free rotor, each pass recomputes the outlet
/// thermodynamics for the current efficiency, resizes the passage,
/// evaluates the four loss correlations, and reads off the efficiency
/// those losses actually permit.
pub fn outlet_loss_loop(
    ctx: &OutletContext<'_>,
    built: &CompressorStage,
    control: IterationControl,
) -> DesignResult<(OutletSolution, ConvergenceReport)> {
    let fluid = ctx.fluid;
    let gamma = fluid.specific_ratio;
    let geometry = ctx.geometry;
    let d2 = geometry.outer_diameter;
    let d1_mid = geometry.inlet_mid_diameter;
    let hub = geometry.inlet_hub_diameter;
    let tip = geometry.inlet_tip_diameter;

    let inlet_static_temperature = ctx.inlet.state.temperature.static_;
    let inlet_static_pressure = ctx.inlet.state.pressure.static_;
    let w1_hub = ctx.inlet.blade.hub.relative;
    let w1_mid = ctx.inlet.blade.mid.relative;
    let w1_tip = ctx.inlet.blade.tip.relative;
    let v1_axial = ctx.inlet.blade.mid.absolute.axial;

    let v2 = built.blade.mid.absolute;
    let w2 = built.blade.mid.relative;

    let gap = if ctx.tip_clearance > 0.0 {
        ctx.tip_clearance
    } else {
        TIP_CLEARANCE_FRACTION * BLADE_THICKNESS
    };

    let initial = LossIterate {
        efficiency: 1.0,
        total_temperature: built.state.temperature.total,
        static_temperature: built.state.temperature.static_,
        static_pressure: 0.0,
        total_pressure: 0.0,
        static_density: 0.0,
        blade_height: 0.0,
        number_of_blades: 0,
        slip_factor: 0.0,
        losses: LossBreakdown::default(),
    };

    let (last, report) = fixed_point(initial, control, |it| {
        let efficiency = it.efficiency;

        // outlet thermodynamics at the current rotor efficiency
        let total_temperature = ctx.inlet_total_temperature
            + ctx.eulerian_work * efficiency / fluid.specific_heat;
        let static_temperature =
            total_temperature - v2.magnitude * v2.magnitude / (2.0 * fluid.specific_heat);
        let mach = v2.magnitude / fluid.speed_of_sound(static_temperature);
        let static_pressure = inlet_static_pressure
            * (static_temperature / inlet_static_temperature)
                .powf(fluid.inverse_isentropic_exponent());
        let total_pressure = static_pressure
            * (1.0 + (gamma - 1.0) / 2.0 * mach * mach).powf(fluid.inverse_isentropic_exponent());
        let static_density = fluid.ideal_gas_density(static_pressure, static_temperature);

        // passage sizing
        let blade_height = ctx.mass_flow_rate / (static_density * PI * d2 * v2.axial);
        let mean_relative_angle = (w2.angle + w1_mid.angle) / 2.0;
        let number_of_blades = blade_count(mean_relative_angle, d2, d1_mid);
        let pitch = PI * d2 / Real::from(number_of_blades);
        let slip_factor = 1.0 - 0.63 * PI / Real::from(number_of_blades);

        // incidence: mismatch between the metal angle and the relative
        // flow at the hub
        let metal_hub = geometric_blade_angle(hub, number_of_blades, w1_hub.angle);
        let incidence_angle = metal_hub - w1_hub.angle;
        let incidence =
            (w1_hub.magnitude * incidence_angle.sin()).powi(2) / 2.0;

        // tip clearance
        let annulus = (tip * tip / 4.0 - hub * hub / 4.0)
            / ((d2 / 2.0 - tip / 2.0) * (1.0 + static_pressure / inlet_static_pressure));
        let tip_clearance = 0.6 * gap / blade_height
            * v2.tangential
            * (4.0 * PI / (blade_height * Real::from(number_of_blades))
                * annulus.ceil()
                * v2.tangential
                * v1_axial)
                .sqrt();

        // diffusion over the hydraulic blade length
        let hydraulic_length = (d2 / 2.0 - d1_mid / 2.0) / mean_relative_angle.cos();
        let w1_mean = (w1_hub.magnitude + w1_mid.magnitude + w1_tip.magnitude) / 3.0;
        let diffusion_parameter = 1.0 - w2.magnitude / w1_mean
            + PI * d2 * v2.tangential
                / (2.0 * Real::from(number_of_blades) * hydraulic_length * w1_mean)
            + 0.1 * (tip / 2.0 - hub / 2.0 + blade_height) / (d2 / 2.0 - tip / 2.0)
                * (1.0 + w2.magnitude / w1_mean);
        let diffusion =
            0.05 * diffusion_parameter * diffusion_parameter * ctx.blade_speed * ctx.blade_speed;

        // Fanning friction through the rectangular passage
        let flow_area = PI * d2 * blade_height;
        let perimeter = Real::from(number_of_blades) * (2.0 * blade_height + 2.0 * pitch);
        let hydraulic_diameter = 4.0 * flow_area / perimeter;
        let reynolds =
            static_density * w2.magnitude * hydraulic_diameter / fluid.kinematic_viscosity;
        let cf = friction_factor(reynolds, ctx.surface_roughness / hydraulic_diameter)?.value();
        let friction = 4.0 * (cf + 0.0015) * hydraulic_length * w2.magnitude * w2.magnitude
            / (2.0 * hydraulic_diameter);

        let losses = LossBreakdown {
            incidence,
            tip_clearance,
            diffusion,
            friction,
        };
        let next_efficiency = (ctx.eulerian_work - losses.total()) / ctx.eulerian_work;
        debug!(
            efficiency = next_efficiency,
            total_loss = losses.total(),
            number_of_blades,
            "rotor loss pass"
        );

        let next = LossIterate {
            efficiency: next_efficiency,
            total_temperature,
            static_temperature,
            static_pressure,
            total_pressure,
            static_density,
            blade_height,
            number_of_blades,
            slip_factor,
            losses,
        };
        Ok::<_, crate::DesignError>((next, relative_change(next_efficiency, efficiency)))
    })?;

    info!(
        iterations = report.iterations(),
        converged = report.converged(),
        rotor_efficiency = last.efficiency,
        "outlet loss loop finished"
    );

    // commit the settled iterate onto the station
    let mut stage = *built;
    stage.flow_area = PI * d2 * last.blade_height;
    stage.state.temperature.total = last.total_temperature;
    stage.state.temperature.static_ = last.static_temperature;
    stage.state.temperature.dynamic = last.total_temperature - last.static_temperature;
    stage.state.pressure.total = last.total_pressure;
    stage.state.pressure.static_ = last.static_pressure;
    stage.state.pressure.dynamic = last.total_pressure - last.static_pressure;
    let total_density = fluid.ideal_gas_density(last.total_pressure, last.total_temperature);
    stage.state.density.total = total_density;
    stage.state.density.static_ = last.static_density;
    stage.state.density.dynamic = total_density - last.static_density;
    let a = fluid.speed_of_sound(last.static_temperature);
    stage.state.speed_of_sound = a;
    stage.blade.mid_mach.absolute = v2.magnitude / a;
    stage.blade.mid_mach.relative = w2.magnitude / a;
    stage.blade.mid_mach.translational = ctx.blade_speed / a;

    let geometric_inlet_angles = StationAngles {
        hub: geometric_blade_angle(hub, last.number_of_blades, w1_hub.angle),
        mid: geometric_blade_angle(d1_mid, last.number_of_blades, w1_mid.angle),
        tip: geometric_blade_angle(tip, last.number_of_blades, w1_tip.angle),
    };

    let solution = OutletSolution {
        stage,
        blade_height: last.blade_height,
        number_of_blades: last.number_of_blades,
        slip_factor: last.slip_factor,
        geometric_inlet_angles,
        rotor_efficiency: last.efficiency,
        losses: last.losses,
    };
    Ok((solution, report))
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
    fn builder_reference_triangles() {
        let alpha2 = 65.0_f64.to_radians();
        let stage = setup_outlet_stage(&air(), alpha2, 22_404.4, 160.9, 298.0);

        let v2 = stage.blade.mid.absolute;
        let w2 = stage.blade.mid.relative;
        assert!((v2.tangential - 139.24425).abs() < 1e-3);
        assert!((v2.magnitude - 153.63903).abs() < 1e-3);
        assert!((v2.axial - 64.93066).abs() < 1e-3);
        assert!((w2.tangential + 21.65575).abs() < 1e-3);
        assert!((w2.magnitude - 68.44678).abs() < 1e-3);
        assert!((w2.angle + 0.321920).abs() < 1e-5);
    }

    #[test]
    fn builder_reference_thermo() {
        let alpha2 = 65.0_f64.to_radians();
        let stage = setup_outlet_stage(&air(), alpha2, 22_404.4, 160.9, 298.0);

        assert!((stage.state.temperature.total - 320.27078).abs() < 1e-3);
        assert!((stage.state.temperature.static_ - 308.53869).abs() < 1e-3);
        assert!((stage.blade.mid_mach.absolute - 0.436357).abs() < 1e-5);
        assert!((stage.blade.mid_mach.relative - 0.194399).abs() < 1e-5);
        assert!((stage.blade.mid_mach.translational - 0.456979).abs() < 1e-5);
    }

    #[test]
    fn blade_count_hand_check() {
        // 2*pi*cos(0.5) / (0.4*ln 2) = 19.888 -> 20 + 1
        assert_eq!(blade_count(-0.5, 0.4, 0.2), 21);
    }

    #[test]
    fn geometric_angle_shrinks_toward_flow_angle() {
        // blockage reduces the tangent, so the metal angle magnitude is
        // below the flow angle magnitude
        let flow = -1.1_f64;
        let metal = geometric_blade_angle(0.2, 15, flow);
        assert!(metal.abs() < flow.abs());
        assert!(metal < 0.0);
    }
}
