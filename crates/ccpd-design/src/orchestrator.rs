//! Outer efficiency-convergence loop: builds a complete machine for
//! each guessed end-to-end efficiency until the guess matches what the
//! losses permit.

use tracing::{debug, info, warn};

use ccpd_core::numeric::{ensure_finite, relative_change, Real};
use ccpd_core::{CentrifugalCompressor, DeHallerNumbers, DesignInputs};
use ccpd_fluids::WorkingFluid;
use ccpd_solver::{ConvergenceReport, DIVERGENCE_LIMIT};

use crate::config::DesignConfig;
use crate::error::DesignResult;
use crate::inlet::{finalize_inlet, inlet_loop};
use crate::outlet::{outlet_loss_loop, setup_outlet_stage, OutletContext};
use crate::vaneless::{vaneless_loop, VanelessContext};
use crate::wedge::{evaluate_wedge_diffuser, vaned_diffuser_diameter};

/// Result of a design run: the machine from the last outer iteration,
/// how the outer loop ended, and the efficiency trace.
#[derive(Clone, Debug)]
pub struct DesignOutcome {
    pub compressor: CentrifugalCompressor,
    pub report: ConvergenceReport,
    /// Achieved total-to-total efficiency per outer iteration.
    pub efficiency_history: Vec<Real>,
}

/// Size the whole stage for the given inputs and fluid.
///
/// Each outer pass builds a fresh machine from the current efficiency
/// guess; the achieved total-to-total efficiency feeds the next guess.
/// Non-convergence is reported, not raised: the last machine is always
/// returned alongside the report.
pub fn run_design(
    inputs: &DesignInputs,
    fluid: &WorkingFluid,
    config: &DesignConfig,
) -> DesignResult<DesignOutcome> {
    inputs.validate()?;
    fluid.validate()?;

    let mut efficiency_guess = inputs.efficiency_guess;
    let mut efficiency_history = Vec::new();
    let mut compressor = CentrifugalCompressor::default();
    let mut report = None;
    let mut residual = Real::INFINITY;

    for iteration in 1..=config.outer.max_iterations {
        let built = design_iteration(inputs, fluid, config, efficiency_guess)?;
        // a NaN here would otherwise drain the budget looking converged-ish
        let achieved = ensure_finite(built.total_efficiency, "total-to-total efficiency")?;
        compressor = built;
        efficiency_history.push(achieved);

        residual = relative_change(efficiency_guess, achieved);
        debug!(
            iteration,
            efficiency_guess, achieved, residual, "outer efficiency pass"
        );

        if residual < config.outer.tolerance {
            info!(iteration, achieved, "design converged");
            report = Some(ConvergenceReport::Converged {
                iterations: iteration,
                residual,
            });
            break;
        }
        if residual > DIVERGENCE_LIMIT {
            warn!(iteration, residual, "design diverged");
            report = Some(ConvergenceReport::Diverged {
                iterations: iteration,
                residual,
            });
            break;
        }
        efficiency_guess = achieved;
    }

    let report = report.unwrap_or_else(|| {
        warn!(
            max_iterations = config.outer.max_iterations,
            residual, "outer budget exhausted"
        );
        ConvergenceReport::Exhausted {
            iterations: config.outer.max_iterations,
            residual,
        }
    });

    Ok(DesignOutcome {
        compressor,
        report,
        efficiency_history,
    })
}

/// One complete machine build at a fixed efficiency guess.
fn design_iteration(
    inputs: &DesignInputs,
    fluid: &WorkingFluid,
    config: &DesignConfig,
    efficiency_guess: Real,
) -> DesignResult<CentrifugalCompressor> {
    let mass_flow_rate = inputs.mass_flow_rate.value;
    let inlet_total_pressure = inputs.inlet_total_pressure.value;
    let inlet_total_temperature = inputs.inlet_total_temperature.value;
    let hub_diameter = inputs.hub_diameter.value;

    // similarity sizing from the specific speed and diameter
    let k = fluid.isentropic_exponent();
    let isentropic_work = fluid.specific_heat
        * inlet_total_temperature
        * (inputs.compression_ratio.powf(k) - 1.0);
    let total_density = fluid.ideal_gas_density(inlet_total_pressure, inlet_total_temperature);
    let volume_flow = mass_flow_rate / total_density;
    let outer_diameter = inputs.specific_diameter * volume_flow.sqrt() / isentropic_work.powf(0.25);
    let rotational_speed = inputs.specific_speed * isentropic_work.powf(0.75) / volume_flow.sqrt();
    let blade_speed = rotational_speed * outer_diameter / 2.0;
    let eulerian_work = isentropic_work / efficiency_guess;

    let mut compressor = CentrifugalCompressor {
        isentropic_work,
        eulerian_work,
        rotational_speed,
        net_power: eulerian_work * mass_flow_rate,
        stage_loading: isentropic_work / (blade_speed * blade_speed),
        flow_coefficient: mass_flow_rate / (total_density * blade_speed * outer_diameter / 2.0),
        ..Default::default()
    };
    compressor.geometry.outer_diameter = outer_diameter;

    // inducer
    let (inlet_solution, _) = inlet_loop(
        fluid,
        mass_flow_rate,
        inlet_total_pressure,
        inlet_total_temperature,
        hub_diameter,
        rotational_speed,
        outer_diameter,
        config.inlet,
    )?;
    finalize_inlet(
        &mut compressor,
        fluid,
        &inlet_solution,
        inlet_total_pressure,
        inlet_total_temperature,
        hub_diameter,
        rotational_speed,
    )?;

    // impeller outlet
    let outlet_built = setup_outlet_stage(
        fluid,
        inputs.outlet_flow_angle_deg.to_radians(),
        eulerian_work,
        blade_speed,
        inlet_total_temperature,
    );
    let ctx = OutletContext {
        fluid,
        inlet: &compressor.inlet,
        geometry: &compressor.geometry,
        mass_flow_rate,
        eulerian_work,
        blade_speed,
        inlet_total_temperature,
        surface_roughness: inputs.surface_roughness.value,
        tip_clearance: inputs.tip_clearance.value,
    };
    let (outlet_solution, _) = outlet_loss_loop(&ctx, &outlet_built, config.outlet)?;
    compressor.outlet = outlet_solution.stage;
    compressor.geometry.number_of_blades = outlet_solution.number_of_blades;
    compressor.geometry.outlet_blade_height = outlet_solution.blade_height;
    compressor.geometry.outlet_height_ratio =
        outlet_solution.blade_height / (outer_diameter / 2.0);
    compressor.impeller_compression_ratio =
        compressor.outlet.state.pressure.total / inlet_total_pressure;

    let v2 = compressor.outlet.blade.mid.absolute;
    let w2 = compressor.outlet.blade.mid.relative;
    let w1_hub = compressor.inlet.blade.hub.relative;
    let w1_mid = compressor.inlet.blade.mid.relative;
    let w1_tip = compressor.inlet.blade.tip.relative;

    compressor.blade_orientation_ratio = v2.axial / v2.tangential;
    compressor.diffusion_ratio = (w1_mid.tangential / w2.magnitude).abs();
    compressor.de_haller = DeHallerNumbers {
        hub: w2.magnitude / w1_hub.magnitude,
        mid: w2.magnitude / w1_mid.magnitude,
        tip: w2.magnitude / w1_tip.magnitude,
    };
    compressor.diffusion_factor = 1.0 - w2.magnitude / w1_mid.magnitude
        + (w1_mid.tangential - w2.tangential).abs() / (2.0 * w1_mid.magnitude) * 0.4;

    // vaneless diffuser
    let vaneless_ctx = VanelessContext {
        fluid,
        outlet: &compressor.outlet,
        outer_diameter,
        blade_height: outlet_solution.blade_height,
        mass_flow_rate,
    };
    let (vaneless_solution, _) = vaneless_loop(&vaneless_ctx, config.vaneless)?;
    compressor.vaneless_outlet = vaneless_solution.stage;
    compressor.geometry.vaneless_diffuser_diameter = vaneless_solution.diameter;

    // wedge diffuser and the end-to-end figures
    let wedge = evaluate_wedge_diffuser(
        fluid,
        &compressor.vaneless_outlet,
        inlet_total_pressure,
        inlet_total_temperature,
        eulerian_work,
    );
    compressor.vaned_outlet = wedge.stage;
    compressor.geometry.vaned_diffuser_diameter =
        vaned_diffuser_diameter(vaneless_solution.diameter, outlet_solution.blade_height);
    compressor.total_compression_ratio = wedge.compression_ratio;
    compressor.total_efficiency = wedge.total_efficiency;

    Ok(compressor)
}
