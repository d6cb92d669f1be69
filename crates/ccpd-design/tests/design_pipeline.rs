//! End-to-end pipeline checks against the reference air case:
//! pressure ratio 1.25, 5 kg/s, ambient inlet, specific diameter 3.85,
//! specific speed 0.6.

use ccpd_core::units::{k, kgps, m, pa};
use ccpd_core::DesignInputs;
use ccpd_design::{run_design, DesignConfig};
use ccpd_fluids::FluidLibrary;
use ccpd_solver::{ConvergenceReport, IterationControl};

fn reference_inputs() -> DesignInputs {
    DesignInputs {
        mass_flow_rate: kgps(5.0),
        inlet_total_pressure: pa(1.0e5),
        inlet_total_temperature: k(298.0),
        compression_ratio: 1.25,
        surface_roughness: m(0.0025),
        tip_clearance: m(1.0e-4),
        hub_diameter: m(0.2),
        outlet_flow_angle_deg: 65.0,
        specific_diameter: 3.85,
        specific_speed: 0.6,
        efficiency_guess: 0.85,
        fluid: "air".to_owned(),
        material: "aluminum".to_owned(),
    }
}

fn single_pass_config() -> DesignConfig {
    DesignConfig {
        outer: IterationControl::new(1, 1e-3),
        ..Default::default()
    }
}

#[test]
fn similarity_sizing() {
    let inputs = reference_inputs();
    let fluid = FluidLibrary::builtin().get(&inputs.fluid).unwrap();
    let outcome = run_design(&inputs, &fluid, &single_pass_config()).unwrap();

    let c = &outcome.compressor;
    assert!((c.isentropic_work - 19_735.511).abs() < 1e-2);
    assert!((c.eulerian_work - 23_218.248).abs() < 1e-2);
    assert!((c.rotational_speed - 483.11826).abs() < 1e-4);
    assert!((c.geometry.outer_diameter - 0.6717114).abs() < 1e-6);
    assert!((c.net_power - 23_218.248 * 5.0).abs() < 1e-1);
}

#[test]
fn inducer_station() {
    let inputs = reference_inputs();
    let fluid = FluidLibrary::builtin().get(&inputs.fluid).unwrap();
    let outcome = run_design(&inputs, &fluid, &single_pass_config()).unwrap();

    let c = &outcome.compressor;
    assert!((c.geometry.inlet_tip_diameter - 0.3759799).abs() < 1e-6);
    assert!((c.inlet.blade.mid.absolute.magnitude - 54.38055).abs() < 1e-4);
    // free vortex: purely axial inflow
    assert_eq!(c.inlet.blade.mid.absolute.tangential, 0.0);
    assert!(c.inlet.blade.tip.relative.magnitude > c.inlet.blade.hub.relative.magnitude);
}

#[test]
fn rotor_station() {
    let inputs = reference_inputs();
    let fluid = FluidLibrary::builtin().get(&inputs.fluid).unwrap();
    let outcome = run_design(&inputs, &fluid, &single_pass_config()).unwrap();

    let c = &outcome.compressor;
    assert_eq!(c.geometry.number_of_blades, 17);
    assert!((c.geometry.outlet_blade_height - 0.0288533).abs() < 1e-6);
    assert!((c.outlet.state.pressure.static_ - 107_435.24).abs() < 0.5);
    assert!((c.outlet.state.pressure.total - 123_572.99).abs() < 0.5);
    assert!((c.outlet.state.temperature.static_ - 304.1715).abs() < 1e-3);
    assert!((c.outlet.state.temperature.total - 316.5614).abs() < 1e-3);
    assert!((c.outlet.state.density.static_ - 1.2306834).abs() < 1e-5);
    assert!((c.outlet.blade.mid_mach.absolute - 0.4516306).abs() < 1e-5);
    assert!((c.impeller_compression_ratio - 1.2357299).abs() < 1e-5);
}

#[test]
fn diffuser_stations() {
    let inputs = reference_inputs();
    let fluid = FluidLibrary::builtin().get(&inputs.fluid).unwrap();
    let outcome = run_design(&inputs, &fluid, &single_pass_config()).unwrap();

    let c = &outcome.compressor;
    assert!((c.geometry.vaneless_diffuser_diameter - 1.2 * 0.6717114).abs() < 1e-6);
    assert!((c.vaneless_outlet.state.density.static_ - 1.2646469).abs() < 1e-5);
    assert!((c.vaneless_outlet.blade.mid.absolute.magnitude - 127.60063).abs() < 1e-3);
    assert!((c.vaneless_outlet.blade.mid_mach.absolute - 0.3624450).abs() < 1e-5);
    assert!((c.vaneless_outlet.state.pressure.static_ - 111_959.95).abs() < 0.5);
    assert!((c.vaneless_outlet.state.pressure.total - 122_597.97).abs() < 0.5);

    assert!((c.vaned_outlet.state.pressure.total - 120_529.00).abs() < 0.5);
    assert!((c.vaned_outlet.blade.mid.absolute.magnitude - 67.22473).abs() < 1e-3);
    assert!((c.vaned_outlet.state.density.static_ - 1.3142391).abs() < 1e-5);
    assert!(c.geometry.vaned_diffuser_diameter > c.geometry.vaneless_diffuser_diameter);
}

#[test]
fn performance_indicators() {
    let inputs = reference_inputs();
    let fluid = FluidLibrary::builtin().get(&inputs.fluid).unwrap();
    let outcome = run_design(&inputs, &fluid, &single_pass_config()).unwrap();

    let c = &outcome.compressor;
    assert!((c.total_compression_ratio - 1.2052900).abs() < 1e-6);
    assert!((c.total_efficiency - 0.7075288).abs() < 1e-6);
    assert!((c.stage_loading - 0.7496111).abs() < 1e-6);
    assert!((c.flow_coefficient - 0.0784710).abs() < 1e-6);
    assert!((c.blade_orientation_ratio - 0.4663077).abs() < 1e-6);
    assert!((c.diffusion_ratio - 1.0020625).abs() < 1e-6);
    assert!((c.de_haller.hub - 0.9543897).abs() < 1e-6);
    assert!((c.de_haller.mid - 0.7862289).abs() < 1e-6);
    assert!((c.de_haller.tip - 0.6558208).abs() < 1e-6);
    assert!((c.diffusion_factor - 0.3279356).abs() < 1e-6);
}

#[test]
fn outer_report_and_history() {
    let inputs = reference_inputs();
    let fluid = FluidLibrary::builtin().get(&inputs.fluid).unwrap();

    // a single pass cannot close a 20% efficiency gap
    let outcome = run_design(&inputs, &fluid, &single_pass_config()).unwrap();
    assert!(matches!(
        outcome.report,
        ConvergenceReport::Exhausted { iterations: 1, .. }
    ));
    assert!((outcome.report.residual() - 0.2013644).abs() < 1e-5);
    assert_eq!(outcome.efficiency_history.len(), 1);

    // a second pass re-sizes the machine at the achieved efficiency
    let two_pass = DesignConfig {
        outer: IterationControl::new(2, 1e-3),
        ..Default::default()
    };
    let outcome = run_design(&inputs, &fluid, &two_pass).unwrap();
    assert_eq!(outcome.efficiency_history.len(), 2);
    assert!((outcome.efficiency_history[0] - 0.7075288).abs() < 1e-6);
    assert!((outcome.efficiency_history[1] - 0.6484027).abs() < 1e-6);
}

#[test]
fn runs_are_idempotent() {
    let inputs = reference_inputs();
    let fluid = FluidLibrary::builtin().get(&inputs.fluid).unwrap();
    let config = single_pass_config();

    let first = run_design(&inputs, &fluid, &config).unwrap();
    let second = run_design(&inputs, &fluid, &config).unwrap();
    assert_eq!(first.compressor, second.compressor);
    assert_eq!(first.efficiency_history, second.efficiency_history);
}

#[test]
fn subunity_pressure_ratio_is_a_precondition_error() {
    // isentropic work goes negative, the shaft speed is NaN, and the
    // tip-diameter solve must refuse to run
    let mut inputs = reference_inputs();
    inputs.compression_ratio = 0.9;
    let fluid = FluidLibrary::builtin().get(&inputs.fluid).unwrap();
    assert!(run_design(&inputs, &fluid, &DesignConfig::default()).is_err());
}
