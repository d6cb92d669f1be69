use ccpd_solver::IterationControl;

/// Iteration budgets and tolerances for every loop in the pipeline.
#[derive(Clone, Copy, Debug)]
pub struct DesignConfig {
    /// Outer efficiency-convergence loop.
    pub outer: IterationControl,
    /// Inlet static-density fixed point.
    pub inlet: IterationControl,
    /// Outlet rotor-efficiency fixed point.
    pub outlet: IterationControl,
    /// Vaneless-diffuser average-density fixed point.
    pub vaneless: IterationControl,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            outer: IterationControl::new(20, 1e-3),
            inlet: IterationControl::new(1000, 1e-3),
            outlet: IterationControl::new(10, 1e-3),
            vaneless: IterationControl::new(10, 1e-3),
        }
    }
}
