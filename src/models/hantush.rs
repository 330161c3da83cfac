//! Hantush and Jacob (1955) leaky-aquifer solution
//!
//! # Mathematical Background
//!
//! When the pumped aquifer is overlain by a semi-permeable confining layer,
//! vertical leakage through that layer feeds the cone of depression and the
//! drawdown flattens below the Theis curve. The leakage is characterized by
//! the factor
//!
//! ```text
//! B = sqrt(bc K b / Kc)
//! ```
//!
//! and the drawdown is
//!
//! ```text
//! s(t) = -Q / (4 pi K b) * W(u(t), r/B),   u = r^2 Ss / (4 K t)
//! ```
//!
//! with the Hantush well function evaluated by adaptive quadrature (see
//! [`hantush_w`](crate::physics::hantush_w)). B is undefined when the
//! confining layer is absent (bc = 0 or Kc = 0); that case is reported as a
//! [`DegenerateConfiguration`](crate::error::PumpTestError::DegenerateConfiguration)
//! before any arithmetic can divide by zero.

use crate::error::{PumpTestError, PumpTestResult};
use crate::physics::{
    hantush_w_with_budget, AquiferProperties, DrawdownCurve, DrawdownSolver, SolutionMethod,
    WellProperties, DEFAULT_QUAD_SUBDIVISIONS,
};

/// Hantush-Jacob leaky-aquifer drawdown solver
///
/// Carries only the quadrature subdivision budget; like the other solvers
/// it holds no per-evaluation state.
#[derive(Debug, Clone, Copy)]
pub struct HantushSolver {
    subdivision_budget: usize,
}

impl Default for HantushSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HantushSolver {
    /// Create a solver with the default quadrature budget.
    pub fn new() -> Self {
        Self {
            subdivision_budget: DEFAULT_QUAD_SUBDIVISIONS,
        }
    }

    /// Override the per-sample quadrature subdivision budget.
    ///
    /// Bounds the work of each well-function evaluation the same way
    /// [`IntegratorOptions::max_steps`](crate::solver::IntegratorOptions)
    /// bounds the stiff integrator.
    pub fn with_subdivision_budget(mut self, budget: usize) -> Self {
        self.subdivision_budget = budget;
        self
    }

    /// Leakage factor B = sqrt(bc K b / Kc).
    ///
    /// # Errors
    ///
    /// `DegenerateConfiguration` when bc = 0 or Kc = 0.
    pub fn leakage_factor(aquifer: &AquiferProperties) -> PumpTestResult<f64> {
        if !aquifer.has_confining_layer() {
            return Err(PumpTestError::DegenerateConfiguration(format!(
                "Hantush leakage factor undefined: bc = {}, Kc = {} \
                 (a leaky solution needs a confining layer with finite resistance)",
                aquifer.bc(),
                aquifer.kc()
            )));
        }
        Ok((aquifer.bc() * aquifer.k() * aquifer.b() / aquifer.kc()).sqrt())
    }
}

impl DrawdownSolver for HantushSolver {
    fn method(&self) -> SolutionMethod {
        SolutionMethod::HantushJacob
    }

    fn evaluate(
        &self,
        aquifer: &AquiferProperties,
        well: &WellProperties,
    ) -> PumpTestResult<DrawdownCurve> {
        let b_leak = Self::leakage_factor(aquifer)?;
        let r_over_b = well.r() / b_leak;
        let prefactor = -well.q() / (4.0 * std::f64::consts::PI * aquifer.transmissivity());

        let mut drawdown = Vec::with_capacity(well.times().len());
        for &t in well.times() {
            let u = well.r() * well.r() * aquifer.ss() / (4.0 * aquifer.k() * t);
            let s = prefactor * hantush_w_with_budget(u, r_over_b, self.subdivision_budget)?;
            if !s.is_finite() {
                return Err(PumpTestError::NonFinite {
                    what: "drawdown",
                    time: t,
                });
            }
            drawdown.push(s);
        }

        Ok(DrawdownCurve::new(
            SolutionMethod::HantushJacob,
            well.times().to_vec(),
            drawdown,
        ))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
