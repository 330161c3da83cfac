//! Multi-method evaluation orchestrator
//!
//! Runs a set of solution methods against one aquifer/well configuration
//! and collects their curves on the shared time axis. Evaluation is
//! fail-soft: a method that cannot be computed (degenerate configuration,
//! integrator breakdown) is recorded as a failure without aborting the
//! others, so one misbehaving method never costs the caller the rest of
//! the comparison.
//!
//! With the `parallel` feature enabled the methods are dispatched across a
//! rayon thread pool; solvers hold no mutable state, so the results are
//! bitwise identical to a serial run.

use std::collections::BTreeMap;

use crate::error::{PumpTestError, PumpTestResult};
use crate::models::solver_for;
use crate::physics::{AquiferProperties, DrawdownCurve, SolutionMethod, WellProperties};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// =================================================================================================
// Evaluation (Input Side)
// =================================================================================================

/// One aquifer/well configuration to evaluate
///
/// # Example
///
/// ```rust
/// use pumptest_rs::physics::{AquiferProperties, SolutionMethod, WellProperties};
/// use pumptest_rs::solver::Evaluation;
///
/// let aquifer = AquiferProperties::new(10.0, 1e-4, 0.2, 20.0, 0.0, 0.0, 0.0)?;
/// let well = WellProperties::new(0.5, -500.0, 0.01, 1000.0)?;
///
/// let report = Evaluation::new(aquifer, well).run(&[
///     SolutionMethod::TheisConfined,
///     SolutionMethod::MolFixedThickness,
/// ]);
/// assert_eq!(report.curves().len(), 2);
/// # Ok::<(), pumptest_rs::PumpTestError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Evaluation {
    aquifer: AquiferProperties,
    well: WellProperties,
}

impl Evaluation {
    pub fn new(aquifer: AquiferProperties, well: WellProperties) -> Self {
        Self { aquifer, well }
    }

    pub fn aquifer(&self) -> &AquiferProperties {
        &self.aquifer
    }

    pub fn well(&self) -> &WellProperties {
        &self.well
    }

    /// Evaluate the given methods, fail-soft.
    pub fn run(&self, methods: &[SolutionMethod]) -> EvaluationReport {
        let outcomes = self.dispatch(methods);

        let mut curves = BTreeMap::new();
        let mut failures = BTreeMap::new();
        for (method, outcome) in outcomes {
            match outcome {
                Ok(curve) => {
                    curves.insert(method, curve);
                }
                Err(err) => {
                    log::warn!("{} failed: {}", method, err);
                    failures.insert(method, err);
                }
            }
        }

        EvaluationReport { curves, failures }
    }

    /// Evaluate all five methods.
    pub fn run_all(&self) -> EvaluationReport {
        self.run(&SolutionMethod::ALL)
    }

    #[cfg(feature = "parallel")]
    fn dispatch(
        &self,
        methods: &[SolutionMethod],
    ) -> Vec<(SolutionMethod, PumpTestResult<DrawdownCurve>)> {
        methods
            .par_iter()
            .map(|&method| (method, self.evaluate_one(method)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn dispatch(
        &self,
        methods: &[SolutionMethod],
    ) -> Vec<(SolutionMethod, PumpTestResult<DrawdownCurve>)> {
        methods
            .iter()
            .map(|&method| (method, self.evaluate_one(method)))
            .collect()
    }

    fn evaluate_one(&self, method: SolutionMethod) -> PumpTestResult<DrawdownCurve> {
        solver_for(method).evaluate(&self.aquifer, &self.well)
    }
}

// =================================================================================================
// Evaluation Report (Output Side)
// =================================================================================================

/// Outcome of a multi-method evaluation
///
/// Curves and failures are keyed by method in presentation order; every
/// requested method appears in exactly one of the two maps.
#[derive(Debug)]
pub struct EvaluationReport {
    curves: BTreeMap<SolutionMethod, DrawdownCurve>,
    failures: BTreeMap<SolutionMethod, PumpTestError>,
}

impl EvaluationReport {
    /// Successfully computed curves, in presentation order
    pub fn curves(&self) -> &BTreeMap<SolutionMethod, DrawdownCurve> {
        &self.curves
    }

    /// Methods that could not be computed, with their errors
    pub fn failures(&self) -> &BTreeMap<SolutionMethod, PumpTestError> {
        &self.failures
    }

    /// Curve for one method, if it succeeded
    pub fn curve(&self, method: SolutionMethod) -> Option<&DrawdownCurve> {
        self.curves.get(&method)
    }

    /// True when every requested method produced a curve
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
