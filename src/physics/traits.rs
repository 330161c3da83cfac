//! Solution-method trait and output types
//!
//! This module defines the core API shared by every drawdown solver:
//! - `SolutionMethod`: type-safe identifier for the five solution methods
//! - `DrawdownSolver`: trait implemented by each method family
//! - `DrawdownCurve`: immutable (time, drawdown) output
//!
//! # Design
//!
//! Every method — closed-form, semi-analytical or fully numerical — is
//! reached through the same `evaluate(aquifer, well)` contract. Mode flags
//! (confined vs unconfined, fixed vs variable thickness) are baked into the
//! solver value at construction instead of threaded through call sites, so
//! the orchestrator treats all five methods uniformly.

use crate::error::PumpTestResult;
use crate::physics::{AquiferProperties, WellProperties};

// =================================================================================================
// Solution Methods (Type-safe Identifiers)
// =================================================================================================

/// The five competing solution methods
///
/// The `Ord` implementation fixes a stable presentation order (analytical,
/// then semi-analytical, then numerical), used by the orchestrator's result
/// maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolutionMethod {
    /// Theis (1935) analytical solution, confined aquifer
    TheisConfined,
    /// Theis analytical solution, unconfined aquifer (Sy-based, assuming
    /// approximately constant saturated thickness)
    TheisUnconfined,
    /// Hantush and Jacob (1955) leaky-aquifer solution
    HantushJacob,
    /// Method-of-lines radial finite-volume solution, fixed saturated
    /// thickness (Theis-equivalent, with wellbore storage)
    MolFixedThickness,
    /// Method-of-lines solution with variable saturated thickness (Dupuit)
    MolVariableThickness,
}

impl SolutionMethod {
    /// All methods, in presentation order.
    pub const ALL: [SolutionMethod; 5] = [
        SolutionMethod::TheisConfined,
        SolutionMethod::TheisUnconfined,
        SolutionMethod::HantushJacob,
        SolutionMethod::MolFixedThickness,
        SolutionMethod::MolVariableThickness,
    ];

    /// Human-readable label, suitable for plot legends and logs.
    pub fn label(&self) -> &'static str {
        match self {
            SolutionMethod::TheisConfined => "Confined (Theis)",
            SolutionMethod::TheisUnconfined => "Unconfined (Theis, with Sy)",
            SolutionMethod::HantushJacob => "Leaky (Hantush & Jacob)",
            SolutionMethod::MolFixedThickness => "Confined (wellbore storage)",
            SolutionMethod::MolVariableThickness => "Unconfined (Dupuit; numerical)",
        }
    }
}

impl std::fmt::Display for SolutionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =================================================================================================
// Drawdown Curve (Output Type)
// =================================================================================================

/// Predicted drawdown at the observation radius, one value per time sample
///
/// Curves from different methods share the well's time axis, so they can be
/// overlaid or differenced index by index. A curve is immutable once
/// returned by a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawdownCurve {
    method: SolutionMethod,
    times: Vec<f64>,
    drawdown: Vec<f64>,
}

impl DrawdownCurve {
    /// Build a curve. Lengths must match; solvers guarantee this.
    pub(crate) fn new(method: SolutionMethod, times: Vec<f64>, drawdown: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), drawdown.len());
        Self {
            method,
            times,
            drawdown,
        }
    }

    /// Which method produced this curve
    pub fn method(&self) -> SolutionMethod {
        self.method
    }

    /// Time samples (shared axis)
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Drawdown values, aligned with [`times`](Self::times)
    pub fn drawdown(&self) -> &[f64] {
        &self.drawdown
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the curve holds no samples
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterate over (time, drawdown) pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.drawdown.iter().copied())
    }
}

// =================================================================================================
// Drawdown Solver Trait
// =================================================================================================

/// Trait for drawdown solution methods
///
/// # Responsibility
///
/// Computes a full time-drawdown curve from immutable parameter values.
/// Implementations hold only configuration (mode, grid size, tolerances),
/// never mutable state, so one solver value can serve repeated evaluations
/// with different parameters — including concurrently.
///
/// # Errors
///
/// A failing method reports a [`PumpTestError`](crate::error::PumpTestError)
/// specific to its failure mode (degenerate configuration, quadrature or
/// integrator breakdown). It never returns a curve containing NaN or
/// infinity.
pub trait DrawdownSolver: Send + Sync {
    /// Identifier of the method this solver implements
    fn method(&self) -> SolutionMethod;

    /// Compute drawdown at every sample of the well's time axis.
    fn evaluate(
        &self,
        aquifer: &AquiferProperties,
        well: &WellProperties,
    ) -> PumpTestResult<DrawdownCurve>;

    /// Name used for display and logging
    fn name(&self) -> &'static str {
        self.method().label()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
