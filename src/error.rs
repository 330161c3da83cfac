//! Error taxonomy for pumping-test evaluations
//!
//! # Design Philosophy
//!
//! Errors fall into two families with different propagation rules:
//!
//! - **Setup errors** (`InvalidParameter`): raised while constructing
//!   [`AquiferProperties`](crate::physics::AquiferProperties) or
//!   [`WellProperties`](crate::physics::WellProperties). These are fatal to
//!   the whole evaluation session — no solver runs on invalid input.
//!
//! - **Method errors** (everything else): raised by an individual solution
//!   method. The orchestrator collects these per method and keeps running
//!   the others (fail-soft aggregation, see
//!   [`Evaluation`](crate::solver::Evaluation)).

use thiserror::Error;

/// Unified result type for the crate
pub type PumpTestResult<T> = Result<T, PumpTestError>;

/// Errors produced by parameter validation and the solution methods
#[derive(Error, Debug)]
pub enum PumpTestError {
    /// A supplied parameter violates its physical bound.
    ///
    /// Raised immediately at construction, before any computation.
    #[error("invalid parameter {name} = {value}: must be {constraint}")]
    InvalidParameter {
        /// Parameter symbol as used in the hydraulics literature (K, Ss, ...)
        name: &'static str,
        /// Offending value
        value: f64,
        /// Human-readable constraint, e.g. "strictly positive"
        constraint: &'static str,
    },

    /// A parameter combination puts a method outside its domain of validity.
    ///
    /// Example: the Hantush leakage factor B = sqrt(bc*K*b/Kc) is undefined
    /// when the confining layer is absent (bc = 0 or Kc = 0).
    #[error("degenerate configuration: {0}")]
    DegenerateConfiguration(String),

    /// Adaptive quadrature for the Hantush well function did not converge
    /// within its subdivision budget.
    #[error(
        "Hantush well-function quadrature failed to converge \
         (lower bound u = {lower_bound:.3e}, {subdivisions} subdivisions used)"
    )]
    QuadratureNonConvergence {
        /// Lower integration bound u(t) at the failing time sample
        lower_bound: f64,
        /// Subdivisions spent before giving up
        subdivisions: usize,
    },

    /// The stiff ODE integrator failed a step and could not recover.
    #[error("stiff integrator failed at t = {time:.6e}: {detail}")]
    IntegratorFailure {
        /// Simulation time at which the failure occurred
        time: f64,
        /// Diagnostic detail (Newton divergence, step underflow, ...)
        detail: String,
    },

    /// A NaN or infinity reached a result array.
    ///
    /// Solvers check their output before returning it so that a curve handed
    /// to the caller is always finite everywhere.
    #[error("non-finite {what} computed at t = {time:.6e}")]
    NonFinite {
        /// What quantity went non-finite (drawdown, head, well function ...)
        what: &'static str,
        /// Time sample at which it was detected
        time: f64,
    },
}

impl PumpTestError {
    /// Shorthand used by the validated constructors.
    pub(crate) fn invalid(name: &'static str, value: f64, constraint: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            constraint,
        }
    }

    /// True for errors that abort the whole session rather than one method.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = PumpTestError::invalid("K", -1.0, "strictly positive");
        let msg = err.to_string();
        assert!(msg.contains("K"));
        assert!(msg.contains("strictly positive"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_method_errors_are_not_fatal() {
        let degenerate =
            PumpTestError::DegenerateConfiguration("no confining layer".to_string());
        assert!(!degenerate.is_fatal());

        let quad = PumpTestError::QuadratureNonConvergence {
            lower_bound: 1e-8,
            subdivisions: 4096,
        };
        assert!(!quad.is_fatal());

        let integrator = PumpTestError::IntegratorFailure {
            time: 0.5,
            detail: "step size underflow".to_string(),
        };
        assert!(!integrator.is_fatal());
    }
}
