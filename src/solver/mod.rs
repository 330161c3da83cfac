//! Numerical machinery and evaluation orchestration
//!
//! - [`grid`] — radial finite-volume grid construction
//! - [`methods`] — stiff ODE time integration
//! - [`evaluation`] — fail-soft multi-method evaluation
//!
//! The analytical solvers bypass this module entirely; only the
//! method-of-lines models and the orchestrator live here.

pub mod evaluation;
pub mod grid;
pub mod methods;

pub use evaluation::{Evaluation, EvaluationReport};
pub use grid::RadialGrid;
pub use methods::{integrate_stiff, IntegratorOptions, OdeSystem};
