//! Drawdown solver implementations
//!
//! Three families cover the five solution methods:
//!
//! - [`TheisSolver`] — closed-form Theis solutions for confined and
//!   unconfined aquifers (infinite domain, no wellbore storage)
//! - [`HantushSolver`] — Hantush & Jacob leaky-aquifer solution with a
//!   semi-pervious confining layer
//! - [`MolSolver`] — transient method-of-lines finite-volume solver with
//!   wellbore storage and a far-field boundary, in fixed-thickness and
//!   Dupuit (variable-thickness) variants
//!
//! All of them implement [`DrawdownSolver`](crate::physics::DrawdownSolver)
//! and can be obtained uniformly through [`solver_for`].

pub mod hantush;
pub mod mol;
pub mod theis;

pub use hantush::HantushSolver;
pub use mol::MolSolver;
pub use theis::TheisSolver;

use crate::physics::{DrawdownSolver, SolutionMethod};

/// The solver implementing a given solution method.
pub fn solver_for(method: SolutionMethod) -> Box<dyn DrawdownSolver> {
    match method {
        SolutionMethod::TheisConfined => Box::new(TheisSolver::confined()),
        SolutionMethod::TheisUnconfined => Box::new(TheisSolver::unconfined()),
        SolutionMethod::HantushJacob => Box::new(HantushSolver::default()),
        SolutionMethod::MolFixedThickness => Box::new(MolSolver::fixed_thickness()),
        SolutionMethod::MolVariableThickness => Box::new(MolSolver::dupuit()),
    }
}
