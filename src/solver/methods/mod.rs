//! Numerical methods for the transient solvers
//!
//! The method-of-lines discretization produces a stiff system of ordinary
//! differential equations: cell volumes span several orders of magnitude
//! between the wellbore and the far field, so the fastest cell responds
//! orders of magnitude quicker than the slowest. Explicit integrators would
//! need step sizes dictated by the smallest cell for the whole run; an
//! implicit adaptive method is mandatory here, not an optimization.
//!
//! # Available Methods
//!
//! - **[`integrate_stiff`]**: 2-stage, second-order, L-stable singly
//!   diagonally implicit Runge-Kutta (SDIRK) scheme with an embedded error
//!   estimate, adaptive step control and simplified Newton iteration.
//!
//! Systems plug in through the [`OdeSystem`] trait; tolerances and the
//! step-count ceiling come from [`IntegratorOptions`].

mod sdirk;

pub use sdirk::{integrate_stiff, IntegratorOptions, OdeSystem};
