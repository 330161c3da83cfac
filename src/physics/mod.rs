//! Physical model of the pumping test
//!
//! This module holds everything the solvers consume and produce:
//!
//! - **Parameters**: [`AquiferProperties`] and [`WellProperties`], immutable
//!   validated value structures
//! - **Well functions**: [`theis_w`] and [`hantush_w`], the dimensionless
//!   building blocks of the analytical solutions
//! - **Solver contract**: the [`DrawdownSolver`] trait, the
//!   [`SolutionMethod`] identifier and the [`DrawdownCurve`] output
//!
//! # Architecture
//!
//! The physics is **separate from the numerics**: this module defines what
//! a drawdown evaluation is, while [`solver`](crate::solver) provides the
//! radial grid and the stiff time integrator the numerical methods need,
//! and [`models`](crate::models) implements the five concrete methods.
//!
//! # Example
//!
//! ```rust
//! use pumptest_rs::physics::{AquiferProperties, WellProperties};
//!
//! let aquifer = AquiferProperties::new(10.0, 1e-4, 0.2, 20.0, 0.0, 0.0, 0.0)?;
//! let well = WellProperties::new(0.5, -500.0, 0.01, 1000.0)?;
//!
//! assert_eq!(well.times().len(), 60);
//! assert!(aquifer.transmissivity() > 0.0);
//! # Ok::<(), pumptest_rs::PumpTestError>(())
//! ```

// module declaration
pub mod parameters;
pub mod traits;
pub mod wellfn;

// re-export commonly used types for convenience
pub use parameters::{AquiferProperties, WellProperties, DEFAULT_TIME_SAMPLES};
pub use traits::{DrawdownCurve, DrawdownSolver, SolutionMethod};
pub use wellfn::{hantush_w, hantush_w_with_budget, theis_w, DEFAULT_QUAD_SUBDIVISIONS};
