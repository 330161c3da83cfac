//! pumptest-rs: Pumping-Test Drawdown Analysis
//!
//! Forward modeling of transient drawdown around a pumping well, for
//! comparing what competing aquifer conceptualizations predict from one
//! shared parameter set. Built with Rust for performance and safety.
//!
//! # Architecture
//!
//! pumptest-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define drawdown equations (what to solve)
//!    - Numerical machinery provides quadrature, grids and stiff time
//!      integration (how to solve)
//!
//! 2. **Uniform Method Contract**
//!    - Every method — closed-form Theis, semi-analytical Hantush & Jacob,
//!      fully numerical method-of-lines — is a `DrawdownSolver`
//!    - Curves share the well's time axis, so methods overlay directly
//!    - Evaluation is fail-soft: one degenerate method never costs the
//!      caller the rest of the comparison
//!
//! # Quick Start
//!
//! ```rust
//! use pumptest_rs::prelude::*;
//!
//! # fn main() -> Result<(), PumpTestError> {
//! // 1. Describe the aquifer and the pumping test
//! let aquifer = AquiferProperties::new(
//!     10.0,  // K: hydraulic conductivity [m/d]
//!     1e-4,  // Ss: specific storage [1/m]
//!     0.2,   // Sy: specific yield [-]
//!     20.0,  // b: saturated thickness [m]
//!     0.0, 0.0, 0.0, // no confining layer
//! )?;
//! let well = WellProperties::new(
//!     0.5,    // r: observation radius [m]
//!     -500.0, // Q: pumping rate [m^3/d], negative = extraction
//!     0.01, 1000.0, // evaluation window [d]
//! )?;
//!
//! // 2. Evaluate every applicable method
//! let report = Evaluation::new(aquifer, well).run_all();
//!
//! // 3. Compare the curves
//! for (method, curve) in report.curves() {
//!     let (t, s) = curve.iter().last().unwrap();
//!     println!("{:<32} s({:.0} d) = {:.3} m", method, t, s);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Parameters, well functions, and the solver contract
//! - [`models`]: The five drawdown solution methods
//! - [`solver`]: Grid construction, stiff integration, orchestration
//! - [`error`]: Failure taxonomy

// Core modules
pub mod error;
pub mod physics;

pub mod models;
pub mod solver;

pub use error::{PumpTestError, PumpTestResult};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use pumptest_rs::prelude::*;
    //! ```
    pub use crate::error::{PumpTestError, PumpTestResult};
    pub use crate::models::{HantushSolver, MolSolver, TheisSolver};
    pub use crate::physics::{AquiferProperties,
                             DrawdownCurve,
                             DrawdownSolver,
                             SolutionMethod,
                             WellProperties};
    pub use crate::solver::{Evaluation, EvaluationReport, IntegratorOptions};
}
