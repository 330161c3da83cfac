//! Theis (1935) analytical solution
//!
//! # Mathematical Background
//!
//! Radial flow to a fully penetrating well in an infinite, homogeneous
//! aquifer of constant transmissivity:
//!
//! ```text
//! s(t) = -Q / (4 pi K b) * W(u(t))
//! ```
//!
//! with the Theis well function W = E1 and the dimensionless parameter
//!
//! - confined:   u = r^2 Ss / (4 K t)
//! - unconfined: u = r^2 Sy / (4 K b t)   (assuming roughly constant
//!   saturated thickness, which is what makes the closed form applicable)
//!
//! Q is negative for extraction, so drawdown comes out positive. The whole
//! method is a pointwise function evaluation per time sample — no grid, no
//! iteration, no state.

use crate::error::{PumpTestError, PumpTestResult};
use crate::physics::{
    theis_w, AquiferProperties, DrawdownCurve, DrawdownSolver, SolutionMethod, WellProperties,
};

/// Theis analytical drawdown solver
///
/// The confined/unconfined mode is fixed at construction; both modes share
/// the evaluation path and differ only in how u(t) is formed.
///
/// # Example
///
/// ```rust
/// use pumptest_rs::models::TheisSolver;
/// use pumptest_rs::physics::{AquiferProperties, DrawdownSolver, WellProperties};
///
/// let aquifer = AquiferProperties::new(10.0, 1e-4, 0.2, 20.0, 0.0, 0.0, 0.0)?;
/// let well = WellProperties::new(0.5, -500.0, 0.01, 1000.0)?;
///
/// let curve = TheisSolver::confined().evaluate(&aquifer, &well)?;
/// assert!(curve.drawdown().iter().all(|&s| s > 0.0));
/// # Ok::<(), pumptest_rs::PumpTestError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TheisSolver {
    method: SolutionMethod,
}

impl TheisSolver {
    /// Confined-aquifer variant (u based on specific storage Ss)
    pub fn confined() -> Self {
        Self {
            method: SolutionMethod::TheisConfined,
        }
    }

    /// Unconfined-aquifer variant (u based on specific yield Sy)
    pub fn unconfined() -> Self {
        Self {
            method: SolutionMethod::TheisUnconfined,
        }
    }

    fn dimensionless_u(&self, aquifer: &AquiferProperties, r: f64, t: f64) -> f64 {
        match self.method {
            SolutionMethod::TheisConfined => {
                r * r * aquifer.ss() / (4.0 * aquifer.k() * t)
            }
            SolutionMethod::TheisUnconfined => {
                r * r * aquifer.sy() / (4.0 * aquifer.k() * aquifer.b() * t)
            }
            // Constructors only produce the two Theis variants.
            _ => unreachable!("TheisSolver constructed with a non-Theis method"),
        }
    }
}

impl DrawdownSolver for TheisSolver {
    fn method(&self) -> SolutionMethod {
        self.method
    }

    fn evaluate(
        &self,
        aquifer: &AquiferProperties,
        well: &WellProperties,
    ) -> PumpTestResult<DrawdownCurve> {
        let prefactor = -well.q() / (4.0 * std::f64::consts::PI * aquifer.transmissivity());

        let mut drawdown = Vec::with_capacity(well.times().len());
        for &t in well.times() {
            let u = self.dimensionless_u(aquifer, well.r(), t);
            let s = prefactor * theis_w(u)?;
            if !s.is_finite() {
                return Err(PumpTestError::NonFinite {
                    what: "drawdown",
                    time: t,
                });
            }
            drawdown.push(s);
        }

        Ok(DrawdownCurve::new(
            self.method,
            well.times().to_vec(),
            drawdown,
        ))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> (AquiferProperties, WellProperties) {
        let aquifer = AquiferProperties::new(10.0, 1e-4, 0.2, 20.0, 0.0, 0.0, 0.0).unwrap();
        let well = WellProperties::new(0.5, -500.0, 0.01, 1000.0).unwrap();
        (aquifer, well)
    }

    #[test]
    fn test_confined_drawdown_positive_finite_increasing_in_time() {
        let (aquifer, well) = reference();
        let curve = TheisSolver::confined().evaluate(&aquifer, &well).unwrap();

        assert_eq!(curve.len(), well.times().len());
        for &s in curve.drawdown() {
            assert!(s.is_finite());
            assert!(s > 0.0);
        }
        // Under continuous extraction, drawdown grows with time (W(u)
        // grows as u shrinks).
        for pair in curve.drawdown().windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_drawdown_scales_with_pumping_rate_magnitude() {
        let (aquifer, _) = reference();
        let slow = WellProperties::new(0.5, -250.0, 0.01, 1000.0).unwrap();
        let fast = WellProperties::new(0.5, -500.0, 0.01, 1000.0).unwrap();

        let solver = TheisSolver::confined();
        let s_slow = solver.evaluate(&aquifer, &slow).unwrap();
        let s_fast = solver.evaluate(&aquifer, &fast).unwrap();

        for (a, b) in s_slow.drawdown().iter().zip(s_fast.drawdown()) {
            assert!(b > a, "larger |Q| must deepen drawdown");
            // Linear in Q for fixed W(u).
            assert_relative_eq!(b / a, 2.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_confined_matches_hand_computed_value() {
        let (aquifer, well) = reference();
        let curve = TheisSolver::confined().evaluate(&aquifer, &well).unwrap();

        // At t = 1000 (last sample): u = r^2 Ss / (4 K t)
        let t = *well.times().last().unwrap();
        let u = 0.5 * 0.5 * 1e-4 / (4.0 * 10.0 * t);
        let expected = 500.0 / (4.0 * std::f64::consts::PI * 200.0) * theis_w(u).unwrap();
        assert_relative_eq!(
            *curve.drawdown().last().unwrap(),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_unconfined_shallower_than_confined() {
        // Sy >> S: the unconfined u is larger, W smaller, drawdown smaller.
        let (aquifer, well) = reference();
        let confined = TheisSolver::confined().evaluate(&aquifer, &well).unwrap();
        let unconfined = TheisSolver::unconfined().evaluate(&aquifer, &well).unwrap();

        for (c, u) in confined.drawdown().iter().zip(unconfined.drawdown()) {
            assert!(u < c);
        }
    }

    #[test]
    fn test_methods_are_tagged() {
        assert_eq!(
            TheisSolver::confined().method(),
            SolutionMethod::TheisConfined
        );
        assert_eq!(
            TheisSolver::unconfined().method(),
            SolutionMethod::TheisUnconfined
        );
    }
}
