//! Well-function library
//!
//! # Mathematical Background
//!
//! Drawdown solutions for radial flow to a well are expressed through
//! dimensionless *well functions* W(u) of the dimensionless time parameter
//! u = r^2 S / (4 T t):
//!
//! - **Theis well function**: W(u) = E1(u), the exponential integral of
//!   order 1. Decreasing and convex on (0, inf), diverging like
//!   -gamma - ln(u) as u -> 0 and vanishing like exp(-u)/u as u -> inf.
//!
//! - **Hantush well function**: W(u, r/B) = Int_u^inf exp(-y - r^2/(4 B^2 y)) / y dy,
//!   where B is the leakage factor of the semi-confining layer. Reduces to
//!   E1(u) as r/B -> 0 and is strictly smaller than E1(u) for any positive
//!   leakage.
//!
//! # Numerics
//!
//! E1 uses the classical split: power series for u <= 1, modified-Lentz
//! continued fraction for u > 1 (Abramowitz & Stegun 5.1.11 / 5.1.22).
//! A naive series alone loses all accuracy for moderate u; the split keeps
//! full double precision over the whole range the time axis can produce.
//!
//! The Hantush integral has no closed form and is evaluated by adaptive
//! Simpson quadrature. The substitution y = exp(x) turns the integrand into
//! exp(-e^x - c e^{-x}), smooth and bounded by 1, which removes the 1/y
//! weight that would otherwise force deep subdivision near a small lower
//! bound. The upper bound is capped where exp(-y) is negligible instead of
//! requesting true semi-infinite quadrature.

use crate::error::{PumpTestError, PumpTestResult};

/// Euler-Mascheroni constant (not in `std::f64::consts`)
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Term count ceiling for the E1 series and continued fraction.
const E1_MAX_ITER: usize = 120;

/// Default subdivision budget for the Hantush quadrature.
pub const DEFAULT_QUAD_SUBDIVISIONS: usize = 100_000;

/// Maximum recursion depth for the Hantush quadrature.
const QUAD_MAX_DEPTH: usize = 48;

/// Absolute tolerance for the Hantush quadrature.
const QUAD_TOL: f64 = 1e-10;

// =================================================================================================
// Theis Well Function
// =================================================================================================

/// Theis well function W(u) = E1(u), the exponential integral of order 1.
///
/// # Errors
///
/// [`PumpTestError::InvalidParameter`] for u <= 0 or non-finite u; E1 has a
/// logarithmic singularity at zero and is not defined for negative
/// arguments in this context.
///
/// # Example
///
/// ```rust
/// use pumptest_rs::physics::theis_w;
///
/// let w = theis_w(1.0)?;
/// assert!((w - 0.219_383_9).abs() < 1e-6);
/// # Ok::<(), pumptest_rs::PumpTestError>(())
/// ```
pub fn theis_w(u: f64) -> PumpTestResult<f64> {
    if !u.is_finite() || u <= 0.0 {
        return Err(PumpTestError::invalid("u", u, "strictly positive"));
    }

    if u <= 1.0 {
        Ok(e1_series(u))
    } else {
        Ok(e1_continued_fraction(u))
    }
}

/// Power series E1(u) = -gamma - ln(u) + sum_{k>=1} (-1)^{k+1} u^k / (k k!)
///
/// Converges quickly for u <= 1 (at most ~30 terms at the interval edge).
fn e1_series(u: f64) -> f64 {
    let mut sum = 0.0;
    let mut term = 1.0; // carries (-u)^k / k!
    for k in 1..=E1_MAX_ITER {
        term *= -u / k as f64;
        let contribution = -term / k as f64;
        sum += contribution;
        if contribution.abs() < f64::EPSILON * sum.abs() {
            break;
        }
    }
    -EULER_GAMMA - u.ln() + sum
}

/// Continued fraction E1(u) = exp(-u) / (u + 1 - 1^2/(u + 3 - 2^2/(u + 5 - ...)))
///
/// Evaluated with the modified Lentz algorithm; for u > 1 the fraction
/// converges in well under [`E1_MAX_ITER`] iterations.
fn e1_continued_fraction(u: f64) -> f64 {
    // Tiny floor keeping the recurrences away from division by zero.
    const FLOOR: f64 = 1e-300;

    let mut b = u + 1.0;
    let mut c = 1.0 / FLOOR;
    let mut d = 1.0 / b;
    let mut f = d;

    for i in 1..=E1_MAX_ITER {
        let a = -((i * i) as f64);
        b += 2.0;

        d = 1.0 / (a * d + b).abs().max(FLOOR).copysign(a * d + b);
        c = (b + a / c).abs().max(FLOOR).copysign(b + a / c);

        let delta = c * d;
        f *= delta;

        if (delta - 1.0).abs() < f64::EPSILON {
            break;
        }
    }

    f * (-u).exp()
}

// =================================================================================================
// Hantush Well Function
// =================================================================================================

/// Hantush well function W(u, r/B) for a leaky aquifer.
///
/// `r_over_b` is the observation radius divided by the leakage factor
/// B = sqrt(bc K b / Kc); the caller (the Hantush solver) guards against the
/// degenerate bc = 0 / Kc = 0 case before B is ever formed.
///
/// # Errors
///
/// - [`PumpTestError::InvalidParameter`] for non-positive u or r/B
/// - [`PumpTestError::QuadratureNonConvergence`] when the adaptive
///   subdivision budget is exhausted before reaching tolerance
pub fn hantush_w(u: f64, r_over_b: f64) -> PumpTestResult<f64> {
    hantush_w_with_budget(u, r_over_b, DEFAULT_QUAD_SUBDIVISIONS)
}

/// [`hantush_w`] with a caller-chosen subdivision budget.
///
/// The budget bounds the total work of one evaluation the same way
/// [`IntegratorOptions::max_steps`](crate::solver::IntegratorOptions)
/// bounds the stiff integrator: exhausting it is an explicit
/// [`QuadratureNonConvergence`](PumpTestError::QuadratureNonConvergence),
/// never an unbounded-latency call.
pub fn hantush_w_with_budget(
    u: f64,
    r_over_b: f64,
    subdivision_budget: usize,
) -> PumpTestResult<f64> {
    if !u.is_finite() || u <= 0.0 {
        return Err(PumpTestError::invalid("u", u, "strictly positive"));
    }
    if !r_over_b.is_finite() || r_over_b <= 0.0 {
        return Err(PumpTestError::invalid("r/B", r_over_b, "strictly positive"));
    }

    let c = 0.25 * r_over_b * r_over_b; // r^2 / (4 B^2)

    // Substituted integrand: y = exp(x) maps the 1/y weight away.
    let integrand = |x: f64| {
        let y = x.exp();
        (-y - c / y).exp()
    };

    // exp(-y) < 2e-22 beyond u + 50; the tail is far below tolerance.
    let x_lo = u.ln();
    let x_hi = (u + 50.0).ln();

    let mut subdivisions = 0usize;
    adaptive_simpson(
        &integrand,
        x_lo,
        x_hi,
        QUAD_TOL,
        subdivision_budget,
        &mut subdivisions,
    )
    .ok_or(PumpTestError::QuadratureNonConvergence {
        lower_bound: u,
        subdivisions,
    })
}

/// Adaptive Simpson driver: seeds the recursion with one whole-interval
/// estimate.
fn adaptive_simpson<F>(
    f: &F,
    a: f64,
    b: f64,
    tol: f64,
    budget: usize,
    subdivisions: &mut usize,
) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let m = 0.5 * (a + b);
    let fa = f(a);
    let fm = f(m);
    let fb = f(b);
    let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
    simpson_refine(
        f,
        a,
        b,
        fa,
        fm,
        fb,
        whole,
        tol,
        QUAD_MAX_DEPTH,
        budget,
        subdivisions,
    )
}

/// One level of adaptive Simpson refinement.
///
/// Classic accept criterion: |S_left + S_right - S_whole| <= 15 tol, with
/// Richardson correction added to the accepted value. Returns `None` when
/// either the depth or the global subdivision budget runs out.
#[allow(clippy::too_many_arguments)]
fn simpson_refine<F>(
    f: &F,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tol: f64,
    depth: usize,
    budget: usize,
    subdivisions: &mut usize,
) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    if depth == 0 || *subdivisions >= budget {
        return None;
    }
    *subdivisions += 1;

    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = f(lm);
    let frm = f(rm);

    let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
    let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
    let delta = left + right - whole;

    if delta.abs() <= 15.0 * tol {
        return Some(left + right + delta / 15.0);
    }

    let half_tol = 0.5 * tol;
    let l = simpson_refine(
        f, a, m, fa, flm, fm, left, half_tol, depth - 1, budget, subdivisions,
    )?;
    let r = simpson_refine(
        f, m, b, fm, frm, fb, right, half_tol, depth - 1, budget, subdivisions,
    )?;
    Some(l + r)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Reference values from Abramowitz & Stegun, table 5.1.
    #[test]
    fn test_theis_w_reference_values() {
        assert_relative_eq!(theis_w(0.1).unwrap(), 1.822_923_95, max_relative = 1e-7);
        assert_relative_eq!(theis_w(0.5).unwrap(), 0.559_773_6, max_relative = 1e-6);
        assert_relative_eq!(theis_w(1.0).unwrap(), 0.219_383_93, max_relative = 1e-7);
        assert_relative_eq!(theis_w(2.0).unwrap(), 0.048_900_51, max_relative = 1e-6);
        assert_relative_eq!(theis_w(5.0).unwrap(), 1.148_295_6e-3, max_relative = 1e-6);
        assert_relative_eq!(theis_w(10.0).unwrap(), 4.156_969e-6, max_relative = 1e-5);
    }

    #[test]
    fn test_theis_w_small_u_log_asymptote() {
        // E1(u) -> -gamma - ln u as u -> 0
        let u = 1e-10;
        let w = theis_w(u).unwrap();
        assert_relative_eq!(w, -EULER_GAMMA - u.ln(), max_relative = 1e-9);
    }

    #[test]
    fn test_theis_w_is_strictly_decreasing() {
        let us: Vec<f64> = (0..100).map(|i| 10f64.powf(-6.0 + 0.08 * i as f64)).collect();
        let ws: Vec<f64> = us.iter().map(|&u| theis_w(u).unwrap()).collect();

        for w in ws.windows(2) {
            assert!(w[1] < w[0], "W(u) must decrease with u");
        }
    }

    #[test]
    fn test_theis_w_continuity_at_series_fraction_split() {
        let below = theis_w(1.0 - 1e-9).unwrap();
        let above = theis_w(1.0 + 1e-9).unwrap();
        assert_relative_eq!(below, above, max_relative = 1e-7);
    }

    #[test]
    fn test_theis_w_rejects_nonpositive_argument() {
        assert!(theis_w(0.0).is_err());
        assert!(theis_w(-1.0).is_err());
        assert!(theis_w(f64::NAN).is_err());
    }

    #[test]
    fn test_hantush_w_reduces_to_theis_without_leakage() {
        // r/B -> 0 recovers E1(u).
        for u in [1e-4, 1e-2, 0.5, 2.0] {
            let leaky = hantush_w(u, 1e-8).unwrap();
            let theis = theis_w(u).unwrap();
            assert_relative_eq!(leaky, theis, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_hantush_w_below_theis_for_finite_leakage() {
        for u in [1e-4, 1e-2, 0.1] {
            let leaky = hantush_w(u, 0.5).unwrap();
            let theis = theis_w(u).unwrap();
            assert!(
                leaky < theis,
                "leakage must reduce the well function (u = {})",
                u
            );
            assert!(leaky > 0.0);
        }
    }

    #[test]
    fn test_hantush_w_decreasing_in_u_and_leakage() {
        let r_over_b = 0.2;
        let w1 = hantush_w(0.001, r_over_b).unwrap();
        let w2 = hantush_w(0.01, r_over_b).unwrap();
        let w3 = hantush_w(0.1, r_over_b).unwrap();
        assert!(w1 > w2 && w2 > w3);

        // Stronger leakage (larger r/B) lowers the plateau.
        let weak = hantush_w(0.001, 0.1).unwrap();
        let strong = hantush_w(0.001, 1.0).unwrap();
        assert!(strong < weak);
    }

    #[test]
    fn test_hantush_w_large_u_vanishes() {
        let w = hantush_w(30.0, 0.5).unwrap();
        assert!(w >= 0.0);
        assert!(w < 1e-12);
    }

    #[test]
    fn test_hantush_w_budget_exhaustion_is_explicit() {
        // A budget too small to resolve the integrand must surface as a
        // quadrature error, not a wrong value.
        let result = hantush_w_with_budget(1e-4, 0.5, 2);
        assert!(matches!(
            result,
            Err(PumpTestError::QuadratureNonConvergence { .. })
        ));

        // A generous budget reproduces the default-path value exactly.
        let custom = hantush_w_with_budget(1e-2, 0.5, DEFAULT_QUAD_SUBDIVISIONS).unwrap();
        let default = hantush_w(1e-2, 0.5).unwrap();
        assert_eq!(custom, default);
    }

    #[test]
    fn test_hantush_w_rejects_invalid_arguments() {
        assert!(hantush_w(0.0, 0.5).is_err());
        assert!(hantush_w(0.1, 0.0).is_err());
        assert!(hantush_w(0.1, -1.0).is_err());
    }
}
