//! Aquifer and well parameter model
//!
//! Immutable value structures holding the hydraulic properties consumed by
//! every solution method. Both types validate at construction and expose
//! read-only accessors, so a value that exists is a value that satisfies its
//! physical bounds — solvers never re-validate.
//!
//! # Units
//!
//! The crate is unit-agnostic as long as length and time units are used
//! consistently (e.g. meters and days: K in m/d, Q in m3/d, t in d).

use crate::error::{PumpTestError, PumpTestResult};

/// Number of evaluation time samples generated by default.
///
/// Matches the resolution customarily used for log-log drawdown plots.
pub const DEFAULT_TIME_SAMPLES: usize = 60;

fn require_positive(name: &'static str, value: f64) -> PumpTestResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PumpTestError::invalid(name, value, "strictly positive"));
    }
    Ok(value)
}

fn require_non_negative(name: &'static str, value: f64) -> PumpTestResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(PumpTestError::invalid(name, value, "non-negative"));
    }
    Ok(value)
}

// =================================================================================================
// Aquifer Properties
// =================================================================================================

/// Hydraulic properties of the pumped aquifer and its confining layer
///
/// # Derived Storage Coefficient
///
/// The storage coefficient S = Ss * b is recomputed from specific storage
/// and saturated thickness; it is never set independently. Keeping the
/// fields private guarantees the invariant survives any use of the type.
///
/// # Example
///
/// ```rust
/// use pumptest_rs::physics::AquiferProperties;
///
/// let aquifer = AquiferProperties::new(10.0, 1e-4, 0.2, 20.0, 1.0, 0.01, 1e-5)?;
/// assert_eq!(aquifer.s(), 1e-4 * 20.0);
/// # Ok::<(), pumptest_rs::PumpTestError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AquiferProperties {
    /// Hydraulic conductivity K (> 0)
    k: f64,
    /// Specific storage Ss (> 0)
    ss: f64,
    /// Specific yield Sy (0 < Sy <= 1)
    sy: f64,
    /// Saturated thickness b (> 0)
    b: f64,
    /// Confining-layer thickness bc (>= 0; 0 = no confining layer)
    bc: f64,
    /// Confining-layer hydraulic conductivity Kc (>= 0)
    kc: f64,
    /// Confining-layer specific storage Ssc (>= 0)
    ssc: f64,
    /// Derived storage coefficient S = Ss * b
    s: f64,
}

impl AquiferProperties {
    /// Create a validated set of aquifer properties.
    ///
    /// # Errors
    ///
    /// [`PumpTestError::InvalidParameter`] when any bound is violated:
    /// K, Ss, b strictly positive; Sy in (0, 1]; bc, Kc, Ssc non-negative.
    pub fn new(
        k: f64,
        ss: f64,
        sy: f64,
        b: f64,
        bc: f64,
        kc: f64,
        ssc: f64,
    ) -> PumpTestResult<Self> {
        let k = require_positive("K", k)?;
        let ss = require_positive("Ss", ss)?;
        if !sy.is_finite() || sy <= 0.0 || sy > 1.0 {
            return Err(PumpTestError::invalid("Sy", sy, "in (0, 1]"));
        }
        let b = require_positive("b", b)?;
        let bc = require_non_negative("bc", bc)?;
        let kc = require_non_negative("Kc", kc)?;
        let ssc = require_non_negative("Ssc", ssc)?;

        Ok(Self {
            k,
            ss,
            sy,
            b,
            bc,
            kc,
            ssc,
            s: ss * b,
        })
    }

    /// Hydraulic conductivity K
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Specific storage Ss
    pub fn ss(&self) -> f64 {
        self.ss
    }

    /// Specific yield Sy
    pub fn sy(&self) -> f64 {
        self.sy
    }

    /// Saturated thickness b
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Confining-layer thickness bc
    pub fn bc(&self) -> f64 {
        self.bc
    }

    /// Confining-layer hydraulic conductivity Kc
    pub fn kc(&self) -> f64 {
        self.kc
    }

    /// Confining-layer specific storage Ssc
    pub fn ssc(&self) -> f64 {
        self.ssc
    }

    /// Storage coefficient S = Ss * b (always derived)
    pub fn s(&self) -> f64 {
        self.s
    }

    /// Transmissivity T = K * b
    pub fn transmissivity(&self) -> f64 {
        self.k * self.b
    }

    /// True when a confining layer with finite resistance is present,
    /// i.e. the Hantush leakage factor is defined.
    pub fn has_confining_layer(&self) -> bool {
        self.bc > 0.0 && self.kc > 0.0
    }
}

// =================================================================================================
// Well Properties
// =================================================================================================

/// Pumping-well properties and the derived evaluation time axis
///
/// The time axis is a geometrically (log-) spaced sequence spanning the
/// observed data's time range. It is built once at construction and shared
/// by every solution method, so curves from different methods can be
/// overlaid sample by sample.
///
/// # Sign Convention
///
/// Q < 0 is extraction (the usual case for a pumping test); drawdown then
/// comes out positive.
#[derive(Debug, Clone, PartialEq)]
pub struct WellProperties {
    /// Well radius, also the radial distance at which drawdown is observed (> 0)
    r: f64,
    /// Pumping rate Q (negative = extraction)
    q: f64,
    /// Log-spaced evaluation times, strictly increasing
    times: Vec<f64>,
}

impl WellProperties {
    /// Create well properties with the default 60-sample time axis.
    ///
    /// `t_min`/`t_max` are the observed data's first and last times; the
    /// evaluation axis spans exactly that range.
    pub fn new(r: f64, q: f64, t_min: f64, t_max: f64) -> PumpTestResult<Self> {
        Self::with_samples(r, q, t_min, t_max, DEFAULT_TIME_SAMPLES)
    }

    /// Create well properties with a caller-chosen sample count (>= 2).
    pub fn with_samples(
        r: f64,
        q: f64,
        t_min: f64,
        t_max: f64,
        samples: usize,
    ) -> PumpTestResult<Self> {
        let r = require_positive("r", r)?;
        if !q.is_finite() {
            return Err(PumpTestError::invalid("Q", q, "finite"));
        }
        let t_min = require_positive("t_min", t_min)?;
        if !t_max.is_finite() || t_max <= t_min {
            return Err(PumpTestError::invalid("t_max", t_max, "greater than t_min"));
        }
        if samples < 2 {
            return Err(PumpTestError::invalid(
                "samples",
                samples as f64,
                "at least 2",
            ));
        }

        Ok(Self {
            r,
            q,
            times: log_spaced(t_min, t_max, samples),
        })
    }

    /// Well / observation radius
    pub fn r(&self) -> f64 {
        self.r
    }

    /// Pumping rate (negative = extraction)
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Shared evaluation time axis
    pub fn times(&self) -> &[f64] {
        &self.times
    }
}

/// Geometrically spaced sequence from `start` to `end` inclusive.
///
/// Endpoints are written exactly rather than through `exp(log(...))` round
/// trips, so `times[0] == t_min` and `times[n-1] == t_max` hold bitwise.
fn log_spaced(start: f64, end: f64, n: usize) -> Vec<f64> {
    debug_assert!(n >= 2 && start > 0.0 && end > start);
    let log_start = start.log10();
    let step = (end.log10() - log_start) / (n - 1) as f64;

    let mut times = Vec::with_capacity(n);
    times.push(start);
    for i in 1..n - 1 {
        times.push(10f64.powf(log_start + step * i as f64));
    }
    times.push(end);
    times
}

// =================================================================================================
// Tests
// =================================================================================================
