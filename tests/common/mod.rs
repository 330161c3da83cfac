//! Common utilities for integration tests

#![allow(dead_code)]

use pumptest_rs::physics::{AquiferProperties, WellProperties};

/// Reference unconfined-aquifer scenario used across the integration
/// tests: a productive sand aquifer pumped at 500 m^3/d, observed at the
/// well radius over 0.01..1000 days.
pub fn reference_aquifer() -> AquiferProperties {
    AquiferProperties::new(
        10.0, // K [m/d]
        1e-4, // Ss [1/m]
        0.2,  // Sy [-]
        20.0, // b [m]
        0.0, 0.0, 0.0, // no confining layer
    )
    .unwrap()
}

/// Same aquifer overlain by a semi-pervious confining layer.
pub fn leaky_aquifer() -> AquiferProperties {
    AquiferProperties::new(10.0, 1e-4, 0.2, 20.0, 5.0, 0.01, 0.0).unwrap()
}

pub fn reference_well() -> WellProperties {
    WellProperties::new(0.5, -500.0, 0.01, 1000.0).unwrap()
}

pub fn relative_error(computed: f64, expected: f64) -> f64 {
    if expected == 0.0 {
        computed.abs()
    } else {
        ((computed - expected) / expected).abs()
    }
}
