//! Overlay of all five solution methods on one reference scenario
//!
//! Prints a time/drawdown table with one column per method, ready to be
//! pasted into a plotting tool.
//!
//! ```bash
//! cargo run --example overlay
//! ```

use pumptest_rs::prelude::*;

fn main() -> Result<(), PumpTestError> {
    env_logger::init();

    // Productive sand aquifer under a semi-pervious confining layer,
    // pumped at 500 m^3/d and observed at the well radius.
    let aquifer = AquiferProperties::new(
        10.0, // K [m/d]
        1e-4, // Ss [1/m]
        0.2,  // Sy [-]
        20.0, // b [m]
        5.0,  // bc [m]
        0.01, // Kc [m/d]
        0.0,  // Ssc [1/m]
    )?;
    let well = WellProperties::new(0.5, -500.0, 0.01, 1000.0)?;

    let report = Evaluation::new(aquifer, well).run_all();

    for (method, err) in report.failures() {
        eprintln!("skipped {}: {}", method, err);
    }

    let methods: Vec<_> = report.curves().keys().copied().collect();
    print!("{:>12}", "t [d]");
    for method in &methods {
        print!("  {:>32}", method.label());
    }
    println!();

    let times = report.curves().values().next().expect("no curves").times();
    for (i, t) in times.iter().enumerate() {
        print!("{:>12.4}", t);
        for method in &methods {
            let s = report.curves()[method].drawdown()[i];
            print!("  {:>32.4}", s);
        }
        println!();
    }

    Ok(())
}
