//! Coupling scan for the Holstein polaron
//!
//! Run with: cargo run --release --example coupling_scan
//!
//! Compares the sampled phonon number per unit ωτ with the weak-coupling
//! prediction g²/ω² for a few couplings.

use polaron_dmc::{run_simulation, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let omega = 1.0;
    let time = 20.0;
    let nsteps = 500_000;
    let nsteps_burn = 50_000;

    println!("{:>6} {:>12} {:>12} {:>12} {:>12}", "g", "N/(w t)", "fit", "g^2/w^2", "E");
    for (i, g) in [0.1, 0.2, 0.3, 0.5, 0.7].into_iter().enumerate() {
        let settings = Settings { nsteps, nsteps_burn, omega, g, time };
        match run_simulation(&settings, Some(1000 + i as u64)) {
            Ok(results) => println!(
                "{:>6.2} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                g,
                results.mean_phonons_normalized,
                results.fit_phonons_normalized(),
                results.theory_phonons,
                results.mean_energy
            ),
            Err(err) => eprintln!("g = {}: {}", g, err),
        }
    }
}
