//! Temperature dependence of the pair creation time
//!
//! Run with: cargo run --release --example creation_time_sweep
//!
//! Sweeps the heat-bath temperature and prints the average energy, the
//! creation rate Γ and the creation time τ at each point.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rust_kinks::{creation_run, HeatBath, LatticeConfig};

fn main() -> rust_kinks::Result<()> {
    let config = LatticeConfig::default();
    let num_tests = 6;          // temperature points
    let t_min = 0.5;
    let t_max = 1.0;
    let iter_max = 100;         // heat bath iterations
    let tmax_frame = 20_000;    // measured frames per point
    let e_tests = 100;          // energy evaluations per point

    println!("{:>8} {:>12} {:>10} {:>14} {:>12}", "T", "E", "creations", "Gamma", "tau");
    for i in 0..num_tests {
        let t = t_min + (t_max - t_min) * i as f64 / (num_tests - 1) as f64;
        let bath = HeatBath::new(&config, t, 0.05)?;
        let mut rng = ChaCha8Rng::seed_from_u64(i as u64);
        let run = creation_run(&config, &bath, iter_max, tmax_frame, e_tests, &mut rng)?;
        println!(
            "{:>8.3} {:>12.2} {:>10} {:>14.6e} {:>12.3}",
            t, run.mean_energy, run.rates.creations, run.rates.gamma, run.rates.tau
        );
    }
    Ok(())
}
