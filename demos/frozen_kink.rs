//! Frozen kink: quench a hot field in a cold bath
//!
//! Run with: cargo run --release --example frozen_kink
//!
//! The vacuum is attached to a hot heat bath, evolved freely so that kink
//! pairs form, then attached to a cold bath. The cold bath drains the
//! thermal noise while the kinks, being topological, survive.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rust_kinks::{energy, init_vacuum, HeatBath, Integrator, KinkDetector, LatticeConfig};

fn main() -> rust_kinks::Result<()> {
    let config = LatticeConfig::default();
    let integrator = Integrator::new(&config);
    let detector = KinkDetector::new(&config);
    let mut rng = ChaCha8Rng::seed_from_u64(6);

    let hot = HeatBath::new(&config, 1.0, 0.05)?;      // hot bath temperature
    let cold = HeatBath::new(&config, 0.01, 0.05)?;    // cold bath temperature
    let hot_iterations = 100;
    let free_steps = 300;
    let cold_iterations = 100;

    let report = |stage: &str, state: &rust_kinks::FieldState| {
        let e = energy(&config, state);
        println!(
            "{:<12} E = {:10.3}  K = {:9.3}  I = {:9.3}  P = {:9.3}  pairs = {}",
            stage,
            e.total,
            e.kinetic,
            e.interaction,
            e.potential,
            detector.pairs(state)
        );
    };

    let mut state = init_vacuum(&config);
    report("vacuum", &state);

    state = hot.attach(state, hot_iterations, &mut rng);
    report("hot bath", &state);

    state = integrator.advance_frame(state, free_steps);
    report("free", &state);

    state = cold.attach(state, cold_iterations, &mut rng);
    report("cold bath", &state);

    Ok(())
}
