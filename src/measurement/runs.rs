//! Measurement runs: thermalize, evolve freely, and average observables.
//!
//! Energy is costly compared to the defect counts, so the frame-based runs
//! sample it only every `tmax_frame / e_tests` frames.

use rand::Rng;
use tracing::info;

use crate::defects::{CreationRates, KinkDetector, Smoother};
use crate::dynamics::{EnergyEvaluator, Integrator};
use crate::error::{KinkError, Result};
use crate::lattice::{FieldState, LatticeConfig};
use crate::sampling::HeatBath;

/// Energy budget of a freshly thermalized state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyProfile {
    pub kinetic_fraction: f64,
    pub interaction_fraction: f64,
    pub potential_fraction: f64,
    pub mean_energy: f64,
    /// E_avg / (N·T)
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefectCensus {
    pub mean_energy: f64,
    pub mean_zeros: f64,
    pub mean_gaps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairCensus {
    pub mean_energy: f64,
    pub mean_pairs: f64,
}

#[derive(Debug, Clone)]
pub struct CreationRun {
    pub mean_energy: f64,
    /// Raw pair count of every frame, `tmax_frame + buff_frame` long
    pub pair_counts: Vec<usize>,
    pub rates: CreationRates,
}

#[derive(Debug, Clone)]
pub struct CumulativeCount {
    /// Elapsed timesteps at each entry
    pub timesteps: Vec<usize>,
    /// Running sum of the pair count
    pub totals: Vec<usize>,
    /// State after the last frame
    pub state: FieldState,
}

/// Periodic energy sampling along a frame loop.
struct EnergySampler {
    evaluator: EnergyEvaluator,
    every: usize,
    sum: f64,
    count: usize,
}

impl EnergySampler {
    fn new(config: &LatticeConfig, tmax_frame: usize, e_tests: usize) -> Self {
        Self {
            evaluator: EnergyEvaluator::new(config),
            every: (tmax_frame / e_tests.max(1)).max(1),
            sum: 0.0,
            count: 0,
        }
    }

    fn observe(&mut self, frame: usize, state: &FieldState) {
        if frame % self.every == 0 {
            self.sum += self.evaluator.evaluate(state).total;
            self.count += 1;
        }
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

fn require_frames(frames: usize) -> Result<()> {
    if frames == 0 {
        return Err(KinkError::InvalidConfig("measurement needs at least one frame".into()));
    }
    Ok(())
}

/// Thermalize with `iter_max` heat-bath iterations, then evolve freely for
/// `steps` timesteps measuring the energy split every step.
pub fn energy_profile<R: Rng + ?Sized>(
    config: &LatticeConfig,
    bath: &HeatBath,
    iter_max: usize,
    steps: usize,
    rng: &mut R,
) -> Result<EnergyProfile> {
    require_frames(steps)?;
    let integrator = Integrator::new(config);
    let evaluator = EnergyEvaluator::new(config);
    let mut state = bath.thermalize(iter_max, rng);

    let (mut kf, mut inf, mut pf, mut e_sum) = (0.0, 0.0, 0.0, 0.0);
    for _ in 0..steps {
        let e = evaluator.evaluate(&state);
        let (k, i, p) = e.fractions();
        kf += k;
        inf += i;
        pf += p;
        e_sum += e.total;
        state = integrator.advance_timestep(state);
    }

    let n = steps as f64;
    let mean_energy = e_sum / n;
    let profile = EnergyProfile {
        kinetic_fraction: kf / n,
        interaction_fraction: inf / n,
        potential_fraction: pf / n,
        mean_energy,
        alpha: mean_energy / (config.nodes() as f64 * bath.temperature()),
    };
    info!(
        temperature = bath.temperature(),
        mean_energy = profile.mean_energy,
        alpha = profile.alpha,
        "energy profile measured"
    );
    Ok(profile)
}

/// Average zero crossings and wide gaps per frame over `tmax_frame` frames.
pub fn defect_census<R: Rng + ?Sized>(
    config: &LatticeConfig,
    bath: &HeatBath,
    iter_max: usize,
    tmax_frame: usize,
    e_tests: usize,
    rng: &mut R,
) -> Result<DefectCensus> {
    require_frames(tmax_frame)?;
    let integrator = Integrator::new(config);
    let detector = KinkDetector::new(config);
    let mut energies = EnergySampler::new(config, tmax_frame, e_tests);
    let mut state = bath.thermalize(iter_max, rng);

    let (mut zeros, mut gaps) = (0usize, 0usize);
    for j in 0..tmax_frame {
        state = integrator.next_frame(state);
        let (z, g) = detector.zeros_and_wide_gaps(&state);
        zeros += z;
        gaps += g;
        energies.observe(j, &state);
    }

    let census = DefectCensus {
        mean_energy: energies.mean(),
        mean_zeros: zeros as f64 / tmax_frame as f64,
        mean_gaps: gaps as f64 / tmax_frame as f64,
    };
    info!(
        temperature = bath.temperature(),
        mean_zeros = census.mean_zeros,
        mean_gaps = census.mean_gaps,
        "defect census finished"
    );
    Ok(census)
}

/// Average pair number per frame over `tmax_frame` frames.
pub fn pair_census<R: Rng + ?Sized>(
    config: &LatticeConfig,
    bath: &HeatBath,
    iter_max: usize,
    tmax_frame: usize,
    e_tests: usize,
    rng: &mut R,
) -> Result<PairCensus> {
    require_frames(tmax_frame)?;
    let integrator = Integrator::new(config);
    let detector = KinkDetector::new(config);
    let mut energies = EnergySampler::new(config, tmax_frame, e_tests);
    let mut state = bath.thermalize(iter_max, rng);

    let mut pairs = 0usize;
    for j in 0..tmax_frame {
        state = integrator.next_frame(state);
        pairs += detector.pairs(&state);
        energies.observe(j, &state);
    }

    let census = PairCensus {
        mean_energy: energies.mean(),
        mean_pairs: pairs as f64 / tmax_frame as f64,
    };
    info!(temperature = bath.temperature(), mean_pairs = census.mean_pairs, "pair census finished");
    Ok(census)
}

/// Record the pair count over `tmax_frame + buff_frame` frames and estimate
/// the creation rate and time over the first `tmax_frame` of them.
pub fn creation_run<R: Rng + ?Sized>(
    config: &LatticeConfig,
    bath: &HeatBath,
    iter_max: usize,
    tmax_frame: usize,
    e_tests: usize,
    rng: &mut R,
) -> Result<CreationRun> {
    require_frames(tmax_frame)?;
    let integrator = Integrator::new(config);
    let detector = KinkDetector::new(config);
    let smoother = Smoother::new(config);
    let mut energies = EnergySampler::new(config, tmax_frame, e_tests);
    let mut state = bath.thermalize(iter_max, rng);

    let total_frames = tmax_frame + smoother.buff_frame();
    let mut pair_counts = Vec::with_capacity(total_frames);
    for j in 0..total_frames {
        state = integrator.next_frame(state);
        pair_counts.push(detector.pairs(&state));
        energies.observe(j, &state);
    }

    let rates = smoother.creation_rates(&pair_counts, tmax_frame)?;
    info!(
        temperature = bath.temperature(),
        creations = rates.creations,
        gamma = rates.gamma,
        tau = rates.tau,
        "creation run finished"
    );
    Ok(CreationRun {
        mean_energy: energies.mean(),
        pair_counts,
        rates,
    })
}

/// Evolve frame by frame, accumulating the pair count, until the running
/// total reaches `target` or `max_frames` frames have passed.
pub fn cumulative_pairs(
    config: &LatticeConfig,
    state: FieldState,
    target: usize,
    max_frames: usize,
) -> Result<CumulativeCount> {
    config.check_state(&state)?;
    let integrator = Integrator::new(config);
    let detector = KinkDetector::new(config);

    let mut timesteps = vec![0];
    let mut totals = vec![detector.pairs(&state)];
    let mut frames = integrator.frames(state, config.frame_space());
    let mut elapsed = 0;

    while totals.last().is_some_and(|&t| t < target) && timesteps.len() <= max_frames {
        let Some(next) = frames.next() else { break };
        elapsed += config.frame_space();
        let running = totals.last().copied().unwrap_or(0) + detector.pairs(&next);
        timesteps.push(elapsed);
        totals.push(running);
    }

    Ok(CumulativeCount {
        timesteps,
        totals,
        state: frames.into_state(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{init_vacuum, LatticeParams};
    use approx::assert_relative_eq;
    use nalgebra::DVector;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_config() -> LatticeConfig {
        let params = LatticeParams {
            nodes: 128,
            length: 25.0,
            w_kink: 5,
            ..LatticeParams::default()
        };
        LatticeConfig::new(params).unwrap()
    }

    #[test]
    fn test_energy_sampler_cadence() {
        let config = small_config();
        let state = init_vacuum(&config);
        let mut sampler = EnergySampler::new(&config, 100, 10);
        for j in 0..100 {
            sampler.observe(j, &state);
        }
        assert_eq!(sampler.count, 10);

        let mut sampler = EnergySampler::new(&config, 5, 10);
        for j in 0..5 {
            sampler.observe(j, &state);
        }
        assert_eq!(sampler.count, 5);
    }

    #[test]
    fn test_energy_profile_fractions_sum_to_one() {
        let config = small_config();
        let bath = HeatBath::new(&config, 1.0, 0.05).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let profile = energy_profile(&config, &bath, 50, 100, &mut rng).unwrap();
        let sum = profile.kinetic_fraction + profile.interaction_fraction + profile.potential_fraction;
        assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
        assert!(profile.mean_energy > 0.0);
        assert_relative_eq!(profile.alpha, profile.mean_energy / 128.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cold_bath_has_no_defects() {
        let config = small_config();
        let bath = HeatBath::new(&config, 0.0, 0.05).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let census = defect_census(&config, &bath, 10, 20, 4, &mut rng).unwrap();
        assert_eq!(census.mean_zeros, 0.0);
        assert_eq!(census.mean_gaps, 0.0);

        let pairs = pair_census(&config, &bath, 10, 20, 4, &mut rng).unwrap();
        assert_eq!(pairs.mean_pairs, 0.0);
        assert_relative_eq!(pairs.mean_energy, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_creation_run_records_buffered_series() {
        let config = small_config();
        let bath = HeatBath::new(&config, 1.0, 0.05).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let run = creation_run(&config, &bath, 50, 30, 5, &mut rng).unwrap();
        assert_eq!(run.pair_counts.len(), 30 + config.buff_frame());
        assert!(run.mean_energy > 0.0);
        if run.rates.is_degenerate() {
            assert!(run.rates.tau.is_infinite());
        } else {
            assert_relative_eq!(run.rates.gamma * run.rates.tau, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_frames_rejected() {
        let config = small_config();
        let bath = HeatBath::new(&config, 1.0, 0.05).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(pair_census(&config, &bath, 1, 0, 1, &mut rng).is_err());
        assert!(creation_run(&config, &bath, 1, 0, 1, &mut rng).is_err());
        assert!(energy_profile(&config, &bath, 1, 0, &mut rng).is_err());
    }

    #[test]
    fn test_cumulative_pairs_stops_at_frame_limit() {
        let config = small_config();
        let count = cumulative_pairs(&config, init_vacuum(&config), 5, 4).unwrap();
        assert_eq!(count.totals, vec![0; 5]);
        assert_eq!(count.timesteps, vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn test_cumulative_pairs_reaches_target() {
        let config = small_config();
        // a wide static pair persists for the first few frames
        let f = DVector::from_fn(128, |i, _| if (40..90).contains(&i) { 1.0 } else { -1.0 });
        let state = FieldState::new(f.clone(), f).unwrap();
        let count = cumulative_pairs(&config, state, 3, 100).unwrap();
        assert_eq!(*count.totals.last().unwrap(), 3);
        assert_eq!(count.timesteps.len(), count.totals.len());
    }

    #[test]
    fn test_cumulative_pairs_checks_lattice_size() {
        let config = small_config();
        assert!(cumulative_pairs(&config, FieldState::vacuum(64), 1, 1).is_err());
    }
}
