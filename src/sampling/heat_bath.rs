//! Metropolis-Hastings heat bath for preparing thermal initial states.
//!
//! Each sweep visits every site once in a random order and proposes
//! z ~ Normal(y, σ) for the current value y. The move is accepted when a
//! uniform draw r satisfies r < exp(-ΔE/T), where ΔE is the change of the
//! discrete energy functional caused by replacing y with z at that site.
//! Between sweeps the field is advanced by one timestep, so the bath
//! thermalizes the field while it relaxes under its own dynamics.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::{debug, info};

use crate::dynamics::Integrator;
use crate::error::{KinkError, Result};
use crate::lattice::{cyclic, FieldState, LatticeConfig};

/// Heat bath at a fixed temperature.
#[derive(Debug, Clone)]
pub struct HeatBath {
    nodes: usize,
    temperature: f64,
    sigma: f64,
    lambda: f64,
    /// Quadratic coefficient of the single-site energy polynomial
    quad: f64,
    inv_dt2: f64,
    inv_4dx2: f64,
    integrator: Integrator,
}

impl HeatBath {
    /// Proposal width is `sigma_factor * sqrt(temperature)`.
    pub fn new(config: &LatticeConfig, temperature: f64, sigma_factor: f64) -> Result<Self> {
        if !(temperature.is_finite() && temperature >= 0.0) {
            return Err(KinkError::InvalidHeatBath(format!(
                "temperature must be finite and non-negative, got {}",
                temperature
            )));
        }
        if !(sigma_factor.is_finite() && sigma_factor >= 0.0) {
            return Err(KinkError::InvalidHeatBath(format!(
                "sigma factor must be finite and non-negative, got {}",
                sigma_factor
            )));
        }

        let dt = config.dt();
        let dx = config.dx();
        let lambda = config.lambda();
        Ok(Self {
            nodes: config.nodes(),
            temperature,
            sigma: sigma_factor * temperature.sqrt(),
            lambda,
            quad: 1.0 / (2.0 * dt * dt) + 1.0 / (4.0 * dx * dx) - 0.5 * lambda,
            inv_dt2: 1.0 / (dt * dt),
            inv_4dx2: 1.0 / (4.0 * dx * dx),
            integrator: Integrator::new(config),
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Standard deviation of the Gaussian proposal.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Linear coefficient of the single-site energy polynomial at site `k`.
    pub fn linear_coefficient(&self, state: &FieldState, k: usize) -> f64 {
        let f = state.current();
        let n = f.len();
        -state.previous()[k] * self.inv_dt2 - (f[cyclic(k, -2, n)] + f[cyclic(k, 2, n)]) * self.inv_4dx2
    }

    /// Energy change from setting site `k` to `z` when it currently holds `y`.
    pub fn energy_diff(&self, state: &FieldState, k: usize, z: f64, y: f64) -> f64 {
        let lin = self.linear_coefficient(state, k);
        (z - y) * ((z + y) * (self.lambda * (z * z + y * y) / 4.0 + self.quad) + lin)
    }

    /// exp(-ΔE/T). Not clamped to 1: a downhill move gives a value above 1
    /// and is therefore always accepted.
    pub fn acceptance(&self, state: &FieldState, k: usize, z: f64, y: f64) -> f64 {
        (-self.energy_diff(state, k, z, y) / self.temperature).exp()
    }

    /// One Metropolis proposal at site `k`. Returns whether it was accepted.
    pub fn site_update<R: Rng + ?Sized>(&self, state: &mut FieldState, k: usize, rng: &mut R) -> bool {
        let y = state.current()[k];
        let z = y + self.sigma * rng.sample::<f64, _>(StandardNormal);
        let r: f64 = rng.gen();
        if r < self.acceptance(state, k, z, y) {
            state.current_mut()[k] = z;
            true
        } else {
            false
        }
    }

    /// Update every site once, in a uniformly random order.
    /// Returns the number of accepted proposals.
    pub fn sweep<R: Rng + ?Sized>(&self, state: &mut FieldState, rng: &mut R) -> usize {
        let mut order: Vec<usize> = (0..state.len()).collect();
        self.sweep_with(state, &mut order, rng)
    }

    fn sweep_with<R: Rng + ?Sized>(&self, state: &mut FieldState, order: &mut [usize], rng: &mut R) -> usize {
        order.shuffle(rng);
        let mut accepted = 0;
        for &k in order.iter() {
            if self.site_update(state, k, rng) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Alternate `iter_max` sweeps with single timesteps, starting from `state`.
    pub fn attach<R: Rng + ?Sized>(&self, mut state: FieldState, iter_max: usize, rng: &mut R) -> FieldState {
        let n = state.len();
        let mut order: Vec<usize> = (0..n).collect();
        let report_every = (iter_max / 10).max(1);
        let mut accepted_total = 0usize;

        for iteration in 0..iter_max {
            let accepted = self.sweep_with(&mut state, &mut order, rng);
            accepted_total += accepted;
            self.integrator.step(&mut state);

            if (iteration + 1) % report_every == 0 {
                debug!(
                    iteration = iteration + 1,
                    acceptance = accepted as f64 / n as f64,
                    "heat bath sweep"
                );
            }
        }

        if iter_max > 0 {
            info!(
                temperature = self.temperature,
                iterations = iter_max,
                acceptance = accepted_total as f64 / (iter_max * n) as f64,
                "heat bath finished"
            );
        }
        state
    }

    /// Thermalize the `-1` vacuum with `iter_max` sweep/timestep iterations.
    pub fn thermalize<R: Rng + ?Sized>(&self, iter_max: usize, rng: &mut R) -> FieldState {
        self.attach(FieldState::vacuum(self.nodes), iter_max, rng)
    }
}

/// Prepare a thermal state of temperature `temperature` from the vacuum.
pub fn heat_bath<R: Rng + ?Sized>(
    config: &LatticeConfig,
    temperature: f64,
    iter_max: usize,
    sigma_factor: f64,
    rng: &mut R,
) -> Result<FieldState> {
    Ok(HeatBath::new(config, temperature, sigma_factor)?.thermalize(iter_max, rng))
}
