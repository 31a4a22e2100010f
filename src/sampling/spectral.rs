//! Spectral initial condition: an approximately thermal state built from
//! random Fourier phases with a falling amplitude spectrum.

use rand::Rng;
use std::f64::consts::PI;

use crate::lattice::{FieldState, LatticeConfig};
use nalgebra::DVector;

/// Inverse amplitude of Fourier mode `k` on `n` sites.
fn inverse_amplitude(k: usize, n: usize) -> f64 {
    if k < 5 {
        100.0
    } else if k < n / 2 {
        (k + 1) as f64
    } else {
        (n - k) as f64
    }
}

/// Re(Σ_k a_k e^{iφ_k} e^{-2πi jk/n}) for every site j.
fn real_transform(amplitudes: &[f64], phases: &[f64]) -> DVector<f64> {
    let n = phases.len();
    DVector::from_fn(n, |j, _| {
        (0..n)
            .map(|k| {
                let angle = 2.0 * PI * ((j * k) % n) as f64 / n as f64;
                amplitudes[k] * (phases[k] - angle).cos()
            })
            .sum()
    })
}

/// Build `(f_old, f)` around the `-1` vacuum.
///
/// `f_old = -1 + scale·Re(DFT(a_k e^{iφ_k}))` and
/// `f = f_old + scale·Re(DFT((2π/L) e^{iψ_k}))·dt`, with the phases drawn
/// uniformly from `rng` (all φ first, then all ψ).
pub fn spectral_state<R: Rng + ?Sized>(config: &LatticeConfig, scale: f64, rng: &mut R) -> FieldState {
    let n = config.nodes();
    let phases_1: Vec<f64> = (0..n).map(|_| 2.0 * PI * rng.gen::<f64>()).collect();
    let phases_2: Vec<f64> = (0..n).map(|_| 2.0 * PI * rng.gen::<f64>()).collect();

    let amplitudes_1: Vec<f64> = (0..n).map(|k| 1.0 / inverse_amplitude(k, n)).collect();
    let amplitudes_2 = vec![2.0 * PI / config.length(); n];

    let displacement = real_transform(&amplitudes_1, &phases_1);
    let velocity = real_transform(&amplitudes_2, &phases_2);

    let f_old = displacement.map(|d| -1.0 + scale * d);
    let f = &f_old + velocity * (scale * config.dt());
    FieldState::from_parts(f_old, f)
}
