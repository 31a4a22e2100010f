//! Discrete energy functional.
//!
//! K = Σ (f - f_old)² / (2 dt²)
//! I = Σ f (f - f[i-2]) / (4 dx²)
//! P = λ Σ (f² - 1)² / 4

use crate::lattice::{cyclic, FieldState, LatticeConfig};

/// Energy split into its three terms plus their sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    pub kinetic: f64,
    pub interaction: f64,
    pub potential: f64,
    pub total: f64,
}

impl Energy {
    /// Fractions (K/E, I/E, P/E) of the total energy.
    pub fn fractions(&self) -> (f64, f64, f64) {
        (
            self.kinetic / self.total,
            self.interaction / self.total,
            self.potential / self.total,
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EnergyEvaluator {
    dx: f64,
    dt: f64,
    lambda: f64,
}

impl EnergyEvaluator {
    pub fn new(config: &LatticeConfig) -> Self {
        Self {
            dx: config.dx(),
            dt: config.dt(),
            lambda: config.lambda(),
        }
    }

    pub fn evaluate(&self, state: &FieldState) -> Energy {
        let f = state.current();
        let f_old = state.previous();
        let n = f.len();

        let kinetic = (f - f_old).norm_squared() / (2.0 * self.dt * self.dt);
        let interaction = (0..n)
            .map(|i| f[i] * (f[i] - f[cyclic(i, -2, n)]))
            .sum::<f64>()
            / (4.0 * self.dx * self.dx);
        let potential = self.lambda * f.iter().map(|&x| (x * x - 1.0).powi(2)).sum::<f64>() / 4.0;

        Energy {
            kinetic,
            interaction,
            potential,
            total: kinetic + interaction + potential,
        }
    }
}

/// Energy of a state on the given lattice.
pub fn energy(config: &LatticeConfig, state: &FieldState) -> Energy {
    EnergyEvaluator::new(config).evaluate(state)
}
