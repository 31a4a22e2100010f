//! Leapfrog integrator for the discretized φ⁴ equation of motion.
//!
//! The field obeys f_tt = f_xx - λ f (f² - 1). Central differences in space
//! and time give the explicit update
//!
//! f_new = -f_old + C1·f + C2·(f[i+1] + f[i-1]) + C3·f³
//!
//! with C2 = dt²/dx², C3 = -λ·dt² and C1 = 2 - 2·C2 - C3.

use crate::lattice::{FieldState, LatticeConfig};

/// Deterministic stepper holding the precomputed update coefficients.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    c1: f64,
    c2: f64,
    c3: f64,
    frame_space: usize,
}

impl Integrator {
    pub fn new(config: &LatticeConfig) -> Self {
        Self {
            c1: config.c1(),
            c2: config.c2(),
            c3: config.c3(),
            frame_space: config.frame_space(),
        }
    }

    /// Advance `(f_old, f)` to `(f, f_new)`.
    pub fn advance_timestep(&self, mut state: FieldState) -> FieldState {
        self.step(&mut state);
        state
    }

    /// Apply `k` timesteps and return only the final state.
    pub fn advance_frame(&self, mut state: FieldState, k: usize) -> FieldState {
        for _ in 0..k {
            self.step(&mut state);
        }
        state
    }

    /// Advance by the configured `frame_space`.
    pub fn next_frame(&self, state: FieldState) -> FieldState {
        self.advance_frame(state, self.frame_space)
    }

    /// Iterator over successive frames, each `k` timesteps after the last.
    pub fn frames(&self, state: FieldState, k: usize) -> Frames {
        Frames {
            integrator: *self,
            state,
            k,
        }
    }

    /// Rolling two-slot update: f_new only reads f_old at the same site, so
    /// it is written over f_old and the slices are then swapped.
    pub(crate) fn step(&self, state: &mut FieldState) {
        let n = state.len();
        let (f_old, f) = state.slices_mut();
        for i in 0..n {
            let left = if i == 0 { n - 1 } else { i - 1 };
            let right = if i + 1 == n { 0 } else { i + 1 };
            let x = f[i];
            f_old[i] = -f_old[i] + self.c1 * x + self.c2 * (f[left] + f[right]) + self.c3 * x * x * x;
        }
        state.swap_slices();
    }

    pub fn frame_space(&self) -> usize {
        self.frame_space
    }
}

/// Frame-by-frame trajectory produced by [`Integrator::frames`].
pub struct Frames {
    integrator: Integrator,
    state: FieldState,
    k: usize,
}

impl Frames {
    /// The most recently produced frame.
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn into_state(self) -> FieldState {
        self.state
    }
}

impl Iterator for Frames {
    type Item = FieldState;

    fn next(&mut self) -> Option<FieldState> {
        for _ in 0..self.k {
            self.integrator.step(&mut self.state);
        }
        Some(self.state.clone())
    }
}

/// Advance a state by one timestep.
pub fn advance_timestep(config: &LatticeConfig, state: FieldState) -> FieldState {
    Integrator::new(config).advance_timestep(state)
}

/// Advance a state by `k` timesteps.
pub fn advance_frame(config: &LatticeConfig, state: FieldState, k: usize) -> FieldState {
    Integrator::new(config).advance_frame(state, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{init_vacuum, LatticeParams};
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    fn small_config(nodes: usize) -> LatticeConfig {
        LatticeConfig::new(LatticeParams { nodes, length: nodes as f64 * 0.2, ..LatticeParams::default() })
            .unwrap()
    }

    #[test]
    fn test_uniform_field_closed_form() {
        let config = small_config(16);
        let integrator = Integrator::new(&config);
        for &c in &[-1.0, -0.3, 0.0, 0.7, 1.4] {
            let state = FieldState::new(DVector::from_element(16, c), DVector::from_element(16, c)).unwrap();
            let next = integrator.advance_timestep(state);
            let expected = -c + (config.c1() + 2.0 * config.c2()) * c + config.c3() * c * c * c;
            for i in 0..16 {
                assert_relative_eq!(next.current()[i], expected, epsilon = 1e-12);
                assert_eq!(next.previous()[i], c);
            }
        }
    }

    #[test]
    fn test_vacuum_is_stationary() {
        let config = LatticeConfig::default();
        let state = advance_frame(&config, init_vacuum(&config), 100);
        for &x in state.current().iter() {
            assert_relative_eq!(x, -1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rolling_update_shifts_slices() {
        let config = small_config(8);
        let f_old: Vec<f64> = (0..8).map(|i| 0.1 * i as f64).collect();
        let f: Vec<f64> = (0..8).map(|i| -0.05 * i as f64).collect();
        let state = FieldState::from_slices(&f_old, &f).unwrap();
        let next = advance_timestep(&config, state);
        assert_eq!(next.previous().as_slice(), f.as_slice());

        // site 0 wraps to site 7 on the left
        let expected = -f_old[0] + config.c1() * f[0] + config.c2() * (f[7] + f[1]) + config.c3() * f[0].powi(3);
        assert_relative_eq!(next.current()[0], expected, epsilon = 1e-14);
        let expected = -f_old[7] + config.c1() * f[7] + config.c2() * (f[6] + f[0]) + config.c3() * f[7].powi(3);
        assert_relative_eq!(next.current()[7], expected, epsilon = 1e-14);
    }

    #[test]
    fn test_frame_equals_repeated_steps() {
        let config = small_config(12);
        let integrator = Integrator::new(&config);
        let f: Vec<f64> = (0..12).map(|i| (i as f64 * 0.5).sin()).collect();
        let start = FieldState::from_slices(&f, &f).unwrap();

        let mut stepped = start.clone();
        for _ in 0..config.frame_space() {
            stepped = integrator.advance_timestep(stepped);
        }
        let framed = integrator.next_frame(start.clone());
        assert_eq!(stepped, framed);

        let third = integrator.frames(start.clone(), 3).nth(2).unwrap();
        assert_eq!(third, integrator.advance_frame(start, 9));
    }

    #[test]
    fn test_zero_steps_is_identity() {
        let config = small_config(4);
        let state = FieldState::from_slices(&[0.1, 0.2, 0.3, 0.4], &[0.5, 0.6, 0.7, 0.8]).unwrap();
        assert_eq!(advance_frame(&config, state.clone(), 0), state);
    }
}
