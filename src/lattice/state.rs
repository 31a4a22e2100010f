//! Two-time-slice field state on a periodic 1-D lattice.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{KinkError, Result};
use super::config::LatticeConfig;

/// Index `i + offset` wrapped onto a ring of `n` sites.
#[inline]
pub fn cyclic(i: usize, offset: isize, n: usize) -> usize {
    (i as isize + offset).rem_euclid(n as isize) as usize
}

/// The field at two consecutive timesteps, `(f_old, f)`.
///
/// The equation of motion is second order in time, so both slices are
/// needed to produce the next one. Both slices always have the same length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    f_old: DVector<f64>,
    f: DVector<f64>,
}

impl FieldState {
    pub fn new(f_old: DVector<f64>, f: DVector<f64>) -> Result<Self> {
        if f_old.len() != f.len() {
            return Err(KinkError::LatticeMismatch {
                expected: f_old.len(),
                found: f.len(),
            });
        }
        if f.is_empty() {
            return Err(KinkError::InvalidConfig("field state needs at least one site".into()));
        }
        Ok(Self { f_old, f })
    }

    pub fn from_slices(f_old: &[f64], f: &[f64]) -> Result<Self> {
        Self::new(DVector::from_column_slice(f_old), DVector::from_column_slice(f))
    }

    /// Caller guarantees both slices have the same non-zero length.
    pub(crate) fn from_parts(f_old: DVector<f64>, f: DVector<f64>) -> Self {
        debug_assert_eq!(f_old.len(), f.len());
        Self { f_old, f }
    }

    /// Uniform `-1` vacuum on `n` sites, at rest.
    pub fn vacuum(n: usize) -> Self {
        Self {
            f_old: DVector::from_element(n, -1.0),
            f: DVector::from_element(n, -1.0),
        }
    }

    /// Number of lattice sites.
    #[inline]
    pub fn len(&self) -> usize {
        self.f.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.f.is_empty()
    }

    /// Field at the previous timestep.
    pub fn previous(&self) -> &DVector<f64> {
        &self.f_old
    }

    /// Field at the current timestep.
    pub fn current(&self) -> &DVector<f64> {
        &self.f
    }

    pub(crate) fn current_mut(&mut self) -> &mut DVector<f64> {
        &mut self.f
    }

    pub(crate) fn slices_mut(&mut self) -> (&mut DVector<f64>, &mut DVector<f64>) {
        (&mut self.f_old, &mut self.f)
    }

    pub(crate) fn swap_slices(&mut self) {
        std::mem::swap(&mut self.f_old, &mut self.f);
    }

    pub fn into_parts(self) -> (DVector<f64>, DVector<f64>) {
        (self.f_old, self.f)
    }
}

/// Uniform vacuum sized for `config`.
pub fn init_vacuum(config: &LatticeConfig) -> FieldState {
    FieldState::vacuum(config.nodes())
}
