//! Lattice parameters and the immutable configuration derived from them.

use serde::{Deserialize, Serialize};

use crate::error::{KinkError, Result};
use super::state::FieldState;

/// Raw simulation parameters, as read from a run file.
///
/// Every field has a default, so a YAML file only needs to name the values
/// it changes:
///
/// ```yaml
/// length: 100.0
/// nodes: 512
/// lambda: 0.5
/// frame_space: 10
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeParams {
    /// Domain length L
    pub length: f64,
    /// Number of lattice sites N
    pub nodes: usize,
    /// Potential coefficient λ
    pub lambda: f64,
    /// Timestep; `None` means dx / 4
    pub dt: Option<f64>,
    /// Timesteps per sampled frame
    pub frame_space: usize,
    /// Minimum kink width (sites)
    pub w_kink: usize,
    /// Minimum kink height
    pub h_kink: f64,
    /// Minimum kink duration (timesteps)
    pub d_kink: usize,
}

impl Default for LatticeParams {
    fn default() -> Self {
        Self {
            length: 100.0,
            nodes: 512,
            lambda: 0.5,
            dt: None,
            frame_space: 10,
            w_kink: 20,
            h_kink: 0.5,
            d_kink: 50,
        }
    }
}

/// Validated lattice configuration with the integrator coefficients and the
/// frame-based defect thresholds precomputed.
///
/// Built once per run and passed by reference to every component.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeConfig {
    length: f64,
    nodes: usize,
    lambda: f64,
    dx: f64,
    dt: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    frame_space: usize,
    w_kink: usize,
    h_kink: f64,
    d_kink: usize,
    d_kink_frame: usize,
    buff_frame: usize,
}

impl LatticeConfig {
    pub fn new(params: LatticeParams) -> Result<Self> {
        if params.nodes == 0 {
            return Err(KinkError::InvalidConfig("lattice needs at least one node".into()));
        }
        if !(params.length.is_finite() && params.length > 0.0) {
            return Err(KinkError::InvalidConfig(format!(
                "domain length must be positive, got {}",
                params.length
            )));
        }
        if !(params.lambda.is_finite() && params.lambda >= 0.0) {
            return Err(KinkError::InvalidConfig(format!(
                "lambda must be non-negative, got {}",
                params.lambda
            )));
        }

        let dx = params.length / params.nodes as f64;
        let dt = params.dt.unwrap_or(dx / 4.0);
        if !(dx.is_finite() && dx > 0.0) {
            return Err(KinkError::InvalidConfig(format!("dx must be positive, got {}", dx)));
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(KinkError::InvalidConfig(format!("dt must be positive, got {}", dt)));
        }
        if params.frame_space == 0 {
            return Err(KinkError::InvalidConfig("frame_space must be at least one timestep".into()));
        }
        if params.w_kink == 0 {
            return Err(KinkError::InvalidConfig("w_kink must be at least one site".into()));
        }
        if !(params.h_kink.is_finite() && params.h_kink >= 0.0) {
            return Err(KinkError::InvalidConfig(format!(
                "h_kink must be non-negative, got {}",
                params.h_kink
            )));
        }

        Ok(Self::derive(params, dx, dt))
    }

    fn derive(params: LatticeParams, dx: f64, dt: f64) -> Self {
        let c2 = dt * dt / (dx * dx);
        let c3 = -params.lambda * dt * dt;
        let c1 = 2.0 - 2.0 * c2 - c3;

        let d_kink_frame = params.d_kink / params.frame_space;
        let buff_frame = d_kink_frame * d_kink_frame.saturating_sub(1) / 2;

        Self {
            length: params.length,
            nodes: params.nodes,
            lambda: params.lambda,
            dx,
            dt,
            c1,
            c2,
            c3,
            frame_space: params.frame_space,
            w_kink: params.w_kink,
            h_kink: params.h_kink,
            d_kink: params.d_kink,
            d_kink_frame,
            buff_frame,
        }
    }

    /// Checks that a caller-supplied state lives on this lattice.
    pub fn check_state(&self, state: &FieldState) -> Result<()> {
        if state.len() != self.nodes {
            return Err(KinkError::LatticeMismatch {
                expected: self.nodes,
                found: state.len(),
            });
        }
        Ok(())
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// C1 = 2 - 2·C2 - C3
    pub fn c1(&self) -> f64 {
        self.c1
    }

    /// C2 = dt² / dx²
    pub fn c2(&self) -> f64 {
        self.c2
    }

    /// C3 = -λ·dt²
    pub fn c3(&self) -> f64 {
        self.c3
    }

    pub fn frame_space(&self) -> usize {
        self.frame_space
    }

    pub fn w_kink(&self) -> usize {
        self.w_kink
    }

    pub fn h_kink(&self) -> f64 {
        self.h_kink
    }

    pub fn d_kink(&self) -> usize {
        self.d_kink
    }

    /// Minimum kink duration in frames.
    pub fn d_kink_frame(&self) -> usize {
        self.d_kink_frame
    }

    /// Extra frames a pair-count series needs beyond `tmax_frame` so that
    /// every smoothing pass can look ahead.
    pub fn buff_frame(&self) -> usize {
        self.buff_frame
    }

    /// Proper time covered by one frame.
    pub fn frame_time(&self) -> f64 {
        self.frame_space as f64 * self.dt
    }
}

impl Default for LatticeConfig {
    fn default() -> Self {
        let params = LatticeParams::default();
        let dx = params.length / params.nodes as f64;
        Self::derive(params, dx, dx / 4.0)
    }
}
