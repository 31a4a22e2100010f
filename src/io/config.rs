//! YAML run files and field-state snapshots.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;
use crate::lattice::{FieldState, LatticeConfig, LatticeParams};

/// Heat-bath settings of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalizationParams {
    pub temperature: f64,
    pub iter_max: usize,
    pub sigma_factor: f64,
    /// Seed for the random stream; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for ThermalizationParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            iter_max: 100,
            sigma_factor: 0.05,
            seed: None,
        }
    }
}

/// Length of the measured trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementParams {
    pub tmax_frame: usize,
    /// Number of energy evaluations spread over the run
    pub e_tests: usize,
}

impl Default for MeasurementParams {
    fn default() -> Self {
        Self {
            tmax_frame: 100_000,
            e_tests: 1000,
        }
    }
}

/// Complete run file.
///
/// ```yaml
/// lattice:
///   nodes: 512
///   lambda: 0.5
/// thermalization:
///   temperature: 0.8
///   seed: 42
/// measurement:
///   tmax_frame: 10000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub lattice: LatticeParams,
    pub thermalization: ThermalizationParams,
    pub measurement: MeasurementParams,
}

impl RunConfig {
    pub fn lattice_config(&self) -> Result<LatticeConfig> {
        LatticeConfig::new(self.lattice)
    }
}

pub fn read_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_yaml::from_reader(reader)?)
}

/// Write a field state as YAML.
pub fn write_state<P: AsRef<Path>>(path: P, state: &FieldState) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(writer, state)?;
    Ok(())
}

/// Read a field state written by [`write_state`] and check it fits `config`.
pub fn read_state<P: AsRef<Path>>(path: P, config: &LatticeConfig) -> Result<FieldState> {
    let reader = BufReader::new(File::open(path)?);
    let raw: FieldState = serde_yaml::from_reader(reader)?;
    let (f_old, f) = raw.into_parts();
    let state = FieldState::new(f_old, f)?;
    config.check_state(&state)?;
    Ok(state)
}
