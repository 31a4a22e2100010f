//! IO module - run configuration and state snapshots.

mod config;

pub use config::{read_run_config, read_state, write_state, MeasurementParams, RunConfig, ThermalizationParams};
