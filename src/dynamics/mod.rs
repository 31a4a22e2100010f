//! Dynamics module - deterministic time evolution and the energy functional.

mod energy;
mod integrator;

pub use energy::{energy, Energy, EnergyEvaluator};
pub use integrator::{advance_frame, advance_timestep, Frames, Integrator};
