//! Rust Kinks - thermal kink-antikink pair creation in 1-D φ⁴ theory
//!
//! This crate discretizes the φ⁴ field equation on a periodic lattice,
//! prepares thermal initial states with a Metropolis-Hastings heat bath,
//! evolves them with a leapfrog integrator, and measures kink-antikink
//! pairs and their creation rate along the trajectory.

pub mod error;
pub mod lattice;
pub mod dynamics;
pub mod sampling;
pub mod defects;
pub mod measurement;
pub mod io;

// Re-export commonly used types at crate root
pub use error::{KinkError, Result};
pub use lattice::{init_vacuum, FieldState, LatticeConfig, LatticeParams};
pub use dynamics::{advance_frame, advance_timestep, energy, Energy, EnergyEvaluator, Integrator};
pub use sampling::{heat_bath, spectral_state, HeatBath};
pub use defects::{creation_rates, smooth, zero_crossings, CreationRates, DefectBlock, KinkDetector, Smoother};
pub use measurement::{creation_run, defect_census, energy_profile, pair_census, CreationRun};
pub use io::{read_run_config, RunConfig};
