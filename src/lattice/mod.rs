//! Lattice module - configuration and field state of the periodic 1-D lattice.

mod config;
mod state;

pub use config::{LatticeConfig, LatticeParams};
pub use state::{cyclic, init_vacuum, FieldState};
