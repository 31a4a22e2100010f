//! Sampling module - stochastic preparation of initial field states.

mod heat_bath;
mod spectral;

pub use heat_bath::{heat_bath, HeatBath};
pub use spectral::spectral_state;
