//! Defects module - kink-antikink detection and pair-creation statistics.

mod detector;
mod smoothing;

pub use detector::{blocks, state_zero_crossings, zero_crossings, DefectBlock, KinkDetector};
pub use smoothing::{creation_rates, smooth, CreationRates, Smoother};
