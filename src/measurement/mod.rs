//! Measurement module - thermal averages of energy and defect observables
//! along a trajectory prepared by the heat bath.

mod runs;

pub use runs::{
    creation_run, cumulative_pairs, defect_census, energy_profile, pair_census, CreationRun, CumulativeCount,
    DefectCensus, EnergyProfile, PairCensus,
};
