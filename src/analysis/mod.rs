//! Analysis module - estimators computed from the recorded sequences.

mod histogram;
mod results;
mod statistics;

pub use histogram::{mean_phonons, phonon_numbers, poisson_pmf, PhononHistogram, PoissonFit};
pub use results::SimulationResults;
pub use statistics::{autocorrelation_time, blocking_error, mean};
