//! Observables of a finished run.

use super::histogram::{mean_phonons, phonon_numbers, PhononHistogram, PoissonFit};
use super::statistics::{autocorrelation_time, blocking_error, mean};
use crate::diagram::DiagramParams;
use crate::error::{Error, Result};

/// Ground-state energy and phonon statistics of one simulation.
#[derive(Clone, Debug)]
pub struct SimulationResults {
    pub params: DiagramParams,
    pub nsteps_burn: usize,
    pub nsteps: usize,
    /// Mean number of phonons in the sampled diagrams
    pub mean_phonons: f64,
    /// `mean_phonons / (ω τ)`, comparable with `g²/ω²`
    pub mean_phonons_normalized: f64,
    /// Weak-coupling prediction `g²/ω²`
    pub theory_phonons: f64,
    pub mean_energy: f64,
    pub energy_error: f64,
    pub autocorrelation_time: f64,
    pub histogram: PhononHistogram,
    pub fit: PoissonFit,
}

impl SimulationResults {
    pub fn from_sequences(
        params: DiagramParams,
        nsteps_burn: usize,
        order_sequence: &[usize],
        energy_sequence: &[f64],
    ) -> Result<Self> {
        if order_sequence.is_empty() || energy_sequence.is_empty() {
            return Err(Error::EmptySample);
        }

        let mean_phonons = mean_phonons(order_sequence);
        let histogram = PhononHistogram::from_counts(&phonon_numbers(order_sequence));
        let fit = PoissonFit::fit(&histogram);
        let tau = autocorrelation_time(energy_sequence);

        Ok(Self {
            params,
            nsteps_burn,
            nsteps: order_sequence.len(),
            mean_phonons,
            mean_phonons_normalized: mean_phonons / (params.omega * params.time),
            theory_phonons: (params.g / params.omega).powi(2),
            mean_energy: mean(energy_sequence),
            energy_error: blocking_error(energy_sequence, tau),
            autocorrelation_time: tau,
            histogram,
            fit,
        })
    }

    /// Fitted Poisson mean in units of `ω τ`.
    pub fn fit_phonons_normalized(&self) -> f64 {
        self.fit.lambda / (self.params.omega * self.params.time)
    }
}
