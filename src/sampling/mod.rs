//! Sampling module - Markov chain driver for diagrammatic Monte Carlo.

mod traits;
mod dmc;

pub use traits::DiagramWalker;
pub use dmc::{dmc_step, make_rng, run_diagrammatic_montecarlo, run_thermalization_steps, UpdateKind};
