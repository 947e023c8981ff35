//! Polaron DMC - Diagrammatic Monte Carlo for the Holstein polaron
//!
//! This crate samples the Feynman diagrams of a single electron coupled to
//! dispersionless phonons and estimates the ground-state energy and the
//! phonon-number distribution of the polaron.

pub mod diagram;
pub mod sampling;
pub mod analysis;
pub mod io;
pub mod error;
pub mod simulation;

// Re-export commonly used types at crate root
pub use diagram::{DiagramParams, PhononLine, Polaron, UpdateStats};
pub use sampling::{dmc_step, make_rng, run_diagrammatic_montecarlo, run_thermalization_steps, DiagramWalker, UpdateKind};
pub use analysis::{PhononHistogram, PoissonFit, SimulationResults};
pub use io::{write_histogram, write_summary, Config, OutputPaths, Settings};
pub use error::{Error, Result};
pub use simulation::{run_from_config, run_simulation};
