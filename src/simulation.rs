//! Full run: thermalization, production and analysis of one walker.

use log::info;

use crate::analysis::SimulationResults;
use crate::diagram::Polaron;
use crate::error::Result;
use crate::io::{write_histogram, write_summary, Config, Settings};
use crate::sampling::{make_rng, run_diagrammatic_montecarlo, run_thermalization_steps};

/// Validate `settings`, sample the chain and compute its observables.
pub fn run_simulation(settings: &Settings, seed: Option<u64>) -> Result<SimulationResults> {
    settings.check_positive_parameters()?;

    let params = settings.diagram_params();
    let mut polaron = Polaron::from_params(params);
    let mut rng = make_rng(seed);

    run_thermalization_steps(&mut polaron, settings.nsteps_burn, &mut rng);
    let burn_stats = *polaron.stats();
    info!(
        "Thermalization acceptance: add = {:.2}%, remove = {:.2}%",
        100.0 * burn_stats.add_acceptance_rate(),
        100.0 * burn_stats.remove_acceptance_rate()
    );
    polaron.reset_sequences();

    let (orders, energies) = run_diagrammatic_montecarlo(&mut polaron, settings.nsteps, &mut rng);
    let results = SimulationResults::from_sequences(params, settings.nsteps_burn, orders, energies)?;

    let stats = polaron.stats();
    info!(
        "Production acceptance: add = {:.2}% of {}, remove = {:.2}% of {}",
        100.0 * stats.add_acceptance_rate(),
        stats.add_proposed,
        100.0 * stats.remove_acceptance_rate(),
        stats.remove_proposed
    );
    Ok(results)
}

/// Run the simulation described by `config` and write its reports.
///
/// Output folders are created only once the parameters have been accepted.
pub fn run_from_config(config: &Config) -> Result<SimulationResults> {
    let results = run_simulation(&config.settings, config.seed)?;

    config.output.ensure_storage_directories_exist()?;
    write_summary(&config.output.summary, &results, config.output.append)?;
    write_histogram(&config.output.histogram, &results)?;
    Ok(results)
}
