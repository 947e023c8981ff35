use clap::Parser;
use log::error;

use polaron_dmc::{run_from_config, Config, SimulationResults};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.yml")]
    config: String,

    /// Override the seed of the configuration file
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of production steps
    #[arg(long)]
    nsteps: Option<usize>,

    /// Override the number of thermalization steps
    #[arg(long)]
    nsteps_burn: Option<usize>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> polaron_dmc::Result<()> {
    let mut config = Config::from_file(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(nsteps) = args.nsteps {
        config.settings.nsteps = nsteps;
    }
    if let Some(nsteps_burn) = args.nsteps_burn {
        config.settings.nsteps_burn = nsteps_burn;
    }

    let results = run_from_config(&config)?;
    print_results(&results);
    Ok(())
}

fn print_results(results: &SimulationResults) {
    let p = &results.params;
    println!("Diagrammatic Monte Carlo Results for the Holstein Polaron");
    println!("---------------------------------------------------------");
    println!("g = {}, omega = {}, time = {}", p.g, p.omega, p.time);
    println!("Thermalization steps: {}", results.nsteps_burn);
    println!("MonteCarlo steps: {}", results.nsteps);
    println!("Ground state energy: {:.6} ± {:.6}", results.mean_energy, results.energy_error);
    println!("Autocorrelation time: {:.2} steps", results.autocorrelation_time);
    println!("Mean phonon number: {:.4}", results.mean_phonons);
    println!("  DiagMC:      N/(omega time) = {:.4}", results.mean_phonons_normalized);
    println!("  Poisson fit: N/(omega time) = {:.4}", results.fit_phonons_normalized());
    println!("  Theory:      g^2/omega^2    = {:.4}", results.theory_phonons);
}
