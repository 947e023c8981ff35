//! Diagrammatic Monte Carlo driver.
//!
//! Every step draws, in this order:
//! 1. the add/remove choice, skipped at order 0 where only add is possible;
//! 2. the draws of the chosen update (`t_gen`, `t_rem` then the optional
//!    acceptance sample for add; the line index then the optional
//!    acceptance sample for remove).
//!
//! A fixed seed therefore fixes the whole trajectory.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::traits::DiagramWalker;

/// Update attempted in a single step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpdateKind {
    Add,
    Remove,
}

/// Seeded generator when `seed` is given, OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!("Seeding random number generator with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => {
            info!("Seed not provided: the random number generator is seeded from entropy");
            StdRng::from_entropy()
        }
    }
}

/// One Markov-chain step: pick an update and try it.
///
/// Returns the attempted update and whether it was accepted.
pub fn dmc_step<W: DiagramWalker, R: Rng>(walker: &mut W, rng: &mut R) -> (UpdateKind, bool) {
    if walker.order() == 0 {
        return (UpdateKind::Add, walker.eval_add_internal(rng));
    }
    if rng.gen_bool(0.5) {
        (UpdateKind::Add, walker.eval_add_internal(rng))
    } else {
        (UpdateKind::Remove, walker.eval_remove_internal(rng))
    }
}

fn report_interval(nsteps: usize) -> usize {
    (nsteps / 10).max(1)
}

/// Run `nsteps_burn` unrecorded steps to bring the chain to equilibrium.
pub fn run_thermalization_steps<'a, W: DiagramWalker, R: Rng>(
    walker: &'a mut W,
    nsteps_burn: usize,
    rng: &mut R,
) -> &'a mut W {
    if nsteps_burn == 0 {
        return walker;
    }
    info!("Starting thermalization of Markov chain ({} steps)", nsteps_burn);
    let interval = report_interval(nsteps_burn);
    let mut accepted = 0usize;
    for step in 0..nsteps_burn {
        if dmc_step(walker, rng).1 {
            accepted += 1;
        }
        if (step + 1) % interval == 0 {
            debug!(
                "  Step {:8}: order = {:4}, accepted = {:.2}%",
                step + 1,
                walker.order(),
                100.0 * accepted as f64 / (step + 1) as f64
            );
        }
    }
    info!(
        "Thermalization ended: diagram order = {}, acceptance = {:.2}%",
        walker.order(),
        100.0 * accepted as f64 / nsteps_burn as f64
    );
    walker
}

/// Run `nsteps` production steps, recording order and energy after each one.
///
/// Returns the orders and energies recorded by this call, `nsteps` entries
/// each, whatever the walker had already recorded. The walker keeps the full
/// history.
pub fn run_diagrammatic_montecarlo<'a, W: DiagramWalker, R: Rng>(
    walker: &'a mut W,
    nsteps: usize,
    rng: &mut R,
) -> (&'a [usize], &'a [f64]) {
    info!("Starting MonteCarlo simulation of {} steps", nsteps);
    let start = walker.order_sequence().len();
    let interval = report_interval(nsteps);
    for step in 0..nsteps {
        dmc_step(walker, rng);
        walker.eval_diagram_energy();
        walker.update_diagrams_info();

        if (step + 1) % interval == 0 {
            let energies = &walker.energy_sequence()[start..];
            let running = energies.iter().sum::<f64>() / energies.len() as f64;
            info!(
                "  Step {:8}: order = {:4}, <E> = {:10.6}",
                step + 1,
                walker.order(),
                running
            );
        }
    }
    info!("Simulation ended");
    (&walker.order_sequence()[start..], &walker.energy_sequence()[start..])
}
