//! Traits for diagrammatic Monte Carlo sampling.

use rand::Rng;

use crate::diagram::Polaron;

/// Behaviour the sampling driver needs from a diagram walker.
pub trait DiagramWalker {
    /// Current diagram order
    fn order(&self) -> usize;
    /// Attempt to add one phonon line, returns whether it was accepted
    fn eval_add_internal<R: Rng>(&mut self, rng: &mut R) -> bool;
    /// Attempt to remove one phonon line, only valid at order > 0
    fn eval_remove_internal<R: Rng>(&mut self, rng: &mut R) -> bool;
    /// Refresh the energy estimator of the current diagram
    fn eval_diagram_energy(&mut self);
    /// Record order and energy of the current diagram
    fn update_diagrams_info(&mut self);
    fn order_sequence(&self) -> &[usize];
    fn energy_sequence(&self) -> &[f64];
}

impl DiagramWalker for Polaron {
    fn order(&self) -> usize {
        Polaron::order(self)
    }

    fn eval_add_internal<R: Rng>(&mut self, rng: &mut R) -> bool {
        Polaron::eval_add_internal(self, rng)
    }

    fn eval_remove_internal<R: Rng>(&mut self, rng: &mut R) -> bool {
        Polaron::eval_remove_internal(self, rng)
    }

    fn eval_diagram_energy(&mut self) {
        Polaron::eval_diagram_energy(self)
    }

    fn update_diagrams_info(&mut self) {
        Polaron::update_diagrams_info(self)
    }

    fn order_sequence(&self) -> &[usize] {
        Polaron::order_sequence(self)
    }

    fn energy_sequence(&self) -> &[f64] {
        Polaron::energy_sequence(self)
    }
}
