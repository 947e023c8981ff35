//! Diagram state of the Holstein polaron and its Metropolis-Hastings updates.
//!
//! A diagram of order `n` carries `n/2` phonon lines on the electron's
//! imaginary-time axis. The two updates are
//!
//! * **add**: generate a new line with `t_gen ~ U[0,1)`, `t_rem ~ U[t_gen,1)`;
//! * **remove**: pick one of the existing lines uniformly and delete it.
//!
//! Their acceptance ratios are built from the weight ratio of the two
//! diagrams and the ratio of proposal probabilities of the reverse and
//! direct moves. At order 0 only the add move exists, which gives the
//! factor 1/2 in [`Polaron::proposal_add_ratio`] and the matching factor 2
//! in [`Polaron::proposal_remove_ratio`] at order 2.
//!
//! Reference: Prokof'ev, Svistunov (1998) "Polaron problem by diagrammatic
//! quantum Monte Carlo", PRL 81, 2514

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::phonon::PhononLine;

/// Physical parameters of a run. Fixed once the walker is built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DiagramParams {
    /// Phonon frequency ω
    pub omega: f64,
    /// Electron-phonon coupling g
    pub g: f64,
    /// Imaginary-time extent τ of the electron propagator
    pub time: f64,
}

/// Proposal and acceptance counters for the two updates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
    pub add_proposed: usize,
    pub add_accepted: usize,
    pub remove_proposed: usize,
    pub remove_accepted: usize,
}

impl UpdateStats {
    pub fn add_acceptance_rate(&self) -> f64 {
        rate(self.add_accepted, self.add_proposed)
    }

    pub fn remove_acceptance_rate(&self) -> f64 {
        rate(self.remove_accepted, self.remove_proposed)
    }
}

fn rate(accepted: usize, proposed: usize) -> f64 {
    if proposed == 0 {
        0.0
    } else {
        accepted as f64 / proposed as f64
    }
}

/// Single walker of the diagrammatic Monte Carlo chain.
///
/// Owns the current diagram together with the order and energy sequences
/// recorded during production.
#[derive(Clone, Debug)]
pub struct Polaron {
    params: DiagramParams,
    order: usize,
    total_energy: f64,
    phonon_lines: Vec<PhononLine>,
    order_sequence: Vec<usize>,
    energy_sequence: Vec<f64>,
    stats: UpdateStats,
}

impl Polaron {
    /// Create a bare electron (order 0) with the given parameters.
    ///
    /// # Arguments
    /// * `omega` - Phonon frequency
    /// * `g` - Electron-phonon coupling
    /// * `time` - Lifetime τ of the electron in imaginary time
    pub fn new(omega: f64, g: f64, time: f64) -> Self {
        Self::from_params(DiagramParams { omega, g, time })
    }

    pub fn from_params(params: DiagramParams) -> Self {
        Self {
            params,
            order: 0,
            total_energy: 0.0,
            phonon_lines: Vec::new(),
            order_sequence: Vec::new(),
            energy_sequence: Vec::new(),
            stats: UpdateStats::default(),
        }
    }

    pub fn params(&self) -> &DiagramParams {
        &self.params
    }

    /// Diagram order, always `2 * phonon_lines().len()`.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Energy of the current diagram as of the last [`Polaron::eval_diagram_energy`].
    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    pub fn phonon_lines(&self) -> &[PhononLine] {
        &self.phonon_lines
    }

    pub fn order_sequence(&self) -> &[usize] {
        &self.order_sequence
    }

    pub fn energy_sequence(&self) -> &[f64] {
        &self.energy_sequence
    }

    pub fn stats(&self) -> &UpdateStats {
        &self.stats
    }

    /// Consume the walker and hand over the recorded sequences.
    pub fn into_sequences(self) -> (Vec<usize>, Vec<f64>) {
        (self.order_sequence, self.energy_sequence)
    }

    /// Drop the recorded sequences and counters but keep the diagram.
    pub fn reset_sequences(&mut self) {
        self.order_sequence.clear();
        self.energy_sequence.clear();
        self.stats = UpdateStats::default();
    }

    /// Metropolis choice `min(1, ratio)`.
    #[inline]
    pub fn metropolis(ratio: f64) -> f64 {
        ratio.min(1.0)
    }

    /// `(g τ)^2`: the vertex factor of one phonon line once times are scaled by τ.
    pub fn add_phonon_scaling(&self) -> f64 {
        (self.params.g * self.params.time).powi(2)
    }

    /// Weight of the diagram with `line` added over the current one.
    pub fn weight_ratio_add(&self, line: &PhononLine) -> f64 {
        let propagator = (-self.params.time * self.params.omega * line.duration()).exp();
        self.add_phonon_scaling() * propagator
    }

    /// Proposal probability of removing `line` again over that of generating it.
    ///
    /// Generating `t_rem` uniformly on `[t_gen, 1]` has density `1/(1 - t_gen)`
    /// and the reverse move picks one of `N + 1` lines.
    pub fn proposal_add_ratio(&self, line: &PhononLine) -> f64 {
        let n_after = (self.phonon_lines.len() + 1) as f64;
        if self.order == 0 {
            // add is the only move at order 0, remove competes with add at order 2
            0.5 * (1.0 - line.t_gen) / n_after
        } else {
            (1.0 - line.t_gen) / n_after
        }
    }

    pub fn add_internal(&mut self, line: PhononLine) {
        self.phonon_lines.push(line);
        self.order += 2;
    }

    /// Propose a new phonon line and accept it with Metropolis-Hastings.
    ///
    /// Draws `t_gen`, `t_rem` and, unless the acceptance is exactly 1, one
    /// more uniform for the accept/reject test. Returns whether the line
    /// was added.
    pub fn eval_add_internal<R: Rng>(&mut self, rng: &mut R) -> bool {
        let t_gen = Uniform::new(0.0, 1.0).sample(rng);
        let t_rem = Uniform::new(t_gen, 1.0).sample(rng);
        let line = PhononLine::new(t_gen, t_rem);

        let ratio = self.weight_ratio_add(&line) * self.proposal_add_ratio(&line);
        let acceptance = Self::metropolis(ratio);

        self.stats.add_proposed += 1;
        let accepted = accept(acceptance, rng);
        if accepted {
            self.add_internal(line);
            self.stats.add_accepted += 1;
        }
        accepted
    }

    /// Uniformly pick the index of one of the current lines.
    ///
    /// # Panics
    /// If the diagram has no phonon lines.
    pub fn choose_phonon<R: Rng>(&self, rng: &mut R) -> usize {
        assert!(
            !self.phonon_lines.is_empty(),
            "cannot choose a phonon line in an order-0 diagram"
        );
        rng.gen_range(0..self.phonon_lines.len())
    }

    /// Weight of the diagram with `line` removed over the current one.
    pub fn weight_ratio_remove(&self, line: &PhononLine) -> f64 {
        let inverse_propagator = (self.params.time * self.params.omega * line.duration()).exp();
        inverse_propagator / self.add_phonon_scaling()
    }

    /// Proposal probability of adding `line` back over that of removing it.
    pub fn proposal_remove_ratio(&self, line: &PhononLine) -> f64 {
        let n = self.phonon_lines.len() as f64;
        if self.order == 2 {
            // reverse add from order 0 is certain, this remove competed with add
            2.0 * n / (1.0 - line.t_gen)
        } else {
            n / (1.0 - line.t_gen)
        }
    }

    /// Delete the line at `index`, keeping the relative order of the others.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn remove_internal(&mut self, index: usize) {
        self.phonon_lines.remove(index);
        self.order -= 2;
    }

    /// Pick a line and remove it with Metropolis-Hastings.
    ///
    /// # Panics
    /// If called on an order-0 diagram.
    pub fn eval_remove_internal<R: Rng>(&mut self, rng: &mut R) -> bool {
        assert!(self.order > 0, "remove update attempted at order 0");
        let index = self.choose_phonon(rng);
        let line = self.phonon_lines[index];

        let ratio = self.weight_ratio_remove(&line) * self.proposal_remove_ratio(&line);
        let acceptance = Self::metropolis(ratio);

        self.stats.remove_proposed += 1;
        let accepted = accept(acceptance, rng);
        if accepted {
            self.remove_internal(index);
            self.stats.remove_accepted += 1;
        }
        accepted
    }

    /// Energy estimator for the current diagram:
    /// `E = ω Σ (t_rem - t_gen) - n/τ`, and 0 for the bare electron.
    pub fn eval_diagram_energy(&mut self) {
        if self.order == 0 {
            self.total_energy = 0.0;
            return;
        }
        let gen_sum: f64 = self.phonon_lines.iter().map(|l| l.t_gen).sum();
        let rem_sum: f64 = self.phonon_lines.iter().map(|l| l.t_rem).sum();
        self.total_energy =
            self.params.omega * (rem_sum - gen_sum) - self.order as f64 / self.params.time;
    }

    /// Record the current order and energy.
    pub fn update_diagrams_info(&mut self) {
        self.order_sequence.push(self.order);
        self.energy_sequence.push(self.total_energy);
    }
}

/// Accept with probability `acceptance`. No draw is made when it is exactly 1;
/// a sample equal to `acceptance` is accepted.
fn accept<R: Rng>(acceptance: f64, rng: &mut R) -> bool {
    if acceptance == 1.0 {
        return true;
    }
    let sample: f64 = Uniform::new(0.0, 1.0).sample(rng);
    sample <= acceptance
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Seeded generator that counts every 32/64-bit draw.
    pub(crate) struct CountingRng {
        inner: StdRng,
        pub draws: usize,
    }

    impl CountingRng {
        pub(crate) fn new(seed: u64) -> Self {
            Self { inner: StdRng::seed_from_u64(seed), draws: 0 }
        }
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.draws += 1;
            self.inner.try_fill_bytes(dest)
        }
    }

    fn polaron() -> Polaron {
        Polaron::new(1.0, 0.5, 10.0)
    }

    fn polaron_order_two() -> Polaron {
        let mut p = polaron();
        p.add_internal(PhononLine::new(0.2, 0.5));
        p
    }

    fn assert_consistent(p: &Polaron) {
        assert_eq!(p.order(), 2 * p.phonon_lines().len());
        assert_eq!(p.order() % 2, 0);
    }

    #[test]
    fn test_new_polaron_is_bare() {
        let p = polaron();
        assert_eq!(p.order(), 0);
        assert!(p.phonon_lines().is_empty());
        assert!(p.order_sequence().is_empty());
        assert!(p.energy_sequence().is_empty());
        assert_relative_eq!(p.total_energy(), 0.0);
    }

    #[test]
    fn test_metropolis() {
        assert_relative_eq!(Polaron::metropolis(0.7), 0.7);
        assert_relative_eq!(Polaron::metropolis(1.2), 1.0);
        assert_relative_eq!(Polaron::metropolis(1.0), 1.0);
        assert_relative_eq!(Polaron::metropolis(0.0), 0.0);
    }

    #[test]
    fn test_add_phonon_scaling() {
        assert_relative_eq!(polaron().add_phonon_scaling(), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_weight_ratio_add() {
        let line = PhononLine::new(0.2, 0.5);
        let expected = 25.0 * (-3.0f64).exp();
        assert_relative_eq!(polaron().weight_ratio_add(&line), expected, epsilon = 1e-12);
        assert_relative_eq!(polaron().weight_ratio_add(&line), 1.2446767, epsilon = 1e-7);
    }

    #[test]
    fn test_weight_ratio_remove() {
        let p = polaron_order_two();
        let line = p.phonon_lines()[0];
        let expected = 3.0f64.exp() / 25.0;
        assert_relative_eq!(p.weight_ratio_remove(&line), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_proposal_add_ratio() {
        let line = PhononLine::new(0.2, 0.5);
        assert_relative_eq!(polaron().proposal_add_ratio(&line), 0.4, epsilon = 1e-12);

        let another = PhononLine::new(0.6, 0.7);
        assert_relative_eq!(polaron().proposal_add_ratio(&another), 0.5 * 0.4, epsilon = 1e-12);
        assert_relative_eq!(
            polaron_order_two().proposal_add_ratio(&another),
            0.4 / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_proposal_remove_ratio() {
        let line = PhononLine::new(0.2, 0.5);
        let p = polaron_order_two();
        assert_relative_eq!(p.proposal_remove_ratio(&line), 2.0 * 1.0 / 0.8, epsilon = 1e-12);

        let mut p4 = polaron_order_two();
        p4.add_internal(PhononLine::new(0.6, 0.7));
        assert_relative_eq!(p4.proposal_remove_ratio(&line), 2.0 / 0.8, epsilon = 1e-12);
    }

    /// The add ratio at order n and the remove ratio of the same line at
    /// order n + 2 must multiply to one, for weights and proposals alike.
    #[test]
    fn test_add_remove_detailed_balance() {
        let lines = [
            PhononLine::new(0.2, 0.5),
            PhononLine::new(0.6, 0.7),
            PhononLine::new(0.05, 0.95),
        ];
        let candidate = PhononLine::new(0.3, 0.4);

        let mut p = polaron();
        for line in lines.iter() {
            let weight_add = p.weight_ratio_add(&candidate);
            let proposal_add = p.proposal_add_ratio(&candidate);

            let mut after = p.clone();
            after.add_internal(candidate);
            let weight_remove = after.weight_ratio_remove(&candidate);
            let proposal_remove = after.proposal_remove_ratio(&candidate);

            assert_relative_eq!(weight_add * weight_remove, 1.0, epsilon = 1e-12);
            assert_relative_eq!(proposal_add * proposal_remove, 1.0, epsilon = 1e-12);

            p.add_internal(*line);
        }
    }

    #[test]
    fn test_add_internal() {
        for mut p in [polaron(), polaron_order_two()] {
            let before = p.phonon_lines().to_vec();
            let order = p.order();
            let another = PhononLine::new(0.6, 0.7);

            p.add_internal(another);

            assert_eq!(p.order(), order + 2);
            assert_eq!(p.phonon_lines().len(), before.len() + 1);
            assert_eq!(&p.phonon_lines()[..before.len()], &before[..]);
            assert_eq!(p.phonon_lines().last(), Some(&another));
            assert_consistent(&p);
        }
    }

    #[test]
    fn test_remove_internal_preserves_order() {
        let mut p = polaron();
        let a = PhononLine::new(0.1, 0.2);
        let b = PhononLine::new(0.3, 0.4);
        let c = PhononLine::new(0.5, 0.6);
        p.add_internal(a);
        p.add_internal(b);
        p.add_internal(c);

        p.remove_internal(1);

        assert_eq!(p.order(), 4);
        assert_eq!(p.phonon_lines(), &[a, c]);
        assert_consistent(&p);
    }

    #[test]
    #[should_panic]
    fn test_remove_internal_out_of_range() {
        let mut p = polaron_order_two();
        p.remove_internal(1);
    }

    #[test]
    fn test_choose_phonon_in_range() {
        let mut p = polaron();
        for i in 0..5 {
            p.add_internal(PhononLine::new(0.1 * i as f64, 0.1 * i as f64 + 0.05));
        }
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(p.choose_phonon(&mut rng) < 5);
        }
    }

    #[test]
    #[should_panic(expected = "order-0")]
    fn test_choose_phonon_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        polaron().choose_phonon(&mut rng);
    }

    #[test]
    #[should_panic(expected = "remove update attempted at order 0")]
    fn test_eval_remove_internal_at_order_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        polaron().eval_remove_internal(&mut rng);
    }

    #[test]
    fn test_accept_sample_equal_to_acceptance() {
        let mut rng = StdRng::seed_from_u64(21);
        let sample: f64 = Uniform::new(0.0, 1.0).sample(&mut rng.clone());
        assert!(sample > 0.0 && sample < 1.0);
        assert!(accept(sample, &mut rng));
    }

    #[test]
    fn test_accept_sample_just_above_acceptance() {
        let mut rng = StdRng::seed_from_u64(21);
        let sample: f64 = Uniform::new(0.0, 1.0).sample(&mut rng.clone());
        assert!(!accept(sample - f64::EPSILON, &mut rng));
    }

    #[test]
    fn test_accept_certain_makes_no_draw() {
        let mut rng = CountingRng::new(21);
        assert!(accept(1.0, &mut rng));
        assert_eq!(rng.draws, 0);

        // anything below one costs exactly one sample
        accept(0.5, &mut rng);
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn test_eval_add_internal_certain_acceptance() {
        // (g τ)^2 = 1e8 keeps the ratio far above one
        let mut p = Polaron::new(1.0, 1.0e4, 1.0);
        let mut rng = CountingRng::new(11);

        assert!(p.eval_add_internal(&mut rng));
        assert_eq!(rng.draws, 2);
        assert_eq!(p.order(), 2);
        let line = p.phonon_lines()[0];
        assert!(line.t_gen >= 0.0 && line.t_gen < 1.0);
        assert!(line.t_rem >= line.t_gen && line.t_rem < 1.0);
    }

    #[test]
    fn test_eval_add_internal_rejected() {
        let mut p = Polaron::new(1.0, 1.0e-6, 1.0);
        let mut rng = CountingRng::new(11);

        assert!(!p.eval_add_internal(&mut rng));
        assert_eq!(rng.draws, 3);
        assert_eq!(p.order(), 0);
        assert_eq!(p.stats().add_proposed, 1);
        assert_eq!(p.stats().add_accepted, 0);
    }

    #[test]
    fn test_eval_remove_internal_certain_acceptance() {
        let mut p = Polaron::new(1.0, 1.0e-6, 1.0);
        p.add_internal(PhononLine::new(0.2, 0.5));
        let mut rng = StdRng::seed_from_u64(5);

        assert!(p.eval_remove_internal(&mut rng));
        assert_eq!(p.order(), 0);
        assert!(p.phonon_lines().is_empty());
    }

    #[test]
    fn test_eval_remove_internal_rejected() {
        let mut p = Polaron::new(1.0, 1.0e4, 1.0);
        p.add_internal(PhononLine::new(0.2, 0.5));
        p.add_internal(PhononLine::new(0.6, 0.7));
        let mut rng = StdRng::seed_from_u64(5);

        assert!(!p.eval_remove_internal(&mut rng));
        assert_eq!(p.order(), 4);
        assert_eq!(p.stats().remove_proposed, 1);
        assert_relative_eq!(p.stats().remove_acceptance_rate(), 0.0);
    }

    #[test]
    fn test_eval_diagram_energy() {
        let mut p = polaron();
        p.eval_diagram_energy();
        assert_relative_eq!(p.total_energy(), 0.0);

        let mut p = polaron_order_two();
        p.eval_diagram_energy();
        assert_relative_eq!(p.total_energy(), 0.1, epsilon = 1e-12);

        p.add_internal(PhononLine::new(0.6, 0.7));
        p.eval_diagram_energy();
        assert_relative_eq!(p.total_energy(), 0.4 - 4.0 / 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_update_diagrams_info() {
        let mut p = polaron_order_two();
        p.eval_diagram_energy();
        p.update_diagrams_info();
        p.add_internal(PhononLine::new(0.6, 0.7));
        p.update_diagrams_info();

        assert_eq!(p.order_sequence(), &[2, 4]);
        // energy is not refreshed until eval_diagram_energy is called
        assert_relative_eq!(p.energy_sequence()[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(p.energy_sequence()[1], 0.1, epsilon = 1e-12);

        p.reset_sequences();
        assert!(p.order_sequence().is_empty());
        assert_eq!(p.order(), 4);
    }
}
