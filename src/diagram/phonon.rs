//! Phonon interaction lines.

/// One phonon coupled to the electron between two scaled imaginary times.
///
/// Times are expressed in units of the total lifetime τ, so both lie in
/// `[0, 1]` with `t_gen < t_rem`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhononLine {
    /// Scaled time at which the phonon is emitted
    pub t_gen: f64,
    /// Scaled time at which the phonon is reabsorbed
    pub t_rem: f64,
}

impl PhononLine {
    pub fn new(t_gen: f64, t_rem: f64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&t_gen) && t_gen <= t_rem && t_rem <= 1.0,
            "phonon times out of order: ({}, {})",
            t_gen,
            t_rem
        );
        Self { t_gen, t_rem }
    }

    /// Scaled length of the propagator, `t_rem - t_gen`.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.t_rem - self.t_gen
    }
}
