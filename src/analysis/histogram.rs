//! Phonon-number distribution and its Poisson fit.
//!
//! In the weak-coupling limit the number of phonons in the polaron cloud is
//! Poisson distributed with mean `g²/ω²` per unit `ωτ`.

use super::statistics::mean;

/// Normalized histogram with one unit-width bin per phonon number `0..=max`.
#[derive(Clone, Debug, PartialEq)]
pub struct PhononHistogram {
    pub probabilities: Vec<f64>,
    pub n_samples: usize,
}

impl PhononHistogram {
    pub fn from_counts(phonons: &[usize]) -> Self {
        let max = phonons.iter().copied().max().unwrap_or(0);
        let mut counts = vec![0usize; max + 1];
        for &n in phonons {
            counts[n] += 1;
        }
        let total = phonons.len().max(1) as f64;
        let probabilities = counts.iter().map(|&c| c as f64 / total).collect();
        Self { probabilities, n_samples: phonons.len() }
    }

    pub fn n_bins(&self) -> usize {
        self.probabilities.len()
    }

    /// Mean phonon number of the histogram.
    pub fn mean(&self) -> f64 {
        self.probabilities
            .iter()
            .enumerate()
            .map(|(k, p)| k as f64 * p)
            .sum()
    }
}

/// Phonon numbers `order / 2` of a sequence of diagram orders.
pub fn phonon_numbers(order_sequence: &[usize]) -> Vec<usize> {
    order_sequence.iter().map(|&order| order / 2).collect()
}

/// Poisson probability mass `λ^k e^{-λ} / k!`, evaluated in log space.
pub fn poisson_pmf(k: usize, lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    let ln_factorial: f64 = (2..=k).map(|i| (i as f64).ln()).sum();
    (k as f64 * lambda.ln() - lambda - ln_factorial).exp()
}

/// Least-squares fit of a Poisson mass function to a histogram.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PoissonFit {
    pub lambda: f64,
    /// Sum of squared residuals at `lambda`
    pub residual: f64,
}

const GOLDEN: f64 = 0.618_033_988_749_894_9;
const FIT_TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 500;

impl PoissonFit {
    /// Minimize `Σ_k (pmf(k; λ) - p_k)²` over λ with a golden-section search
    /// bracketed around the histogram mean.
    pub fn fit(histogram: &PhononHistogram) -> Self {
        let objective = |lambda: f64| residual(histogram, lambda);

        let center = histogram.mean();
        let width = 5.0 * center.sqrt() + 1.0;
        let mut a = (center - width).max(0.0);
        let mut b = center + width;

        let mut c = b - GOLDEN * (b - a);
        let mut d = a + GOLDEN * (b - a);
        let mut fc = objective(c);
        let mut fd = objective(d);
        for _ in 0..MAX_ITERATIONS {
            if (b - a).abs() < FIT_TOLERANCE {
                break;
            }
            if fc < fd {
                b = d;
                d = c;
                fd = fc;
                c = b - GOLDEN * (b - a);
                fc = objective(c);
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + GOLDEN * (b - a);
                fd = objective(d);
            }
        }

        let lambda = 0.5 * (a + b);
        Self { lambda, residual: objective(lambda) }
    }

    /// Fitted probability of `k` phonons.
    pub fn probability(&self, k: usize) -> f64 {
        poisson_pmf(k, self.lambda)
    }
}

fn residual(histogram: &PhononHistogram, lambda: f64) -> f64 {
    histogram
        .probabilities
        .iter()
        .enumerate()
        .map(|(k, &p)| (poisson_pmf(k, lambda) - p).powi(2))
        .sum()
}

/// Mean phonon number computed directly from a sequence of diagram orders.
pub fn mean_phonons(order_sequence: &[usize]) -> f64 {
    let phonons: Vec<f64> = order_sequence.iter().map(|&o| (o / 2) as f64).collect();
    mean(&phonons)
}
