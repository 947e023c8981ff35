//! Statistics of correlated Markov-chain samples.

pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Covariance of the series with itself shifted by `lag`, about `mean`.
fn autocovariance(samples: &[f64], mean: f64, lag: usize) -> f64 {
    let pairs = samples.len() - lag;
    samples[..pairs]
        .iter()
        .zip(&samples[lag..])
        .map(|(&x, &y)| (x - mean) * (y - mean))
        .sum::<f64>()
        / pairs as f64
}

/// Integrated autocorrelation time `1 + 2 Σ ρ(t)`, summed while the
/// normalized autocorrelation `ρ(t)` stays non-negative and `t < n/2`.
/// A constant or too short series has time 1.
pub fn autocorrelation_time(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 1.0;
    }
    let mean = mean(samples);
    let c0 = autocovariance(samples, mean, 0);
    if c0 == 0.0 {
        return 1.0;
    }

    (1..n / 2)
        .map(|lag| autocovariance(samples, mean, lag) / c0)
        .take_while(|&rho| rho >= 0.0)
        .fold(1.0, |tau, rho| tau + 2.0 * rho)
}

/// Standard error of the mean from blocks of `ceil(2 tau)` samples.
///
/// Returns 0 when fewer than two blocks fit in the series.
pub fn blocking_error(samples: &[f64], autocorrelation_time: f64) -> f64 {
    let block_size = ((2.0 * autocorrelation_time).ceil() as usize).max(1);
    let block_means: Vec<f64> = samples.chunks_exact(block_size).map(mean).collect();
    let n_blocks = block_means.len();
    if n_blocks < 2 {
        return 0.0;
    }

    // unbiased variance of the block means
    let variance = autocovariance(&block_means, mean(&block_means), 0) * n_blocks as f64
        / (n_blocks - 1) as f64;
    (variance / n_blocks as f64).sqrt()
}
