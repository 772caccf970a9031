// src/stats.rs

use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::statistics::Statistics;

/// Sample mean and standard deviation
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        Self {
            count: values.len(),
            mean: values.iter().mean(),
            std_dev: values.iter().std_dev(),
        }
    }

    pub fn of_ints(values: &[i64]) -> Self {
        let as_f64: Vec<f64> = values.iter().map(|&x| x as f64).collect();
        Self::of(&as_f64)
    }
}

/// Outcome of a chi-square goodness-of-fit test
#[derive(Debug, Clone, Copy)]
pub struct ChiSquareResult {
    pub statistic: f64,
    pub critical: f64,
    pub degrees_of_freedom: usize,
}

impl ChiSquareResult {
    pub fn passes(&self) -> bool {
        self.statistic <= self.critical
    }
}

/// Probability of each integer in `-support..=support` under D_{Z,σ}
pub fn discrete_gaussian_pmf(sigma: f64, support: i64) -> Vec<f64> {
    let weights: Vec<f64> = (-support..=support)
        .map(|k| (-((k * k) as f64) / (2.0 * sigma * sigma)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Chi-square test of integer samples against D_{Z,σ}
///
/// Bins run over `-m..=m` where `m` is the largest magnitude whose expected
/// count is at least 5; samples beyond `m` fall into the edge bins.
pub fn chi_square_discrete_gaussian(samples: &[i64], sigma: f64, alpha: f64) -> ChiSquareResult {
    let n = samples.len() as f64;
    let support = (sigma * 12.0).ceil() as i64;
    let pmf = discrete_gaussian_pmf(sigma, support);
    let p = |k: i64| pmf[(k + support) as usize];

    let mut m = 0;
    while m < support && n * p(m + 1) >= 5.0 {
        m += 1;
    }

    let mut expected: Vec<f64> = (-m..=m).map(|k| n * p(k)).collect();
    let tail: f64 = ((m + 1)..=support).map(|k| n * p(k)).sum();
    let last = expected.len() - 1;
    expected[0] += tail;
    expected[last] += tail;

    let mut observed = vec![0f64; expected.len()];
    for &x in samples {
        let k = x.clamp(-m, m);
        observed[(k + m) as usize] += 1.0;
    }

    let statistic = observed
        .iter()
        .zip(&expected)
        .map(|(o, e)| (o - e) * (o - e) / e)
        .sum();
    let degrees_of_freedom = expected.len() - 1;
    let critical = ChiSquared::new(degrees_of_freedom as f64)
        .map(|dist| dist.inverse_cdf(1.0 - alpha))
        .unwrap_or(f64::INFINITY);

    ChiSquareResult {
        statistic,
        critical,
        degrees_of_freedom,
    }
}
