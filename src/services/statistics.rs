use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StatisticsError {
    #[error("no historical samples match the filter")]
    EmptySample,
    #[error("invalid rate value in sample: {0}")]
    InvalidRate(f64),
}

/// Descriptive statistics over a set of award rates.
///
/// - `std` is the population standard deviation (divide by n, not n-1),
///   so a single-element sample yields 0 instead of an error.
/// - Quartiles use linear interpolation on the sorted sample with
///   rank = p/100 * (n-1), the same method as `PERCENTILE_CONT`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SampleStatistics {
    pub mean: f64,
    pub std: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleStatistics {
    pub fn from_rates(rates: &[f64]) -> Result<Self, StatisticsError> {
        if rates.is_empty() {
            return Err(StatisticsError::EmptySample);
        }
        if let Some(bad) = rates.iter().find(|rate| !rate.is_finite() || **rate <= 0.0) {
            return Err(StatisticsError::InvalidRate(*bad));
        }

        let mut sorted = rates.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|rate| (rate - mean).powi(2)).sum::<f64>() / n;

        Ok(Self {
            mean,
            std: variance.sqrt(),
            median: percentile_sorted(&sorted, 50.0),
            q1: percentile_sorted(&sorted, 25.0),
            q3: percentile_sorted(&sorted, 75.0),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Interpolated percentile of a slice that is already sorted ascending.
/// Percentiles outside [0, 100] clamp to the first and last element.
pub fn percentile_sorted(sorted_values: &[f64], percentile: f64) -> f64 {
    if percentile <= 0.0 {
        return sorted_values[0];
    }
    if percentile >= 100.0 {
        return sorted_values[sorted_values.len() - 1];
    }

    let rank = (percentile / 100.0) * (sorted_values.len() as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted_values[lower];
    }
    let fraction = rank - lower as f64;
    (1.0 - fraction) * sorted_values[lower] + fraction * sorted_values[upper]
}
