use rand::Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

use crate::services::rate_histogram::{RateHistogramError, write_rate_histogram_png};
use crate::services::report_types::{
    FieldSimulationOutput, FieldSimulationReport, WinningRatePercentiles,
};
use crate::services::samples_yaml::{SamplesYamlError, deserialize_samples_from_yaml_str};
use crate::services::statistics::{SampleStatistics, StatisticsError, percentile_sorted};

#[derive(Error, Debug)]
pub enum FieldSimulationError {
    #[error("failed to read samples file: {0}")]
    ReadSamples(#[from] std::io::Error),
    #[error("failed to parse samples yaml: {0}")]
    ParseSamples(#[from] SamplesYamlError),
    #[error("iterations must be greater than zero")]
    InvalidIterations,
    #[error("participants must be greater than zero")]
    InvalidParticipants,
    #[error("my_rate must be a positive number, got {0}")]
    InvalidRate(f64),
    #[error("{0}")]
    Statistics(#[from] StatisticsError),
    #[error("failed to render rate histogram: {0}")]
    Histogram(#[from] RateHistogramError),
}

pub(crate) fn simulate_from_samples_file(
    samples_path: &str,
    my_rate: f64,
    participants: u32,
    iterations: usize,
    histogram_path: &str,
) -> Result<FieldSimulationReport, FieldSimulationError> {
    let samples_yaml = std::fs::read_to_string(samples_path)?;
    let samples = deserialize_samples_from_yaml_str(&samples_yaml)?;
    let rates: Vec<f64> = samples.iter().map(|sample| sample.rate).collect();
    let stats = SampleStatistics::from_rates(&rates)?;

    let simulation = run_field_simulation(my_rate, &stats, participants, iterations)?;
    write_rate_histogram_png(histogram_path, &simulation.results, "Winning Rate Distribution")?;
    Ok(simulation.report)
}

pub(crate) fn run_field_simulation(
    my_rate: f64,
    stats: &SampleStatistics,
    participants: u32,
    iterations: usize,
) -> Result<FieldSimulationOutput, FieldSimulationError> {
    let mut rng = rand::thread_rng();
    run_field_simulation_with_rng(my_rate, stats, participants, iterations, &mut rng)
}

/// Draws the competitor field from Normal(mean, std) each iteration; the
/// candidate wins when its rate is strictly below every competitor's. A
/// zero-spread distribution makes every competitor bid the mean.
pub(crate) fn run_field_simulation_with_rng<R: Rng + ?Sized>(
    my_rate: f64,
    stats: &SampleStatistics,
    participants: u32,
    iterations: usize,
    rng: &mut R,
) -> Result<FieldSimulationOutput, FieldSimulationError> {
    if iterations == 0 {
        return Err(FieldSimulationError::InvalidIterations);
    }
    if participants == 0 {
        return Err(FieldSimulationError::InvalidParticipants);
    }
    if !my_rate.is_finite() || my_rate <= 0.0 {
        return Err(FieldSimulationError::InvalidRate(my_rate));
    }

    let competitor_distribution = if stats.std > 0.0 {
        Some(Normal::new(stats.mean, stats.std).map_err(|_| {
            FieldSimulationError::Statistics(StatisticsError::InvalidRate(stats.std))
        })?)
    } else {
        None
    };

    let competitors = participants.saturating_sub(1) as usize;
    let mut wins = 0usize;
    let mut results = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let mut lowest_competitor = f64::INFINITY;
        for _ in 0..competitors {
            let rate = match &competitor_distribution {
                Some(normal) => normal.sample(rng),
                None => stats.mean,
            };
            lowest_competitor = lowest_competitor.min(rate);
        }

        let won = my_rate < lowest_competitor;
        if won {
            wins += 1;
        }
        results.push(if won { my_rate } else { lowest_competitor });
    }

    let mut sorted = results.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let report = FieldSimulationReport {
        my_rate,
        participants,
        iterations,
        wins,
        win_rate: wins as f64 / iterations as f64 * 100.0,
        winning_rate: WinningRatePercentiles {
            p0: sorted[0],
            p50: percentile_sorted(&sorted, 50.0),
            p100: sorted[sorted.len() - 1],
        },
    };

    Ok(FieldSimulationOutput { report, results })
}
