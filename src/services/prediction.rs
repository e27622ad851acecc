use thiserror::Error;

use crate::domain::sample::BidSample;
use crate::services::rate_histogram::{RateHistogramError, write_rate_histogram_png};
use crate::services::recommendation::{RecommendedAmount, RecommendedRate};
use crate::services::report_types::{PredictReport, SimilarCase};
use crate::services::samples_yaml::{SamplesYamlError, deserialize_samples_from_yaml_str};
use crate::services::statistics::{SampleStatistics, StatisticsError};

/// Display-only tail of the report; never part of the computation.
const SIMILAR_CASE_LIMIT: usize = 10;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("failed to read samples file: {0}")]
    ReadSamples(#[from] std::io::Error),
    #[error("failed to parse samples yaml: {0}")]
    ParseSamples(#[from] SamplesYamlError),
    #[error("estimated price must be greater than zero, got {0}")]
    InvalidEstimatedPrice(i64),
    #[error("participants must be greater than zero")]
    InvalidParticipants,
    #[error("{0}")]
    Statistics(#[from] StatisticsError),
    #[error("failed to render rate histogram: {0}")]
    Histogram(#[from] RateHistogramError),
}

/// Derives the recommended bid-rate band and amounts for an estimated
/// price from historical award samples.
pub fn predict_from_samples(
    samples: &[BidSample],
    estimated_price: i64,
    participants: Option<u32>,
) -> Result<PredictReport, PredictionError> {
    if estimated_price <= 0 {
        return Err(PredictionError::InvalidEstimatedPrice(estimated_price));
    }
    if participants == Some(0) {
        return Err(PredictionError::InvalidParticipants);
    }

    let rates: Vec<f64> = samples.iter().map(|sample| sample.rate).collect();
    let statistics = SampleStatistics::from_rates(&rates)?;
    let recommended_rate = RecommendedRate::from_statistics(&statistics, participants);
    let recommended_amount = RecommendedAmount::from_rate(&recommended_rate, estimated_price);

    Ok(PredictReport {
        estimated_price,
        sample_count: samples.len(),
        statistics,
        recommended_rate,
        recommended_amount,
        similar_cases: most_recent_cases(samples),
    })
}

pub(crate) fn predict_from_samples_file(
    samples_path: &str,
    estimated_price: i64,
    participants: Option<u32>,
    histogram_path: &str,
) -> Result<PredictReport, PredictionError> {
    let samples_yaml = std::fs::read_to_string(samples_path)?;
    let samples = deserialize_samples_from_yaml_str(&samples_yaml)?;
    let report = predict_from_samples(&samples, estimated_price, participants)?;

    let rates: Vec<f64> = samples.iter().map(|sample| sample.rate).collect();
    write_rate_histogram_png(histogram_path, &rates, "Award Rate Distribution")?;
    Ok(report)
}

fn most_recent_cases(samples: &[BidSample]) -> Vec<SimilarCase> {
    let mut recent: Vec<&BidSample> = samples.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent
        .into_iter()
        .take(SIMILAR_CASE_LIMIT)
        .map(|sample| SimilarCase {
            bid_name: sample.bid_name.clone(),
            institution: sample.institution.clone(),
            amount: sample.amount,
            rate: sample.rate,
            participants: sample.participants,
            date: sample.date.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_sample;

    fn reference_samples() -> Vec<BidSample> {
        vec![
            build_sample("Road maintenance package 3", 85.0, 12, 2026, 1, 5),
            build_sample("School lunch supply", 87.0, 7, 2026, 1, 9),
            build_sample("Sewer line renewal", 87.5, 9, 2026, 1, 14),
            build_sample("IT equipment lease", 88.0, 5, 2026, 1, 21),
            build_sample("Bridge joint repair", 90.0, 11, 2026, 2, 2),
        ]
    }

    #[test]
    fn predict_produces_the_reference_band_and_amounts() {
        let report = predict_from_samples(&reference_samples(), 100_000_000, None).unwrap();

        assert_eq!(report.sample_count, 5);
        assert_eq!(report.statistics.median, 87.5);
        assert_eq!(report.recommended_rate.low, 87.0);
        assert_eq!(report.recommended_rate.optimal, 87.5);
        assert_eq!(report.recommended_rate.high, 88.0);
        assert_eq!(report.recommended_amount.optimal, 87_500_000);
        assert_eq!(report.recommended_amount.low, 87_000_000);
        assert_eq!(report.recommended_amount.high, 88_000_000);
    }

    #[test]
    fn similar_cases_are_most_recent_first() {
        let report = predict_from_samples(&reference_samples(), 100_000_000, None).unwrap();

        assert_eq!(report.similar_cases.len(), 5);
        assert_eq!(report.similar_cases[0].bid_name, "Bridge joint repair");
        assert_eq!(report.similar_cases[0].date, "2026-02-02");
        assert_eq!(report.similar_cases[4].bid_name, "Road maintenance package 3");
    }

    #[test]
    fn similar_cases_are_capped_at_ten() {
        let samples: Vec<BidSample> = (0..15)
            .map(|idx| build_sample(&format!("bid-{idx}"), 87.0 + idx as f64 * 0.1, 6, 2026, 1, 1 + idx))
            .collect();

        let report = predict_from_samples(&samples, 50_000_000, None).unwrap();
        assert_eq!(report.sample_count, 15);
        assert_eq!(report.similar_cases.len(), 10);
        assert_eq!(report.similar_cases[0].date, "2026-01-15");
    }

    #[test]
    fn empty_sample_set_is_a_structured_failure() {
        let report = predict_from_samples(&[], 100_000_000, None);
        assert!(matches!(
            report,
            Err(PredictionError::Statistics(StatisticsError::EmptySample))
        ));
    }

    #[test]
    fn non_positive_price_is_rejected_before_statistics() {
        let report = predict_from_samples(&reference_samples(), 0, None);
        assert!(matches!(
            report,
            Err(PredictionError::InvalidEstimatedPrice(0))
        ));
    }

    #[test]
    fn zero_participants_is_rejected() {
        let report = predict_from_samples(&reference_samples(), 100_000_000, Some(0));
        assert!(matches!(report, Err(PredictionError::InvalidParticipants)));
    }
}
