use thiserror::Error;

use crate::services::recommendation::amount_for;
use crate::services::report_types::{ProbabilityReport, RiskAssessment};
use crate::services::samples_yaml::{SamplesYamlError, deserialize_samples_from_yaml_str};
use crate::services::statistics::{SampleStatistics, StatisticsError};

#[derive(Error, Debug)]
pub enum ProbabilityError {
    #[error("failed to read samples file: {0}")]
    ReadSamples(#[from] std::io::Error),
    #[error("failed to parse samples yaml: {0}")]
    ParseSamples(#[from] SamplesYamlError),
    #[error("my_rate must be a positive number, got {0}")]
    InvalidRate(f64),
    #[error("participants must be greater than zero")]
    InvalidParticipants,
    #[error("estimated price must be greater than zero, got {0}")]
    InvalidEstimatedPrice(i64),
    #[error("{0}")]
    Statistics(#[from] StatisticsError),
}

/// Risk of the candidate rate, derived from its win probability:
/// >= 70% is a low-risk bid, >= 40% medium, anything below is high risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

const LOW_RISK_THRESHOLD: f64 = 70.0;
const MEDIUM_RISK_THRESHOLD: f64 = 40.0;

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "yellow",
            RiskLevel::High => "red",
        }
    }
}

pub(crate) fn risk_for(win_probability: f64) -> RiskLevel {
    if win_probability >= LOW_RISK_THRESHOLD {
        RiskLevel::Low
    } else if win_probability >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityResult {
    pub win_probability: f64,
    pub percentile: f64,
    pub estimated_rank: u32,
    pub z_score: f64,
    pub risk_level: RiskLevel,
    pub recommendation: String,
}

/// Positions a candidate rate within the historical distribution.
///
/// A lower rate is the more competitive bid, so the percentile is the share
/// of the distribution sitting above the candidate: percentile =
/// (1 - cdf(z)) * 100. Win probability divides that by the field size and
/// the estimated rank walks down from 1 as the percentile falls; 1 +
/// (1 - p/100) * (participants - 1), rounded half away from zero.
pub fn assess_rate(
    my_rate: f64,
    stats: &SampleStatistics,
    participants: u32,
) -> Result<ProbabilityResult, ProbabilityError> {
    if participants == 0 {
        return Err(ProbabilityError::InvalidParticipants);
    }
    if !my_rate.is_finite() || my_rate <= 0.0 {
        return Err(ProbabilityError::InvalidRate(my_rate));
    }

    let z_score = if stats.std > 0.0 {
        (my_rate - stats.mean) / stats.std
    } else {
        0.0
    };
    let percentile = (1.0 - standard_normal_cdf(z_score)) * 100.0;
    let win_probability = (percentile / participants as f64).clamp(0.0, 100.0);

    let rank = 1.0 + (1.0 - percentile / 100.0) * (participants as f64 - 1.0);
    let estimated_rank = (rank.round() as u32).clamp(1, participants);

    let risk_level = risk_for(win_probability);
    let recommendation =
        recommendation_text(risk_level, win_probability, estimated_rank, participants);

    Ok(ProbabilityResult {
        win_probability: round_to(win_probability, 1),
        percentile: round_to(percentile, 1),
        estimated_rank,
        z_score: round_to(z_score, 2),
        risk_level,
        recommendation,
    })
}

fn recommendation_text(
    risk_level: RiskLevel,
    win_probability: f64,
    estimated_rank: u32,
    participants: u32,
) -> String {
    match risk_level {
        RiskLevel::Low => format!(
            "Strong position: about {win_probability:.1}% win probability with an \
             expected rank of {estimated_rank} out of {participants}. The rate sits \
             in a highly competitive band."
        ),
        RiskLevel::Medium => format!(
            "Competitive position: about {win_probability:.1}% win probability with \
             an expected rank of {estimated_rank} out of {participants}. Small rate \
             cuts move the expected rank quickly."
        ),
        RiskLevel::High => format!(
            "Weak position: about {win_probability:.1}% win probability with an \
             expected rank of {estimated_rank} out of {participants}. Re-check the \
             rate against the recommended band before submitting."
        ),
    }
}

/// Full probability workflow: load samples, derive the distribution and
/// wrap the assessment into a report.
pub fn assess_from_samples(
    samples: &[crate::domain::sample::BidSample],
    my_rate: f64,
    estimated_price: Option<i64>,
    participants: u32,
) -> Result<ProbabilityReport, ProbabilityError> {
    if let Some(price) = estimated_price {
        if price <= 0 {
            return Err(ProbabilityError::InvalidEstimatedPrice(price));
        }
    }

    let rates: Vec<f64> = samples.iter().map(|sample| sample.rate).collect();
    let stats = SampleStatistics::from_rates(&rates)?;
    let result = assess_rate(my_rate, &stats, participants)?;

    Ok(ProbabilityReport {
        my_rate,
        my_amount: estimated_price.map(|price| amount_for(my_rate, price)),
        win_probability: result.win_probability,
        percentile: result.percentile,
        estimated_rank: result.estimated_rank,
        total_participants: participants,
        risk: RiskAssessment {
            level: result.risk_level.label().to_string(),
            color: result.risk_level.color().to_string(),
        },
        recommendation: result.recommendation,
        z_score: result.z_score,
        sample_count: samples.len(),
        distribution: stats,
    })
}

pub(crate) fn assess_from_samples_file(
    samples_path: &str,
    my_rate: f64,
    estimated_price: Option<i64>,
    participants: u32,
) -> Result<ProbabilityReport, ProbabilityError> {
    let samples_yaml = std::fs::read_to_string(samples_path)?;
    let samples = deserialize_samples_from_yaml_str(&samples_yaml)?;
    assess_from_samples(&samples, my_rate, estimated_price, participants)
}

fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

// Abramowitz & Stegun 7.1.26, absolute error below 1.5e-7.
fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + 0.3275911 * x);
    let polynomial = ((((1.061405429 * t - 1.453152027) * t + 1.421413741) * t - 0.284496736) * t
        + 0.254829592)
        * t;
    sign * (1.0 - polynomial * (-x * x).exp())
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_sample;

    fn reference_statistics() -> SampleStatistics {
        SampleStatistics::from_rates(&[85.0, 87.0, 87.5, 88.0, 90.0]).unwrap()
    }

    #[test]
    fn candidate_at_the_mean_sits_at_the_fiftieth_percentile() {
        let result = assess_rate(87.5, &reference_statistics(), 10).unwrap();

        assert_eq!(result.z_score, 0.0);
        assert_eq!(result.percentile, 50.0);
        assert_eq!(result.win_probability, 5.0);
        // rank = round(1 + 0.5 * 9) = round(5.5) = 6
        assert_eq!(result.estimated_rank, 6);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn lower_rates_earn_higher_percentiles() {
        let stats = reference_statistics();
        let aggressive = assess_rate(85.0, &stats, 10).unwrap();
        let conservative = assess_rate(90.0, &stats, 10).unwrap();

        assert!(aggressive.percentile > conservative.percentile);
        assert!(aggressive.win_probability > conservative.win_probability);
        assert!(aggressive.estimated_rank <= conservative.estimated_rank);
    }

    #[test]
    fn win_probability_does_not_increase_with_more_participants() {
        let stats = reference_statistics();
        let mut previous = f64::INFINITY;
        for participants in [1, 2, 5, 10, 50] {
            let result = assess_rate(86.0, &stats, participants).unwrap();
            assert!(result.win_probability <= previous);
            previous = result.win_probability;
        }
    }

    #[test]
    fn estimated_rank_stays_within_the_field() {
        let stats = reference_statistics();
        for rate in [80.0, 85.0, 87.5, 90.0, 103.0] {
            for participants in [1, 2, 7, 25] {
                let result = assess_rate(rate, &stats, participants).unwrap();
                assert!(result.estimated_rank >= 1);
                assert!(result.estimated_rank <= participants);
            }
        }
    }

    #[test]
    fn zero_spread_distribution_yields_a_zero_z_score() {
        let stats = SampleStatistics::from_rates(&[87.5, 87.5, 87.5]).unwrap();
        let result = assess_rate(85.0, &stats, 5).unwrap();

        assert_eq!(result.z_score, 0.0);
        assert_eq!(result.percentile, 50.0);
    }

    #[test]
    fn risk_thresholds_switch_exactly_at_forty_and_seventy() {
        assert_eq!(risk_for(70.0), RiskLevel::Low);
        assert_eq!(risk_for(69.9), RiskLevel::Medium);
        assert_eq!(risk_for(40.0), RiskLevel::Medium);
        assert_eq!(risk_for(39.9), RiskLevel::High);
        assert_eq!(risk_for(0.0), RiskLevel::High);
        assert_eq!(risk_for(100.0), RiskLevel::Low);
    }

    #[test]
    fn risk_colors_match_their_levels() {
        assert_eq!(RiskLevel::Low.color(), "green");
        assert_eq!(RiskLevel::Medium.color(), "yellow");
        assert_eq!(RiskLevel::High.color(), "red");
    }

    #[test]
    fn assess_rate_rejects_invalid_inputs() {
        let stats = reference_statistics();
        assert!(matches!(
            assess_rate(87.5, &stats, 0),
            Err(ProbabilityError::InvalidParticipants)
        ));
        assert!(matches!(
            assess_rate(-1.0, &stats, 5),
            Err(ProbabilityError::InvalidRate(_))
        ));
    }

    #[test]
    fn standard_normal_cdf_matches_table_values() {
        assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((standard_normal_cdf(1.96) - 0.975).abs() < 5e-4);
        assert!((standard_normal_cdf(-1.96) - 0.025).abs() < 5e-4);
    }

    #[test]
    fn report_carries_amount_and_distribution() {
        let samples = vec![
            build_sample("a", 85.0, 8, 2026, 1, 5),
            build_sample("b", 87.0, 8, 2026, 1, 6),
            build_sample("c", 87.5, 8, 2026, 1, 7),
            build_sample("d", 88.0, 8, 2026, 1, 8),
            build_sample("e", 90.0, 8, 2026, 1, 9),
        ];

        let report = assess_from_samples(&samples, 87.5, Some(100_000_000), 10).unwrap();

        assert_eq!(report.my_amount, Some(87_500_000));
        assert_eq!(report.sample_count, 5);
        assert_eq!(report.distribution.median, 87.5);
        assert_eq!(report.total_participants, 10);
        assert_eq!(report.risk.level, "high");
        assert_eq!(report.risk.color, "red");
    }

    #[test]
    fn empty_sample_set_is_a_structured_failure() {
        let report = assess_from_samples(&[], 87.5, None, 10);
        assert!(matches!(
            report,
            Err(ProbabilityError::Statistics(StatisticsError::EmptySample))
        ));
    }

    #[test]
    fn non_positive_estimated_price_is_rejected_before_statistics() {
        let samples = vec![build_sample("a", 87.5, 8, 2026, 1, 5)];
        let report = assess_from_samples(&samples, 87.5, Some(0), 10);
        assert!(matches!(
            report,
            Err(ProbabilityError::InvalidEstimatedPrice(0))
        ));
    }
}
