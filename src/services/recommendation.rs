use serde::Serialize;

use crate::services::statistics::SampleStatistics;

/// Recommended bid-rate band: `low` = q1, `optimal` = median, `high` = q3,
/// each shifted by the participant-count adjustment when a field size is
/// known. Rates are rounded to three decimals like the stored award rates.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RecommendedRate {
    pub optimal: f64,
    pub low: f64,
    pub high: f64,
}

impl RecommendedRate {
    pub fn from_statistics(stats: &SampleStatistics, participants: Option<u32>) -> Self {
        let adjustment = participants.map(participant_adjustment).unwrap_or(0.0);
        let low = round_rate(stats.q1 + adjustment);
        let optimal = round_rate(stats.median + adjustment);
        let high = round_rate(stats.q3 + adjustment);

        // Degenerate samples can invert the band after rounding.
        if low <= optimal && optimal <= high {
            Self { optimal, low, high }
        } else {
            Self {
                optimal,
                low: optimal,
                high: optimal,
            }
        }
    }
}

/// Larger fields push award rates down, small fields allow more margin.
fn participant_adjustment(participants: u32) -> f64 {
    if participants <= 5 {
        0.5
    } else if participants <= 10 {
        0.0
    } else if participants <= 20 {
        -0.3
    } else {
        -0.5
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RecommendedAmount {
    pub optimal: i64,
    pub low: i64,
    pub high: i64,
}

impl RecommendedAmount {
    pub fn from_rate(rate: &RecommendedRate, estimated_price: i64) -> Self {
        Self {
            optimal: amount_for(rate.optimal, estimated_price),
            low: amount_for(rate.low, estimated_price),
            high: amount_for(rate.high, estimated_price),
        }
    }
}

/// Bid amount implied by a rate, rounded to the nearest KRW.
pub fn amount_for(rate: f64, estimated_price: i64) -> i64 {
    (estimated_price as f64 * rate / 100.0).round() as i64
}

fn round_rate(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_statistics() -> SampleStatistics {
        SampleStatistics::from_rates(&[85.0, 87.0, 87.5, 88.0, 90.0]).unwrap()
    }

    #[test]
    fn band_is_quartiles_around_the_median() {
        let rate = RecommendedRate::from_statistics(&reference_statistics(), None);

        assert_eq!(rate.low, 87.0);
        assert_eq!(rate.optimal, 87.5);
        assert_eq!(rate.high, 88.0);
    }

    #[test]
    fn band_ordering_holds_with_every_adjustment_tier() {
        let stats = reference_statistics();
        for participants in [1, 5, 6, 10, 11, 20, 21, 50] {
            let rate = RecommendedRate::from_statistics(&stats, Some(participants));
            assert!(rate.low <= rate.optimal, "participants={participants}");
            assert!(rate.optimal <= rate.high, "participants={participants}");
        }
    }

    #[test]
    fn small_fields_shift_the_band_up_and_large_fields_down() {
        let stats = reference_statistics();
        let small = RecommendedRate::from_statistics(&stats, Some(3));
        let medium = RecommendedRate::from_statistics(&stats, Some(8));
        let large = RecommendedRate::from_statistics(&stats, Some(30));

        assert_eq!(small.optimal, 88.0);
        assert_eq!(medium.optimal, 87.5);
        assert_eq!(large.optimal, 87.0);
    }

    #[test]
    fn single_sample_collapses_the_band() {
        let stats = SampleStatistics::from_rates(&[87.3]).unwrap();
        let rate = RecommendedRate::from_statistics(&stats, None);

        assert_eq!(rate.low, 87.3);
        assert_eq!(rate.optimal, 87.3);
        assert_eq!(rate.high, 87.3);
    }

    #[test]
    fn amount_for_scales_and_rounds_to_the_nearest_unit() {
        assert_eq!(amount_for(87.5, 100_000_000), 87_500_000);
        assert_eq!(amount_for(87.0, 100_000_000), 87_000_000);
        // 877.4999 rounds down to 877
        assert_eq!(amount_for(87.74999, 1_000), 877);
    }

    #[test]
    fn amount_for_is_monotonic_in_the_rate() {
        let price = 142_000_000;
        let rates = [80.0, 85.5, 87.745, 90.0, 103.0];
        let amounts: Vec<i64> = rates.iter().map(|rate| amount_for(*rate, price)).collect();
        assert!(amounts.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn recommended_amount_follows_the_reference_band() {
        let rate = RecommendedRate::from_statistics(&reference_statistics(), None);
        let amount = RecommendedAmount::from_rate(&rate, 100_000_000);

        assert_eq!(amount.low, 87_000_000);
        assert_eq!(amount.optimal, 87_500_000);
        assert_eq!(amount.high, 88_000_000);
    }
}
