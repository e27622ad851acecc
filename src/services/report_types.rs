use serde::Serialize;

use crate::services::recommendation::{RecommendedAmount, RecommendedRate};
use crate::services::statistics::SampleStatistics;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimilarCase {
    pub bid_name: String,
    pub institution: String,
    pub amount: i64,
    pub rate: f64,
    pub participants: u32,
    pub date: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictReport {
    pub estimated_price: i64,
    pub sample_count: usize,
    pub statistics: SampleStatistics,
    pub recommended_rate: RecommendedRate,
    pub recommended_amount: RecommendedAmount,
    pub similar_cases: Vec<SimilarCase>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub level: String,
    pub color: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProbabilityReport {
    pub my_rate: f64,
    pub my_amount: Option<i64>,
    pub win_probability: f64,
    pub percentile: f64,
    pub estimated_rank: u32,
    pub total_participants: u32,
    pub risk: RiskAssessment,
    pub recommendation: String,
    pub z_score: f64,
    pub sample_count: usize,
    pub distribution: SampleStatistics,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WinningRatePercentiles {
    pub p0: f64,
    pub p50: f64,
    pub p100: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FieldSimulationReport {
    pub my_rate: f64,
    pub participants: u32,
    pub iterations: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub winning_rate: WinningRatePercentiles,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSimulationOutput {
    pub report: FieldSimulationReport,
    pub results: Vec<f64>,
}
