use crate::services::report_types::{FieldSimulationReport, PredictReport, ProbabilityReport};

pub fn format_predict_report(report: &PredictReport) -> String {
    let mut lines = Vec::new();
    lines.push("Bid Rate Prediction".to_string());
    lines.push(format!("Estimated price: {}", report.estimated_price));
    lines.push(format!("Samples: {}", report.sample_count));
    lines.push(String::new());
    lines.push("Statistics:".to_string());
    lines.push(format!(
        "mean {:.3} | std {:.3} | median {:.3}",
        report.statistics.mean, report.statistics.std, report.statistics.median
    ));
    lines.push(format!(
        "min {:.3} | q1 {:.3} | q3 {:.3} | max {:.3}",
        report.statistics.min, report.statistics.q1, report.statistics.q3, report.statistics.max
    ));
    lines.push(String::new());
    lines.push("Recommended rate:".to_string());
    lines.push("Band | Rate | Amount".to_string());
    lines.push("-----|------|-------".to_string());
    lines.push(format!(
        "Low | {:.3} | {}",
        report.recommended_rate.low, report.recommended_amount.low
    ));
    lines.push(format!(
        "Optimal | {:.3} | {}",
        report.recommended_rate.optimal, report.recommended_amount.optimal
    ));
    lines.push(format!(
        "High | {:.3} | {}",
        report.recommended_rate.high, report.recommended_amount.high
    ));

    lines.join("\n")
}

pub fn format_probability_report(report: &ProbabilityReport) -> String {
    let my_amount = match report.my_amount {
        Some(value) => value.to_string(),
        None => "n/a".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("Win Probability Assessment".to_string());
    lines.push(format!("My rate: {:.3}", report.my_rate));
    lines.push(format!("My amount: {my_amount}"));
    lines.push(format!("Samples: {}", report.sample_count));
    lines.push(String::new());
    lines.push(format!("Win probability: {:.1}%", report.win_probability));
    lines.push(format!("Percentile: {:.1}", report.percentile));
    lines.push(format!(
        "Estimated rank: {} of {}",
        report.estimated_rank, report.total_participants
    ));
    lines.push(format!("Z-score: {:.2}", report.z_score));
    lines.push(format!(
        "Risk: {} ({})",
        report.risk.level, report.risk.color
    ));
    lines.push(String::new());
    lines.push(report.recommendation.clone());

    lines.join("\n")
}

pub fn format_field_report(report: &FieldSimulationReport) -> String {
    let mut lines = Vec::new();
    lines.push("Field Simulation".to_string());
    lines.push(format!("My rate: {:.3}", report.my_rate));
    lines.push(format!("Participants: {}", report.participants));
    lines.push(format!("Iterations: {}", report.iterations));
    lines.push(format!(
        "Wins: {} ({:.1}%)",
        report.wins, report.win_rate
    ));
    lines.push(String::new());
    lines.push("Winning rate:".to_string());
    lines.push("Percentile | Rate".to_string());
    lines.push("-----------|-----".to_string());
    lines.push(format!("P0 | {:.3}", report.winning_rate.p0));
    lines.push(format!("P50 | {:.3}", report.winning_rate.p50));
    lines.push(format!("P100 | {:.3}", report.winning_rate.p100));

    lines.join("\n")
}
