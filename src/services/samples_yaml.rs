use std::io::{self, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::sample::BidSample;

#[derive(Error, Debug)]
pub enum SamplesYamlError {
    #[error("failed to parse samples yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid sample date: {0}")]
    InvalidDate(String),
}

#[derive(Serialize, Deserialize)]
struct SampleRecord {
    bid_name: String,
    institution: String,
    amount: i64,
    rate: f64,
    participants: u32,
    date: String,
}

pub fn serialize_samples_to_yaml<W: Write>(writer: &mut W, data: &[BidSample]) -> io::Result<()> {
    let records: Vec<SampleRecord> = data
        .iter()
        .map(|sample| SampleRecord {
            bid_name: sample.bid_name.clone(),
            institution: sample.institution.clone(),
            amount: sample.amount,
            rate: sample.rate,
            participants: sample.participants,
            date: sample.date.format("%Y-%m-%d").to_string(),
        })
        .collect();

    let yaml = serde_yaml::to_string(&records).map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())
}

pub fn deserialize_samples_from_yaml_str(yaml: &str) -> Result<Vec<BidSample>, SamplesYamlError> {
    let records: Vec<SampleRecord> = serde_yaml::from_str(yaml)?;
    records
        .into_iter()
        .map(|record| {
            let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
                .map_err(|_| SamplesYamlError::InvalidDate(record.date.clone()))?;
            Ok(BidSample {
                bid_name: record.bid_name,
                institution: record.institution,
                amount: record.amount,
                rate: record.rate,
                participants: record.participants,
                date,
            })
        })
        .collect()
}
