use std::collections::HashMap;
use std::env;
use std::fs;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::sample::{BidSample, SampleFilter};
use crate::services::sample_source::{SampleSource, SampleSourceError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BidApiMetaData {
    pub base_url: String,
    pub dataset: String,
}

impl BidApiMetaData {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, SampleSourceError> {
        let contents = fs::read_to_string(filepath)
            .map_err(|err| SampleSourceError::Other(format!("failed to read config: {err}")))?;
        let metadata: BidApiMetaData =
            serde_yaml::from_str(&contents).map_err(|_| SampleSourceError::Parse)?;
        Ok(metadata)
    }
}

pub struct BidApiConfigParser;

impl BidApiConfigParser {
    pub fn parse(&self, filepath: &str) -> Result<BidApiMetaData, SampleSourceError> {
        BidApiMetaData::from_yaml_file(filepath)
    }
}

#[derive(Debug, Clone)]
pub struct AuthData {
    pub api_token: String,
}

impl AuthData {
    pub fn from_env() -> Result<Self, SampleSourceError> {
        match env::var("BID_API_TOKEN").ok() {
            Some(api_token) => Ok(Self { api_token }),
            None => Err(SampleSourceError::Unauthorized),
        }
    }
}

pub struct BidApiClient {
    config: BidApiMetaData,
    auth: AuthData,
    client: Client,
}

impl BidApiClient {
    pub fn new(config: BidApiMetaData, auth: AuthData) -> Result<Self, SampleSourceError> {
        if config.base_url.is_empty() || config.dataset.is_empty() {
            return Err(SampleSourceError::Other(
                "bid api metadata is missing base_url or dataset".to_string(),
            ));
        }

        Ok(Self {
            config,
            auth,
            client: Client::new(),
        })
    }

    async fn fetch_json(
        &self,
        url: &str,
        params: &HashMap<&str, String>,
    ) -> Result<Value, SampleSourceError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .bearer_auth(self.auth.api_token.clone())
            .send()
            .await
            .map_err(|_| SampleSourceError::Connection)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SampleSourceError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(SampleSourceError::NotFound);
        }
        if !status.is_success() {
            return Err(SampleSourceError::Connection);
        }

        response
            .json::<Value>()
            .await
            .map_err(|_| SampleSourceError::Parse)
    }

    async fn fetch_sample_pages(
        &self,
        filter: &SampleFilter,
    ) -> Result<Vec<BidSample>, SampleSourceError> {
        let url = format!("{}/{}", self.config.base_url, self.config.dataset);
        let mut params = filter_params(filter);

        let mut mapped = Vec::new();
        loop {
            let payload = self.fetch_json(&url, &params).await?;

            let samples = payload
                .get("samples")
                .and_then(|value| value.as_array())
                .ok_or(SampleSourceError::Parse)?;

            for sample in samples {
                if let Some(sample_obj) = sample.as_object() {
                    mapped.push(map_sample(sample_obj)?);
                }
            }

            let start_at = payload.get("startAt").and_then(|value| value.as_u64());
            let max_results = payload.get("maxResults").and_then(|value| value.as_u64());
            let total = payload.get("total").and_then(|value| value.as_u64());

            if let (Some(start_at), Some(max_results), Some(total)) =
                (start_at, max_results, total)
            {
                let next_start_at = start_at.saturating_add(max_results);
                if next_start_at >= total {
                    break;
                }
                params.insert("startAt", next_start_at.to_string());
                continue;
            }

            break;
        }

        Ok(mapped)
    }
}

impl SampleSource for BidApiClient {
    async fn fetch_samples(
        &self,
        filter: &SampleFilter,
    ) -> Result<Vec<BidSample>, SampleSourceError> {
        self.fetch_sample_pages(filter).await
    }
}

fn filter_params(filter: &SampleFilter) -> HashMap<&'static str, String> {
    let mut params = HashMap::new();
    if let Some((min_amount, max_amount)) = filter.amount_bounds() {
        params.insert("minAmount", min_amount.to_string());
        params.insert("maxAmount", max_amount.to_string());
    }
    if let Some(institution) = &filter.institution {
        params.insert("institution", institution.clone());
    }
    if let Some(bid_type) = &filter.bid_type {
        params.insert("bidType", bid_type.clone());
    }
    if let Some((min_participants, max_participants)) = filter.participant_bounds() {
        params.insert("minParticipants", min_participants.to_string());
        params.insert("maxParticipants", max_participants.to_string());
    }
    params
}

fn map_sample(sample: &serde_json::Map<String, Value>) -> Result<BidSample, SampleSourceError> {
    let rate = get_field_f64(sample, "rate").ok_or(SampleSourceError::Parse)?;
    let amount = get_field_i64(sample, "amount").ok_or(SampleSourceError::Parse)?;
    let participants = get_field_i64(sample, "participants").unwrap_or(1).max(1) as u32;
    let date = parse_date_opt(get_field_string(sample, "date").as_deref())
        .ok_or(SampleSourceError::Parse)?;

    Ok(BidSample {
        bid_name: get_field_string(sample, "bidName").unwrap_or_default(),
        institution: get_field_string(sample, "institution").unwrap_or_default(),
        amount,
        rate,
        participants,
        date,
    })
}

fn get_field_string(fields: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(|value| match value {
        Value::String(text) => Some(text.clone()),
        _ => None,
    })
}

fn get_field_f64(fields: &serde_json::Map<String, Value>, key: &str) -> Option<f64> {
    fields.get(key).and_then(|value| match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.parse::<f64>().ok(),
        _ => None,
    })
}

fn get_field_i64(fields: &serde_json::Map<String, Value>, key: &str) -> Option<i64> {
    fields.get(key).and_then(|value| match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.parse::<i64>().ok(),
        _ => None,
    })
}

fn parse_date_opt(value: Option<&str>) -> Option<NaiveDate> {
    let text = value?;
    let date = if let Some((date_part, _)) = text.split_once('T') {
        date_part
    } else {
        text
    };
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
