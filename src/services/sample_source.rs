use thiserror::Error;

use crate::domain::sample::{BidSample, SampleFilter};

#[derive(Error, Debug)]
pub enum SampleSourceError {
    #[error("resource not found")]
    NotFound,
    #[error("connection error")]
    Connection,
    #[error("parse error")]
    Parse,
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Other(String),
}

/// Describes an interface for retrieving historical bid samples.
pub trait SampleSource {
    async fn fetch_samples(
        &self,
        filter: &SampleFilter,
    ) -> Result<Vec<BidSample>, SampleSourceError>;
}

/// Fewer matches than this triggers one relaxed second pass.
pub const MIN_SAMPLE_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleBatch {
    pub samples: Vec<BidSample>,
    pub relaxed: bool,
}

/// Fetches samples for the given filter, retrying once with the relaxed
/// filter when the first pass is too thin. An empty batch is still a valid
/// result here; emptiness is surfaced by the statistics layer.
pub async fn collect_samples<S: SampleSource>(
    source: &S,
    filter: &SampleFilter,
) -> Result<SampleBatch, SampleSourceError> {
    let samples = source.fetch_samples(filter).await?;
    if samples.len() >= MIN_SAMPLE_COUNT || !filter.can_relax() {
        return Ok(SampleBatch {
            samples,
            relaxed: false,
        });
    }

    let samples = source.fetch_samples(&filter.relaxed()).await?;
    Ok(SampleBatch {
        samples,
        relaxed: true,
    })
}
