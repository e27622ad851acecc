pub mod bid_api;
pub mod monte_carlo;
pub mod prediction;
pub mod probability;
pub mod rate_histogram;
pub mod recommendation;
pub mod report_types;
pub mod sample_source;
pub mod samples_yaml;
pub mod statistics;
