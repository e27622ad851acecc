pub mod base_commands;
pub mod get_samples_cmd;
pub mod predict_cmd;
pub mod probability_cmd;
pub mod report_format;
pub mod simulate_cmd;
