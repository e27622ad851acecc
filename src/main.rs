mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use clap::{CommandFactory, Parser};

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::get_samples_cmd::get_samples_command;
use crate::commands::predict_cmd::predict_command;
use crate::commands::probability_cmd::probability_command;
use crate::commands::simulate_cmd::simulate_command;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::GetSamples { .. } => get_samples_command(cmd).await,
        cmd @ Commands::Predict { .. } => predict_command(cmd),
        cmd @ Commands::Probability { .. } => probability_command(cmd),
        cmd @ Commands::Simulate { .. } => simulate_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            clap_complete::generate(shell, &mut command, "bidcast", &mut std::io::stdout());
        }
    }
}
