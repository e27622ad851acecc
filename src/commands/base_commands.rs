use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch historical bid samples from the bid-results API into YAML
    GetSamples {
        /// Path to bid API config YAML
        #[arg(short, long)]
        config: String,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
        /// Estimated price used to bracket the award amounts
        #[arg(short = 'p', long)]
        estimated_price: Option<i64>,
        /// Contracting institution name filter
        #[arg(short = 'I', long)]
        institution: Option<String>,
        /// Bid type filter
        #[arg(short = 'b', long)]
        bid_type: Option<String>,
        /// Expected number of participants
        #[arg(short = 'n', long)]
        participants: Option<u32>,
    },
    /// Recommend a bid-rate band and amounts from historical samples
    Predict {
        /// Samples YAML file
        #[arg(short = 'f', long)]
        samples: String,
        /// Estimated price in KRW
        #[arg(short = 'p', long)]
        estimated_price: i64,
        /// Expected number of participants
        #[arg(short = 'n', long)]
        participants: Option<u32>,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Estimate win probability for a candidate bid rate
    Probability {
        /// Samples YAML file
        #[arg(short = 'f', long)]
        samples: String,
        /// Candidate bid rate in percent
        #[arg(short, long)]
        rate: f64,
        /// Estimated price in KRW, used for the implied bid amount
        #[arg(short = 'p', long)]
        estimated_price: Option<i64>,
        /// Number of participants in the field
        #[arg(short = 'n', long)]
        participants: u32,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Monte Carlo simulation of a full bidding field
    Simulate {
        /// Samples YAML file
        #[arg(short = 'f', long)]
        samples: String,
        /// Candidate bid rate in percent
        #[arg(short, long)]
        rate: f64,
        /// Number of participants in the field
        #[arg(short = 'n', long)]
        participants: u32,
        /// Number of simulation iterations
        #[arg(short, long, default_value_t = 10000)]
        iterations: usize,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
