use crate::commands::base_commands::Commands;
use crate::domain::sample::SampleFilter;
use crate::services::bid_api::{AuthData, BidApiClient, BidApiConfigParser};
use crate::services::sample_source::collect_samples;
use crate::services::samples_yaml::serialize_samples_to_yaml;

pub async fn get_samples_command(cmd: Commands) {
    if let Commands::GetSamples {
        config,
        output,
        estimated_price,
        institution,
        bid_type,
        participants,
    } = cmd
    {
        let config_parser = BidApiConfigParser;
        let api_config = match config_parser.parse(&config) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to parse bid API config: {e:?}");
                return;
            }
        };

        let auth = match AuthData::from_env() {
            Ok(auth) => auth,
            Err(e) => {
                eprintln!("Failed to load bid API auth: {e:?}");
                return;
            }
        };

        let api_client = match BidApiClient::new(api_config, auth) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Failed to create bid API client: {e:?}");
                return;
            }
        };

        let filter =
            SampleFilter::for_prediction(estimated_price, institution, bid_type, participants);
        let batch = match collect_samples(&api_client, &filter).await {
            Ok(batch) => batch,
            Err(e) => {
                eprintln!("Failed to fetch bid samples: {e:?}");
                return;
            }
        };

        let mut buffer = Vec::new();
        if let Err(e) = serialize_samples_to_yaml(&mut buffer, &batch.samples) {
            eprintln!("Failed to serialize samples to YAML: {e:?}");
            return;
        }
        if let Err(e) = tokio::fs::write(&output, buffer).await {
            eprintln!("Failed to write output file: {e:?}");
            return;
        }

        if batch.relaxed {
            println!("Few matches for the narrow filter, relaxed search conditions were used");
        }
        println!(
            "{} bid samples written to {output}",
            batch.samples.len()
        );
    }
}
