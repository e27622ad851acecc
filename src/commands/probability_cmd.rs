use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_probability_report;
use crate::services::probability::assess_from_samples_file;

pub fn probability_command(cmd: Commands) {
    if let Commands::Probability {
        samples,
        rate,
        estimated_price,
        participants,
        output,
    } = cmd
    {
        let report =
            match assess_from_samples_file(&samples, rate, estimated_price, participants) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Failed to assess win probability: {e}");
                    return;
                }
            };

        let yaml = match serde_yaml::to_string(&report) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize probability report: {e:?}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&output, yaml) {
            eprintln!("Failed to write probability report: {e:?}");
        } else {
            println!("{}", format_probability_report(&report));
            println!("Probability report written to {output}");
        }
    }
}
