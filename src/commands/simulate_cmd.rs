use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_field_report;
use crate::services::monte_carlo::simulate_from_samples_file;

pub fn simulate_command(cmd: Commands) {
    if let Commands::Simulate {
        samples,
        rate,
        participants,
        iterations,
        output,
    } = cmd
    {
        let histogram_path = format!("{output}.png");
        let report = match simulate_from_samples_file(
            &samples,
            rate,
            participants,
            iterations,
            &histogram_path,
        ) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Failed to simulate bidding field: {e}");
                return;
            }
        };

        let yaml = match serde_yaml::to_string(&report) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize simulation report: {e:?}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&output, yaml) {
            eprintln!("Failed to write simulation report: {e:?}");
        } else {
            println!("{}", format_field_report(&report));
            println!("Simulation report written to {output}");
            println!("Winning rate histogram written to {histogram_path}");
        }
    }
}
