use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_predict_report;
use crate::services::prediction::predict_from_samples_file;

pub fn predict_command(cmd: Commands) {
    if let Commands::Predict {
        samples,
        estimated_price,
        participants,
        output,
    } = cmd
    {
        let histogram_path = format!("{output}.png");
        let report = match predict_from_samples_file(
            &samples,
            estimated_price,
            participants,
            &histogram_path,
        ) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Failed to predict bid rate: {e}");
                return;
            }
        };

        let yaml = match serde_yaml::to_string(&report) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize prediction report: {e:?}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&output, yaml) {
            eprintln!("Failed to write prediction report: {e:?}");
        } else {
            println!("{}", format_predict_report(&report));
            println!("Prediction report written to {output}");
            println!("Rate distribution written to {histogram_path}");
        }
    }
}
