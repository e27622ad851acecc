use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const SAMPLES_YAML: &str = "- bid_name: Road maintenance package 3
  institution: Seoul Metro
  amount: 85000000
  rate: 85.0
  participants: 12
  date: 2026-01-05
- bid_name: School lunch supply
  institution: Gyeonggi Office of Education
  amount: 87000000
  rate: 87.0
  participants: 7
  date: 2026-01-09
- bid_name: Sewer line renewal
  institution: Incheon City
  amount: 87500000
  rate: 87.5
  participants: 9
  date: 2026-01-14
- bid_name: IT equipment lease
  institution: Ministry of Interior
  amount: 88000000
  rate: 88.0
  participants: 5
  date: 2026-01-21
- bid_name: Bridge joint repair
  institution: Busan City
  amount: 90000000
  rate: 90.0
  participants: 11
  date: 2026-02-02
";

#[test]
fn simulate_reports_a_sure_win_for_a_far_below_market_rate() {
    let samples_file = assert_fs::NamedTempFile::new("samples.yaml").unwrap();
    samples_file.write_str(SAMPLES_YAML).unwrap();
    let samples_arg = samples_file.path().to_str().unwrap();

    let output_file = assert_fs::NamedTempFile::new("simulation.yaml").unwrap();
    let output_arg = output_file.path().to_str().unwrap();
    let histogram_path = format!("{output_arg}.png");

    // 70% sits more than ten standard deviations below the sample mean, so
    // every drawn field loses to it.
    let mut cmd = assert_cmd::cargo_bin_cmd!("bidcast");
    cmd.args([
        "simulate",
        "-f",
        samples_arg,
        "-r",
        "70.0",
        "-n",
        "10",
        "-i",
        "50",
        "-o",
        output_arg,
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Simulation report written to {output_arg}"
        )))
        .stdout(predicate::str::contains("Wins: 50 (100.0%)"));

    let output = fs::read_to_string(output_arg).unwrap();
    assert!(output.contains("iterations: 50"));
    assert!(output.contains("wins: 50"));
    assert!(output.contains("win_rate: 100.0"));
    assert!(output.contains("winning_rate:"));
    assert!(output.contains("p0: 70.0"));
    assert!(output.contains("p100: 70.0"));

    assert!(Path::new(&histogram_path).exists());

    let _ = fs::remove_file(samples_arg);
    let _ = fs::remove_file(output_arg);
    let _ = fs::remove_file(&histogram_path);
}

#[test]
fn simulate_rejects_zero_iterations() {
    let samples_file = assert_fs::NamedTempFile::new("samples.yaml").unwrap();
    samples_file.write_str(SAMPLES_YAML).unwrap();
    let samples_arg = samples_file.path().to_str().unwrap();

    let output_file = assert_fs::NamedTempFile::new("simulation.yaml").unwrap();
    let output_arg = output_file.path().to_str().unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("bidcast");
    cmd.args([
        "simulate",
        "-f",
        samples_arg,
        "-r",
        "87.5",
        "-n",
        "10",
        "-i",
        "0",
        "-o",
        output_arg,
    ]);

    cmd.assert().stderr(predicate::str::contains(
        "iterations must be greater than zero",
    ));

    let _ = fs::remove_file(samples_arg);
}
