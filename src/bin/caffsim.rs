use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use caffsim::prelude::*;
use caffsim::report::export;

const INPUT_ERROR: &str =
    "Input error: enter (age, weight, intakes per week, dose in mg), e.g. (20, 60, 3, 150)";

/// Exit status for input the model cannot run on
const STATUS_REJECTED: u8 = 2;

/// Exit status for any other failure
const STATUS_FAILED: u8 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "caffsim",
    version,
    about = "Predict the personal effect curve of a single caffeine dose"
)]
struct Cli {
    /// Input tuple: (age, weight kg, intakes per week, dose mg)
    #[arg(allow_hyphen_values = true)]
    input: String,

    /// JSON options file; flags below take precedence over its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximal effect
    #[arg(long)]
    emax: Option<f64>,

    /// Concentration (mg/L) producing half of the maximal effect
    #[arg(long)]
    ec50: Option<f64>,

    /// Number of time points over the simulated 12 h
    #[arg(long)]
    points: Option<usize>,

    /// Write time, concentration and effect series to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the annotated effect chart description to this JSON file
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let (status, message) = exit_code(&err);
            eprintln!("{message}");
            ExitCode::from(status)
        }
    }
}

/// Exit status and user-facing message for a failed run
fn exit_code(err: &anyhow::Error) -> (u8, String) {
    match err.downcast_ref::<CaffsimError>() {
        Some(e) if e.is_invalid_input() => {
            tracing::debug!(error = %e, "rejected input");
            (STATUS_REJECTED, INPUT_ERROR.to_string())
        }
        Some(e) if e.is_invalid_domain() => (STATUS_REJECTED, format!("error: {e}")),
        _ => (STATUS_FAILED, format!("error: {err:#}")),
    }
}

/// Simulate, write the requested files and return the text to print
///
/// Nothing is printed here, so a failed file write leaves stdout empty.
fn run(cli: &Cli) -> Result<String> {
    let request: SimulationRequest = cli.input.parse()?;
    let options = load_options(cli)?;

    let result = simulate(&request, &options)?;
    let data = ReportData::new(&result, &options);

    let output = if cli.json {
        let mut buf = Vec::new();
        export::write_json(&data, &mut buf)?;
        String::from_utf8(buf)?.trim_end().to_string()
    } else {
        data.report().to_string()
    };

    if let Some(path) = &cli.csv {
        export::write_series_csv_file(&result, path)
            .with_context(|| format!("writing series to {}", path.display()))?;
    }
    if let Some(path) = &cli.chart {
        export::write_json_file(&ChartSpec::new(&result, &options), path)
            .with_context(|| format!("writing chart to {}", path.display()))?;
    }
    Ok(output)
}

fn load_options(cli: &Cli) -> Result<SimulationOptions> {
    let mut options = match &cli.config {
        Some(path) => SimulationOptions::from_json_file(path)
            .with_context(|| format!("reading options from {}", path.display()))?,
        None => SimulationOptions::default(),
    };
    if let Some(emax) = cli.emax {
        options = options.with_emax(emax);
    }
    if let Some(ec50) = cli.ec50 {
        options = options.with_ec50(ec50);
    }
    if let Some(points) = cli.points {
        options = options.with_points(points);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("caffsim").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("caffsim-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn malformed_input_gets_the_generic_message() {
        let err = run(&cli(&["(20, 60)"])).unwrap_err();
        let (status, message) = exit_code(&err);
        assert_eq!(status, 2);
        assert_eq!(message, INPUT_ERROR);
    }

    #[test]
    fn out_of_domain_input_reports_the_reason() {
        let err = run(&cli(&["(90, 60, 3, 150)"])).unwrap_err();
        let (status, message) = exit_code(&err);
        assert_eq!(status, 2);
        assert!(message.starts_with("error: Invalid age = 90"), "{message}");
    }

    #[test]
    fn other_failures_exit_with_one() {
        let err = run(&cli(&["(20, 60, 3, 150)", "--config", "/nonexistent/caffsim.json"]))
            .unwrap_err();
        let (status, message) = exit_code(&err);
        assert_eq!(status, 1);
        assert!(message.starts_with("error: reading options from /nonexistent/caffsim.json: "));
        // the io error is printed once, not repeated as its own source
        assert_eq!(message.matches("os error").count(), 1, "{message}");
    }

    #[test]
    fn flags_override_config_file_values() {
        let dir = scratch_dir("override");
        let path = dir.join("options.json");
        std::fs::write(&path, r#"{ "parameters": { "emax": 1.5, "ec50": 2.5 }, "grid": { "points": 50 } }"#)
            .unwrap();
        let path_arg = path.to_str().unwrap();

        let options = load_options(&cli(&["(20, 60, 3, 150)", "--config", path_arg])).unwrap();
        assert_eq!(options.parameters, ModelParameters::new(1.5, 2.5));
        assert_eq!(options.grid.points, 50);

        let options = load_options(&cli(&[
            "(20, 60, 3, 150)",
            "--config",
            path_arg,
            "--ec50",
            "3.5",
        ]))
        .unwrap();
        assert_eq!(options.parameters, ModelParameters::new(1.5, 3.5));
        assert_eq!(options.grid.points, 50);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn successful_run_renders_report_and_files() {
        let dir = scratch_dir("files");
        let csv = dir.join("series.csv");
        let chart = dir.join("chart.json");

        let output = run(&cli(&[
            "(20, 60, 3, 150)",
            "--points",
            "20",
            "--csv",
            csv.to_str().unwrap(),
            "--chart",
            chart.to_str().unwrap(),
        ]))
        .unwrap();
        assert!(output.contains("Half-life (t½):     5.50 h"));
        assert_eq!(std::fs::read_to_string(&csv).unwrap().lines().count(), 21);
        let written: ChartSpec = serde_json::from_str(&std::fs::read_to_string(&chart).unwrap()).unwrap();
        assert_eq!(written.effect.points.len(), 20);

        let json = run(&cli(&["(20, 60, 3, 150)", "--json"])).unwrap();
        let data: ReportData = serde_json::from_str(&json).unwrap();
        assert_eq!(data.intake.dose(), 150.0);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_file_write_returns_no_output() {
        let result = run(&cli(&["(20, 60, 3, 150)", "--csv", "/nonexistent/dir/series.csv"]));
        assert!(result.is_err());
    }
}
