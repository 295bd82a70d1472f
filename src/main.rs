use std::process::ExitCode;

use substrate_nn::{run_experiment, telemetry, ExperimentConfig};
use tracing::{error, info};

// Usage:
//   substrate-nn [experiment.json]
// Without an argument the default experiment runs (10 -> [25, 20] -> 3,
// 2000 frontier samples, 100 epochs). The report is printed to stdout as JSON.
fn main() -> ExitCode {
    telemetry::init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => match ExperimentConfig::load_json(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path, "cannot load experiment config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => ExperimentConfig::default(),
    };

    let report = match run_experiment(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("experiment failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let metrics = &report.substrate_metrics;
    info!(
        final_accuracy = report.final_accuracy,
        scar_steps = metrics.scar_memory_length,
        average_scar_activity = metrics.average_scar_activity,
        substrate_coherence = metrics.substrate_coherence,
        capacity_preserved = metrics.generative_capacity_preserved,
        boosts = report.boosts,
        "experiment complete"
    );

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("cannot serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}
