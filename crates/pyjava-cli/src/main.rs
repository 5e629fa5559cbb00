#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod cli;
mod commands;
mod error;

use cli::{TranspileParams, build_cli};
use commands::transpile::Outcome;

fn main() {
    let matches = build_cli().get_matches();
    let params = TranspileParams::from_matches(&matches);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(params.log_level().to_string()),
    )
    .init();

    match commands::transpile::run(params.into()) {
        Ok(Outcome::Help) => {
            let _ = build_cli().print_help();
        }
        Ok(Outcome::Finished(report)) => {
            if report.failed > 0 {
                log::info!("{} of {} file(s) failed", report.failed, report.processed);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
