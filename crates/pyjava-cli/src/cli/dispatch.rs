//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use log::LevelFilter;

use super::ColorChoice;
use crate::commands::transpile::TranspileArgs;

pub struct TranspileParams {
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub inputs: Vec<String>,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl TranspileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            config: m.get_one::<PathBuf>("config").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            inputs: m
                .get_many::<String>("inputs")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }

    /// Log level for `-v` repetitions; `RUST_LOG` still overrides it.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

impl From<TranspileParams> for TranspileArgs {
    fn from(p: TranspileParams) -> Self {
        Self {
            config: p.config,
            output: p.output,
            inputs: p.inputs,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
