use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pyjava_lib::Options;

use super::config::{Config, resolve_config_path};
use super::discover::{DEFAULT_INCLUDE, Job, Matchers, discover, is_glob};
use crate::error::CliError;

pub struct TranspileArgs {
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub inputs: Vec<String>,
    pub color: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub processed: usize,
    pub failed: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do: no config file and no inputs.
    Help,
    Finished(Report),
}

pub fn run(args: TranspileArgs) -> Result<Outcome, CliError> {
    let stderr = io::stderr();
    run_with(args, &mut stderr.lock())
}

/// Like [`run`], with per-file failures written to `err`.
pub fn run_with(args: TranspileArgs, err: &mut impl Write) -> Result<Outcome, CliError> {
    let mut include = Vec::new();
    let mut inputs: Vec<PathBuf> = Vec::new();
    for arg in &args.inputs {
        if is_glob(arg) {
            include.push(arg.clone());
            continue;
        }
        let path = PathBuf::from(arg);
        if !path.exists() {
            return Err(CliError::NotFound(arg.clone()));
        }
        push_unique(&mut inputs, path)?;
    }

    let output_dir = prepare_output_dir(args.output.as_deref())?;

    let config = match resolve_config_path(args.config.as_deref())? {
        Some(path) => Config::load(&path)?,
        None if inputs.is_empty() && include.is_empty() => return Ok(Outcome::Help),
        None => Config::default(),
    };
    include.extend(config.files.include.iter().cloned());

    if inputs.is_empty() {
        inputs.push(PathBuf::from("."));
    }
    if include.is_empty() {
        include.push(DEFAULT_INCLUDE.to_owned());
    }

    let matchers = Matchers::new(&include, &config.files.exclude)?;
    let options = config.options();
    let jobs = discover(&inputs, &matchers, &output_dir);
    log::info!("{} file(s) selected", jobs.len());

    let mut report = Report::default();
    for job in &jobs {
        report.processed += 1;
        if !process_file(job, &options, args.color, err) {
            report.failed += 1;
        }
    }
    Ok(Outcome::Finished(report))
}

/// Inputs naming the same file or directory are kept once.
fn push_unique(inputs: &mut Vec<PathBuf>, path: PathBuf) -> Result<(), CliError> {
    let canonical = path.canonicalize().map_err(|e| CliError::io(&path, e))?;
    for existing in inputs.iter() {
        if existing.canonicalize().ok().as_ref() == Some(&canonical) {
            log::debug!("ignoring duplicate input {}", path.display());
            return Ok(());
        }
    }
    inputs.push(path);
    Ok(())
}

fn prepare_output_dir(output: Option<&Path>) -> Result<PathBuf, CliError> {
    let Some(dir) = output else {
        return Ok(PathBuf::from("."));
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| CliError::io(dir, e))?;
    } else if !dir.is_dir() {
        return Err(CliError::NotADirectory(dir.to_path_buf()));
    }
    Ok(dir.to_path_buf())
}

/// Transpiles one file. The output file is created only after the whole
/// source transpiled.
pub fn process_file(job: &Job, options: &Options, color: bool, err: &mut impl Write) -> bool {
    let path = job.source.display().to_string();
    let source = match fs::read_to_string(&job.source) {
        Ok(source) => source,
        Err(e) => {
            report_failure(err, &format!("Failed to process file {path}:"), &e.to_string());
            return false;
        }
    };

    let python = match pyjava_lib::transpile(&source, options) {
        Ok(python) => python,
        Err(e) => {
            let rendered = e.render(&source, &path, color);
            report_failure(err, &format!("Failed to process file {path}:"), &rendered);
            return false;
        }
    };

    if let Err(e) = write_output(&job.output, &python) {
        let header = format!("Failed to write to file {}:", job.output.display());
        report_failure(err, &header, &e.to_string());
        return false;
    }
    log::info!("{} -> {}", path, job.output.display());
    true
}

fn write_output(output: &Path, python: &str) -> io::Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, python)
}

// Failures of stderr itself are ignored.
fn report_failure(err: &mut impl Write, header: &str, detail: &str) {
    let _ = writeln!(err, "{header}");
    let _ = writeln!(err, "{}", detail.trim_end());
}
