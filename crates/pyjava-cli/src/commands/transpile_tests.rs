use std::fs;
use std::path::{Path, PathBuf};

use super::transpile::{Outcome, Report, TranspileArgs, run_with};
use crate::error::CliError;

const VALID: &str = "if (x < 10) print(x);\n";
const VALID_PYTHON: &str = "if (x < 10):\n    print(x)\n";
const INVALID: &str = "x = 1 y = 2\n";

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        ws.write("pyjavaconfig.json", "{}");
        ws
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn write(&self, relative: &str, text: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn args(&self, inputs: &[&Path]) -> TranspileArgs {
        TranspileArgs {
            config: Some(self.path("pyjavaconfig.json")),
            output: Some(self.path("out")),
            inputs: inputs.iter().map(|p| p.display().to_string()).collect(),
            color: false,
        }
    }

    fn run(&self, args: TranspileArgs) -> (Result<Outcome, CliError>, String) {
        let mut stderr = Vec::new();
        let outcome = run_with(args, &mut stderr);
        (outcome, String::from_utf8(stderr).unwrap())
    }
}

fn finished(processed: usize, failed: usize) -> Outcome {
    Outcome::Finished(Report { processed, failed })
}

#[test]
fn transpiles_directory_tree() {
    let ws = Workspace::new();
    ws.write("src/main.pyj", VALID);
    ws.write("src/pkg/util.pyj", "def f() {\n    return 1\n}\n");
    ws.write("src/notes.txt", "not pyjava");

    let (outcome, stderr) = ws.run(ws.args(&[&ws.path("src")]));

    assert_eq!(outcome.unwrap(), finished(2, 0));
    assert_eq!(stderr, "");
    assert_eq!(fs::read_to_string(ws.path("out/main.py")).unwrap(), VALID_PYTHON);
    assert!(ws.path("out/pkg/util.py").is_file());
    assert!(!ws.path("out/notes.py").exists());
}

#[test]
fn failures_are_counted_and_reported() {
    let ws = Workspace::new();
    ws.write("src/good.pyj", VALID);
    ws.write("src/bad.pyj", INVALID);

    let (outcome, stderr) = ws.run(ws.args(&[&ws.path("src")]));

    assert_eq!(outcome.unwrap(), finished(2, 1));
    assert!(ws.path("out/good.py").is_file());
    assert!(!ws.path("out/bad.py").exists());

    let bad = ws.path("src/bad.pyj");
    assert!(stderr.starts_with(&format!("Failed to process file {}:\n", bad.display())));
    assert!(stderr.contains("error: expected semicolon or line break"));
    assert!(stderr.contains("found 'y'"));
}

#[test]
fn config_options_reach_the_parser() {
    let ws = Workspace::new();
    ws.write("pyjavaconfig.json", r#"{ "requireSemicolons": true }"#);
    ws.write("src/main.pyj", "x = 1\n");

    let (outcome, _) = ws.run(ws.args(&[&ws.path("src")]));

    assert_eq!(outcome.unwrap(), finished(1, 1));
}

#[test]
fn config_excludes_are_applied() {
    let ws = Workspace::new();
    ws.write("pyjavaconfig.json", r#"{ "files": { "exclude": ["**/generated"] } }"#);
    ws.write("src/main.pyj", VALID);
    ws.write("src/generated/skip.pyj", INVALID);

    let (outcome, _) = ws.run(ws.args(&[&ws.path("src")]));

    assert_eq!(outcome.unwrap(), finished(1, 0));
}

#[test]
fn duplicate_inputs_are_processed_once() {
    let ws = Workspace::new();
    ws.write("src/main.pyj", VALID);

    let src = ws.path("src");
    let again = ws.path("src/../src");
    let (outcome, _) = ws.run(ws.args(&[&src, &again]));

    assert_eq!(outcome.unwrap(), finished(1, 0));
}

#[test]
fn missing_input_stops_the_run() {
    let ws = Workspace::new();

    let (outcome, _) = ws.run(ws.args(&[&ws.path("nope.pyj")]));

    let err = outcome.unwrap_err();
    assert!(matches!(err, CliError::NotFound(_)));
    assert!(err.to_string().starts_with("the system cannot find the path specified: "));
}

#[test]
fn output_must_be_a_directory() {
    let ws = Workspace::new();
    ws.write("src/main.pyj", VALID);
    ws.write("out", "a file");

    let (outcome, _) = ws.run(ws.args(&[&ws.path("src")]));

    assert!(matches!(outcome.unwrap_err(), CliError::NotADirectory(_)));
}

#[test]
fn invalid_config_stops_the_run() {
    let ws = Workspace::new();
    ws.write("pyjavaconfig.json", "true");
    ws.write("src/main.pyj", VALID);

    let (outcome, _) = ws.run(ws.args(&[&ws.path("src")]));

    assert!(matches!(outcome.unwrap_err(), CliError::InvalidConfig(_)));
    assert!(!ws.path("out/main.py").exists());
}

#[test]
fn nothing_to_do_asks_for_help() {
    let args = TranspileArgs {
        config: None,
        output: None,
        inputs: Vec::new(),
        color: false,
    };

    let (outcome, _) = Workspace::new().run(args);

    assert_eq!(outcome.unwrap(), Outcome::Help);
}
