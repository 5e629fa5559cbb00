use std::fs;
use std::path::{Path, PathBuf};

use super::discover::{DEFAULT_INCLUDE, Matchers, discover, is_glob, python_file_name};

fn matchers(include: &[&str], exclude: &[&str]) -> Matchers {
    let owned = |globs: &[&str]| globs.iter().map(|g| g.to_string()).collect::<Vec<_>>();
    Matchers::new(&owned(include), &owned(exclude)).unwrap()
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "pass\n").unwrap();
}

#[test]
fn glob_arguments() {
    assert!(is_glob("**.pyj"));
    assert!(is_glob("src/?.pyj"));
    assert!(!is_glob("src/main.pyj"));
    assert!(!is_glob("src/[draft].pyj"));
}

#[test]
fn python_file_names() {
    assert_eq!(python_file_name("main.pyj"), "main.py");
    assert_eq!(python_file_name("a.b.pyj"), "a.py");
    assert_eq!(python_file_name("README"), "README.py");
}

#[test]
fn double_star_glued_to_text() {
    let m = matchers(&[DEFAULT_INCLUDE], &[]);

    assert!(m.is_selected(Path::new("main.pyj")));
    assert!(m.is_selected(Path::new("./main.pyj")));
    assert!(m.is_selected(Path::new("src/deep/main.pyj")));
    assert!(!m.is_selected(Path::new("main.py")));
}

#[test]
fn single_star_stays_in_component() {
    let m = matchers(&["src/*.pyj"], &[]);

    assert!(m.is_selected(Path::new("src/main.pyj")));
    assert!(!m.is_selected(Path::new("src/deep/main.pyj")));
}

#[test]
fn brackets_are_literal() {
    let m = matchers(&["src/[draft]*.pyj"], &[]);

    assert!(m.is_selected(Path::new("src/[draft]notes.pyj")));
    assert!(!m.is_selected(Path::new("src/dnotes.pyj")));
}

#[test]
fn exclude_wins_over_include() {
    let m = matchers(&["**.pyj"], &["**/vendor/**"]);

    assert!(m.is_selected(Path::new("src/main.pyj")));
    assert!(!m.is_selected(Path::new("src/vendor/lib.pyj")));
}

#[test]
fn walks_directories_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "b.pyj");
    touch(root, "a.pyj");
    touch(root, "notes.txt");
    touch(root, "pkg/mod.helper.pyj");

    let out = PathBuf::from("out");
    let jobs = discover(&[root.to_path_buf()], &matchers(&[DEFAULT_INCLUDE], &[]), &out);

    let pairs: Vec<_> = jobs
        .iter()
        .map(|job| {
            let source = job.source.strip_prefix(root).unwrap().to_path_buf();
            (source, job.output.clone())
        })
        .collect();
    assert_eq!(
        pairs,
        [
            (PathBuf::from("a.pyj"), PathBuf::from("out/a.py")),
            (PathBuf::from("b.pyj"), PathBuf::from("out/b.py")),
            (PathBuf::from("pkg/mod.helper.pyj"), PathBuf::from("out/pkg/mod.py")),
        ]
    );
}

#[test]
fn excluded_directories_are_pruned() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "main.pyj");
    touch(root, "build/generated.pyj");
    touch(root, "src/build/nested.pyj");

    let jobs = discover(
        &[root.to_path_buf()],
        &matchers(&[DEFAULT_INCLUDE], &["**/build"]),
        Path::new("."),
    );

    let sources: Vec<_> = jobs
        .iter()
        .map(|job| job.source.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    assert_eq!(sources, [PathBuf::from("main.pyj")]);
}

#[test]
fn explicit_file_outside_cwd_keeps_bare_name() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "lib/tool.pyj");
    let file = dir.path().join("lib/tool.pyj");

    let jobs = discover(
        &[file.clone()],
        &matchers(&[DEFAULT_INCLUDE], &[]),
        Path::new("out"),
    );

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].source, file);
    assert_eq!(jobs[0].output, PathBuf::from("out/tool.py"));
}

#[test]
fn explicit_file_not_matching_include_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "script.txt");

    let jobs = discover(
        &[dir.path().join("script.txt")],
        &matchers(&[DEFAULT_INCLUDE], &[]),
        Path::new("."),
    );
    assert!(jobs.is_empty());
}
