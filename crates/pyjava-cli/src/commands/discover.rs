//! Input discovery: glob matching, directory walking and output paths.
//!
//! Globs follow the usual shell flavour: `*` and `?` stay within one path
//! component, `**` crosses directories, and `[`/`]` are literal characters.
//! Paths are matched as they are visited, with any leading `./` removed.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::error::CliError;

pub const DEFAULT_INCLUDE: &str = "**.pyj";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// An input argument with `*` or `?` is an include glob rather than a path.
pub fn is_glob(arg: &str) -> bool {
    arg.contains(['*', '?'])
}

pub fn compile_glob(glob: &str) -> Result<Pattern, CliError> {
    Pattern::new(&translate_glob(glob)).map_err(|source| CliError::InvalidGlob {
        pattern: glob.to_owned(),
        source,
    })
}

/// Escapes brackets and turns a `**` glued to other text into whole
/// components: `**.pyj` becomes `**/*.pyj`.
fn translate_glob(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '[' => out.push_str("[[]"),
            ']' => out.push_str("[]]"),
            '*' if chars.get(i + 1) == Some(&'*') => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push_str("*/");
                }
                out.push_str("**");
                i += 2;
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                if chars.get(i).is_some_and(|&c| c != '/') {
                    out.push_str("/*");
                }
                continue;
            }
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Path text used for matching: `/`-separated, without `.` components.
fn match_text(path: &Path) -> String {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .replace("//", "/")
}

pub struct Matchers {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl Matchers {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, CliError> {
        Ok(Self {
            include: include.iter().map(|g| compile_glob(g)).collect::<Result<_, _>>()?,
            exclude: exclude.iter().map(|g| compile_glob(g)).collect::<Result<_, _>>()?,
        })
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let text = match_text(path);
        self.exclude.iter().any(|p| p.matches_with(&text, MATCH_OPTIONS))
    }

    /// Matches an include glob and no exclude glob.
    pub fn is_selected(&self, path: &Path) -> bool {
        let text = match_text(path);
        self.include.iter().any(|p| p.matches_with(&text, MATCH_OPTIONS))
            && !self.is_excluded(path)
    }
}

/// One source file and the file its Python goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// `a.b.pyj` becomes `a.py`.
pub fn python_file_name(name: &str) -> String {
    match name.find('.') {
        Some(i) => format!("{}.py", &name[..i]),
        None => format!("{name}.py"),
    }
}

fn output_path(output_dir: &Path, relative: &Path) -> PathBuf {
    let name = relative
        .file_name()
        .map(|n| python_file_name(&n.to_string_lossy()))
        .unwrap_or_default();
    output_dir.join(relative).with_file_name(name)
}

/// Location of an explicit file input below the output directory: its path
/// relative to the working directory when it has one, its bare name otherwise.
fn relative_to_cwd(file: &Path) -> PathBuf {
    let relative = if file.is_absolute() {
        std::env::current_dir()
            .ok()
            .and_then(|cwd| file.strip_prefix(cwd).ok().map(Path::to_path_buf))
    } else {
        Some(file.to_path_buf())
    };
    let descends = |path: &Path| {
        path.components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    };
    match relative {
        Some(path) if descends(&path) => path
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect(),
        _ => file.file_name().map(PathBuf::from).unwrap_or_default(),
    }
}

/// Selected files of every input, in input order; directories are walked
/// recursively in file-name order and excluded directories are pruned.
pub fn discover(inputs: &[PathBuf], matchers: &Matchers, output_dir: &Path) -> Vec<Job> {
    let mut jobs = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            if matchers.is_selected(input) {
                jobs.push(Job {
                    source: input.clone(),
                    output: output_path(output_dir, &relative_to_cwd(input)),
                });
            }
            continue;
        }

        let walker = WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && matchers.is_excluded(e.path())));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !matchers.is_selected(entry.path()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(input) else {
                continue;
            };
            log::debug!("selected {}", entry.path().display());
            jobs.push(Job {
                source: entry.path().to_path_buf(),
                output: output_path(output_dir, relative),
            });
        }
    }
    jobs
}
