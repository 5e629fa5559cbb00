//! `pyjavaconfig.json` loading.
//!
//! Every key is optional. Unknown keys are ignored; a key with the wrong
//! JSON type fails the whole run.

use std::fs;
use std::path::{Path, PathBuf};

use pyjava_lib::Options;
use serde::Deserialize;

use crate::error::CliError;

pub const DEFAULT_CONFIG_FILE: &str = "pyjavaconfig.json";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub require_semicolons: Option<bool>,
    pub allow_colon_simple_blocks: Option<bool>,
    pub allow_no_colon_simple_blocks: Option<bool>,
    pub force_parens_in_statements: Option<bool>,
    pub force_parens_in_return_yield_raise: Option<bool>,
    pub files: Files,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Files {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, CliError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| CliError::InvalidConfig(e.to_string()))?;
        if !value.is_object() {
            return Err(CliError::InvalidConfig(
                "expected top-level JSON to be an object".to_owned(),
            ));
        }
        serde_json::from_value(value).map_err(|e| CliError::InvalidConfig(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let config = Self::parse(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Grammar options: keys present in the file override the defaults.
    pub fn options(&self) -> Options {
        let mut options = Options::default();
        if let Some(value) = self.require_semicolons {
            options = options.require_semicolons(value);
        }
        if let Some(value) = self.allow_colon_simple_blocks {
            options = options.allow_colon_simple_blocks(value);
        }
        if let Some(value) = self.allow_no_colon_simple_blocks {
            options = options.allow_no_colon_simple_blocks(value);
        }
        if let Some(value) = self.force_parens_in_statements {
            options = options.force_parens_in_statements(value);
        }
        if let Some(value) = self.force_parens_in_return_yield_raise {
            options = options.force_parens_in_return_yield_raise(value);
        }
        options
    }
}

/// The config file to read: the explicit one, which must be a regular file,
/// or `./pyjavaconfig.json` when it exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, CliError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::NotFound(path.display().to_string()));
            }
            path.to_path_buf()
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(None);
            }
            path
        }
    };
    if !path.is_file() {
        return Err(CliError::NotAFile(path));
    }
    Ok(Some(path))
}
