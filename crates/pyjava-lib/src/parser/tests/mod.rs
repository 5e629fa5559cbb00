mod grammar_tests;

use crate::ast::File;
use crate::{Options, parse};

pub(super) fn file(input: &str) -> File {
    file_with(input, Options::default())
}

pub(super) fn file_with(input: &str, options: Options) -> File {
    match parse(input, &options) {
        Ok(file) => file,
        Err(err) => panic!("parse failed: {err}"),
    }
}

/// The rendered parse failure.
pub(super) fn error_with(input: &str, options: Options) -> String {
    match parse(input, &options) {
        Ok(file) => panic!("expected a parse failure, got {file:?}"),
        Err(err) => err.to_string(),
    }
}

pub(super) fn error(input: &str) -> String {
    error_with(input, Options::default())
}
