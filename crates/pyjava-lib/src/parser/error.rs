//! Parse cancellation.

use std::fmt;

use rowan::TextRange;

use super::cst::SyntaxKind;

/// The first violated grammar rule or predicate. Parsing stops here; there is
/// no recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Predicate description, e.g. `expected semicolon`.
    pub message: String,
    pub span: TextRange,
    pub found: SyntaxKind,
    pub found_text: String,
    /// Enclosing rules, outermost first.
    pub rules: Vec<&'static str>,
    /// Innermost rule and where it started.
    pub rule: Option<&'static str>,
    pub rule_span: Option<TextRange>,
}

impl ParseError {
    pub fn found_description(&self) -> String {
        match self.found {
            SyntaxKind::Eof => "end of file".to_owned(),
            _ => format!("'{}'", self.found_text),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, found {}", self.message, self.found_description())?;
        if let Some(rule) = self.rule {
            write!(f, " (in {})", rule)?;
        }
        Ok(())
    }
}
