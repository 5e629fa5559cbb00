//! User-facing error reports.
//!
//! Processing stops at the first error, so a report usually holds a single
//! message. The collection exists so that drivers can gather the failures of
//! several units and print them through one [`DiagnosticsPrinter`].

mod printer;

#[cfg(test)]
mod tests;

use std::fmt;

use rowan::TextRange;

pub use printer::DiagnosticsPrinter;

use crate::Error;

/// A secondary location, e.g. the start of the rule that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub range: TextRange,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// `None` for failures without a source position.
    pub range: Option<TextRange>,
    /// Text next to the primary marker.
    pub label: Option<String>,
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, range: Option<TextRange>) -> Self {
        Self {
            message: message.into(),
            range,
            label: None,
            related: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn related_to(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related.push(RelatedInfo {
            range,
            message: message.into(),
        });
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error")?;
        if let Some(range) = self.range {
            write!(f, " at {}..{}", u32::from(range.start()), u32::from(range.end()))?;
        }
        write!(f, ": {}", self.message)
    }
}

impl From<&Error> for Diagnostic {
    fn from(error: &Error) -> Self {
        match error {
            Error::Lex { message, span } => Diagnostic::new(message.clone(), Some(*span)),
            Error::Parse(err) => {
                let diagnostic = Diagnostic::new(err.message.clone(), Some(err.span))
                    .label(format!("found {}", err.found_description()));
                match (err.rule, err.rule_span) {
                    (Some(rule), Some(rule_span)) if rule_span.start() != err.span.start() => {
                        diagnostic.related_to(format!("in {rule}"), rule_span)
                    }
                    _ => diagnostic,
                }
            }
            Error::RecursionLimitExceeded | Error::Render(_) | Error::Thread(_) => {
                Diagnostic::new(error.to_string(), None)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.messages.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl From<&Error> for Diagnostics {
    fn from(error: &Error) -> Self {
        Self {
            messages: vec![Diagnostic::from(error)],
        }
    }
}
