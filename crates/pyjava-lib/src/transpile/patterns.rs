use crate::ast::{Pattern, PatternLiteral, SequenceKind};

use super::Transpiler;

impl Transpiler {
    pub(super) fn pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Wildcard => {
                self.w().append_char('_');
            }
            Pattern::Capture(name) => {
                self.w().append(name);
            }
            Pattern::Value(parts) => {
                self.w().append(&parts.join("."));
            }
            Pattern::Literal(literal) => self.pattern_literal(literal),
            Pattern::Group(inner) => {
                self.w().append_char('(');
                self.pattern(inner);
                self.w().append_char(')');
            }
            Pattern::Sequence {
                kind,
                elts,
                trailing_comma,
            } => {
                let (open, close) = match kind {
                    SequenceKind::Open => ("", ""),
                    SequenceKind::Tuple => ("(", ")"),
                    SequenceKind::List => ("[", "]"),
                };
                // without the comma `(a)` and a lone open `a` are not sequences
                let comma = elts.len() == 1
                    && (*trailing_comma || *kind != SequenceKind::List);
                self.w().append(open);
                self.comma_separated(elts, Self::pattern);
                if comma {
                    self.w().append_char(',');
                }
                self.w().append(close);
            }
            Pattern::Star(name) => {
                self.w()
                    .append_char('*')
                    .append(name.as_deref().unwrap_or("_"));
            }
            Pattern::Mapping { items, rest } => {
                if items.is_empty() && rest.is_none() {
                    self.w().append("{}");
                    return;
                }
                self.w().append("{ ");
                self.comma_separated(items, |t, (key, value)| {
                    t.pattern(key);
                    t.w().append(": ");
                    t.pattern(value);
                });
                if let Some(rest) = rest {
                    if !items.is_empty() {
                        self.w().append(", ");
                    }
                    self.w().append("**").append(rest);
                }
                self.w().append(" }");
            }
            Pattern::Class {
                cls,
                positional,
                keywords,
            } => {
                self.w().append(&cls.join(".")).append_char('(');
                self.comma_separated(positional, Self::pattern);
                if !positional.is_empty() && !keywords.is_empty() {
                    self.w().append(", ");
                }
                self.comma_separated(keywords, |t, (name, value)| {
                    t.w().append(name).append_char('=');
                    t.pattern(value);
                });
                self.w().append_char(')');
            }
            Pattern::Or(alternatives) => {
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        self.w().append(" | ");
                    }
                    self.pattern(alternative);
                }
            }
            Pattern::As { pattern, name } => {
                self.pattern(pattern);
                self.w().append(" as ").append(name);
            }
        }
    }

    fn pattern_literal(&mut self, literal: &PatternLiteral) {
        let mut w = self.w();
        match literal {
            PatternLiteral::Number { negative, text } => {
                if *negative {
                    w.append_char('-');
                }
                w.append(text);
            }
            PatternLiteral::Complex {
                negative,
                real,
                plus,
                imag,
            } => {
                if *negative {
                    w.append_char('-');
                }
                w.append(real)
                    .append_char(if *plus { '+' } else { '-' })
                    .append(imag);
            }
            PatternLiteral::Strings(parts) => {
                w.append(&parts.join(" "));
            }
            PatternLiteral::None => {
                w.append("None");
            }
            PatternLiteral::True => {
                w.append("True");
            }
            PatternLiteral::False => {
                w.append("False");
            }
        }
    }
}
