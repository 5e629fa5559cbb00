//! `case` patterns.

use crate::ast::{Pattern, PatternLiteral, SequenceKind};
use crate::parser::core::{PResult, Parser};
use crate::parser::cst::SyntaxKind;
use crate::parser::lexer::{is_imaginary_number, is_real_number};

impl Parser<'_> {
    /// Open sequence `a, *rest` or a single pattern.
    pub(super) fn parse_patterns(&mut self) -> PResult<Pattern> {
        let first = self.parse_maybe_star_pattern()?;
        if !self.currently_is(SyntaxKind::Comma) {
            return Ok(first);
        }
        let (elts, trailing_comma) =
            self.parse_pattern_elements(first, |p| !p.at_pattern_start())?;
        Ok(Pattern::Sequence {
            kind: SequenceKind::Open,
            elts,
            trailing_comma,
        })
    }

    /// `{` is left out: after an open sequence it opens the case body.
    fn at_pattern_start(&self) -> bool {
        matches!(
            self.current(),
            SyntaxKind::Minus
                | SyntaxKind::Number
                | SyntaxKind::Str
                | SyntaxKind::KwNone
                | SyntaxKind::KwTrue
                | SyntaxKind::KwFalse
                | SyntaxKind::ParenOpen
                | SyntaxKind::BracketOpen
                | SyntaxKind::Name
                | SyntaxKind::Star
        )
    }

    /// Elements after `first` while commas follow; `done` is checked after
    /// each comma.
    fn parse_pattern_elements(
        &mut self,
        first: Pattern,
        done: impl Fn(&Self) -> bool,
    ) -> PResult<(Vec<Pattern>, bool)> {
        let mut elts = vec![first];
        let mut trailing_comma = false;
        while self.eat_token(SyntaxKind::Comma) {
            if done(self) {
                trailing_comma = true;
                break;
            }
            elts.push(self.parse_maybe_star_pattern()?);
        }
        Ok((elts, trailing_comma))
    }

    fn parse_maybe_star_pattern(&mut self) -> PResult<Pattern> {
        if !self.eat_token(SyntaxKind::Star) {
            return self.parse_pattern();
        }
        let name = self.expect_name("capture name")?;
        if name == "_" {
            return Ok(Pattern::Star(None));
        }
        Ok(Pattern::Star(Some(name)))
    }

    /// `or_pattern ('as' NAME)?`
    fn parse_pattern(&mut self) -> PResult<Pattern> {
        let pattern = self.parse_or_pattern()?;
        if !self.eat_token(SyntaxKind::KwAs) {
            return Ok(pattern);
        }
        let name = self.expect_name("capture name")?;
        Ok(Pattern::As {
            pattern: Box::new(pattern),
            name,
        })
    }

    fn parse_or_pattern(&mut self) -> PResult<Pattern> {
        let first = self.parse_closed_pattern()?;
        if !self.currently_is(SyntaxKind::Pipe) {
            return Ok(first);
        }
        let mut alternatives = vec![first];
        while self.eat_token(SyntaxKind::Pipe) {
            alternatives.push(self.parse_closed_pattern()?);
        }
        Ok(Pattern::Or(alternatives))
    }

    pub(super) fn parse_closed_pattern(&mut self) -> PResult<Pattern> {
        self.nested(|p| match p.current() {
            SyntaxKind::Minus | SyntaxKind::Number => p.parse_number_pattern(),
            SyntaxKind::Str => Ok(Pattern::Literal(PatternLiteral::Strings(
                p.parse_string_parts(),
            ))),
            SyntaxKind::KwNone => p.parse_keyword_literal(PatternLiteral::None),
            SyntaxKind::KwTrue => p.parse_keyword_literal(PatternLiteral::True),
            SyntaxKind::KwFalse => p.parse_keyword_literal(PatternLiteral::False),
            SyntaxKind::ParenOpen => p.parse_paren_pattern(),
            SyntaxKind::BracketOpen => p.parse_list_pattern(),
            SyntaxKind::BraceOpen => p.parse_mapping_pattern(),
            SyntaxKind::Name => p.parse_name_pattern(),
            _ => Err(p.error("expected pattern")),
        })
    }

    fn parse_keyword_literal(&mut self, literal: PatternLiteral) -> PResult<Pattern> {
        self.bump();
        Ok(Pattern::Literal(literal))
    }

    /// `-? NUMBER` or a complex literal `-? REAL ('+' | '-') IMAG`.
    fn parse_number_pattern(&mut self) -> PResult<Pattern> {
        let negative = self.eat_token(SyntaxKind::Minus);
        if !self.currently_is(SyntaxKind::Number) {
            return Err(self.error("expected number"));
        }
        let text = self.bump().to_owned();

        let sign = matches!(self.current(), SyntaxKind::Plus | SyntaxKind::Minus);
        if is_real_number(&text)
            && sign
            && self.next_is(SyntaxKind::Number)
            && is_imaginary_number(self.nth_text(1))
        {
            let plus = self.currently_is(SyntaxKind::Plus);
            self.bump();
            let imag = self.bump().to_owned();
            return Ok(Pattern::Literal(PatternLiteral::Complex {
                negative,
                real: text,
                plus,
                imag,
            }));
        }
        Ok(Pattern::Literal(PatternLiteral::Number { negative, text }))
    }

    /// Capture, wildcard, dotted value or class pattern.
    fn parse_name_pattern(&mut self) -> PResult<Pattern> {
        let first = self.bump().to_owned();
        if !self.currently_is(SyntaxKind::Dot) && !self.currently_is(SyntaxKind::ParenOpen) {
            if first == "_" {
                return Ok(Pattern::Wildcard);
            }
            return Ok(Pattern::Capture(first));
        }

        let mut cls = vec![first];
        while self.eat_token(SyntaxKind::Dot) {
            cls.push(self.expect_name("name")?);
        }
        if !self.currently_is(SyntaxKind::ParenOpen) {
            return Ok(Pattern::Value(cls));
        }
        self.parse_class_pattern(cls)
    }

    fn parse_class_pattern(&mut self, cls: Vec<String>) -> PResult<Pattern> {
        self.assert_current(SyntaxKind::ParenOpen);
        self.bump();

        let mut positional = Vec::new();
        let mut keywords = Vec::new();
        while !self.currently_is(SyntaxKind::ParenClose) {
            if self.currently_is(SyntaxKind::Name) && self.next_is(SyntaxKind::Equals) {
                let name = self.bump().to_owned();
                self.bump();
                keywords.push((name, self.parse_pattern()?));
            } else {
                if !keywords.is_empty() {
                    return Err(self.error("positional pattern follows keyword pattern"));
                }
                positional.push(self.parse_pattern()?);
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::ParenClose, "')'")?;

        Ok(Pattern::Class {
            cls,
            positional,
            keywords,
        })
    }

    /// `(p)` is a group, `()` and `(p,)` are tuples.
    fn parse_paren_pattern(&mut self) -> PResult<Pattern> {
        self.assert_current(SyntaxKind::ParenOpen);
        self.bump();
        if self.eat_token(SyntaxKind::ParenClose) {
            return Ok(Pattern::Sequence {
                kind: SequenceKind::Tuple,
                elts: Vec::new(),
                trailing_comma: false,
            });
        }

        let first = self.parse_maybe_star_pattern()?;
        if self.eat_token(SyntaxKind::ParenClose) {
            if matches!(first, Pattern::Star(_)) {
                return Ok(Pattern::Sequence {
                    kind: SequenceKind::Tuple,
                    elts: vec![first],
                    trailing_comma: false,
                });
            }
            return Ok(Pattern::Group(Box::new(first)));
        }

        let (elts, trailing_comma) =
            self.parse_pattern_elements(first, |p| p.currently_is(SyntaxKind::ParenClose))?;
        self.expect(SyntaxKind::ParenClose, "')'")?;
        Ok(Pattern::Sequence {
            kind: SequenceKind::Tuple,
            elts,
            trailing_comma,
        })
    }

    fn parse_list_pattern(&mut self) -> PResult<Pattern> {
        self.assert_current(SyntaxKind::BracketOpen);
        self.bump();
        if self.eat_token(SyntaxKind::BracketClose) {
            return Ok(Pattern::Sequence {
                kind: SequenceKind::List,
                elts: Vec::new(),
                trailing_comma: false,
            });
        }

        let first = self.parse_maybe_star_pattern()?;
        let (elts, trailing_comma) =
            self.parse_pattern_elements(first, |p| p.currently_is(SyntaxKind::BracketClose))?;
        self.expect(SyntaxKind::BracketClose, "']'")?;
        Ok(Pattern::Sequence {
            kind: SequenceKind::List,
            elts,
            trailing_comma,
        })
    }

    /// `{ key: pattern, ..., **rest }`
    fn parse_mapping_pattern(&mut self) -> PResult<Pattern> {
        self.assert_current(SyntaxKind::BraceOpen);
        self.bump();

        let mut items = Vec::new();
        let mut rest = None;
        while !self.currently_is(SyntaxKind::BraceClose) {
            if self.eat_token(SyntaxKind::DoubleStar) {
                rest = Some(self.expect_name("name")?);
                self.eat_token(SyntaxKind::Comma);
                break;
            }
            let key = self.parse_closed_pattern()?;
            self.expect(SyntaxKind::Colon, "':'")?;
            let value = self.parse_pattern()?;
            items.push((key, value));
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::BraceClose, "'}'")?;

        Ok(Pattern::Mapping { items, rest })
    }
}
