//! Compound statement headers.
//!
//! With `force_parens_in_statements` every header operand except a `case`
//! pattern is parenthesized, and anything else has no viable alternative.
//! Without it a header may still be parenthesized: `if (a) {` keeps the
//! group, while `for (x in xs) {`, `with (open(p) as f) {` and
//! `except (E as e) {` drop parentheses that are not valid Python around the
//! whole header.

use crate::ast::{Expr, Pattern, WithItem};
use crate::parser::core::{PResult, Parser};
use crate::parser::cst::{SyntaxKind, token_sets};
use crate::primary::pattern_group_contents;

impl Parser<'_> {
    /// Condition of `if`, `elif` and `while`.
    pub(super) fn parse_condition(&mut self) -> PResult<Expr> {
        if self.options.force_parens_in_statements {
            return self.parse_forced_condition();
        }
        let open = if self.currently_is(SyntaxKind::KwNot) {
            self.pos + 1
        } else {
            self.pos
        };
        if self.stream.kind(open) == SyntaxKind::ParenOpen
            && let Some(close) = self.stream.closer(open)
            && !self.condition_continues_at(close + 1)
        {
            return self.parse_forced_condition();
        }
        self.parse_named_expression()
    }

    /// `'not'? '(' named_expression ')'`
    fn parse_forced_condition(&mut self) -> PResult<Expr> {
        let negated = self.eat_token(SyntaxKind::KwNot);
        if !self.currently_is(SyntaxKind::ParenOpen) {
            return Err(self.no_viable_alternative());
        }
        let group = self.parse_group()?;
        if negated {
            return Ok(Expr::Not(Box::new(group)));
        }
        Ok(group)
    }

    /// The parenthesized prefix of a header is only part of a longer
    /// expression, as in `if (a) or b {`. `pos` is the token after the `)`.
    fn condition_continues_at(&self, pos: usize) -> bool {
        let kind = self.stream.kind(pos);
        let line_break =
            !self.options.require_semicolons && self.stream.line_terminator_ahead(pos);
        if line_break && kind != SyntaxKind::Dot {
            return false;
        }
        token_sets::CONDITION_CONTINUATION.contains(kind)
            || (kind == SyntaxKind::KwNot && self.stream.kind(pos + 1) == SyntaxKind::KwIn)
    }

    /// The header starts with a group holding `kind` at its top level, and
    /// the token after the group is not one of `then`. Such a group cannot be
    /// an expression, so its parentheses wrap the whole header.
    fn header_group_holds(&self, kind: SyntaxKind, then: &[SyntaxKind]) -> bool {
        if !self.currently_is(SyntaxKind::ParenOpen) {
            return false;
        }
        let Some(close) = self.stream.closer(self.pos) else {
            return false;
        };
        let holds = self
            .stream
            .scan_level(self.pos + 1, close, |_, k| (k == kind).then_some(()))
            .is_some();
        holds && !then.contains(&self.stream.kind(close + 1))
    }

    /// `star_targets 'in' star_expressions`, optionally in one pair of
    /// parentheses.
    pub(super) fn parse_for_header(&mut self) -> PResult<(Expr, Expr)> {
        let parenthesized = |p: &mut Self| -> PResult<_> {
            p.expect_header_paren()?;
            let header = p.with_matmul(Self::parse_for_header_plain)?;
            p.expect(SyntaxKind::ParenClose, "')'")?;
            Ok(header)
        };
        if self.options.force_parens_in_statements
            || self.header_group_holds(SyntaxKind::KwIn, &[SyntaxKind::KwIn])
        {
            return parenthesized(self);
        }
        self.parse_for_header_plain()
    }

    fn parse_for_header_plain(&mut self) -> PResult<(Expr, Expr)> {
        let target = self.parse_target_list()?;
        self.expect(SyntaxKind::KwIn, "'in'")?;
        let iter = self.parse_star_expressions()?;
        Ok((target, iter))
    }

    pub(super) fn parse_with_header(&mut self) -> PResult<Vec<WithItem>> {
        let parenthesized = |p: &mut Self| -> PResult<_> {
            p.expect_header_paren()?;
            let items = p.with_matmul(|p| {
                let mut items = vec![p.parse_with_item()?];
                while p.eat_token(SyntaxKind::Comma) {
                    if p.currently_is(SyntaxKind::ParenClose) {
                        break;
                    }
                    items.push(p.parse_with_item()?);
                }
                Ok(items)
            })?;
            p.expect(SyntaxKind::ParenClose, "')'")?;
            Ok(items)
        };
        if self.options.force_parens_in_statements
            || self.header_group_holds(SyntaxKind::KwAs, &[SyntaxKind::KwAs])
        {
            return parenthesized(self);
        }
        let mut items = vec![self.parse_with_item()?];
        while self.eat_token(SyntaxKind::Comma) {
            items.push(self.parse_with_item()?);
        }
        Ok(items)
    }

    /// `expression ('as' star_target)?`
    fn parse_with_item(&mut self) -> PResult<WithItem> {
        let context = self.parse_expression()?;
        let target = if self.eat_token(SyntaxKind::KwAs) {
            Some(self.parse_target()?)
        } else {
            None
        };
        Ok(WithItem { context, target })
    }

    /// `(expression ('as' NAME)?)?` after `except`.
    pub(super) fn parse_except_header(&mut self) -> PResult<(Option<Expr>, Option<String>)> {
        let parenthesized = |p: &mut Self| -> PResult<_> {
            p.expect_header_paren()?;
            let header = p.with_matmul(Self::parse_except_header_plain)?;
            p.expect(SyntaxKind::ParenClose, "')'")?;
            Ok(header)
        };

        if self.options.force_parens_in_statements {
            if self.currently_is(SyntaxKind::ParenOpen) {
                let (kind, name) = parenthesized(self)?;
                return Ok((Some(kind), name));
            }
            if self.currently_is_one_of(token_sets::EXPR_FIRST) && !self.at_line_break() {
                return Err(self.no_viable_alternative());
            }
            return Ok((None, None));
        }

        if !self.currently_is_one_of(token_sets::EXPR_FIRST)
            || self.currently_is(SyntaxKind::BraceOpen)
        {
            return Ok((None, None));
        }
        let (kind, name) = if self.header_group_holds(SyntaxKind::KwAs, &[SyntaxKind::KwAs]) {
            parenthesized(self)?
        } else {
            self.parse_except_header_plain()?
        };
        Ok((Some(kind), name))
    }

    fn parse_except_header_plain(&mut self) -> PResult<(Expr, Option<String>)> {
        let kind = self.parse_expression()?;
        let name = if self.eat_token(SyntaxKind::KwAs) {
            Some(self.expect_name("name")?)
        } else {
            None
        };
        Ok((kind, name))
    }

    /// Subject of `match`: a group when parentheses are forced, otherwise
    /// `star_named_expressions`.
    pub(super) fn parse_match_subject(&mut self) -> PResult<Expr> {
        if self.options.force_parens_in_statements {
            if !self.currently_is(SyntaxKind::ParenOpen) {
                return Err(self.no_viable_alternative());
            }
            return self.parse_group();
        }
        let first = self.parse_star_named_expression()?;
        if !self.currently_is(SyntaxKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat_token(SyntaxKind::Comma) {
            if !self.at_expression_start() || self.currently_is(SyntaxKind::BraceOpen) {
                break;
            }
            elts.push(self.parse_star_named_expression()?);
        }
        Ok(Expr::Tuple {
            elts,
            parenthesized: false,
        })
    }

    /// Pattern of a `case`. With forced parentheses a pattern that is one
    /// group spanning the whole header loses them: `case (a, b)` becomes the
    /// open sequence `case a, b`. Any other pattern is taken as written.
    pub(super) fn parse_case_pattern(&mut self) -> PResult<Pattern> {
        if self.options.force_parens_in_statements && self.case_group_is_whole_pattern() {
            return Ok(pattern_group_contents(self.parse_closed_pattern()?));
        }
        self.parse_patterns()
    }

    fn case_group_is_whole_pattern(&self) -> bool {
        if !self.currently_is(SyntaxKind::ParenOpen) {
            return false;
        }
        let Some(close) = self.stream.closer(self.pos) else {
            return false;
        };
        let after = close + 1;
        match self.stream.kind(after) {
            SyntaxKind::BraceOpen | SyntaxKind::Colon | SyntaxKind::KwIf => true,
            _ => self.stream.line_terminator_ahead(after),
        }
    }

    fn expect_header_paren(&mut self) -> PResult<()> {
        if !self.eat_token(SyntaxKind::ParenOpen) {
            return Err(self.no_viable_alternative());
        }
        Ok(())
    }
}
