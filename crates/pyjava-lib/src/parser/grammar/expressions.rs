//! Expression precedence levels, lowest first.
//!
//! When semicolons are optional a line break ends an expression before any
//! binary operator, comparison, call or subscript. Attribute access and the
//! conditional `if`/`else` tail continue across line breaks.

use crate::ast::{BinOp, BoolOp, CmpOp, Expr, UnaryOp};
use crate::parser::core::{PResult, Parser};
use crate::parser::cst::{SyntaxKind, token_sets};

/// Binary operator levels between comparisons and unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Sum,
    Term,
}

impl Level {
    fn tighter(self) -> Option<Level> {
        match self {
            Level::BitOr => Some(Level::BitXor),
            Level::BitXor => Some(Level::BitAnd),
            Level::BitAnd => Some(Level::Shift),
            Level::Shift => Some(Level::Sum),
            Level::Sum => Some(Level::Term),
            Level::Term => None,
        }
    }
}

impl Parser<'_> {
    pub(super) fn at_expression_start(&self) -> bool {
        self.currently_is_one_of(token_sets::EXPR_FIRST) && !self.at_line_break()
    }

    /// Nothing follows a keyword whose operand is optional (`return`,
    /// `yield`, `raise`).
    pub(super) fn at_operand_end(&self) -> bool {
        self.currently_is_one_of(token_sets::OPERAND_END) || self.at_line_break()
    }

    pub(super) fn at_comprehension(&self) -> bool {
        self.currently_is(SyntaxKind::KwFor)
            || (self.currently_is(SyntaxKind::KwAsync) && self.next_is(SyntaxKind::KwFor))
    }

    /// `a, *b, c` is an unparenthesized tuple.
    pub(super) fn parse_star_expressions(&mut self) -> PResult<Expr> {
        let first = self.parse_star_expression()?;
        if !self.currently_is(SyntaxKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat_token(SyntaxKind::Comma) {
            if !self.at_expression_start() {
                break;
            }
            elts.push(self.parse_star_expression()?);
        }
        Ok(Expr::Tuple {
            elts,
            parenthesized: false,
        })
    }

    fn parse_star_expression(&mut self) -> PResult<Expr> {
        if self.eat_token(SyntaxKind::Star) {
            return Ok(Expr::Starred(Box::new(self.parse_bitwise_or()?)));
        }
        self.parse_expression()
    }

    pub(super) fn parse_star_named_expression(&mut self) -> PResult<Expr> {
        if self.eat_token(SyntaxKind::Star) {
            return Ok(Expr::Starred(Box::new(self.parse_bitwise_or()?)));
        }
        self.parse_named_expression()
    }

    /// `NAME ':=' expression | expression`
    pub(super) fn parse_named_expression(&mut self) -> PResult<Expr> {
        if self.currently_is(SyntaxKind::Name) && self.next_is(SyntaxKind::ColonEquals) {
            let target = self.bump().to_owned();
            self.bump();
            let value = self.parse_expression()?;
            return Ok(Expr::NamedExpr {
                target,
                value: Box::new(value),
            });
        }
        self.parse_expression()
    }

    /// `disjunction ('if' disjunction 'else' expression)? | lambda`
    ///
    /// The conditional tail may start on the next line. It is speculative:
    /// when it does not parse, the `if` starts the next statement. It is only
    /// tried when an `else` lies ahead at the same bracket level.
    pub(super) fn parse_expression(&mut self) -> PResult<Expr> {
        self.nested(|p| {
            if p.currently_is(SyntaxKind::KwLambda)
                || (p.currently_is(SyntaxKind::KwAsync) && p.next_is(SyntaxKind::KwLambda))
            {
                return p.parse_lambda();
            }

            let body = p.parse_disjunction()?;
            if !p.currently_is(SyntaxKind::KwIf) || !p.else_ahead() {
                return Ok(body);
            }
            match p.speculate(Self::parse_conditional_tail)? {
                Some((test, orelse)) => Ok(Expr::IfExp {
                    body: Box::new(body),
                    test: Box::new(test),
                    orelse: Box::new(orelse),
                }),
                None => Ok(body),
            }
        })
    }

    /// Scans from the `if` for an `else` before anything that ends the test:
    /// a separator, a closing bracket or a block opener. Bracketed groups
    /// are skipped whole.
    fn else_ahead(&self) -> bool {
        let mut previous = SyntaxKind::KwIf;
        let found = self.stream.scan_level(self.pos + 1, usize::MAX, |pos, kind| {
            let verdict = match kind {
                SyntaxKind::KwElse => Some(true),
                SyntaxKind::BraceOpen if token_sets::EXPR_END.contains(previous) => Some(false),
                SyntaxKind::Comma
                | SyntaxKind::Colon
                | SyntaxKind::Semicolon
                | SyntaxKind::ParenClose
                | SyntaxKind::BracketClose
                | SyntaxKind::BraceClose
                | SyntaxKind::Eof => Some(false),
                _ => None,
            };
            previous = self.stream.group_end_kind(pos);
            verdict
        });
        found.unwrap_or(false)
    }

    fn parse_conditional_tail(&mut self) -> PResult<(Expr, Expr)> {
        self.assert_current(SyntaxKind::KwIf);
        self.bump();
        let test = self.with_matmul(Self::parse_disjunction)?;
        self.expect(SyntaxKind::KwElse, "'else'")?;
        let orelse = self.parse_expression()?;
        Ok((test, orelse))
    }

    fn continues_with(&self, kind: SyntaxKind) -> bool {
        self.currently_is(kind) && !self.at_line_break()
    }

    pub(super) fn parse_disjunction(&mut self) -> PResult<Expr> {
        let first = self.parse_conjunction()?;
        if !self.continues_with(SyntaxKind::KwOr) {
            return Ok(first);
        }
        let mut values = vec![first];
        while self.continues_with(SyntaxKind::KwOr) {
            self.bump();
            values.push(self.parse_conjunction()?);
        }
        Ok(Expr::BoolOp {
            op: BoolOp::Or,
            values,
        })
    }

    fn parse_conjunction(&mut self) -> PResult<Expr> {
        let first = self.parse_inversion()?;
        if !self.continues_with(SyntaxKind::KwAnd) {
            return Ok(first);
        }
        let mut values = vec![first];
        while self.continues_with(SyntaxKind::KwAnd) {
            self.bump();
            values.push(self.parse_inversion()?);
        }
        Ok(Expr::BoolOp {
            op: BoolOp::And,
            values,
        })
    }

    fn parse_inversion(&mut self) -> PResult<Expr> {
        if self.eat_token(SyntaxKind::KwNot) {
            let operand = self.nested(Self::parse_inversion)?;
            return Ok(Expr::Not(Box::new(operand)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> PResult<Expr> {
        let left = self.parse_bitwise_or()?;
        let mut ops = Vec::new();
        while !self.at_line_break()
            && let Some(op) = self.eat_comparison_op()
        {
            let right = self.parse_bitwise_or()?;
            ops.push((op, right));
        }
        if ops.is_empty() {
            return Ok(left);
        }
        Ok(Expr::Compare {
            left: Box::new(left),
            ops,
        })
    }

    fn eat_comparison_op(&mut self) -> Option<CmpOp> {
        let op = match self.current() {
            SyntaxKind::EqEq => CmpOp::Eq,
            SyntaxKind::NotEq => CmpOp::NotEq,
            SyntaxKind::Less => CmpOp::Lt,
            SyntaxKind::LessEq => CmpOp::LtE,
            SyntaxKind::Greater => CmpOp::Gt,
            SyntaxKind::GreaterEq => CmpOp::GtE,
            SyntaxKind::KwIn => CmpOp::In,
            SyntaxKind::KwNot if self.next_is(SyntaxKind::KwIn) => {
                self.bump();
                CmpOp::NotIn
            }
            SyntaxKind::KwIs if self.next_is(SyntaxKind::KwNot) => {
                self.bump();
                CmpOp::IsNot
            }
            SyntaxKind::KwIs => CmpOp::Is,
            _ => return None,
        };
        self.bump();
        Some(op)
    }

    pub(super) fn parse_bitwise_or(&mut self) -> PResult<Expr> {
        self.parse_binary(Level::BitOr)
    }

    fn parse_binary(&mut self, level: Level) -> PResult<Expr> {
        let mut left = self.parse_binary_operand(level)?;
        while !self.at_line_break()
            && let Some(op) = self.binary_op(level)
        {
            self.bump();
            let right = self.parse_binary_operand(level)?;
            left = Expr::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_binary_operand(&mut self, level: Level) -> PResult<Expr> {
        match level.tighter() {
            Some(tighter) => self.parse_binary(tighter),
            None => self.parse_factor(),
        }
    }

    fn binary_op(&self, level: Level) -> Option<BinOp> {
        let op = match (level, self.current()) {
            (Level::BitOr, SyntaxKind::Pipe) => BinOp::BitOr,
            (Level::BitXor, SyntaxKind::Caret) => BinOp::BitXor,
            (Level::BitAnd, SyntaxKind::Amper) => BinOp::BitAnd,
            (Level::Shift, SyntaxKind::LeftShift) => BinOp::LShift,
            (Level::Shift, SyntaxKind::RightShift) => BinOp::RShift,
            (Level::Sum, SyntaxKind::Plus) => BinOp::Add,
            (Level::Sum, SyntaxKind::Minus) => BinOp::Sub,
            (Level::Term, SyntaxKind::Star) => BinOp::Mult,
            (Level::Term, SyntaxKind::Slash) => BinOp::Div,
            (Level::Term, SyntaxKind::DoubleSlash) => BinOp::FloorDiv,
            (Level::Term, SyntaxKind::Percent) => BinOp::Mod,
            (Level::Term, SyntaxKind::At) if !self.no_matmul => BinOp::MatMult,
            _ => return None,
        };
        Some(op)
    }

    fn parse_factor(&mut self) -> PResult<Expr> {
        let op = match self.current() {
            SyntaxKind::Plus => UnaryOp::UAdd,
            SyntaxKind::Minus => UnaryOp::USub,
            SyntaxKind::Tilde => UnaryOp::Invert,
            _ => return self.parse_power(),
        };
        self.bump();
        let operand = self.nested(Self::parse_factor)?;
        Ok(Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_power(&mut self) -> PResult<Expr> {
        let base = self.parse_await_primary()?;
        if !self.continues_with(SyntaxKind::DoubleStar) {
            return Ok(base);
        }
        self.bump();
        let exponent = self.nested(Self::parse_factor)?;
        Ok(Expr::BinOp {
            left: Box::new(base),
            op: BinOp::Pow,
            right: Box::new(exponent),
        })
    }

    fn parse_await_primary(&mut self) -> PResult<Expr> {
        if self.eat_token(SyntaxKind::KwAwait) {
            return Ok(Expr::Await(Box::new(self.parse_primary()?)));
        }
        self.parse_primary()
    }

    /// Atom followed by attribute access, calls and subscripts.
    pub(super) fn parse_primary(&mut self) -> PResult<Expr> {
        let mut expr = self.parse_atom()?;
        loop {
            match self.current() {
                SyntaxKind::Dot => {
                    self.bump();
                    let attr = self.expect_name("attribute name")?;
                    expr = Expr::Attribute {
                        value: Box::new(expr),
                        attr,
                    };
                }
                SyntaxKind::ParenOpen if !self.at_line_break() => {
                    let args = self.parse_call_args()?;
                    expr = Expr::Call {
                        func: Box::new(expr),
                        args,
                    };
                }
                SyntaxKind::BracketOpen if !self.at_line_break() => {
                    let (slices, trailing_comma) = self.parse_subscript()?;
                    expr = Expr::Subscript {
                        value: Box::new(expr),
                        slices,
                        trailing_comma,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_subscript(&mut self) -> PResult<(Vec<Expr>, bool)> {
        self.assert_current(SyntaxKind::BracketOpen);
        self.bump();
        self.with_matmul(|p| {
            let mut slices = vec![p.parse_slice()?];
            let mut trailing_comma = false;
            while p.eat_token(SyntaxKind::Comma) {
                if p.currently_is(SyntaxKind::BracketClose) {
                    trailing_comma = true;
                    break;
                }
                slices.push(p.parse_slice()?);
            }
            p.expect(SyntaxKind::BracketClose, "']'")?;
            Ok((slices, trailing_comma))
        })
    }

    /// `expression? ':' expression? (':' expression?)?` or a plain element.
    fn parse_slice(&mut self) -> PResult<Expr> {
        let lower = if self.currently_is(SyntaxKind::Colon) {
            None
        } else {
            let expr = self.parse_star_named_expression()?;
            if !self.currently_is(SyntaxKind::Colon) {
                return Ok(expr);
            }
            Some(Box::new(expr))
        };
        self.expect(SyntaxKind::Colon, "':'")?;

        let upper = if self.at_slice_end() || self.currently_is(SyntaxKind::Colon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        let step = if self.eat_token(SyntaxKind::Colon) {
            if self.at_slice_end() {
                Some(None)
            } else {
                Some(Some(Box::new(self.parse_expression()?)))
            }
        } else {
            None
        };
        Ok(Expr::Slice { lower, upper, step })
    }

    fn at_slice_end(&self) -> bool {
        matches!(
            self.current(),
            SyntaxKind::Comma | SyntaxKind::BracketClose
        )
    }

    /// `('*' bitwise_or | bitwise_or) (',' ...)* ','?` up to `in`.
    pub(super) fn parse_target_list(&mut self) -> PResult<Expr> {
        let first = self.parse_target()?;
        if !self.currently_is(SyntaxKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat_token(SyntaxKind::Comma) {
            if self.currently_is(SyntaxKind::KwIn) || !self.at_expression_start() {
                break;
            }
            elts.push(self.parse_target()?);
        }
        Ok(Expr::Tuple {
            elts,
            parenthesized: false,
        })
    }

    pub(super) fn parse_target(&mut self) -> PResult<Expr> {
        if self.eat_token(SyntaxKind::Star) {
            return Ok(Expr::Starred(Box::new(self.parse_bitwise_or()?)));
        }
        self.parse_bitwise_or()
    }

    /// `'yield' ('from' expression | star_expressions)?`
    pub(super) fn parse_yield_expression(&mut self) -> PResult<Expr> {
        self.assert_current(SyntaxKind::KwYield);
        self.bump();
        if self.eat_token(SyntaxKind::KwFrom) {
            return Ok(Expr::YieldFrom(Box::new(self.parse_operand(false)?)));
        }
        if self.at_operand_end() {
            return Ok(Expr::Yield(None));
        }
        Ok(Expr::Yield(Some(Box::new(self.parse_operand(true)?))))
    }

    /// Operand of `return`, `yield` and `raise`.
    ///
    /// With `force_parens_in_return_yield_raise` it is a single parenthesized
    /// atom (group, tuple or generator) that ends the operand.
    pub(super) fn parse_operand(&mut self, star: bool) -> PResult<Expr> {
        if !self.options.force_parens_in_return_yield_raise {
            return if star {
                self.parse_star_expressions()
            } else {
                self.parse_expression()
            };
        }
        if !self.currently_is(SyntaxKind::ParenOpen) {
            return Err(self.no_viable_alternative());
        }
        let atom = self.parse_atom()?;
        if !self.at_operand_end() && !self.currently_is(SyntaxKind::KwFrom) {
            return Err(self.no_viable_alternative());
        }
        Ok(atom)
    }
}
