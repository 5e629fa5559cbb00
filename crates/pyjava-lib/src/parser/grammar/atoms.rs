//! Atoms, displays, comprehensions and call arguments.

use crate::ast::{Arg, CallArgs, Comprehension, Constant, DictItem, Expr};
use crate::parser::core::{PResult, Parser};
use crate::parser::cst::SyntaxKind;

impl Parser<'_> {
    pub(super) fn parse_atom(&mut self) -> PResult<Expr> {
        match self.current() {
            SyntaxKind::Name => Ok(Expr::Name(self.bump().to_owned())),
            SyntaxKind::Number => Ok(Expr::Number(self.bump().to_owned())),
            SyntaxKind::Str => Ok(Expr::Strings(self.parse_string_parts())),
            SyntaxKind::KwNone => self.parse_constant(Constant::None),
            SyntaxKind::KwTrue => self.parse_constant(Constant::True),
            SyntaxKind::KwFalse => self.parse_constant(Constant::False),
            SyntaxKind::Ellipsis => self.parse_constant(Constant::Ellipsis),
            SyntaxKind::ParenOpen => self.parse_paren_atom(),
            SyntaxKind::BracketOpen => self.parse_list_display(),
            SyntaxKind::BraceOpen => self.parse_brace_display(),
            SyntaxKind::KwClass => self.rule("anonymous class", Self::parse_anonymous_class),
            _ => Err(self.error("expected expression")),
        }
    }

    fn parse_constant(&mut self, constant: Constant) -> PResult<Expr> {
        self.bump();
        Ok(Expr::Constant(constant))
    }

    /// Adjacent string literals on one line (or inside brackets).
    pub(super) fn parse_string_parts(&mut self) -> Vec<String> {
        let mut parts = vec![self.bump().to_owned()];
        while self.currently_is(SyntaxKind::Str) && !self.at_line_break() {
            parts.push(self.bump().to_owned());
        }
        parts
    }

    /// `'(' named_expression ')'`, as required around forced headers.
    pub(super) fn parse_group(&mut self) -> PResult<Expr> {
        self.expect(SyntaxKind::ParenOpen, "'('")?;
        let inner = self.with_matmul(Self::parse_named_expression)?;
        self.expect(SyntaxKind::ParenClose, "')'")?;
        Ok(Expr::group(inner))
    }

    /// Group, tuple, generator expression or parenthesized `yield`.
    fn parse_paren_atom(&mut self) -> PResult<Expr> {
        self.assert_current(SyntaxKind::ParenOpen);
        self.bump();
        self.with_matmul(|p| {
            if p.eat_token(SyntaxKind::ParenClose) {
                return Ok(Expr::Tuple {
                    elts: Vec::new(),
                    parenthesized: true,
                });
            }

            if p.currently_is(SyntaxKind::KwYield) {
                let inner = p.parse_yield_expression()?;
                p.expect(SyntaxKind::ParenClose, "')'")?;
                return Ok(Expr::group(inner));
            }

            let first = p.parse_star_named_expression()?;
            if p.at_comprehension() {
                let generators = p.parse_comprehension_clauses()?;
                p.expect(SyntaxKind::ParenClose, "')'")?;
                return Ok(Expr::GeneratorExp {
                    elt: Box::new(first),
                    generators,
                });
            }
            if !p.currently_is(SyntaxKind::Comma) {
                p.expect(SyntaxKind::ParenClose, "')'")?;
                return Ok(Expr::group(first));
            }

            let mut elts = vec![first];
            while p.eat_token(SyntaxKind::Comma) {
                if p.currently_is(SyntaxKind::ParenClose) {
                    break;
                }
                elts.push(p.parse_star_named_expression()?);
            }
            p.expect(SyntaxKind::ParenClose, "')'")?;
            Ok(Expr::Tuple {
                elts,
                parenthesized: true,
            })
        })
    }

    fn parse_list_display(&mut self) -> PResult<Expr> {
        self.assert_current(SyntaxKind::BracketOpen);
        self.bump();
        self.with_matmul(|p| {
            if p.eat_token(SyntaxKind::BracketClose) {
                return Ok(Expr::List {
                    elts: Vec::new(),
                    trailing_comma: false,
                });
            }

            let first = p.parse_star_named_expression()?;
            if p.at_comprehension() {
                let generators = p.parse_comprehension_clauses()?;
                p.expect(SyntaxKind::BracketClose, "']'")?;
                return Ok(Expr::ListComp {
                    elt: Box::new(first),
                    generators,
                });
            }

            let mut elts = vec![first];
            let mut trailing_comma = false;
            while p.eat_token(SyntaxKind::Comma) {
                if p.currently_is(SyntaxKind::BracketClose) {
                    trailing_comma = true;
                    break;
                }
                elts.push(p.parse_star_named_expression()?);
            }
            p.expect(SyntaxKind::BracketClose, "']'")?;
            Ok(Expr::List {
                elts,
                trailing_comma,
            })
        })
    }

    /// Dict, set or their comprehensions. `{}` is an empty dict.
    fn parse_brace_display(&mut self) -> PResult<Expr> {
        self.assert_current(SyntaxKind::BraceOpen);
        self.bump();
        self.with_matmul(|p| {
            if p.eat_token(SyntaxKind::BraceClose) {
                return Ok(Expr::Dict(Vec::new()));
            }

            if p.currently_is(SyntaxKind::DoubleStar) {
                let first = p.parse_dict_item()?;
                return p.parse_dict_rest(first);
            }

            let first = p.parse_star_named_expression()?;
            if p.eat_token(SyntaxKind::Colon) {
                let value = p.parse_expression()?;
                if p.at_comprehension() {
                    let generators = p.parse_comprehension_clauses()?;
                    p.expect(SyntaxKind::BraceClose, "'}'")?;
                    return Ok(Expr::DictComp {
                        key: Box::new(first),
                        value: Box::new(value),
                        generators,
                    });
                }
                return p.parse_dict_rest(DictItem::Pair { key: first, value });
            }

            if p.at_comprehension() {
                let generators = p.parse_comprehension_clauses()?;
                p.expect(SyntaxKind::BraceClose, "'}'")?;
                return Ok(Expr::SetComp {
                    elt: Box::new(first),
                    generators,
                });
            }

            let mut elts = vec![first];
            while p.eat_token(SyntaxKind::Comma) {
                if p.currently_is(SyntaxKind::BraceClose) {
                    break;
                }
                elts.push(p.parse_star_named_expression()?);
            }
            p.expect(SyntaxKind::BraceClose, "'}'")?;
            Ok(Expr::Set(elts))
        })
    }

    fn parse_dict_rest(&mut self, first: DictItem) -> PResult<Expr> {
        let mut items = vec![first];
        while self.eat_token(SyntaxKind::Comma) {
            if self.currently_is(SyntaxKind::BraceClose) {
                break;
            }
            items.push(self.parse_dict_item()?);
        }
        self.expect(SyntaxKind::BraceClose, "'}'")?;
        Ok(Expr::Dict(items))
    }

    fn parse_dict_item(&mut self) -> PResult<DictItem> {
        if self.eat_token(SyntaxKind::DoubleStar) {
            return Ok(DictItem::Unpack(self.parse_bitwise_or()?));
        }
        let key = self.parse_expression()?;
        self.expect(SyntaxKind::Colon, "':'")?;
        let value = self.parse_expression()?;
        Ok(DictItem::Pair { key, value })
    }

    /// `('async'? 'for' targets 'in' disjunction ('if' disjunction)*)+`
    pub(super) fn parse_comprehension_clauses(&mut self) -> PResult<Vec<Comprehension>> {
        let mut generators = Vec::new();
        while self.at_comprehension() {
            let is_async = self.eat_token(SyntaxKind::KwAsync);
            self.expect(SyntaxKind::KwFor, "'for'")?;
            let target = self.parse_target_list()?;
            self.expect(SyntaxKind::KwIn, "'in'")?;
            let iter = self.parse_disjunction()?;
            let mut ifs = Vec::new();
            while self.eat_token(SyntaxKind::KwIf) {
                ifs.push(self.parse_disjunction()?);
            }
            generators.push(Comprehension {
                is_async,
                target,
                iter,
                ifs,
            });
        }
        Ok(generators)
    }

    /// `'(' arguments? ')'`; a sole unparenthesized generator is kept apart.
    pub(super) fn parse_call_args(&mut self) -> PResult<CallArgs> {
        self.assert_current(SyntaxKind::ParenOpen);
        self.bump();
        self.with_matmul(|p| {
            if p.eat_token(SyntaxKind::ParenClose) {
                return Ok(CallArgs::Args(Vec::new()));
            }

            let first = match p.parse_argument()? {
                Arg::Positional(elt) if p.at_comprehension() => {
                    let generators = p.parse_comprehension_clauses()?;
                    p.expect(SyntaxKind::ParenClose, "')'")?;
                    return Ok(CallArgs::Generator(Box::new(Expr::GeneratorExp {
                        elt: Box::new(elt),
                        generators,
                    })));
                }
                arg => arg,
            };

            let mut args = vec![first];
            while p.eat_token(SyntaxKind::Comma) {
                if p.currently_is(SyntaxKind::ParenClose) {
                    break;
                }
                args.push(p.parse_argument()?);
            }
            p.expect(SyntaxKind::ParenClose, "')'")?;
            Ok(CallArgs::Args(args))
        })
    }

    /// Argument list of a class header or anonymous class bases.
    pub(super) fn parse_arguments(&mut self) -> PResult<Vec<Arg>> {
        let start = self.checkpoint();
        match self.parse_call_args()? {
            CallArgs::Args(args) => Ok(args),
            CallArgs::Generator(_) => {
                self.rewind(start);
                Err(self.error("expected base class list"))
            }
        }
    }

    fn parse_argument(&mut self) -> PResult<Arg> {
        match self.current() {
            SyntaxKind::Star => {
                self.bump();
                Ok(Arg::Starred(self.parse_expression()?))
            }
            SyntaxKind::DoubleStar => {
                self.bump();
                Ok(Arg::DoubleStarred(self.parse_expression()?))
            }
            SyntaxKind::Name if self.next_is(SyntaxKind::Equals) => {
                let name = self.bump().to_owned();
                self.bump();
                let value = self.parse_expression()?;
                Ok(Arg::Keyword { name, value })
            }
            _ => Ok(Arg::Positional(self.parse_named_expression()?)),
        }
    }
}
