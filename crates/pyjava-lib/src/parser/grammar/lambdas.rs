//! Lambdas, anonymous classes and parameter lists.
//!
//! ```text
//! lambda x, y: x + y
//! async lambda (x: int) -> int { return x }
//! class (Base) (ctor_args) { body }
//! ```

use crate::ast::{AnonymousClass, CallArgs, Expr, Lambda, LambdaBody, LambdaParams, Param};
use crate::parser::core::{PResult, Parser};
use crate::parser::cst::SyntaxKind;

impl Parser<'_> {
    pub(super) fn parse_lambda(&mut self) -> PResult<Expr> {
        self.rule("lambda", |p| {
            let is_async = p.eat_token(SyntaxKind::KwAsync);
            p.expect(SyntaxKind::KwLambda, "'lambda'")?;

            let params = if p.eat_token(SyntaxKind::ParenOpen) {
                let params = p.with_matmul(|p| p.parse_params(true))?;
                p.expect(SyntaxKind::ParenClose, "')'")?;
                LambdaParams::Parenthesized(params)
            } else {
                LambdaParams::Bare(p.parse_params(false)?)
            };

            let returns = if p.eat_token(SyntaxKind::Arrow) {
                Some(p.parse_expression()?)
            } else {
                None
            };

            let body = if p.currently_is(SyntaxKind::BraceOpen) {
                LambdaBody::Block(p.parse_brace_block()?)
            } else {
                p.expect(SyntaxKind::Colon, "':' or '{'")?;
                LambdaBody::Expr(p.parse_expression()?)
            };

            Ok(Expr::Lambda(Box::new(Lambda {
                is_async,
                params,
                returns,
                body,
            })))
        })
    }

    /// Comma-separated parameters up to the first token that cannot start
    /// one. Annotations are only parsed inside parentheses.
    pub(super) fn parse_params(&mut self, annotated: bool) -> PResult<Vec<Param>> {
        let mut params = Vec::new();
        while matches!(
            self.current(),
            SyntaxKind::Name | SyntaxKind::Star | SyntaxKind::DoubleStar | SyntaxKind::Slash
        ) {
            params.push(self.parse_param(annotated)?);
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    fn parse_param(&mut self, annotated: bool) -> PResult<Param> {
        match self.current() {
            SyntaxKind::Slash => {
                self.bump();
                Ok(Param::PositionalOnly)
            }
            SyntaxKind::Star => {
                self.bump();
                if !self.currently_is(SyntaxKind::Name) {
                    return Ok(Param::KeywordOnly);
                }
                let name = self.bump().to_owned();
                let annotation = self.parse_annotation(annotated)?;
                Ok(Param::VarArgs { name, annotation })
            }
            SyntaxKind::DoubleStar => {
                self.bump();
                let name = self.expect_name("parameter name")?;
                let annotation = self.parse_annotation(annotated)?;
                Ok(Param::KwArgs { name, annotation })
            }
            _ => {
                let name = self.expect_name("parameter name")?;
                let annotation = self.parse_annotation(annotated)?;
                let default = if self.eat_token(SyntaxKind::Equals) {
                    Some(self.parse_expression()?)
                } else {
                    None
                };
                Ok(Param::Named {
                    name,
                    annotation,
                    default,
                })
            }
        }
    }

    fn parse_annotation(&mut self, annotated: bool) -> PResult<Option<Expr>> {
        if annotated && self.eat_token(SyntaxKind::Colon) {
            return Ok(Some(self.parse_expression()?));
        }
        Ok(None)
    }

    /// `'class' ('(' bases ')')? ('(' args ')')? block`
    ///
    /// With one argument group it holds the constructor arguments; with two,
    /// the first lists the bases.
    pub(super) fn parse_anonymous_class(&mut self) -> PResult<Expr> {
        self.assert_current(SyntaxKind::KwClass);
        self.bump();

        let start = self.checkpoint();
        let first = if self.currently_is(SyntaxKind::ParenOpen) {
            Some(self.parse_call_args()?)
        } else {
            None
        };
        let second = if first.is_some()
            && self.currently_is(SyntaxKind::ParenOpen)
            && !self.at_line_break()
        {
            Some(self.parse_call_args()?)
        } else {
            None
        };

        let (bases, ctor) = match (first, second) {
            (Some(CallArgs::Args(bases)), Some(ctor)) => (Some(bases), ctor),
            (Some(CallArgs::Generator(_)), Some(_)) => {
                self.rewind(start);
                return Err(self.error("expected base class list"));
            }
            (Some(ctor), None) => (None, ctor),
            (None, _) => (None, CallArgs::Args(Vec::new())),
        };

        if !self.currently_is(SyntaxKind::BraceOpen) {
            return Err(self.error("expected '{'"));
        }
        let body = self.parse_brace_block()?;

        Ok(Expr::AnonymousClass(Box::new(AnonymousClass {
            bases,
            ctor,
            body,
        })))
    }
}
