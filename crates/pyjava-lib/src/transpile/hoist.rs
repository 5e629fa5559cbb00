//! Lambdas and anonymous classes.
//!
//! Python's `lambda` only takes a single unannotated expression. Anything
//! richer is declared as a function right above the statement that uses it
//! and referenced by name. Anonymous classes always go that way, wrapped in
//! a factory function so that each evaluation creates a fresh class.

use log::debug;

use crate::ast::{
    AnonymousClass, Constant, Expr, Lambda, LambdaBody, LambdaParams, Param, StmtKind,
};
use crate::primary::class_name_hint;

use super::Transpiler;
use super::statements::BodyStyle;

impl Transpiler {
    pub(super) fn lambda(&mut self, lambda: &Lambda) {
        match &lambda.body {
            LambdaBody::Expr(body) if !needs_def(lambda) => self.inline_lambda(lambda, body),
            LambdaBody::Block(block) => match inline_block_value(lambda) {
                Some(value) => {
                    self.w().append_char('(');
                    self.inline_lambda(lambda, value.unwrap_or(&NONE));
                    self.w().append_char(')');
                }
                None => self.hoist_lambda(lambda, |t| t.block(block, BodyStyle::Lambda)),
            },
            LambdaBody::Expr(body) => self.hoist_lambda(lambda, |t| {
                t.w().append(": return ");
                t.expr(body);
                t.w().newline();
            }),
        }
    }

    /// `lambda params: body`
    fn inline_lambda(&mut self, lambda: &Lambda, body: &Expr) {
        let params = lambda.params.params();
        self.w().append("lambda");
        if !params.is_empty() {
            self.w().append_char(' ');
            self.params(params);
        }
        self.w().append(": ");
        if let Expr::Tuple {
            parenthesized: false,
            ..
        } = body
        {
            self.w().append_char('(');
            self.expr(body);
            self.w().append_char(')');
        } else {
            self.expr(body);
        }
    }

    /// Declares `def __lambdaN(...)` with the body written by `body`, and
    /// refers to it by name.
    fn hoist_lambda(&mut self, lambda: &Lambda, body: impl FnOnce(&mut Self)) {
        let name = self.lambda_name();
        debug!("hoisting lambda as {name}");
        self.hoist(|t| {
            t.open_statement();
            let keyword = if lambda.is_async { "async def " } else { "def " };
            t.w().append(keyword).append(&name).append_char('(');
            t.params(lambda.params.params());
            t.w().append_char(')');
            if let Some(returns) = &lambda.returns {
                t.w().append(" -> ");
                t.expr(returns);
            }
            body(t);
            t.close_statement();
        });
        self.w().append(&name);
    }

    pub(super) fn anonymous_class(&mut self, class: &AnonymousClass) {
        let name = self.class_name(class_name_hint(class.bases.as_deref()));
        debug!("hoisting anonymous class as {name}");
        self.hoist(|t| {
            t.w()
                .append("def ")
                .append(&name)
                .append("():")
                .incr_indent()
                .newline();
            t.open_statement();
            t.w().append("class ").append(&name);
            if let Some(bases) = &class.bases {
                t.w().append_char('(');
                t.args(bases);
                t.w().append_char(')');
            }
            t.block(&class.body, BodyStyle::Plain);
            t.close_statement();
            t.w()
                .append("return ")
                .append(&name)
                .decr_indent()
                .newline();
        });
        self.w().append(&name).append("()");
        self.call_args(&class.ctor);
    }
}

static NONE: Expr = Expr::Constant(Constant::None);

fn needs_def(lambda: &Lambda) -> bool {
    lambda.is_async
        || lambda.returns.is_some()
        || lambda.params.params().iter().any(Param::is_annotated)
}

/// Value of a block lambda that fits `(lambda params: value)`.
///
/// `Some(None)` stands for a body that evaluates to `None`.
fn inline_block_value(lambda: &Lambda) -> Option<Option<&Expr>> {
    let LambdaBody::Block(block) = &lambda.body else {
        return None;
    };
    if needs_def(lambda) || block.has_comments() {
        return None;
    }
    match &lambda.params {
        LambdaParams::Bare(params) if !params.is_empty() => {}
        _ => return None,
    }
    let [stmt] = block.items.as_slice() else {
        return block.items.is_empty().then_some(None);
    };
    if !stmt.leading.is_empty() || stmt.trailing.is_some() {
        return None;
    }
    match &stmt.kind {
        StmtKind::Return(value) => Some(value.as_ref()),
        StmtKind::Pass => Some(None),
        _ => None,
    }
}
