//! Compound statements: definitions, conditionals, loops, `try`, `with`, `match`.

use crate::ast::{
    BlockForm, ClassDef, Clause, Comment, Decorator, Elif, ExceptHandler, Expr, For, FunctionDef,
    If, Match, MatchCase, Stmt, StmtKind, Suite, Try, While, With,
};
use crate::parser::core::{PResult, Parser};
use crate::parser::cst::{SyntaxKind, token_sets};

use super::blocks::Forms;

impl Parser<'_> {
    /// `('@' named_expression)+ (function_def | class_def)`
    ///
    /// A top-level `@` inside a decorator expression starts the next
    /// decorator rather than a matrix multiplication.
    pub(super) fn parse_decorated(&mut self) -> PResult<StmtKind> {
        let mut decorators = Vec::new();
        while self.currently_is(SyntaxKind::At) {
            let leading = if decorators.is_empty() {
                Vec::new()
            } else {
                self.take_preceding_comments()
            };
            self.bump();

            let saved = std::mem::replace(&mut self.no_matmul, true);
            let expr = self.parse_named_expression();
            self.no_matmul = saved;
            let expr = expr?;

            let trailing = self.take_trailing_comment();
            decorators.push(Decorator {
                leading,
                expr,
                trailing,
            });
        }

        let header_leading = self.take_preceding_comments();
        match self.current() {
            SyntaxKind::KwDef | SyntaxKind::KwAsync => {
                self.parse_function_def(decorators, header_leading)
            }
            SyntaxKind::KwClass => self.parse_class_def(decorators, header_leading),
            _ => Err(self.error("expected function or class definition")),
        }
    }

    pub(super) fn parse_function_def(
        &mut self,
        decorators: Vec<Decorator>,
        header_leading: Vec<Comment>,
    ) -> PResult<StmtKind> {
        let header = self.pos;
        let is_async = self.eat_token(SyntaxKind::KwAsync);
        self.expect(SyntaxKind::KwDef, "'def'")?;
        let name = self.expect_name("function name")?;

        self.expect(SyntaxKind::ParenOpen, "'('")?;
        let params = self.with_matmul(|p| p.parse_params(true))?;
        self.expect(SyntaxKind::ParenClose, "')'")?;

        let returns = if self.eat_token(SyntaxKind::Arrow) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let body = self.parse_block(header)?;

        Ok(StmtKind::FunctionDef(Box::new(FunctionDef {
            decorators,
            header_leading,
            is_async,
            name,
            params,
            returns,
            body,
        })))
    }

    pub(super) fn parse_class_def(
        &mut self,
        decorators: Vec<Decorator>,
        header_leading: Vec<Comment>,
    ) -> PResult<StmtKind> {
        let header = self.pos;
        self.assert_current(SyntaxKind::KwClass);
        self.bump();
        let name = self.expect_name("class name")?;

        let args = if self.currently_is(SyntaxKind::ParenOpen) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        let body = self.parse_block(header)?;

        Ok(StmtKind::ClassDef(Box::new(ClassDef {
            decorators,
            header_leading,
            name,
            args,
            body,
        })))
    }

    pub(super) fn parse_if(&mut self) -> PResult<StmtKind> {
        let header = self.pos;
        self.assert_current(SyntaxKind::KwIf);
        self.bump();
        let test = self.parse_condition()?;
        let body = self.parse_block(header)?;

        let mut previous = body.form;
        let mut elifs = Vec::new();
        while let Some(leading) = self.clause_start(SyntaxKind::KwElif, header, previous) {
            let clause = self.pos;
            self.bump();
            let test = self.parse_condition()?;
            let body = self.parse_block(clause)?;
            previous = body.form;
            elifs.push(Elif {
                leading,
                test,
                body,
            });
        }
        let orelse = self.parse_clause(SyntaxKind::KwElse, header, previous)?;

        Ok(StmtKind::If(Box::new(If {
            test,
            body,
            elifs,
            orelse,
        })))
    }

    pub(super) fn parse_while(&mut self) -> PResult<StmtKind> {
        let header = self.pos;
        self.assert_current(SyntaxKind::KwWhile);
        self.bump();
        let test = self.parse_condition()?;
        let body = self.parse_block(header)?;
        let orelse = self.parse_clause(SyntaxKind::KwElse, header, body.form)?;
        Ok(StmtKind::While(Box::new(While { test, body, orelse })))
    }

    pub(super) fn parse_for(&mut self) -> PResult<StmtKind> {
        let header = self.pos;
        let is_async = self.eat_token(SyntaxKind::KwAsync);
        self.expect(SyntaxKind::KwFor, "'for'")?;
        let (target, iter) = self.parse_for_header()?;
        let body = self.parse_block(header)?;
        let orelse = self.parse_clause(SyntaxKind::KwElse, header, body.form)?;
        Ok(StmtKind::For(Box::new(For {
            is_async,
            target,
            iter,
            body,
            orelse,
        })))
    }

    pub(super) fn parse_with(&mut self) -> PResult<StmtKind> {
        let header = self.pos;
        let is_async = self.eat_token(SyntaxKind::KwAsync);
        self.expect(SyntaxKind::KwWith, "'with'")?;
        let items = self.parse_with_header()?;
        let body = self.parse_block(header)?;
        Ok(StmtKind::With(Box::new(With {
            is_async,
            items,
            body,
        })))
    }

    pub(super) fn parse_try(&mut self) -> PResult<StmtKind> {
        let header = self.pos;
        self.assert_current(SyntaxKind::KwTry);
        self.bump();
        let body = self.parse_block(header)?;

        let mut previous = body.form;
        let mut handlers = Vec::new();
        while let Some(leading) = self.clause_start(SyntaxKind::KwExcept, header, previous) {
            let clause = self.pos;
            self.bump();
            let (kind, name) = self.parse_except_header()?;
            let body = self.parse_block(clause)?;
            previous = body.form;
            handlers.push(ExceptHandler {
                leading,
                kind,
                name,
                body,
            });
        }

        let orelse = if handlers.is_empty() {
            None
        } else {
            self.parse_clause(SyntaxKind::KwElse, header, previous)?
        };
        if let Some(clause) = &orelse {
            previous = clause.body.form;
        }
        let finally = self.parse_clause(SyntaxKind::KwFinally, header, previous)?;

        if handlers.is_empty() && finally.is_none() {
            return Err(self.error("expected 'except' or 'finally'"));
        }

        Ok(StmtKind::Try(Box::new(Try {
            body,
            handlers,
            orelse,
            finally,
        })))
    }

    /// `match` is a soft keyword: without a subject followed by a block
    /// opener the line is an ordinary statement.
    pub(super) fn try_parse_match(&mut self) -> PResult<Option<Stmt>> {
        let header = self.pos;
        if !self.match_block_ahead() {
            return Ok(None);
        }
        let Some(subject) = self.speculate(|p| p.parse_match_header())? else {
            return Ok(None);
        };
        let cases = self.rule("match statement", |p| p.parse_match_cases(header))?;
        Ok(Some(Stmt::new(StmtKind::Match(Box::new(Match {
            subject,
            cases,
        })))))
    }

    /// A block opener follows on the `match` line, at the same bracket
    /// level: `:`, or a `{` right after the end of an expression.
    fn match_block_ahead(&self) -> bool {
        let mut previous = SyntaxKind::Name;
        let found = self.stream.scan_level(self.pos + 1, usize::MAX, |pos, kind| {
            let opener = kind == SyntaxKind::Colon
                || (kind == SyntaxKind::BraceOpen && token_sets::EXPR_END.contains(previous));
            let verdict = if opener {
                Some(true)
            } else if self.stream.line_terminator_ahead(pos)
                || matches!(
                    kind,
                    SyntaxKind::Semicolon
                        | SyntaxKind::ParenClose
                        | SyntaxKind::BracketClose
                        | SyntaxKind::BraceClose
                        | SyntaxKind::Eof
                )
            {
                Some(false)
            } else {
                None
            };
            previous = self.stream.group_end_kind(pos);
            verdict
        });
        found.unwrap_or(false)
    }

    fn parse_match_header(&mut self) -> PResult<Expr> {
        self.bump();
        let subject = self.parse_match_subject()?;
        if !self.currently_is(SyntaxKind::BraceOpen) && !self.currently_is(SyntaxKind::Colon) {
            return Err(self.error("expected '{' or ':'"));
        }
        Ok(subject)
    }

    /// Looks past comments for a continuation clause (`elif`, `else`,
    /// `except`, `finally`) and claims the comments when it is there.
    ///
    /// After an indentation-delimited body the clause must not be indented
    /// less than its header; otherwise it belongs to an enclosing statement.
    fn clause_start(
        &mut self,
        kind: SyntaxKind,
        header: usize,
        previous: BlockForm,
    ) -> Option<Vec<Comment>> {
        if self.eof() {
            return None;
        }
        let checkpoint = self.checkpoint();
        let leading = self.take_preceding_comments();
        let aligned = previous == BlockForm::Brace
            || self.line_indent_at(self.pos) >= self.line_indent_at(header);
        if self.currently_is(kind) && aligned {
            return Some(leading);
        }
        self.rewind(checkpoint);
        None
    }

    /// `else` or `finally` followed by a block.
    fn parse_clause(
        &mut self,
        kind: SyntaxKind,
        header: usize,
        previous: BlockForm,
    ) -> PResult<Option<Clause>> {
        let Some(leading) = self.clause_start(kind, header, previous) else {
            return Ok(None);
        };
        let clause = self.pos;
        self.bump();
        let body = self.parse_block(clause)?;
        Ok(Some(Clause { leading, body }))
    }

    fn parse_match_cases(&mut self, header: usize) -> PResult<Suite<MatchCase>> {
        self.parse_suite(header, Forms::Cases, Self::parse_case)
    }

    /// `"case"` patterns guard? block
    fn parse_case(&mut self) -> PResult<MatchCase> {
        let leading = self.take_preceding_comments();
        if !self.currently_is_name("case") {
            return Err(self.error("expected case"));
        }
        let header = self.pos;
        self.rule("case clause", |p| {
            p.bump();
            let pattern = p.parse_case_pattern()?;
            let guard = if p.eat_token(SyntaxKind::KwIf) {
                Some(p.parse_named_expression()?)
            } else {
                None
            };
            let body = p.parse_block(header)?;
            Ok(MatchCase {
                leading,
                pattern,
                guard,
                body,
            })
        })
    }
}
