//! Statements and blocks.

use crate::ast::{
    Alias, Block, ClassDef, Clause, Decorator, ExceptHandler, File, For, FunctionDef, If,
    ImportNames, Match, MatchCase, Stmt, StmtKind, Suite, Try, While, With,
};
use crate::primary::is_lone_ellipsis;

use super::Transpiler;
use super::expressions::aug_op_text;

/// How a block renders when it has nothing (or only `...`) in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum BodyStyle {
    /// `: pass` on the header line.
    Plain,
    /// `: ...` for a lone ellipsis, otherwise `pass` on its own line.
    Function,
    /// `pass` on its own line.
    Class,
    /// Hoisted lambda: `: ...` for a lone ellipsis, `: pass` when empty.
    Lambda,
}

impl Transpiler {
    pub(super) fn file(&mut self, file: &File) {
        for stmt in &file.body {
            self.statement(stmt);
        }
        self.comment_lines(&file.dangling);
    }

    pub(super) fn statement(&mut self, stmt: &Stmt) {
        self.open_statement();
        self.comment_lines(&stmt.leading);

        let compound = match &stmt.kind {
            StmtKind::FunctionDef(def) => {
                self.function_def(def);
                true
            }
            StmtKind::ClassDef(def) => {
                self.class_def(def);
                true
            }
            StmtKind::If(node) => {
                self.if_statement(node);
                true
            }
            StmtKind::While(node) => {
                self.while_statement(node);
                true
            }
            StmtKind::For(node) => {
                self.for_statement(node);
                true
            }
            StmtKind::With(node) => {
                self.with_statement(node);
                true
            }
            StmtKind::Try(node) => {
                self.try_statement(node);
                true
            }
            StmtKind::Match(node) => {
                self.match_statement(node);
                true
            }
            simple => {
                self.simple_statement(simple);
                false
            }
        };

        if compound {
            // `} ; # note` after a block: the block already ended its line
            if let Some(comment) = &stmt.trailing {
                self.comment_lines(std::slice::from_ref(comment));
            }
        } else {
            self.trailing_comment(stmt.trailing.as_ref());
            self.w().newline();
        }

        self.close_statement();
    }

    /// One-line statements, without the line break.
    fn simple_statement(&mut self, kind: &StmtKind) {
        match kind {
            StmtKind::Expr(expr) => self.expr(expr),
            StmtKind::Assign { targets, value } => {
                for target in targets {
                    self.expr(target);
                    self.w().append(" = ");
                }
                self.expr(value);
            }
            StmtKind::AugAssign { target, op, value } => {
                self.expr(target);
                self.w().append_char(' ').append(aug_op_text(*op)).append_char(' ');
                self.expr(value);
            }
            StmtKind::AnnAssign {
                target,
                annotation,
                value,
            } => {
                self.expr(target);
                self.w().append(": ");
                self.expr(annotation);
                if let Some(value) = value {
                    self.w().append(" = ");
                    self.expr(value);
                }
            }
            StmtKind::Return(value) => {
                self.w().append("return");
                if let Some(value) = value {
                    self.w().append_char(' ');
                    self.expr(value);
                }
            }
            StmtKind::Raise { exc, cause } => {
                self.w().append("raise");
                if let Some(exc) = exc {
                    self.w().append_char(' ');
                    self.expr(exc);
                }
                if let Some(cause) = cause {
                    self.w().append(" from ");
                    self.expr(cause);
                }
            }
            StmtKind::Import(aliases) => {
                self.w().append("import ");
                self.aliases(aliases);
            }
            StmtKind::ImportFrom {
                level,
                module,
                names,
            } => {
                self.w().append("from ").append(&".".repeat(*level));
                if let Some(module) = module {
                    self.w().append(module);
                }
                self.w().append(" import ");
                match names {
                    ImportNames::Star => {
                        self.w().append_char('*');
                    }
                    ImportNames::Names(aliases) => self.aliases(aliases),
                }
            }
            StmtKind::Delete(targets) => {
                self.w().append("del ");
                self.comma_separated(targets, Self::expr);
            }
            StmtKind::Assert { test, msg } => {
                self.w().append("assert ");
                self.expr(test);
                if let Some(msg) = msg {
                    self.w().append(", ");
                    self.expr(msg);
                }
            }
            StmtKind::Pass => {
                self.w().append("pass");
            }
            StmtKind::Break => {
                self.w().append("break");
            }
            StmtKind::Continue => {
                self.w().append("continue");
            }
            StmtKind::Global(names) => {
                self.w().append("global ").append(&names.join(", "));
            }
            StmtKind::Nonlocal(names) => {
                self.w().append("nonlocal ").append(&names.join(", "));
            }
            StmtKind::FunctionDef(_)
            | StmtKind::ClassDef(_)
            | StmtKind::If(_)
            | StmtKind::While(_)
            | StmtKind::For(_)
            | StmtKind::With(_)
            | StmtKind::Try(_)
            | StmtKind::Match(_) => Self::compound_as_simple(),
        }
    }

    fn aliases(&mut self, aliases: &[Alias]) {
        self.comma_separated(aliases, |t, alias| {
            t.w().append(&alias.name);
            if let Some(asname) = &alias.asname {
                t.w().append(" as ").append(asname);
            }
        });
    }

    fn decorators(&mut self, decorators: &[Decorator]) {
        for decorator in decorators {
            self.comment_lines(&decorator.leading);
            self.w().append_char('@');
            self.expr(&decorator.expr);
            self.trailing_comment(decorator.trailing.as_ref());
            self.w().newline();
        }
    }

    fn function_def(&mut self, def: &FunctionDef) {
        self.decorators(&def.decorators);
        self.comment_lines(&def.header_leading);
        let keyword = if def.is_async { "async def " } else { "def " };
        self.w().append(keyword).append(&def.name).append_char('(');
        self.params(&def.params);
        self.w().append_char(')');
        if let Some(returns) = &def.returns {
            self.w().append(" -> ");
            self.expr(returns);
        }
        self.block(&def.body, BodyStyle::Function);
    }

    fn class_def(&mut self, def: &ClassDef) {
        self.decorators(&def.decorators);
        self.comment_lines(&def.header_leading);
        self.w().append("class ").append(&def.name);
        if let Some(args) = &def.args {
            self.w().append_char('(');
            self.args(args);
            self.w().append_char(')');
        }
        self.block(&def.body, BodyStyle::Class);
    }

    fn if_statement(&mut self, node: &If) {
        self.w().append("if ");
        self.expr(&node.test);
        self.block(&node.body, BodyStyle::Plain);
        for elif in &node.elifs {
            self.comment_lines(&elif.leading);
            self.w().append("elif ");
            self.expr(&elif.test);
            self.block(&elif.body, BodyStyle::Plain);
        }
        self.else_clause("else", node.orelse.as_ref());
    }

    fn while_statement(&mut self, node: &While) {
        self.w().append("while ");
        self.expr(&node.test);
        self.block(&node.body, BodyStyle::Plain);
        self.else_clause("else", node.orelse.as_ref());
    }

    fn for_statement(&mut self, node: &For) {
        let keyword = if node.is_async { "async for " } else { "for " };
        self.w().append(keyword);
        self.expr(&node.target);
        self.w().append(" in ");
        self.expr(&node.iter);
        self.block(&node.body, BodyStyle::Plain);
        self.else_clause("else", node.orelse.as_ref());
    }

    fn with_statement(&mut self, node: &With) {
        let keyword = if node.is_async { "async with " } else { "with " };
        self.w().append(keyword);
        self.comma_separated(&node.items, |t, item| {
            t.expr(&item.context);
            if let Some(target) = &item.target {
                t.w().append(" as ");
                t.expr(target);
            }
        });
        self.block(&node.body, BodyStyle::Plain);
    }

    fn try_statement(&mut self, node: &Try) {
        self.w().append("try");
        self.block(&node.body, BodyStyle::Plain);
        for handler in &node.handlers {
            self.except_handler(handler);
        }
        self.else_clause("else", node.orelse.as_ref());
        self.else_clause("finally", node.finally.as_ref());
    }

    fn except_handler(&mut self, handler: &ExceptHandler) {
        self.comment_lines(&handler.leading);
        self.w().append("except");
        if let Some(kind) = &handler.kind {
            self.w().append_char(' ');
            self.expr(kind);
            if let Some(name) = &handler.name {
                self.w().append(" as ").append(name);
            }
        }
        self.block(&handler.body, BodyStyle::Plain);
    }

    /// `else` or `finally`.
    fn else_clause(&mut self, keyword: &str, clause: Option<&Clause>) {
        let Some(clause) = clause else {
            return;
        };
        self.comment_lines(&clause.leading);
        self.w().append(keyword);
        self.block(&clause.body, BodyStyle::Plain);
    }

    fn match_statement(&mut self, node: &Match) {
        self.w().append("match ");
        self.expr(&node.subject);
        self.w().append_char(':');
        self.suite_body(&node.cases, Self::match_case);
    }

    fn match_case(&mut self, case: &MatchCase) {
        self.comment_lines(&case.leading);
        self.w().append("case ");
        self.pattern(&case.pattern);
        if let Some(guard) = &case.guard {
            self.w().append(" if ");
            self.expr(guard);
        }
        self.block(&case.body, BodyStyle::Plain);
    }

    /// `:` and the body. Ends at the start of the line after the block.
    pub(super) fn block(&mut self, block: &Block, style: BodyStyle) {
        self.w().append_char(':');
        if !block.has_comments() {
            let inline = match style {
                BodyStyle::Plain => block.items.is_empty().then_some(" pass"),
                BodyStyle::Lambda if block.items.is_empty() => Some(" pass"),
                BodyStyle::Function | BodyStyle::Lambda => {
                    is_lone_ellipsis(&block.items).then_some(" ...")
                }
                BodyStyle::Class => None,
            };
            if let Some(inline) = inline {
                self.w().append(inline).newline();
                return;
            }
        }
        self.suite_body(block, Self::statement);
    }

    /// Indented body after the `:` has been written.
    fn suite_body<T>(&mut self, suite: &Suite<T>, mut item: impl FnMut(&mut Self, &T)) {
        self.trailing_comment(suite.header_comment.as_ref());
        self.w().incr_indent().newline();
        self.comment_lines(&suite.leading);
        if suite.items.is_empty() {
            self.w().append("pass").newline();
        }
        for it in &suite.items {
            item(self, it);
        }
        self.comment_lines(&suite.dangling);
        self.w().decr_indent_newline();
        if let Some(comment) = &suite.closing_comment {
            self.comment_lines(std::slice::from_ref(comment));
        }
    }
}
