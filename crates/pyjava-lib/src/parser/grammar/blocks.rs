//! Block bodies in their four forms.
//!
//! ```text
//! if x { a; b }          Brace
//! if x: a                ColonSimple    (allow_colon_simple_blocks)
//! if x:                  ColonIndented
//!     a
//! if x a                 NoColon        (allow_no_colon_simple_blocks)
//! ```
//!
//! Indented suites end at the first default token whose line is not indented
//! deeper than the header line, at a `}` of an enclosing block, or at end of
//! file. Own-line comments before that point which are still indented deeper
//! than the header stay with the suite.

use crate::ast::{Block, BlockForm, Comment, Suite};
use crate::parser::core::{PResult, Parser};
use crate::parser::cst::SyntaxKind;
use crate::primary::is_lone_pass;

/// Block forms a construct accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Forms {
    /// Statement bodies; option-gated simple forms included.
    All,
    /// Lambda and anonymous class bodies.
    BraceOnly,
    /// `match` bodies: braces or an indented suite, never empty.
    Cases,
}

impl Parser<'_> {
    pub(super) fn parse_block(&mut self, header: usize) -> PResult<Block> {
        let mut block = self.parse_suite(header, Forms::All, Self::parse_statement)?;
        // `if x: pass` has nothing to keep
        if block.form == BlockForm::ColonSimple && is_lone_pass(&block.items) {
            block.items.clear();
        }
        Ok(block)
    }

    pub(super) fn parse_brace_block(&mut self) -> PResult<Block> {
        self.parse_suite(self.pos, Forms::BraceOnly, Self::parse_statement)
    }

    pub(super) fn parse_suite<T>(
        &mut self,
        header: usize,
        forms: Forms,
        item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Suite<T>> {
        let header_comment = self.take_trailing_comment();

        if self.currently_is(SyntaxKind::BraceOpen) {
            return self.parse_brace_suite(header_comment, forms, item);
        }
        if forms == Forms::BraceOnly {
            return Err(self.error("expected '{'"));
        }

        if self.currently_is(SyntaxKind::Colon) {
            self.bump();
            let mut leading = Vec::new();
            let header_comment = self.merge_header_comment(header_comment, &mut leading);
            if self.eof() || self.raw_line_break() {
                let mut suite = self.parse_indented_suite(header, item)?;
                suite.header_comment = header_comment;
                suite.leading = leading;
                return Ok(suite);
            }
            if forms == Forms::Cases || !self.options.allow_colon_simple_blocks {
                return Err(self.error("expected line break after ':'"));
            }
            let mut suite = self.parse_single_item_suite(BlockForm::ColonSimple, item)?;
            suite.header_comment = header_comment;
            suite.leading = leading;
            return Ok(suite);
        }

        let no_colon = forms == Forms::All
            && self.options.allow_no_colon_simple_blocks
            && !self.eof()
            && !self.currently_is(SyntaxKind::BraceClose);
        if !no_colon {
            return Err(self.error("expected '{' or ':'"));
        }
        let mut suite = self.parse_single_item_suite(BlockForm::NoColon, item)?;
        suite.header_comment = header_comment;
        Ok(suite)
    }

    fn parse_brace_suite<T>(
        &mut self,
        header_comment: Option<Comment>,
        forms: Forms,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Suite<T>> {
        let mut leading = self.take_preceding_comments();
        self.assert_current(SyntaxKind::BraceOpen);
        self.bump();
        let header_comment = self.merge_header_comment(header_comment, &mut leading);

        let mut items = Vec::new();
        while !self.currently_is(SyntaxKind::BraceClose) {
            if self.eof() {
                return Err(self.error("expected '}'"));
            }
            items.push(item(self)?);
        }
        if forms == Forms::Cases && items.is_empty() {
            return Err(self.error("expected case"));
        }

        let dangling = self.take_preceding_comments();
        self.bump();
        // a comment after the `}` of an expression body belongs to the statement
        let closing_comment = match forms {
            Forms::BraceOnly => None,
            Forms::All | Forms::Cases => self.take_trailing_comment(),
        };

        Ok(Suite {
            form: BlockForm::Brace,
            header_comment,
            leading,
            items,
            dangling,
            closing_comment,
        })
    }

    fn parse_indented_suite<T>(
        &mut self,
        header: usize,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Suite<T>> {
        let indent = self.line_indent_at(header);
        let mut items = Vec::new();
        while !self.eof()
            && !self.currently_is(SyntaxKind::BraceClose)
            && self.line_indent_at(self.pos) > indent
        {
            items.push(item(self)?);
        }
        if items.is_empty() {
            return Err(self.error("expected indented block"));
        }
        let mut suite = Suite::new(BlockForm::ColonIndented, items);
        // comments still indented into the body close it
        suite.dangling = self.take_comments_indented_past(indent);
        Ok(suite)
    }

    fn parse_single_item_suite<T>(
        &mut self,
        form: BlockForm,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Suite<T>> {
        let single = item(self)?;
        Ok(Suite::new(form, vec![single]))
    }

    /// A second same-line comment after `{` or `:` joins the suite's leading
    /// comments.
    fn merge_header_comment(
        &mut self,
        header_comment: Option<Comment>,
        leading: &mut Vec<Comment>,
    ) -> Option<Comment> {
        let after = self.take_trailing_comment();
        match (header_comment, after) {
            (Some(header), Some(after)) => {
                leading.push(after);
                Some(header)
            }
            (header, after) => header.or(after),
        }
    }
}
