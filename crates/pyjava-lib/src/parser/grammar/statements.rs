use crate::ast::{Alias, AugOp, Expr, File, ImportNames, Stmt, StmtKind};
use crate::parser::core::{PResult, Parser};
use crate::parser::cst::SyntaxKind;

impl Parser<'_> {
    pub fn parse_file(&mut self) -> PResult<File> {
        let mut body = Vec::new();
        while !self.eof() {
            body.push(self.parse_statement()?);
        }
        let dangling = self.take_preceding_comments();
        Ok(File { body, dangling })
    }

    pub(super) fn parse_statement(&mut self) -> PResult<Stmt> {
        let leading = self.take_preceding_comments();
        let mut stmt = self.nested(|p| {
            if p.at_compound_statement() {
                return p.parse_compound_statement();
            }
            if p.currently_is_name("match")
                && let Some(stmt) = p.try_parse_match()?
            {
                return Ok(stmt);
            }
            p.parse_simple_statement()
        })?;
        stmt.leading = leading;
        Ok(stmt)
    }

    fn at_compound_statement(&self) -> bool {
        match self.current() {
            SyntaxKind::At
            | SyntaxKind::KwDef
            | SyntaxKind::KwIf
            | SyntaxKind::KwWhile
            | SyntaxKind::KwFor
            | SyntaxKind::KwWith
            | SyntaxKind::KwTry => true,
            SyntaxKind::KwAsync => matches!(
                self.nth(1),
                SyntaxKind::KwDef | SyntaxKind::KwFor | SyntaxKind::KwWith
            ),
            // `class(...) {}` in statement position is an anonymous class expression
            SyntaxKind::KwClass => self.next_is(SyntaxKind::Name),
            _ => false,
        }
    }

    fn parse_compound_statement(&mut self) -> PResult<Stmt> {
        let kind = match self.current() {
            SyntaxKind::At => self.rule("decorated definition", Self::parse_decorated)?,
            SyntaxKind::KwDef => self.rule("function definition", |p| {
                p.parse_function_def(Vec::new(), Vec::new())
            })?,
            SyntaxKind::KwClass => self.rule("class definition", |p| {
                p.parse_class_def(Vec::new(), Vec::new())
            })?,
            SyntaxKind::KwIf => self.rule("if statement", Self::parse_if)?,
            SyntaxKind::KwWhile => self.rule("while statement", Self::parse_while)?,
            SyntaxKind::KwTry => self.rule("try statement", Self::parse_try)?,
            SyntaxKind::KwFor => self.rule("for statement", Self::parse_for)?,
            SyntaxKind::KwWith => self.rule("with statement", Self::parse_with)?,
            SyntaxKind::KwAsync => match self.nth(1) {
                SyntaxKind::KwDef => self.rule("function definition", |p| {
                    p.parse_function_def(Vec::new(), Vec::new())
                })?,
                SyntaxKind::KwFor => self.rule("for statement", Self::parse_for)?,
                _ => self.rule("with statement", Self::parse_with)?,
            },
            _ => return Err(self.no_viable_alternative()),
        };

        let mut stmt = Stmt::new(kind);
        // `if x { ... };` is accepted for symmetry with simple statements
        if self.stream.kind(self.pos - 1) == SyntaxKind::BraceClose
            && self.eat_token(SyntaxKind::Semicolon)
        {
            stmt.trailing = self.take_trailing_comment();
        }
        Ok(stmt)
    }

    fn parse_simple_statement(&mut self) -> PResult<Stmt> {
        if self.eat_token(SyntaxKind::Semicolon) {
            let mut stmt = Stmt::new(StmtKind::Pass);
            stmt.trailing = self.take_trailing_comment();
            return Ok(stmt);
        }

        let kind = self.parse_small_statement()?;
        let trailing = self.take_trailing_comment();
        self.expect_terminator()?;

        let mut stmt = Stmt::new(kind);
        stmt.trailing = trailing.or_else(|| self.take_trailing_comment());
        Ok(stmt)
    }

    /// `;` | before `}` | line break or end of file (optional semicolons only)
    fn expect_terminator(&mut self) -> PResult<()> {
        if self.eat_token(SyntaxKind::Semicolon) || self.currently_is(SyntaxKind::BraceClose) {
            return Ok(());
        }
        if self.options.require_semicolons {
            return Err(self.error("expected semicolon"));
        }
        if self.eof() || self.raw_line_break() {
            return Ok(());
        }
        Err(self.error("expected semicolon or line break"))
    }

    fn parse_small_statement(&mut self) -> PResult<StmtKind> {
        match self.current() {
            SyntaxKind::KwPass => {
                self.bump();
                Ok(StmtKind::Pass)
            }
            SyntaxKind::KwBreak => {
                self.bump();
                Ok(StmtKind::Break)
            }
            SyntaxKind::KwContinue => {
                self.bump();
                Ok(StmtKind::Continue)
            }
            SyntaxKind::KwReturn => self.rule("return statement", Self::parse_return),
            SyntaxKind::KwRaise => self.rule("raise statement", Self::parse_raise),
            SyntaxKind::KwGlobal => {
                self.bump();
                Ok(StmtKind::Global(self.parse_name_list()?))
            }
            SyntaxKind::KwNonlocal => {
                self.bump();
                Ok(StmtKind::Nonlocal(self.parse_name_list()?))
            }
            SyntaxKind::KwImport => self.rule("import statement", Self::parse_import),
            SyntaxKind::KwFrom => self.rule("import statement", Self::parse_from_import),
            SyntaxKind::KwDel => self.rule("del statement", Self::parse_del),
            SyntaxKind::KwAssert => self.rule("assert statement", Self::parse_assert),
            _ => self.rule("expression statement", Self::parse_expression_statement),
        }
    }

    fn parse_expression_statement(&mut self) -> PResult<StmtKind> {
        let first = if self.currently_is(SyntaxKind::KwYield) {
            self.parse_yield_expression()?
        } else {
            self.parse_star_expressions()?
        };

        if self.eat_token(SyntaxKind::Colon) {
            let annotation = self.parse_expression()?;
            let value = if self.eat_token(SyntaxKind::Equals) {
                Some(self.parse_assignment_value()?)
            } else {
                None
            };
            return Ok(StmtKind::AnnAssign {
                target: first,
                annotation,
                value,
            });
        }

        if let Some(op) = aug_op(self.current()) {
            self.bump();
            let value = self.parse_assignment_value()?;
            return Ok(StmtKind::AugAssign {
                target: first,
                op,
                value,
            });
        }

        let mut targets = Vec::new();
        let mut value = first;
        while self.eat_token(SyntaxKind::Equals) {
            let next = self.parse_assignment_value()?;
            targets.push(std::mem::replace(&mut value, next));
        }
        if targets.is_empty() {
            return Ok(StmtKind::Expr(value));
        }
        Ok(StmtKind::Assign { targets, value })
    }

    fn parse_assignment_value(&mut self) -> PResult<Expr> {
        if self.currently_is(SyntaxKind::KwYield) {
            return self.parse_yield_expression();
        }
        self.parse_star_expressions()
    }

    /// `"return"` star_expressions?
    fn parse_return(&mut self) -> PResult<StmtKind> {
        self.assert_current(SyntaxKind::KwReturn);
        self.bump();
        if self.at_operand_end() {
            return Ok(StmtKind::Return(None));
        }
        Ok(StmtKind::Return(Some(self.parse_operand(true)?)))
    }

    /// `"raise"` (expression (`"from"` expression)?)?
    fn parse_raise(&mut self) -> PResult<StmtKind> {
        self.assert_current(SyntaxKind::KwRaise);
        self.bump();
        if self.at_operand_end() {
            return Ok(StmtKind::Raise {
                exc: None,
                cause: None,
            });
        }
        let exc = self.parse_operand(false)?;
        let cause = if self.eat_token(SyntaxKind::KwFrom) {
            Some(self.parse_operand(false)?)
        } else {
            None
        };
        Ok(StmtKind::Raise {
            exc: Some(exc),
            cause,
        })
    }

    fn parse_name_list(&mut self) -> PResult<Vec<String>> {
        let mut names = vec![self.expect_name("name")?];
        while self.eat_token(SyntaxKind::Comma) {
            names.push(self.expect_name("name")?);
        }
        Ok(names)
    }

    fn parse_dotted_name(&mut self) -> PResult<String> {
        let mut name = self.expect_name("module name")?;
        while self.eat_token(SyntaxKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_name("name")?);
        }
        Ok(name)
    }

    fn parse_alias(&mut self, dotted: bool) -> PResult<Alias> {
        let name = if dotted {
            self.parse_dotted_name()?
        } else {
            self.expect_name("name")?
        };
        let asname = if self.eat_token(SyntaxKind::KwAs) {
            Some(self.expect_name("name")?)
        } else {
            None
        };
        Ok(Alias { name, asname })
    }

    /// `"import"` dotted_as_name (`','` dotted_as_name)*
    fn parse_import(&mut self) -> PResult<StmtKind> {
        self.assert_current(SyntaxKind::KwImport);
        self.bump();
        let mut names = vec![self.parse_alias(true)?];
        while self.eat_token(SyntaxKind::Comma) {
            names.push(self.parse_alias(true)?);
        }
        Ok(StmtKind::Import(names))
    }

    /// `"from"` (`'.'` | `'...'`)* dotted_name? `"import"` (`'*'` | names | `'('` names `')'`)
    fn parse_from_import(&mut self) -> PResult<StmtKind> {
        self.assert_current(SyntaxKind::KwFrom);
        self.bump();

        let mut level = 0;
        loop {
            match self.current() {
                SyntaxKind::Dot => level += 1,
                SyntaxKind::Ellipsis => level += 3,
                _ => break,
            }
            self.bump();
        }

        let module = if self.currently_is(SyntaxKind::Name) {
            Some(self.parse_dotted_name()?)
        } else if level == 0 {
            return Err(self.error("expected module name"));
        } else {
            None
        };

        self.expect(SyntaxKind::KwImport, "'import'")?;

        if self.eat_token(SyntaxKind::Star) {
            return Ok(StmtKind::ImportFrom {
                level,
                module,
                names: ImportNames::Star,
            });
        }

        let parenthesized = self.eat_token(SyntaxKind::ParenOpen);
        let mut names = vec![self.parse_alias(false)?];
        while self.eat_token(SyntaxKind::Comma) {
            if parenthesized && self.currently_is(SyntaxKind::ParenClose) {
                break;
            }
            names.push(self.parse_alias(false)?);
        }
        if parenthesized {
            self.expect(SyntaxKind::ParenClose, "')'")?;
        }

        Ok(StmtKind::ImportFrom {
            level,
            module,
            names: ImportNames::Names(names),
        })
    }

    /// `"del"` targets, or `"del"` `'('` targets `')'` when parentheses are forced.
    fn parse_del(&mut self) -> PResult<StmtKind> {
        self.assert_current(SyntaxKind::KwDel);
        self.bump();

        if self.options.force_parens_in_return_yield_raise {
            if !self.currently_is(SyntaxKind::ParenOpen) {
                return Err(self.no_viable_alternative());
            }
            let atom = self.parse_atom()?;
            if !self.at_operand_end() {
                return Err(self.no_viable_alternative());
            }
            return match atom {
                Expr::Group(inner) => Ok(StmtKind::Delete(vec![*inner])),
                Expr::Tuple {
                    elts,
                    parenthesized: true,
                } if !elts.is_empty() => Ok(StmtKind::Delete(elts)),
                _ => Err(self.no_viable_alternative()),
            };
        }

        let mut targets = vec![self.parse_bitwise_or()?];
        while self.eat_token(SyntaxKind::Comma) {
            if self.at_operand_end() {
                break;
            }
            targets.push(self.parse_bitwise_or()?);
        }
        Ok(StmtKind::Delete(targets))
    }

    /// `"assert"` expression (`','` expression)?
    ///
    /// With forced parentheses the operands share one pair of parentheses,
    /// `assert (test, msg)`, and each is rendered in its own group.
    fn parse_assert(&mut self) -> PResult<StmtKind> {
        self.assert_current(SyntaxKind::KwAssert);
        self.bump();

        if !self.options.force_parens_in_return_yield_raise {
            let test = self.parse_expression()?;
            let msg = if self.eat_token(SyntaxKind::Comma) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            return Ok(StmtKind::Assert { test, msg });
        }

        if !self.currently_is(SyntaxKind::ParenOpen) {
            return Err(self.no_viable_alternative());
        }
        let atom = self.parse_atom()?;
        if !self.at_operand_end() {
            return Err(self.no_viable_alternative());
        }
        match atom {
            Expr::Group(test) => Ok(StmtKind::Assert {
                test: Expr::Group(test),
                msg: None,
            }),
            Expr::Tuple {
                elts,
                parenthesized: true,
            } if (1..=2).contains(&elts.len()) => {
                let mut elts = elts.into_iter().map(Expr::group);
                match (elts.next(), elts.next()) {
                    (Some(test), msg) => Ok(StmtKind::Assert { test, msg }),
                    (None, _) => Err(self.no_viable_alternative()),
                }
            }
            _ => Err(self.no_viable_alternative()),
        }
    }
}

fn aug_op(kind: SyntaxKind) -> Option<AugOp> {
    let op = match kind {
        SyntaxKind::PlusEq => AugOp::Add,
        SyntaxKind::MinusEq => AugOp::Sub,
        SyntaxKind::StarEq => AugOp::Mult,
        SyntaxKind::AtEq => AugOp::MatMult,
        SyntaxKind::SlashEq => AugOp::Div,
        SyntaxKind::PercentEq => AugOp::Mod,
        SyntaxKind::AmperEq => AugOp::BitAnd,
        SyntaxKind::PipeEq => AugOp::BitOr,
        SyntaxKind::CaretEq => AugOp::BitXor,
        SyntaxKind::LeftShiftEq => AugOp::LShift,
        SyntaxKind::RightShiftEq => AugOp::RShift,
        SyntaxKind::DoubleStarEq => AugOp::Pow,
        SyntaxKind::DoubleSlashEq => AugOp::FloorDiv,
        _ => return None,
    };
    Some(op)
}
