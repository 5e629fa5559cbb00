//! Grammar options.

/// Switches between the grammar alternatives PyJava accepts.
///
/// Built once and shared by reference; the transpiler never looks at it, the
/// parsed tree already reflects every choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Statements must end with an explicit `;` (or the closing `}` of a block).
    pub require_semicolons: bool,
    /// `if x: stmt` on one line.
    pub allow_colon_simple_blocks: bool,
    /// `if x stmt` without colon or braces.
    pub allow_no_colon_simple_blocks: bool,
    /// `if`/`elif`/`while`/`for`/`with`/`except`/`match` headers need parentheses.
    pub force_parens_in_statements: bool,
    /// `return`/`yield`/`raise`/`assert`/`del` operands need parentheses.
    pub force_parens_in_return_yield_raise: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            require_semicolons: false,
            allow_colon_simple_blocks: true,
            allow_no_colon_simple_blocks: true,
            force_parens_in_statements: false,
            force_parens_in_return_yield_raise: false,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_semicolons(mut self, value: bool) -> Self {
        self.require_semicolons = value;
        self
    }

    pub fn allow_colon_simple_blocks(mut self, value: bool) -> Self {
        self.allow_colon_simple_blocks = value;
        self
    }

    pub fn allow_no_colon_simple_blocks(mut self, value: bool) -> Self {
        self.allow_no_colon_simple_blocks = value;
        self
    }

    pub fn force_parens_in_statements(mut self, value: bool) -> Self {
        self.force_parens_in_statements = value;
        self
    }

    pub fn force_parens_in_return_yield_raise(mut self, value: bool) -> Self {
        self.force_parens_in_return_yield_raise = value;
        self
    }
}
