//! Bracket nesting tracked while lexing.
//!
//! Newlines inside `(...)` and `[...]` are insignificant; inside `{...}` (code
//! blocks and dict displays) and at top level they can end statements.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bracket {
    Paren,
    Square,
    Curly,
    Angle,
}

impl Bracket {
    pub fn from_open(c: char) -> Option<Self> {
        match c {
            '(' => Some(Bracket::Paren),
            '[' => Some(Bracket::Square),
            '{' => Some(Bracket::Curly),
            '<' => Some(Bracket::Angle),
            _ => None,
        }
    }

    pub fn from_close(c: char) -> Option<Self> {
        match c {
            ')' => Some(Bracket::Paren),
            ']' => Some(Bracket::Square),
            '}' => Some(Bracket::Curly),
            '>' => Some(Bracket::Angle),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BracketStack {
    stack: Vec<Bracket>,
}

impl BracketStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, open: char) {
        if let Some(bracket) = Bracket::from_open(open) {
            self.stack.push(bracket);
        }
    }

    /// Pops only when the innermost bracket matches; balance is the parser's
    /// concern.
    pub fn exit(&mut self, close: char) {
        if let Some(bracket) = Bracket::from_close(close)
            && self.top() == Some(bracket)
        {
            self.stack.pop();
        }
    }

    pub fn top(&self) -> Option<Bracket> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn in_parens(&self) -> bool {
        self.top() == Some(Bracket::Paren)
    }

    pub fn in_square_brackets(&self) -> bool {
        self.top() == Some(Bracket::Square)
    }

    pub fn in_curly_brackets(&self) -> bool {
        self.top() == Some(Bracket::Curly)
    }

    pub fn in_angle_brackets(&self) -> bool {
        self.top() == Some(Bracket::Angle)
    }

    pub fn in_parens_or_square_brackets(&self) -> bool {
        self.in_parens() || self.in_square_brackets()
    }

    pub fn in_curly_brackets_or_none(&self) -> bool {
        self.top().is_none_or(|b| b == Bracket::Curly)
    }
}
