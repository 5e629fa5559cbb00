//! Token stream with hidden-channel queries.
//!
//! The grammar only sees default-channel tokens, addressed by their position
//! in `significant`. Hidden tokens stay in `tokens` so the parser can ask
//! where comments and line breaks are relative to the cursor.

use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;
use super::lexer::{Token, token_text};

pub struct TokenStream<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    /// Raw indices of default-channel tokens; the last entry is the `Eof` sentinel.
    significant: Vec<usize>,
    /// Position of the matching closer for each opening bracket position.
    closers: Vec<Option<usize>>,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str, mut tokens: Vec<Token>) -> Self {
        let end = TextSize::from(source.len() as u32);
        tokens.push(Token::new(SyntaxKind::Eof, TextRange::empty(end)));
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        let closers = match_brackets(&tokens, &significant);
        Self {
            source,
            tokens,
            significant,
            closers,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn raw_len(&self) -> usize {
        self.tokens.len()
    }

    /// Number of default-channel tokens including the `Eof` sentinel.
    pub fn len(&self) -> usize {
        self.significant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.significant.len() <= 1
    }

    /// Raw index of the `pos`-th default-channel token; clamps to `Eof`.
    #[inline]
    pub fn raw_index(&self, pos: usize) -> usize {
        let last = self.significant.len() - 1;
        self.significant[pos.min(last)]
    }

    #[inline]
    pub fn token(&self, pos: usize) -> Token {
        self.tokens[self.raw_index(pos)]
    }

    #[inline]
    pub fn kind(&self, pos: usize) -> SyntaxKind {
        self.token(pos).kind
    }

    #[inline]
    pub fn text(&self, pos: usize) -> &'src str {
        token_text(self.source, &self.tokens[self.raw_index(pos)])
    }

    #[inline]
    pub fn raw(&self, raw: usize) -> Token {
        self.tokens[raw]
    }

    #[inline]
    pub fn raw_text(&self, raw: usize) -> &'src str {
        token_text(self.source, &self.tokens[raw])
    }

    /// Position of the bracket closing the one opened at `pos`, if any.
    pub fn closer(&self, pos: usize) -> Option<usize> {
        self.closers.get(pos).copied().flatten()
    }

    /// Kind of the token that ends whatever starts at `pos`: the closer for
    /// a paired bracket, the token itself otherwise.
    pub fn group_end_kind(&self, pos: usize) -> SyntaxKind {
        match self.closer(pos) {
            Some(close) => self.kind(close),
            None => self.kind(pos),
        }
    }

    /// Scans the positions in `from..to` that sit directly inside the same
    /// bracket level, skipping nested groups. Stops at the first position
    /// `visit` answers `Some` for.
    pub fn scan_level<T>(
        &self,
        from: usize,
        to: usize,
        mut visit: impl FnMut(usize, SyntaxKind) -> Option<T>,
    ) -> Option<T> {
        let mut pos = from;
        while pos < to.min(self.len()) {
            let kind = self.kind(pos);
            if let Some(found) = visit(pos, kind) {
                return Some(found);
            }
            pos = match self.closer(pos) {
                Some(close) => close + 1,
                None => pos + 1,
            };
        }
        None
    }

    /// Raw index range of the hidden tokens directly before `pos`.
    fn hidden_before(&self, pos: usize) -> std::ops::Range<usize> {
        let end = self.raw_index(pos);
        let start = if pos == 0 {
            0
        } else {
            self.raw_index(pos - 1) + 1
        };
        start..end
    }

    /// A line break separates the token at `pos` from the one before it:
    /// a hidden newline, or a block comment spanning lines.
    pub fn line_terminator_ahead(&self, pos: usize) -> bool {
        if pos == 0 {
            return false;
        }
        self.hidden_before(pos).any(|raw| self.breaks_line(raw))
    }

    fn breaks_line(&self, raw: usize) -> bool {
        match self.tokens[raw].kind {
            SyntaxKind::Newline => true,
            SyntaxKind::BlockComment => self.raw_text(raw).contains(['\r', '\n']),
            _ => false,
        }
    }

    /// Comments on the same line directly after the raw token `raw`, with
    /// only horizontal whitespace around them. A multi-line block comment
    /// ends the run.
    pub fn trailing_comments(&self, raw: usize) -> Vec<usize> {
        let mut comments = Vec::new();
        for i in raw + 1..self.tokens.len() {
            match self.tokens[i].kind {
                SyntaxKind::Whitespace if !self.raw_text(i).contains(['\r', '\n']) => {}
                kind if kind.is_comment() => {
                    comments.push(i);
                    if self.breaks_line(i) {
                        break;
                    }
                }
                _ => break,
            }
        }
        comments
    }

    /// Comments between the previous default-channel token and `pos`, in
    /// source order. A comment on the previous token's line belongs to that
    /// token and is skipped.
    pub fn preceding_comments(&self, pos: usize) -> Vec<usize> {
        let mut after_line_break = pos == 0;
        let mut comments = Vec::new();
        for raw in self.hidden_before(pos) {
            if after_line_break && self.tokens[raw].kind.is_comment() {
                comments.push(raw);
            }
            if self.breaks_line(raw) {
                after_line_break = true;
            }
        }
        comments
    }

    /// Start offset of the line containing byte `offset`.
    fn line_start(&self, offset: usize) -> usize {
        self.source[..offset]
            .rfind(['\n', '\r'])
            .map_or(0, |i| i + 1)
    }

    /// Visual indentation of the line the raw token starts on; tabs advance
    /// to the next multiple of 8.
    pub fn line_indent(&self, raw: usize) -> usize {
        let offset: usize = self.tokens[raw].span.start().into();
        let start = self.line_start(offset);
        let mut width = 0;
        for c in self.source[start..].chars() {
            match c {
                ' ' => width += 1,
                '\t' => width = (width / 8 + 1) * 8,
                '\x0C' => width = 0,
                _ => break,
            }
        }
        width
    }

    /// Character column of the raw token within its line.
    pub fn column(&self, raw: usize) -> usize {
        let offset: usize = self.tokens[raw].span.start().into();
        let start = self.line_start(offset);
        self.source[start..offset].chars().count()
    }
}

/// Pairs brackets by position among the default-channel tokens. A closer
/// that does not match the innermost opener is left unpaired.
fn match_brackets(tokens: &[Token], significant: &[usize]) -> Vec<Option<usize>> {
    let mut closers = vec![None; significant.len()];
    let mut open: Vec<(usize, SyntaxKind)> = Vec::new();
    for (pos, &raw) in significant.iter().enumerate() {
        let kind = tokens[raw].kind;
        let expected_opener = match kind {
            SyntaxKind::ParenOpen | SyntaxKind::BracketOpen | SyntaxKind::BraceOpen => {
                open.push((pos, kind));
                continue;
            }
            SyntaxKind::ParenClose => SyntaxKind::ParenOpen,
            SyntaxKind::BracketClose => SyntaxKind::BracketOpen,
            SyntaxKind::BraceClose => SyntaxKind::BraceOpen,
            _ => continue,
        };
        if let Some(&(start, opener)) = open.last()
            && opener == expected_opener
        {
            open.pop();
            closers[start] = Some(pos);
        }
    }
    closers
}
