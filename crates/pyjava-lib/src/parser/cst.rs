//! Token kinds for PyJava.
//!
//! `SyntaxKind` is derived with Logos; hidden-channel kinds (whitespace,
//! newlines, comments) come last before the sentinels so that `TokenSet`
//! bits stay dense.

use logos::Logos;

/// Skips to the closing `#}` of a block comment. No match means the comment
/// is unterminated, which the lexer reports as garbage.
fn block_comment(lex: &mut logos::Lexer<SyntaxKind>) -> bool {
    match lex.remainder().find("#}") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("->")]
    Arrow,
    #[token(":=")]
    ColonEquals,
    #[token("=")]
    Equals,
    #[token("@")]
    At,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    DoubleStar,
    #[token("/")]
    Slash,
    #[token("//")]
    DoubleSlash,
    #[token("%")]
    Percent,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amper,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    LeftShift,
    #[token(">>")]
    RightShift,

    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEq,
    #[token(">=")]
    GreaterEq,

    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("//=")]
    DoubleSlashEq,
    #[token("%=")]
    PercentEq,
    #[token("**=")]
    DoubleStarEq,
    #[token("@=")]
    AtEq,
    #[token("&=")]
    AmperEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    LeftShiftEq,
    #[token(">>=")]
    RightShiftEq,

    #[token("False")]
    KwFalse,
    #[token("None")]
    KwNone,
    #[token("True")]
    KwTrue,
    #[token("and")]
    KwAnd,
    #[token("as")]
    KwAs,
    #[token("assert")]
    KwAssert,
    #[token("async")]
    KwAsync,
    #[token("await")]
    KwAwait,
    #[token("break")]
    KwBreak,
    #[token("class")]
    KwClass,
    #[token("continue")]
    KwContinue,
    #[token("def")]
    KwDef,
    #[token("del")]
    KwDel,
    #[token("elif")]
    KwElif,
    #[token("else")]
    KwElse,
    #[token("except")]
    KwExcept,
    #[token("finally")]
    KwFinally,
    #[token("for")]
    KwFor,
    #[token("from")]
    KwFrom,
    #[token("global")]
    KwGlobal,
    #[token("if")]
    KwIf,
    #[token("import")]
    KwImport,
    #[token("in")]
    KwIn,
    #[token("is")]
    KwIs,
    #[token("lambda")]
    KwLambda,
    #[token("nonlocal")]
    KwNonlocal,
    #[token("not")]
    KwNot,
    #[token("or")]
    KwOr,
    #[token("pass")]
    KwPass,
    #[token("raise")]
    KwRaise,
    #[token("return")]
    KwReturn,
    #[token("try")]
    KwTry,
    #[token("while")]
    KwWhile,
    #[token("with")]
    KwWith,
    #[token("yield")]
    KwYield,

    /// Identifier, including the soft keywords `match`, `case` and `_`.
    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Name,

    #[regex(r"0[xX](?:_?[0-9a-fA-F])+|0[oO](?:_?[0-7])+|0[bB](?:_?[01])+")]
    #[regex(
        r"(?:[0-9](?:_?[0-9])*(?:\.(?:[0-9](?:_?[0-9])*)?)?|\.[0-9](?:_?[0-9])*)(?:[eE][+-]?[0-9](?:_?[0-9])*)?[jJ]?"
    )]
    Number,

    #[regex(r#"(?:[rRuUbBfF]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?'(?:[^'\\\r\n]|\\[\s\S])*'"#)]
    #[regex(r#"(?:[rRuUbBfF]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?"(?:[^"\\\r\n]|\\[\s\S])*""#)]
    #[regex(
        r#"(?:[rRuUbBfF]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?'''(?:[^'\\]|\\[\s\S]|'(?:[^'\\]|\\[\s\S])|''(?:[^'\\]|\\[\s\S]))*'''"#
    )]
    #[regex(
        r#"(?:[rRuUbBfF]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?"""(?:[^"\\]|\\[\s\S]|"(?:[^"\\]|\\[\s\S])|""(?:[^"\\]|\\[\s\S]))*""""#
    )]
    Str,

    /// Horizontal whitespace and backslash line continuations.
    #[regex(r"[ \t\x0C]+")]
    #[regex(r"\\\r?\n")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    #[token("\r")]
    Newline,

    #[regex(r"#(?:[^{\r\n][^\r\n]*)?", allow_greedy = true)]
    LineComment,

    /// `#{ ... #}`, may span lines.
    #[token("#{", block_comment)]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
    /// End of input
    Eof,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Hidden-channel kinds: present in source, invisible to grammar rules.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, LineComment | BlockComment)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (KwFalse as u16..=KwYield as u16).contains(&(self as u16))
    }

    /// Human-readable name used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Name => "name",
            Number => "number",
            Str => "string",
            Newline => "newline",
            Garbage => "unrecognized input",
            Eof => "end of file",
            _ => "token",
        }
    }
}

/// 128-bit set of [`SyntaxKind`]s for O(1) membership tests.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const AUG_ASSIGN: TokenSet = TokenSet::new(&[
        PlusEq,
        MinusEq,
        StarEq,
        SlashEq,
        DoubleSlashEq,
        PercentEq,
        DoubleStarEq,
        AtEq,
        AmperEq,
        PipeEq,
        CaretEq,
        LeftShiftEq,
        RightShiftEq,
    ]);

    pub const COMPARISON: TokenSet = TokenSet::new(&[
        EqEq, NotEq, Less, Greater, LessEq, GreaterEq, KwIn, KwIs,
    ]);

    /// Tokens after a parenthesized header condition that mean the
    /// parentheses were only part of a longer expression. Tokens that can
    /// also start a statement (`+`, `-`, `*`, `[`...) are absent
    /// except for the postfix `(`/`[` and `.`.
    pub const CONDITION_CONTINUATION: TokenSet = TokenSet::new(&[
        EqEq,
        NotEq,
        Less,
        Greater,
        LessEq,
        GreaterEq,
        KwIn,
        KwIs,
        KwAnd,
        KwOr,
        Pipe,
        Caret,
        Amper,
        LeftShift,
        RightShift,
        Slash,
        DoubleSlash,
        Percent,
        DoubleStar,
        Dot,
        ParenOpen,
        BracketOpen,
    ]);

    /// FIRST set of expressions.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        ParenOpen,
        BracketOpen,
        BraceOpen,
        Ellipsis,
        Plus,
        Minus,
        Tilde,
        Star,
        KwFalse,
        KwNone,
        KwTrue,
        KwAwait,
        KwAsync,
        KwClass,
        KwLambda,
        KwNot,
        KwYield,
        Name,
        Number,
        Str,
    ]);

    /// Tokens that can end an expression. A `{` after one of them opens a
    /// block rather than a display.
    pub const EXPR_END: TokenSet = TokenSet::new(&[
        ParenClose,
        BracketClose,
        BraceClose,
        Ellipsis,
        KwFalse,
        KwNone,
        KwTrue,
        Name,
        Number,
        Str,
    ]);

    /// Closing brackets and separators that end an optional operand.
    pub const OPERAND_END: TokenSet = TokenSet::new(&[
        ParenClose,
        BracketClose,
        BraceClose,
        Semicolon,
        Colon,
        Comma,
        Equals,
        Eof,
    ]);
}
