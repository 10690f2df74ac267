//! Raw tokens recognized by logos.
//!
//! Literals whose extent depends on escapes or on context (strings, regex
//! bodies, number suffixes) are only *started* here; `Lexer` finishes them by
//! hand so it can report precise errors.

use logos::Logos;
use tally_ir::TokenKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")] // Skip horizontal whitespace
pub(crate) enum RawToken {
    // === Comments (skip) ===
    #[regex(r"#[^\n]*")]
    LineComment,

    // === Newlines ===
    #[token("\n")]
    Newline,

    // === Literal starts ===
    #[token("\"")]
    Quote,
    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,
    #[regex(r"\$[0-9]+")]
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    CapRef,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // === Keywords ===
    #[token("counter")]
    Counter,
    #[token("gauge")]
    Gauge,
    #[token("timer")]
    Timer,
    #[token("text")]
    Text,
    #[token("histogram")]
    Histogram,
    #[token("hidden")]
    Hidden,
    #[token("by")]
    By,
    #[token("as")]
    As,
    #[token("buckets")]
    Buckets,
    #[token("const")]
    Const,
    #[token("def")]
    Def,
    #[token("next")]
    Next,
    #[token("otherwise")]
    Otherwise,
    #[token("else")]
    Else,
    #[token("stop")]
    Stop,
    #[token("del")]
    Del,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("**")]
    Pow,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("=")]
    Assign,
    #[token("+=")]
    AddAssign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("=~")]
    Match,
    #[token("!~")]
    NotMatch,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("@")]
    At,
}

impl RawToken {
    /// Token kind for raw tokens that need no further scanning.
    ///
    /// Returns `None` for comments and literal starts.
    pub(crate) fn simple_kind(self) -> Option<TokenKind> {
        let kind = match self {
            RawToken::LineComment | RawToken::Quote | RawToken::Number => return None,
            RawToken::Newline => TokenKind::Newline,
            RawToken::CapRef => TokenKind::CapRef,
            RawToken::Ident => TokenKind::Ident,
            RawToken::Counter => TokenKind::Counter,
            RawToken::Gauge => TokenKind::Gauge,
            RawToken::Timer => TokenKind::Timer,
            RawToken::Text => TokenKind::Text,
            RawToken::Histogram => TokenKind::Histogram,
            RawToken::Hidden => TokenKind::Hidden,
            RawToken::By => TokenKind::By,
            RawToken::As => TokenKind::As,
            RawToken::Buckets => TokenKind::Buckets,
            RawToken::Const => TokenKind::Const,
            RawToken::Def => TokenKind::Def,
            RawToken::Next => TokenKind::Next,
            RawToken::Otherwise => TokenKind::Otherwise,
            RawToken::Else => TokenKind::Else,
            RawToken::Stop => TokenKind::Stop,
            RawToken::Del => TokenKind::Del,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Pow => TokenKind::Pow,
            RawToken::Inc => TokenKind::Inc,
            RawToken::Dec => TokenKind::Dec,
            RawToken::Assign => TokenKind::Assign,
            RawToken::AddAssign => TokenKind::AddAssign,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Shl => TokenKind::Shl,
            RawToken::Shr => TokenKind::Shr,
            RawToken::Amp => TokenKind::Amp,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Caret => TokenKind::Caret,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::Bang => TokenKind::Bang,
            RawToken::AmpAmp => TokenKind::AmpAmp,
            RawToken::PipePipe => TokenKind::PipePipe,
            RawToken::Match => TokenKind::Match,
            RawToken::NotMatch => TokenKind::NotMatch,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::At => TokenKind::At,
        };
        Some(kind)
    }
}
