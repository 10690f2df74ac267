//! Tokens produced by the lexer.

use std::fmt;

use crate::Position;

/// Token classification.
///
/// Payload-carrying kinds (numbers, strings, identifiers, regex bodies) keep
/// their source text in [`Token::text`]; numeric conversion is left to the
/// parser so that range errors surface as parse diagnostics.
///
/// `#[repr(u8)]` so a kind can index a bitset (see `TokenSet` in the parser).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TokenKind {
    // Markers
    Eof,
    /// Malformed input; `text` holds the diagnostic.
    Invalid,
    /// Placeholder substituted by the parser after reporting a bad token.
    Error,
    Newline,

    // Literals
    Int,
    Float,
    String,
    /// Regex body, lexed only in regex mode.
    Regex,
    Ident,
    /// Capture group reference: `$1`, `$name`. `text` excludes the `$`.
    CapRef,

    // Keywords
    Counter,
    Gauge,
    Timer,
    Text,
    Histogram,
    Hidden,
    By,
    As,
    Buckets,
    Const,
    Def,
    Next,
    Otherwise,
    Else,
    Stop,
    Del,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow,
    Inc,
    Dec,
    Assign,
    AddAssign,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Shl,
    Shr,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Bang,
    AmpAmp,
    PipePipe,
    /// `=~`
    Match,
    /// `!~`
    NotMatch,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    At,
}

impl TokenKind {
    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; 62] = [
        TokenKind::Eof,
        TokenKind::Invalid,
        TokenKind::Error,
        TokenKind::Newline,
        TokenKind::Int,
        TokenKind::Float,
        TokenKind::String,
        TokenKind::Regex,
        TokenKind::Ident,
        TokenKind::CapRef,
        TokenKind::Counter,
        TokenKind::Gauge,
        TokenKind::Timer,
        TokenKind::Text,
        TokenKind::Histogram,
        TokenKind::Hidden,
        TokenKind::By,
        TokenKind::As,
        TokenKind::Buckets,
        TokenKind::Const,
        TokenKind::Def,
        TokenKind::Next,
        TokenKind::Otherwise,
        TokenKind::Else,
        TokenKind::Stop,
        TokenKind::Del,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Pow,
        TokenKind::Inc,
        TokenKind::Dec,
        TokenKind::Assign,
        TokenKind::AddAssign,
        TokenKind::EqEq,
        TokenKind::NotEq,
        TokenKind::Lt,
        TokenKind::Gt,
        TokenKind::LtEq,
        TokenKind::GtEq,
        TokenKind::Shl,
        TokenKind::Shr,
        TokenKind::Amp,
        TokenKind::Pipe,
        TokenKind::Caret,
        TokenKind::Tilde,
        TokenKind::Bang,
        TokenKind::AmpAmp,
        TokenKind::PipePipe,
        TokenKind::Match,
        TokenKind::NotMatch,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::At,
    ];

    /// Discriminant as a small integer, for bitset membership.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Human-readable name used in "expected ..." diagnostics.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Invalid | TokenKind::Error => "invalid token",
            TokenKind::Newline => "newline",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Regex => "regular expression",
            TokenKind::Ident => "identifier",
            TokenKind::CapRef => "capture group reference",
            TokenKind::Counter => "`counter`",
            TokenKind::Gauge => "`gauge`",
            TokenKind::Timer => "`timer`",
            TokenKind::Text => "`text`",
            TokenKind::Histogram => "`histogram`",
            TokenKind::Hidden => "`hidden`",
            TokenKind::By => "`by`",
            TokenKind::As => "`as`",
            TokenKind::Buckets => "`buckets`",
            TokenKind::Const => "`const`",
            TokenKind::Def => "`def`",
            TokenKind::Next => "`next`",
            TokenKind::Otherwise => "`otherwise`",
            TokenKind::Else => "`else`",
            TokenKind::Stop => "`stop`",
            TokenKind::Del => "`del`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Pow => "`**`",
            TokenKind::Inc => "`++`",
            TokenKind::Dec => "`--`",
            TokenKind::Assign => "`=`",
            TokenKind::AddAssign => "`+=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Shl => "`<<`",
            TokenKind::Shr => "`>>`",
            TokenKind::Amp => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Caret => "`^`",
            TokenKind::Tilde => "`~`",
            TokenKind::Bang => "`!`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Match => "`=~`",
            TokenKind::NotMatch => "`!~`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::At => "`@`",
        }
    }

    /// Look up a kind by its discriminant index.
    pub fn from_index(index: u8) -> Option<TokenKind> {
        TokenKind::ALL.get(usize::from(index)).copied()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A classified, positioned lexeme. Immutable once produced.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            pos,
        }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Description for "unexpected ..." diagnostics: the kind name, plus the
    /// text for identifiers and literals.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Ident | TokenKind::Int | TokenKind::Float => {
                format!("{} `{}`", self.kind, self.text)
            }
            TokenKind::CapRef => format!("{} `${}`", self.kind, self.text),
            TokenKind::String => format!("string \"{}\"", self.text),
            _ => self.kind.display_name().to_owned(),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {:?}", self.kind, self.text, self.pos)
    }
}

#[cfg(test)]
mod tests;
