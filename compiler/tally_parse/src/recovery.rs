//! Error recovery.
//!
//! After a syntax error the parser abandons the statement and skips ahead to
//! the next statement boundary. Token sets are `u64` bitsets indexed by
//! [`TokenKind::index`], so membership is a single AND.

use tally_ir::TokenKind;

// TokenSet uses a u64 bitset; every discriminant must be below 64.
const _: () = assert!(
    TokenKind::ALL.len() <= 64,
    "TokenSet uses a u64 bitset; all discriminant indices must be < 64"
);

/// A set of token kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TokenSet(u64);

impl TokenSet {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self(0)
    }

    /// Add a token kind (builder form, usable in `const` items).
    #[inline]
    #[must_use]
    pub(crate) const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u64 << kind.index()))
    }

    #[inline]
    pub(crate) const fn contains(self, kind: TokenKind) -> bool {
        self.0 & (1u64 << kind.index()) != 0
    }

    pub(crate) fn iter(self) -> impl Iterator<Item = TokenKind> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros();
            bits &= bits - 1;
            u8::try_from(index).ok().and_then(TokenKind::from_index)
        })
    }

    /// Human-readable list for "expected ..." messages: "`,` or `]`".
    pub(crate) fn format_expected(self) -> String {
        let names: Vec<&'static str> = self.iter().map(TokenKind::display_name).collect();
        match names.as_slice() {
            [] => "nothing".to_owned(),
            [single] => (*single).to_owned(),
            [first, second] => format!("{first} or {second}"),
            [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
        }
    }
}

/// Tokens that end a statement.
pub(crate) const STMT_END: TokenSet = TokenSet::new()
    .with(TokenKind::Newline)
    .with(TokenKind::Semicolon)
    .with(TokenKind::RBrace)
    .with(TokenKind::Eof);

/// Tokens that separate statements and are skipped between them.
pub(crate) const STMT_SEPARATOR: TokenSet = TokenSet::new()
    .with(TokenKind::Newline)
    .with(TokenKind::Semicolon);

/// Tokens that may start a metric declaration.
pub(crate) const DECL_START: TokenSet = TokenSet::new()
    .with(TokenKind::Hidden)
    .with(TokenKind::Counter)
    .with(TokenKind::Gauge)
    .with(TokenKind::Timer)
    .with(TokenKind::Text)
    .with(TokenKind::Histogram);
