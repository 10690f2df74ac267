#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize("t", source).into_iter().map(|t| t.kind).collect()
}

/// (line, start_col, end_col) of each token.
fn spans(source: &str) -> Vec<(u32, u32, u32)> {
    tokenize("t", source)
        .into_iter()
        .map(|t| (t.pos.line, t.pos.start_col, t.pos.end_col))
        .collect()
}

#[test]
fn declaration_and_action() {
    use TokenKind::*;
    assert_eq!(
        kinds("counter foo by a, b\nfoo[$1, $x]++ # bump\n"),
        vec![
            Counter, Ident, By, Ident, Comma, Ident, Newline, Ident, LBracket, CapRef, Comma,
            CapRef, RBracket, Inc, Newline, Eof
        ]
    );
}

#[test]
fn operators_use_longest_match() {
    use TokenKind::*;
    assert_eq!(
        kinds("** ++ -- += == != <= >= << >> && || =~ !~ * + - = < > & | ! ~ ^ % @ ;"),
        vec![
            Pow, Inc, Dec, AddAssign, EqEq, NotEq, LtEq, GtEq, Shl, Shr, AmpAmp, PipePipe,
            Match, NotMatch, Star, Plus, Minus, Assign, Lt, Gt, Amp, Pipe, Bang, Tilde, Caret,
            Percent, At, Semicolon, Eof
        ]
    );
}

#[test]
fn keywords_are_not_identifier_prefixes() {
    use TokenKind::*;
    assert_eq!(
        kinds("counter counters next_line textual del"),
        vec![Counter, Ident, Ident, Ident, Del, Eof]
    );
}

#[test]
fn capref_text_drops_dollar() {
    let tokens = tokenize("t", "$1 $name");
    assert_eq!(tokens[0].text, "1");
    assert_eq!(tokens[1].text, "name");
}

#[test]
fn numbers() {
    let tokens = tokenize("t", "42 1.5 1e-5 12ab");
    let got: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();
    assert_eq!(
        got,
        vec![
            (TokenKind::Int, "42"),
            (TokenKind::Float, "1.5"),
            (TokenKind::Float, "1e-5"),
            (TokenKind::Invalid, "invalid numeric literal '12ab'"),
            (TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn exponent_minus_without_digits_is_subtraction() {
    use TokenKind::*;
    assert_eq!(kinds("1e-x"), vec![Invalid, Minus, Ident, Eof]);
}

#[test]
fn strings() {
    let tokens = tokenize("t", r#""a \"b\"" x"#);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "a \"b\"");
    assert_eq!((tokens[0].pos.start_col, tokens[0].pos.end_col), (1, 10));
    assert_eq!(tokens[1].kind, TokenKind::Ident);
}

#[test]
fn unterminated_string_keeps_newline() {
    use TokenKind::*;
    let tokens = tokenize("t", "\"abc\nfoo");
    assert_eq!(tokens[0].kind, Invalid);
    assert_eq!(tokens[0].text, "unterminated string literal");
    let rest: Vec<TokenKind> = tokens[1..].iter().map(|t| t.kind).collect();
    assert_eq!(rest, vec![Newline, Ident, Eof]);
    assert_eq!(tokens[2].pos.line, 2);
}

#[test]
fn slash_is_division_outside_regex_mode() {
    use TokenKind::*;
    assert_eq!(kinds("a / b"), vec![Ident, Slash, Ident, Eof]);
}

#[test]
fn regex_mode_lexes_one_body() {
    let mut lexer = Lexer::new("t", r"/foo\/bar(\d+)/ {");
    let slash = lexer.next_token();
    assert_eq!(slash.kind, TokenKind::Slash);

    lexer.enter_regex_mode();
    let regex = lexer.next_token();
    assert_eq!(regex.kind, TokenKind::Regex);
    assert_eq!(regex.text, r"foo/bar(\d+)");
    assert_eq!((regex.pos.start_col, regex.pos.end_col), (1, 16));

    assert_eq!(lexer.next_token().kind, TokenKind::LBrace);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn unterminated_regex_points_at_opening_slash() {
    let mut lexer = Lexer::new("prog", "  /abc\nfoo");
    lexer.next_token();
    lexer.enter_regex_mode();
    let bad = lexer.next_token();
    assert_eq!(bad.kind, TokenKind::Invalid);
    assert_eq!(bad.text, "unterminated regular expression");
    assert_eq!(bad.pos.to_string(), "prog:1:3");
    assert_eq!(lexer.next_token().kind, TokenKind::Newline);
    let foo = lexer.next_token();
    assert_eq!((foo.kind, foo.pos.line, foo.pos.start_col), (TokenKind::Ident, 2, 1));
}

#[test]
fn regex_at_end_of_input() {
    let mut lexer = Lexer::new("t", "/ab");
    lexer.next_token();
    lexer.enter_regex_mode();
    assert_eq!(lexer.next_token().kind, TokenKind::Invalid);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn positions_track_lines_and_characters() {
    assert_eq!(
        spans("ab cd\n  é = 1\n"),
        vec![
            (1, 1, 3),
            (1, 4, 6),
            (1, 6, 7),
            (2, 3, 4),
            (2, 5, 6),
            (2, 7, 8),
            (2, 8, 9),
            (3, 1, 1),
        ]
    );
}

#[test]
fn invalid_characters() {
    let tokens = tokenize("t", "a ` $ €");
    let got: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();
    assert_eq!(
        got,
        vec![
            (TokenKind::Ident, "a"),
            (TokenKind::Invalid, "invalid character '`'"),
            (TokenKind::Invalid, "invalid character '$'"),
            (TokenKind::Invalid, "invalid character '€'"),
            (TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn comments_are_skipped() {
    use TokenKind::*;
    assert_eq!(kinds("# only a comment\nfoo # trailing"), vec![Newline, Ident, Eof]);
}

#[test]
fn invalid_tokens_keep_their_error() {
    use tally_diagnostic::ErrorCode;

    let mut lexer = Lexer::new("t", "\"open\n12ab `\n/x");
    let mut codes = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.is(TokenKind::Eof) {
            break;
        }
        if token.is(TokenKind::Slash) {
            lexer.enter_regex_mode();
            continue;
        }
        match lexer.take_error() {
            Some(error) => {
                assert_eq!(token.kind, TokenKind::Invalid);
                assert_eq!(token.text, error.to_string());
                codes.push(error.code());
            }
            None => assert_ne!(token.kind, TokenKind::Invalid),
        }
    }
    assert_eq!(
        codes,
        vec![
            ErrorCode::E0001,
            ErrorCode::E0003,
            ErrorCode::E0004,
            ErrorCode::E0002
        ]
    );
    assert_eq!(lexer.take_error(), None);
}

#[test]
fn eof_is_sticky() {
    let mut lexer = Lexer::new("t", "x");
    assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    for _ in 0..5 {
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}

proptest! {
    #[test]
    fn never_panics_and_ends_with_eof(source in "\\PC{0,200}") {
        let tokens = tokenize("p", &source);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(
            tokens.iter().filter(|t| t.is(TokenKind::Eof)).count(),
            1
        );
    }

    #[test]
    fn regex_mode_never_panics(source in "[/a-z\\\\\n \"]{0,60}") {
        let mut lexer = Lexer::new("p", &source);
        for i in 0..200 {
            if i % 3 == 0 {
                lexer.enter_regex_mode();
            }
            let _ = lexer.next_token();
        }
        prop_assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn eof_repeats(source in "[a-z0-9 +\n]{0,40}", extra in 1usize..10) {
        let mut lexer = Lexer::new("p", &source);
        while !lexer.next_token().is(TokenKind::Eof) {}
        for _ in 0..extra {
            prop_assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn lines_never_decrease(source in "[a-z\n ;]{0,80}") {
        let tokens = tokenize("p", &source);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].pos.line <= pair[1].pos.line);
        }
    }
}
