use super::*;
use pretty_assertions::assert_eq;
use tally_metrics::MetricStore;

use crate::ParserConfig;

fn parser(source: &str) -> Parser<'_> {
    Parser::new("t", source, &MetricStore::new(), &ParserConfig::default())
}

fn messages(parser: &Parser<'_>) -> Vec<String> {
    parser.errors.iter().map(ToString::to_string).collect()
}

#[test]
fn lookahead_is_primed() {
    let p = parser("foo 1");
    assert_eq!(p.current_kind(), TokenKind::Ident);
    assert_eq!(p.current.text, "foo");
}

#[test]
fn integers_and_floats_are_converted() {
    let mut p = parser("42 2.5");
    assert_eq!(p.value, TokenValue::Int(42));
    let (token, value) = p.bump();
    assert_eq!((token.kind, value), (TokenKind::Int, TokenValue::Int(42)));
    assert_eq!(p.value, TokenValue::Float(2.5));
}

#[test]
fn overflowing_integer_becomes_placeholder() {
    let p = parser("99999999999999999999");
    assert_eq!(p.current_kind(), TokenKind::Error);
    assert_eq!(
        messages(&p),
        vec!["t:1:1: bad number '99999999999999999999': number too large to fit in target type"]
    );
    assert_eq!(p.errors.iter().next().and_then(|e| e.code), Some(ErrorCode::E0003));
}

#[test]
fn infinite_float_is_a_bad_number() {
    let p = parser("1e999");
    assert_eq!(p.current_kind(), TokenKind::Error);
    assert_eq!(messages(&p), vec!["t:1:1: bad number '1e999': value out of range"]);
}

#[test]
fn invalid_tokens_are_reported_once() {
    let mut p = parser("` foo");
    assert_eq!(p.current_kind(), TokenKind::Error);
    assert_eq!(p.errors.len(), 1);
    assert_eq!(p.errors.iter().next().and_then(|e| e.code), Some(ErrorCode::E0004));

    // A syntax error at the placeholder is not reported again.
    p.syntax_error("expression");
    assert_eq!(p.errors.len(), 1);

    p.bump();
    assert_eq!(p.current_kind(), TokenKind::Ident);
}

#[test]
fn lexical_error_code_comes_from_the_lexer() {
    let p = parser("\"open\n");
    assert_eq!(p.current_kind(), TokenKind::Error);
    let reported: Vec<(Option<ErrorCode>, &str)> = p
        .errors
        .iter()
        .map(|e| (e.code, e.message.as_str()))
        .collect();
    assert_eq!(
        reported,
        vec![(Some(ErrorCode::E0001), "unterminated string literal")]
    );
}

#[test]
fn syntax_error_message() {
    let mut p = parser("foo");
    p.syntax_error("`{`");
    assert_eq!(
        messages(&p),
        vec!["t:1:1: syntax error: unexpected identifier `foo`, expected `{`"]
    );
}

#[test]
fn expect_and_eat() {
    let mut p = parser("a , b");
    assert!(p.expect(TokenKind::Ident).is_ok());
    assert!(!p.eat(TokenKind::Semicolon));
    assert!(p.eat(TokenKind::Comma));
    assert!(p.expect(TokenKind::Comma).is_err());
    assert_eq!(
        messages(&p),
        vec!["t:1:5: syntax error: unexpected identifier `b`, expected `,`"]
    );
}

#[test]
fn expect_one_of_lists_every_alternative() {
    let set = TokenSet::new()
        .with(TokenKind::Comma)
        .with(TokenKind::RParen);
    let mut p = parser(", ) ]");
    assert_eq!(p.expect_one_of(set).map(|t| t.kind), Ok(TokenKind::Comma));
    assert_eq!(p.expect_one_of(set).map(|t| t.kind), Ok(TokenKind::RParen));
    assert!(p.expect_one_of(set).is_err());
    assert_eq!(
        messages(&p),
        vec!["t:1:5: syntax error: unexpected `]`, expected `)` or `,`"]
    );
}

#[test]
fn synchronize_skips_to_statement_end() {
    let mut p = parser("a b { c \n d } e\nf");
    p.synchronize();
    assert_eq!(p.current_kind(), TokenKind::Newline);
    p.bump();
    assert_eq!(p.current.text, "f");
}

#[test]
fn synchronize_stops_at_enclosing_brace() {
    let mut p = parser("a b } c");
    p.synchronize();
    assert_eq!(p.current_kind(), TokenKind::RBrace);
}

#[test]
fn report_at_current_token_uses_lookahead() {
    let mut p = parser("\n  x");
    p.skip_newlines();
    p.report_at_current_token(ErrorCode::E2002, "boom");
    assert_eq!(messages(&p), vec!["t:2:3: boom"]);
}
