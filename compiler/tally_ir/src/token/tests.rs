use super::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn all_is_in_discriminant_order() {
    for (i, kind) in TokenKind::ALL.iter().enumerate() {
        assert_eq!(usize::from(kind.index()), i, "{kind:?} out of order");
        assert_eq!(TokenKind::from_index(kind.index()), Some(*kind));
    }
    assert_eq!(TokenKind::from_index(200), None);
}

#[test]
fn indices_fit_a_u128_bitset() {
    assert!(TokenKind::ALL.iter().all(|k| k.index() < 128));
}

#[test]
fn describe_includes_text_for_payload_kinds() {
    let pos = Position::new(Arc::from("t"), 1, 1, 4);
    assert_eq!(
        Token::new(TokenKind::Ident, "foo", pos.clone()).describe(),
        "identifier `foo`"
    );
    assert_eq!(
        Token::new(TokenKind::CapRef, "1", pos.clone()).describe(),
        "capture group reference `$1`"
    );
    assert_eq!(Token::new(TokenKind::LBrace, "{", pos).describe(), "`{`");
}
