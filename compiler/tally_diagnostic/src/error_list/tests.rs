#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn at(line: u32, col: u32) -> Position {
    Position::new(Arc::from("prog.tally"), line, col, col + 1)
}

#[test]
fn empty_list_renders_nothing() {
    let errors = ErrorList::new();
    assert!(errors.is_empty());
    assert!(errors.has_errors().is_none());
    assert_eq!(errors.render(), "");
}

#[test]
fn render_keeps_insertion_order() {
    let mut errors = ErrorList::new();
    errors.add(at(5, 1), "second in source, first reported");
    errors.add_with_code(at(2, 9), ErrorCode::E2002, "undeclared identifier 'x'");

    assert_eq!(
        errors.render(),
        "prog.tally:5:1: second in source, first reported\n\
         prog.tally:2:9: undeclared identifier 'x'\n"
    );
    assert_eq!(errors.to_string(), errors.render());
}

#[test]
fn duplicates_are_preserved() {
    let mut errors = ErrorList::new();
    for _ in 0..3 {
        errors.add(at(1, 1), "syntax error");
    }
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.render().lines().count(), 3);
}

#[test]
fn codes_are_kept() {
    let mut errors = ErrorList::new();
    errors.add_with_code(at(1, 1), ErrorCode::E0002, "unterminated regular expression");
    errors.add(at(1, 2), "plain");
    let codes: Vec<Option<ErrorCode>> = errors.iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![Some(ErrorCode::E0002), None]);
}

#[test]
fn usable_as_std_error() {
    fn fails() -> Result<(), Box<dyn std::error::Error>> {
        let mut errors = ErrorList::new();
        errors.add(at(3, 4), "boom");
        Err(errors.into())
    }
    let err = fails().unwrap_err();
    assert_eq!(err.to_string(), "prog.tally:3:4: boom\n");
}
