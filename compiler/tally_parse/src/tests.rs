#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tally_ir::{ExprKind, PostfixOp, StmtKind};
use tally_metrics::MetricKind;

fn parse_str(source: &str, store: &MetricStore) -> ParseOutput {
    parse("prog.tally", source.as_bytes(), store)
}

fn rendered(out: &ParseOutput) -> Vec<String> {
    out.errors.iter().map(ToString::to_string).collect()
}

/// Parse and return the symbol table depth left behind.
fn depth_after(source: &str) -> usize {
    let store = MetricStore::new();
    let mut parser = Parser::new("p", source, &store, &ParserConfig::default());
    parser.parse_program();
    parser.symtab.depth()
}

const SAMPLE: &str = r#"# Count requests by status code.
counter requests by code
gauge last_size
text last_host
hidden gauge seen

const STATUS /(?P<code>\d{3})/

/^(?P<host>\S+) / + STATUS + / (?P<size>\d+)$/ {
  requests[$code]++
  last_size = $size
  last_host = tolower($host)
  seen += 1
} else {
  stop
}
"#;

#[test]
fn valid_program_parses_cleanly_and_deterministically() {
    let first = parse_str(SAMPLE, &MetricStore::new());
    assert!(!first.has_errors(), "{}", first.errors);
    let count = first.program.as_ref().unwrap().node_count();
    for _ in 0..5 {
        let again = parse_str(SAMPLE, &MetricStore::new());
        assert_eq!(again.program.as_ref().unwrap().node_count(), count);
        assert_eq!(again.program, first.program);
    }
}

#[test]
fn duplicate_declaration_in_same_scope() {
    let out = parse_str("counter foo\ncounter foo\n", &MetricStore::new());
    assert_eq!(
        rendered(&out),
        vec!["prog.tally:2:9: duplicate declaration of 'foo' (previously declared at prog.tally:1:9)"]
    );
    assert_eq!(
        out.errors.iter().next().and_then(|e| e.code),
        Some(ErrorCode::E2001)
    );
}

#[test]
fn shadowing_in_nested_scope_is_not_a_duplicate() {
    let out = parse_str(
        "counter foo\n/x/ {\n  counter foo\n  foo++\n}\n",
        &MetricStore::new(),
    );
    assert!(!out.has_errors(), "{}", out.errors);
}

#[test]
fn shadowed_constant_uses_inner_pattern() {
    let out = parse_str(
        "const P /a/\n/x/ {\n  const P /b/\n  P { }\n}\nP { }\n",
        &MetricStore::new(),
    );
    assert!(!out.has_errors(), "{}", out.errors);

    let entries: Vec<(&str, &str)> = out.regexes.iter().collect();
    assert_eq!(
        entries,
        vec![("P", "a"), ("re#0", "x"), ("P@3:9", "b"), ("re#1", "b"), ("re#2", "a")]
    );

    let program = out.program.unwrap();
    let StmtKind::Cond { then_block, .. } = &program.stmts[1].kind else {
        panic!("expected a pattern-action statement");
    };
    let StmtKind::Const { pattern, .. } = &then_block.stmts[0].kind else {
        panic!("expected a constant");
    };
    assert_eq!(pattern.regex, "P@3:9");
    let StmtKind::Cond { cond, .. } = &then_block.stmts[1].kind else {
        panic!("expected the inner constant as a condition");
    };
    let ExprKind::Pattern(inner) = &cond.kind else {
        panic!("expected a pattern condition");
    };
    assert_eq!(inner.source, "b");
}

#[test]
fn sibling_scope_reference_is_undeclared() {
    let out = parse_str(
        "/a/ {\n  const INNER /b/\n}\n/c/ {\n  INNER { }\n}\n",
        &MetricStore::new(),
    );
    assert_eq!(
        rendered(&out),
        vec!["prog.tally:5:3: undeclared identifier 'INNER'"]
    );
}

#[test]
fn unterminated_regex_reports_at_opening_delimiter() {
    let out = parse_str("counter c\n  /abc { c++ }\n", &MetricStore::new());
    assert_eq!(
        rendered(&out),
        vec!["prog.tally:2:3: unterminated regular expression"]
    );
    assert_eq!(
        out.errors.iter().next().and_then(|e| e.code),
        Some(ErrorCode::E0002)
    );
}

#[test]
fn counter_increment_in_pattern_action() {
    let store = MetricStore::new();
    let out = parse_str("counter foo; /bar/ { foo++ }", &store);
    assert!(!out.has_errors(), "{}", out.errors);

    let foo = store.lookup("foo").unwrap();
    assert_eq!(foo.kind(), MetricKind::Counter);

    let program = out.program.unwrap();
    assert_eq!(program.stmts.len(), 2);
    let StmtKind::Cond {
        cond,
        then_block,
        else_block: None,
    } = &program.stmts[1].kind
    else {
        panic!("expected a pattern-action statement");
    };
    let ExprKind::Pattern(pattern) = &cond.kind else {
        panic!("expected a pattern condition");
    };
    assert_eq!(pattern.source, "bar");
    assert_eq!(out.regexes.get(&pattern.regex), Some("bar"));

    assert_eq!(then_block.stmts.len(), 1);
    let StmtKind::Expr(expr) = &then_block.stmts[0].kind else {
        panic!("expected an expression statement");
    };
    let ExprKind::Postfix {
        op: PostfixOp::Inc,
        operand,
    } = &expr.kind
    else {
        panic!("expected an increment");
    };
    assert_eq!(operand.kind, ExprKind::MetricRef("foo".to_owned()));
}

#[test]
fn shared_registry_across_parses() {
    let store = MetricStore::new();
    let first = parse("a.tally", "counter requests by code\n".as_bytes(), &store);
    let same = parse("b.tally", "counter requests by code\n".as_bytes(), &store);
    assert!(!first.has_errors());
    assert!(!same.has_errors(), "{}", same.errors);
    assert_eq!(store.len(), 1);

    let conflict = parse("c.tally", "gauge requests by code\n".as_bytes(), &store);
    assert_eq!(
        rendered(&conflict),
        vec![
            "c.tally:1:7: metric 'requests' already declared as counter by (code) in 'a.tally', \
             cannot redeclare as gauge by (code)"
        ]
    );
    assert_eq!(
        conflict.errors.iter().next().and_then(|e| e.code),
        Some(ErrorCode::E2004)
    );
    assert_eq!(store.lookup("requests").unwrap().kind(), MetricKind::Counter);
}

#[test]
fn conflicting_metric_can_still_be_referenced() {
    let store = MetricStore::new();
    parse("a", "counter x\n".as_bytes(), &store);
    let out = parse("b", "gauge x\n/y/ { x = 1 }\n".as_bytes(), &store);
    assert_eq!(out.errors.len(), 1);
}

#[test]
fn integer_overflow_is_a_bad_number() {
    let out = parse_str("gauge g\ng = 99999999999999999999\n", &MetricStore::new());
    assert_eq!(
        rendered(&out),
        vec![
            "prog.tally:2:5: bad number '99999999999999999999': number too large to fit in target type"
        ]
    );
}

#[test]
fn scopes_balance_after_every_parse() {
    for source in [
        SAMPLE,
        "",
        "/a/ {",
        "/a/ { /b/ { /c/ {",
        "}}}}",
        "/(x)/ { $1 } else { $1 }",
        "def d { @d { next } }",
        "counter c\n/x/ + { c++ }",
        "((((((",
        "/unterminated",
    ] {
        assert_eq!(depth_after(source), 0, "source: {source:?}");
    }
}

#[test]
fn read_failure_is_reported_without_program() {
    let out = parse("bin", &[0xff, 0xfe, b'\n'][..], &MetricStore::new());
    assert!(out.program.is_none());
    assert_eq!(out.errors.len(), 1);
    let error = out.errors.iter().next().unwrap();
    assert_eq!(error.code, Some(ErrorCode::E9001));
    assert_eq!(error.pos.to_string(), "bin:1:1");
    assert!(error.message.starts_with("cannot read source: "));
}

#[test]
fn errors_are_collected_in_order() {
    let out = parse_str(
        "counter a\nb++\n\"open\n`\n/(?P<x>a)/ { a[$x]++ }\n",
        &MetricStore::new(),
    );
    let codes: Vec<Option<ErrorCode>> = out.errors.iter().map(|e| e.code).collect();
    assert_eq!(
        codes,
        vec![
            Some(ErrorCode::E2002),
            Some(ErrorCode::E0001),
            Some(ErrorCode::E0004),
            Some(ErrorCode::E2005),
        ]
    );
    assert!(out.program.is_some());
    assert!(out.into_result().is_err());
}

#[test]
fn into_result_on_success() {
    let out = parse_str("counter c\n/a/ { c++ }\n", &MetricStore::new());
    let (program, regexes) = out.into_result().unwrap();
    assert_eq!(program.name, "prog.tally");
    assert_eq!(regexes.len(), 1);
}

#[test]
fn nesting_limit_is_enforced_once() {
    let deep = format!("gauge g\ng = {}1{}\n", "(".repeat(300), ")".repeat(300));
    let out = parse_str(&deep, &MetricStore::new());
    let messages: Vec<&str> = out.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["expression nested too deeply"]);
    assert_eq!(
        out.errors.iter().next().and_then(|e| e.code),
        Some(ErrorCode::E1002)
    );
}

#[test]
fn nesting_limit_is_configurable() {
    let source = format!("gauge g\ng = {}1{}\n", "(".repeat(20), ")".repeat(20));
    let store = MetricStore::new();
    let tight = ParserConfig::new().with_max_nesting_depth(10);
    assert!(parse_with_config("p", source.as_bytes(), &store, &tight).has_errors());
    let roomy = ParserConfig::new().with_max_nesting_depth(100);
    assert!(!parse_with_config("p", source.as_bytes(), &store, &roomy).has_errors());
}

#[test]
fn very_deep_input_does_not_overflow_the_stack() {
    let source = format!("gauge g\ng = {}1\n", "!".repeat(5_000));
    let config = ParserConfig::new().with_max_nesting_depth(usize::MAX);
    let out = parse_with_config("p", source.as_bytes(), &MetricStore::new(), &config);
    assert!(!out.has_errors(), "{}", out.errors);
}

#[test]
fn debug_config_does_not_change_output() {
    let quiet = parse_str(SAMPLE, &MetricStore::new());
    let noisy = parse_with_config(
        "prog.tally",
        SAMPLE.as_bytes(),
        &MetricStore::new(),
        &ParserConfig::new().with_debug(2),
    );
    assert_eq!(quiet.program, noisy.program);
    assert_eq!(quiet.errors, noisy.errors);
}

proptest! {
    #[test]
    fn arbitrary_input_never_panics_and_balances_scopes(source in "\\PC{0,120}") {
        prop_assert_eq!(depth_after(&source), 0);
    }

    #[test]
    fn grammar_fragments_never_panic(
        parts in proptest::collection::vec(
            prop_oneof![
                Just("counter c by a\n"),
                Just("/(x)/ {"),
                Just("}"),
                Just(" else "),
                Just("c[$1]++"),
                Just("\n"),
                Just("const K /k/\n"),
                Just("K + /y/"),
                Just("(("),
                Just("))"),
                Just(" = "),
                Just("\"s"),
                Just("99999999999999999999"),
                Just("@d {"),
                Just("def d {"),
            ],
            0..25,
        )
    ) {
        let source: String = parts.concat();
        let out = parse_str(&source, &MetricStore::new());
        prop_assert!(out.program.is_some());
        prop_assert_eq!(depth_after(&source), 0);
    }

    #[test]
    fn node_count_is_deterministic(n in 1usize..20) {
        let mut source = String::from("counter c by k\n");
        for i in 0..n {
            source.push_str(&format!("/(a{i})/ {{ c[$1]++ }}\n"));
        }
        let a = parse_str(&source, &MetricStore::new());
        let b = parse_str(&source, &MetricStore::new());
        prop_assert!(!a.has_errors());
        // Program, declaration, then per statement: statement, pattern
        // expression, pattern, block, expression statement, postfix, index,
        // metric reference, capture reference.
        prop_assert_eq!(a.program.as_ref().map(Program::node_count), Some(2 + 9 * n));
        prop_assert_eq!(
            a.program.as_ref().map(Program::node_count),
            b.program.as_ref().map(Program::node_count)
        );
    }
}
