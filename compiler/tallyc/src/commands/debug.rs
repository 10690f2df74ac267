//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::fmt::Write as _;

use tally_ir::{Token, TokenKind};
use tally_metrics::MetricStore;
use tally_parse::{parse_source, ParseOutput, ParserConfig};

use super::read_file;

/// One line per token.
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(out, "{token:?}");
    }
    out
}

/// The AST debug tree followed by the regex table.
pub fn dump_ast(output: &ParseOutput) -> String {
    let mut out = String::new();
    if let Some(program) = &output.program {
        let _ = writeln!(out, "{program:#?}");
        let _ = writeln!(out, "nodes: {}", program.node_count());
    }
    if !output.regexes.is_empty() {
        out.push_str("regexes:\n");
        for (name, pattern) in output.regexes.iter() {
            let _ = writeln!(out, "  {name} = /{pattern}/");
        }
    }
    out
}

/// Lex a file and print its tokens. Fails if any token is invalid.
///
/// The lexer runs on its own here, without the parser switching it into
/// regex mode, so `/.../` shows up as division tokens around the body.
pub fn lex_file(path: &str) -> bool {
    let Some(content) = read_file(path) else {
        return false;
    };
    let tokens = tally_lexer::tokenize(path, &content);
    print!("{}", dump_tokens(&tokens));
    !tokens.iter().any(|token| token.is(TokenKind::Invalid))
}

/// Parse a file and print the AST and any errors.
pub fn parse_file(path: &str, config: &ParserConfig) -> bool {
    let Some(content) = read_file(path) else {
        return false;
    };
    let output = parse_source(path, &content, &MetricStore::new(), config);
    print!("{}", dump_ast(&output));
    if output.has_errors() {
        eprint!("{}", output.errors.render());
        return false;
    }
    true
}
