//! Command handlers for the `tally` binary.
//!
//! Each handler prints its results and returns whether the command
//! succeeded; `main` turns that into the exit status.

mod check;
mod debug;

pub use check::{check_files, check_paths, check_sources, CheckReport};
pub use debug::{dump_ast, dump_tokens, lex_file, parse_file};

use std::fs;

/// Read a whole file, printing an error if it cannot be read.
pub(crate) fn read_file(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            eprintln!("error: cannot read '{path}': {err}");
            None
        }
    }
}
