//! Tally command line driver.
//!
//! The binary in `main.rs` only dispatches; the commands live in
//! [`commands`] so they can be exercised from tests.

pub mod commands;

use std::sync::Once;

use tally_parse::ParserConfig;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Nothing is installed unless `RUST_LOG` is set, so the parser's trace
/// points cost nothing in normal runs. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Flags and file arguments shared by every command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub files: Vec<String>,
    pub config: ParserConfig,
}

/// Parse the arguments that follow the command name.
///
/// Accepts `--debug=<n>` and `--max-depth=<n>` anywhere; everything that
/// does not start with `-` is a file.
pub fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    for arg in args {
        if let Some(level) = arg.strip_prefix("--debug=") {
            let level = level
                .parse::<u8>()
                .map_err(|err| format!("invalid --debug level '{level}': {err}"))?;
            options.config = options.config.with_debug(level);
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            let depth = depth
                .parse::<usize>()
                .map_err(|err| format!("invalid --max-depth '{depth}': {err}"))?;
            if depth == 0 {
                return Err("--max-depth must be at least 1".to_owned());
            }
            options.config = options.config.with_max_nesting_depth(depth);
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else {
            options.files.push(arg.clone());
        }
    }
    Ok(options)
}
