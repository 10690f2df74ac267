//! Tally CLI

use tally_parse::DEFAULT_MAX_NESTING_DEPTH;
use tallyc::commands::{check_files, lex_file, parse_file};
use tallyc::{init_tracing, parse_options};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    let options = match parse_options(&args[2..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(2);
        }
    };

    let ok = match command {
        "lex" | "parse" => {
            let [path] = options.files.as_slice() else {
                eprintln!("Usage: tally {command} <file.tally> [options]");
                std::process::exit(2);
            };
            if command == "lex" {
                lex_file(path)
            } else {
                parse_file(path, &options.config)
            }
        }
        "check" => {
            if options.files.is_empty() {
                eprintln!("Usage: tally check <file.tally>... [options]");
                std::process::exit(2);
            }
            check_files(&options.files, &options.config)
        }
        _ => {
            eprintln!("error: unknown command '{command}'");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Tally - log metrics programs");
    eprintln!();
    eprintln!("Usage: tally <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  lex <file>         Print the token stream");
    eprintln!("  parse <file>       Print the syntax tree and regex table");
    eprintln!("  check <file>...    Check programs against one shared metric store");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --debug=<n>        Parser trace level (1: scopes and metrics, 2: tokens)");
    eprintln!(
        "  --max-depth=<n>    Maximum expression nesting depth (default {DEFAULT_MAX_NESTING_DEPTH})"
    );
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=tally_parse=trace) to see trace output.");
}
