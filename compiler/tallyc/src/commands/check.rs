//! The `check` command: parse many programs against one metric store.

use std::fmt::Write as _;
use std::fs::File;
use std::io::BufReader;

use rayon::prelude::*;
use tally_metrics::{MetricHandle, MetricStore};
use tally_parse::{parse_source, parse_with_config, ParseOutput, ParserConfig};
use tracing::debug;

/// Outcome of checking a set of programs.
#[derive(Debug)]
pub struct CheckReport {
    /// One entry per program, in argument order.
    pub results: Vec<(String, ParseOutput)>,
    /// Everything registered in the store afterwards, sorted by name.
    pub metrics: Vec<MetricHandle>,
}

impl CheckReport {
    fn new(results: Vec<(String, ParseOutput)>, store: &MetricStore) -> Self {
        CheckReport {
            results,
            metrics: store.metrics(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|(_, output)| output.has_errors())
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().map(|(_, output)| output.errors.len()).sum()
    }

    /// Every program's errors followed by the registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (_, output) in &self.results {
            out.push_str(&output.errors.render());
        }
        if !self.metrics.is_empty() {
            out.push_str("metrics:\n");
            for metric in &self.metrics {
                let def = metric.def();
                let _ = write!(out, "  {}: {} from '{}'", def.name, def.signature(), def.program);
                if let Some(exported) = &def.exported_name {
                    let _ = write!(out, " as \"{exported}\"");
                }
                if def.hidden {
                    out.push_str(" (hidden)");
                }
                out.push('\n');
            }
        }
        out
    }
}

/// Parse in-memory `(name, source)` pairs in parallel.
///
/// All parses register into `store`. When two programs declare the same
/// metric incompatibly, whichever registers first wins and the other gets
/// the conflict error, so with more than one thread the loser is not fixed.
pub fn check_sources(
    sources: &[(String, String)],
    store: &MetricStore,
    config: &ParserConfig,
) -> CheckReport {
    let results = sources
        .par_iter()
        .map(|(name, source)| (name.clone(), parse_source(name, source, store, config)))
        .collect();
    CheckReport::new(results, store)
}

/// Parse files in parallel. Unreadable files are reported like any other
/// error.
pub fn check_paths(paths: &[String], store: &MetricStore, config: &ParserConfig) -> CheckReport {
    let results = paths
        .par_iter()
        .map(|path| {
            debug!(%path, "checking");
            let output = match File::open(path) {
                Ok(file) => parse_with_config(path, BufReader::new(file), store, config),
                Err(err) => ParseOutput::unreadable(path, &err),
            };
            (path.clone(), output)
        })
        .collect();
    CheckReport::new(results, store)
}

/// Check files, print the report, and return whether all of them are clean.
pub fn check_files(paths: &[String], config: &ParserConfig) -> bool {
    let store = MetricStore::new();
    let report = check_paths(paths, &store, config);
    print!("{}", report.render());
    if report.has_errors() {
        eprintln!(
            "{} error{} in {} program{}",
            report.error_count(),
            if report.error_count() == 1 { "" } else { "s" },
            paths.len(),
            if paths.len() == 1 { "" } else { "s" },
        );
        return false;
    }
    true
}
