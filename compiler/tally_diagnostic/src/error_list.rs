//! The error accumulator shared by all front-end phases.

use std::fmt;

use tally_ir::Position;

use crate::{ErrorCode, ErrorGuaranteed};

/// One reported error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CompileError {
    pub pos: Position,
    /// Classification, when the reporter supplied one.
    pub code: Option<ErrorCode>,
    pub message: String,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.message)
    }
}

/// Ordered, append-only list of compile errors.
///
/// Errors stay in the order they were reported. Nothing is sorted or
/// deduplicated: a cascade of identical errors is reported as a cascade.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ErrorList {
    errors: Vec<CompileError>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unclassified error.
    pub fn add(&mut self, pos: Position, message: impl Into<String>) -> ErrorGuaranteed {
        self.push(CompileError {
            pos,
            code: None,
            message: message.into(),
        })
    }

    /// Append an error with its code.
    pub fn add_with_code(
        &mut self,
        pos: Position,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> ErrorGuaranteed {
        self.push(CompileError {
            pos,
            code: Some(code),
            message: message.into(),
        })
    }

    pub fn push(&mut self, error: CompileError) -> ErrorGuaranteed {
        self.errors.push(error);
        ErrorGuaranteed::new()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Proof of failure, if anything was reported.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.errors.len())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompileError> {
        self.errors.iter()
    }

    /// One `<file>:<line>:<col>: <message>` line per error, in report order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for error in &self.errors {
            out.push_str(&error.to_string());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ErrorList {}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a CompileError;
    type IntoIter = std::slice::Iter<'a, CompileError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests;
