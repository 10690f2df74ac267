//! Proof that an error was reported.

use std::fmt;

/// Zero-sized proof that at least one error has been recorded.
///
/// Only [`ErrorList`](crate::ErrorList) hands these out, so holding one means
/// a diagnostic exists. Code that abandons a construct returns
/// `Err(ErrorGuaranteed)` instead of reporting again.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Proof from an error count, for code that only knows a count.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}
