//! Diagnostic collection for the Tally front end.
//!
//! Every phase reports into one [`ErrorList`]: lexical, syntactic and
//! semantic errors alike. Nothing aborts on the first problem; a parse keeps
//! going and the caller gets the whole list at the end. A non-empty list means
//! compilation failed.
//!
//! # Error Guarantees
//!
//! Reporting returns an [`ErrorGuaranteed`], a token that can only be obtained
//! by recording an error. Functions that give up on a construct return
//! `Result<T, ErrorGuaranteed>`, so an `Err` always has a diagnostic behind it.
//!
//! ```text
//! let guar = errors.add(pos, "undeclared identifier 'foo'");
//! return Err(guar);
//! ```

mod error_code;
mod error_list;
mod guarantee;

pub use error_code::ErrorCode;
pub use error_list::{CompileError, ErrorList};
pub use guarantee::ErrorGuaranteed;
