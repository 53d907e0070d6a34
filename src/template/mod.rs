//! Recursive placeholder resolution
//!
//! This module holds the dictionary of replacements, the guard that stops
//! cyclic or runaway expansion, and the resolver that ties them to the
//! scanner and output buffer.
//!
//! # Example
//!
//! ```text
//! name     = "Bob"
//! greeting = "Hi, {{name}}"
//!
//! "{{greeting}}, welcome!"  ->  "Hi, Bob, welcome!"
//! ```

mod dictionary;
mod guard;
mod report;
mod resolver;

pub use dictionary::{Dictionary, DictionaryError, Tag};
pub use guard::{ResolutionGuard, MAX_DEPTH};
pub use report::{BlockReason, Blocked, Report, Unterminated};
pub use resolver::{process, process_with_report, Resolution};
