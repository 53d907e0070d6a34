//! Tagger - recursive `{{placeholder}}` substitution
//!
//! This library resolves a template against a dictionary of named
//! replacements. Replacements may contain placeholders of their own; those are
//! expanded recursively, with cycles and expansions deeper than
//! [`MAX_DEPTH`] cut off. A placeholder that cannot be expanded renders as
//! empty text.
//!
//! # Example
//!
//! ```rust
//! use tagger::{process, Dictionary};
//!
//! let dict = Dictionary::new()
//!     .with("name", "Bob")
//!     .with("greeting", "Hi, {{name}}");
//!
//! let out = process("{{greeting}}, welcome!", &dict).unwrap();
//! assert_eq!(out, "Hi, Bob, welcome!");
//! ```

pub mod bench;
pub mod buffer;
pub mod error;
pub mod scanner;
pub mod template;

pub use buffer::OutputBuffer;
pub use error::TaggerError;
pub use scanner::{scan, Segment, END_DELIMITER, START_DELIMITER};
pub use template::{
    process, process_with_report, BlockReason, Blocked, Dictionary, DictionaryError,
    Report, Resolution, ResolutionGuard, Tag, Unterminated, MAX_DEPTH,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_without_placeholders() {
        let text = "nothing to see { here } at all";
        assert_eq!(process(text, &Dictionary::new()).unwrap(), text);
    }

    #[test]
    fn test_process_with_report_clean() {
        let dict = Dictionary::new().with("x", "y");
        let (out, report) = process_with_report("{{x}}", &dict).unwrap();
        assert_eq!(out, "y");
        assert!(report.is_clean());
    }

    #[test]
    fn test_process_is_idempotent_on_plain_output() {
        let dict = Dictionary::new().with("name", "Alice");
        let once = process("Hello, {{name}}!", &dict).unwrap();
        let twice = process(&once, &dict).unwrap();
        assert_eq!(once, twice);
    }
}
