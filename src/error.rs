//! Error types for resolution

use thiserror::Error;

/// Failures that abort a resolution call.
///
/// Unknown, cyclic and too-deep placeholders are not errors: they render as
/// empty text and are recorded in a [`crate::Report`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggerError {
    /// Storage could not grow; the structure named by `what` is unchanged
    #[error("failed to allocate {requested} bytes for {what}")]
    Allocation { what: &'static str, requested: usize },
}

impl TaggerError {
    /// Create an allocation error
    pub fn allocation(what: &'static str, requested: usize) -> Self {
        Self::Allocation { what, requested }
    }
}
