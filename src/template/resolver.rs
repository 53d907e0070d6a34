//! Placeholder resolution - expands placeholders recursively into text

use tracing::{debug, warn};

use crate::buffer::OutputBuffer;
use crate::error::TaggerError;
use crate::scanner::{Scanner, Segment, Span};

use super::dictionary::Dictionary;
use super::guard::ResolutionGuard;
use super::report::{BlockReason, Blocked, Report, Unterminated};

/// State for one top-level resolution.
///
/// Owns the guard and the report; borrows the dictionary for the whole call
/// tree. A session is not meant to be shared between threads: resolve
/// templates concurrently by giving each its own session over a shared
/// dictionary.
#[derive(Debug)]
pub struct Resolution<'d> {
    dictionary: &'d Dictionary,
    guard: ResolutionGuard,
    report: Report,
    /// Placeholder whose replacement text is being processed
    frame: Option<String>,
}

impl<'d> Resolution<'d> {
    /// Create a session with a fresh guard
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            dictionary,
            guard: ResolutionGuard::new(),
            report: Report::default(),
            frame: None,
        }
    }

    /// The guard as it stands between calls
    pub fn guard(&self) -> &ResolutionGuard {
        &self.guard
    }

    /// Findings collected so far
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Consume the session, keeping its findings
    pub fn into_report(self) -> Report {
        self.report
    }

    /// Expand every placeholder in `text`.
    ///
    /// Literal text is copied verbatim, blocked placeholders contribute
    /// nothing, and an unterminated placeholder ends the scan with everything
    /// before it kept.
    pub fn process(&mut self, text: &str) -> Result<String, TaggerError> {
        let mut output = OutputBuffer::new();

        for segment in Scanner::new(text) {
            match segment {
                Segment::Literal { text, .. } => output.push_str(text)?,
                Segment::Placeholder { name, span } => {
                    let replacement = self.resolve_at(name, span)?;
                    output.append(replacement.as_deref())?;
                }
                Segment::Unterminated { span } => {
                    warn!(
                        frame = self.frame.as_deref().unwrap_or("<template>"),
                        offset = span.start,
                        "unterminated placeholder"
                    );
                    self.report.unterminated.push(Unterminated {
                        span,
                        frame: self.frame.clone(),
                    });
                }
            }
        }

        Ok(output.into_string())
    }

    /// Resolve a single placeholder name.
    ///
    /// Returns `Ok(None)` when the placeholder is blocked. The guard is
    /// restored before returning, whatever the outcome.
    pub fn resolve(&mut self, name: &str) -> Result<Option<String>, TaggerError> {
        let span = 0..name.len();
        self.resolve_at(name, span)
    }

    fn resolve_at(&mut self, name: &str, span: Span) -> Result<Option<String>, TaggerError> {
        let replacement = match self.check(name) {
            Ok(replacement) => replacement,
            Err(reason) => {
                self.block(name, reason, span);
                return Ok(None);
            }
        };

        self.guard.enter(name)?;
        let outer = self.frame.replace(name.to_string());

        let result = self.process(replacement);

        self.frame = outer;
        self.guard.leave(name);

        result.map(Some)
    }

    /// Depth first, then cycles, then the dictionary
    fn check(&self, name: &str) -> Result<&'d str, BlockReason> {
        if self.guard.at_limit() {
            return Err(BlockReason::DepthLimit);
        }
        if self.guard.is_active(name) {
            return Err(BlockReason::Cycle);
        }
        self.dictionary.lookup(name).ok_or(BlockReason::Unknown)
    }

    fn block(&mut self, name: &str, reason: BlockReason, span: Span) {
        debug!(name, %reason, depth = self.guard.depth(), "placeholder blocked");
        self.report.blocked.push(Blocked {
            name: name.to_string(),
            reason,
            span,
            frame: self.frame.clone(),
            depth: self.guard.depth(),
        });
    }
}

/// Resolve `template` against `dictionary` with a fresh guard
pub fn process(template: &str, dictionary: &Dictionary) -> Result<String, TaggerError> {
    Resolution::new(dictionary).process(template)
}

/// Like [`process`], also returning what was left unexpanded
pub fn process_with_report(
    template: &str,
    dictionary: &Dictionary,
) -> Result<(String, Report), TaggerError> {
    let mut resolution = Resolution::new(dictionary);
    let output = resolution.process(template)?;
    Ok((output, resolution.into_report()))
}
