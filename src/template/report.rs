//! Diagnostics collected during resolution
//!
//! Blocked placeholders render as empty text whatever the cause. The report
//! keeps the cause so callers that care can see which placeholders were dropped.

use std::fmt;

use ariadne::{Color, Config, Label, Report as AriadneReport, ReportKind, Source};

use crate::scanner::Span;

/// Why a placeholder was not expanded.
///
/// Checks run in declaration order, so a name that is both active and past
/// the depth limit is reported as [`BlockReason::DepthLimit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// Expanding would exceed the depth limit
    DepthLimit,
    /// The name is already being expanded on the current path
    Cycle,
    /// The dictionary has no entry for the name
    Unknown,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::DepthLimit => write!(f, "depth limit reached"),
            BlockReason::Cycle => write!(f, "cyclic reference"),
            BlockReason::Unknown => write!(f, "unknown placeholder"),
        }
    }
}

/// A placeholder that rendered as empty text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blocked {
    pub name: String,
    pub reason: BlockReason,
    /// Span of the placeholder within the text of its frame
    pub span: Span,
    /// `None` for the caller's template, otherwise the placeholder whose
    /// replacement contained this one
    pub frame: Option<String>,
    /// Guard depth when the placeholder was reached
    pub depth: usize,
}

/// A start delimiter that was never closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unterminated {
    /// From the start delimiter to the end of the frame's text
    pub span: Span,
    pub frame: Option<String>,
}

/// Everything that was dropped from one resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub blocked: Vec<Blocked>,
    pub unterminated: Vec<Unterminated>,
}

impl Report {
    /// True if every placeholder expanded
    pub fn is_clean(&self) -> bool {
        self.blocked.is_empty() && self.unterminated.is_empty()
    }

    /// Blocked placeholders with the given reason
    pub fn blocked_by(&self, reason: BlockReason) -> impl Iterator<Item = &Blocked> {
        self.blocked.iter().filter(move |b| b.reason == reason)
    }

    /// Render the report against the caller's template.
    ///
    /// Findings in the template itself get source labels; findings inside
    /// replacement text are listed as notes. Returns an empty string for a
    /// clean report.
    pub fn format(&self, source: &str, filename: &str) -> String {
        if self.is_clean() {
            return String::new();
        }

        let first_offset = self
            .blocked
            .iter()
            .filter(|b| b.frame.is_none())
            .map(|b| b.span.start)
            .chain(
                self.unterminated
                    .iter()
                    .filter(|u| u.frame.is_none())
                    .map(|u| u.span.start),
            )
            .min()
            .unwrap_or(0);

        let mut builder = AriadneReport::build(
            ReportKind::Warning,
            filename,
            char_offset(source, first_offset),
        )
        .with_config(Config::default().with_color(false))
        .with_message(self.summary());

        let mut notes = Vec::new();
        for blocked in &self.blocked {
            match &blocked.frame {
                None => {
                    builder = builder.with_label(
                        Label::new((filename, char_span(source, &blocked.span)))
                            .with_message(format!("'{}': {}", blocked.name, blocked.reason))
                            .with_color(Color::Yellow),
                    );
                }
                Some(frame) => notes.push(format!(
                    "'{}' inside '{}': {}",
                    blocked.name, frame, blocked.reason
                )),
            }
        }

        for unterminated in &self.unterminated {
            match &unterminated.frame {
                None => {
                    builder = builder.with_label(
                        Label::new((filename, char_span(source, &unterminated.span)))
                            .with_message("placeholder is never closed")
                            .with_color(Color::Red),
                    );
                }
                Some(frame) => notes.push(format!("unclosed placeholder inside '{}'", frame)),
            }
        }

        if !notes.is_empty() {
            builder = builder.with_note(notes.join("\n"));
        }

        let mut buf = Vec::new();
        if builder
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .is_err()
        {
            return self.summary();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.blocked.is_empty() {
            parts.push(format!("{} placeholder(s) left empty", self.blocked.len()));
        }
        if !self.unterminated.is_empty() {
            parts.push(format!(
                "{} unterminated placeholder(s)",
                self.unterminated.len()
            ));
        }
        parts.join(", ")
    }
}

/// ariadne addresses source by characters, spans are in bytes
fn char_offset(source: &str, byte: usize) -> usize {
    source
        .get(..byte)
        .map(|prefix| prefix.chars().count())
        .unwrap_or_else(|| source.chars().count())
}

fn char_span(source: &str, span: &Span) -> Span {
    char_offset(source, span.start)..char_offset(source, span.end)
}
