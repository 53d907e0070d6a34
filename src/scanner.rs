//! Placeholder scanner
//!
//! Splits a template into literal text and `{{name}}` placeholders. The scanner
//! holds no state beyond its cursor, so every frame of a resolution scans its own
//! text from the beginning.

/// Byte range in the scanned text
pub type Span = std::ops::Range<usize>;

/// Token opening a placeholder
pub const START_DELIMITER: &str = "{{";

/// Token closing a placeholder
pub const END_DELIMITER: &str = "}}";

/// One span of scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any placeholder, copied verbatim
    Literal { text: &'a str, span: Span },
    /// A placeholder; `name` is everything between the delimiters
    Placeholder { name: &'a str, span: Span },
    /// A start delimiter with no end delimiter after it.
    /// Always the last segment of a scan.
    Unterminated { span: Span },
}

impl<'a> Segment<'a> {
    /// Byte range of this segment in the scanned text
    pub fn span(&self) -> &Span {
        match self {
            Segment::Literal { span, .. }
            | Segment::Placeholder { span, .. }
            | Segment::Unterminated { span } => span,
        }
    }
}

/// Check whether `pattern` occurs in `input` at byte offset `pos`.
///
/// Never reads out of bounds: a pattern running past the end of the input
/// does not match, and neither does an offset at or beyond the end.
pub fn matches_at(input: &str, pos: usize, pattern: &str) -> bool {
    let input = input.as_bytes();
    let pattern = pattern.as_bytes();

    if pos >= input.len() || pattern.len() > input.len() - pos {
        return false;
    }

    input[pos..pos + pattern.len()]
        .iter()
        .zip(pattern)
        .all(|(a, b)| a == b)
}

/// Lazy iterator over the segments of a text
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Start a scan at the beginning of `input`
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Current cursor position
    pub fn position(&self) -> usize {
        self.pos
    }

    fn placeholder(&mut self) -> Segment<'a> {
        let start = self.pos;
        let name_start = start + START_DELIMITER.len();

        match self.input[name_start..].find(END_DELIMITER) {
            Some(offset) => {
                let name_end = name_start + offset;
                self.pos = name_end + END_DELIMITER.len();
                Segment::Placeholder {
                    name: &self.input[name_start..name_end],
                    span: start..self.pos,
                }
            }
            None => {
                self.pos = self.input.len();
                Segment::Unterminated {
                    span: start..self.pos,
                }
            }
        }
    }

    fn literal(&mut self) -> Segment<'a> {
        let start = self.pos;
        // The cursor does not open a placeholder, so a literal is never empty.
        let end = self.input[start..]
            .find(START_DELIMITER)
            .map(|offset| start + offset)
            .unwrap_or(self.input.len());
        self.pos = end;
        Segment::Literal {
            text: &self.input[start..end],
            span: start..end,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        if matches_at(self.input, self.pos, START_DELIMITER) {
            Some(self.placeholder())
        } else {
            Some(self.literal())
        }
    }
}

/// Scan `input` into segments
pub fn scan(input: &str) -> Scanner<'_> {
    Scanner::new(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_matches_at_bounds() {
        assert!(matches_at("ab{{", 2, "{{"));
        assert!(!matches_at("ab{", 2, "{{"));
        assert!(!matches_at("ab", 2, "{{"));
        assert!(!matches_at("ab", 10, "{{"));
        assert!(!matches_at("", 0, "{{"));
        assert!(matches_at("{{", 0, "{{"));
    }

    #[test]
    fn test_scan_literal_only() {
        let segments: Vec<_> = scan("plain text").collect();
        assert_eq!(
            segments,
            vec![Segment::Literal {
                text: "plain text",
                span: 0..10
            }]
        );
    }

    #[test]
    fn test_scan_alternating() {
        let segments: Vec<_> = scan("Hi {{name}}!").collect();
        assert_eq!(
            segments,
            vec![
                Segment::Literal {
                    text: "Hi ",
                    span: 0..3
                },
                Segment::Placeholder {
                    name: "name",
                    span: 3..11
                },
                Segment::Literal {
                    text: "!",
                    span: 11..12
                },
            ]
        );
    }

    #[test]
    fn test_scan_adjacent_placeholders() {
        let names: Vec<_> = scan("{{a}}{{b}}")
            .filter_map(|s| match s {
                Segment::Placeholder { name, .. } => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_scan_empty_name() {
        let segments: Vec<_> = scan("{{}}").collect();
        assert_eq!(
            segments,
            vec![Segment::Placeholder {
                name: "",
                span: 0..4
            }]
        );
    }

    #[test]
    fn test_scan_name_runs_to_first_end_delimiter() {
        // A nested start delimiter is part of the name
        let segments: Vec<_> = scan("{{a{{b}}c}}").collect();
        assert_eq!(segments[0], Segment::Placeholder {
            name: "a{{b",
            span: 0..8
        });
        assert_eq!(segments[1], Segment::Literal {
            text: "c}}",
            span: 8..11
        });
    }

    #[test]
    fn test_scan_unterminated_ends_scan() {
        let segments: Vec<_> = scan("before {{name and more").collect();
        assert_eq!(
            segments,
            vec![
                Segment::Literal {
                    text: "before ",
                    span: 0..7
                },
                Segment::Unterminated { span: 7..22 },
            ]
        );
    }

    #[test]
    fn test_scan_lone_brace_at_end() {
        let segments: Vec<_> = scan("tail {").collect();
        assert_eq!(
            segments,
            vec![Segment::Literal {
                text: "tail {",
                span: 0..6
            }]
        );
    }

    #[test]
    fn test_scan_multibyte_text() {
        let segments: Vec<_> = scan("héllo {{wörld}} ✓").collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], Segment::Placeholder {
            name: "wörld",
            span: 7..17
        });
    }
}
