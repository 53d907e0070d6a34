//! Placeholder dictionary: ordered name to replacement pairs

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while building a dictionary
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// Dictionary file could not be read
    #[error("failed to read dictionary file: {0}")]
    Io(#[from] std::io::Error),

    /// Dictionary file is not valid TOML or has the wrong shape
    #[error("failed to parse dictionary TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A `name=value` assignment without `=`
    #[error("invalid assignment '{input}': expected NAME=VALUE")]
    InvalidAssignment { input: String },
}

/// A single placeholder definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    /// Placeholder name, matched against the text between the delimiters
    pub name: String,
    /// Text substituted for the placeholder; may contain placeholders itself
    pub replacement: String,
}

impl Tag {
    /// Create a tag
    pub fn new(name: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replacement: replacement.into(),
        }
    }
}

/// Ordered collection of tags.
///
/// Names are not required to be unique; lookup returns the earliest entry.
/// A dictionary is never mutated during resolution, so one instance can be
/// shared by any number of concurrent resolutions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    tags: Vec<Tag>,
}

/// TOML structure for deserializing dictionaries
#[derive(Deserialize)]
struct TomlDictionary {
    #[serde(default)]
    tags: Vec<Tag>,
}

impl Dictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a dictionary from TOML text.
    ///
    /// ```toml
    /// [[tags]]
    /// name = "greeting"
    /// replacement = "Hi, {{name}}"
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, DictionaryError> {
        let parsed: TomlDictionary = toml::from_str(content)?;
        Ok(Self { tags: parsed.tags })
    }

    /// Parse a `name=value` assignment into a tag.
    ///
    /// Splits on the first `=`, so the value may contain further `=`.
    pub fn parse_assignment(input: &str) -> Result<Tag, DictionaryError> {
        input
            .split_once('=')
            .map(|(name, value)| Tag::new(name, value))
            .ok_or_else(|| DictionaryError::InvalidAssignment {
                input: input.to_string(),
            })
    }

    /// Append a tag; an existing tag with the same name keeps precedence
    pub fn insert(&mut self, name: impl Into<String>, replacement: impl Into<String>) {
        self.tags.push(Tag::new(name, replacement));
    }

    /// Builder form of [`Dictionary::insert`]
    pub fn with(mut self, name: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.insert(name, replacement);
        self
    }

    /// Place `other`'s tags ahead of this dictionary's so they win lookups
    pub fn prepend(&mut self, other: Dictionary) {
        let existing = std::mem::replace(&mut self.tags, other.tags);
        self.tags.extend(existing);
    }

    /// Find the replacement for `name`; first match wins
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.replacement.as_str())
    }

    /// Check if a name is defined
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of entries, duplicates included
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True if there are no entries
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }
}

impl<N, R> FromIterator<(N, R)> for Dictionary
where
    N: Into<String>,
    R: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(|(n, r)| Tag::new(n, r)).collect(),
        }
    }
}

impl FromIterator<Tag> for Dictionary {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}
