//! Growable output buffer
//!
//! Every resolution frame assembles its text in its own [`OutputBuffer`] and
//! hands the finished `String` to its caller.

use crate::error::TaggerError;

/// Append-only text accumulator with doubling growth.
///
/// `capacity` is the logical allocation size. One byte is always kept spare
/// beyond the content, so a buffer holding `n` bytes has a capacity of at
/// least `n + 1`. Growth doubles the capacity (starting from 1) until the
/// new content fits and then performs a single reservation.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: String,
    capacity: usize,
}

impl OutputBuffer {
    /// Create an empty buffer without allocating
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with at least `capacity` bytes reserved
    pub fn with_capacity(capacity: usize) -> Result<Self, TaggerError> {
        let mut buffer = Self::new();
        buffer.reserve(capacity)?;
        Ok(buffer)
    }

    /// Number of bytes in use
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical capacity in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// View the accumulated content
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Ensure the buffer can hold `min_capacity` bytes without growing.
    ///
    /// On failure the buffer is unchanged.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), TaggerError> {
        if min_capacity <= self.capacity {
            return Ok(());
        }

        self.data
            .try_reserve_exact(min_capacity - self.data.len())
            .map_err(|_| TaggerError::allocation("output buffer", min_capacity))?;
        self.capacity = min_capacity;
        Ok(())
    }

    /// Append `text`; an absent text is a no-op.
    ///
    /// On failure the buffer keeps its previous content and capacity.
    pub fn append(&mut self, text: Option<&str>) -> Result<(), TaggerError> {
        match text {
            Some(text) => self.push_str(text),
            None => Ok(()),
        }
    }

    /// Append `text`, growing the storage if needed
    pub fn push_str(&mut self, text: &str) -> Result<(), TaggerError> {
        let needed = self
            .data
            .len()
            .checked_add(text.len())
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| TaggerError::allocation("output buffer", usize::MAX))?;

        if needed > self.capacity {
            let mut new_capacity = self.capacity.max(1);
            while new_capacity < needed {
                new_capacity = new_capacity
                    .checked_mul(2)
                    .ok_or_else(|| TaggerError::allocation("output buffer", needed))?;
            }
            self.reserve(new_capacity)?;
        }

        self.data.push_str(text);
        Ok(())
    }

    /// Take ownership of the accumulated content
    pub fn into_string(self) -> String {
        self.data
    }

    /// Drop the content and the allocation
    pub fn clear(&mut self) {
        self.data = String::new();
        self.capacity = 0;
    }
}

impl From<OutputBuffer> for String {
    fn from(buffer: OutputBuffer) -> Self {
        buffer.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = OutputBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn test_append_concatenates_in_order() {
        let mut buffer = OutputBuffer::new();
        buffer.push_str("Hello").unwrap();
        buffer.append(None).unwrap();
        buffer.push_str(", ").unwrap();
        buffer.push_str("").unwrap();
        buffer.append(Some("world")).unwrap();
        assert_eq!(buffer.into_string(), "Hello, world");
    }

    #[test]
    fn test_growth_doubles_from_one() {
        let mut buffer = OutputBuffer::new();
        buffer.push_str("a").unwrap();
        // "a" plus the spare byte
        assert_eq!(buffer.capacity(), 2);
        buffer.push_str("bc").unwrap();
        assert_eq!(buffer.capacity(), 4);
        buffer.push_str("defgh").unwrap();
        assert_eq!(buffer.capacity(), 16);
    }

    #[test]
    fn test_capacity_always_exceeds_length() {
        let mut buffer = OutputBuffer::new();
        for len in 0..64 {
            buffer.push_str(&"x".repeat(len)).unwrap();
            assert!(buffer.capacity() > buffer.len());
            assert!(buffer.capacity().is_power_of_two());
        }
    }

    #[test]
    fn test_absent_text_does_not_allocate() {
        let mut buffer = OutputBuffer::new();
        buffer.append(None).unwrap();
        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn test_reserve_keeps_content() {
        let mut buffer = OutputBuffer::new();
        buffer.push_str("keep").unwrap();
        buffer.reserve(100).unwrap();
        assert_eq!(buffer.capacity(), 100);
        assert_eq!(buffer.as_str(), "keep");

        // Smaller reservations never shrink
        buffer.reserve(10).unwrap();
        assert_eq!(buffer.capacity(), 100);
    }

    #[test]
    fn test_reserve_failure_leaves_buffer_intact() {
        let mut buffer = OutputBuffer::new();
        buffer.push_str("prior").unwrap();
        let capacity = buffer.capacity();

        let err = buffer.reserve(usize::MAX).unwrap_err();
        assert!(matches!(err, TaggerError::Allocation { .. }));
        assert_eq!(buffer.as_str(), "prior");
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn test_growth_from_reserved_capacity() {
        let mut buffer = OutputBuffer::with_capacity(3).unwrap();
        buffer.push_str("abcd").unwrap();
        assert_eq!(buffer.capacity(), 6);
        assert_eq!(buffer.as_str(), "abcd");
    }

    #[test]
    fn test_clear_releases_storage() {
        let mut buffer = OutputBuffer::new();
        buffer.push_str("text").unwrap();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
    }
}
