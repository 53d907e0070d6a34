//! Cycle and depth guard for recursive resolution

use tracing::trace;

use crate::error::TaggerError;

/// Maximum number of nested placeholder expansions on one resolution path
pub const MAX_DEPTH: usize = 3;

/// Tracks the placeholders being expanded on the current path.
///
/// `enter` and `leave` are always paired, so after a nested expansion returns
/// the guard is back in the state it had before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionGuard {
    depth: usize,
    /// Names in the order they were entered
    active: Vec<String>,
}

impl ResolutionGuard {
    /// Create a guard at depth 0 with nothing active
    pub fn new() -> Self {
        Self::default()
    }

    /// Current number of ancestor expansions
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Names currently being expanded, outermost first
    pub fn active(&self) -> &[String] {
        &self.active
    }

    /// Check if a placeholder is being expanded on the current path
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|n| n == name)
    }

    /// True once another expansion would exceed [`MAX_DEPTH`]
    pub fn at_limit(&self) -> bool {
        self.depth >= MAX_DEPTH
    }

    /// Mark a placeholder as being expanded.
    ///
    /// If the active set cannot grow the guard is left untouched.
    pub fn enter(&mut self, name: &str) -> Result<(), TaggerError> {
        self.active.try_reserve(1).map_err(|_| {
            TaggerError::allocation("active placeholder set", self.active.len() + 1)
        })?;
        self.active.push(name.to_string());
        self.depth += 1;
        trace!(name, depth = self.depth, "enter placeholder");
        Ok(())
    }

    /// Mark a placeholder as done.
    ///
    /// Removes the first entry equal to `name`; the remaining entries keep
    /// their relative order.
    pub fn leave(&mut self, name: &str) {
        if let Some(index) = self.active.iter().position(|n| n == name) {
            self.active.remove(index);
        }
        self.depth = self.depth.saturating_sub(1);
        trace!(name, depth = self.depth, "leave placeholder");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_guard_is_clear() {
        let guard = ResolutionGuard::new();
        assert_eq!(guard.depth(), 0);
        assert!(guard.active().is_empty());
        assert!(!guard.at_limit());
    }

    #[test]
    fn test_enter_leave_restores_state() {
        let mut guard = ResolutionGuard::new();
        guard.enter("a").unwrap();
        assert!(guard.is_active("a"));
        assert_eq!(guard.depth(), 1);

        guard.leave("a");
        assert!(!guard.is_active("a"));
        assert_eq!(guard, ResolutionGuard::new());
    }

    #[test]
    fn test_nested_and_sibling_names() {
        let mut guard = ResolutionGuard::new();
        guard.enter("outer").unwrap();

        guard.enter("first").unwrap();
        assert_eq!(guard.depth(), 2);
        guard.leave("first");

        // A sibling at the same level is not flagged
        assert!(!guard.is_active("first"));
        guard.enter("second").unwrap();
        assert_eq!(guard.active(), ["outer", "second"]);
        guard.leave("second");

        guard.leave("outer");
        assert_eq!(guard.depth(), 0);
        assert!(guard.active().is_empty());
    }

    #[test]
    fn test_leave_preserves_order_of_remaining() {
        let mut guard = ResolutionGuard::new();
        for name in ["a", "b", "c", "d"] {
            guard.enter(name).unwrap();
        }

        guard.leave("b");
        assert_eq!(guard.active(), ["a", "c", "d"]);
        guard.leave("d");
        assert_eq!(guard.active(), ["a", "c"]);
        assert_eq!(guard.depth(), 2);
    }

    #[test]
    fn test_leave_inner_keeps_outer_entry() {
        let mut guard = ResolutionGuard::new();
        guard.enter("outer").unwrap();
        guard.enter("inner").unwrap();

        guard.leave("inner");
        assert_eq!(guard.active(), ["outer"]);
    }

    #[test]
    fn test_leave_removes_first_duplicate_only() {
        let mut guard = ResolutionGuard::new();
        guard.enter("x").unwrap();
        guard.enter("y").unwrap();
        guard.enter("x").unwrap();

        guard.leave("x");
        assert_eq!(guard.active(), ["y", "x"]);
        assert!(guard.is_active("x"));
    }

    #[test]
    fn test_at_limit() {
        let mut guard = ResolutionGuard::new();
        for name in ["a", "b"] {
            guard.enter(name).unwrap();
        }
        assert!(!guard.at_limit());
        guard.enter("c").unwrap();
        assert!(guard.at_limit());
        guard.leave("c");
        assert!(!guard.at_limit());
    }
}
