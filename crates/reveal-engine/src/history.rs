//! Back-navigation history.
//!
//! Entering a screen and leaving it with `back` both push an entry, so going
//! back pops twice: once for the `back` itself and once for the screen being
//! left. The entry under those is re-executed.

use reveal_core::Instruction;

// =============================================================================
// HistoryStack
// =============================================================================

/// LIFO record of dispatched instructions.
///
/// Entries are owned clones taken at dispatch time. Later changes to the
/// live instruction never reach an entry already on the stack.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<Instruction>,
}

impl HistoryStack {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dispatched instruction.
    pub fn push(&mut self, instruction: &Instruction) {
        self.entries.push(instruction.clone());
        tracing::debug!(
            "Pushed {} onto history, depth: {}",
            instruction.operation,
            self.entries.len()
        );
    }

    /// Remove and return the most recent entry.
    pub fn pop(&mut self) -> Option<Instruction> {
        let entry = self.entries.pop();
        if entry.is_some() {
            tracing::debug!("Popped history, depth: {}", self.entries.len());
        }
        entry
    }

    /// The most recent entry.
    pub fn top(&self) -> Option<&Instruction> {
        self.entries.last()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Instruction] {
        &self.entries
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        tracing::debug!("Cleared history");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str) -> Instruction {
        Instruction::connector("Show page", "show_page")
            .in_context("page")
            .with_subject(id)
    }

    #[test]
    fn test_push_pop_order() {
        let mut history = HistoryStack::new();
        history.push(&page("1"));
        history.push(&page("2"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.top().unwrap().subject.as_deref(), Some("2"));
        assert_eq!(history.pop().unwrap().subject.as_deref(), Some("2"));
        assert_eq!(history.pop().unwrap().subject.as_deref(), Some("1"));
        assert!(history.pop().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_entries_are_snapshots() {
        let mut history = HistoryStack::new();
        let mut live = page("1");
        history.push(&live);

        live.subject = Some("99".to_string());
        live.parameter = Some("changed".into());

        let entry = &history.entries()[0];
        assert_eq!(entry.subject.as_deref(), Some("1"));
        assert!(entry.parameter.is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryStack::new();
        history.push(&page("1"));
        history.clear();
        assert!(history.is_empty());
        assert!(history.top().is_none());
    }
}
