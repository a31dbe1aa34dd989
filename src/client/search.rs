//! Debounced search input.

use std::time::{Duration, Instant};

/// Delay between the last keystroke and the filter being applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Tracks what the user typed and what the filter currently uses.
///
/// Time is passed in by the caller, so the owner's event loop decides when
/// to poll and tests never sleep.
#[derive(Debug, Clone)]
pub struct SearchInput {
    typed: String,
    applied: String,
    deadline: Option<Instant>,
    debounce: Duration,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::with_debounce(SEARCH_DEBOUNCE)
    }
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            typed: String::new(),
            applied: String::new(),
            deadline: None,
            debounce,
        }
    }

    /// Records a keystroke and restarts the debounce timer.
    pub fn type_text(&mut self, text: impl Into<String>, now: Instant) {
        self.typed = text.into();
        self.deadline = Some(now + self.debounce);
    }

    /// Applies the typed text if the debounce delay has elapsed.
    ///
    /// Returns `true` when the applied query changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.apply()
            }
            _ => false,
        }
    }

    /// Sets and applies a query immediately, cancelling any pending one.
    pub fn set(&mut self, text: impl Into<String>) -> bool {
        self.typed = text.into();
        self.deadline = None;
        self.apply()
    }

    pub fn clear(&mut self) -> bool {
        self.set(String::new())
    }

    /// Query the filter currently uses.
    pub fn applied(&self) -> &str {
        &self.applied
    }

    /// Text as typed, possibly not applied yet.
    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending text will be applied, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    fn apply(&mut self) -> bool {
        if self.applied == self.typed {
            return false;
        }
        self.applied.clone_from(&self.typed);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_is_applied_after_debounce() {
        let start = Instant::now();
        let mut search = SearchInput::new();

        search.type_text("rea", start);
        assert!(!search.poll(start + Duration::from_millis(499)));
        assert_eq!(search.applied(), "");
        assert!(search.is_pending());

        assert!(search.poll(start + Duration::from_millis(500)));
        assert_eq!(search.applied(), "rea");
        assert!(!search.is_pending());
    }

    #[test]
    fn test_each_keystroke_restarts_timer() {
        let start = Instant::now();
        let mut search = SearchInput::new();

        search.type_text("r", start);
        search.type_text("re", start + Duration::from_millis(400));
        assert!(!search.poll(start + Duration::from_millis(600)));

        assert!(search.poll(start + Duration::from_millis(900)));
        assert_eq!(search.applied(), "re");
    }

    #[test]
    fn test_retyping_same_text_does_not_report_change() {
        let start = Instant::now();
        let mut search = SearchInput::new();
        search.set("rust");

        search.type_text("rust", start);
        assert!(!search.poll(start + SEARCH_DEBOUNCE));
    }

    #[test]
    fn test_set_and_clear_apply_immediately() {
        let start = Instant::now();
        let mut search = SearchInput::new();
        search.type_text("pending", start);

        assert!(search.set("now"));
        assert_eq!(search.applied(), "now");
        assert!(search.deadline().is_none());

        assert!(search.clear());
        assert_eq!(search.applied(), "");
        assert_eq!(search.typed(), "");
    }
}
