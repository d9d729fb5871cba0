//! Debounced autosave scheduling.
//!
//! A change arms a deadline one quiet period in the future; another change
//! before the deadline re-arms it, so only one save fires per burst of
//! edits. The scheduler is pure - callers pass the current instant in -
//! which keeps tests off the wall clock.

use std::time::{Duration, Instant};

/// Where an editing session's document stands relative to storage.
///
/// Three states, deliberately not a boolean: unsaved edits waiting out the
/// quiet period (`Pending`), a save on the wire (`Saving`), and everything
/// committed (`Saved`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Saved,
    Pending,
    Saving,
}

impl SaveState {
    /// Returns the indicator label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            SaveState::Saved => "All changes saved",
            SaveState::Pending => "Unsaved changes",
            SaveState::Saving => "Saving...",
        }
    }
}

/// Debounce timer for autosave.
#[derive(Debug, Clone)]
pub struct AutosaveScheduler {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl AutosaveScheduler {
    /// Creates a scheduler with the given quiet period.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    /// The 1.5s quiet period the editor uses.
    pub fn with_default_quiet_period() -> Self {
        Self::new(Duration::from_millis(1500))
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Records an edit at `now`: arms the deadline, or pushes an already
    /// armed deadline back out to a full quiet period.
    pub fn note_change(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet_period);
    }

    /// True if a save is scheduled (fired or not).
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True if the quiet period has elapsed since the last change.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Consumes a due deadline. Returns true exactly once per elapsed
    /// quiet period; callers fire the save when it does.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Drops any scheduled save.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> AutosaveScheduler {
        AutosaveScheduler::new(Duration::from_secs(2))
    }

    #[test]
    fn unarmed_scheduler_is_never_due() {
        let s = scheduler();
        assert!(!s.is_armed());
        assert!(!s.is_due(Instant::now()));
    }

    #[test]
    fn change_arms_deadline_one_quiet_period_out() {
        let mut s = scheduler();
        let t0 = Instant::now();
        s.note_change(t0);

        assert!(s.is_armed());
        assert!(!s.is_due(t0 + Duration::from_millis(1999)));
        assert!(s.is_due(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn new_change_reschedules_pending_save() {
        let mut s = scheduler();
        let t0 = Instant::now();
        s.note_change(t0);
        s.note_change(t0 + Duration::from_secs(1));

        // The original deadline has passed but the re-armed one has not.
        assert!(!s.is_due(t0 + Duration::from_millis(2500)));
        assert!(s.is_due(t0 + Duration::from_secs(3)));
    }

    #[test]
    fn take_due_fires_exactly_once_per_burst() {
        let mut s = scheduler();
        let t0 = Instant::now();
        s.note_change(t0);

        let fire_at = t0 + Duration::from_secs(3);
        assert!(s.take_due(fire_at));
        assert!(!s.take_due(fire_at));
        assert!(!s.is_armed());
    }

    #[test]
    fn cancel_disarms() {
        let mut s = scheduler();
        s.note_change(Instant::now());
        s.cancel();
        assert!(!s.is_armed());
    }

    #[test]
    fn save_state_labels() {
        assert_eq!(SaveState::Pending.label(), "Unsaved changes");
        assert_eq!(SaveState::Saving.label(), "Saving...");
        assert_eq!(SaveState::Saved.label(), "All changes saved");
    }
}
