//! EditingSession - one open document plus its debounced autosave state.
//!
//! Every aggregate mutation marks the session dirty and (re)arms the
//! scheduler; a save fires only after the quiet period passes with no
//! further edits. The save indicator is the three-state
//! pending/saving/saved status, with a separate transient error field: a
//! failed save keeps all edits in memory and waits for the next edit or an
//! explicit save to retry - there is no automatic backoff.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::foundation::DomainError;
use crate::domain::newsletter::{AutosaveScheduler, Newsletter, SaveState};
use crate::ports::NewsletterRepository;

/// One user's open editing session over a newsletter.
pub struct EditingSession {
    newsletter: Newsletter,
    scheduler: AutosaveScheduler,
    state: SaveState,
    save_error: Option<String>,
    repository: Arc<dyn NewsletterRepository>,
}

impl EditingSession {
    /// Opens a session with the editor's default quiet period.
    pub fn new(newsletter: Newsletter, repository: Arc<dyn NewsletterRepository>) -> Self {
        Self::with_quiet_period(newsletter, repository, Duration::from_millis(1500))
    }

    /// Opens a session with a custom quiet period (tests use short ones).
    pub fn with_quiet_period(
        newsletter: Newsletter,
        repository: Arc<dyn NewsletterRepository>,
        quiet_period: Duration,
    ) -> Self {
        Self {
            newsletter,
            scheduler: AutosaveScheduler::new(quiet_period),
            state: SaveState::Saved,
            save_error: None,
            repository,
        }
    }

    pub fn newsletter(&self) -> &Newsletter {
        &self.newsletter
    }

    /// The save indicator state shown to the user.
    pub fn save_state(&self) -> SaveState {
        self.state
    }

    /// The last save failure, if the most recent attempt did not commit.
    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    /// Applies one synchronous mutation to the aggregate and marks the
    /// document dirty, (re)arming the autosave deadline.
    ///
    /// A failed mutation (bad index, unknown section id) does not touch the
    /// schedule: nothing changed, so there is nothing new to save.
    pub fn edit<T>(
        &mut self,
        now: Instant,
        mutation: impl FnOnce(&mut Newsletter) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let result = mutation(&mut self.newsletter)?;
        self.scheduler.note_change(now);
        self.state = SaveState::Pending;
        Ok(result)
    }

    /// Drives the debounce clock. Fires the pending save if the quiet
    /// period has elapsed; returns true if a save was attempted.
    pub async fn tick(&mut self, now: Instant) -> bool {
        if !self.scheduler.take_due(now) {
            return false;
        }
        self.flush().await;
        true
    }

    /// Explicit save: cancels the scheduled deadline and saves immediately.
    /// This is also the manual retry path after a save failure.
    pub async fn save_now(&mut self) {
        self.scheduler.cancel();
        self.flush().await;
    }

    async fn flush(&mut self) {
        self.state = SaveState::Saving;

        let result = match self.newsletter.id() {
            Some(_) => self.repository.update(&self.newsletter).await,
            None => match self.repository.create(&self.newsletter).await {
                Ok(id) => {
                    self.newsletter.assign_id(id);
                    Ok(())
                }
                Err(err) => Err(err),
            },
        };

        match result {
            Ok(()) => {
                self.state = SaveState::Saved;
                self.save_error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "newsletter save failed, keeping edits in memory");
                // Edits stay in memory; the indicator drops back to
                // "unsaved changes" and retry waits for the next edit or an
                // explicit save.
                self.state = SaveState::Pending;
                self.save_error = Some(err.to_string());
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, NewsletterId, UserId};
    use crate::domain::newsletter::{SectionFactory, SequenceIdGenerator};
    use crate::ports::NewsletterSummary;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockNewsletterRepository {
        saves: AtomicUsize,
        fail_saves: AtomicBool,
        last_saved: Mutex<Option<Newsletter>>,
    }

    impl MockNewsletterRepository {
        fn new() -> Self {
            Self {
                saves: AtomicUsize::new(0),
                fail_saves: AtomicBool::new(false),
                last_saved: Mutex::new(None),
            }
        }

        fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }

        fn set_failing(&self, failing: bool) {
            self.fail_saves.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl NewsletterRepository for MockNewsletterRepository {
        async fn create(&self, newsletter: &Newsletter) -> Result<NewsletterId, DomainError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(DomainError::database("connection refused"));
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.last_saved.lock().unwrap() = Some(newsletter.clone());
            Ok(NewsletterId::new())
        }

        async fn update(&self, newsletter: &Newsletter) -> Result<(), DomainError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(DomainError::database("connection refused"));
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.last_saved.lock().unwrap() = Some(newsletter.clone());
            Ok(())
        }

        async fn find_by_id(&self, _id: &NewsletterId) -> Result<Option<Newsletter>, DomainError> {
            Ok(None)
        }

        async fn list_by_user(&self, _user: &UserId) -> Result<Vec<NewsletterSummary>, DomainError> {
            Ok(Vec::new())
        }

        async fn delete(&self, _id: &NewsletterId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn session(repo: Arc<MockNewsletterRepository>) -> EditingSession {
        let factory = SectionFactory::new(Arc::new(SequenceIdGenerator::new("s")));
        let newsletter = Newsletter::new(UserId::new("teacher-1").unwrap(), &factory);
        EditingSession::with_quiet_period(newsletter, repo, Duration::from_secs(2))
    }

    #[tokio::test]
    async fn edit_marks_pending_and_save_fires_after_quiet_period() {
        let repo = Arc::new(MockNewsletterRepository::new());
        let mut session = session(Arc::clone(&repo));
        let t0 = Instant::now();

        session
            .edit(t0, |n| {
                n.rename_title("Week 1");
                Ok(())
            })
            .unwrap();
        assert_eq!(session.save_state(), SaveState::Pending);

        // Quiet period not over yet.
        assert!(!session.tick(t0 + Duration::from_secs(1)).await);
        assert_eq!(repo.save_count(), 0);

        // Quiet period elapsed: exactly one save.
        assert!(session.tick(t0 + Duration::from_secs(3)).await);
        assert_eq!(repo.save_count(), 1);
        assert_eq!(session.save_state(), SaveState::Saved);
    }

    #[tokio::test]
    async fn burst_of_edits_coalesces_into_one_save() {
        let repo = Arc::new(MockNewsletterRepository::new());
        let mut session = session(Arc::clone(&repo));
        let t0 = Instant::now();

        for i in 0..5 {
            let at = t0 + Duration::from_millis(500 * i);
            session
                .edit(at, |n| {
                    n.rename_title(format!("Draft {i}"));
                    Ok(())
                })
                .unwrap();
            assert!(!session.tick(at).await);
        }

        // Deadline counts from the *last* edit.
        assert!(!session.tick(t0 + Duration::from_millis(3000)).await);
        assert!(session.tick(t0 + Duration::from_millis(4500)).await);
        assert_eq!(repo.save_count(), 1);
        assert_eq!(
            repo.last_saved.lock().unwrap().as_ref().unwrap().title(),
            "Draft 4"
        );
    }

    #[tokio::test]
    async fn first_save_creates_and_assigns_the_storage_id() {
        let repo = Arc::new(MockNewsletterRepository::new());
        let mut session = session(Arc::clone(&repo));
        assert!(session.newsletter().id().is_none());

        session.save_now().await;
        assert!(session.newsletter().id().is_some());
    }

    #[tokio::test]
    async fn failed_save_keeps_edits_and_surfaces_transient_error() {
        let repo = Arc::new(MockNewsletterRepository::new());
        let mut session = session(Arc::clone(&repo));
        let t0 = Instant::now();

        session
            .edit(t0, |n| {
                n.rename_title("Precious edits");
                Ok(())
            })
            .unwrap();

        repo.set_failing(true);
        session.tick(t0 + Duration::from_secs(3)).await;

        assert_eq!(session.save_state(), SaveState::Pending);
        assert!(session.save_error().unwrap().contains("DATABASE_ERROR"));
        assert_eq!(session.newsletter().title(), "Precious edits");

        // No automatic retry: time passing alone never re-fires.
        assert!(!session.tick(t0 + Duration::from_secs(60)).await);

        // Manual retry path: explicit save succeeds once the backend is up.
        repo.set_failing(false);
        session.save_now().await;
        assert_eq!(session.save_state(), SaveState::Saved);
        assert!(session.save_error().is_none());
    }

    #[tokio::test]
    async fn next_edit_reschedules_save_after_a_failure() {
        let repo = Arc::new(MockNewsletterRepository::new());
        let mut session = session(Arc::clone(&repo));
        let t0 = Instant::now();

        session
            .edit(t0, |n| {
                n.rename_title("One");
                Ok(())
            })
            .unwrap();
        repo.set_failing(true);
        session.tick(t0 + Duration::from_secs(3)).await;
        assert!(session.save_error().is_some());

        repo.set_failing(false);
        let t1 = t0 + Duration::from_secs(10);
        session
            .edit(t1, |n| {
                n.rename_title("Two");
                Ok(())
            })
            .unwrap();
        assert!(session.tick(t1 + Duration::from_secs(3)).await);
        assert_eq!(session.save_state(), SaveState::Saved);
    }

    #[tokio::test]
    async fn failed_mutation_does_not_schedule_a_save() {
        let repo = Arc::new(MockNewsletterRepository::new());
        let mut session = session(Arc::clone(&repo));
        let t0 = Instant::now();

        let err = session
            .edit(t0, |n| n.reorder(0, 99))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionIndexOutOfRange);
        assert_eq!(session.save_state(), SaveState::Saved);
        assert!(!session.tick(t0 + Duration::from_secs(10)).await);
    }
}
