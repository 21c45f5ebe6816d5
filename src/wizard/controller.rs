//! WizardController — owns the wizard state and coordinates validation,
//! navigation, and persistence.

use tokio::sync::RwLock;

use super::progress::ProgressStore;
use super::schema::FieldId;
use super::state::{NotificationChannel, WizardState, WizardStep};
use super::validate::{self, StepValidation};
use crate::error::WizardError;

/// Result of an `advance()` intent.
#[derive(Debug)]
pub enum AdvanceOutcome {
    /// Validation passed; the wizard moved to this step.
    Advanced(WizardStep),
    /// Validation failed; the step did not change. Carries every failing
    /// field for UI marking; the first one is the announced reason.
    Rejected { validation: StepValidation },
    /// Already at the final step; advancing is a no-op there.
    AtFinalStep,
}

/// What `bootstrap` found in the progress store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreAction {
    /// No usable snapshot; the wizard starts fresh.
    Fresh,
    /// A step-1 snapshot was restored silently (no progress at stake).
    Resumed(WizardStep),
    /// A snapshot with real progress exists. The presentation layer must
    /// ask the user and then call `resume_saved` or `discard_saved`.
    ConfirmRequired(WizardStep),
}

/// Owns `WizardState` at runtime. All mutation goes through the intent
/// methods; every successful transition writes exactly one snapshot.
pub struct WizardController {
    state: RwLock<WizardState>,
    pending_restore: RwLock<Option<WizardState>>,
    progress: ProgressStore,
}

impl WizardController {
    /// Fresh controller at step 1 with empty fields.
    pub fn new(progress: ProgressStore) -> Self {
        Self {
            state: RwLock::new(WizardState::new()),
            pending_restore: RwLock::new(None),
            progress,
        }
    }

    /// Load any prior session from the progress store.
    ///
    /// A snapshot still on step 1 restores silently; one with real progress
    /// is held pending until the user decides (two-choice restore, never a
    /// blocking prompt here).
    pub async fn bootstrap(progress: ProgressStore) -> (Self, RestoreAction) {
        match progress.load().await {
            None => (Self::new(progress), RestoreAction::Fresh),
            Some(saved) if saved.step == WizardStep::Welcome => {
                let step = saved.step;
                let controller = Self {
                    state: RwLock::new(saved),
                    pending_restore: RwLock::new(None),
                    progress,
                };
                (controller, RestoreAction::Resumed(step))
            }
            Some(saved) => {
                let step = saved.step;
                let controller = Self {
                    state: RwLock::new(WizardState::new()),
                    pending_restore: RwLock::new(Some(saved)),
                    progress,
                };
                (controller, RestoreAction::ConfirmRequired(step))
            }
        }
    }

    /// Accept the pending restore: adopt the saved fields and step.
    ///
    /// Does not re-save — the store already holds exactly this snapshot.
    pub async fn resume_saved(&self) -> Result<WizardStep, WizardError> {
        let saved = self
            .pending_restore
            .write()
            .await
            .take()
            .ok_or(WizardError::NoPendingRestore)?;
        let step = saved.step;
        *self.state.write().await = saved;
        Ok(step)
    }

    /// Decline the pending restore: drop the snapshot and stay fresh.
    pub async fn discard_saved(&self) -> Result<(), WizardError> {
        self.pending_restore
            .write()
            .await
            .take()
            .ok_or(WizardError::NoPendingRestore)?;
        self.progress.clear().await;
        Ok(())
    }

    pub async fn current_step(&self) -> WizardStep {
        self.state.read().await.step
    }

    /// A copy of the state for rendering.
    pub async fn snapshot(&self) -> WizardState {
        self.state.read().await.clone()
    }

    /// Record a field edit and persist the snapshot.
    pub async fn set_field(&self, id: FieldId, value: impl Into<String>) {
        let snapshot = {
            let mut state = self.state.write().await;
            state.fields.set(id, value);
            state.clone()
        };
        self.progress.save(&snapshot).await;
    }

    /// Record a notification opt-in change and persist the snapshot.
    pub async fn set_notification(&self, channel: NotificationChannel, enabled: bool) {
        let snapshot = {
            let mut state = self.state.write().await;
            state.notifications.set(channel, enabled);
            state.clone()
        };
        self.progress.save(&snapshot).await;
    }

    /// Validate the active step and move forward on success.
    pub async fn advance(&self) -> AdvanceOutcome {
        let snapshot = {
            let mut state = self.state.write().await;
            let Some(next) = state.step.next() else {
                return AdvanceOutcome::AtFinalStep;
            };
            let validation = validate::validate_step(state.step, &state);
            if !validation.passed() {
                return AdvanceOutcome::Rejected { validation };
            }
            state.step = next;
            state.clone()
        };
        self.progress.save(&snapshot).await;
        AdvanceOutcome::Advanced(snapshot.step)
    }

    /// Move back one step. Backward navigation never validates.
    pub async fn retreat(&self) -> Option<WizardStep> {
        let snapshot = {
            let mut state = self.state.write().await;
            let prev = state.step.prev()?;
            state.step = prev;
            state.clone()
        };
        self.progress.save(&snapshot).await;
        Some(snapshot.step)
    }

    /// Position the wizard directly on a step (session-restore path).
    /// Out-of-range numbers are rejected as a no-op.
    pub async fn jump_to(&self, step_number: u8) -> bool {
        let Some(step) = WizardStep::from_number(step_number) else {
            return false;
        };
        let snapshot = {
            let mut state = self.state.write().await;
            state.step = step;
            state.clone()
        };
        self.progress.save(&snapshot).await;
        true
    }

    /// Belt-and-suspenders save used by the submission coordinator.
    pub(crate) async fn save_now(&self) {
        let snapshot = self.snapshot().await;
        self.progress.save(&snapshot).await;
    }

    /// Drop the persisted snapshot (successful submission or discard).
    pub(crate) async fn clear_progress(&self) {
        self.progress.clear().await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryKvStore;
    use crate::wizard::schema::CAREER_GOAL_OTHER;

    fn fixture() -> (WizardController, ProgressStore) {
        let progress = ProgressStore::new(Arc::new(MemoryKvStore::new()));
        (WizardController::new(progress.clone()), progress)
    }

    async fn fill_profile(ctrl: &WizardController) {
        ctrl.set_field(FieldId::Name, "Ada Lovelace").await;
        ctrl.set_field(FieldId::Email, "ada@example.com").await;
        ctrl.set_field(FieldId::Major, "Computer Science").await;
        ctrl.set_field(FieldId::GraduationYear, "2027").await;
    }

    #[tokio::test]
    async fn welcome_step_advances_without_gating() {
        let (ctrl, _) = fixture();
        assert!(matches!(
            ctrl.advance().await,
            AdvanceOutcome::Advanced(WizardStep::Profile)
        ));
    }

    #[tokio::test]
    async fn failed_validation_leaves_step_unchanged() {
        let (ctrl, _) = fixture();
        ctrl.advance().await; // onto profile

        let outcome = ctrl.advance().await;
        let AdvanceOutcome::Rejected { validation } = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(validation.primary_message(), Some("This field is required"));
        assert_eq!(ctrl.current_step().await, WizardStep::Profile);
    }

    #[tokio::test]
    async fn rejection_at_career_goal_step() {
        let (ctrl, _) = fixture();
        ctrl.advance().await;
        fill_profile(&ctrl).await;
        ctrl.advance().await; // onto career goal

        ctrl.set_field(FieldId::CareerGoal, CAREER_GOAL_OTHER).await;
        let outcome = ctrl.advance().await;
        let AdvanceOutcome::Rejected { validation } = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(
            validation.primary_message(),
            Some("Please specify your career goal")
        );
        assert_eq!(ctrl.current_step().await, WizardStep::CareerGoal);
    }

    #[tokio::test]
    async fn rejection_at_links_step_on_bad_domain() {
        let (ctrl, _) = fixture();
        ctrl.advance().await;
        fill_profile(&ctrl).await;
        ctrl.advance().await;
        ctrl.set_field(FieldId::CareerGoal, "swe").await;
        ctrl.advance().await; // onto links

        ctrl.set_field(FieldId::LinkedinUrl, "https://example.com").await;
        assert!(matches!(
            ctrl.advance().await,
            AdvanceOutcome::Rejected { .. }
        ));
        assert_eq!(ctrl.current_step().await, WizardStep::Links);

        ctrl.set_field(FieldId::LinkedinUrl, "https://www.linkedin.com/in/ada")
            .await;
        assert!(matches!(
            ctrl.advance().await,
            AdvanceOutcome::Advanced(WizardStep::Community)
        ));
    }

    #[tokio::test]
    async fn advance_is_noop_at_final_step() {
        let (ctrl, _) = fixture();
        assert!(ctrl.jump_to(5).await);
        assert!(matches!(ctrl.advance().await, AdvanceOutcome::AtFinalStep));
        assert_eq!(ctrl.current_step().await, WizardStep::Community);
    }

    #[tokio::test]
    async fn retreat_always_succeeds_regardless_of_validity() {
        let (ctrl, _) = fixture();
        for n in (2..=5u8).rev() {
            assert!(ctrl.jump_to(n).await);
            let prev = ctrl.retreat().await.unwrap();
            assert_eq!(prev.number(), n - 1);
        }
        // From step 1 there is nowhere to go back to.
        assert!(ctrl.jump_to(1).await);
        assert!(ctrl.retreat().await.is_none());
    }

    #[tokio::test]
    async fn jump_to_rejects_out_of_range() {
        let (ctrl, _) = fixture();
        assert!(!ctrl.jump_to(0).await);
        assert!(!ctrl.jump_to(6).await);
        assert_eq!(ctrl.current_step().await, WizardStep::Welcome);
    }

    #[tokio::test]
    async fn advancing_persists_step_and_fields() {
        let (ctrl, progress) = fixture();
        ctrl.advance().await;
        fill_profile(&ctrl).await;
        assert!(matches!(
            ctrl.advance().await,
            AdvanceOutcome::Advanced(WizardStep::CareerGoal)
        ));

        let saved = progress.load().await.unwrap();
        assert_eq!(saved.step, WizardStep::CareerGoal);
        assert_eq!(saved.fields.name, "Ada Lovelace");
        assert_eq!(saved.fields.email, "ada@example.com");
    }

    #[tokio::test]
    async fn bootstrap_fresh_when_store_empty() {
        let progress = ProgressStore::new(Arc::new(MemoryKvStore::new()));
        let (ctrl, action) = WizardController::bootstrap(progress).await;
        assert_eq!(action, RestoreAction::Fresh);
        assert_eq!(ctrl.current_step().await, WizardStep::Welcome);
    }

    #[tokio::test]
    async fn bootstrap_restores_step_one_silently() {
        let progress = ProgressStore::new(Arc::new(MemoryKvStore::new()));
        let mut state = WizardState::new();
        state.fields.name = "Typed before reload".to_string();
        progress.save(&state).await;

        let (ctrl, action) = WizardController::bootstrap(progress).await;
        assert_eq!(action, RestoreAction::Resumed(WizardStep::Welcome));
        assert_eq!(ctrl.snapshot().await.fields.name, "Typed before reload");
    }

    #[tokio::test]
    async fn bootstrap_with_progress_requires_confirmation() {
        let progress = ProgressStore::new(Arc::new(MemoryKvStore::new()));
        let mut state = WizardState::new();
        state.step = WizardStep::Links;
        state.fields.name = "Ada".to_string();
        progress.save(&state).await;

        let (ctrl, action) = WizardController::bootstrap(progress.clone()).await;
        assert_eq!(action, RestoreAction::ConfirmRequired(WizardStep::Links));
        // Until the user decides, the wizard sits fresh at step 1.
        assert_eq!(ctrl.current_step().await, WizardStep::Welcome);

        let step = ctrl.resume_saved().await.unwrap();
        assert_eq!(step, WizardStep::Links);
        assert_eq!(ctrl.snapshot().await.fields.name, "Ada");
        // The snapshot is still in the store after resuming.
        assert!(progress.load().await.is_some());
    }

    #[tokio::test]
    async fn declining_restore_discards_snapshot() {
        let progress = ProgressStore::new(Arc::new(MemoryKvStore::new()));
        let mut state = WizardState::new();
        state.step = WizardStep::CareerGoal;
        progress.save(&state).await;

        let (ctrl, action) = WizardController::bootstrap(progress.clone()).await;
        assert!(matches!(action, RestoreAction::ConfirmRequired(_)));
        ctrl.discard_saved().await.unwrap();
        assert!(progress.load().await.is_none());
        assert_eq!(ctrl.current_step().await, WizardStep::Welcome);
    }

    #[tokio::test]
    async fn restore_decisions_require_a_pending_snapshot() {
        let (ctrl, _) = fixture();
        assert!(ctrl.resume_saved().await.is_err());
        assert!(ctrl.discard_saved().await.is_err());
    }

    #[tokio::test]
    async fn field_edits_persist_immediately() {
        let (ctrl, progress) = fixture();
        ctrl.set_field(FieldId::Major, "Mathematics").await;
        ctrl.set_notification(NotificationChannel::Mentoring, true).await;

        let saved = progress.load().await.unwrap();
        assert_eq!(saved.fields.major, "Mathematics");
        assert!(saved.notifications.mentoring);
    }
}
