//! Onboarding wizard — linear five-step flow with persisted progress.
//!
//! The wizard core is headless: `WizardController` owns the state and
//! exposes intent methods (advance, retreat, field edits, restore
//! decisions); a presentation layer renders state snapshots and forwards
//! user intents. Completed sessions are handed to the intake endpoint by
//! the `SubmissionCoordinator`.

pub mod controller;
pub mod progress;
pub mod schema;
pub mod state;
pub mod submit;
pub mod validate;

pub use controller::{AdvanceOutcome, RestoreAction, WizardController};
pub use progress::ProgressStore;
pub use schema::{FieldId, FieldKind, FieldSpec, CAREER_GOAL_OTHER};
pub use state::{FormFields, NotificationChannel, NotificationPrefs, WizardState, WizardStep};
pub use submit::{IntakeClient, IntakePayload, SubmissionCoordinator, SubmitEvent};
pub use validate::{FieldCheck, StepValidation, ValidationResult};
