//! Submission coordinator — packages the finished wizard and hands it to
//! the intake endpoint.
//!
//! Delivery is at-most-once, fire-and-forget: the success indicator goes
//! out before the dispatch result is known, failures are logged only, and
//! the persisted snapshot is cleared regardless of the outcome.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use url::Url;

use super::controller::WizardController;
use super::schema::CAREER_GOAL_OTHER;
use super::state::{NotificationPrefs, WizardState};
use crate::error::{DispatchError, WizardError};

/// Events the coordinator emits for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitEvent {
    /// The submission was accepted locally; show the success indicator.
    Accepted,
    /// Navigate to the post-onboarding destination.
    Redirect { location: String },
}

/// Wire payload for the intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakePayload {
    pub name: String,
    pub email: String,
    pub major: String,
    pub graduation_year: String,
    pub career_goal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendly_url: Option<String>,
    pub notifications: NotificationPrefs,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl IntakePayload {
    /// Build the payload from a completed wizard state.
    ///
    /// The `other` sentinel is a UI artifact: the dispatched career goal is
    /// the free-text value the user actually wrote.
    pub fn from_state(state: &WizardState) -> Self {
        let fields = &state.fields;
        let career_goal = if fields.career_goal.trim() == CAREER_GOAL_OTHER {
            fields.other_career_goal.trim()
        } else {
            fields.career_goal.trim()
        };
        Self {
            name: fields.name.trim().to_string(),
            email: fields.email.trim().to_string(),
            major: fields.major.trim().to_string(),
            graduation_year: fields.graduation_year.trim().to_string(),
            career_goal: career_goal.to_string(),
            linkedin_url: optional(&fields.linkedin_url),
            github_url: optional(&fields.github_url),
            portfolio_url: optional(&fields.portfolio_url),
            calendly_url: optional(&fields.calendly_url),
            notifications: state.notifications,
        }
    }
}

/// HTTP client for the intake endpoint.
pub struct IntakeClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl IntakeClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// POST the payload; any non-success status is an error.
    pub async fn submit(&self, payload: &IntakePayload) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// Orchestrates `complete()` from the terminal step.
pub struct SubmissionCoordinator {
    intake: IntakeClient,
    redirect_location: String,
    redirect_delay: Duration,
    events: mpsc::UnboundedSender<SubmitEvent>,
}

impl SubmissionCoordinator {
    pub fn new(
        intake: IntakeClient,
        redirect_location: impl Into<String>,
        redirect_delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SubmitEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                intake,
                redirect_location: redirect_location.into(),
                redirect_delay,
                events,
            },
            rx,
        )
    }

    /// Finish the wizard, in order: final save, success indicator,
    /// awaited dispatch (failure logged only), unconditional clear,
    /// delayed redirect.
    pub async fn complete(&self, controller: &WizardController) -> Result<(), WizardError> {
        let step = controller.current_step().await;
        if !step.is_terminal() {
            return Err(WizardError::NotAtFinalStep {
                current: step.number(),
            });
        }

        controller.save_now().await;

        // Success is announced before the dispatch outcome is known.
        let _ = self.events.send(SubmitEvent::Accepted);

        let payload = IntakePayload::from_state(&controller.snapshot().await);
        if let Err(e) = self.intake.submit(&payload).await {
            tracing::warn!("Intake dispatch failed (submission dropped): {e}");
        }

        controller.clear_progress().await;

        let events = self.events.clone();
        let location = self.redirect_location.clone();
        let delay = self.redirect_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SubmitEvent::Redirect { location });
        });

        Ok(())
    }
}
