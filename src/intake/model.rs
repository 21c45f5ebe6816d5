//! Wire and document types for the intake endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wizard::NotificationPrefs;

/// Incoming submission body. Link fields and notifications are optional;
/// absent values deserialize to empty/default so the required-field gate
/// can report them uniformly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeSubmission {
    pub name: String,
    pub email: String,
    pub major: String,
    pub graduation_year: String,
    pub career_goal: String,
    pub linkedin_url: String,
    pub github_url: String,
    pub portfolio_url: String,
    pub calendly_url: String,
    pub notifications: NotificationPrefs,
}

impl IntakeSubmission {
    /// The required fields with their wire names, in declaration order.
    /// The first empty one is the reported error.
    pub fn first_missing_required(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("major", &self.major),
            ("graduationYear", &self.graduation_year),
            ("careerGoal", &self.career_goal),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Per-field prerequisite flags stored on the member profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrereqFlags {
    #[serde(rename = "missingLinkedIn")]
    pub missing_linkedin: bool,
    #[serde(rename = "missingGitHub")]
    pub missing_github: bool,
    #[serde(rename = "missingWebsite")]
    pub missing_website: bool,
    #[serde(rename = "missingCalendly")]
    pub missing_calendly: bool,
}

/// One missing prerequisite, with a pointer to a setup guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingItem {
    pub field: &'static str,
    pub issue: String,
    pub guide: &'static str,
}

/// The document handed to the CMS.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    #[serde(rename = "_type")]
    pub doc_type: &'static str,
    pub name: String,
    pub email: String,
    pub major: String,
    pub graduation_year: String,
    pub career_goal: String,
    pub linkedin_url: String,
    pub github_url: String,
    pub portfolio_url: String,
    pub calendly_url: String,
    pub onboarding_status: &'static str,
    #[serde(flatten)]
    pub flags: PrereqFlags,
    pub notifications: NotificationPrefs,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberProfile {
    /// Normalize a validated submission: trimmed values, lowercased email,
    /// fresh timestamps, status `new`.
    pub fn from_submission(sub: &IntakeSubmission, flags: PrereqFlags) -> Self {
        let now = Utc::now();
        Self {
            doc_type: "memberProfile",
            name: sub.name.trim().to_string(),
            email: sub.email.trim().to_lowercase(),
            major: sub.major.trim().to_string(),
            graduation_year: sub.graduation_year.trim().to_string(),
            career_goal: sub.career_goal.trim().to_string(),
            linkedin_url: sub.linkedin_url.trim().to_string(),
            github_url: sub.github_url.trim().to_string(),
            portfolio_url: sub.portfolio_url.trim().to_string(),
            calendly_url: sub.calendly_url.trim().to_string(),
            onboarding_status: "new",
            flags,
            notifications: sub.notifications,
            submitted_at: now,
            updated_at: now,
        }
    }
}
