//! Wizard state machine — tracks which step the user is on.

use serde::{Deserialize, Serialize};

use super::schema::FieldId;

/// The steps of the onboarding wizard.
///
/// Progresses linearly: Welcome → Profile → CareerGoal → Links → Community.
/// Community is the terminal step; submission happens from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Welcome,
    Profile,
    CareerGoal,
    Links,
    Community,
}

impl WizardStep {
    /// Total number of steps.
    pub const COUNT: u8 = 5;

    /// 1-based step number.
    pub fn number(&self) -> u8 {
        match self {
            Self::Welcome => 1,
            Self::Profile => 2,
            Self::CareerGoal => 3,
            Self::Links => 4,
            Self::Community => 5,
        }
    }

    /// Look up a step by its 1-based number. Out-of-range numbers are None.
    pub fn from_number(n: u8) -> Option<WizardStep> {
        match n {
            1 => Some(Self::Welcome),
            2 => Some(Self::Profile),
            3 => Some(Self::CareerGoal),
            4 => Some(Self::Links),
            5 => Some(Self::Community),
            _ => None,
        }
    }

    /// Whether this step is terminal (submission happens here).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Community)
    }

    /// The next step in the linear progression, if any.
    pub fn next(&self) -> Option<WizardStep> {
        Self::from_number(self.number() + 1)
    }

    /// The previous step, if any.
    pub fn prev(&self) -> Option<WizardStep> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    /// Check if a transition from `self` to `target` is a legal user-driven
    /// move. Only adjacent steps are reachable; restores bypass this via
    /// `WizardController::jump_to`.
    pub fn can_transition_to(&self, target: WizardStep) -> bool {
        self.next() == Some(target) || self.prev() == Some(target)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Welcome
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::Profile => "profile",
            Self::CareerGoal => "career_goal",
            Self::Links => "links",
            Self::Community => "community",
        };
        write!(f, "{s}")
    }
}

/// Form field values, keyed by the schema.
///
/// All values are kept as entered (untrimmed); trimming happens in the
/// validator and at the intake boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub major: String,
    pub graduation_year: String,
    pub career_goal: String,
    pub other_career_goal: String,
    pub linkedin_url: String,
    pub github_url: String,
    pub portfolio_url: String,
    pub calendly_url: String,
}

impl FormFields {
    pub fn get(&self, id: FieldId) -> &str {
        match id {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Major => &self.major,
            FieldId::GraduationYear => &self.graduation_year,
            FieldId::CareerGoal => &self.career_goal,
            FieldId::OtherCareerGoal => &self.other_career_goal,
            FieldId::LinkedinUrl => &self.linkedin_url,
            FieldId::GithubUrl => &self.github_url,
            FieldId::PortfolioUrl => &self.portfolio_url,
            FieldId::CalendlyUrl => &self.calendly_url,
        }
    }

    pub fn set(&mut self, id: FieldId, value: impl Into<String>) {
        let value = value.into();
        match id {
            FieldId::Name => self.name = value,
            FieldId::Email => self.email = value,
            FieldId::Major => self.major = value,
            FieldId::GraduationYear => self.graduation_year = value,
            FieldId::CareerGoal => self.career_goal = value,
            FieldId::OtherCareerGoal => self.other_career_goal = value,
            FieldId::LinkedinUrl => self.linkedin_url = value,
            FieldId::GithubUrl => self.github_url = value,
            FieldId::PortfolioUrl => self.portfolio_url = value,
            FieldId::CalendlyUrl => self.calendly_url = value,
        }
    }
}

/// Notification opt-in channels offered on the community step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    Events,
    Workshops,
    Mentoring,
}

/// Notification opt-in flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPrefs {
    pub events: bool,
    pub workshops: bool,
    pub mentoring: bool,
}

impl NotificationPrefs {
    pub fn set(&mut self, channel: NotificationChannel, enabled: bool) {
        match channel {
            NotificationChannel::Events => self.events = enabled,
            NotificationChannel::Workshops => self.workshops = enabled,
            NotificationChannel::Mentoring => self.mentoring = enabled,
        }
    }
}

/// The full wizard state: active step, field values, and opt-in flags.
///
/// Owned by the `WizardController` at runtime; the `ProgressStore` holds a
/// serialized copy with independent lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub step: WizardStep,
    #[serde(default)]
    pub fields: FormFields,
    #[serde(default)]
    pub notifications: NotificationPrefs,
}

impl WizardState {
    /// Fresh state: step 1, everything empty.
    pub fn new() -> Self {
        Self::default()
    }
}
