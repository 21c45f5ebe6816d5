//! Per-field and per-step validation.
//!
//! Pure functions over the field schema; results are always recomputed and
//! never persisted.

use url::Url;

use super::schema::{self, FieldId, FieldKind, FieldSpec, CAREER_GOAL_OTHER, EMAIL_RE};
use super::state::{WizardState, WizardStep};

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    /// Human-readable reason when invalid, absent otherwise.
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: &str) -> Self {
        Self {
            valid: false,
            message: Some(message.to_string()),
        }
    }
}

/// A field paired with its validation outcome.
#[derive(Debug, Clone)]
pub struct FieldCheck {
    pub field: FieldId,
    pub result: ValidationResult,
}

/// Aggregate outcome for a step: every field's check, in declaration order.
///
/// All invalid fields are reported so the presentation layer can mark each
/// of them; the step passes only when every check does, and the first
/// failure in declaration order is the announced reason.
#[derive(Debug, Clone, Default)]
pub struct StepValidation {
    pub checks: Vec<FieldCheck>,
}

impl StepValidation {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.result.valid)
    }

    /// Every failing field, for UI marking.
    pub fn failures(&self) -> impl Iterator<Item = &FieldCheck> {
        self.checks.iter().filter(|c| !c.result.valid)
    }

    /// The first failure in declaration order, if any.
    pub fn first_failure(&self) -> Option<&FieldCheck> {
        self.failures().next()
    }

    /// The announced reason: the first failure's message.
    pub fn primary_message(&self) -> Option<&str> {
        self.first_failure()
            .and_then(|c| c.result.message.as_deref())
    }
}

/// Validate one field against the current state.
pub fn validate_field(spec: &FieldSpec, state: &WizardState) -> ValidationResult {
    let value = state.fields.get(spec.id).trim();

    // The free-text goal is required only while the selector sits on the
    // `other` sentinel.
    let required = spec.required
        || (spec.id == FieldId::OtherCareerGoal
            && state.fields.career_goal.trim() == CAREER_GOAL_OTHER);

    if value.is_empty() {
        return if required {
            ValidationResult::fail(spec.required_message)
        } else {
            ValidationResult::ok()
        };
    }

    let shape_ok = match spec.kind {
        FieldKind::Text | FieldKind::Select => true,
        FieldKind::Email => EMAIL_RE.is_match(value),
        FieldKind::Url { domain } => check_url(value, domain),
    };

    if shape_ok {
        ValidationResult::ok()
    } else {
        ValidationResult::fail(spec.invalid_message)
    }
}

/// Validate every field of a step. Steps without fields (welcome,
/// community) always pass.
pub fn validate_step(step: WizardStep, state: &WizardState) -> StepValidation {
    StepValidation {
        checks: schema::fields_for_step(step)
            .map(|spec| FieldCheck {
                field: spec.id,
                result: validate_field(spec, state),
            })
            .collect(),
    }
}

/// An http(s) URL whose host contains the expected domain, when one is
/// configured.
fn check_url(value: &str, domain: Option<&str>) -> bool {
    let Ok(url) = Url::parse(value) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };
    match domain {
        Some(expected) => host.contains(expected),
        None => true,
    }
}
