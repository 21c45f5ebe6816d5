//! Typed field schema for the wizard.
//!
//! Every field the wizard collects is declared here once, with its step,
//! semantic kind, and required-ness. The validator and the payload builder
//! both drive off this table instead of looking fields up by name.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::state::WizardStep;
use crate::error::ConfigError;

/// Sentinel value of the career-goal selector that opens the free-text field.
pub const CAREER_GOAL_OTHER: &str = "other";

/// Simple email shape: `local@domain.tld`, no whitespace, at least one dot
/// after the `@`.
pub static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Identifier for every field the wizard collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    Name,
    Email,
    Major,
    GraduationYear,
    CareerGoal,
    OtherCareerGoal,
    LinkedinUrl,
    GithubUrl,
    PortfolioUrl,
    CalendlyUrl,
}

/// Semantic kind of a field, deciding which shape check applies to
/// non-empty values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; only the required check applies.
    Text,
    /// A fixed-choice selector; only the required check applies.
    Select,
    /// Must match the simple email shape.
    Email,
    /// Must parse as an http(s) URL; when `domain` is set, the host must
    /// contain it.
    Url { domain: Option<&'static str> },
}

/// Declaration of one wizard field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub id: FieldId,
    /// Human-facing label for prompts and error reporting.
    pub label: &'static str,
    pub step: WizardStep,
    pub required: bool,
    pub kind: FieldKind,
    /// Message announced when a required field is empty.
    pub required_message: &'static str,
    /// Message announced when a non-empty value fails its shape check.
    pub invalid_message: &'static str,
}

const REQUIRED: &str = "This field is required";
const INVALID_URL: &str = "Please enter a valid URL starting with http:// or https://";

/// All wizard fields, in declaration order. The first failing field in this
/// order is the one announced when a step fails validation.
pub static WIZARD_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        id: FieldId::Name,
        label: "Name",
        step: WizardStep::Profile,
        required: true,
        kind: FieldKind::Text,
        required_message: REQUIRED,
        invalid_message: REQUIRED,
    },
    FieldSpec {
        id: FieldId::Email,
        label: "Email",
        step: WizardStep::Profile,
        required: true,
        kind: FieldKind::Email,
        required_message: REQUIRED,
        invalid_message: "Please enter a valid email address.",
    },
    FieldSpec {
        id: FieldId::Major,
        label: "Major",
        step: WizardStep::Profile,
        required: true,
        kind: FieldKind::Text,
        required_message: REQUIRED,
        invalid_message: REQUIRED,
    },
    FieldSpec {
        id: FieldId::GraduationYear,
        label: "Graduation year",
        step: WizardStep::Profile,
        required: true,
        kind: FieldKind::Text,
        required_message: REQUIRED,
        invalid_message: REQUIRED,
    },
    FieldSpec {
        id: FieldId::CareerGoal,
        label: "Career goal",
        step: WizardStep::CareerGoal,
        required: true,
        kind: FieldKind::Select,
        required_message: "Please select a career goal",
        invalid_message: "Please select a career goal",
    },
    FieldSpec {
        id: FieldId::OtherCareerGoal,
        label: "Career goal (other)",
        // Required only while the selector is on the `other` sentinel; the
        // validator special-cases this field.
        step: WizardStep::CareerGoal,
        required: false,
        kind: FieldKind::Text,
        required_message: "Please specify your career goal",
        invalid_message: "Please specify your career goal",
    },
    FieldSpec {
        id: FieldId::LinkedinUrl,
        label: "LinkedIn",
        step: WizardStep::Links,
        required: false,
        kind: FieldKind::Url {
            domain: Some("linkedin.com"),
        },
        required_message: REQUIRED,
        invalid_message: "Please enter a valid LinkedIn URL",
    },
    FieldSpec {
        id: FieldId::GithubUrl,
        label: "GitHub",
        step: WizardStep::Links,
        required: false,
        kind: FieldKind::Url {
            domain: Some("github.com"),
        },
        required_message: REQUIRED,
        invalid_message: "Please enter a valid GitHub URL",
    },
    FieldSpec {
        id: FieldId::PortfolioUrl,
        label: "Personal Website",
        step: WizardStep::Links,
        required: false,
        kind: FieldKind::Url { domain: None },
        required_message: REQUIRED,
        invalid_message: INVALID_URL,
    },
    FieldSpec {
        id: FieldId::CalendlyUrl,
        label: "Calendly",
        step: WizardStep::Links,
        required: false,
        kind: FieldKind::Url {
            domain: Some("calendly.com"),
        },
        required_message: REQUIRED,
        invalid_message: "Please enter a valid Calendly URL",
    },
];

/// Look up a field's declaration.
pub fn spec_for(id: FieldId) -> &'static FieldSpec {
    WIZARD_FIELDS
        .iter()
        .find(|f| f.id == id)
        .expect("every FieldId is declared in WIZARD_FIELDS")
}

/// The fields belonging to a step, in declaration order.
pub fn fields_for_step(step: WizardStep) -> impl Iterator<Item = &'static FieldSpec> {
    WIZARD_FIELDS.iter().filter(move |f| f.step == step)
}

/// Startup sanity check: every field id declared exactly once, the email
/// regex compiles. Called once from `main`.
pub fn verify() -> Result<(), ConfigError> {
    for (i, spec) in WIZARD_FIELDS.iter().enumerate() {
        let dup = WIZARD_FIELDS
            .iter()
            .skip(i + 1)
            .any(|other| other.id == spec.id);
        if dup {
            return Err(ConfigError::InvalidValue {
                key: "schema".to_string(),
                message: format!("field {:?} declared more than once", spec.id),
            });
        }
    }
    LazyLock::force(&EMAIL_RE);
    Ok(())
}
