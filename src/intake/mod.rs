//! Intake endpoint — accepts completed onboarding payloads.
//!
//! The HTTP side of the pipeline: validates the submission, flags missing
//! prerequisites, hands the member profile to the CMS, and fans out
//! notification webhooks. The CMS and the email/Discord automation remain
//! external collaborators reached over HTTP.

pub mod cms;
pub mod model;
pub mod notify;
pub mod prereq;
pub mod routes;

pub use cms::CmsClient;
pub use model::{IntakeSubmission, MemberProfile, MissingItem, PrereqFlags};
pub use prereq::{detect_missing_prerequisites, validate_url};
pub use routes::intake_routes;
