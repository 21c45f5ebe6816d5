//! Missing-prerequisite detection.
//!
//! New members are accepted even with incomplete professional links; the
//! gaps are recorded on the profile and included in the response so the
//! email automation can send setup instructions.

use url::Url;

use super::model::{IntakeSubmission, MissingItem, PrereqFlags};

/// Check a link value: present, parseable, and on the expected domain
/// when one is given.
pub fn validate_url(value: &str, expected_domain: Option<&str>) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("URL is required".to_string());
    }
    let Ok(url) = Url::parse(value) else {
        return Err("Invalid URL format".to_string());
    };
    if let Some(domain) = expected_domain {
        let on_domain = url.host_str().is_some_and(|host| host.contains(domain));
        if !on_domain {
            return Err(format!("URL should be from {domain}"));
        }
    }
    Ok(())
}

/// Inspect every link field and collect the gaps.
pub fn detect_missing_prerequisites(sub: &IntakeSubmission) -> (PrereqFlags, Vec<MissingItem>) {
    let mut flags = PrereqFlags::default();
    let mut missing = Vec::new();

    if let Err(issue) = validate_url(&sub.linkedin_url, Some("linkedin.com")) {
        flags.missing_linkedin = true;
        missing.push(MissingItem {
            field: "LinkedIn",
            issue,
            guide: "https://www.linkedin.com/help/linkedin/answer/a542685",
        });
    }

    if let Err(issue) = validate_url(&sub.github_url, Some("github.com")) {
        flags.missing_github = true;
        missing.push(MissingItem {
            field: "GitHub",
            issue,
            guide: "https://docs.github.com/en/get-started",
        });
    }

    if let Err(issue) = validate_url(&sub.portfolio_url, None) {
        flags.missing_website = true;
        missing.push(MissingItem {
            field: "Personal Website",
            issue,
            guide: "https://pages.github.com/",
        });
    }

    if let Err(issue) = validate_url(&sub.calendly_url, Some("calendly.com")) {
        flags.missing_calendly = true;
        missing.push(MissingItem {
            field: "Calendly",
            issue,
            guide: "https://calendly.com/signup",
        });
    }

    (flags, missing)
}
