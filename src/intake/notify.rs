//! Notification fan-out — email-automation and Discord webhooks.
//!
//! Both deliveries are best-effort; the intake response never waits on or
//! reflects their outcome.

use url::Url;

use super::model::{MemberProfile, MissingItem};
use crate::error::IntakeError;

/// Trigger the email automation with the profile and its gaps.
pub async fn trigger_email_automation(
    client: &reqwest::Client,
    webhook_url: &Url,
    profile: &MemberProfile,
    missing_items: &[MissingItem],
) -> Result<(), IntakeError> {
    let body = serde_json::json!({
        "name": profile.name,
        "email": profile.email,
        "major": profile.major,
        "graduationYear": profile.graduation_year,
        "careerGoal": profile.career_goal,
        "linkedinUrl": profile.linkedin_url,
        "githubUrl": profile.github_url,
        "portfolioUrl": profile.portfolio_url,
        "calendlyUrl": profile.calendly_url,
        "missingItems": missing_items,
        "submittedAt": profile.submitted_at,
    });

    let response = client
        .post(webhook_url.clone())
        .json(&body)
        .send()
        .await
        .map_err(|e| IntakeError::Webhook {
            name: "email".to_string(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(IntakeError::Webhook {
            name: "email".to_string(),
            reason: format!("returned {status}"),
        });
    }
    Ok(())
}

/// Announce the new member in Discord.
pub async fn send_discord_notification(
    client: &reqwest::Client,
    webhook_url: &Url,
    profile: &MemberProfile,
) -> Result<(), IntakeError> {
    let links: Vec<String> = [
        ("LinkedIn", &profile.linkedin_url),
        ("GitHub", &profile.github_url),
        ("Portfolio", &profile.portfolio_url),
        ("Calendly", &profile.calendly_url),
    ]
    .into_iter()
    .filter(|(_, url)| !url.is_empty())
    .map(|(label, url)| format!("[{label}]({url})"))
    .collect();

    let embed = serde_json::json!({
        "title": format!("🎉 New Member: {}", profile.name),
        "description": "Welcome to Job Club!",
        "color": 0x6750A4,
        "fields": [
            { "name": "👤 Name", "value": profile.name, "inline": true },
            { "name": "📧 Email", "value": profile.email, "inline": true },
            { "name": "🎓 Major", "value": profile.major, "inline": true },
            { "name": "📅 Graduation", "value": profile.graduation_year, "inline": true },
            { "name": "🎯 Career Goal", "value": truncate_goal(&profile.career_goal), "inline": false },
            {
                "name": "🔗 Links",
                "value": if links.is_empty() { "No links provided".to_string() } else { links.join(" • ") },
                "inline": false,
            },
        ],
        "timestamp": profile.submitted_at,
        "footer": { "text": "Job Club" },
    });

    let body = serde_json::json!({
        "content": "📢 **New member joined Job Club!** Please welcome them to the community! 👋",
        "embeds": [embed],
    });

    let response = client
        .post(webhook_url.clone())
        .json(&body)
        .send()
        .await
        .map_err(|e| IntakeError::Webhook {
            name: "discord".to_string(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(IntakeError::Webhook {
            name: "discord".to_string(),
            reason: format!("returned {status}"),
        });
    }
    Ok(())
}

/// Discord field values are capped; keep the goal readable.
fn truncate_goal(goal: &str) -> String {
    const MAX: usize = 200;
    if goal.chars().count() <= MAX {
        goal.to_string()
    } else {
        let head: String = goal.chars().take(MAX).collect();
        format!("{head}...")
    }
}
