//! REST surface for the intake endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header::CONTENT_TYPE, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::cms::CmsClient;
use super::model::{IntakeSubmission, MemberProfile, MissingItem};
use super::notify;
use super::prereq::detect_missing_prerequisites;
use crate::config::IntakeConfig;

/// Shared state for intake routes.
#[derive(Clone)]
pub struct IntakeState {
    config: Arc<IntakeConfig>,
    cms: Option<Arc<CmsClient>>,
    http: reqwest::Client,
}

/// Build the intake router. CORS mirrors the serverless deployment this
/// replaces: any origin, POST + preflight, content-type only.
pub fn intake_routes(config: IntakeConfig) -> Router {
    let cms = config.cms.clone().map(|c| Arc::new(CmsClient::new(c)));
    let state = IntakeState {
        config: Arc::new(config),
        cms,
        http: reqwest::Client::new(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/api/onboarding/submit", post(submit))
        .layer(cors)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Success body for an accepted submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    success: bool,
    message: &'static str,
    member_id: String,
    /// Null rather than an empty list when nothing is missing.
    missing_items: Option<Vec<MissingItem>>,
    has_all_prerequisites: bool,
}

fn reject(status: StatusCode, error: String) -> axum::response::Response {
    (
        status,
        Json(serde_json::json!({ "success": false, "error": error })),
    )
        .into_response()
}

/// POST /api/onboarding/submit
async fn submit(
    State(state): State<IntakeState>,
    Json(submission): Json<IntakeSubmission>,
) -> impl IntoResponse {
    if let Some(field) = submission.first_missing_required() {
        return reject(StatusCode::BAD_REQUEST, format!("{field} is required"));
    }

    let (flags, missing_items) = detect_missing_prerequisites(&submission);
    let profile = MemberProfile::from_submission(&submission, flags);

    let member_id = match &state.cms {
        Some(cms) => match cms.create(&profile).await {
            Ok(id) => id,
            Err(e) => {
                error!("CMS hand-off failed: {e}");
                return reject(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to submit profile".to_string(),
                );
            }
        },
        None => {
            warn!("CMS_ENDPOINT not configured; assigning a local member id");
            Uuid::new_v4().to_string()
        }
    };

    spawn_notifications(&state, profile, missing_items.clone());

    info!(member_id = %member_id, "Onboarding submission accepted");
    let has_all_prerequisites = missing_items.is_empty();
    Json(SubmitResponse {
        success: true,
        message: "Profile submitted successfully",
        member_id,
        missing_items: (!missing_items.is_empty()).then_some(missing_items),
        has_all_prerequisites,
    })
    .into_response()
}

/// Fire-and-forget webhook fan-out; the response never waits on these.
fn spawn_notifications(state: &IntakeState, profile: MemberProfile, missing: Vec<MissingItem>) {
    match state.config.email_webhook_url.clone() {
        Some(url) => {
            let client = state.http.clone();
            let profile = profile.clone();
            tokio::spawn(async move {
                if let Err(e) =
                    notify::trigger_email_automation(&client, &url, &profile, &missing).await
                {
                    warn!("Email automation failed: {e}");
                }
            });
        }
        None => warn!("EMAIL_WEBHOOK_URL not configured"),
    }

    match state.config.discord_webhook_url.clone() {
        Some(url) => {
            let client = state.http.clone();
            tokio::spawn(async move {
                if let Err(e) = notify::send_discord_notification(&client, &url, &profile).await {
                    warn!("Discord notification failed: {e}");
                }
            });
        }
        None => warn!("DISCORD_WEBHOOK_URL not configured"),
    }
}
