//! End-to-end tests for the wizard: drive the controller through all five
//! steps and submit against a real HTTP endpoint on a random port.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::time::timeout;
use url::Url;

use jobclub_onboard::store::MemoryKvStore;
use jobclub_onboard::wizard::{
    AdvanceOutcome, FieldId, IntakeClient, NotificationChannel, ProgressStore,
    SubmissionCoordinator, SubmitEvent, WizardController, WizardStep, CAREER_GOAL_OTHER,
};

/// Maximum time any test is allowed to wait before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

type Received = Arc<Mutex<Vec<serde_json::Value>>>;

/// Start a recorder endpoint that accepts any JSON POST, remembers it, and
/// answers 200. Returns the endpoint URL and the recorded bodies.
async fn start_recorder() -> (Url, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    async fn record(State(received): State<Received>, Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
        received.lock().await.push(body);
        Json(serde_json::json!({ "success": true }))
    }

    let app = Router::new()
        .route("/api/onboarding/submit", post(record))
        .with_state(Arc::clone(&received));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let url = Url::parse(&format!("http://127.0.0.1:{port}/api/onboarding/submit")).unwrap();
    (url, received)
}

/// A port with nothing listening on it.
async fn unreachable_endpoint() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    Url::parse(&format!("http://127.0.0.1:{port}/api/onboarding/submit")).unwrap()
}

fn fixture() -> (WizardController, ProgressStore) {
    let progress = ProgressStore::new(Arc::new(MemoryKvStore::new()));
    (WizardController::new(progress.clone()), progress)
}

/// Walk a fresh controller to the community step with valid data.
async fn walk_to_community(ctrl: &WizardController) {
    assert!(matches!(
        ctrl.advance().await,
        AdvanceOutcome::Advanced(WizardStep::Profile)
    ));

    ctrl.set_field(FieldId::Name, "Ada Lovelace").await;
    ctrl.set_field(FieldId::Email, "ada@example.com").await;
    ctrl.set_field(FieldId::Major, "Computer Science").await;
    ctrl.set_field(FieldId::GraduationYear, "2027").await;
    assert!(matches!(
        ctrl.advance().await,
        AdvanceOutcome::Advanced(WizardStep::CareerGoal)
    ));

    ctrl.set_field(FieldId::CareerGoal, CAREER_GOAL_OTHER).await;
    ctrl.set_field(FieldId::OtherCareerGoal, "Research engineer").await;
    assert!(matches!(
        ctrl.advance().await,
        AdvanceOutcome::Advanced(WizardStep::Links)
    ));

    ctrl.set_field(FieldId::LinkedinUrl, "https://www.linkedin.com/in/ada")
        .await;
    ctrl.set_field(FieldId::GithubUrl, "https://github.com/ada").await;
    assert!(matches!(
        ctrl.advance().await,
        AdvanceOutcome::Advanced(WizardStep::Community)
    ));

    ctrl.set_notification(NotificationChannel::Events, true).await;
}

#[tokio::test]
async fn full_run_dispatches_payload_and_clears_progress() {
    let (endpoint, received) = start_recorder().await;
    let (ctrl, progress) = fixture();
    walk_to_community(&ctrl).await;

    let (coordinator, mut events) = SubmissionCoordinator::new(
        IntakeClient::new(endpoint),
        "/",
        Duration::from_millis(50),
    );
    coordinator.complete(&ctrl).await.unwrap();

    // Success is announced first, the redirect follows after the delay.
    let first = timeout(TEST_TIMEOUT, events.recv()).await.unwrap().unwrap();
    assert_eq!(first, SubmitEvent::Accepted);
    let second = timeout(TEST_TIMEOUT, events.recv()).await.unwrap().unwrap();
    assert_eq!(
        second,
        SubmitEvent::Redirect {
            location: "/".to_string()
        }
    );

    let bodies = received.lock().await;
    assert_eq!(bodies.len(), 1);
    let payload = &bodies[0];
    assert_eq!(payload["name"], "Ada Lovelace");
    assert_eq!(payload["email"], "ada@example.com");
    assert_eq!(payload["graduationYear"], "2027");
    // The `other` sentinel resolves to the free-text goal on the wire.
    assert_eq!(payload["careerGoal"], "Research engineer");
    assert_eq!(payload["linkedinUrl"], "https://www.linkedin.com/in/ada");
    assert!(payload.get("calendlyUrl").is_none());
    assert_eq!(payload["notifications"]["events"], true);
    assert_eq!(payload["notifications"]["workshops"], false);

    // Successful submission removes the snapshot.
    assert!(progress.load().await.is_none());
}

#[tokio::test]
async fn dispatch_failure_still_clears_progress() {
    let endpoint = unreachable_endpoint().await;
    let (ctrl, progress) = fixture();
    walk_to_community(&ctrl).await;

    let (coordinator, mut events) = SubmissionCoordinator::new(
        IntakeClient::new(endpoint),
        "/done",
        Duration::from_millis(10),
    );
    // Fire-and-forget: the endpoint being down is not the caller's problem.
    coordinator.complete(&ctrl).await.unwrap();

    assert_eq!(
        timeout(TEST_TIMEOUT, events.recv()).await.unwrap().unwrap(),
        SubmitEvent::Accepted
    );
    assert_eq!(
        timeout(TEST_TIMEOUT, events.recv()).await.unwrap().unwrap(),
        SubmitEvent::Redirect {
            location: "/done".to_string()
        }
    );
    assert!(progress.load().await.is_none());
}

#[tokio::test]
async fn complete_rejected_before_final_step() {
    let endpoint = unreachable_endpoint().await;
    let (ctrl, progress) = fixture();
    ctrl.advance().await; // step 2, nowhere near done

    let (coordinator, _events) = SubmissionCoordinator::new(
        IntakeClient::new(endpoint),
        "/",
        Duration::from_millis(10),
    );
    assert!(coordinator.complete(&ctrl).await.is_err());
    // Nothing was cleared: the controller saved on advance.
    assert!(progress.load().await.is_some());
}

#[tokio::test]
async fn session_restore_across_controllers() {
    let progress = ProgressStore::new(Arc::new(MemoryKvStore::new()));

    // First session: get to step 3 and walk away.
    {
        let ctrl = WizardController::new(progress.clone());
        ctrl.advance().await;
        ctrl.set_field(FieldId::Name, "Ada Lovelace").await;
        ctrl.set_field(FieldId::Email, "ada@example.com").await;
        ctrl.set_field(FieldId::Major, "CS").await;
        ctrl.set_field(FieldId::GraduationYear, "2027").await;
        ctrl.advance().await;
        assert_eq!(ctrl.current_step().await, WizardStep::CareerGoal);
    }

    // Second session: confirmation required, accept, everything is back.
    let (ctrl, action) = WizardController::bootstrap(progress).await;
    assert!(matches!(
        action,
        jobclub_onboard::wizard::RestoreAction::ConfirmRequired(WizardStep::CareerGoal)
    ));
    let step = ctrl.resume_saved().await.unwrap();
    assert_eq!(step, WizardStep::CareerGoal);
    assert_eq!(ctrl.snapshot().await.fields.name, "Ada Lovelace");
}
