//! Progress store — persisted wizard snapshots.
//!
//! Persistence is best-effort: losing a snapshot degrades the experience
//! but is never an error the wizard surfaces, so every failure here is
//! logged and swallowed.

use std::sync::Arc;

use tracing::warn;

use super::state::WizardState;
use crate::store::KvStore;

/// Fixed namespace key the snapshot lives under.
pub const SNAPSHOT_KEY: &str = "jobclub-onboarding";

/// Serializes `WizardState` to the durable key-value medium.
#[derive(Clone)]
pub struct ProgressStore {
    store: Arc<dyn KvStore>,
}

impl ProgressStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Write the full state, overwriting any prior snapshot. Never fails
    /// the caller.
    pub async fn save(&self, state: &WizardState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize wizard snapshot: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(SNAPSHOT_KEY, &json).await {
            warn!("Failed to persist wizard snapshot: {e}");
        }
    }

    /// Read the snapshot back. Missing or corrupt data reads as absent.
    pub async fn load(&self) -> Option<WizardState> {
        let raw = match self.store.get(SNAPSHOT_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read wizard snapshot: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Discarding corrupt wizard snapshot: {e}");
                None
            }
        }
    }

    /// Delete the snapshot. Idempotent.
    pub async fn clear(&self) {
        if let Err(e) = self.store.delete(SNAPSHOT_KEY).await {
            warn!("Failed to clear wizard snapshot: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKvStore;
    use crate::wizard::state::WizardStep;

    fn progress() -> ProgressStore {
        ProgressStore::new(Arc::new(MemoryKvStore::new()))
    }

    #[tokio::test]
    async fn load_returns_none_when_empty() {
        assert!(progress().load().await.is_none());
    }

    #[tokio::test]
    async fn save_load_roundtrip() {
        let progress = progress();
        let mut state = WizardState::new();
        state.step = WizardStep::Links;
        state.fields.name = "Grace".to_string();
        state.fields.email = "grace@example.com".to_string();
        state.fields.linkedin_url = String::new(); // empty string preserved
        state.notifications.workshops = true;

        progress.save(&state).await;
        let loaded = progress.load().await.unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn corrupt_snapshot_reads_as_absent() {
        let store = Arc::new(MemoryKvStore::new());
        store.set(SNAPSHOT_KEY, "{not json").await.unwrap();
        let progress = ProgressStore::new(store);
        assert!(progress.load().await.is_none());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let progress = progress();
        progress.save(&WizardState::new()).await;
        progress.clear().await;
        assert!(progress.load().await.is_none());
        // Second clear is a no-op, not an error.
        progress.clear().await;
    }

    #[tokio::test]
    async fn save_overwrites_prior_snapshot() {
        let progress = progress();
        let mut state = WizardState::new();
        state.fields.name = "First".to_string();
        progress.save(&state).await;
        state.fields.name = "Second".to_string();
        progress.save(&state).await;
        assert_eq!(progress.load().await.unwrap().fields.name, "Second");
    }
}
