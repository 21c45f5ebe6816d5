//! CMS hand-off — posts member profiles to the configured headless CMS.

use secrecy::ExposeSecret;

use super::model::MemberProfile;
use crate::config::CmsConfig;
use crate::error::IntakeError;

/// HTTP client for the CMS document-creation endpoint.
pub struct CmsClient {
    client: reqwest::Client,
    config: CmsConfig,
}

impl CmsClient {
    pub fn new(config: CmsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create the member document; returns the CMS-assigned document id.
    pub async fn create(&self, profile: &MemberProfile) -> Result<String, IntakeError> {
        let response = self
            .client
            .post(self.config.endpoint.clone())
            .bearer_auth(self.config.write_token.expose_secret())
            .json(profile)
            .send()
            .await
            .map_err(|e| IntakeError::Cms(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IntakeError::Cms(format!("CMS returned {status}")));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| IntakeError::Cms(format!("Unreadable CMS response: {e}")))?;

        // Accept either `id` or the Sanity-style `_id`.
        body.get("id")
            .or_else(|| body.get("_id"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| IntakeError::Cms("CMS response carried no document id".to_string()))
    }
}
