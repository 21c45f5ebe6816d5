//! Configuration types, populated from the environment.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::ConfigError;

/// Intake server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the intake API binds to.
    pub port: u16,
    pub intake: IntakeConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port: u16 = std::env::var("JOBCLUB_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8787);
        Ok(Self {
            port,
            intake: IntakeConfig::from_env()?,
        })
    }
}

/// Configuration for the intake endpoint's outbound collaborators.
///
/// Each collaborator is optional; unconfigured ones are skipped with a
/// warning, matching the serverless handler this replaces.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub cms: Option<CmsConfig>,
    pub email_webhook_url: Option<Url>,
    pub discord_webhook_url: Option<Url>,
}

impl IntakeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cms: CmsConfig::from_env()?,
            email_webhook_url: optional_url("EMAIL_WEBHOOK_URL")?,
            discord_webhook_url: optional_url("DISCORD_WEBHOOK_URL")?,
        })
    }
}

/// Headless-CMS hand-off target.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Document-creation endpoint.
    pub endpoint: Url,
    /// Write token, sent as a bearer header.
    pub write_token: SecretString,
}

impl CmsConfig {
    /// None when no CMS endpoint is configured. A configured endpoint
    /// without a write token is an error rather than a silent no-op.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(endpoint) = optional_url("CMS_ENDPOINT")? else {
            return Ok(None);
        };
        let token = std::env::var("CMS_WRITE_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("CMS_WRITE_TOKEN".to_string()))?;
        Ok(Some(Self {
            endpoint,
            write_token: SecretString::from(token),
        }))
    }
}

/// Wizard front-end configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Where completed sessions are dispatched.
    pub intake_url: Url,
    /// Local snapshot database path.
    pub store_path: PathBuf,
    /// Post-onboarding destination.
    pub redirect_location: String,
    /// Delay before the redirect event fires.
    pub redirect_delay: Duration,
}

impl WizardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let intake_url = match optional_url("JOBCLUB_INTAKE_URL")? {
            Some(url) => url,
            None => Url::parse("http://127.0.0.1:8787/api/onboarding/submit")
                .map_err(|e| ConfigError::InvalidValue {
                    key: "JOBCLUB_INTAKE_URL".to_string(),
                    message: e.to_string(),
                })?,
        };

        let store_path = std::env::var("JOBCLUB_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".jobclub/onboarding.db")
            });

        let redirect_location =
            std::env::var("JOBCLUB_REDIRECT_LOCATION").unwrap_or_else(|_| "/".to_string());

        let redirect_delay_secs: u64 = std::env::var("JOBCLUB_REDIRECT_DELAY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3);

        Ok(Self {
            intake_url,
            store_path,
            redirect_location,
            redirect_delay: Duration::from_secs(redirect_delay_secs),
        })
    }
}

/// Read an env var as a URL; unset or empty means None, unparseable is an
/// error.
fn optional_url(key: &str) -> Result<Option<Url>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
            Ok(Some(url))
        }
        _ => Ok(None),
    }
}
