//! Error types for jobclub-onboard.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Persistence-medium errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Wizard state-machine errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Submission is only possible from the final step (currently at step {current})")]
    NotAtFinalStep { current: u8 },

    #[error("No saved session is pending a restore decision")]
    NoPendingRestore,
}

/// Errors dispatching the completed payload to the intake endpoint.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Intake endpoint returned status {0}")]
    Status(u16),
}

/// Intake endpoint errors.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("{0} is required")]
    MissingField(String),

    #[error("CMS hand-off failed: {0}")]
    Cms(String),

    #[error("Webhook {name} failed: {reason}")]
    Webhook { name: String, reason: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
