use std::sync::Arc;

use jobclub_onboard::config::{ServerConfig, WizardConfig};
use jobclub_onboard::intake::intake_routes;
use jobclub_onboard::store::LibSqlKvStore;
use jobclub_onboard::wizard::schema;
use jobclub_onboard::{cli, error::Error};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    schema::verify().map_err(Error::Config)?;

    let mode = std::env::args().nth(1).unwrap_or_else(|| "serve".to_string());
    match mode.as_str() {
        "serve" => serve().await,
        "wizard" => wizard().await,
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: jobclub-onboard [serve|wizard]");
            std::process::exit(2);
        }
    }
}

/// Run the intake API.
async fn serve() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().map_err(Error::Config)?;

    eprintln!("🎓 Job Club intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   Submit API: http://0.0.0.0:{}/api/onboarding/submit",
        config.port
    );
    eprintln!(
        "   CMS: {}",
        match &config.intake.cms {
            Some(cms) => cms.endpoint.as_str().to_string(),
            None => "not configured (local member ids)".to_string(),
        }
    );
    eprintln!(
        "   Webhooks: email={}, discord={}\n",
        config.intake.email_webhook_url.is_some(),
        config.intake.discord_webhook_url.is_some(),
    );

    let app = intake_routes(config.intake);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Intake server started");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Run the interactive onboarding wizard.
async fn wizard() -> anyhow::Result<()> {
    let config = WizardConfig::from_env().map_err(Error::Config)?;

    eprintln!("🎓 Job Club onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Intake: {}", config.intake_url);
    eprintln!("   Progress store: {}\n", config.store_path.display());

    let store = LibSqlKvStore::new_local(&config.store_path)
        .await
        .map_err(Error::Store)?;
    cli::run_wizard(config, Arc::new(store)).await?;
    Ok(())
}
