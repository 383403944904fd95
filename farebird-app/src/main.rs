use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use farebird_client::ApiClient;
use farebird_store::{Config, FileTokenStore, SessionStore};
use farebird_workflow::BookingController;

mod console;
mod render;

use console::{AuthBadge, ConsoleNotifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logs go to stderr so they never interleave with rendered output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "farebird_app=info,farebird_client=info,farebird_store=info,farebird_workflow=info"
                .into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(base_url = %config.api.base_url, "starting farebird console");

    let client = Arc::new(
        ApiClient::new(&config.api.base_url, config.api.request_timeout())
            .context("Failed to build the API client")?,
    );
    let tokens = Arc::new(FileTokenStore::new(&config.session.token_path));
    let notifier = Arc::new(ConsoleNotifier);
    let store = Arc::new(SessionStore::new(
        tokens,
        client.clone(),
        Arc::new(AuthBadge),
    ));
    let controller = BookingController::new(store, client.clone(), client, notifier.clone());

    console::run(controller, notifier).await?;
    Ok(())
}
