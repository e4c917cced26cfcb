//! Server binary: one-time initialization, then serve callables over HTTP.

use std::sync::Arc;

use anyhow::Context as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tebooka_backend::callable;
use tebooka_backend::clients::{FcmClient, Gateways, StripeClient};
use tebooka_backend::config::AppConfig;
use tebooka_backend::handlers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let addr = config.bind_addr();

    // External clients are built exactly once; handlers only ever see
    // these shared handles.
    let stripe = StripeClient::new(config.stripe).context("initializing Stripe client")?;
    let fcm = FcmClient::new(config.fcm).context("initializing FCM client")?;
    let gateways = Gateways::new(Box::new(stripe), Box::new(fcm));

    let service = Arc::new(handlers::service(gateways));
    info!(%addr, callables = ?service.callables(), "tebooka backend listening");

    callable::serve(service, &addr).await?;
    Ok(())
}
