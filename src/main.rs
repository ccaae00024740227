//! Command line driver for the express checkout flow.
//!
//! Creates a checkout session with `SetExpressCheckout`, then reads it back with
//! `GetExpressCheckoutDetails` and prints the raw gateway response.
//! Pass `--blocking` to use the blocking client instead of the async one.

use nvp_gateway_connect::ExpressCheckoutGateway;
use tracing_subscriber::EnvFilter;

/// Driver configuration from environment variables
mod config;
/// Minimal reading of NVP responses
mod nvp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .init();

    match dotenvy::dotenv() {
        Ok(p) => tracing::info!(path = %p.display(), "Loaded environment variables from .env file"),
        Err(e) => tracing::warn!("Failed to load environment variables from .env: {e}"),
    };

    let blocking = std::env::args().skip(1).any(|arg| arg == "--blocking");
    let config = config::Config::from_env()?;
    let gateway = ExpressCheckoutGateway::new();

    let initiation = config.initiation_request();
    let response = if blocking {
        let endpoint = config.endpoint.clone();
        let encoding = config.response_encoding;
        tokio::task::spawn_blocking(move || {
            gateway.initiate_checkout(&initiation, encoding, &endpoint)
        })
        .await??
    } else {
        gateway
            .initiate_checkout_async(&initiation, config.response_encoding, &config.endpoint)
            .await?
    };

    let response = nvp::NvpResponse::parse(&response)?;
    response.ensure_success()?;
    let token = response.token()?;
    tracing::info!(
        approval_url = %config.approval_url(token),
        "Created checkout session, waiting for payer approval"
    );

    let details = config.details_request(token);
    let details = if blocking {
        let endpoint = config.endpoint.clone();
        tokio::task::spawn_blocking(move || gateway.get_checkout_details(&details, &endpoint))
            .await??
    } else {
        gateway
            .get_checkout_details_async(&details, &config.endpoint)
            .await?
    };

    println!("{details}");
    Ok(())
}
