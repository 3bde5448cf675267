use std::net::SocketAddr;

use commerce_usps::config::ProviderConfig;
use commerce_usps::shipping_method::UspsShippingMethod;
use commerce_usps::usps::{UspsClient, UspsClientConfig};
use commerce_usps::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("commerce_usps=info")),
        )
        .init();

    // Config file wins over individual environment variables
    let config = match std::env::var("USPS_CONFIG") {
        Ok(path) => ProviderConfig::from_file(&path),
        Err(_) => ProviderConfig::from_env(),
    }
    .expect("Failed to load USPS configuration");

    let mut client_config = UspsClientConfig::new();
    if let Ok(url) = std::env::var("USPS_BASE_URL") {
        client_config = client_config.with_base_url(url);
    }
    let client = UspsClient::new(client_config).expect("Failed to create USPS client");

    let shipping_method = UspsShippingMethod::new(config, client);
    if !shipping_method.is_configured() {
        warn!("USPS user id or password not set. Rate requests will fail.");
    }
    info!(mode = %shipping_method.config().mode(), "USPS shipping method ready");

    let app = create_router(AppState::new(shipping_method));

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("Invalid BIND_ADDR");
    info!("USPS rate service listening on http://{addr}");
    info!("  GET  /health             - Health check");
    info!("  POST /rates              - Calculate rates for a shipment");
    info!("  POST /delivery-estimate  - Raw USPS delivery estimate");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
