//! Shipping utility entry point.

use std::sync::Arc;

use shipping::TrackingIdGenerator;
use shipping::config::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let app = shipping::create_app(Arc::new(TrackingIdGenerator::new()));

    let addr = config.addr();
    tracing::info!(%addr, "starting shipping utility");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app).await.expect("server error");
}
