//! HTTP API server for checkout and the storefront helpers.
//!
//! Exposes order placement and the storefront's catalog, cart, currency,
//! shipping, recommendation and ad calls as REST endpoints, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::{AppState, create_default_state};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    use routes::storefront;

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::place))
        .route("/currencies", get(storefront::currencies))
        .route("/currency/convert", post(storefront::convert))
        .route("/products", get(storefront::list_products))
        .route("/products/{id}", get(storefront::get_product))
        .route(
            "/cart/{user_id}",
            get(storefront::get_cart)
                .post(storefront::add_to_cart)
                .delete(storefront::empty_cart),
        )
        .route("/shipping/quote", post(storefront::shipping_quote))
        .route(
            "/recommendations/{user_id}",
            get(storefront::recommendations),
        )
        .route("/ads", get(storefront::ads))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
