//! HTTP surface of the shipping utility.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use domain::{Address, Money};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::quote::Quote;
use crate::tracking::TrackingIdGenerator;

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub cost_usd: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShipOrderRequest {
    pub address: Address,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShipOrderResponse {
    pub tracking_id: String,
}

/// Builds the shipping router around a shared tracking-id generator.
pub fn create_app(tracking: Arc<TrackingIdGenerator>) -> Router {
    Router::new()
        .route("/getQuote", get(get_quote))
        .route("/shipOrder", post(ship_order))
        .fallback(not_found)
        .with_state(tracking)
        .layer(TraceLayer::new_for_http())
}

/// GET /getQuote: returns the flat-rate quote.
async fn get_quote() -> Response {
    match Quote::flat_rate().to_money() {
        Ok(cost_usd) => Json(QuoteResponse { cost_usd }).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to build quote: {e}"),
        )
            .into_response(),
    }
}

/// POST /shipOrder: issues a tracking id for the posted address.
#[tracing::instrument(skip_all)]
async fn ship_order(
    State(tracking): State<Arc<TrackingIdGenerator>>,
    payload: Result<Json<ShipOrderRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Failed to decode request: {e}"),
            )
                .into_response();
        }
    };

    let tracking_id = tracking.create_tracking_id(&req.address.base_address());
    tracing::info!(%tracking_id, "shipment tracking id issued");
    Json(ShipOrderResponse { tracking_id }).into_response()
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Endpoint not found")
}
