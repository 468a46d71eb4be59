//! Order placement endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{OrderResult, PlaceOrderRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /orders: places an order for the user's current cart.
#[tracing::instrument(skip(state, req), fields(user_id = %req.user_id))]
pub async fn place(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderResult>), ApiError> {
    if req.user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("user_id is required".to_string()));
    }

    let order = state.checkout.place_order(&req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
