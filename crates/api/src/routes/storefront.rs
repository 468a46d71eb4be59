//! Storefront endpoints backed by the frontend helpers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::{Ad, CartItem, Money, Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct ConvertRequest {
    pub from: Money,
    pub to_code: String,
}

#[derive(Deserialize)]
pub struct ShippingQuoteRequest {
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub currency: String,
}

#[derive(Deserialize)]
pub struct RecommendationsQuery {
    /// Comma-separated product ids the user is looking at.
    pub product_ids: Option<String>,
}

#[derive(Deserialize)]
pub struct AdsQuery {
    /// Comma-separated context keys.
    pub context_keys: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct CurrenciesResponse {
    pub currency_codes: Vec<String>,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub user_id: String,
    pub items: Vec<CartItem>,
}

#[derive(Serialize)]
pub struct AdsResponse {
    pub ads: Vec<Ad>,
}

// -- Handlers --

/// GET /currencies: currencies offered to shoppers.
pub async fn currencies(State(state): State<Arc<AppState>>) -> Json<CurrenciesResponse> {
    Json(CurrenciesResponse {
        currency_codes: state.frontend.get_currencies(),
    })
}

/// GET /products: the whole catalog.
#[tracing::instrument(skip(state))]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.frontend.get_products().await?))
}

/// GET /products/{id}: a single product.
#[tracing::instrument(skip(state))]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.frontend.get_product(&ProductId::new(id)).await?;
    Ok(Json(product))
}

/// GET /cart/{user_id}: the user's cart lines.
#[tracing::instrument(skip(state))]
pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let items = state.frontend.get_cart(&user_id).await?;
    Ok(Json(CartResponse { user_id, items }))
}

/// POST /cart/{user_id}: adds a product to the user's cart.
#[tracing::instrument(skip(state, req))]
pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<AddToCartRequest>,
) -> Result<StatusCode, ApiError> {
    if req.quantity == 0 {
        return Err(ApiError::BadRequest("quantity must be positive".to_string()));
    }

    let product_id = ProductId::new(req.product_id);
    // reject unknown products before they reach the cart
    state.frontend.get_product(&product_id).await?;
    state
        .frontend
        .insert_cart(&user_id, product_id, req.quantity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /cart/{user_id}: empties the user's cart.
#[tracing::instrument(skip(state))]
pub async fn empty_cart(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.frontend.empty_cart(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /currency/convert: converts an amount into another currency.
#[tracing::instrument(skip(state, req), fields(to_code = %req.to_code))]
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConvertRequest>,
) -> Result<Json<Money>, ApiError> {
    let converted = state
        .frontend
        .convert_currency(&req.from, &req.to_code)
        .await?;
    Ok(Json(converted))
}

/// POST /shipping/quote: localized shipping cost for a set of items.
#[tracing::instrument(skip(state, req), fields(currency = %req.currency))]
pub async fn shipping_quote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ShippingQuoteRequest>,
) -> Result<Json<Money>, ApiError> {
    let quote = state
        .frontend
        .get_shipping_quote(&req.items, &req.currency)
        .await?;
    Ok(Json(quote))
}

/// GET /recommendations/{user_id}?product_ids=a,b: products to suggest.
#[tracing::instrument(skip(state, query))]
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let product_ids: Vec<ProductId> = split_list(query.product_ids.as_deref())
        .into_iter()
        .map(ProductId::new)
        .collect();
    let products = state
        .frontend
        .get_recommendations(&user_id, &product_ids)
        .await?;
    Ok(Json(products))
}

/// GET /ads?context_keys=a,b: ads for the page context.
#[tracing::instrument(skip(state, query))]
pub async fn ads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AdsQuery>,
) -> Result<Json<AdsResponse>, ApiError> {
    let keys = split_list(query.context_keys.as_deref());
    let ads = state.frontend.get_ads(&keys).await?;
    Ok(Json(AdsResponse { ads }))
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert!(split_list(None).is_empty());
        assert!(split_list(Some("")).is_empty());
        assert_eq!(split_list(Some("kitchen, decor,,")), vec!["kitchen", "decor"]);
    }
}
