//! Frontend error types.

use clients::ServiceError;
use domain::ProductId;
use thiserror::Error;

/// Errors returned by the frontend helpers, tagged with the failing call.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("could not retrieve products: {0}")]
    Products(#[source] ServiceError),

    #[error("could not retrieve product #{id}: {source}")]
    Product { id: ProductId, source: ServiceError },

    #[error("cart service call failed: {0}")]
    Cart(#[source] ServiceError),

    #[error("failed to convert currency: {0}")]
    Currency(#[source] ServiceError),

    #[error("failed to get shipping quote: {0}")]
    ShippingQuote(#[source] ServiceError),

    #[error("failed to convert currency for shipping cost: {0}")]
    ShippingCurrency(#[source] ServiceError),

    #[error("failed to get recommendations: {0}")]
    Recommendations(#[source] ServiceError),

    #[error("failed to get recommended product info (#{id}): {source}")]
    RecommendedProduct { id: ProductId, source: ServiceError },

    #[error("failed to get ads: {0}")]
    Ads(#[source] ServiceError),
}

impl FrontendError {
    /// Returns the collaborator error underneath.
    pub fn service_error(&self) -> &ServiceError {
        match self {
            FrontendError::Products(e)
            | FrontendError::Cart(e)
            | FrontendError::Currency(e)
            | FrontendError::ShippingQuote(e)
            | FrontendError::ShippingCurrency(e)
            | FrontendError::Recommendations(e)
            | FrontendError::Ads(e) => e,
            FrontendError::Product { source, .. }
            | FrontendError::RecommendedProduct { source, .. } => source,
        }
    }
}
