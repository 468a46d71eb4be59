//! Checkout error types.

use std::time::Duration;

use clients::ServiceError;
use common::IdGenerationError;
use domain::{MoneyError, ProductId};
use thiserror::Error;

/// Failure of a single collaborator call.
#[derive(Debug, Error)]
pub enum CallError {
    /// The collaborator answered with an error.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The collaborator did not answer within the configured limit.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

/// What happened to the charge after a failed shipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundOutcome {
    /// Refunds are disabled; the customer remains charged.
    NotAttempted,
    /// The charge was refunded.
    Refunded,
    /// The refund was attempted and failed.
    Failed(String),
}

impl std::fmt::Display for RefundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefundOutcome::NotAttempted => write!(f, "charge not refunded"),
            RefundOutcome::Refunded => write!(f, "charge refunded"),
            RefundOutcome::Failed(reason) => write!(f, "refund failed: {reason}"),
        }
    }
}

/// Errors that abort order placement, tagged with the failing stage.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No order id could be generated. Nothing was called.
    #[error("{0}")]
    OrderIdGeneration(#[from] IdGenerationError),

    /// The user's cart could not be read.
    #[error("failed to get user cart during checkout: {0}")]
    CartUnavailable(#[source] CallError),

    /// A cart line's product lookup or price conversion failed.
    #[error("failed to prepare order: product #{product_id}: {source}")]
    PriceResolution {
        product_id: ProductId,
        source: CallError,
    },

    /// The shipping quote could not be obtained or localized.
    #[error("shipping quote failure: {0}")]
    ShippingQuote(#[source] CallError),

    /// The order total could not be computed.
    #[error("failed to calculate order total: {0}")]
    Total(#[from] MoneyError),

    /// The card charge failed. Nothing was shipped.
    #[error("failed to charge card: {0}")]
    Payment(#[source] CallError),

    /// Shipment failed after the card was charged.
    #[error("shipping error: {source} (transaction {transaction_id}, {refund})")]
    ShippingFulfillment {
        transaction_id: String,
        refund: RefundOutcome,
        source: CallError,
    },
}

impl CheckoutError {
    /// Returns the stage tag used in logs and metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            CheckoutError::OrderIdGeneration(_) => "order_id",
            CheckoutError::CartUnavailable(_) => "cart",
            CheckoutError::PriceResolution { .. } => "price_resolution",
            CheckoutError::ShippingQuote(_) => "shipping_quote",
            CheckoutError::Total(_) => "total",
            CheckoutError::Payment(_) => "payment",
            CheckoutError::ShippingFulfillment { .. } => "shipping_fulfillment",
        }
    }

    /// Returns true if the failing collaborator call timed out.
    pub fn is_timeout(&self) -> bool {
        let call = match self {
            CheckoutError::CartUnavailable(e)
            | CheckoutError::ShippingQuote(e)
            | CheckoutError::Payment(e) => e,
            CheckoutError::PriceResolution { source, .. }
            | CheckoutError::ShippingFulfillment { source, .. } => source,
            CheckoutError::OrderIdGeneration(_) | CheckoutError::Total(_) => return false,
        };
        matches!(call, CallError::TimedOut(_))
    }
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
