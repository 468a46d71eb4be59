//! Orchestrator configuration.

use std::time::Duration;

/// Default limit for a single collaborator call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Per-collaborator call limits. A call that exceeds its limit fails the
/// stage it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollaboratorTimeouts {
    pub cart: Duration,
    pub catalog: Duration,
    pub currency: Duration,
    pub shipping: Duration,
    pub payment: Duration,
    pub email: Duration,
}

impl CollaboratorTimeouts {
    /// Uses the same limit for every collaborator.
    pub fn uniform(limit: Duration) -> Self {
        Self {
            cart: limit,
            catalog: limit,
            currency: limit,
            shipping: limit,
            payment: limit,
            email: limit,
        }
    }
}

impl Default for CollaboratorTimeouts {
    fn default() -> Self {
        Self::uniform(DEFAULT_TIMEOUT)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub timeouts: CollaboratorTimeouts,
    /// Refund the charge when shipment fails after payment.
    pub refund_on_shipping_failure: bool,
}
