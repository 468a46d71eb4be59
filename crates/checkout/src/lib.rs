//! Checkout orchestration.
//!
//! [`CheckoutOrchestrator::place_order`] places one order by calling the
//! collaborators in a fixed sequence:
//! 1. Generate an order id
//! 2. Read the cart
//! 3. Resolve and localize each line's price
//! 4. Quote and localize shipping
//! 5. Total the order
//! 6. Charge the card
//! 7. Ship the items
//! 8. Clear the cart (best effort)
//! 9. Send the confirmation email (best effort)
//!
//! Any required stage failing aborts the order. A shipment failure after a
//! successful charge is reported with the transaction id and, when
//! configured, triggers a refund.

pub mod config;
pub mod error;
pub mod orchestrator;

pub use config::{CheckoutConfig, CollaboratorTimeouts, DEFAULT_TIMEOUT};
pub use error::{CallError, CheckoutError, RefundOutcome};
pub use orchestrator::{CheckoutOrchestrator, Collaborators};
