//! Domain layer for the checkout services.
//!
//! This crate provides the value types passed between the checkout
//! orchestrator and its collaborators:
//! - `Money`, a fixed-point currency amount with carry-normalizing arithmetic
//! - Cart and order line items
//! - The place-order request and the resulting order record

pub mod error;
pub mod money;
pub mod order;

pub use error::MoneyError;
pub use money::{Money, NANOS_PER_UNIT};
pub use order::{
    Ad, Address, CartItem, CreditCardInfo, OrderItem, OrderResult, PlaceOrderRequest, Product,
    ProductId,
};
