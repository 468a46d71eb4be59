//! Place-order request and result.

use common::OrderId;
use serde::{Deserialize, Serialize};

use super::value_objects::{Address, CreditCardInfo, OrderItem};
use crate::money::Money;

/// Caller-supplied order placement request.
///
/// Fields are not validated here; missing or malformed values surface as
/// collaborator errors during checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub user_id: String,
    pub user_currency: String,
    pub address: Address,
    pub email: String,
    pub credit_card: CreditCardInfo,
}

/// A placed order, returned once per successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: OrderId,
    pub shipping_tracking_id: String,
    pub shipping_cost: Money,
    pub shipping_address: Address,
    pub items: Vec<OrderItem>,
}
