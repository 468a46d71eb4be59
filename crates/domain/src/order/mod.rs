//! Cart, order and catalog value types.

mod request;
mod value_objects;

pub use request::{OrderResult, PlaceOrderRequest};
pub use value_objects::{Ad, Address, CartItem, CreditCardInfo, OrderItem, Product, ProductId};
