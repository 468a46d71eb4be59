//! Frontend helper layer.
//!
//! [`FrontendRpc`] wraps the storefront's collaborators with one-shot
//! calls: currencies, products, carts, conversions, shipping quotes,
//! recommendations and ads.

pub mod error;
pub mod rpc;

pub use error::FrontendError;
pub use rpc::{
    ALLOWED_CURRENCIES, FrontendConfig, FrontendRpc, FrontendServices, KNOWN_CURRENCIES,
    MAX_DISPLAYED_RECOMMENDATIONS,
};
