//! Collaborator services consumed by checkout and the frontend.
//!
//! Each collaborator is a trait with an in-memory implementation for tests
//! and local runs. The serverless collaborators (currency, shipping, email
//! and ads) also have HTTP implementations in [`http`]. Callers depend on the
//! traits only, never on the transport.

pub mod ad;
pub mod cart;
pub mod catalog;
pub mod currency;
pub mod email;
pub mod error;
pub mod http;
pub mod payment;
pub mod recommendation;
pub mod shipping;

pub use ad::{AdService, InMemoryAdService};
pub use cart::{CartService, InMemoryCartService};
pub use catalog::{CatalogService, InMemoryCatalogService};
pub use currency::{CurrencyService, InMemoryCurrencyService};
pub use email::{EmailService, InMemoryEmailService, SentConfirmation};
pub use error::ServiceError;
pub use http::{HttpAdService, HttpCurrencyService, HttpEmailService, HttpShippingService};
pub use payment::{InMemoryPaymentService, PaymentService};
pub use recommendation::{InMemoryRecommendationService, RecommendationService};
pub use self::shipping::{InMemoryShippingService, Shipment, ShippingService};
