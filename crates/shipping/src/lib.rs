//! Shipping quote and tracking-id utility.
//!
//! Provides the flat-rate quote, the tracking-id generator, and an HTTP
//! surface exposing both:
//! - `GET /getQuote` returns the fixed quote as a money object
//! - `POST /shipOrder` accepts an address and returns a tracking id
//!
//! Any other path yields a 404.

pub mod config;
pub mod quote;
pub mod routes;
pub mod tracking;

pub use quote::{FLAT_RATE_USD, Quote};
pub use routes::create_app;
pub use tracking::TrackingIdGenerator;
