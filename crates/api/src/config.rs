//! Application configuration loaded from environment variables.

use std::time::Duration;

use checkout::{CheckoutConfig, CollaboratorTimeouts, DEFAULT_TIMEOUT};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Endpoints of the HTTP collaborators. A collaborator without a URL runs
/// in-process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceUrls {
    pub currency: Option<String>,
    pub shipping: Option<String>,
    pub email: Option<String>,
    pub ad: Option<String>,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`, `PORT`: bind address (default `0.0.0.0:3000`)
/// - `RUST_LOG`: tracing filter directive (default `"info"`)
/// - `LOG_FORMAT`: `json` for JSON lines, anything else for human-readable
/// - `COLLABORATOR_TIMEOUT_MS`: limit for every collaborator call (default 3000)
/// - `CART_TIMEOUT_MS`, `CATALOG_TIMEOUT_MS`, `CURRENCY_TIMEOUT_MS`,
///   `SHIPPING_TIMEOUT_MS`, `PAYMENT_TIMEOUT_MS`, `EMAIL_TIMEOUT_MS`:
///   per-collaborator overrides
/// - `REFUND_ON_SHIPPING_FAILURE`: refund the charge when shipment fails
/// - `CURRENCY_SERVICE_URL`, `SHIPPING_SERVICE_URL`, `EMAIL_SERVICE_URL`,
///   `AD_SERVICE_URL`: use the HTTP collaborator at that URL
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub checkout: CheckoutConfig,
    pub services: ServiceUrls,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
        };
        let url = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base = millis("COLLABORATOR_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT);
        let timeouts = CollaboratorTimeouts {
            cart: millis("CART_TIMEOUT_MS").unwrap_or(base),
            catalog: millis("CATALOG_TIMEOUT_MS").unwrap_or(base),
            currency: millis("CURRENCY_TIMEOUT_MS").unwrap_or(base),
            shipping: millis("SHIPPING_TIMEOUT_MS").unwrap_or(base),
            payment: millis("PAYMENT_TIMEOUT_MS").unwrap_or(base),
            email: millis("EMAIL_TIMEOUT_MS").unwrap_or(base),
        };

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            checkout: CheckoutConfig {
                timeouts,
                refund_on_shipping_failure: lookup("REFUND_ON_SHIPPING_FAILURE")
                    .map(|v| parse_bool(&v))
                    .unwrap_or(false),
            },
            services: ServiceUrls {
                currency: url("CURRENCY_SERVICE_URL"),
                shipping: url("SHIPPING_SERVICE_URL"),
                email: url("EMAIL_SERVICE_URL"),
                ad: url("AD_SERVICE_URL"),
            },
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            checkout: CheckoutConfig::default(),
            services: ServiceUrls::default(),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
