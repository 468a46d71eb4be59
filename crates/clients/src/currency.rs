//! Currency conversion trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use domain::Money;

use crate::error::ServiceError;

const SERVICE: &str = "currency service";

/// Converts amounts between currencies.
///
/// Implementations must return money in exactly `to_code`.
#[async_trait]
pub trait CurrencyService: Send + Sync {
    async fn convert(&self, from: &Money, to_code: &str) -> Result<Money, ServiceError>;
}

/// Units of each currency per one euro.
const EUR_RATES: &[(&str, f64)] = &[
    ("EUR", 1.0),
    ("USD", 1.1305),
    ("JPY", 126.40),
    ("BGN", 1.9558),
    ("CZK", 25.592),
    ("DKK", 7.4609),
    ("GBP", 0.85970),
    ("HUF", 315.51),
    ("PLN", 4.2996),
    ("RON", 4.7463),
    ("SEK", 10.5375),
    ("CHF", 1.1360),
    ("ISK", 136.80),
    ("NOK", 9.8040),
    ("HRK", 7.4210),
    ("RUB", 74.4208),
    ("TRY", 6.1247),
    ("AUD", 1.6072),
    ("BRL", 4.2682),
    ("CAD", 1.5128),
    ("CNY", 7.5857),
    ("HKD", 8.8743),
    ("IDR", 15999.40),
    ("ILS", 4.0875),
    ("INR", 79.4320),
    ("KRW", 1275.05),
    ("MXN", 21.7999),
    ("MYR", 4.6289),
    ("NZD", 1.6679),
    ("PHP", 59.083),
    ("SGD", 1.5349),
    ("THB", 36.012),
    ("ZAR", 16.0583),
];

#[derive(Debug)]
struct InMemoryCurrencyState {
    rates: HashMap<String, f64>,
    unavailable: bool,
}

/// Rate-table currency converter.
///
/// Converts through EUR: the source amount is divided by its rate and
/// rounded to the nearest nano, then multiplied by the target rate and
/// floored. Same-currency conversions return the input unchanged.
#[derive(Debug, Clone)]
pub struct InMemoryCurrencyService {
    state: Arc<RwLock<InMemoryCurrencyState>>,
}

impl InMemoryCurrencyService {
    /// Creates a converter with the built-in EUR rate table.
    pub fn new() -> Self {
        Self::with_rates(EUR_RATES.iter().map(|&(code, rate)| (code.to_string(), rate)))
    }

    /// Creates a converter with a custom EUR-relative rate table.
    pub fn with_rates(rates: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryCurrencyState {
                rates: rates.into_iter().collect(),
                unavailable: false,
            })),
        }
    }

    /// Makes every conversion fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .unavailable = unavailable;
    }

    /// Returns the supported currency codes, sorted.
    pub fn supported_currencies(&self) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut codes: Vec<String> = state.rates.keys().cloned().collect();
        codes.sort();
        codes
    }
}

impl Default for InMemoryCurrencyService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CurrencyService for InMemoryCurrencyService {
    async fn convert(&self, from: &Money, to_code: &str) -> Result<Money, ServiceError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.unavailable {
            return Err(ServiceError::unavailable(SERVICE, "Conversion unavailable"));
        }

        let from_rate = *state.rates.get(from.currency_code()).ok_or_else(|| {
            ServiceError::rejected(
                SERVICE,
                format!("Unsupported currency code: {}", from.currency_code()),
            )
        })?;
        let to_rate = *state
            .rates
            .get(to_code)
            .ok_or_else(|| ServiceError::rejected(SERVICE, format!("Unsupported to_code: {to_code}")))?;

        if from.currency_code() == to_code {
            return Ok(from.clone());
        }

        let euro_nanos = (from.total_nanos() as f64 / from_rate).round();
        let converted = (euro_nanos * to_rate).floor();
        if !converted.is_finite() {
            return Err(ServiceError::rejected(SERVICE, "Conversion overflow"));
        }
        Ok(Money::from_total_nanos(to_code, converted as i128)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_currency_is_identity() {
        let service = InMemoryCurrencyService::new();
        let price = Money::new("USD", 8, 990_000_000).unwrap();
        assert_eq!(service.convert(&price, "USD").await.unwrap(), price);
    }

    #[tokio::test]
    async fn test_convert_through_eur() {
        let service = InMemoryCurrencyService::with_rates([
            ("EUR".to_string(), 1.0),
            ("USD".to_string(), 2.0),
            ("GBP".to_string(), 0.5),
        ]);
        let ten_usd = Money::new("USD", 10, 0).unwrap();

        let eur = service.convert(&ten_usd, "EUR").await.unwrap();
        assert_eq!(eur, Money::new("EUR", 5, 0).unwrap());

        let gbp = service.convert(&ten_usd, "GBP").await.unwrap();
        assert_eq!(gbp, Money::new("GBP", 2, 500_000_000).unwrap());
    }

    #[tokio::test]
    async fn test_convert_result_has_requested_code() {
        let service = InMemoryCurrencyService::new();
        let price = Money::new("USD", 19, 990_000_000).unwrap();
        let jpy = service.convert(&price, "JPY").await.unwrap();
        assert_eq!(jpy.currency_code(), "JPY");
        // 19.99 USD is roughly 2235 JPY at the built-in rates
        assert!((2200..2300).contains(&jpy.units()));
    }

    #[tokio::test]
    async fn test_unsupported_codes() {
        let service = InMemoryCurrencyService::new();
        let price = Money::new("USD", 1, 0).unwrap();
        assert!(matches!(
            service.convert(&price, "XXX").await,
            Err(ServiceError::Rejected { .. })
        ));

        let unknown = Money::new("XXX", 1, 0).unwrap();
        assert!(service.convert(&unknown, "USD").await.is_err());
    }

    #[tokio::test]
    async fn test_unavailable() {
        let service = InMemoryCurrencyService::new();
        service.set_unavailable(true);
        let price = Money::new("USD", 1, 0).unwrap();
        assert!(matches!(
            service.convert(&price, "EUR").await,
            Err(ServiceError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_supported_currencies() {
        let codes = InMemoryCurrencyService::new().supported_currencies();
        assert_eq!(codes.len(), 33);
        assert!(codes.contains(&"TRY".to_string()));
    }
}
