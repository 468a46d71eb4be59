//! One-shot collaborator calls used by the storefront pages.

use std::sync::Arc;

use clients::{
    AdService, CartService, CatalogService, CurrencyService, RecommendationService,
    ShippingService,
};
use domain::{Ad, Address, CartItem, Money, Product, ProductId};

use crate::error::FrontendError;

/// Currency codes known to the conversion service, in rate-table order.
pub const KNOWN_CURRENCIES: &[&str] = &[
    "EUR", "USD", "JPY", "BGN", "CZK", "DKK", "GBP", "HUF", "PLN", "RON", "SEK", "CHF", "ISK",
    "NOK", "HRK", "RUB", "TRY", "AUD", "BRL", "CAD", "CNY", "HKD", "IDR", "ILS", "INR", "KRW",
    "MXN", "MYR", "NZD", "PHP", "SGD", "THB", "ZAR",
];

/// Currencies offered in the storefront's currency picker.
pub const ALLOWED_CURRENCIES: &[&str] = &["USD", "EUR", "CAD", "JPY", "GBP", "TRY"];

/// Most recommendations shown on a page.
pub const MAX_DISPLAYED_RECOMMENDATIONS: usize = 4;

#[derive(Clone)]
pub struct FrontendServices {
    pub catalog: Arc<dyn CatalogService>,
    pub cart: Arc<dyn CartService>,
    pub currency: Arc<dyn CurrencyService>,
    pub shipping: Arc<dyn ShippingService>,
    pub recommendation: Arc<dyn RecommendationService>,
    pub ad: Arc<dyn AdService>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Skip the conversion call when the amount is already in the target
    /// currency.
    pub avoid_noop_conversion: bool,
}

/// Storefront helpers over the collaborators.
#[derive(Clone)]
pub struct FrontendRpc {
    services: FrontendServices,
    config: FrontendConfig,
}

impl FrontendRpc {
    pub fn new(services: FrontendServices, config: FrontendConfig) -> Self {
        Self { services, config }
    }

    /// Returns the allowed currencies, in known-currency order.
    pub fn get_currencies(&self) -> Vec<String> {
        KNOWN_CURRENCIES
            .iter()
            .filter(|code| ALLOWED_CURRENCIES.contains(*code))
            .map(|code| code.to_string())
            .collect()
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, FrontendError> {
        self.services
            .catalog
            .list_products()
            .await
            .map_err(FrontendError::Products)
    }

    pub async fn get_product(&self, id: &ProductId) -> Result<Product, FrontendError> {
        self.services
            .catalog
            .get_product(id)
            .await
            .map_err(|source| FrontendError::Product {
                id: id.clone(),
                source,
            })
    }

    pub async fn get_cart(&self, user_id: &str) -> Result<Vec<CartItem>, FrontendError> {
        self.services
            .cart
            .get_cart(user_id)
            .await
            .map_err(FrontendError::Cart)
    }

    pub async fn empty_cart(&self, user_id: &str) -> Result<(), FrontendError> {
        self.services
            .cart
            .empty_cart(user_id)
            .await
            .map_err(FrontendError::Cart)
    }

    pub async fn insert_cart(
        &self,
        user_id: &str,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), FrontendError> {
        self.services
            .cart
            .add_item(user_id, CartItem::new(product_id, quantity))
            .await
            .map_err(FrontendError::Cart)
    }

    /// Converts `money` into `currency`.
    pub async fn convert_currency(
        &self,
        money: &Money,
        currency: &str,
    ) -> Result<Money, FrontendError> {
        if self.config.avoid_noop_conversion && money.currency_code() == currency {
            return Ok(money.clone());
        }
        self.services
            .currency
            .convert(money, currency)
            .await
            .map_err(FrontendError::Currency)
    }

    /// Quotes shipping for `items` and localizes it into `currency`.
    #[tracing::instrument(skip(self, items), fields(items = items.len()))]
    pub async fn get_shipping_quote(
        &self,
        items: &[CartItem],
        currency: &str,
    ) -> Result<Money, FrontendError> {
        let quote = self
            .services
            .shipping
            .get_quote(&Address::default(), items)
            .await
            .map_err(FrontendError::ShippingQuote)?;

        self.convert_currency(&quote, currency)
            .await
            .map_err(|e| match e {
                FrontendError::Currency(source) => FrontendError::ShippingCurrency(source),
                other => other,
            })
    }

    /// Returns up to four recommended products for a user.
    ///
    /// Every recommended id is resolved through the catalog; a single failed
    /// lookup fails the call.
    #[tracing::instrument(skip(self, product_ids))]
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        product_ids: &[ProductId],
    ) -> Result<Vec<Product>, FrontendError> {
        let ids = self
            .services
            .recommendation
            .list_recommendations(user_id, product_ids)
            .await
            .map_err(FrontendError::Recommendations)?;

        let mut products = Vec::with_capacity(ids.len());
        for id in ids {
            let product = self
                .services
                .catalog
                .get_product(&id)
                .await
                .map_err(|source| FrontendError::RecommendedProduct {
                    id: id.clone(),
                    source,
                })?;
            products.push(product);
        }
        products.truncate(MAX_DISPLAYED_RECOMMENDATIONS);
        Ok(products)
    }

    pub async fn get_ads(&self, context_keys: &[String]) -> Result<Vec<Ad>, FrontendError> {
        self.services
            .ad
            .get_ads(context_keys)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "failed to retrieve ads");
                FrontendError::Ads(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use clients::{
        InMemoryAdService, InMemoryCartService, InMemoryCatalogService, InMemoryCurrencyService,
        InMemoryRecommendationService, InMemoryShippingService, ServiceError,
    };

    use super::*;

    /// Counts conversions before delegating to the in-memory converter.
    #[derive(Default)]
    struct CountingCurrency {
        calls: AtomicUsize,
        inner: InMemoryCurrencyService,
    }

    #[async_trait]
    impl CurrencyService for CountingCurrency {
        async fn convert(&self, from: &Money, to_code: &str) -> Result<Money, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.convert(from, to_code).await
        }
    }

    struct Fixture {
        rpc: FrontendRpc,
        catalog: InMemoryCatalogService,
        cart: InMemoryCartService,
        currency: Arc<CountingCurrency>,
        shipping: InMemoryShippingService,
        recommendation: InMemoryRecommendationService,
    }

    fn setup(config: FrontendConfig) -> Fixture {
        let catalog = InMemoryCatalogService::with_demo_products();
        let cart = InMemoryCartService::new();
        let currency = Arc::new(CountingCurrency::default());
        let shipping = InMemoryShippingService::new();
        let recommendation = InMemoryRecommendationService::new(catalog.product_ids());

        let rpc = FrontendRpc::new(
            FrontendServices {
                catalog: Arc::new(catalog.clone()),
                cart: Arc::new(cart.clone()),
                currency: currency.clone(),
                shipping: Arc::new(shipping.clone()),
                recommendation: Arc::new(recommendation.clone()),
                ad: Arc::new(InMemoryAdService::new()),
            },
            config,
        );

        Fixture {
            rpc,
            catalog,
            cart,
            currency,
            shipping,
            recommendation,
        }
    }

    #[test]
    fn test_currencies_filtered_in_known_order() {
        let f = setup(FrontendConfig::default());
        assert_eq!(
            f.rpc.get_currencies(),
            vec!["EUR", "USD", "JPY", "GBP", "TRY", "CAD"]
        );
    }

    #[tokio::test]
    async fn test_products() {
        let f = setup(FrontendConfig::default());
        assert_eq!(f.rpc.get_products().await.unwrap().len(), 9);

        let mug = f.rpc.get_product(&ProductId::new("6E92ZMYYFZ")).await.unwrap();
        assert_eq!(mug.name, "Mug");

        let missing = f.rpc.get_product(&ProductId::new("NOPE")).await;
        assert!(matches!(missing, Err(FrontendError::Product { .. })));

        f.catalog.set_unavailable(true);
        assert!(matches!(
            f.rpc.get_products().await,
            Err(FrontendError::Products(_))
        ));
    }

    #[tokio::test]
    async fn test_cart_operations() {
        let f = setup(FrontendConfig::default());
        f.rpc
            .insert_cart("u1", ProductId::new("6E92ZMYYFZ"), 2)
            .await
            .unwrap();
        f.rpc
            .insert_cart("u1", ProductId::new("6E92ZMYYFZ"), 1)
            .await
            .unwrap();

        let cart = f.rpc.get_cart("u1").await.unwrap();
        assert_eq!(cart, vec![CartItem::new("6E92ZMYYFZ", 3)]);

        f.rpc.empty_cart("u1").await.unwrap();
        assert_eq!(f.cart.line_count("u1"), 0);

        f.cart.set_fail_on_get(true);
        assert!(matches!(
            f.rpc.get_cart("u1").await,
            Err(FrontendError::Cart(_))
        ));
    }

    #[tokio::test]
    async fn test_noop_conversion_calls_service_by_default() {
        let f = setup(FrontendConfig::default());
        let price = Money::new("USD", 5, 0).unwrap();

        let converted = f.rpc.convert_currency(&price, "USD").await.unwrap();

        assert_eq!(converted, price);
        assert_eq!(f.currency.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_noop_conversion_skipped_when_enabled() {
        let f = setup(FrontendConfig {
            avoid_noop_conversion: true,
        });
        let price = Money::new("USD", 5, 0).unwrap();

        assert_eq!(f.rpc.convert_currency(&price, "USD").await.unwrap(), price);
        assert_eq!(f.currency.calls.load(Ordering::SeqCst), 0);

        let eur = f.rpc.convert_currency(&price, "EUR").await.unwrap();
        assert_eq!(eur.currency_code(), "EUR");
        assert_eq!(f.currency.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shipping_quote_localized() {
        let f = setup(FrontendConfig::default());
        let quote = f
            .rpc
            .get_shipping_quote(&[CartItem::new("6E92ZMYYFZ", 1)], "USD")
            .await
            .unwrap();
        assert_eq!(quote, Money::new("USD", 8, 990_000_000).unwrap());

        let jpy = f.rpc.get_shipping_quote(&[], "JPY").await.unwrap();
        assert_eq!(jpy.currency_code(), "JPY");
    }

    #[tokio::test]
    async fn test_shipping_quote_errors_are_tagged() {
        let f = setup(FrontendConfig::default());
        assert!(matches!(
            f.rpc.get_shipping_quote(&[], "XXX").await,
            Err(FrontendError::ShippingCurrency(_))
        ));

        f.shipping.set_fail_on_quote(true);
        assert!(matches!(
            f.rpc.get_shipping_quote(&[], "USD").await,
            Err(FrontendError::ShippingQuote(_))
        ));
    }

    #[tokio::test]
    async fn test_recommendations_capped_and_resolved() {
        let f = setup(FrontendConfig::default());
        let viewing = [ProductId::new("6E92ZMYYFZ")];

        let products = f.rpc.get_recommendations("u1", &viewing).await.unwrap();

        assert_eq!(products.len(), MAX_DISPLAYED_RECOMMENDATIONS);
        assert!(products.iter().all(|p| p.id != viewing[0]));
    }

    #[tokio::test]
    async fn test_recommendation_lookup_failure_fails_call() {
        let f = setup(FrontendConfig::default());
        // recommended ids no longer resolve
        for id in f.catalog.product_ids() {
            f.catalog.remove(&id);
        }

        let result = f.rpc.get_recommendations("u1", &[]).await;
        assert!(matches!(
            result,
            Err(FrontendError::RecommendedProduct { .. })
        ));

        f.recommendation.set_unavailable(true);
        assert!(matches!(
            f.rpc.get_recommendations("u1", &[]).await,
            Err(FrontendError::Recommendations(_))
        ));
    }

    #[tokio::test]
    async fn test_ads() {
        let f = setup(FrontendConfig::default());
        let ads = f.rpc.get_ads(&["kitchen".to_string()]).await.unwrap();
        assert_eq!(ads.len(), 2);
        assert!(
            f.rpc
                .get_ads(&["nothing-matches".to_string()])
                .await
                .unwrap()
                .len()
                <= 2
        );
    }
}
