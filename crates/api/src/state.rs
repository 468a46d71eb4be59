//! Shared application state and collaborator wiring.

use std::sync::Arc;

use checkout::{CheckoutOrchestrator, Collaborators};
use clients::{
    AdService, CurrencyService, EmailService, HttpAdService, HttpCurrencyService,
    HttpEmailService, HttpShippingService, InMemoryAdService, InMemoryCartService,
    InMemoryCatalogService, InMemoryCurrencyService, InMemoryEmailService,
    InMemoryPaymentService, InMemoryRecommendationService, InMemoryShippingService,
    ShippingService,
};
use frontend::{FrontendConfig, FrontendRpc, FrontendServices};

use crate::config::Config;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub checkout: CheckoutOrchestrator,
    pub frontend: FrontendRpc,
}

/// Creates the application state, using HTTP collaborators where the
/// config names a URL and in-process ones otherwise.
///
/// Cart, catalog, currency and shipping are shared between checkout and
/// the storefront so both see the same carts and prices.
pub fn create_default_state(config: &Config) -> Result<Arc<AppState>, reqwest::Error> {
    let http = reqwest::Client::builder().build()?;
    let urls = &config.services;

    let cart = Arc::new(InMemoryCartService::new());
    let catalog = InMemoryCatalogService::with_demo_products();
    let recommendation = Arc::new(InMemoryRecommendationService::new(catalog.product_ids()));
    let catalog = Arc::new(catalog);

    let currency: Arc<dyn CurrencyService> = match &urls.currency {
        Some(url) => Arc::new(HttpCurrencyService::with_client(http.clone(), url)),
        None => Arc::new(InMemoryCurrencyService::new()),
    };
    let shipping: Arc<dyn ShippingService> = match &urls.shipping {
        Some(url) => Arc::new(HttpShippingService::with_client(http.clone(), url)),
        None => Arc::new(InMemoryShippingService::new()),
    };
    let email: Arc<dyn EmailService> = match &urls.email {
        Some(url) => Arc::new(HttpEmailService::with_client(http.clone(), url)),
        None => Arc::new(InMemoryEmailService::new()),
    };
    let ad: Arc<dyn AdService> = match &urls.ad {
        Some(url) => Arc::new(HttpAdService::with_client(http.clone(), url)),
        None => Arc::new(InMemoryAdService::new()),
    };

    tracing::info!(
        currency = urls.currency.as_deref().unwrap_or("in-process"),
        shipping = urls.shipping.as_deref().unwrap_or("in-process"),
        email = urls.email.as_deref().unwrap_or("in-process"),
        ad = urls.ad.as_deref().unwrap_or("in-process"),
        "collaborators configured"
    );

    let checkout = CheckoutOrchestrator::new(
        Collaborators {
            cart: cart.clone(),
            catalog: catalog.clone(),
            currency: currency.clone(),
            shipping: shipping.clone(),
            payment: Arc::new(InMemoryPaymentService::new()),
            email,
        },
        config.checkout.clone(),
    );

    let frontend = FrontendRpc::new(
        FrontendServices {
            catalog,
            cart,
            currency,
            shipping,
            recommendation,
            ad,
        },
        FrontendConfig::default(),
    );

    Ok(Arc::new(AppState { checkout, frontend }))
}
