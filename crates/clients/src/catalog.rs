//! Product catalog trait and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use domain::{Money, Product, ProductId};

use crate::error::ServiceError;

const SERVICE: &str = "catalog service";

/// Read access to product metadata and base prices.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Looks up a single product.
    async fn get_product(&self, id: &ProductId) -> Result<Product, ServiceError>;

    /// Lists every product in the catalog.
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: BTreeMap<ProductId, Product>,
    unavailable: bool,
}

/// In-memory catalog service for testing and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogService {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogService {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog preloaded with the demo storefront products.
    pub fn with_demo_products() -> Self {
        let catalog = Self::new();
        let demo: &[(&str, &str, i64, i32, &[&str])] = &[
            ("OLJCESPC7Z", "Sunglasses", 19, 990_000_000, &["accessories"]),
            ("66VCHSJNUP", "Tank Top", 18, 990_000_000, &["clothing", "tops"]),
            ("1YMWWN1N4O", "Watch", 109, 990_000_000, &["accessories"]),
            ("L9ECAV7KIM", "Loafers", 89, 990_000_000, &["footwear"]),
            ("2ZYFJ3GM2N", "Hairdryer", 24, 990_000_000, &["hair", "beauty"]),
            ("0PUK6V6EV0", "Candle Holder", 18, 990_000_000, &["decor", "home"]),
            ("LS4PSXUNUM", "Salt & Pepper Shakers", 18, 490_000_000, &["kitchen"]),
            ("9SIQT8TOJO", "Bamboo Glass Jar", 5, 490_000_000, &["kitchen"]),
            ("6E92ZMYYFZ", "Mug", 8, 990_000_000, &["kitchen"]),
        ];
        for &(id, name, units, nanos, categories) in demo {
            if let Ok(price_usd) = Money::new("USD", units, nanos) {
                catalog.insert(Product {
                    id: ProductId::new(id),
                    name: name.to_string(),
                    description: String::new(),
                    picture: format!("/static/img/products/{}.jpg", name.to_lowercase()),
                    price_usd,
                    categories: categories.iter().map(|c| c.to_string()).collect(),
                });
            }
        }
        catalog
    }

    /// Adds or replaces a product.
    pub fn insert(&self, product: Product) {
        self.write().products.insert(product.id.clone(), product);
    }

    /// Removes a product, so later lookups fail.
    pub fn remove(&self, id: &ProductId) {
        self.write().products.remove(id);
    }

    /// Makes every call fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.write().unavailable = unavailable;
    }

    /// Returns the ids of all products, in id order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.read().products.keys().cloned().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryCatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryCatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalogService {
    async fn get_product(&self, id: &ProductId) -> Result<Product, ServiceError> {
        let state = self.read();
        if state.unavailable {
            return Err(ServiceError::unavailable(SERVICE, "Catalog unavailable"));
        }
        state
            .products
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(SERVICE, format!("product #{id}")))
    }

    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        let state = self.read();
        if state.unavailable {
            return Err(ServiceError::unavailable(SERVICE, "Catalog unavailable"));
        }
        Ok(state.products.values().cloned().collect())
    }
}
