//! Contextual advertisement trait and in-memory implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use domain::Ad;
use rand::seq::SliceRandom;

use crate::error::ServiceError;

/// Most ads served per request.
pub const MAX_ADS_TO_SERVE: usize = 2;

/// Serves ads for a set of context keys (product categories).
#[async_trait]
pub trait AdService: Send + Sync {
    async fn get_ads(&self, context_keys: &[String]) -> Result<Vec<Ad>, ServiceError>;
}

/// Static ad table keyed by category.
///
/// Ads for every known key are concatenated and capped at
/// [`MAX_ADS_TO_SERVE`]. When no key matches, random ads are served instead.
#[derive(Debug, Clone)]
pub struct InMemoryAdService {
    ads: BTreeMap<String, Vec<Ad>>,
}

impl InMemoryAdService {
    /// Creates the service with the demo storefront ad table.
    pub fn new() -> Self {
        let table: &[(&str, &[(&str, &str)])] = &[
            ("clothing", &[("/product/66VCHSJNUP", "Tank top for sale. 20% off.")]),
            (
                "accessories",
                &[("/product/1YMWWN1N4O", "Watch for sale. Buy one, get second kit for free")],
            ),
            (
                "footwear",
                &[("/product/L9ECAV7KIM", "Loafers for sale. Buy one, get second one for free")],
            ),
            ("hair", &[("/product/2ZYFJ3GM2N", "Hairdryer for sale. 50% off.")]),
            ("decor", &[("/product/0PUK6V6EV0", "Candle holder for sale. 30% off.")]),
            (
                "kitchen",
                &[
                    ("/product/9SIQT8TOJO", "Bamboo glass jar for sale. 10% off."),
                    ("/product/6E92ZMYYFZ", "Mug for sale. Buy two, get third one for free"),
                ],
            ),
        ];
        Self::with_table(table.iter().map(|&(key, ads)| {
            (
                key.to_string(),
                ads.iter().map(|&(url, text)| Ad::new(url, text)).collect(),
            )
        }))
    }

    pub fn with_table(table: impl IntoIterator<Item = (String, Vec<Ad>)>) -> Self {
        Self {
            ads: table.into_iter().collect(),
        }
    }

    fn random_ads(&self, count: usize) -> Vec<Ad> {
        let all: Vec<&Ad> = self.ads.values().flatten().collect();
        let mut rng = rand::thread_rng();
        (0..count)
            .filter_map(|_| all.choose(&mut rng).map(|ad| (*ad).clone()))
            .collect()
    }
}

impl Default for InMemoryAdService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdService for InMemoryAdService {
    async fn get_ads(&self, context_keys: &[String]) -> Result<Vec<Ad>, ServiceError> {
        tracing::debug!(?context_keys, "received ad request");

        let mut selected: Vec<Ad> = context_keys
            .iter()
            .filter_map(|key| self.ads.get(key))
            .flatten()
            .cloned()
            .collect();

        if selected.is_empty() {
            return Ok(self.random_ads(MAX_ADS_TO_SERVE));
        }
        selected.truncate(MAX_ADS_TO_SERVE);
        Ok(selected)
    }
}
