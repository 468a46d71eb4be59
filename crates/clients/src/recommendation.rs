//! Product recommendation trait and in-memory implementation.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use domain::ProductId;
use rand::seq::SliceRandom;

use crate::error::ServiceError;

const SERVICE: &str = "recommendation service";

/// Most recommendations returned by a single call.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Suggests products related to what a user is looking at.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn list_recommendations(
        &self,
        user_id: &str,
        product_ids: &[ProductId],
    ) -> Result<Vec<ProductId>, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryRecommendationState {
    candidates: Vec<ProductId>,
    unavailable: bool,
}

/// Recommends a random sample of known products, excluding the ones the
/// caller passed in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecommendationService {
    state: Arc<RwLock<InMemoryRecommendationState>>,
}

impl InMemoryRecommendationService {
    pub fn new(candidates: Vec<ProductId>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryRecommendationState {
                candidates,
                unavailable: false,
            })),
        }
    }

    /// Makes every call fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .unavailable = unavailable;
    }
}

#[async_trait]
impl RecommendationService for InMemoryRecommendationService {
    async fn list_recommendations(
        &self,
        user_id: &str,
        product_ids: &[ProductId],
    ) -> Result<Vec<ProductId>, ServiceError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.unavailable {
            return Err(ServiceError::unavailable(SERVICE, "Recommendations unavailable"));
        }

        let filtered: Vec<&ProductId> = state
            .candidates
            .iter()
            .filter(|id| !product_ids.contains(id))
            .collect();
        let picked: Vec<ProductId> = filtered
            .choose_multiple(&mut rand::thread_rng(), MAX_RECOMMENDATIONS)
            .map(|id| (*id).clone())
            .collect();
        tracing::debug!(%user_id, count = picked.len(), "recommendations listed");
        Ok(picked)
    }
}
