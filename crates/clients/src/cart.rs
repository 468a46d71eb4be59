//! Cart service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use domain::CartItem;

use crate::error::ServiceError;

const SERVICE: &str = "cart service";

/// Per-user cart storage.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Returns the user's cart lines. An unknown user has an empty cart.
    async fn get_cart(&self, user_id: &str) -> Result<Vec<CartItem>, ServiceError>;

    /// Adds a line, merging quantity into an existing line for the same product.
    async fn add_item(&self, user_id: &str, item: CartItem) -> Result<(), ServiceError>;

    /// Removes every line from the user's cart.
    async fn empty_cart(&self, user_id: &str) -> Result<(), ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryCartState {
    carts: HashMap<String, Vec<CartItem>>,
    fail_on_get: bool,
    fail_on_empty: bool,
    delay: Option<Duration>,
}

/// In-memory cart service for testing and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartService {
    state: Arc<RwLock<InMemoryCartState>>,
}

impl InMemoryCartService {
    /// Creates a new, empty cart service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail cart reads.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.write().fail_on_get = fail;
    }

    /// Configures the service to fail cart clears.
    pub fn set_fail_on_empty(&self, fail: bool) {
        self.write().fail_on_empty = fail;
    }

    /// Delays every cart read by `delay` before answering.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.write().delay = delay;
    }

    /// Returns the number of lines in a user's cart.
    pub fn line_count(&self, user_id: &str) -> usize {
        self.read().carts.get(user_id).map_or(0, Vec::len)
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryCartState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryCartState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CartService for InMemoryCartService {
    async fn get_cart(&self, user_id: &str) -> Result<Vec<CartItem>, ServiceError> {
        let delay = self.read().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.read();
        if state.fail_on_get {
            return Err(ServiceError::unavailable(SERVICE, "Cart storage unavailable"));
        }
        Ok(state.carts.get(user_id).cloned().unwrap_or_default())
    }

    async fn add_item(&self, user_id: &str, item: CartItem) -> Result<(), ServiceError> {
        if item.quantity == 0 {
            return Err(ServiceError::rejected(SERVICE, "quantity must be positive"));
        }

        let mut state = self.write();
        let cart = state.carts.entry(user_id.to_string()).or_default();
        match cart.iter().position(|line| line.product_id == item.product_id) {
            Some(i) => cart[i].quantity += item.quantity,
            None => cart.push(item),
        }
        Ok(())
    }

    async fn empty_cart(&self, user_id: &str) -> Result<(), ServiceError> {
        let mut state = self.write();
        if state.fail_on_empty {
            return Err(ServiceError::unavailable(SERVICE, "Cart storage unavailable"));
        }
        state.carts.remove(user_id);
        Ok(())
    }
}
