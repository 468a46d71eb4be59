//! Shipping service trait and in-memory implementation.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use domain::{Address, CartItem, Money};
use ::shipping::{Quote, TrackingIdGenerator};

use crate::error::ServiceError;

const SERVICE: &str = "shipping service";

/// Quotes and dispatches shipments.
#[async_trait]
pub trait ShippingService: Send + Sync {
    /// Returns the shipping cost in USD.
    async fn get_quote(&self, address: &Address, items: &[CartItem])
    -> Result<Money, ServiceError>;

    /// Dispatches the items and returns a tracking id.
    async fn ship_order(&self, address: &Address, items: &[CartItem])
    -> Result<String, ServiceError>;
}

/// A shipment recorded by [`InMemoryShippingService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    pub tracking_id: String,
    pub address: Address,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Default)]
struct InMemoryShippingState {
    shipments: Vec<Shipment>,
    fail_on_quote: bool,
    fail_on_ship: bool,
}

/// In-process shipping service backed by the flat-rate quote and the
/// tracking-id generator.
#[derive(Debug, Clone)]
pub struct InMemoryShippingService {
    tracking: Arc<TrackingIdGenerator>,
    state: Arc<RwLock<InMemoryShippingState>>,
}

impl InMemoryShippingService {
    /// Creates a shipping service with an entropy-seeded generator.
    pub fn new() -> Self {
        Self::with_generator(Arc::new(TrackingIdGenerator::new()))
    }

    /// Creates a shipping service around an existing generator.
    pub fn with_generator(tracking: Arc<TrackingIdGenerator>) -> Self {
        Self {
            tracking,
            state: Arc::default(),
        }
    }

    /// Configures the service to fail quotes.
    pub fn set_fail_on_quote(&self, fail: bool) {
        self.write().fail_on_quote = fail;
    }

    /// Configures the service to fail shipments.
    pub fn set_fail_on_ship(&self, fail: bool) {
        self.write().fail_on_ship = fail;
    }

    /// Returns the number of dispatched shipments.
    pub fn shipment_count(&self) -> usize {
        self.read().shipments.len()
    }

    /// Returns every dispatched shipment.
    pub fn shipments(&self) -> Vec<Shipment> {
        self.read().shipments.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryShippingState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryShippingState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryShippingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShippingService for InMemoryShippingService {
    async fn get_quote(
        &self,
        _address: &Address,
        _items: &[CartItem],
    ) -> Result<Money, ServiceError> {
        if self.read().fail_on_quote {
            return Err(ServiceError::unavailable(SERVICE, "Quotes unavailable"));
        }
        Ok(Quote::flat_rate().to_money()?)
    }

    async fn ship_order(
        &self,
        address: &Address,
        items: &[CartItem],
    ) -> Result<String, ServiceError> {
        let mut state = self.write();
        if state.fail_on_ship {
            return Err(ServiceError::unavailable(SERVICE, "Shipping unavailable"));
        }

        let tracking_id = self.tracking.create_tracking_id(&address.base_address());
        state.shipments.push(Shipment {
            tracking_id: tracking_id.clone(),
            address: address.clone(),
            items: items.to_vec(),
        });
        Ok(tracking_id)
    }
}
