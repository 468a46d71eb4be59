//! Order confirmation email trait and in-memory implementation.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use domain::OrderResult;

use crate::error::ServiceError;

const SERVICE: &str = "email service";

/// Sends order confirmations.
#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send_order_confirmation(
        &self,
        email: &str,
        order: &OrderResult,
    ) -> Result<(), ServiceError>;
}

/// A confirmation recorded by [`InMemoryEmailService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentConfirmation {
    pub email: String,
    pub order: OrderResult,
}

#[derive(Debug, Default)]
struct InMemoryEmailState {
    sent: Vec<SentConfirmation>,
    fail_on_send: bool,
}

/// In-memory email service that records instead of sending.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmailService {
    state: Arc<RwLock<InMemoryEmailState>>,
}

impl InMemoryEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail every send.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.write().fail_on_send = fail;
    }

    /// Returns every confirmation sent so far.
    pub fn sent(&self) -> Vec<SentConfirmation> {
        self.read().sent.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryEmailState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryEmailState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EmailService for InMemoryEmailService {
    async fn send_order_confirmation(
        &self,
        email: &str,
        order: &OrderResult,
    ) -> Result<(), ServiceError> {
        let mut state = self.write();
        if state.fail_on_send {
            return Err(ServiceError::unavailable(SERVICE, "Mail relay unavailable"));
        }
        tracing::info!(%email, order_id = %order.order_id, "order confirmation recorded");
        state.sent.push(SentConfirmation {
            email: email.to_string(),
            order: order.clone(),
        });
        Ok(())
    }
}
