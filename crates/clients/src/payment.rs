//! Payment service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use domain::{CreditCardInfo, Money};

use crate::error::ServiceError;

const SERVICE: &str = "payment service";

/// Trait for payment processing operations.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Charges a card and returns the transaction id.
    async fn charge(&self, amount: &Money, card: &CreditCardInfo) -> Result<String, ServiceError>;

    /// Refunds a previously made charge.
    async fn refund(&self, transaction_id: &str) -> Result<(), ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    charges: HashMap<String, Money>,
    refunded: Vec<String>,
    next_id: u32,
    fail_on_charge: bool,
    fail_on_refund: bool,
    delay: Option<Duration>,
}

/// In-memory payment service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentService {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentService {
    /// Creates a new in-memory payment service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to decline charges.
    pub fn set_fail_on_charge(&self, fail: bool) {
        self.write().fail_on_charge = fail;
    }

    /// Configures the service to fail refunds.
    pub fn set_fail_on_refund(&self, fail: bool) {
        self.write().fail_on_refund = fail;
    }

    /// Delays every charge by `delay` before answering.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.write().delay = delay;
    }

    /// Returns the number of active (unrefunded) charges.
    pub fn charge_count(&self) -> usize {
        self.read().charges.len()
    }

    /// Returns the amount of an active charge.
    pub fn charged_amount(&self, transaction_id: &str) -> Option<Money> {
        self.read().charges.get(transaction_id).cloned()
    }

    /// Returns the ids of refunded charges, in refund order.
    pub fn refunded(&self) -> Vec<String> {
        self.read().refunded.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryPaymentState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryPaymentState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PaymentService for InMemoryPaymentService {
    async fn charge(&self, amount: &Money, card: &CreditCardInfo) -> Result<String, ServiceError> {
        let delay = self.read().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.write();

        if state.fail_on_charge {
            return Err(ServiceError::rejected(SERVICE, "Payment declined"));
        }

        state.next_id += 1;
        let transaction_id = format!("TXN-{:04}", state.next_id);
        state.charges.insert(transaction_id.clone(), amount.clone());
        tracing::debug!(%transaction_id, %amount, card = card.last_four(), "card charged");

        Ok(transaction_id)
    }

    async fn refund(&self, transaction_id: &str) -> Result<(), ServiceError> {
        let mut state = self.write();

        if state.fail_on_refund {
            return Err(ServiceError::unavailable(SERVICE, "Refunds unavailable"));
        }

        if state.charges.remove(transaction_id).is_none() {
            return Err(ServiceError::not_found(SERVICE, transaction_id));
        }
        state.refunded.push(transaction_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CreditCardInfo {
        CreditCardInfo {
            credit_card_number: "4432801561520454".to_string(),
            credit_card_cvv: 672,
            credit_card_expiration_year: 2030,
            credit_card_expiration_month: 1,
        }
    }

    #[tokio::test]
    async fn test_charge_and_refund() {
        let service = InMemoryPaymentService::new();
        let amount = Money::new("USD", 50, 0).unwrap();

        let transaction_id = service.charge(&amount, &card()).await.unwrap();
        assert!(transaction_id.starts_with("TXN-"));
        assert_eq!(service.charge_count(), 1);
        assert_eq!(service.charged_amount(&transaction_id), Some(amount));

        service.refund(&transaction_id).await.unwrap();
        assert_eq!(service.charge_count(), 0);
        assert_eq!(service.refunded(), vec![transaction_id]);
    }

    #[tokio::test]
    async fn test_fail_on_charge() {
        let service = InMemoryPaymentService::new();
        service.set_fail_on_charge(true);

        let result = service.charge(&Money::new("USD", 50, 0).unwrap(), &card()).await;
        assert!(matches!(result, Err(ServiceError::Rejected { .. })));
        assert_eq!(service.charge_count(), 0);
    }

    #[tokio::test]
    async fn test_refund_unknown_transaction() {
        let service = InMemoryPaymentService::new();
        let result = service.refund("TXN-9999").await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_sequential_transaction_ids() {
        let service = InMemoryPaymentService::new();
        let amount = Money::new("USD", 10, 0).unwrap();

        let t1 = service.charge(&amount, &card()).await.unwrap();
        let t2 = service.charge(&amount, &card()).await.unwrap();

        assert_eq!(t1, "TXN-0001");
        assert_eq!(t2, "TXN-0002");
    }
}
