//! Checkout orchestrator for placing orders.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clients::{
    CartService, CatalogService, CurrencyService, EmailService, PaymentService, ServiceError,
    ShippingService,
};
use common::{IdGenerationError, OrderId};
use domain::{CartItem, Money, MoneyError, OrderItem, OrderResult, PlaceOrderRequest};

use crate::config::CheckoutConfig;
use crate::error::{CallError, CheckoutError, RefundOutcome, Result};

/// The collaborators an order is placed against.
#[derive(Clone)]
pub struct Collaborators {
    pub cart: Arc<dyn CartService>,
    pub catalog: Arc<dyn CatalogService>,
    pub currency: Arc<dyn CurrencyService>,
    pub shipping: Arc<dyn ShippingService>,
    pub payment: Arc<dyn PaymentService>,
    pub email: Arc<dyn EmailService>,
}

type OrderIdSource = fn() -> std::result::Result<OrderId, IdGenerationError>;

/// Places orders by sequencing calls to the checkout collaborators.
///
/// Every call runs to completion before the next starts. Each call is
/// bounded by its collaborator's timeout, and a timeout counts as a failure
/// of that stage.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    services: Collaborators,
    config: CheckoutConfig,
    order_ids: OrderIdSource,
}

impl CheckoutOrchestrator {
    /// Creates a new orchestrator.
    pub fn new(services: Collaborators, config: CheckoutConfig) -> Self {
        Self {
            services,
            config,
            order_ids: OrderId::generate,
        }
    }

    /// Replaces the order id source.
    pub fn with_order_id_source(mut self, source: OrderIdSource) -> Self {
        self.order_ids = source;
        self
    }

    /// Places one order for the request's user.
    ///
    /// Returns the assembled order once the card is charged and the items
    /// are shipped. Clearing the cart and sending the confirmation email
    /// are best effort and never fail the order.
    #[tracing::instrument(
        skip(self, request),
        fields(user_id = %request.user_id, currency = %request.user_currency)
    )]
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> Result<OrderResult> {
        metrics::counter!("checkout_orders_total").increment(1);
        let started = Instant::now();

        let result = self.run(request).await;

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("checkout_order_duration_seconds").record(duration);
        match &result {
            Ok(order) => {
                tracing::info!(order_id = %order.order_id, duration, "order placed");
            }
            Err(e) => {
                metrics::counter!("checkout_orders_failed_total", "stage" => e.stage())
                    .increment(1);
                tracing::warn!(stage = e.stage(), error = %e, "order placement failed");
            }
        }
        result
    }

    async fn run(&self, request: &PlaceOrderRequest) -> Result<OrderResult> {
        let timeouts = &self.config.timeouts;
        let order_id = (self.order_ids)()?;

        // 1. Cart
        let cart = bounded(timeouts.cart, self.services.cart.get_cart(&request.user_id))
            .await
            .map_err(CheckoutError::CartUnavailable)?;

        // 2. Prices
        let items = self
            .prepare_order_items(&cart, &request.user_currency)
            .await?;

        // 3. Shipping quote
        let shipping_cost = self
            .quote_shipping(request, &cart)
            .await
            .map_err(CheckoutError::ShippingQuote)?;

        // 4. Total
        let total = order_total(&shipping_cost, &items)?;

        // 5. Payment
        let transaction_id = bounded(
            timeouts.payment,
            self.services.payment.charge(&total, &request.credit_card),
        )
        .await
        .map_err(CheckoutError::Payment)?;
        tracing::info!(%transaction_id, %total, "payment went through");

        // 6. Shipment
        let shipping_tracking_id = match bounded(
            timeouts.shipping,
            self.services.shipping.ship_order(&request.address, &cart),
        )
        .await
        {
            Ok(id) => id,
            Err(source) => {
                let refund = self.compensate_charge(&transaction_id).await;
                return Err(CheckoutError::ShippingFulfillment {
                    transaction_id,
                    refund,
                    source,
                });
            }
        };

        // 7. Best-effort cleanup and notification
        self.clear_cart(&request.user_id).await;

        let order = OrderResult {
            order_id,
            shipping_tracking_id,
            shipping_cost,
            shipping_address: request.address.clone(),
            items,
        };
        self.send_confirmation(&request.email, &order).await;

        Ok(order)
    }

    /// Resolves every cart line to its unit price in `currency`.
    async fn prepare_order_items(
        &self,
        cart: &[CartItem],
        currency: &str,
    ) -> Result<Vec<OrderItem>> {
        let mut items = Vec::with_capacity(cart.len());
        for line in cart {
            let cost = self
                .unit_price(line, currency)
                .await
                .map_err(|source| CheckoutError::PriceResolution {
                    product_id: line.product_id.clone(),
                    source,
                })?;
            items.push(OrderItem::new(line.clone(), cost));
        }
        Ok(items)
    }

    async fn unit_price(
        &self,
        line: &CartItem,
        currency: &str,
    ) -> std::result::Result<Money, CallError> {
        let product = bounded(
            self.config.timeouts.catalog,
            self.services.catalog.get_product(&line.product_id),
        )
        .await?;
        self.convert(&product.price_usd, currency).await
    }

    async fn quote_shipping(
        &self,
        request: &PlaceOrderRequest,
        cart: &[CartItem],
    ) -> std::result::Result<Money, CallError> {
        let quote_usd = bounded(
            self.config.timeouts.shipping,
            self.services.shipping.get_quote(&request.address, cart),
        )
        .await?;
        self.convert(&quote_usd, &request.user_currency).await
    }

    /// Converts through the currency collaborator and insists on the
    /// requested currency code in the answer.
    async fn convert(&self, from: &Money, to_code: &str) -> std::result::Result<Money, CallError> {
        let converted = bounded(
            self.config.timeouts.currency,
            self.services.currency.convert(from, to_code),
        )
        .await?;
        if converted.currency_code() != to_code {
            return Err(ServiceError::UnexpectedCurrency {
                got: converted.currency_code().to_string(),
                want: to_code.to_string(),
            }
            .into());
        }
        Ok(converted)
    }

    async fn compensate_charge(&self, transaction_id: &str) -> RefundOutcome {
        if !self.config.refund_on_shipping_failure {
            tracing::warn!(
                %transaction_id,
                "shipment failed after payment; customer remains charged"
            );
            return RefundOutcome::NotAttempted;
        }

        match bounded(
            self.config.timeouts.payment,
            self.services.payment.refund(transaction_id),
        )
        .await
        {
            Ok(()) => {
                tracing::info!(%transaction_id, "charge refunded after failed shipment");
                RefundOutcome::Refunded
            }
            Err(e) => {
                tracing::error!(%transaction_id, error = %e, "refund after failed shipment failed");
                RefundOutcome::Failed(e.to_string())
            }
        }
    }

    async fn clear_cart(&self, user_id: &str) {
        let result = bounded(
            self.config.timeouts.cart,
            self.services.cart.empty_cart(user_id),
        )
        .await;
        if let Err(e) = result {
            metrics::counter!("checkout_best_effort_failures_total", "step" => "empty_cart")
                .increment(1);
            tracing::warn!(user_id, error = %e, "failed to empty user cart");
        }
    }

    async fn send_confirmation(&self, email: &str, order: &OrderResult) {
        let result = bounded(
            self.config.timeouts.email,
            self.services.email.send_order_confirmation(email, order),
        )
        .await;
        match result {
            Ok(()) => tracing::info!(email, "order confirmation email sent"),
            Err(e) => {
                metrics::counter!(
                    "checkout_best_effort_failures_total",
                    "step" => "send_confirmation"
                )
                .increment(1);
                tracing::warn!(email, error = %e, "failed to send order confirmation");
            }
        }
    }
}

/// Runs a collaborator call under `limit`.
async fn bounded<T>(
    limit: Duration,
    call: impl Future<Output = std::result::Result<T, ServiceError>>,
) -> std::result::Result<T, CallError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(CallError::from),
        Err(_) => Err(CallError::TimedOut(limit)),
    }
}

/// Shipping plus the sum of unit cost times quantity over all items.
fn order_total(shipping_cost: &Money, items: &[OrderItem]) -> std::result::Result<Money, MoneyError> {
    items.iter().try_fold(shipping_cost.clone(), |total, item| {
        total.sum(&item.total_cost()?)
    })
}
