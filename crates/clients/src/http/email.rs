use async_trait::async_trait;
use domain::{Money, OrderItem, OrderResult};
use reqwest::Client;
use serde::Serialize;

use super::check_status;
use crate::email::EmailService;
use crate::error::ServiceError;

const SERVICE: &str = "email service";

#[derive(Serialize)]
struct ConfirmationPayload<'a> {
    email: &'a str,
    order: ConfirmationOrder<'a>,
}

#[derive(Serialize)]
struct ConfirmationOrder<'a> {
    order_id: String,
    shipping_tracking_id: &'a str,
    shipping_cost: &'a Money,
    shipping_address: ConfirmationAddress<'a>,
    items: &'a [OrderItem],
}

#[derive(Serialize)]
struct ConfirmationAddress<'a> {
    street_address_1: &'a str,
    street_address_2: &'a str,
    city: &'a str,
    country: &'a str,
    zip_code: i32,
}

/// Order confirmations posted as JSON to a mail-rendering function.
#[derive(Debug, Clone)]
pub struct HttpEmailService {
    client: Client,
    url: String,
}

impl HttpEmailService {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send_order_confirmation(
        &self,
        email: &str,
        order: &OrderResult,
    ) -> Result<(), ServiceError> {
        let address = &order.shipping_address;
        let payload = ConfirmationPayload {
            email,
            order: ConfirmationOrder {
                order_id: order.order_id.to_string(),
                shipping_tracking_id: &order.shipping_tracking_id,
                shipping_cost: &order.shipping_cost,
                shipping_address: ConfirmationAddress {
                    street_address_1: &address.street_address,
                    street_address_2: "",
                    city: &address.city,
                    country: &address.country,
                    zip_code: address.zip_code,
                },
                items: &order.items,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ServiceError::unavailable(SERVICE, e))?;

        check_status(SERVICE, response).await?;
        Ok(())
    }
}
