use async_trait::async_trait;
use domain::{Address, CartItem, Money};
use reqwest::Client;
use ::shipping::routes::{QuoteResponse, ShipOrderRequest, ShipOrderResponse};

use super::decode;
use crate::error::ServiceError;
use crate::shipping::ShippingService;

const SERVICE: &str = "shipping service";

/// Shipping over the `/getQuote` and `/shipOrder` routes of a base URL.
#[derive(Debug, Clone)]
pub struct HttpShippingService {
    client: Client,
    base_url: String,
}

impl HttpShippingService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ShippingService for HttpShippingService {
    async fn get_quote(
        &self,
        _address: &Address,
        _items: &[CartItem],
    ) -> Result<Money, ServiceError> {
        let response = self
            .client
            .get(format!("{}/getQuote", self.base_url))
            .send()
            .await
            .map_err(|e| ServiceError::unavailable(SERVICE, e))?;

        let quote: QuoteResponse = decode(SERVICE, response).await?;
        Ok(quote.cost_usd)
    }

    async fn ship_order(
        &self,
        address: &Address,
        _items: &[CartItem],
    ) -> Result<String, ServiceError> {
        let request = ShipOrderRequest {
            address: address.clone(),
        };
        let response = self
            .client
            .post(format!("{}/shipOrder", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::unavailable(SERVICE, e))?;

        let shipped: ShipOrderResponse = decode(SERVICE, response).await?;
        Ok(shipped.tracking_id)
    }
}
