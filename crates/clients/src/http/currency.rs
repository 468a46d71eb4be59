use async_trait::async_trait;
use domain::Money;
use reqwest::Client;

use super::decode;
use crate::currency::CurrencyService;
use crate::error::ServiceError;

const SERVICE: &str = "currency service";

/// Currency conversion over `GET <url>?from_currency_code=&from_units=&from_nanos=&to_code=`.
#[derive(Debug, Clone)]
pub struct HttpCurrencyService {
    client: Client,
    url: String,
}

impl HttpCurrencyService {
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
impl CurrencyService for HttpCurrencyService {
    #[tracing::instrument(skip(self, from), fields(from = %from))]
    async fn convert(&self, from: &Money, to_code: &str) -> Result<Money, ServiceError> {
        let query = [
            ("from_currency_code", from.currency_code().to_string()),
            ("from_units", from.units().to_string()),
            ("from_nanos", from.nanos().to_string()),
            ("to_code", to_code.to_string()),
        ];
        let response = self
            .client
            .get(&self.url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ServiceError::unavailable(SERVICE, e))?;

        let converted: Money = decode(SERVICE, response).await?;
        if converted.currency_code() != to_code {
            return Err(ServiceError::UnexpectedCurrency {
                got: converted.currency_code().to_string(),
                want: to_code.to_string(),
            });
        }
        Ok(converted)
    }
}
