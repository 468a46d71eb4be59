use async_trait::async_trait;
use domain::Ad;
use reqwest::Client;
use serde::Deserialize;

use super::decode;
use crate::ad::AdService;
use crate::error::ServiceError;

const SERVICE: &str = "ad service";

#[derive(Deserialize)]
struct AdsResponse {
    ads: Vec<Ad>,
}

/// Ads over `GET <url>?context_keys=a,b`.
#[derive(Debug, Clone)]
pub struct HttpAdService {
    client: Client,
    url: String,
}

impl HttpAdService {
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
impl AdService for HttpAdService {
    async fn get_ads(&self, context_keys: &[String]) -> Result<Vec<Ad>, ServiceError> {
        let mut request = self.client.get(&self.url);
        if !context_keys.is_empty() {
            request = request.query(&[("context_keys", context_keys.join(","))]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::unavailable(SERVICE, e))?;

        let body: AdsResponse = decode(SERVICE, response).await?;
        Ok(body.ads)
    }
}
