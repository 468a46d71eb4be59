//! HTTP implementations of the serverless collaborators.
//!
//! Each client holds a shared `reqwest::Client` and the endpoint URL.
//! Transport failures map to `ServiceError::Unavailable`, non-2xx answers to
//! `ServiceError::Status`, undecodable bodies to
//! `ServiceError::InvalidResponse`.

mod ad;
mod currency;
mod email;
mod shipping;

pub use ad::HttpAdService;
pub use currency::HttpCurrencyService;
pub use email::HttpEmailService;
pub use self::shipping::HttpShippingService;

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::ServiceError;

/// Checks the status and decodes a JSON body.
async fn decode<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T, ServiceError> {
    let response = check_status(service, response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ServiceError::invalid_response(service, e))
}

/// Turns a non-success status into `ServiceError::Status` carrying the body.
async fn check_status(service: &'static str, response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}
