//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::{CallError, CheckoutError};
use clients::ServiceError;
use frontend::FrontendError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Order placement failed.
    Checkout(CheckoutError),
    /// A storefront call failed.
    Frontend(FrontendError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, stage) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Checkout(err) => {
                let status = checkout_error_status(&err);
                (status, err.to_string(), Some(err.stage()))
            }
            ApiError::Frontend(err) => (frontend_error_status(&err), err.to_string(), None),
        };

        let body = match stage {
            Some(stage) => serde_json::json!({ "error": message, "stage": stage }),
            None => serde_json::json!({ "error": message }),
        };
        (status, axum::Json(body)).into_response()
    }
}

fn checkout_error_status(err: &CheckoutError) -> StatusCode {
    if err.is_timeout() {
        return StatusCode::GATEWAY_TIMEOUT;
    }
    match err {
        CheckoutError::OrderIdGeneration(_) | CheckoutError::Total(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        CheckoutError::Payment(CallError::Service(ServiceError::Rejected { .. })) => {
            StatusCode::PAYMENT_REQUIRED
        }
        CheckoutError::PriceResolution {
            source: CallError::Service(ServiceError::Rejected { .. }),
            ..
        } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn frontend_error_status(err: &FrontendError) -> StatusCode {
    match err.service_error() {
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Money(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::Unavailable { .. }
        | ServiceError::Status { .. }
        | ServiceError::InvalidResponse { .. }
        | ServiceError::UnexpectedCurrency { .. } => StatusCode::BAD_GATEWAY,
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}

impl From<FrontendError> for ApiError {
    fn from(err: FrontendError) -> Self {
        ApiError::Frontend(err)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_checkout_status_mapping() {
        let timeout = CheckoutError::CartUnavailable(CallError::TimedOut(Duration::from_millis(1)));
        assert_eq!(checkout_error_status(&timeout), StatusCode::GATEWAY_TIMEOUT);

        let declined = CheckoutError::Payment(CallError::Service(ServiceError::rejected(
            "payment service",
            "Payment declined",
        )));
        assert_eq!(checkout_error_status(&declined), StatusCode::PAYMENT_REQUIRED);

        let down = CheckoutError::ShippingQuote(CallError::Service(ServiceError::unavailable(
            "shipping service",
            "down",
        )));
        assert_eq!(checkout_error_status(&down), StatusCode::BAD_GATEWAY);
    }

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_response_bodies() {
        let (status, json) =
            body_json(ApiError::BadRequest("quantity must be positive".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({ "error": "quantity must be positive" }));

        let (status, json) = body_json(ApiError::Checkout(CheckoutError::CartUnavailable(
            CallError::Service(ServiceError::unavailable("cart service", "down")),
        )))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["stage"], "cart");
    }

    #[test]
    fn test_frontend_status_mapping() {
        let missing = FrontendError::Product {
            id: "NOPE".into(),
            source: ServiceError::not_found("catalog service", "product #NOPE"),
        };
        assert_eq!(frontend_error_status(&missing), StatusCode::NOT_FOUND);
    }
}
