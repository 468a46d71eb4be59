//! Collaborator error types.

use domain::MoneyError;
use thiserror::Error;

/// Errors returned by collaborator services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service could not be reached or declined to serve.
    #[error("{service} unavailable: {reason}")]
    Unavailable {
        service: &'static str,
        reason: String,
    },

    /// The service refused the request on its merits.
    #[error("{service} rejected request: {reason}")]
    Rejected {
        service: &'static str,
        reason: String,
    },

    /// The requested entity does not exist.
    #[error("{service}: {what} not found")]
    NotFound { service: &'static str, what: String },

    /// The service answered with a non-success HTTP status.
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("{service} response could not be parsed: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },

    /// A conversion came back in a currency other than the one requested.
    #[error("unexpected currency code: got {got}, want {want}")]
    UnexpectedCurrency { got: String, want: String },

    /// Money arithmetic failed while building a response.
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl ServiceError {
    pub fn unavailable(service: &'static str, reason: impl ToString) -> Self {
        ServiceError::Unavailable {
            service,
            reason: reason.to_string(),
        }
    }

    pub fn rejected(service: &'static str, reason: impl ToString) -> Self {
        ServiceError::Rejected {
            service,
            reason: reason.to_string(),
        }
    }

    pub fn not_found(service: &'static str, what: impl ToString) -> Self {
        ServiceError::NotFound {
            service,
            what: what.to_string(),
        }
    }

    pub fn invalid_response(service: &'static str, reason: impl ToString) -> Self {
        ServiceError::InvalidResponse {
            service,
            reason: reason.to_string(),
        }
    }
}
