use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::{Builder, Uuid};

/// Failure to obtain randomness for a new identifier.
#[derive(Debug, Error)]
#[error("failed to generate order id: {0}")]
pub struct IdGenerationError(String);

impl IdGenerationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Globally unique identifier for a placed order.
///
/// Wraps a random (version 4) UUID drawn from the operating system's
/// randomness source. Generation is fallible so that an exhausted or
/// unavailable entropy source surfaces as an error instead of a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generates a new random order ID.
    pub fn generate() -> Result<Self, IdGenerationError> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| IdGenerationError(e.to_string()))?;
        Ok(Self(Builder::from_random_bytes(bytes).into_uuid()))
    }

    /// Creates an order ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OrderId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<OrderId> for Uuid {
    fn from(id: OrderId) -> Self {
        id.0
    }
}
