//! Value objects for carts, orders and the catalog.

use serde::{Deserialize, Serialize};

use crate::error::MoneyError;
use crate::money::Money;

/// Product identifier as issued by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A line in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A cart line paired with its unit cost in the order's currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item: CartItem,
    pub cost: Money,
}

impl OrderItem {
    pub fn new(item: CartItem, cost: Money) -> Self {
        Self { item, cost }
    }

    /// Returns the line total (unit cost times quantity).
    pub fn total_cost(&self) -> Result<Money, MoneyError> {
        self.cost.multiply(self.item.quantity)
    }
}

/// Shipping address. Passed through to collaborators unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub zip_code: i32,
}

impl Address {
    /// Returns `"<street>, <city>, <state>"`, the form used to seed tracking ids.
    pub fn base_address(&self) -> String {
        format!("{}, {}, {}", self.street_address, self.city, self.state)
    }
}

/// Payment card details.
///
/// `Debug` masks everything except the last four digits of the number.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardInfo {
    pub credit_card_number: String,
    pub credit_card_cvv: i32,
    pub credit_card_expiration_year: i32,
    pub credit_card_expiration_month: i32,
}

impl CreditCardInfo {
    /// Returns the last four digits of the card number.
    pub fn last_four(&self) -> &str {
        let n = &self.credit_card_number;
        let start = n.len().saturating_sub(4);
        n.get(start..).unwrap_or("")
    }
}

impl std::fmt::Debug for CreditCardInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCardInfo")
            .field("credit_card_number", &format!("****{}", self.last_four()))
            .field("credit_card_cvv", &"***")
            .field(
                "expiration",
                &format!(
                    "{:02}/{}",
                    self.credit_card_expiration_month, self.credit_card_expiration_year
                ),
            )
            .finish()
    }
}

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub picture: String,
    pub price_usd: Money,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A text advertisement linking to a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    pub redirect_url: String,
    pub text: String,
}

impl Ad {
    pub fn new(redirect_url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            redirect_url: redirect_url.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_string_conversion() {
        let id = ProductId::new("OLJCESPC7Z");
        assert_eq!(id.as_str(), "OLJCESPC7Z");

        let id2: ProductId = "66VCHSJNUP".into();
        assert_eq!(id2.as_str(), "66VCHSJNUP");
    }

    #[test]
    fn test_order_item_total_cost() {
        let item = OrderItem::new(
            CartItem::new("OLJCESPC7Z", 3),
            Money::new("EUR", 10, 500_000_000).unwrap(),
        );
        let total = item.total_cost().unwrap();
        assert_eq!((total.units(), total.nanos()), (31, 500_000_000));
        assert_eq!(total.currency_code(), "EUR");
    }

    #[test]
    fn test_base_address_format() {
        let address = Address {
            street_address: "1600 Amphitheatre Parkway".to_string(),
            city: "Mountain View".to_string(),
            state: "CA".to_string(),
            country: "United States".to_string(),
            zip_code: 94043,
        };
        assert_eq!(
            address.base_address(),
            "1600 Amphitheatre Parkway, Mountain View, CA"
        );
    }

    #[test]
    fn test_credit_card_debug_is_masked() {
        let card = CreditCardInfo {
            credit_card_number: "4432801561520454".to_string(),
            credit_card_cvv: 672,
            credit_card_expiration_year: 2030,
            credit_card_expiration_month: 1,
        };
        let debug = format!("{card:?}");
        assert!(!debug.contains("4432801561520454"));
        assert!(!debug.contains("672"));
        assert!(debug.contains("****0454"));
        assert!(debug.contains("01/2030"));
    }

    #[test]
    fn test_address_defaults_missing_fields() {
        let address: Address = serde_json::from_str(r#"{"city":"Paris"}"#).unwrap();
        assert_eq!(address.city, "Paris");
        assert_eq!(address.zip_code, 0);
    }
}
