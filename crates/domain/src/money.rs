//! Fixed-point currency amounts.

use serde::{Deserialize, Serialize};

use crate::error::MoneyError;

/// Number of nanos in one whole currency unit.
pub const NANOS_PER_UNIT: i64 = 1_000_000_000;

const NANOS_PER_UNIT_I128: i128 = NANOS_PER_UNIT as i128;

/// A currency amount: whole `units` plus a billionths fraction in `nanos`.
///
/// Invariants, enforced on construction and deserialization:
/// - `-999_999_999 <= nanos <= 999_999_999`
/// - `units` and `nanos` never disagree in sign (either may be zero)
///
/// Arithmetic always returns a normalized value, carrying overflow of the
/// nanos component into the units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    currency_code: String,
    units: i64,
    nanos: i32,
}

#[derive(Deserialize)]
struct RawMoney {
    currency_code: String,
    #[serde(default)]
    units: i64,
    #[serde(default)]
    nanos: i32,
}

impl TryFrom<RawMoney> for Money {
    type Error = MoneyError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Money::new(raw.currency_code, raw.units, raw.nanos)
    }
}

impl Money {
    /// Creates a validated money amount.
    pub fn new(
        currency_code: impl Into<String>,
        units: i64,
        nanos: i32,
    ) -> Result<Self, MoneyError> {
        if !is_valid(units, nanos) {
            return Err(MoneyError::InvalidValue { units, nanos });
        }
        Ok(Self {
            currency_code: currency_code.into(),
            units,
            nanos,
        })
    }

    /// Returns zero in the given currency.
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
            units: 0,
            nanos: 0,
        }
    }

    /// Builds a normalized amount from a total count of nanos.
    pub fn from_total_nanos(
        currency_code: impl Into<String>,
        total: i128,
    ) -> Result<Self, MoneyError> {
        let units =
            i64::try_from(total / NANOS_PER_UNIT_I128).map_err(|_| MoneyError::Overflow)?;
        // Remainder carries the sign of `total`, so signs always agree.
        let nanos = (total % NANOS_PER_UNIT_I128) as i32;
        Ok(Self {
            currency_code: currency_code.into(),
            units,
            nanos,
        })
    }

    /// Converts a floating point amount at full nanos precision, truncating
    /// toward zero.
    pub fn from_f64(currency_code: impl Into<String>, value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::Overflow);
        }
        let nanos = (value * NANOS_PER_UNIT as f64).trunc();
        if nanos.abs() >= i128::MAX as f64 {
            return Err(MoneyError::Overflow);
        }
        Self::from_total_nanos(currency_code, nanos as i128)
    }

    /// Returns the ISO currency code.
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Returns the whole units.
    pub fn units(&self) -> i64 {
        self.units
    }

    /// Returns the fractional billionths.
    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Returns the whole amount expressed in nanos.
    pub fn total_nanos(&self) -> i128 {
        self.units as i128 * NANOS_PER_UNIT_I128 + self.nanos as i128
    }

    pub fn is_zero(&self) -> bool {
        self.units == 0 && self.nanos == 0
    }

    pub fn is_negative(&self) -> bool {
        self.units < 0 || (self.units == 0 && self.nanos < 0)
    }

    /// Returns the same amount with the sign flipped.
    ///
    /// Fails with `Overflow` for `i64::MIN` units, which has no positive
    /// counterpart.
    pub fn negate(&self) -> Result<Money, MoneyError> {
        Self::from_total_nanos(self.currency_code.clone(), -self.total_nanos())
    }

    /// Adds two amounts of the same currency.
    ///
    /// Returns `CurrencyMismatch` when the codes differ.
    pub fn sum(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency_code != other.currency_code {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency_code.clone(),
                right: other.currency_code.clone(),
            });
        }
        Self::from_total_nanos(
            self.currency_code.clone(),
            self.total_nanos() + other.total_nanos(),
        )
    }

    /// Scales the amount by an integer quantity.
    pub fn multiply(&self, quantity: u32) -> Result<Money, MoneyError> {
        let total = self
            .total_nanos()
            .checked_mul(quantity as i128)
            .ok_or(MoneyError::Overflow)?;
        Self::from_total_nanos(self.currency_code.clone(), total)
    }

    /// Scales the amount by repeated addition.
    ///
    /// Equivalent to `multiply`; kept as the reference form.
    pub fn multiply_slow(&self, quantity: u32) -> Result<Money, MoneyError> {
        let mut out = Money::zero(self.currency_code.clone());
        for _ in 0..quantity {
            out = out.sum(self)?;
        }
        Ok(out)
    }
}

fn is_valid(units: i64, nanos: i32) -> bool {
    if nanos.unsigned_abs() as i64 >= NANOS_PER_UNIT {
        return false;
    }
    !((units > 0 && nanos < 0) || (units < 0 && nanos > 0))
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{} {}{}.{:09}",
            self.currency_code,
            sign,
            self.units.unsigned_abs(),
            self.nanos.unsigned_abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(units: i64, nanos: i32) -> Money {
        Money::new("USD", units, nanos).unwrap()
    }

    #[test]
    fn test_new_rejects_out_of_range_nanos() {
        assert!(Money::new("USD", 1, 1_000_000_000).is_err());
        assert!(Money::new("USD", -1, -1_000_000_000).is_err());
        assert!(Money::new("USD", 0, 999_999_999).is_ok());
    }

    #[test]
    fn test_new_rejects_mixed_signs() {
        assert_eq!(
            Money::new("USD", 1, -1),
            Err(MoneyError::InvalidValue { units: 1, nanos: -1 })
        );
        assert!(Money::new("USD", -1, 1).is_err());
        assert!(Money::new("USD", 0, -5).is_ok());
        assert!(Money::new("USD", -3, 0).is_ok());
    }

    #[test]
    fn test_sum_carries_nanos_into_units() {
        let total = usd(1, 600_000_000).sum(&usd(2, 700_000_000)).unwrap();
        assert_eq!(total.units(), 4);
        assert_eq!(total.nanos(), 300_000_000);
    }

    #[test]
    fn test_sum_of_fractions_only() {
        let total = usd(0, 600_000_000).sum(&usd(0, 600_000_000)).unwrap();
        assert_eq!((total.units(), total.nanos()), (1, 200_000_000));
    }

    #[test]
    fn test_sum_negative_fractions_keep_sign() {
        let total = usd(0, -600_000_000).sum(&usd(0, -600_000_000)).unwrap();
        assert_eq!((total.units(), total.nanos()), (-1, -200_000_000));
    }

    #[test]
    fn test_sum_mixed_sign_borrows() {
        let total = usd(5, 100_000_000).sum(&usd(-2, -500_000_000)).unwrap();
        assert_eq!((total.units(), total.nanos()), (2, 600_000_000));

        let total = usd(1, 0).sum(&usd(-3, -250_000_000)).unwrap();
        assert_eq!((total.units(), total.nanos()), (-2, -250_000_000));
    }

    #[test]
    fn test_sum_rejects_cross_currency() {
        let eur = Money::new("EUR", 1, 0).unwrap();
        assert_eq!(
            usd(1, 0).sum(&eur),
            Err(MoneyError::CurrencyMismatch {
                left: "USD".to_string(),
                right: "EUR".to_string(),
            })
        );
    }

    #[test]
    fn test_sum_overflow_is_error() {
        let big = usd(i64::MAX, 999_999_999);
        assert_eq!(big.sum(&usd(0, 1)), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_negate() {
        let neg = usd(3, 250_000_000).negate().unwrap();
        assert_eq!((neg.units(), neg.nanos()), (-3, -250_000_000));
        assert_eq!(usd(0, 0).negate().unwrap(), usd(0, 0));
        assert_eq!(usd(i64::MAX, 0).negate().unwrap().units(), -i64::MAX);
    }

    #[test]
    fn test_negate_min_units_overflows() {
        let min = usd(i64::MIN, 0);
        assert_eq!(min.negate(), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_multiply_normalizes() {
        let price = usd(19, 990_000_000);
        let total = price.multiply(3).unwrap();
        assert_eq!((total.units(), total.nanos()), (59, 970_000_000));
        assert!(price.multiply(0).unwrap().is_zero());
    }

    #[test]
    fn test_multiply_slow_matches_multiply() {
        let price = usd(7, 333_333_333);
        for q in 0..20 {
            assert_eq!(price.multiply(q).unwrap(), price.multiply_slow(q).unwrap());
        }
    }

    #[test]
    fn test_from_f64_full_precision() {
        let m = Money::from_f64("USD", 8.99).unwrap();
        assert_eq!(m.units(), 8);
        assert!((m.nanos() - 990_000_000).abs() <= 1);

        let neg = Money::from_f64("USD", -1.5).unwrap();
        assert_eq!((neg.units(), neg.nanos()), (-1, -500_000_000));

        assert!(Money::from_f64("USD", f64::NAN).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(usd(8, 990_000_000).to_string(), "USD 8.990000000");
        assert_eq!(usd(0, -5).to_string(), "USD -0.000000005");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Money =
            serde_json::from_str(r#"{"currency_code":"USD","units":3,"nanos":5}"#).unwrap();
        assert_eq!(ok, usd(3, 5));

        let bad = serde_json::from_str::<Money>(r#"{"currency_code":"USD","units":3,"nanos":-5}"#);
        assert!(bad.is_err());

        let defaults: Money = serde_json::from_str(r#"{"currency_code":"JPY"}"#).unwrap();
        assert!(defaults.is_zero());
    }

    #[test]
    fn test_serialize_wire_shape() {
        let json = serde_json::to_value(usd(8, 990_000_000)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"currency_code": "USD", "units": 8, "nanos": 990_000_000})
        );
    }
}
