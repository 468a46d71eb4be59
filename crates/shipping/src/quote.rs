//! Flat-rate shipping quote.

use domain::{Money, MoneyError, NANOS_PER_UNIT};

/// The fixed shipping cost in US dollars.
pub const FLAT_RATE_USD: f64 = 8.99;

const NANOS_PER_CENT: i128 = 10_000_000;

/// A dollar amount at cents granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub dollars: u32,
    pub cents: u32,
}

impl Quote {
    /// Splits a float into whole dollars and cents, truncating both.
    ///
    /// Precision below one cent is discarded.
    pub fn from_float(value: f64) -> Self {
        let dollars = value.trunc();
        let fraction = value - dollars;
        Self {
            dollars: dollars as u32,
            cents: (fraction * 100.0).trunc() as u32,
        }
    }

    /// Returns the flat-rate quote, independent of address and cart.
    pub fn flat_rate() -> Self {
        Self::from_float(FLAT_RATE_USD)
    }

    /// Converts to a USD money value. Cents beyond 99 carry into dollars.
    pub fn to_money(&self) -> Result<Money, MoneyError> {
        let total = i128::from(self.dollars) * i128::from(NANOS_PER_UNIT)
            + i128::from(self.cents) * NANOS_PER_CENT;
        Money::from_total_nanos("USD", total)
    }
}
