//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are never floats. All marketplace amounts use [`rust_decimal`]
//! so that cart totals are exact and stable across serialization.

use core::fmt;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Sri Lankan rupees, the marketplace default.
    #[must_use]
    pub const fn rupees(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::LKR)
    }

    /// Multiply this unit price by a quantity (line-item subtotal).
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Format for display (e.g., "Rs. 120.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Adding prices assumes a single-currency cart; the left operand's
/// currency wins. The marketplace only trades in LKR today.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Sri Lankan rupee, the marketplace default.
    #[default]
    LKR,
    USD,
    EUR,
    INR,
}

impl CurrencyCode {
    /// Display symbol/prefix for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::LKR => "Rs.",
            Self::USD => "$",
            Self::EUR => "€",
            Self::INR => "₹",
        }
    }

}
