//! Normalized shipping rates handed back to the platform.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency of every USPS quote.
pub const USD: &str = "USD";

/// A monetary amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub number: Decimal,
    pub currency_code: String,
}

impl Price {
    pub fn new(number: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            number,
            currency_code: currency_code.into(),
        }
    }

    pub fn usd(number: Decimal) -> Self {
        Self::new(number, USD)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency_code)
    }
}

/// A carrier service tier, e.g. Priority Mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingService {
    /// Carrier class id (e.g., "1" for Priority Mail).
    pub code: String,
    /// Label shown to the shopper.
    pub name: String,
}

/// One priced shipping option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRate {
    pub service: ShippingService,
    pub price: Price,
}

impl ShippingRate {
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        Self {
            service: ShippingService {
                code: code.into(),
                name: name.into(),
            },
            price,
        }
    }

    /// The service code, which doubles as the rate id.
    pub fn code(&self) -> &str {
        &self.service.code
    }
}
