//! Package weight.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit of a [`Weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "lb")]
    Pound,
}

impl WeightUnit {
    /// Ounces per one of this unit.
    fn ounces_per_unit(self) -> Decimal {
        match self {
            WeightUnit::Gram => Decimal::new(3_527_396_195, 11),
            WeightUnit::Kilogram => Decimal::new(3_527_396_195, 8),
            WeightUnit::Ounce => Decimal::ONE,
            WeightUnit::Pound => Decimal::from(16),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Gram => "g",
            WeightUnit::Kilogram => "kg",
            WeightUnit::Ounce => "oz",
            WeightUnit::Pound => "lb",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weight: a decimal amount in some unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    pub number: Decimal,
    pub unit: WeightUnit,
}

impl Weight {
    pub fn new(number: Decimal, unit: WeightUnit) -> Self {
        Self { number, unit }
    }

    /// Shorthand for a weight in ounces.
    pub fn ounces(number: impl Into<Decimal>) -> Self {
        Self::new(number.into(), WeightUnit::Ounce)
    }

    /// Converts to another unit. `None` if the result does not fit a `Decimal`.
    pub fn convert(&self, unit: WeightUnit) -> Option<Weight> {
        if self.unit == unit {
            return Some(*self);
        }

        let ounces = self.number.checked_mul(self.unit.ounces_per_unit())?;
        let number = ounces.checked_div(unit.ounces_per_unit())?;
        Some(Weight::new(number, unit))
    }

    /// The weight in ounces.
    pub fn to_ounces(&self) -> Option<Decimal> {
        self.convert(WeightUnit::Ounce).map(|w| w.number)
    }

    pub fn is_positive(&self) -> bool {
        self.number > Decimal::ZERO
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.unit)
    }
}
