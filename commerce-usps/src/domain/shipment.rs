//! Shipment input for a rate quote.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::address::Address;
use super::weight::Weight;

/// The store an order was placed in. Its address is the ship-from address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Display name, sent to the carrier as the origin firm name.
    pub name: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub store: Store,
}

/// A commerce shipment awaiting a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Shipping profile address. `None` until the shopper enters one.
    #[serde(default)]
    pub destination: Option<Address>,

    pub order: Order,

    pub weight: Weight,

    /// Date the package will be handed over. Defaults to today.
    #[serde(default)]
    pub ship_date: Option<NaiveDate>,
}

impl Shipment {
    pub fn new(store: Store, destination: Option<Address>, weight: Weight) -> Self {
        Self {
            destination,
            order: Order { store },
            weight,
            ship_date: None,
        }
    }

    /// Set an explicit ship date.
    pub fn with_ship_date(mut self, date: NaiveDate) -> Self {
        self.ship_date = Some(date);
        self
    }

    /// The ship-from address.
    pub fn origin(&self) -> &Address {
        &self.order.store.address
    }

    /// Returns true when a non-empty destination address is present.
    pub fn has_destination(&self) -> bool {
        self.destination.as_ref().is_some_and(|a| !a.is_empty())
    }
}
