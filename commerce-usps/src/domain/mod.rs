//! Platform-side data for a rate quote.
//!
//! These mirror the commerce platform's shipment, address, weight and price
//! values as plain data. They carry no carrier-specific knowledge.

mod address;
mod rate;
mod shipment;
mod weight;

pub use address::{Address, is_usa_zip};
pub use rate::{Price, ShippingRate, ShippingService, USD};
pub use shipment::{Order, Shipment, Store};
pub use weight::{Weight, WeightUnit};
