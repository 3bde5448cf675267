//! Rate quotes: from a shipment to filtered, normalized USPS rates.

mod error;
mod filter;
mod request;

pub use error::RateError;
pub use filter::ServiceFilter;
pub use request::RateRequest;
