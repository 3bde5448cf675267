//! USPS Web Tools client.
//!
//! This module is the carrier boundary: request DTOs, the HTTP client, a
//! mock client for tests and the conversion of rate responses into
//! platform rates.
//!
//! Key characteristics of the USPS rate API:
//! - Authentication is by user id alone
//! - Test and live requests go to different hosts
//! - Request-level failures come back as HTTP 200 with an `Error` body
//! - A repeated element that occurs once arrives as a bare object

mod carrier;
mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use carrier::RateCarrier;
pub use client::{UspsClient, UspsClientConfig};
pub use convert::{ConversionError, clean_service_name, convert_postage, postage_entries};
pub use error::UspsError;
pub use mock::MockUspsClient;
pub use types::{
    CarrierAddress, Container, DeliveryRoute, PackageSize, Postage, RatePackage, RawRateResponse,
    RouteType, ServiceClass,
};
