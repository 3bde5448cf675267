//! The carrier client seam.

use std::future::Future;

use crate::config::{Credentials, Mode};

use super::error::UspsError;
use super::types::{DeliveryRoute, RatePackage, RawRateResponse};

/// A client for the USPS rate and delivery-estimate APIs.
///
/// The rate service only talks to the carrier through this trait, so tests
/// can swap in [`MockUspsClient`](super::MockUspsClient).
pub trait RateCarrier: Send + Sync {
    /// Set the credentials and endpoint mode used by later calls.
    fn configure(&mut self, credentials: &Credentials, mode: Mode);

    /// Request prices for one package.
    fn quote(
        &self,
        package: &RatePackage,
    ) -> impl Future<Output = Result<RawRateResponse, UspsError>> + Send;

    /// Request a delivery estimate for a route, returned as-is.
    fn delivery_estimate(
        &self,
        route: &DeliveryRoute,
    ) -> impl Future<Output = Result<serde_json::Value, UspsError>> + Send;
}
