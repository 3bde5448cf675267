//! Rate request error types.

use crate::usps::UspsError;

/// Errors from a rate or delivery-estimate request.
///
/// Empty results are not errors: no destination, no postage and an
/// unreadable response all produce an empty rate list instead.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    /// No shipment was supplied to the rate call
    #[error("shipment not provided")]
    MissingShipment,

    /// The shipment has no destination address
    #[error("shipment has no destination address")]
    MissingDestination,

    /// The carrier call failed
    #[error("USPS request failed: {0}")]
    Carrier(#[from] UspsError),
}
