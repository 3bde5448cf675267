//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Shipment, ShippingRate};

/// Body of `POST /rates` and `POST /delivery-estimate`.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    /// The shipment to quote. Absent means the caller forgot it.
    #[serde(default)]
    pub shipment: Option<Shipment>,
}

/// Response of `POST /rates`.
#[derive(Debug, Serialize)]
pub struct RatesResponse {
    pub rates: Vec<ShippingRate>,
}

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
