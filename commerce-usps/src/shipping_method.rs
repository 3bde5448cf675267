//! The USPS shipping method, as seen by the commerce platform.

use serde_json::Value;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::domain::{Shipment, ShippingRate};
use crate::rates::{RateError, RateRequest};
use crate::usps::RateCarrier;

/// Platform entry point for USPS rates.
///
/// Checkout may ask for rates before the shopper has entered an address;
/// those calls return no rates without contacting USPS.
#[derive(Debug, Clone)]
pub struct UspsShippingMethod<C> {
    rates: RateRequest<C>,
}

impl<C: RateCarrier> UspsShippingMethod<C> {
    /// Create the shipping method. The configuration is fixed from here on.
    pub fn new(config: ProviderConfig, client: C) -> Self {
        Self {
            rates: RateRequest::new(client, config),
        }
    }

    /// Settings for a freshly added shipping method.
    pub fn default_configuration() -> ProviderConfig {
        ProviderConfig::default()
    }

    pub fn config(&self) -> &ProviderConfig {
        self.rates.config()
    }

    pub fn rate_request(&self) -> &RateRequest<C> {
        &self.rates
    }

    /// Whether there is enough information to connect to USPS.
    pub fn is_configured(&self) -> bool {
        let credentials = self.config().credentials();
        !credentials.user_id.is_empty() && !credentials.password.is_empty()
    }

    /// Calculate rates for a shipment.
    pub async fn calculate_rates(
        &self,
        shipment: &Shipment,
    ) -> Result<Vec<ShippingRate>, RateError> {
        if !shipment.has_destination() {
            debug!("no destination address yet, skipping USPS");
            return Ok(Vec::new());
        }

        self.rates.get_rates(Some(shipment)).await
    }

    /// Delivery estimate for a shipment; see [`RateRequest::check_delivery_date`].
    pub async fn check_delivery_date(&self, shipment: &Shipment) -> Result<Value, RateError> {
        self.rates.check_delivery_date(shipment).await
    }
}
