//! The USPS rate request service.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::domain::{Shipment, ShippingRate};
use crate::package::build_package;
use crate::usps::{DeliveryRoute, RateCarrier, RouteType, convert_postage, postage_entries};

use super::error::RateError;
use super::filter::ServiceFilter;

/// Fetches and normalizes USPS rates for shipments.
///
/// The carrier client is configured once, at construction, from the
/// provider config. Each call to [`get_rates`](Self::get_rates) is
/// independent: one shipment, one package, one carrier call, no retry.
#[derive(Debug, Clone)]
pub struct RateRequest<C> {
    client: C,
    config: ProviderConfig,
    filter: ServiceFilter,
}

impl<C: RateCarrier> RateRequest<C> {
    /// Create a rate service, configuring `client` with the credentials and
    /// mode from `config`.
    pub fn new(mut client: C, config: ProviderConfig) -> Self {
        client.configure(config.credentials(), config.mode());
        let filter = ServiceFilter::new(config.excluded_services().clone());

        Self {
            client,
            config,
            filter,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch rates for a shipment.
    ///
    /// Returns rates in the order USPS listed them, minus excluded services.
    /// An empty list means USPS offered nothing for this shipment.
    pub async fn get_rates(
        &self,
        shipment: Option<&Shipment>,
    ) -> Result<Vec<ShippingRate>, RateError> {
        let shipment = shipment.ok_or(RateError::MissingShipment)?;

        // Multi-package shipments are not supported: one package per request
        let package = build_package(shipment);

        if self.config.log().request {
            info!(?package, "USPS rate request");
        }

        let response = self.client.quote(&package).await?;

        if self.config.log().response {
            info!(response = %response.as_value(), "USPS rate response");
        }

        let entries = postage_entries(&response);
        let total = entries.len();

        let rates: Vec<ShippingRate> = entries
            .iter()
            .filter_map(|entry| match convert_postage(entry) {
                Ok(rate) => Some(rate),
                Err(e) => {
                    warn!(error = %e, "skipping USPS postage entry");
                    None
                }
            })
            .collect();

        let rates = self.filter.apply(rates);

        debug!(
            offered = total,
            returned = rates.len(),
            "USPS rates calculated"
        );

        Ok(rates)
    }

    /// Ask USPS for a delivery estimate from the store to the shipment's
    /// destination.
    ///
    /// The response is returned unmodified. Not part of the quote flow.
    pub async fn check_delivery_date(&self, shipment: &Shipment) -> Result<Value, RateError> {
        let destination = shipment
            .destination
            .as_ref()
            .filter(|a| !a.is_empty())
            .ok_or(RateError::MissingDestination)?;

        let route = DeliveryRoute::new(
            RouteType::Ground,
            shipment.origin().postal_code.clone(),
            destination.postal_code.clone(),
        );

        Ok(self.client.delivery_estimate(&route).await?)
    }
}
