//! Mapping a shipment onto a USPS rate package.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

use crate::domain::{Address, Shipment, Weight, is_usa_zip};
use crate::usps::{CarrierAddress, Container, PackageSize, RatePackage, ServiceClass};

const OUNCES_PER_POUND: u32 = 16;

/// Build the rate package for a shipment.
///
/// The package asks for every service; configuration filters the answer
/// afterwards. Packaging is always a variable container of regular size.
/// A shipment without a destination maps to blank destination fields,
/// so callers should check [`Shipment::has_destination`] first.
pub fn build_package(shipment: &Shipment) -> RatePackage {
    let ship_date = shipment
        .ship_date
        .unwrap_or_else(|| Local::now().date_naive());

    let origin = ship_from(shipment);
    let destination = shipment
        .destination
        .as_ref()
        .map(ship_to)
        .unwrap_or_default();

    let destination_postal_code = shipment
        .destination
        .as_ref()
        .map(|a| a.postal_code.as_str())
        .unwrap_or_default();
    for zip in [shipment.origin().postal_code.as_str(), destination_postal_code] {
        if !is_usa_zip(zip) {
            warn!(zip, "postal code does not look like a US ZIP code");
        }
    }

    let (pounds, ounces) = match split_weight(&shipment.weight) {
        Some((pounds, ounces)) => (Some(pounds), Some(ounces)),
        None => (None, None),
    };

    RatePackage {
        service: ServiceClass::All,
        zip_origination: origin.zip5.clone(),
        zip_destination: destination.zip5.clone(),
        pounds,
        ounces,
        container: Container::Variable,
        size: PackageSize::Regular,
        machinable: true,
        ship_date: format_ship_date(ship_date),
        origin,
        destination,
    }
}

/// Split a weight into whole pounds and remaining ounces.
///
/// Returns `None` for zero or negative weights, leaving the carrier to apply
/// its default. Weights too large to express in whole pounds also return
/// `None`, with a warning.
pub fn split_weight(weight: &Weight) -> Option<(u32, Decimal)> {
    if !weight.is_positive() {
        return None;
    }

    let Some(ounces) = weight.to_ounces() else {
        warn!(%weight, "weight overflows when converted to ounces, sending no weight");
        return None;
    };
    let per_pound = Decimal::from(OUNCES_PER_POUND);

    let Some(pounds) = (ounces / per_pound).floor().to_u32() else {
        warn!(%weight, "weight exceeds the largest pound count, sending no weight");
        return None;
    };
    let remainder = ounces % per_pound;

    Some((pounds, remainder.normalize()))
}

/// USPS expects `YYYY-MM-DD`.
pub fn format_ship_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Split `NNNNN-NNNN` into its ZIP 5 and ZIP 4 parts.
fn split_zip(postal_code: &str) -> (String, Option<String>) {
    match postal_code.trim().split_once('-') {
        Some((zip5, zip4)) => (zip5.to_string(), Some(zip4.to_string())),
        None => (postal_code.trim().to_string(), None),
    }
}

fn ship_to(address: &Address) -> CarrierAddress {
    let (zip5, zip4) = split_zip(&address.postal_code);

    CarrierAddress {
        firm_name: None,
        address: address.address_line1.clone(),
        apt: address.address_line2.clone(),
        city: address.locality.clone(),
        state: address.administrative_area.clone(),
        zip5,
        zip4,
    }
}

fn ship_from(shipment: &Shipment) -> CarrierAddress {
    let store = &shipment.order.store;
    let address = &store.address;
    let (zip5, zip4) = split_zip(&address.postal_code);

    CarrierAddress {
        firm_name: Some(store.name.clone()),
        address: address.address_line1.clone(),
        apt: String::new(),
        city: address.locality.clone(),
        state: address.administrative_area.clone(),
        zip5,
        zip4,
    }
}
