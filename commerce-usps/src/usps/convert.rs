//! Conversion from USPS response DTOs to platform rates.
//!
//! The carrier response is only trusted along the path to the postage list.
//! A response without that path means "no rates", and a postage entry that
//! cannot be read is skipped rather than failing the whole quote.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Price, ShippingRate};

use super::types::{Postage, RateV4Envelope, RawRateResponse};

/// HTML-encoded trademark superscript that USPS appends to some names.
const TRADEMARK_MARKUP: &str = "&lt;sup&gt;&#8482;&lt;/sup&gt;";

/// Error converting one postage entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Rate was not a decimal amount
    #[error("invalid rate: {0}")]
    InvalidRate(String),
}

/// Extract the postage entries from a raw rate response.
///
/// Returns an empty list when the response has no postage, including when
/// the carrier answered with a package-level error or an unexpected shape.
/// Entries that cannot be read are skipped individually.
pub fn postage_entries(raw: &RawRateResponse) -> Vec<Postage> {
    let envelope = match RateV4Envelope::deserialize(raw.as_value()) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "unexpected USPS rate response shape, treating as no rates");
            return Vec::new();
        }
    };

    let Some(package) = envelope.rate_v4_response.and_then(|r| r.package) else {
        debug!("USPS rate response has no package");
        return Vec::new();
    };

    if let Some(error) = &package.error {
        debug!(
            number = error.number.as_deref().unwrap_or_default(),
            description = error.description.as_deref().unwrap_or_default(),
            "USPS rejected the package"
        );
    }

    package
        .postage
        .map(|postage| postage.into_vec())
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| match Postage::deserialize(entry) {
            Ok(postage) => Some(postage),
            Err(e) => {
                warn!(error = %e, %entry, "skipping unreadable USPS postage entry");
                None
            }
        })
        .collect()
}

/// Convert a single postage entry into a rate.
pub fn convert_postage(postage: &Postage) -> Result<ShippingRate, ConversionError> {
    let code = postage
        .attributes
        .as_ref()
        .and_then(|a| a.class_id.as_deref())
        .ok_or(ConversionError::MissingField("@attributes.CLASSID"))?;

    let name = postage
        .mail_service
        .as_deref()
        .ok_or(ConversionError::MissingField("MailService"))?;

    let rate = postage
        .rate
        .as_deref()
        .ok_or(ConversionError::MissingField("Rate"))?;
    let amount = Decimal::from_str(rate.trim())
        .map_err(|_| ConversionError::InvalidRate(rate.to_string()))?;

    Ok(ShippingRate::new(
        code,
        clean_service_name(name),
        Price::usd(amount),
    ))
}

/// Remove the encoded trademark markup; checkout radio labels can't show it.
pub fn clean_service_name(name: &str) -> String {
    name.replace(TRADEMARK_MARKUP, "")
}
