//! Postal address types.

use serde::{Deserialize, Serialize};

/// A postal address as supplied by the commerce platform.
///
/// Fields are free text. Nothing is validated here: the carrier is the
/// authority on whether an address is deliverable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub address_line1: String,
    pub address_line2: String,
    /// City or town.
    pub locality: String,
    /// State or region code (e.g., "CA").
    pub administrative_area: String,
    pub postal_code: String,
}

impl Address {
    /// Returns true when every field is blank.
    ///
    /// Checkout creates shipping profiles before the shopper has typed an
    /// address, so an all-blank address means "not entered yet".
    pub fn is_empty(&self) -> bool {
        [
            &self.address_line1,
            &self.address_line2,
            &self.locality,
            &self.administrative_area,
            &self.postal_code,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }
}

/// Returns true if `zip` looks like a US ZIP or ZIP+4 code.
///
/// Accepts `NNNNN` and `NNNNN-NNNN`.
pub fn is_usa_zip(zip: &str) -> bool {
    let bytes = zip.as_bytes();

    let digits = |range: &[u8]| range.iter().all(u8::is_ascii_digit);

    match bytes.len() {
        5 => digits(bytes),
        10 => digits(&bytes[..5]) && bytes[5] == b'-' && digits(&bytes[6..]),
        _ => false,
    }
}
