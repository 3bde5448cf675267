//! Service filtering by configuration.

use std::collections::BTreeSet;

use crate::domain::ShippingRate;

/// Drops rates for services the store has excluded.
///
/// Exclusion only: a service the carrier offers is shown unless its class
/// id is listed. New carrier services therefore appear without any
/// configuration change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    excluded: BTreeSet<String>,
}

impl ServiceFilter {
    pub fn new(excluded: BTreeSet<String>) -> Self {
        Self { excluded }
    }

    /// Whether a service code passes the filter.
    pub fn allows(&self, code: &str) -> bool {
        !self.excluded.contains(code)
    }

    /// Keep the allowed rates, preserving order.
    pub fn apply(&self, rates: Vec<ShippingRate>) -> Vec<ShippingRate> {
        rates.into_iter().filter(|r| self.allows(r.code())).collect()
    }
}
