//! Mock USPS client for testing without API access.
//!
//! Serves a fixed rate payload, loaded from memory or a JSON file, as if it
//! were a live response. Records every package it is asked to quote.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::config::{Credentials, Mode};

use super::carrier::RateCarrier;
use super::error::UspsError;
use super::types::{DeliveryRoute, RatePackage, RawRateResponse};

/// Mock USPS client that serves canned responses.
#[derive(Debug, Clone, Default)]
pub struct MockUspsClient {
    rate_response: Value,
    delivery_response: Value,
    user_id: Option<String>,
    mode: Option<Mode>,
    quotes: Arc<Mutex<Vec<RatePackage>>>,
    routes: Arc<Mutex<Vec<DeliveryRoute>>>,
}

impl MockUspsClient {
    /// Create a mock returning `rate_response` for every quote.
    pub fn new(rate_response: Value) -> Self {
        Self {
            rate_response,
            ..Default::default()
        }
    }

    /// Load the rate response from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, UspsError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| {
            UspsError::NotConfigured(format!("failed to read mock response {:?}: {}", path, e))
        })?;

        let value = serde_json::from_str(&json).map_err(|e| UspsError::Json {
            message: format!("failed to parse {:?}: {}", path, e),
            body: None,
        })?;

        Ok(Self::new(value))
    }

    /// Set the response for delivery-estimate calls.
    pub fn with_delivery_response(mut self, response: Value) -> Self {
        self.delivery_response = response;
        self
    }

    /// Number of quote calls made so far.
    pub fn quote_count(&self) -> usize {
        self.quotes.lock().map(|q| q.len()).unwrap_or_default()
    }

    /// The most recently quoted package.
    pub fn last_package(&self) -> Option<RatePackage> {
        self.quotes.lock().ok().and_then(|q| q.last().cloned())
    }

    /// Routes passed to delivery-estimate calls.
    pub fn routes(&self) -> Vec<DeliveryRoute> {
        self.routes.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// User id received through `configure`.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Mode received through `configure`.
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }
}

impl RateCarrier for MockUspsClient {
    fn configure(&mut self, credentials: &Credentials, mode: Mode) {
        self.user_id = Some(credentials.user_id.clone());
        self.mode = Some(mode);
    }

    async fn quote(&self, package: &RatePackage) -> Result<RawRateResponse, UspsError> {
        if let Ok(mut quotes) = self.quotes.lock() {
            quotes.push(package.clone());
        }
        Ok(RawRateResponse(self.rate_response.clone()))
    }

    async fn delivery_estimate(&self, route: &DeliveryRoute) -> Result<Value, UspsError> {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route.clone());
        }
        Ok(self.delivery_response.clone())
    }
}
