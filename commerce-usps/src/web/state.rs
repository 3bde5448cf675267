//! Application state for the web layer.

use std::sync::Arc;

use crate::shipping_method::UspsShippingMethod;

/// Shared application state.
pub struct AppState<C> {
    /// The configured USPS shipping method
    pub shipping_method: Arc<UspsShippingMethod<C>>,
}

impl<C> AppState<C> {
    /// Create a new app state.
    pub fn new(shipping_method: UspsShippingMethod<C>) -> Self {
        Self {
            shipping_method: Arc::new(shipping_method),
        }
    }
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            shipping_method: Arc::clone(&self.shipping_method),
        }
    }
}
