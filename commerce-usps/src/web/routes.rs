//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::Value;
use tracing::{error, warn};

use crate::rates::RateError;
use crate::usps::RateCarrier;

use super::dto::*;
use super::state::AppState;

/// Message shown to callers when USPS cannot be reached. Details are logged.
const CARRIER_UNAVAILABLE: &str = "USPS rates are currently unavailable";

/// Create the application router.
pub fn create_router<C: RateCarrier + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/rates", post(calculate_rates::<C>))
        .route("/delivery-estimate", post(delivery_estimate::<C>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Calculate rates for a shipment.
async fn calculate_rates<C: RateCarrier>(
    State(state): State<AppState<C>>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<RatesResponse>, AppError> {
    let shipment = req.shipment.ok_or(RateError::MissingShipment)?;

    let rates = state.shipping_method.calculate_rates(&shipment).await?;

    Ok(Json(RatesResponse { rates }))
}

/// Raw USPS delivery estimate for a shipment.
async fn delivery_estimate<C: RateCarrier>(
    State(state): State<AppState<C>>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<Value>, AppError> {
    let shipment = req.shipment.ok_or(RateError::MissingShipment)?;

    let estimate = state.shipping_method.check_delivery_date(&shipment).await?;

    Ok(Json(estimate))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    CarrierUnavailable { message: String },
}

impl From<RateError> for AppError {
    fn from(e: RateError) -> Self {
        match e {
            RateError::MissingShipment | RateError::MissingDestination => AppError::BadRequest {
                message: e.to_string(),
            },
            RateError::Carrier(_) => AppError::CarrierUnavailable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "rejected rate request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::CarrierUnavailable { message } => {
                error!(%message, "USPS request failed");
                (StatusCode::BAD_GATEWAY, CARRIER_UNAVAILABLE.to_string())
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
