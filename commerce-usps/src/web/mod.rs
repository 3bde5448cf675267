//! Web layer: exposes the USPS shipping method to the commerce platform.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
