//! HTTP boundary for initData verification.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use initdata_core::Verifier;

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::ApiError;

/// Route serving both the verification `POST` and the health `GET`.
pub const VERIFY_PATH: &str = "/api/telegram/verify";

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<Verifier>,
}

/// Assemble the router around a shared verifier.
pub fn app(verifier: Arc<Verifier>) -> Router {
    Router::new()
        .route(VERIFY_PATH, get(routes::health).post(routes::verify))
        .with_state(AppState { verifier })
}
