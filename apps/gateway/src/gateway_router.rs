mod cors;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get};
use ppe_portal_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

use self::cors::build_cors_layer;

/// Path the portal posts envelopes to.
pub const RELAY_PATH: &str = "/api/ppe";

/// Largest envelope body the relay accepts.
pub const RELAY_BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

pub fn build_router(app_state: AppState, frontend_url: Option<&str>) -> Result<Router, AppError> {
    let router = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(RELAY_PATH, any(handlers::relay::relay_handler))
        .layer(DefaultBodyLimit::max(RELAY_BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http());

    let router = match frontend_url {
        Some(frontend_url) => router.layer(build_cors_layer(frontend_url)?),
        None => router,
    };

    Ok(router.with_state(app_state))
}
