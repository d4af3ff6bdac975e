//! HTTP API Layer
//!
//! This crate exposes the ledger and settlement engine over REST using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: request handlers per resource (trips, participants,
//!   expenses, balances/settlement)
//! - **Middleware**: bearer-token authentication and audit logging
//! - **DTOs**: request/response objects; amounts cross the boundary as
//!   major-unit decimals and become integer minor units immediately
//! - **Error handling**: consistent typed error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use domain_ledger::TripService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{expenses, health, participants, settlement, trips};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TripService>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - The trip ledger service, already wired to its archive
/// * `config` - API configuration
pub fn create_router(service: Arc<TripService>, config: ApiConfig) -> Router {
    let state = AppState { service, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Trip ledger routes
    let trip_routes = Router::new()
        .route("/", post(trips::create_trip))
        .route("/:id", get(trips::get_trip))
        .route("/:id/participants", post(participants::register_participant))
        .route("/:id/participants", get(participants::list_participants))
        .route(
            "/:id/participants/:participant_id",
            delete(participants::deactivate_participant),
        )
        .route("/:id/expenses", post(expenses::create_expense))
        .route("/:id/expenses", get(expenses::list_expenses))
        .route("/:id/expenses/:record_id/void", post(expenses::void_expense))
        .route("/:id/balances", get(settlement::get_balances))
        .route("/:id/settlement", get(settlement::get_settlement));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/trips", trip_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
