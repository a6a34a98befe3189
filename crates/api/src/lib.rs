//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for candidate management
//! - Multipart decoding of candidate submissions
//! - Response types and error-to-status mapping

pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use talentpool_core::attachment::AttachmentStore;
use talentpool_core::candidate::CandidateStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// In-memory candidate registry.
    pub registry: Arc<CandidateStore>,
    /// Resume file store.
    pub attachments: Arc<AttachmentStore>,
}

/// Allowance on top of the resume size limit for multipart framing and
/// the text form fields.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.attachments.config().max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_add(FORM_OVERHEAD_BYTES);

    Router::new()
        .merge(routes::api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
