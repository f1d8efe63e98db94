use std::sync::Arc;

use axum::{routing::post, Router};

use super::handler;
use super::service::EventsService;

/// Public events lookup
pub fn routes(service: Arc<EventsService>) -> Router {
    Router::new()
        .route("/api/events/search", post(handler::search_events))
        .with_state(service)
}
