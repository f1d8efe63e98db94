use crate::features::auth::handler;
use axum::{routing::get, Router};

/// Auth routes; the handlers require an authenticated request
pub fn routes() -> Router {
    Router::new().route("/api/auth/me", get(handler::get_me))
}
