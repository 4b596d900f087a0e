use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/meetings", post(handlers::meeting::create_meeting))
        .route("/api/meetings/:id", get(handlers::meeting::get_meeting))
        .route("/api/meetings/:id/votes", put(handlers::vote::submit_vote))
        .route(
            "/api/meetings/:id/votes/:name",
            get(handlers::vote::get_vote),
        )
}
