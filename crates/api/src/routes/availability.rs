use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/meetings/:id/availability",
            get(handlers::availability::get_availability),
        )
        .route(
            "/api/meetings/:id/slots/top",
            get(handlers::availability::get_top_slots),
        )
}
