//! # Availability Handlers
//!
//! Read-only views over a meeting's votes: the heat-map grid the results
//! page renders and the ranked list the organizer picks a slot from.
//!
//! Both recompute from the stored snapshot on every request. Clients refresh
//! by polling these endpoints.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use whenmeet_core::{
    aggregate::{top_slots, AvailabilityGrid, RankedSlot, DISPLAY_HOURS},
    errors::PollError,
    models::time_slot::MAX_HOUR,
    service,
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability grid
///
/// * `viewer` - participant whose own cells are flagged as `mine`
/// * `from_hour` / `to_hour` - inclusive row range (default 8 to 22)
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityQuery {
    pub viewer: Option<String>,
    pub from_hour: Option<u8>,
    pub to_hour: Option<u8>,
}

/// Query parameters for the ranked slot list
///
/// * `count` - maximum number of slots to return (default 5)
#[derive(Debug, Default, Deserialize)]
pub struct TopSlotsQuery {
    pub count: Option<usize>,
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailabilityGrid>, AppError> {
    let Path(id) = path?;
    let Query(query) = query?;
    let from = query.from_hour.unwrap_or(*DISPLAY_HOURS.start());
    let to = query.to_hour.unwrap_or(*DISPLAY_HOURS.end());
    if from > to || to > MAX_HOUR {
        return Err(AppError(PollError::Validation(format!(
            "hour range {}..={} must lie within 0..={}",
            from, to, MAX_HOUR
        ))));
    }

    let meeting = service::load_meeting(state.store.as_ref(), id).await?;
    let viewer = query.viewer.as_deref().filter(|v| !v.trim().is_empty());

    Ok(Json(AvailabilityGrid::build(&meeting, from..=to, viewer)))
}

#[axum::debug_handler]
pub async fn get_top_slots(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<TopSlotsQuery>, QueryRejection>,
) -> Result<Json<Vec<RankedSlot>>, AppError> {
    let Path(id) = path?;
    let Query(query) = query?;
    let meeting = service::load_meeting(state.store.as_ref(), id).await?;
    Ok(Json(top_slots(&meeting, query.count.unwrap_or(5))))
}
