use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use whenmeet_core::{
    models::meeting::{CreateMeetingRequest, MeetingResponse},
    service,
};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_meeting(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateMeetingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MeetingResponse>), AppError> {
    let Json(payload) = payload?;
    let meeting = state
        .store
        .create(&payload.title, &payload.candidate_dates)
        .await?;

    tracing::info!(meeting_id = %meeting.id, "Meeting created via API");
    Ok((StatusCode::CREATED, Json(MeetingResponse::from(&meeting))))
}

#[axum::debug_handler]
pub async fn get_meeting(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MeetingResponse>, AppError> {
    let Path(id) = path?;
    let meeting = service::load_meeting(state.store.as_ref(), id).await?;
    Ok(Json(MeetingResponse::from(&meeting)))
}
