use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use whenmeet_core::{
    models::vote::{SubmitVoteRequest, VoteResponse},
    reconcile, service,
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Replaces the participant's vote with the submitted selection.
///
/// The server never remembers identities; that is a device concern.
#[axum::debug_handler]
pub async fn submit_vote(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<SubmitVoteRequest>, JsonRejection>,
) -> Result<Json<VoteResponse>, AppError> {
    let Path(id) = path?;
    let Json(payload) = payload?;
    let updated = service::record_vote(
        state.store.as_ref(),
        id,
        &payload.participant_name,
        payload.slots,
    )
    .await?;

    // A fresh submission is always the newest vote.
    let vote = updated
        .votes()
        .last()
        .ok_or_else(|| eyre::eyre!("meeting {} has no votes after submit", id))?;

    Ok(Json(VoteResponse::from(vote)))
}

/// Returns a participant's vote, or 404 when they have not voted.
#[axum::debug_handler]
pub async fn get_vote(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<(Uuid, String)>, PathRejection>,
) -> Result<Response, AppError> {
    let Path((id, participant_name)) = path?;
    let meeting = service::load_meeting(state.store.as_ref(), id).await?;

    let response = match reconcile::find_vote(&meeting, &participant_name) {
        Some(vote) => Json(VoteResponse::from(vote)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("No vote from '{}'", participant_name.trim())
            })),
        )
            .into_response(),
    };

    Ok(response)
}
