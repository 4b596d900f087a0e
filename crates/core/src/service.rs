//! Store-backed workflows built from the pure core operations.
//!
//! Reads load a full snapshot. Vote submissions are merged by the store in one
//! atomic step, so two participants voting at once both keep their vote.
//! Retries are left to the caller.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    errors::{PollError, PollResult},
    models::{Meeting, TimeSlot, Vote},
    reconcile,
    store::MeetingStore,
};

/// Fetches a meeting, turning an unknown id into
/// [`PollError::MeetingNotFound`].
pub async fn load_meeting(store: &dyn MeetingStore, id: Uuid) -> PollResult<Meeting> {
    store
        .fetch(id)
        .await?
        .ok_or(PollError::MeetingNotFound(id))
}

/// Hands one vote to the store, reporting any backend failure as a write
/// failure. Only the submitter's vote is written.
pub async fn store_vote(store: &dyn MeetingStore, id: Uuid, vote: Vote) -> PollResult<Meeting> {
    store.apply_vote(id, vote).await.map_err(|e| match e {
        PollError::StoreWriteFailure(report) | PollError::Store(report) => {
            warn!(meeting_id = %id, error = %report, "Failed to store vote");
            PollError::StoreWriteFailure(report)
        }
        other => other,
    })
}

/// Submits a vote and stores it, without touching identity memory.
///
/// The name is validated before the store is contacted.
pub async fn record_vote(
    store: &dyn MeetingStore,
    id: Uuid,
    participant_name: &str,
    slots: Vec<TimeSlot>,
) -> PollResult<Meeting> {
    let vote = reconcile::new_vote(participant_name, slots, Utc::now())?;
    let updated = store_vote(store, id, vote).await?;

    info!(meeting_id = %id, votes = updated.votes().len(), "Vote recorded");
    Ok(updated)
}

/// Submits a vote, persists it and remembers the name as this device's
/// identity. Identity is only remembered once the write succeeded.
pub async fn cast_vote(
    store: &dyn MeetingStore,
    id: Uuid,
    participant_name: &str,
    slots: Vec<TimeSlot>,
) -> PollResult<Meeting> {
    let updated = record_vote(store, id, participant_name, slots).await?;
    store
        .remember_identity(reconcile::normalize_participant(participant_name)?)
        .await?;
    Ok(updated)
}

/// The vote cast by this device's remembered identity, if any.
pub async fn my_vote(store: &dyn MeetingStore, id: Uuid) -> PollResult<Option<Vote>> {
    let Some(name) = store.recall_identity().await? else {
        return Ok(None);
    };
    let meeting = load_meeting(store, id).await?;
    Ok(reconcile::find_vote(&meeting, &name).cloned())
}
