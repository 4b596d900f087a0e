use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    errors::PollResult,
    models::{Meeting, Vote},
};

/// Durable keyed storage for meeting records.
///
/// `fetch` returns the full record and `persist` overwrites it. Vote
/// submissions go through [`MeetingStore::apply_vote`] instead, which touches
/// only the submitter's vote so that participants voting at the same time
/// never erase each other. The identity methods remember which participant
/// name this device last voted as, independently of any meeting.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Creates and stores a new meeting with a fresh id and no votes.
    async fn create(&self, title: &str, candidate_dates: &[NaiveDate]) -> PollResult<Meeting>;

    async fn fetch(&self, id: Uuid) -> PollResult<Option<Meeting>>;

    /// Overwrites the stored record. Failures surface as
    /// [`crate::errors::PollError::StoreWriteFailure`].
    async fn persist(&self, meeting: &Meeting) -> PollResult<()>;

    /// Merges one vote into the stored meeting as a single atomic step and
    /// returns the updated record.
    ///
    /// Fails with [`crate::errors::PollError::MeetingNotFound`] for an
    /// unknown id. A previous vote under the same trimmed name is replaced;
    /// every other vote is left as stored.
    async fn apply_vote(&self, meeting_id: Uuid, vote: Vote) -> PollResult<Meeting>;

    async fn remember_identity(&self, name: &str) -> PollResult<()>;

    async fn recall_identity(&self) -> PollResult<Option<String>>;
}
