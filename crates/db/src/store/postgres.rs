use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{Result, WrapErr};
use tokio::sync::RwLock;
use uuid::Uuid;
use whenmeet_core::{
    errors::{PollError, PollResult},
    models::{Meeting, Vote},
    reconcile,
    store::MeetingStore,
};

use crate::{
    DbPool,
    repositories::{meeting, vote},
};

/// PostgreSQL-backed store.
///
/// Identity memory is kept in this process only; it describes the local
/// device, not shared meeting data.
pub struct PgMeetingStore {
    pool: DbPool,
    identity: RwLock<Option<String>>,
}

impl PgMeetingStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            identity: RwLock::new(None),
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn write(&self, snapshot: &Meeting) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        meeting::upsert_meeting(&mut *tx, snapshot)
            .await
            .wrap_err("Failed to write meeting row")?;
        vote::delete_votes_by_meeting_id(&mut *tx, snapshot.id)
            .await
            .wrap_err("Failed to clear previous votes")?;
        for (position, v) in snapshot.votes().iter().enumerate() {
            vote::insert_vote(&mut *tx, snapshot.id, v, position as i32)
                .await
                .wrap_err_with(|| format!("Failed to write vote for {}", v.participant_name))?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Upserts a single vote row while holding the meeting row lock.
    /// `None` when the meeting does not exist.
    async fn write_vote(&self, meeting_id: Uuid, v: &Vote) -> Result<Option<Meeting>> {
        let mut tx = self.pool.begin().await?;

        let Some(row) = meeting::get_meeting_for_update(&mut *tx, meeting_id).await? else {
            return Ok(None);
        };
        vote::upsert_vote(&mut *tx, meeting_id, v)
            .await
            .wrap_err_with(|| format!("Failed to write vote for {}", v.participant_name))?;
        let votes = vote::get_votes_by_meeting_id(&mut *tx, meeting_id).await?;

        tx.commit().await?;
        Ok(Some(row.into_meeting(votes)))
    }
}

#[async_trait]
impl MeetingStore for PgMeetingStore {
    async fn create(&self, title: &str, candidate_dates: &[NaiveDate]) -> PollResult<Meeting> {
        let created = Meeting::new(title, candidate_dates)?;
        meeting::insert_meeting(&self.pool, &created)
            .await
            .map_err(PollError::StoreWriteFailure)?;

        tracing::info!(meeting_id = %created.id, "Meeting created");
        Ok(created)
    }

    async fn fetch(&self, id: Uuid) -> PollResult<Option<Meeting>> {
        let Some(row) = meeting::get_meeting_by_id(&self.pool, id).await? else {
            return Ok(None);
        };
        let votes = vote::get_votes_by_meeting_id(&self.pool, id).await?;

        Ok(Some(row.into_meeting(votes)))
    }

    async fn persist(&self, snapshot: &Meeting) -> PollResult<()> {
        tracing::debug!(
            meeting_id = %snapshot.id,
            votes = snapshot.votes().len(),
            "Persisting meeting"
        );
        self.write(snapshot)
            .await
            .map_err(PollError::StoreWriteFailure)
    }

    async fn apply_vote(&self, meeting_id: Uuid, v: Vote) -> PollResult<Meeting> {
        // Validate and trim through the same path as the other backends.
        let v = reconcile::new_vote(&v.participant_name, Vec::from(v.slots), v.submitted_at)?;

        self.write_vote(meeting_id, &v)
            .await
            .map_err(PollError::StoreWriteFailure)?
            .ok_or(PollError::MeetingNotFound(meeting_id))
    }

    async fn remember_identity(&self, name: &str) -> PollResult<()> {
        *self.identity.write().await = Some(name.to_string());
        Ok(())
    }

    async fn recall_identity(&self) -> PollResult<Option<String>> {
        Ok(self.identity.read().await.clone())
    }
}
