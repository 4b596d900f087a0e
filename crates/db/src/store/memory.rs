use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;
use whenmeet_core::{
    errors::{PollError, PollResult},
    models::{Meeting, Vote},
    reconcile,
    store::MeetingStore,
};

/// Keeps every meeting in process memory.
#[derive(Default)]
pub struct MemoryMeetingStore {
    meetings: RwLock<HashMap<Uuid, Meeting>>,
    identity: RwLock<Option<String>>,
}

impl MemoryMeetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.meetings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.meetings.read().await.is_empty()
    }
}

#[async_trait]
impl MeetingStore for MemoryMeetingStore {
    async fn create(&self, title: &str, candidate_dates: &[NaiveDate]) -> PollResult<Meeting> {
        let meeting = Meeting::new(title, candidate_dates)?;
        self.meetings
            .write()
            .await
            .insert(meeting.id, meeting.clone());
        Ok(meeting)
    }

    async fn fetch(&self, id: Uuid) -> PollResult<Option<Meeting>> {
        Ok(self.meetings.read().await.get(&id).cloned())
    }

    async fn persist(&self, meeting: &Meeting) -> PollResult<()> {
        self.meetings
            .write()
            .await
            .insert(meeting.id, meeting.clone());
        Ok(())
    }

    async fn apply_vote(&self, meeting_id: Uuid, vote: Vote) -> PollResult<Meeting> {
        let mut meetings = self.meetings.write().await;
        let current = meetings
            .get(&meeting_id)
            .ok_or(PollError::MeetingNotFound(meeting_id))?;

        let updated = reconcile::merge_vote(current, vote)?;
        meetings.insert(meeting_id, updated.clone());
        Ok(updated)
    }

    async fn remember_identity(&self, name: &str) -> PollResult<()> {
        *self.identity.write().await = Some(name.to_string());
        Ok(())
    }

    async fn recall_identity(&self) -> PollResult<Option<String>> {
        Ok(self.identity.read().await.clone())
    }
}
