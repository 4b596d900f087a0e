//! Local-only store: all meetings of this device plus its remembered identity
//! in a single JSON document.
//!
//! Writes go to a sibling temp file which is then renamed over the original,
//! so a crash mid-write leaves the previous document intact. A mutex
//! serialises read-modify-write cycles within the process.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};
use uuid::Uuid;
use whenmeet_core::{
    errors::{PollError, PollResult},
    models::{Meeting, Vote},
    reconcile,
    store::MeetingStore,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    meetings: Vec<Meeting>,
    #[serde(default)]
    identity: Option<String>,
}

pub struct FileMeetingStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileMeetingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<StoreDocument> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .wrap_err_with(|| format!("Corrupt store file {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(e).wrap_err_with(|| format!("Failed to read {}", self.path.display())),
        }
    }

    async fn save(&self, document: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(document)?;
        fs::write(&tmp, bytes)
            .await
            .wrap_err_with(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .wrap_err_with(|| format!("Failed to replace {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), "Store file saved");
        Ok(())
    }

    async fn upsert(&self, meeting: &Meeting) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;

        match document.meetings.iter_mut().find(|m| m.id == meeting.id) {
            Some(existing) => *existing = meeting.clone(),
            None => document.meetings.push(meeting.clone()),
        }

        self.save(&document).await
    }
}

#[async_trait]
impl MeetingStore for FileMeetingStore {
    async fn create(&self, title: &str, candidate_dates: &[NaiveDate]) -> PollResult<Meeting> {
        let meeting = Meeting::new(title, candidate_dates)?;
        self.upsert(&meeting)
            .await
            .map_err(PollError::StoreWriteFailure)?;
        Ok(meeting)
    }

    async fn fetch(&self, id: Uuid) -> PollResult<Option<Meeting>> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(document.meetings.into_iter().find(|m| m.id == id))
    }

    async fn persist(&self, meeting: &Meeting) -> PollResult<()> {
        self.upsert(meeting)
            .await
            .map_err(PollError::StoreWriteFailure)
    }

    async fn apply_vote(&self, meeting_id: Uuid, vote: Vote) -> PollResult<Meeting> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;

        let current = document
            .meetings
            .iter_mut()
            .find(|m| m.id == meeting_id)
            .ok_or(PollError::MeetingNotFound(meeting_id))?;
        let updated = reconcile::merge_vote(current, vote)?;
        *current = updated.clone();

        self.save(&document)
            .await
            .map_err(PollError::StoreWriteFailure)?;
        Ok(updated)
    }

    async fn remember_identity(&self, name: &str) -> PollResult<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        document.identity = Some(name.to_string());
        self.save(&document)
            .await
            .map_err(PollError::StoreWriteFailure)
    }

    async fn recall_identity(&self) -> PollResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.identity)
    }
}
