use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;
use whenmeet_core::{
    errors::PollResult,
    models::{Meeting, Vote},
    store::MeetingStore,
};

// Mock store for testing
mock! {
    pub MeetingStore {}

    #[async_trait]
    impl MeetingStore for MeetingStore {
        async fn create(&self, title: &str, candidate_dates: &[NaiveDate]) -> PollResult<Meeting>;
        async fn fetch(&self, id: Uuid) -> PollResult<Option<Meeting>>;
        async fn persist(&self, meeting: &Meeting) -> PollResult<()>;
        async fn apply_vote(&self, meeting_id: Uuid, vote: Vote) -> PollResult<Meeting>;
        async fn remember_identity(&self, name: &str) -> PollResult<()>;
        async fn recall_identity(&self) -> PollResult<Option<String>>;
    }
}
