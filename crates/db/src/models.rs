use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;
use whenmeet_core::models::{Meeting, TimeSlot, Vote};

#[derive(Debug, Clone, FromRow)]
pub struct DbMeeting {
    pub id: Uuid,
    pub title: String,
    pub candidate_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbVote {
    pub meeting_id: Uuid,
    pub participant_name: String,
    pub slots: Json<Vec<TimeSlot>>,
    pub submitted_at: DateTime<Utc>,
    pub position: i32,
}

impl DbMeeting {
    /// Joins the meeting row with its vote rows, which must already be in
    /// submission order.
    pub fn into_meeting(self, votes: Vec<DbVote>) -> Meeting {
        let votes = votes
            .into_iter()
            .map(|vote| Vote {
                participant_name: vote.participant_name,
                slots: vote.slots.0.into(),
                submitted_at: vote.submitted_at,
            })
            .collect();

        Meeting::restore(self.id, self.title, self.candidate_dates, self.created_at, votes)
    }
}
