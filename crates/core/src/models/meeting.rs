use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::vote::Vote;
use crate::errors::{PollError, PollResult};

/// A scheduling poll: a title, the organizer's candidate days and every
/// participant's vote.
///
/// `votes` holds at most one entry per participant name and keeps submission
/// order. It is only replaced through [`crate::reconcile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MeetingRecord")]
pub struct Meeting {
    pub id: Uuid,
    pub title: String,
    pub candidate_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
    votes: Vec<Vote>,
}

#[derive(Deserialize)]
struct MeetingRecord {
    id: Uuid,
    title: String,
    candidate_dates: Vec<NaiveDate>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    votes: Vec<Vote>,
}

impl From<MeetingRecord> for Meeting {
    fn from(record: MeetingRecord) -> Self {
        Meeting::restore(
            record.id,
            record.title,
            record.candidate_dates,
            record.created_at,
            record.votes,
        )
    }
}

impl Meeting {
    /// Creates a fresh poll with no votes.
    ///
    /// The title is trimmed and must not be empty. Candidate dates are sorted
    /// chronologically and de-duplicated; at least one is required.
    pub fn new(title: &str, candidate_dates: &[NaiveDate]) -> PollResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PollError::Validation("meeting title must not be empty".into()));
        }

        let mut dates = candidate_dates.to_vec();
        dates.sort();
        dates.dedup();
        if dates.is_empty() {
            return Err(PollError::Validation(
                "at least one candidate date is required".into(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            candidate_dates: dates,
            created_at: Utc::now(),
            votes: Vec::new(),
        })
    }

    /// Rebuilds a meeting from stored parts.
    ///
    /// Stored votes are trusted except for the one-vote-per-name rule: when a
    /// name appears more than once the later entry wins.
    pub fn restore(
        id: Uuid,
        title: String,
        candidate_dates: Vec<NaiveDate>,
        created_at: DateTime<Utc>,
        votes: Vec<Vote>,
    ) -> Self {
        let mut meeting = Self {
            id,
            title,
            candidate_dates,
            created_at,
            votes: Vec::with_capacity(votes.len()),
        };
        for vote in votes {
            meeting.replace_vote(vote);
        }
        meeting
    }

    /// Votes in submission order.
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// Whether `day` is one of the organizer's candidate dates.
    pub fn is_candidate(&self, day: NaiveDate) -> bool {
        self.candidate_dates.contains(&day)
    }

    pub(crate) fn replace_vote(&mut self, vote: Vote) {
        self.votes
            .retain(|existing| existing.participant_name != vote.participant_name);
        self.votes.push(vote);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeetingRequest {
    pub title: String,
    pub candidate_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingResponse {
    pub id: Uuid,
    pub title: String,
    pub candidate_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub participants: Vec<String>,
    pub total_votes: usize,
}

impl From<&Meeting> for MeetingResponse {
    fn from(meeting: &Meeting) -> Self {
        Self {
            id: meeting.id,
            title: meeting.title.clone(),
            candidate_dates: meeting.candidate_dates.clone(),
            created_at: meeting.created_at,
            participants: crate::aggregate::participants_who_voted(meeting)
                .into_iter()
                .map(str::to_string)
                .collect(),
            total_votes: meeting.votes.len(),
        }
    }
}
