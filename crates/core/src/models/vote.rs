use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time_slot::{SlotSet, TimeSlot};

/// One participant's complete set of free slots.
///
/// A vote is always replaced as a whole; there is no partial update of its
/// slot set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub participant_name: String,
    pub slots: SlotSet,
    pub submitted_at: DateTime<Utc>,
}

impl Vote {
    pub fn covers(&self, slot: &TimeSlot) -> bool {
        self.slots.contains(slot)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitVoteRequest {
    pub participant_name: String,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteResponse {
    pub participant_name: String,
    pub slots: Vec<TimeSlot>,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Vote> for VoteResponse {
    fn from(vote: &Vote) -> Self {
        Self {
            participant_name: vote.participant_name.clone(),
            slots: vote.slots.as_slice().to_vec(),
            submitted_at: vote.submitted_at,
        }
    }
}
