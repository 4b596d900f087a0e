//! # Vote Reconciliation
//!
//! Merges one participant's selection into a meeting snapshot. A participant
//! owns exactly one vote, keyed by their trimmed name; submitting again
//! replaces that vote wholesale and moves it to the end of the submission
//! order.
//!
//! Every function here takes the meeting by reference and hands back a new
//! snapshot, so a failed call leaves the caller's copy untouched.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    errors::{PollError, PollResult},
    models::{Meeting, SlotSet, TimeSlot, Vote},
};

/// Trims a participant name and rejects it when nothing is left.
pub fn normalize_participant(name: &str) -> PollResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PollError::InvalidParticipant(
            "participant name must not be empty".into(),
        ));
    }
    Ok(trimmed)
}

/// Records `participant_name`'s availability, replacing any earlier vote
/// under the same name.
///
/// Duplicate slots collapse silently and an empty selection is a valid vote.
/// Slots are not checked against the candidate dates.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use whenmeet_core::{find_vote, models::{Meeting, TimeSlot}, submit_vote};
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let evening = TimeSlot::new(day, 18).unwrap();
///
/// let meeting = Meeting::new("Dinner", &[day]).unwrap();
/// let meeting = submit_vote(&meeting, " Ana ", [evening, evening]).unwrap();
/// assert_eq!(find_vote(&meeting, "Ana").unwrap().slots.len(), 1);
///
/// // Resubmitting replaces the earlier vote.
/// let meeting = submit_vote(&meeting, "Ana", Vec::<TimeSlot>::new()).unwrap();
/// assert_eq!(meeting.votes().len(), 1);
/// assert!(find_vote(&meeting, "Ana").unwrap().slots.is_empty());
/// ```
pub fn submit_vote<I>(meeting: &Meeting, participant_name: &str, selected_slots: I) -> PollResult<Meeting>
where
    I: IntoIterator<Item = TimeSlot>,
{
    submit_vote_at(meeting, participant_name, selected_slots, Utc::now())
}

/// Same as [`submit_vote`] with an explicit submission time.
pub fn submit_vote_at<I>(
    meeting: &Meeting,
    participant_name: &str,
    selected_slots: I,
    submitted_at: DateTime<Utc>,
) -> PollResult<Meeting>
where
    I: IntoIterator<Item = TimeSlot>,
{
    let vote = new_vote(participant_name, selected_slots, submitted_at)?;
    merge_vote(meeting, vote)
}

/// Builds a vote under the trimmed participant name, collapsing duplicate
/// slots.
pub fn new_vote<I>(
    participant_name: &str,
    selected_slots: I,
    submitted_at: DateTime<Utc>,
) -> PollResult<Vote>
where
    I: IntoIterator<Item = TimeSlot>,
{
    Ok(Vote {
        participant_name: normalize_participant(participant_name)?.to_string(),
        slots: selected_slots.into_iter().collect::<SlotSet>(),
        submitted_at,
    })
}

/// Merges an already built vote into a snapshot, replacing any earlier vote
/// under the same trimmed name. Every other participant's vote is kept.
///
/// Stores call this under their own lock so that concurrent submissions from
/// different participants never overwrite each other.
pub fn merge_vote(meeting: &Meeting, mut vote: Vote) -> PollResult<Meeting> {
    vote.participant_name = normalize_participant(&vote.participant_name)?.to_string();

    let replacing = find_vote(meeting, &vote.participant_name).is_some();
    debug!(
        meeting_id = %meeting.id,
        participant = %vote.participant_name,
        slots = vote.slots.len(),
        replacing,
        "Submitting vote"
    );

    let mut updated = meeting.clone();
    updated.replace_vote(vote);
    Ok(updated)
}

/// Looks up a participant's vote by trimmed, case-sensitive name.
pub fn find_vote<'a>(meeting: &'a Meeting, participant_name: &str) -> Option<&'a Vote> {
    let participant_name = participant_name.trim();
    meeting
        .votes()
        .iter()
        .find(|vote| vote.participant_name == participant_name)
}
