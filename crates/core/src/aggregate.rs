//! # Availability Aggregation
//!
//! Turns a meeting's votes into per-slot counts and heat-map intensities.
//!
//! Intensity is `count / total_votes`, and defined as `0.0` when nobody has
//! voted. Votes may reference days that are no longer candidates; they are
//! counted by the raw lookups but never appear in the display grid.
//!
//! The free functions scan the vote list on every call. [`SlotTally`]
//! precomputes the same numbers for repeated lookups over one snapshot.

use std::{collections::HashMap, ops::RangeInclusive};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Meeting, TimeSlot};

/// Hours shown as rows of the availability grid (08:00 to 22:00).
pub const DISPLAY_HOURS: RangeInclusive<u8> = 8..=22;

/// Number of participants who voted, including empty votes.
pub fn total_vote_count(meeting: &Meeting) -> usize {
    meeting.votes().len()
}

/// Number of votes whose slot set contains `(day, hour)`.
pub fn slot_vote_count(meeting: &Meeting, day: NaiveDate, hour: u8) -> usize {
    meeting
        .votes()
        .iter()
        .filter(|vote| vote.slots.contains_at(day, hour))
        .count()
}

/// Share of participants free at `(day, hour)`, in `[0, 1]`.
pub fn slot_intensity(meeting: &Meeting, day: NaiveDate, hour: u8) -> f64 {
    intensity(slot_vote_count(meeting, day, hour), total_vote_count(meeting))
}

/// Participant names in submission order.
pub fn participants_who_voted(meeting: &Meeting) -> Vec<&str> {
    meeting
        .votes()
        .iter()
        .map(|vote| vote.participant_name.as_str())
        .collect()
}

fn intensity(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Slot counts precomputed from one meeting snapshot.
#[derive(Debug, Clone, Default)]
pub struct SlotTally {
    counts: HashMap<TimeSlot, usize>,
    total_votes: usize,
}

impl SlotTally {
    pub fn from_meeting(meeting: &Meeting) -> Self {
        let mut counts = HashMap::new();
        for vote in meeting.votes() {
            for slot in &vote.slots {
                *counts.entry(*slot).or_insert(0) += 1;
            }
        }

        Self {
            counts,
            total_votes: total_vote_count(meeting),
        }
    }

    pub fn count(&self, day: NaiveDate, hour: u8) -> usize {
        TimeSlot::new(day, hour)
            .ok()
            .and_then(|slot| self.counts.get(&slot).copied())
            .unwrap_or(0)
    }

    pub fn intensity(&self, day: NaiveDate, hour: u8) -> f64 {
        intensity(self.count(day, hour), self.total_votes)
    }

    pub fn total_votes(&self) -> usize {
        self.total_votes
    }

    /// Every slot that received at least one vote, with its count.
    pub fn iter(&self) -> impl Iterator<Item = (&TimeSlot, usize)> {
        self.counts.iter().map(|(slot, count)| (slot, *count))
    }
}

/// One day/hour cell of the heat-map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub day: NaiveDate,
    pub hour: u8,
    pub count: usize,
    pub intensity: f64,
    /// The viewer's own vote includes this cell.
    pub mine: bool,
}

/// All cells for one hour, in candidate-date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub hour: u8,
    pub cells: Vec<GridCell>,
}

/// Heat-map of a meeting: one row per hour, one column per candidate date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityGrid {
    pub meeting_id: Uuid,
    pub title: String,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<GridRow>,
    pub participants: Vec<String>,
    pub total_votes: usize,
}

impl AvailabilityGrid {
    /// Builds one row per hour in `hours` (hours above 23 are dropped) and one
    /// column per candidate date. Cells in `viewer`'s own vote are flagged
    /// as `mine`.
    pub fn build(meeting: &Meeting, hours: RangeInclusive<u8>, viewer: Option<&str>) -> Self {
        let tally = SlotTally::from_meeting(meeting);
        let own_vote = viewer.and_then(|name| crate::reconcile::find_vote(meeting, name));

        let hidden = tally
            .iter()
            .filter(|(slot, _)| !meeting.is_candidate(slot.day()))
            .count();
        if hidden > 0 {
            debug!(
                meeting_id = %meeting.id,
                hidden,
                "Ignoring voted slots outside the candidate dates"
            );
        }

        let rows = hours
            .filter(|hour| *hour <= crate::models::time_slot::MAX_HOUR)
            .map(|hour| GridRow {
                hour,
                cells: meeting
                    .candidate_dates
                    .iter()
                    .map(|&day| GridCell {
                        day,
                        hour,
                        count: tally.count(day, hour),
                        intensity: tally.intensity(day, hour),
                        mine: own_vote.is_some_and(|vote| vote.slots.contains_at(day, hour)),
                    })
                    .collect(),
            })
            .collect();

        Self {
            meeting_id: meeting.id,
            title: meeting.title.clone(),
            dates: meeting.candidate_dates.clone(),
            rows,
            participants: participants_who_voted(meeting)
                .into_iter()
                .map(str::to_string)
                .collect(),
            total_votes: tally.total_votes(),
        }
    }

    /// The cell at `(day, hour)`, if that row and column are shown.
    pub fn cell(&self, day: NaiveDate, hour: u8) -> Option<&GridCell> {
        self.rows
            .iter()
            .find(|row| row.hour == hour)
            .and_then(|row| row.cells.iter().find(|cell| cell.day == day))
    }
}

/// A slot with its vote count, as ranked by [`top_slots`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSlot {
    pub slot: TimeSlot,
    pub count: usize,
    pub intensity: f64,
}

/// The most popular candidate-date slots, best first.
///
/// Only slots with at least one vote are ranked. Ties are broken
/// chronologically.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use whenmeet_core::{aggregate::top_slots, models::{Meeting, TimeSlot}, submit_vote};
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let at = |hour| TimeSlot::new(day, hour).unwrap();
///
/// let meeting = Meeting::new("Dinner", &[day]).unwrap();
/// let meeting = submit_vote(&meeting, "Ana", [at(18), at(19)]).unwrap();
/// let meeting = submit_vote(&meeting, "Bob", [at(19)]).unwrap();
///
/// let best = top_slots(&meeting, 1);
/// assert_eq!(best.len(), 1);
/// assert_eq!(best[0].slot, at(19));
/// assert_eq!(best[0].count, 2);
/// ```
pub fn top_slots(meeting: &Meeting, limit: usize) -> Vec<RankedSlot> {
    let tally = SlotTally::from_meeting(meeting);

    let mut ranked: Vec<RankedSlot> = tally
        .iter()
        .filter(|(slot, _)| meeting.is_candidate(slot.day()))
        .map(|(slot, count)| RankedSlot {
            slot: *slot,
            count,
            intensity: intensity(count, tally.total_votes()),
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.slot.cmp(&b.slot)));
    ranked.truncate(limit);
    ranked
}
