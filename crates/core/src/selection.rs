//! # Slot Selection
//!
//! Client-side working state while a participant picks slots. Nothing here is
//! persisted until [`VotingSession::submit`] hands the working set to
//! [`crate::reconcile::submit_vote`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    errors::PollResult,
    models::{Meeting, SlotSet, TimeSlot, Vote},
    reconcile,
};

/// A participant's unsaved set of selected slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSelection {
    slots: SlotSet,
}

impl SlotSelection {
    /// Starts from an existing vote, or empty when there is none.
    pub fn seeded_from(vote: Option<&Vote>) -> Self {
        Self {
            slots: vote.map(|v| v.slots.clone()).unwrap_or_default(),
        }
    }

    /// Flips one cell. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, day: NaiveDate, hour: u8) -> PollResult<bool> {
        let slot = TimeSlot::new(day, hour)?;
        Ok(self.slots.toggle(slot))
    }

    /// Whether `(day, hour)` is in the working set.
    pub fn is_selected(&self, day: NaiveDate, hour: u8) -> bool {
        self.slots.contains_at(day, hour)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }
}

/// What a meeting page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Picking slots; toggles are accepted.
    Selecting,
    /// One-time confirmation right after a successful submit.
    JustConfirmed,
    /// Aggregated results.
    ViewingResults,
}

/// One participant's visit to a meeting page.
///
/// Opening a meeting the participant already voted on goes straight to
/// results. A successful submit shows the confirmation once; leaving it moves
/// to results.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use whenmeet_core::{
///     models::Meeting,
///     selection::{ViewMode, VotingSession},
/// };
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let meeting = Meeting::new("Dinner", &[day]).unwrap();
///
/// let mut session = VotingSession::open(&meeting, None);
/// assert_eq!(session.mode(), ViewMode::Selecting);
/// assert!(session.toggle(day, 18).unwrap());
///
/// let meeting = session.submit(&meeting, "Ana").unwrap();
/// assert_eq!(session.mode(), ViewMode::JustConfirmed);
/// assert_eq!(meeting.votes().len(), 1);
///
/// session.view_results();
/// assert_eq!(session.mode(), ViewMode::ViewingResults);
/// ```
#[derive(Debug, Clone)]
pub struct VotingSession {
    mode: ViewMode,
    committed: SlotSelection,
    working: SlotSelection,
    has_voted: bool,
}

impl VotingSession {
    /// Starts a visit for `identity`, seeded from their existing vote.
    pub fn open(meeting: &Meeting, identity: Option<&str>) -> Self {
        let existing = identity.and_then(|name| reconcile::find_vote(meeting, name));
        let committed = SlotSelection::seeded_from(existing);

        Self {
            mode: if existing.is_some() {
                ViewMode::ViewingResults
            } else {
                ViewMode::Selecting
            },
            working: committed.clone(),
            committed,
            has_voted: existing.is_some(),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn has_voted(&self) -> bool {
        self.has_voted
    }

    /// Selection including unsaved toggles.
    pub fn working(&self) -> &SlotSelection {
        &self.working
    }

    /// Selection as last submitted.
    pub fn committed(&self) -> &SlotSelection {
        &self.committed
    }

    /// Flips a cell of the working set. Ignored outside [`ViewMode::Selecting`];
    /// returns whether the toggle was applied.
    pub fn toggle(&mut self, day: NaiveDate, hour: u8) -> PollResult<bool> {
        if self.mode != ViewMode::Selecting {
            return Ok(false);
        }
        self.working.toggle(day, hour)?;
        Ok(true)
    }

    /// Re-enters selection, starting over from the committed vote.
    pub fn edit(&mut self) {
        self.working = self.committed.clone();
        self.mode = ViewMode::Selecting;
    }

    /// Throws away unsaved toggles.
    pub fn cancel(&mut self) {
        self.working = self.committed.clone();
        if self.has_voted {
            self.mode = ViewMode::ViewingResults;
        }
    }

    /// Submits the working set under `participant_name`.
    ///
    /// On error the session is left exactly as it was.
    pub fn submit(&mut self, meeting: &Meeting, participant_name: &str) -> PollResult<Meeting> {
        let updated = reconcile::submit_vote(
            meeting,
            participant_name,
            self.working.slots().iter().copied(),
        )?;

        self.committed = self.working.clone();
        self.has_voted = true;
        self.mode = ViewMode::JustConfirmed;
        Ok(updated)
    }

    /// Leaves the one-time confirmation for the results view.
    pub fn view_results(&mut self) {
        if self.mode == ViewMode::JustConfirmed {
            self.mode = ViewMode::ViewingResults;
        }
    }
}
