use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{PollError, PollResult};

/// Highest hour of the day a slot can reference.
pub const MAX_HOUR: u8 = 23;

/// One bookable hour on a calendar day.
///
/// Slots are plain values: two slots are equal when both the day and the hour
/// match. The derived ordering is chronological (day first, then hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot")]
pub struct TimeSlot {
    day: NaiveDate,
    hour: u8,
}

#[derive(Deserialize)]
struct RawTimeSlot {
    day: NaiveDate,
    hour: u8,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = PollError;

    fn try_from(raw: RawTimeSlot) -> PollResult<Self> {
        TimeSlot::new(raw.day, raw.hour)
    }
}

impl TimeSlot {
    /// Builds a slot, rejecting hours above [`MAX_HOUR`] with
    /// [`PollError::Validation`].
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use whenmeet_core::models::TimeSlot;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let slot = TimeSlot::new(day, 18).unwrap();
    /// assert_eq!(slot.to_string(), "2024-06-01@18");
    /// assert!(TimeSlot::new(day, 24).is_err());
    /// ```
    pub fn new(day: NaiveDate, hour: u8) -> PollResult<Self> {
        if hour > MAX_HOUR {
            return Err(PollError::Validation(format!(
                "hour must be between 0 and {MAX_HOUR}, got {hour}"
            )));
        }
        Ok(Self { day, hour })
    }

    /// Calendar day of the slot.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Starting hour, `0..=23`.
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Whether this slot is the given day and hour.
    pub fn is_at(&self, day: NaiveDate, hour: u8) -> bool {
        self.day == day && self.hour == hour
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.day.format("%Y-%m-%d"), self.hour)
    }
}

/// Parses the `YYYY-MM-DD@H` form produced by `Display`.
impl FromStr for TimeSlot {
    type Err = PollError;

    fn from_str(s: &str) -> PollResult<Self> {
        let (day, hour) = s
            .trim()
            .split_once('@')
            .ok_or_else(|| PollError::Validation(format!("expected DAY@HOUR, got '{s}'")))?;
        let day = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|e| PollError::Validation(format!("invalid day '{day}': {e}")))?;
        let hour = hour
            .parse::<u8>()
            .map_err(|e| PollError::Validation(format!("invalid hour '{hour}': {e}")))?;
        TimeSlot::new(day, hour)
    }
}

/// Duplicate-free collection of slots that remembers insertion order.
///
/// Order is kept for display only; two sets compare equal when they hold the
/// same slots regardless of order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<TimeSlot>", into = "Vec<TimeSlot>")]
pub struct SlotSet {
    slots: Vec<TimeSlot>,
}

impl SlotSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.slots.contains(slot)
    }

    pub fn contains_at(&self, day: NaiveDate, hour: u8) -> bool {
        self.slots.iter().any(|slot| slot.is_at(day, hour))
    }

    /// Adds `slot` unless already present. Returns whether it was added.
    pub fn insert(&mut self, slot: TimeSlot) -> bool {
        if self.contains(&slot) {
            return false;
        }
        self.slots.push(slot);
        true
    }

    /// Returns whether `slot` was present.
    pub fn remove(&mut self, slot: &TimeSlot) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s != slot);
        self.slots.len() != before
    }

    /// Removes `slot` if present, otherwise adds it. Returns whether the slot
    /// is selected afterwards.
    pub fn toggle(&mut self, slot: TimeSlot) -> bool {
        if self.remove(&slot) {
            false
        } else {
            self.slots.push(slot);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter()
    }

    pub fn as_slice(&self) -> &[TimeSlot] {
        &self.slots
    }
}

impl PartialEq for SlotSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().collect::<BTreeSet<_>>() == other.iter().collect::<BTreeSet<_>>()
    }
}

impl Eq for SlotSet {}

impl FromIterator<TimeSlot> for SlotSet {
    fn from_iter<I: IntoIterator<Item = TimeSlot>>(iter: I) -> Self {
        let mut set = SlotSet::new();
        for slot in iter {
            set.insert(slot);
        }
        set
    }
}

impl From<Vec<TimeSlot>> for SlotSet {
    fn from(slots: Vec<TimeSlot>) -> Self {
        slots.into_iter().collect()
    }
}

impl From<SlotSet> for Vec<TimeSlot> {
    fn from(set: SlotSet) -> Self {
        set.slots
    }
}

impl<'a> IntoIterator for &'a SlotSet {
    type Item = &'a TimeSlot;
    type IntoIter = std::slice::Iter<'a, TimeSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
