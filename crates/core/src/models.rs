pub mod meeting;
pub mod time_slot;
pub mod vote;

pub use meeting::Meeting;
pub use time_slot::{SlotSet, TimeSlot};
pub use vote::Vote;
