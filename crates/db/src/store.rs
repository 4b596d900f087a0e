//! `MeetingStore` backends.
//!
//! - [`postgres::PgMeetingStore`]: networked, shared by every participant.
//! - [`file::FileMeetingStore`]: one JSON document on the local disk.
//! - [`memory::MemoryMeetingStore`]: in-process only, lost on exit.

pub mod file;
pub mod memory;
pub mod postgres;
