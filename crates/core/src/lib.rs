//! # whenmeet core
//!
//! Domain logic of a "when can everyone meet" poll: the slot model, how a
//! participant's selection is reconciled into a meeting, and how votes are
//! aggregated into a heat-map.
//!
//! Everything outside [`store`] and [`service`] is synchronous and works on
//! plain [`models::Meeting`] snapshots passed in by the caller.

pub mod aggregate;
pub mod errors;
pub mod models;
pub mod reconcile;
pub mod selection;
pub mod service;
pub mod store;

pub use aggregate::{participants_who_voted, slot_intensity, slot_vote_count, total_vote_count};
pub use errors::{PollError, PollResult};
pub use reconcile::{find_vote, submit_vote};
