pub mod availability;
pub mod meeting;
pub mod vote;
