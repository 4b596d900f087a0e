pub mod meeting;
pub mod vote;
