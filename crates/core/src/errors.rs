use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PollError {
    #[error("Invalid participant: {0}")]
    InvalidParticipant(String),

    #[error("Meeting not found: {0}")]
    MeetingNotFound(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to persist meeting: {0}")]
    StoreWriteFailure(eyre::Report),

    #[error("Storage error: {0}")]
    Store(#[from] eyre::Report),
}

pub type PollResult<T> = Result<T, PollError>;
