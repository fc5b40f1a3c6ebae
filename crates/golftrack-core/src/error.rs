use thiserror::Error;

#[derive(Debug, Error)]
pub enum GolfError {
    #[error("course not found: {0}")]
    CourseNotFound(String),

    #[error("round not found: {0}")]
    RoundNotFound(String),

    #[error("round {0} is already completed")]
    RoundCompleted(String),

    #[error("no round in progress")]
    NoActiveRound,

    #[error("invalid course: {0}")]
    InvalidCourse(String),

    #[error("invalid score: {0}")]
    InvalidScore(String),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type GolfResult<T> = Result<T, GolfError>;
