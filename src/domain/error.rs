/// Every failure an operation can surface. Messages are meant to be shown as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// The referenced entity id does not exist, e.g. "Payout not found".
    #[error("{0}")]
    NotFound(String),

    /// The entity exists but is not in a state that allows the action.
    #[error("{0}")]
    InvalidTransition(String),

    /// The request payload was rejected, e.g. a non-positive amount.
    #[error("{0}")]
    Validation(String),

    #[error("Storage failed with: {0}")]
    Storage(String),

    #[error("Transport failed with: {0}")]
    Transport(String),
}

impl Error {
    pub fn not_found(entity: &str) -> Self {
        Error::NotFound(format!("{entity} not found"))
    }
}
