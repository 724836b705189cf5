//! Error types for eventdesk.

use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur while talking to the events collection.
#[derive(Error, Debug)]
pub enum EventDeskError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("{0}")]
    Validation(String),

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EventDeskError {
    /// True for failures the user caused and can fix by changing input.
    pub fn is_validation(&self) -> bool {
        matches!(self, EventDeskError::Validation(_))
    }
}

impl From<reqwest::Error> for EventDeskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EventDeskError::Decode(err.to_string())
        } else {
            EventDeskError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for EventDeskError {
    fn from(err: serde_json::Error) -> Self {
        EventDeskError::Decode(err.to_string())
    }
}

/// Result type alias for eventdesk operations.
pub type EventDeskResult<T> = Result<T, EventDeskError>;
