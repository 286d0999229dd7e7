use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CoreError {
    /// The request was well-formed but violates a business rule.
    #[error("Rejected Error: {message} {location}")]
    Rejected {
        message: String,
        location: ErrorLocation,
    },

    /// The engine loop is not running or dropped the reply.
    #[error("Unavailable Error: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    #[track_caller]
    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        CoreError::Rejected {
            message: message.into(),
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub(crate) fn unavailable(message: impl Into<String>) -> Self {
        CoreError::Unavailable {
            message: message.into(),
            location: ErrorLocation::here(),
        }
    }
}
