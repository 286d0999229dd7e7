use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failure reported by the call/listen primitive itself.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum BoundaryError {
    /// The other side answered with an error (business rule, unknown command,
    /// payload it could not read).
    #[error("Rejected Error: {message} {location}")]
    Rejected {
        message: String,
        location: ErrorLocation,
    },

    /// Nothing is listening on the other side.
    #[error("Unavailable Error: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl BoundaryError {
    #[track_caller]
    pub fn rejected(message: impl Into<String>) -> Self {
        BoundaryError::Rejected {
            message: message.into(),
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        BoundaryError::Unavailable {
            message: message.into(),
            location: ErrorLocation::here(),
        }
    }
}
