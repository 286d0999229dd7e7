use crate::error::boundary::BoundaryError;

use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BridgeError {
    /// The boundary rejected the call. Surfaced exactly as the boundary
    /// reported it.
    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error("Encode Error: {message} {location}")]
    Encode {
        message: String,
        location: ErrorLocation,
    },

    /// The core answered with a value that is not a valid protocol message.
    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    /// A valid response, but not the one the request family calls for.
    #[error("Unexpected Response Error: {message} {location}")]
    UnexpectedResponse {
        message: String,
        location: ErrorLocation,
    },
}

impl BridgeError {
    #[track_caller]
    pub(crate) fn encode(error: serde_json::Error) -> Self {
        BridgeError::Encode {
            message: error.to_string(),
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub(crate) fn decode(error: serde_json::Error) -> Self {
        BridgeError::Decode {
            message: error.to_string(),
            location: ErrorLocation::here(),
        }
    }
}
