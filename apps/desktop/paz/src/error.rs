use common::ErrorLocation;

use pazcore::CoreError;

use serde::Serialize;
use thiserror::Error;

/// Errors returned from Tauri commands.
///
/// Serialized to the webview as `{ "type": ..., "data": { message, location } }`,
/// which is what the UI's `invoke` rejects with.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum PazError {
    /// Error from the desktop host itself
    #[error("Paz Error: {message} {location}")]
    Paz {
        message: String,
        location: ErrorLocation,
    },

    /// The core refused the request
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// The core engine is not running
    #[error("Unavailable Error: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl From<CoreError> for PazError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        let location = ErrorLocation::here();
        match error {
            CoreError::Rejected { message, .. } => PazError::Core { message, location },
            CoreError::Unavailable { message, .. } => PazError::Unavailable { message, location },
        }
    }
}
