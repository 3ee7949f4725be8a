//! Error types for the dashboard.

use thiserror::Error;

/// Errors surfaced to the user by the dashboard.
///
/// The `Display` text of each variant is what ends up in the activity log
/// or in an alert, so it is written for the operator, not for developers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The upload form was submitted without a file.
    #[error("Please select a file")]
    MissingFile,

    /// The upload form was submitted with a blank output directory.
    #[error("Please enter an output directory")]
    MissingOutputDir,

    /// A push-channel frame could not be decoded.
    #[error("malformed push message: {0}")]
    MalformedMessage(String),

    /// The backend answered the upload with a non-2xx status.
    #[error("File upload failed{}", reason_suffix(.reason))]
    UploadRejected { status: u16, reason: Option<String> },

    /// The backend answered the cancel request with a non-2xx status.
    #[error("Failed to cancel process{}", reason_suffix(.reason))]
    CancelRejected { status: u16, reason: Option<String> },

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) if !reason.trim().is_empty() => format!(": {}", reason.trim()),
        _ => String::new(),
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::MalformedMessage(err.to_string())
    }
}
