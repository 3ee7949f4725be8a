//! Wire types exchanged with the extraction backend.
//!
//! HTTP:
//! - `POST /api/upload` (multipart `file`, `output_dir`) answers [`UploadResponse`]
//! - `POST /api/cancel` takes [`CancelRequest`] and answers [`CancelAck`]
//! - non-2xx answers carry an [`ApiErrorBody`]
//!
//! Push channel frames are JSON objects discriminated by `type`, see
//! [`PushMessage`].

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Successful answer to an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub task_id: String,
    #[serde(default)]
    pub total_accounts: Option<u64>,
    /// Account subtype the backend detected in the spreadsheet.
    #[serde(default)]
    pub user_type: Option<String>,
    /// Output directory as resolved by the backend (absolute).
    #[serde(default)]
    pub output_dir: Option<String>,
}

/// Body of a cancel request. `task_id` is `null` when no task is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub task_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CancelAck {
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body the backend attaches to non-2xx answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Severity of an activity log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Success,
    Warning,
    Error,
    /// Also what any unrecognised level decodes to.
    #[default]
    #[serde(other)]
    Info,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

/// A frame received on the push channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PushMessage {
    Progress {
        current: u64,
        total: u64,
        #[serde(default)]
        message: Option<String>,
    },
    Log {
        message: String,
        #[serde(default)]
        level: Option<LogLevel>,
    },
    Stats {
        success: u64,
        failed: u64,
        total: u64,
    },
    Complete {
        success: u64,
        failed: u64,
        total: u64,
        #[serde(default)]
        output_file: Option<String>,
    },
    Error {
        message: String,
    },
    /// Any `type` this dashboard does not know about.
    #[serde(other)]
    Unknown,
}

impl PushMessage {
    /// Decode one text frame.
    pub fn decode(text: &str) -> Result<Self, DashboardError> {
        Ok(serde_json::from_str(text)?)
    }

    /// `complete` and `error` end the job.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PushMessage::Complete { .. } | PushMessage::Error { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PushMessage::Progress { .. } => "progress",
            PushMessage::Log { .. } => "log",
            PushMessage::Stats { .. } => "stats",
            PushMessage::Complete { .. } => "complete",
            PushMessage::Error { .. } => "error",
            PushMessage::Unknown => "unknown",
        }
    }
}

/// Pull the `error` field out of a non-2xx body, if it has one.
pub fn error_reason(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_progress_with_message() {
        let msg =
            PushMessage::decode(r#"{"type":"progress","current":2,"total":5,"message":"⏳ Processing..."}"#)
                .unwrap();
        assert_eq!(
            msg,
            PushMessage::Progress {
                current: 2,
                total: 5,
                message: Some("⏳ Processing...".to_string()),
            }
        );
        assert!(!msg.is_terminal());
    }

    #[test]
    fn test_decode_progress_without_message() {
        let msg = PushMessage::decode(r#"{"type":"progress","current":0,"total":0}"#).unwrap();
        assert!(matches!(msg, PushMessage::Progress { message: None, .. }));
    }

    #[test]
    fn test_decode_log_levels() {
        let msg = PushMessage::decode(r#"{"type":"log","message":"hi","level":"warning"}"#).unwrap();
        assert_eq!(
            msg,
            PushMessage::Log {
                message: "hi".to_string(),
                level: Some(LogLevel::Warning),
            }
        );

        let msg = PushMessage::decode(r#"{"type":"log","message":"hi"}"#).unwrap();
        assert!(matches!(msg, PushMessage::Log { level: None, .. }));
    }

    #[test]
    fn test_decode_unknown_level_is_info() {
        let msg = PushMessage::decode(r#"{"type":"log","message":"x","level":"debug"}"#).unwrap();
        assert!(matches!(
            msg,
            PushMessage::Log {
                level: Some(LogLevel::Info),
                ..
            }
        ));
        assert_eq!(serde_json::to_string(&LogLevel::Info).unwrap(), r#""info""#);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_decode_complete_with_null_output_file() {
        let msg = PushMessage::decode(
            r#"{"type":"complete","success":3,"failed":2,"total":5,"output_file":null}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            PushMessage::Complete {
                success: 3,
                failed: 2,
                total: 5,
                output_file: None,
            }
        );
        assert!(msg.is_terminal());
    }

    #[test]
    fn test_decode_error_is_terminal() {
        let msg = PushMessage::decode(r#"{"type":"error","message":"Task not found"}"#).unwrap();
        assert!(msg.is_terminal());
        assert_eq!(msg.kind(), "error");
    }

    #[test]
    fn test_decode_unknown_type() {
        let msg = PushMessage::decode(r#"{"type":"heartbeat"}"#).unwrap();
        assert_eq!(msg, PushMessage::Unknown);
        assert!(!msg.is_terminal());
    }

    #[test]
    fn test_decode_malformed() {
        let err = PushMessage::decode("not json").unwrap_err();
        assert!(matches!(err, DashboardError::MalformedMessage(_)));

        let err = PushMessage::decode(r#"{"type":"stats","success":1}"#).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedMessage(_)));
    }

    #[test]
    fn test_upload_response_optional_fields() {
        let resp: UploadResponse = serde_json::from_str(r#"{"task_id":"abc"}"#).unwrap();
        assert_eq!(resp.task_id, "abc");
        assert_eq!(resp.total_accounts, None);

        let resp: UploadResponse = serde_json::from_str(
            r#"{"task_id":"abc","total_accounts":12,"user_type":"MUSCAT","output_dir":"/tmp/out"}"#,
        )
        .unwrap();
        assert_eq!(resp.total_accounts, Some(12));
        assert_eq!(resp.user_type.as_deref(), Some("MUSCAT"));
    }

    #[test]
    fn test_cancel_request_serializes_null_task() {
        let body = serde_json::to_string(&CancelRequest { task_id: None }).unwrap();
        assert_eq!(body, r#"{"task_id":null}"#);
    }

    #[test]
    fn test_error_reason() {
        assert_eq!(
            error_reason(r#"{"error":"Task not found"}"#).as_deref(),
            Some("Task not found")
        );
        assert_eq!(error_reason("<html>oops</html>"), None);
    }
}
