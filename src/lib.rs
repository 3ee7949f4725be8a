//! # tasdeed-dashboard
//!
//! Core of the Tasdeed extraction dashboard: the browser front end that
//! uploads an account spreadsheet to the extraction backend and follows the
//! job over a WebSocket push channel.
//!
//! This crate holds everything that does not need a browser:
//! - wire types for the upload/cancel endpoints and push frames
//! - upload form validation
//! - the session state machine that maps push frames to what the
//!   processing page shows
//! - progress arithmetic, the activity log and output-path helpers
//!
//! The `wasm-ui` crate binds it to the DOM, and the `dash-replay` binary
//! replays recorded transcripts through the same state machine.
//!
//! ## Example
//!
//! ```
//! use tasdeed_dashboard::{Dashboard, Event, PushMessage};
//!
//! let mut dash = Dashboard::default();
//! dash.handle(Event::Started, "09:00:00");
//!
//! let frame = r#"{"type":"complete","success":3,"failed":2,"total":5}"#;
//! dash.handle(Event::Push(PushMessage::decode(frame).unwrap()), "09:01:00");
//!
//! assert_eq!(dash.stats().success, 3);
//! assert!(!dash.cancel_visible());
//! ```

pub mod activity_log;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod message;
pub mod output_path;
pub mod progress;
pub mod replay;
pub mod session;

pub use activity_log::{ActivityLog, LogEntry, format_time_of_day};
pub use config::DashboardConfig;
pub use endpoint::push_channel_url;
pub use error::DashboardError;
pub use form::{UploadForm, ValidUpload};
pub use message::{
    ApiErrorBody, CancelAck, CancelRequest, LogLevel, PushMessage, UploadResponse, error_reason,
};
pub use output_path::{
    Platform, example_placeholder, is_firefox, merge_picked_directory, suggested_output_dir,
};
pub use progress::{Progress, bar_width, classify, percentage, progress_label};
pub use replay::{ReplayReport, ReplaySeed, replay};
pub use session::{Dashboard, Event, Outcome, Page, Stats};
