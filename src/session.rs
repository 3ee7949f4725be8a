//! Dashboard session state.
//!
//! Everything the processing page shows is derived from a [`Dashboard`],
//! which changes only through [`Dashboard::handle`]. The browser front end
//! and the `dash-replay` tool feed it the same [`Event`]s, so what the
//! operator sees can be reproduced from a recorded push-channel transcript.
//!
//! Lifecycle:
//! ```text
//! Upload page --Started--> Processing (running)
//!     running --complete--> finished, succeeded
//!     running --error | upload failure | cancel ack | channel error--> finished, failed
//!     finished --upload accepted | cancel ack--> unchanged
//!     finished --Acknowledged--> Upload page
//! ```

use tracing::debug;

use crate::activity_log::ActivityLog;
use crate::message::{LogLevel, PushMessage, UploadResponse};
use crate::progress::{Progress, classify};

/// Which page is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Upload,
    Processing,
}

/// How a finished job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// Success / failure counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub success: u64,
    pub failed: u64,
    pub total: u64,
}

/// Something that happened to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The form was submitted and the upload is about to be sent.
    Started,
    /// The backend accepted the upload.
    UploadAccepted {
        response: UploadResponse,
        file_name: String,
        output_dir: String,
    },
    /// The upload request failed.
    UploadFailed(String),
    ChannelOpened,
    ChannelError,
    ChannelClosed,
    /// A frame arrived on the push channel.
    Push(PushMessage),
    /// The backend acknowledged a cancel request.
    CancelAcknowledged,
    /// The cancel request failed; the job keeps running.
    CancelFailed(String),
    /// The operator dismissed a finished job.
    Acknowledged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    page: Page,
    processing: bool,
    task_id: Option<String>,
    progress: Progress,
    stats: Stats,
    log: ActivityLog,
    outcome: Option<Outcome>,
    default_output_dir: String,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new("./output")
    }
}

impl Dashboard {
    /// `default_output_dir` is what the log shows when the directory is blank.
    pub fn new(default_output_dir: impl Into<String>) -> Self {
        Self {
            page: Page::Upload,
            processing: false,
            task_id: None,
            progress: Progress::default(),
            stats: Stats::default(),
            log: ActivityLog::new(),
            outcome: None,
            default_output_dir: default_output_dir.into(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Cancel button visibility.
    pub fn cancel_visible(&self) -> bool {
        self.outcome.is_none()
    }

    /// Finish button visibility.
    pub fn finish_visible(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether a cancel request makes sense right now.
    pub fn can_cancel(&self) -> bool {
        self.processing
    }

    /// The push channel has no further use once the job has finished.
    pub fn wants_channel_closed(&self) -> bool {
        self.outcome.is_some()
    }

    /// Apply one event. `at` stamps any log lines it adds.
    pub fn handle(&mut self, event: Event, at: &str) {
        match event {
            Event::Started => {
                self.reset();
                self.page = Page::Processing;
                self.processing = true;
            }
            Event::UploadAccepted {
                response,
                file_name,
                output_dir,
            } => self.upload_accepted(response, &file_name, &output_dir, at),
            Event::UploadFailed(reason) => {
                self.log.push(at, LogLevel::Error, format!("❌ Error: {}", reason));
                self.finish(Outcome::Failed);
            }
            Event::ChannelOpened => {
                self.log.push(at, LogLevel::Info, "🔌 Connected to server");
            }
            Event::ChannelError => {
                self.log.push(at, LogLevel::Error, "❌ Connection error");
                if self.processing {
                    self.finish(Outcome::Failed);
                }
            }
            Event::ChannelClosed => {
                if self.processing {
                    self.log
                        .push(at, LogLevel::Warning, "🔌 Disconnected from server");
                }
            }
            Event::Push(message) => self.apply(message, at),
            Event::CancelAcknowledged if self.processing => {
                self.log
                    .push(at, LogLevel::Warning, "❌ Process cancelled by user");
                self.finish(Outcome::Failed);
            }
            Event::CancelAcknowledged => {
                debug!("cancel acknowledged after the job finished");
            }
            Event::CancelFailed(reason) => {
                self.log
                    .push(at, LogLevel::Error, format!("❌ Error cancelling: {}", reason));
            }
            Event::Acknowledged => {
                self.page = Page::Upload;
                self.reset();
            }
        }
    }

    fn upload_accepted(&mut self, response: UploadResponse, file_name: &str, output_dir: &str, at: &str) {
        // A job that already ended (channel error, cancel) stays ended.
        if !self.processing {
            debug!(task_id = %response.task_id, "upload accepted for a finished job");
            return;
        }
        self.task_id = Some(response.task_id);

        let shown_dir = if output_dir.is_empty() {
            self.default_output_dir.as_str()
        } else {
            output_dir
        };
        self.log
            .push(at, LogLevel::Info, "⏳ Starting extraction process...");
        self.log
            .push(at, LogLevel::Info, format!("📂 File: {}", file_name));
        self.log
            .push(at, LogLevel::Info, format!("💾 Output directory: {}", shown_dir));
        if let Some(user_type) = response.user_type.filter(|t| !t.is_empty()) {
            self.log
                .push(at, LogLevel::Info, format!("👤 Subtype: {}", user_type));
        }

        self.stats.total = response.total_accounts.unwrap_or(0);
    }

    fn apply(&mut self, message: PushMessage, at: &str) {
        match message {
            PushMessage::Progress {
                current,
                total,
                message,
            } => {
                self.progress = Progress::new(current, total);
                if let Some(text) = message.filter(|m| !m.is_empty()) {
                    let level = classify(&text);
                    self.log.push(at, level, text);
                }
            }
            PushMessage::Log { message, level } => {
                self.log.push(at, level.unwrap_or_default(), message);
            }
            PushMessage::Stats {
                success,
                failed,
                total,
            } => {
                self.stats = Stats {
                    success,
                    failed,
                    total,
                };
            }
            PushMessage::Complete {
                success,
                failed,
                total,
                output_file,
            } => {
                self.stats = Stats {
                    success,
                    failed,
                    total,
                };
                self.log
                    .push(at, LogLevel::Success, "✅ Processing complete!");
                self.log.push(
                    at,
                    LogLevel::Info,
                    format!(
                        "📊 Summary: Success: {}, Failed: {}, Total: {}",
                        success, failed, total
                    ),
                );
                if let Some(file) = output_file.filter(|f| !f.is_empty()) {
                    self.log
                        .push(at, LogLevel::Success, format!("📂 Output saved to: {}", file));
                }
                self.finish(Outcome::Succeeded);
            }
            PushMessage::Error { message } => {
                self.log
                    .push(at, LogLevel::Error, format!("❌ Error: {}", message));
                self.finish(Outcome::Failed);
            }
            PushMessage::Unknown => {
                debug!("ignoring push message of unknown type");
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        debug!(?outcome, task_id = ?self.task_id, "session finished");
        self.processing = false;
        self.outcome = Some(outcome);
    }

    /// Clear progress, counters and log for a new job. The page is kept.
    pub fn reset(&mut self) {
        self.processing = false;
        self.task_id = None;
        self.progress = Progress::default();
        self.stats = Stats::default();
        self.log.clear();
        self.outcome = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: &str = "12:00:00";

    fn accepted(total: Option<u64>) -> Event {
        Event::UploadAccepted {
            response: UploadResponse {
                task_id: "task-1".to_string(),
                total_accounts: total,
                user_type: None,
                output_dir: None,
            },
            file_name: "accounts.xlsx".to_string(),
            output_dir: "/srv/out".to_string(),
        }
    }

    fn running() -> Dashboard {
        let mut dash = Dashboard::default();
        dash.handle(Event::Started, AT);
        dash.handle(accepted(Some(5)), AT);
        dash
    }

    fn messages(dash: &Dashboard) -> Vec<&str> {
        dash.log()
            .entries()
            .iter()
            .map(|e| e.message.as_str())
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let dash = Dashboard::default();
        assert_eq!(dash.page(), Page::Upload);
        assert!(!dash.is_processing());
        assert!(!dash.can_cancel());
        assert!(dash.cancel_visible());
        assert!(!dash.finish_visible());
    }

    #[test]
    fn test_started_shows_processing_page() {
        let mut dash = Dashboard::default();
        dash.handle(Event::Started, AT);
        assert_eq!(dash.page(), Page::Processing);
        assert!(dash.is_processing());
        assert!(dash.log().is_empty());
    }

    #[test]
    fn test_upload_accepted_logs_and_sets_total() {
        let dash = running();
        assert_eq!(dash.task_id(), Some("task-1"));
        assert_eq!(dash.stats().total, 5);
        assert_eq!(
            messages(&dash),
            vec![
                "⏳ Starting extraction process...",
                "📂 File: accounts.xlsx",
                "💾 Output directory: /srv/out",
            ]
        );
    }

    #[test]
    fn test_upload_accepted_blank_dir_and_subtype() {
        let mut dash = Dashboard::default();
        dash.handle(Event::Started, AT);
        dash.handle(
            Event::UploadAccepted {
                response: UploadResponse {
                    task_id: "t".to_string(),
                    total_accounts: None,
                    user_type: Some("MUSCAT".to_string()),
                    output_dir: None,
                },
                file_name: "a.csv".to_string(),
                output_dir: String::new(),
            },
            AT,
        );
        assert_eq!(dash.stats().total, 0);
        let lines = messages(&dash);
        assert_eq!(lines[2], "💾 Output directory: ./output");
        assert_eq!(lines[3], "👤 Subtype: MUSCAT");
    }

    #[test]
    fn test_upload_failed_finishes_unsuccessfully() {
        let mut dash = Dashboard::default();
        dash.handle(Event::Started, AT);
        dash.handle(Event::UploadFailed("File upload failed".to_string()), AT);
        assert_eq!(dash.outcome(), Some(Outcome::Failed));
        assert!(!dash.is_processing());
        assert!(!dash.cancel_visible());
        assert!(dash.finish_visible());
        assert_eq!(dash.page(), Page::Processing);
        let last = dash.log().last().unwrap();
        assert_eq!(last.message, "❌ Error: File upload failed");
        assert_eq!(last.level, LogLevel::Error);
    }

    #[test]
    fn test_progress_updates_and_classifies() {
        let mut dash = running();
        dash.handle(
            Event::Push(PushMessage::Progress {
                current: 2,
                total: 5,
                message: Some("❌ Failed to process account: 42".to_string()),
            }),
            AT,
        );
        assert_eq!(dash.progress(), Progress::new(2, 5));
        assert_eq!(dash.progress().percentage(), 40);
        let last = dash.log().last().unwrap();
        assert_eq!(last.level, LogLevel::Error);
    }

    #[test]
    fn test_progress_without_message_adds_no_log() {
        let mut dash = running();
        let before = dash.log().len();
        dash.handle(
            Event::Push(PushMessage::Progress {
                current: 1,
                total: 5,
                message: None,
            }),
            AT,
        );
        assert_eq!(dash.log().len(), before);
    }

    #[test]
    fn test_log_message_default_level() {
        let mut dash = running();
        dash.handle(
            Event::Push(PushMessage::Log {
                message: "customer found".to_string(),
                level: None,
            }),
            "12:00:05",
        );
        let last = dash.log().last().unwrap();
        assert_eq!(last.level, LogLevel::Info);
        assert_eq!(last.text(), "[12:00:05] customer found");
    }

    #[test]
    fn test_stats_update_counters() {
        let mut dash = running();
        dash.handle(
            Event::Push(PushMessage::Stats {
                success: 2,
                failed: 1,
                total: 5,
            }),
            AT,
        );
        assert_eq!(
            dash.stats(),
            Stats {
                success: 2,
                failed: 1,
                total: 5
            }
        );
        assert!(dash.is_processing());
    }

    #[test]
    fn test_complete_renders_counts_and_hides_cancel() {
        let mut dash = running();
        dash.handle(
            Event::Push(PushMessage::Complete {
                success: 3,
                failed: 2,
                total: 5,
                output_file: Some("/srv/out/MUSCAT_Oct_2026.csv".to_string()),
            }),
            AT,
        );
        assert_eq!(
            dash.stats(),
            Stats {
                success: 3,
                failed: 2,
                total: 5
            }
        );
        assert_eq!(dash.outcome(), Some(Outcome::Succeeded));
        assert!(!dash.cancel_visible());
        assert!(dash.finish_visible());
        assert!(dash.wants_channel_closed());

        let lines = messages(&dash);
        let tail = &lines[lines.len() - 3..];
        assert_eq!(
            tail,
            [
                "✅ Processing complete!",
                "📊 Summary: Success: 3, Failed: 2, Total: 5",
                "📂 Output saved to: /srv/out/MUSCAT_Oct_2026.csv",
            ]
        );
    }

    #[test]
    fn test_complete_without_output_file() {
        let mut dash = running();
        dash.handle(
            Event::Push(PushMessage::Complete {
                success: 5,
                failed: 0,
                total: 5,
                output_file: None,
            }),
            AT,
        );
        let last = dash.log().last().unwrap();
        assert_eq!(last.message, "📊 Summary: Success: 5, Failed: 0, Total: 5");
    }

    #[test]
    fn test_error_message_finishes_unsuccessfully() {
        let mut dash = running();
        dash.handle(
            Event::Push(PushMessage::Error {
                message: "Task not found".to_string(),
            }),
            AT,
        );
        assert_eq!(dash.outcome(), Some(Outcome::Failed));
        assert_eq!(dash.log().last().unwrap().message, "❌ Error: Task not found");
    }

    #[test]
    fn test_unknown_message_ignored() {
        let mut dash = running();
        let before = dash.clone();
        dash.handle(Event::Push(PushMessage::Unknown), AT);
        assert_eq!(dash, before);
    }

    #[test]
    fn test_channel_lifecycle_logs() {
        let mut dash = running();
        dash.handle(Event::ChannelOpened, AT);
        assert_eq!(dash.log().last().unwrap().message, "🔌 Connected to server");

        dash.handle(Event::ChannelClosed, AT);
        let last = dash.log().last().unwrap();
        assert_eq!(last.message, "🔌 Disconnected from server");
        assert_eq!(last.level, LogLevel::Warning);
        assert!(dash.is_processing());
    }

    #[test]
    fn test_close_after_finish_is_silent() {
        let mut dash = running();
        dash.handle(
            Event::Push(PushMessage::Error {
                message: "boom".to_string(),
            }),
            AT,
        );
        let before = dash.log().len();
        dash.handle(Event::ChannelClosed, AT);
        assert_eq!(dash.log().len(), before);
    }

    #[test]
    fn test_channel_error_finishes_running_job() {
        let mut dash = running();
        dash.handle(Event::ChannelError, AT);
        assert_eq!(dash.outcome(), Some(Outcome::Failed));
        assert_eq!(dash.log().last().unwrap().message, "❌ Connection error");
    }

    #[test]
    fn test_channel_error_after_success_keeps_outcome() {
        let mut dash = running();
        dash.handle(
            Event::Push(PushMessage::Complete {
                success: 1,
                failed: 0,
                total: 1,
                output_file: None,
            }),
            AT,
        );
        dash.handle(Event::ChannelError, AT);
        assert_eq!(dash.outcome(), Some(Outcome::Succeeded));
    }

    #[test]
    fn test_cancel_acknowledged() {
        let mut dash = running();
        assert!(dash.can_cancel());
        dash.handle(Event::CancelAcknowledged, AT);
        assert!(!dash.can_cancel());
        assert_eq!(dash.outcome(), Some(Outcome::Failed));
        let last = dash.log().last().unwrap();
        assert_eq!(last.message, "❌ Process cancelled by user");
        assert_eq!(last.level, LogLevel::Warning);
    }

    #[test]
    fn test_cancel_ack_after_complete_keeps_success() {
        let mut dash = running();
        dash.handle(
            Event::Push(PushMessage::Complete {
                success: 5,
                failed: 0,
                total: 5,
                output_file: None,
            }),
            AT,
        );
        let before = dash.log().len();
        dash.handle(Event::CancelAcknowledged, AT);
        assert_eq!(dash.outcome(), Some(Outcome::Succeeded));
        assert_eq!(dash.log().len(), before);
        assert_eq!(
            dash.log().last().unwrap().message,
            "📊 Summary: Success: 5, Failed: 0, Total: 5"
        );
    }

    #[test]
    fn test_upload_accepted_after_channel_error_is_ignored() {
        let mut dash = Dashboard::default();
        dash.handle(Event::Started, AT);
        dash.handle(Event::ChannelError, AT);
        dash.handle(accepted(Some(5)), AT);
        assert_eq!(dash.outcome(), Some(Outcome::Failed));
        assert_eq!(messages(&dash), vec!["❌ Connection error"]);
        assert_eq!(dash.task_id(), None);
        assert_eq!(dash.stats().total, 0);
    }

    #[test]
    fn test_channel_error_right_after_accept_logs_in_order() {
        let mut dash = running();
        dash.handle(Event::ChannelError, AT);
        assert_eq!(
            messages(&dash),
            vec![
                "⏳ Starting extraction process...",
                "📂 File: accounts.xlsx",
                "💾 Output directory: /srv/out",
                "❌ Connection error",
            ]
        );
        assert_eq!(dash.task_id(), Some("task-1"));
    }

    #[test]
    fn test_cancel_failed_keeps_running() {
        let mut dash = running();
        dash.handle(
            Event::CancelFailed("Failed to cancel process".to_string()),
            AT,
        );
        assert!(dash.is_processing());
        assert!(dash.cancel_visible());
        assert_eq!(
            dash.log().last().unwrap().message,
            "❌ Error cancelling: Failed to cancel process"
        );
    }

    #[test]
    fn test_acknowledged_returns_to_upload_page() {
        let mut dash = running();
        dash.handle(Event::CancelAcknowledged, AT);
        dash.handle(Event::Acknowledged, AT);
        assert_eq!(dash.page(), Page::Upload);
        assert!(dash.log().is_empty());
        assert_eq!(dash.stats(), Stats::default());
        assert_eq!(dash.task_id(), None);
        assert!(dash.cancel_visible());
        assert!(!dash.finish_visible());
    }

    #[test]
    fn test_restart_clears_previous_job() {
        let mut dash = running();
        dash.handle(
            Event::Push(PushMessage::Progress {
                current: 4,
                total: 5,
                message: None,
            }),
            AT,
        );
        dash.handle(Event::Started, AT);
        assert_eq!(dash.progress(), Progress::default());
        assert!(dash.log().is_empty());
        assert!(dash.is_processing());
    }
}
