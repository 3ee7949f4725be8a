//! Replay a recorded push-channel transcript through a [`Dashboard`].
//!
//! A transcript is one JSON push frame per line, as the backend sends them.
//! Blank lines are skipped and undecodable lines are reported and skipped,
//! the same way the browser drops bad frames.

use tracing::warn;

use crate::message::{PushMessage, UploadResponse};
use crate::session::{Dashboard, Event};

/// Upload details to seed the session with before replaying frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySeed {
    pub task_id: String,
    pub file_name: String,
    pub output_dir: String,
    pub total_accounts: Option<u64>,
}

/// Result of a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub dashboard: Dashboard,
    /// Frames that decoded and were applied.
    pub applied: usize,
    /// 1-based line numbers of frames that failed to decode.
    pub skipped: Vec<usize>,
    /// Frames after the terminal one, which were ignored.
    pub trailing: usize,
}

/// Stamp used for log lines of the frame on `line_no`.
fn stamp(line_no: usize) -> String {
    format!("#{:04}", line_no)
}

/// Run `transcript` through a fresh session seeded with `seed`.
///
/// Replay stops applying frames after the first terminal frame, since the
/// browser closes the channel at that point.
pub fn replay(seed: &ReplaySeed, transcript: &str, default_output_dir: &str) -> ReplayReport {
    let mut dashboard = Dashboard::new(default_output_dir);
    let start = stamp(0);
    dashboard.handle(Event::Started, &start);
    dashboard.handle(
        Event::UploadAccepted {
            response: UploadResponse {
                task_id: seed.task_id.clone(),
                total_accounts: seed.total_accounts,
                user_type: None,
                output_dir: None,
            },
            file_name: seed.file_name.clone(),
            output_dir: seed.output_dir.clone(),
        },
        &start,
    );
    dashboard.handle(Event::ChannelOpened, &start);

    let mut applied = 0;
    let mut skipped = Vec::new();
    let mut trailing = 0;

    for (idx, line) in transcript.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if dashboard.wants_channel_closed() {
            trailing += 1;
            continue;
        }
        match PushMessage::decode(line) {
            Ok(message) => {
                dashboard.handle(Event::Push(message), &stamp(line_no));
                applied += 1;
            }
            Err(err) => {
                warn!(line = line_no, "skipping frame: {}", err);
                skipped.push(line_no);
            }
        }
    }

    if !dashboard.wants_channel_closed() {
        dashboard.handle(Event::ChannelClosed, &stamp(transcript.lines().count() + 1));
    }

    ReplayReport {
        dashboard,
        applied,
        skipped,
        trailing,
    }
}
