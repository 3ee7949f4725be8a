//! Progress arithmetic and progress-message classification.

use crate::message::LogLevel;

/// Latest `{current, total}` pair received from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub current: u64,
    pub total: u64,
}

impl Progress {
    pub fn new(current: u64, total: u64) -> Self {
        Self { current, total }
    }

    pub fn percentage(&self) -> u64 {
        percentage(self.current, self.total)
    }

    pub fn bar_width(&self) -> String {
        bar_width(self.current, self.total)
    }

    pub fn label(&self) -> String {
        progress_label(self.current, self.total)
    }
}

/// Whole-number percentage of `current` over `total`, halves rounded up.
///
/// Zero when `total` is zero. Values above 100 are passed through.
pub fn percentage(current: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = u128::from(current) * 200 + u128::from(total);
    let pct = scaled / (u128::from(total) * 2);
    u64::try_from(pct).unwrap_or(u64::MAX)
}

/// CSS width of the progress bar, clamped to the bar.
pub fn bar_width(current: u64, total: u64) -> String {
    format!("{}%", percentage(current, total).min(100))
}

pub fn progress_label(current: u64, total: u64) -> String {
    format!("Progress: {} / {}", current, total)
}

/// Pick the log level for the free-text message attached to a progress frame.
pub fn classify(message: &str) -> LogLevel {
    if message.contains("✅ Success") {
        LogLevel::Success
    } else if message.contains("❌ Failed") {
        LogLevel::Error
    } else if message.contains("⚠️") {
        LogLevel::Warning
    } else {
        LogLevel::Info
    }
}
