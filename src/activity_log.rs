//! Timestamped activity log shown on the processing page.

use crate::message::LogLevel;

/// One rendered line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Wall-clock time of day the line was added.
    pub at: String,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// Text as displayed: `[HH:MM:SS] message`.
    pub fn text(&self) -> String {
        format!("[{}] {}", self.at, self.message)
    }

    /// CSS classes for the line.
    pub fn css_class(&self) -> String {
        format!("log-entry log-{}", self.level.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, at: &str, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry {
            at: at.to_string(),
            level,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whole log as text, one line per entry.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(LogEntry::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Zero-padded `HH:MM:SS`.
pub fn format_time_of_day(hours: u32, minutes: u32, seconds: u32) -> String {
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
