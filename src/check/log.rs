//! Structured test-log entries and the sink that receives them.

use serde_json::Value;

use super::style_cache::StyleKey;

/// One line in the structured test log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Message text.
    pub message: String,
    /// Color the entry is painted in.
    pub color_hex: String,
    /// Short label shown before the message.
    pub display_name: String,
    /// Payload revealed when the entry is inspected.
    pub metadata: Option<Value>,
    /// Font size for the entry, when it differs from the log default.
    pub font_size: Option<String>,
    /// Registered style that paints this entry.
    pub style_key: StyleKey,
}

/// Receiver of structured log entries.
pub trait LogSink {
    /// Appends `entry` to the log.
    fn log(&mut self, entry: LogEntry);
}

/// In-memory sink that keeps every entry in arrival order.
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: Vec<LogEntry>,
}

impl RecordingLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries received so far.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries whose display name equals `display_name`.
    pub fn with_display_name<'a>(
        &'a self,
        display_name: &'a str,
    ) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.display_name == display_name)
    }
}

impl LogSink for RecordingLog {
    fn log(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}
