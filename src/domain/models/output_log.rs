//! Ordered transcript of a supervised run.

use serde::Serialize;

use crate::services::sanitizer::sanitize;

/// Sanitized, non-empty output lines in the order they were received.
///
/// Line indices double as the coordinate space for analyzer alert windows,
/// so lines are never reordered or removed once recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutputLog {
    lines: Vec<String>,
}

impl OutputLog {
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a log by recording each raw line in turn.
    pub fn from_raw_lines<I, S>(raw_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut log = Self::new();
        for raw in raw_lines {
            log.record(raw.as_ref());
        }
        log
    }

    /// Sanitize and trim `raw`, appending it when anything is left.
    ///
    /// Returns the stored line, or `None` when the line was dropped.
    pub fn record(&mut self, raw: &str) -> Option<&str> {
        let cleaned = sanitize(raw);
        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.lines.push(trimmed.to_string());
        self.lines.last().map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
