//! Run Log
//!
//! Chronological transcript of one search. Each entry is timestamped,
//! kept for the caller and mirrored to the `log` facade.

use chrono::Local;
use log::{info, warn};

#[derive(Debug, Default)]
pub struct RunLog {
    lines: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        info!("{}", msg);
        self.push(msg);
    }

    pub fn warn(&mut self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        warn!("{}", msg);
        self.push(msg);
    }

    fn push(&mut self, msg: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.lines.push(format!("[{}] {}", stamp, msg));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whole transcript, one entry per line
    pub fn into_transcript(self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_stamped_in_order() {
        let mut log = RunLog::new();
        log.info("first");
        log.warn("[WARN] second");

        let lines = log.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] first"));
        assert!(lines[1].ends_with("] [WARN] second"));

        let transcript = log.into_transcript();
        assert_eq!(transcript.lines().count(), 2);
    }
}
