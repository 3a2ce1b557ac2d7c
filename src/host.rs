//! Terminal implementations of the announcement and clipboard sinks.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local};
use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use log::{info, warn};

use crate::sinks::{Announcer, Clipboard};

/// One line in the on-screen announcement log
#[derive(Debug, Clone)]
pub struct Announcement {
    pub at: DateTime<Local>,
    pub text: String,
}

impl Announcement {
    /// Render for display, optionally with an `HH:MM:SS` prefix
    pub fn render(&self, timestamps: bool) -> String {
        if timestamps {
            format!("[{}] {}", self.at.format("%H:%M:%S"), self.text)
        } else {
            self.text.clone()
        }
    }
}

/// Bounded announcement log drawn by the interactive UI
#[derive(Debug)]
pub struct AnnouncementLog {
    entries: Mutex<VecDeque<Announcement>>,
    capacity: usize,
}

impl AnnouncementLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// Copy of the current entries, oldest first
    pub fn entries(&self) -> Vec<Announcement> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Announcer for AnnouncementLog {
    fn announce(&self, text: &str) {
        info!("announce: {text}");
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(Announcement {
            at: Local::now(),
            text: text.to_string(),
        });
    }
}

/// Prints each announcement as its own line on stdout (one-shot mode)
#[derive(Debug, Default)]
pub struct StdoutAnnouncer {
    pub timestamps: bool,
}

impl Announcer for StdoutAnnouncer {
    fn announce(&self, text: &str) {
        let line = Announcement {
            at: Local::now(),
            text: text.to_string(),
        }
        .render(self.timestamps);
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            warn!("failed to write announcement: {e}");
        }
    }
}

/// Clipboard through the terminal's OSC 52 escape sequence
#[derive(Debug, Default)]
pub struct Osc52Clipboard {
    pub enabled: bool,
}

impl Osc52Clipboard {
    /// Emit the clipboard escape sequence for `text` into `out`
    fn write_to<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        if !self.enabled {
            info!("clipboard disabled, dropping {} bytes", text.len());
            return Ok(());
        }
        execute!(out, CopyToClipboard::to_clipboard_from(text))
    }
}

impl Clipboard for Osc52Clipboard {
    fn copy_to_clipboard(&self, text: &str) {
        if let Err(e) = self.write_to(&mut io::stdout(), text) {
            warn!("clipboard copy failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_the_newest_entries() {
        let log = AnnouncementLog::new(2);
        log.announce("one");
        log.announce("two");
        log.announce("three");

        let texts: Vec<String> = log.entries().into_iter().map(|a| a.text).collect();
        assert_eq!(texts, vec!["two".to_string(), "three".to_string()]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn zero_capacity_still_keeps_the_latest() {
        let log = AnnouncementLog::new(0);
        log.announce("only");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn render_with_and_without_timestamp() {
        let entry = Announcement {
            at: Local::now(),
            text: "Download: 1.0 kbps, Upload: 0.0 kbps".into(),
        };

        assert_eq!(entry.render(false), "Download: 1.0 kbps, Upload: 0.0 kbps");
        let stamped = entry.render(true);
        assert!(stamped.starts_with('['));
        assert!(stamped.ends_with("] Download: 1.0 kbps, Upload: 0.0 kbps"));
        assert_eq!(stamped.len(), entry.text.len() + "[HH:MM:SS] ".len());
    }

    #[test]
    fn disabled_clipboard_writes_nothing() {
        let mut out = Vec::new();
        Osc52Clipboard { enabled: false }.write_to(&mut out, "text").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn clipboard_emits_osc52_with_base64_payload() {
        let mut out = Vec::new();
        Osc52Clipboard { enabled: true }
            .write_to(&mut out, "Download: 64.0 kbps, Upload: 8.0 kbps")
            .unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with("\x1b]52;"), "{written:?}");
        // base64("Download: 64.0 kbps, Upload: 8.0 kbps")
        assert!(written.contains("RG93bmxvYWQ6IDY0LjAga2JwcywgVXBsb2FkOiA4LjAga2Jwcw=="), "{written:?}");
    }
}
