//! Notification sinks
//!
//! Where commands send transient user tips and view refresh requests.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::doc::Document;

/// Receives user-facing notifications from commands.
pub trait NotificationSink {
    /// Show `text` briefly, e.g. in a status bar.
    fn show_transient_message(&mut self, duration_ms: u32, text: &str);

    /// The document's content changed and views should redraw.
    fn document_changed(&mut self, _document: &Document) {}
}

/// Routes notifications to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn show_transient_message(&mut self, duration_ms: u32, text: &str) {
        info!("{} ({} ms)", text, duration_ms);
    }

    fn document_changed(&mut self, document: &Document) {
        debug!("Refresh views of '{}'", document.name);
    }
}

/// A tip shown through a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tip {
    pub duration_ms: u32,
    pub text: String,
}

#[derive(Debug, Default)]
struct Recorded {
    tips: Vec<Tip>,
    refreshes: usize,
}

/// Keeps every notification in memory. Clones share the same record, so a
/// caller can keep one handle and give the other to a context.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    inner: Rc<RefCell<Recorded>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tips(&self) -> Vec<Tip> {
        self.inner.borrow().tips.clone()
    }

    pub fn refreshes(&self) -> usize {
        self.inner.borrow().refreshes
    }
}

impl NotificationSink for RecordingSink {
    fn show_transient_message(&mut self, duration_ms: u32, text: &str) {
        self.inner.borrow_mut().tips.push(Tip {
            duration_ms,
            text: text.to_string(),
        });
    }

    fn document_changed(&mut self, _document: &Document) {
        self.inner.borrow_mut().refreshes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_shares_state() {
        let sink = RecordingSink::new();
        let mut handle = sink.clone();

        handle.show_transient_message(1000, "There are locked layers");
        assert_eq!(
            sink.tips(),
            vec![Tip {
                duration_ms: 1000,
                text: "There are locked layers".to_string()
            }]
        );
        assert_eq!(sink.refreshes(), 0);
    }
}
