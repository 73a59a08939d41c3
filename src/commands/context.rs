//! Command context
//!
//! Everything a command may look at: the active document, the timeline
//! selection, the focused cel, the editor config and the notification
//! sink. Selection and focus are plain values set by the UI layer.

use std::ops::BitOr;

use crate::config::EditorConfig;
use crate::doc::Document;
use crate::notify::{LogSink, NotificationSink};
use crate::timeline::{CelFocus, SelectionRange};

/// Facts about a context that commands can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextFlags(u8);

impl ContextFlags {
    pub const NONE: Self = Self(0);
    pub const HAS_ACTIVE_DOCUMENT: Self = Self(1);
    pub const ACTIVE_DOCUMENT_IS_WRITABLE: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ContextFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

pub struct Context {
    document: Option<Document>,
    range: SelectionRange,
    focus: Option<CelFocus>,
    config: EditorConfig,
    sink: Box<dyn NotificationSink>,
}

impl Context {
    /// Empty context that logs its notifications.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            document: None,
            range: SelectionRange::Disabled,
            focus: None,
            config,
            sink: Box::new(LogSink),
        }
    }

    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_document(mut self, document: Document) -> Self {
        self.open(document);
        self
    }

    /// Make `document` the active document, returning the previous one.
    pub fn open(&mut self, document: Document) -> Option<Document> {
        self.focus = None;
        self.range = SelectionRange::Disabled;
        self.document.replace(document)
    }

    pub fn close(&mut self) -> Option<Document> {
        self.focus = None;
        self.range = SelectionRange::Disabled;
        self.document.take()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn range(&self) -> SelectionRange {
        self.range
    }

    pub fn set_range(&mut self, range: SelectionRange) {
        self.range = range;
    }

    pub fn focus(&self) -> Option<CelFocus> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<CelFocus>) {
        self.focus = focus;
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn flags(&self) -> ContextFlags {
        match &self.document {
            Some(doc) if !doc.is_read_only() => {
                ContextFlags::HAS_ACTIVE_DOCUMENT | ContextFlags::ACTIVE_DOCUMENT_IS_WRITABLE
            }
            Some(_) => ContextFlags::HAS_ACTIVE_DOCUMENT,
            None => ContextFlags::NONE,
        }
    }

    pub fn check_flags(&self, required: ContextFlags) -> bool {
        self.flags().contains(required)
    }

    /// Exclusive write access to the active document, if it is writable.
    pub fn writer(&mut self) -> Option<ContextWriter<'_>> {
        let Context {
            document,
            range,
            focus,
            config,
            ..
        } = self;
        let document = document.as_mut().filter(|doc| !doc.is_read_only())?;
        Some(ContextWriter {
            document,
            range: *range,
            focus: *focus,
            config,
        })
    }

    pub fn show_tip(&mut self, duration_ms: u32, text: &str) {
        self.sink.show_transient_message(duration_ms, text);
    }

    /// Ask views of the active document to redraw.
    pub fn update_screen_for_document(&mut self) {
        if let Some(document) = &self.document {
            self.sink.document_changed(document);
        }
    }
}

/// Write lock on the active document. Lives for one command execution.
pub struct ContextWriter<'a> {
    pub document: &'a mut Document,
    pub range: SelectionRange,
    pub focus: Option<CelFocus>,
    pub config: &'a EditorConfig,
}
