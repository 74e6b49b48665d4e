//! Clipboard access for page listeners

use std::cell::RefCell;
use std::rc::Rc;

/// Clipboard error types
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display server)
    Unavailable(String),
    /// The clipboard refused the text
    WriteFailed(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Unavailable(msg) => write!(f, "Clipboard unavailable: {}", msg),
            ClipboardError::WriteFailed(msg) => write!(f, "Clipboard write failed: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Somewhere text can be copied to
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard
///
/// Opened on first write so a page can be created where no clipboard
/// exists; a failed open is retried on the next write.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?,
        };
        self.inner
            .insert(clipboard)
            .set_text(text)
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// In-memory clipboard recording every write
///
/// Clones share the same record, so a test can keep one handle and give
/// another to the page.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    writes: Rc<RefCell<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent text written
    pub fn contents(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }

    /// Every text written, oldest first
    pub fn history(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.borrow_mut().push(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_shares_record() {
        let record = MemoryClipboard::new();
        let mut writer = record.clone();
        assert_eq!(record.contents(), None);

        writer.write_text("1, 2, 3").unwrap();
        writer.write_text("4, 5, 6").unwrap();
        assert_eq!(record.contents().as_deref(), Some("4, 5, 6"));
        assert_eq!(record.history(), vec!["1, 2, 3", "4, 5, 6"]);
        assert_eq!(record.write_count(), 2);
    }

    #[test]
    fn test_error_display() {
        let err = ClipboardError::Unavailable("no display".to_string());
        assert_eq!(err.to_string(), "Clipboard unavailable: no display");
    }
}
