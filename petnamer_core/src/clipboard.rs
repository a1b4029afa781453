use crate::error::CopyError;
use parking_lot::Mutex;
use std::sync::Arc;

/// A single mechanism able to place text on some clipboard.
pub trait ClipboardBackend {
    fn name(&self) -> &'static str;
    fn set_text(&mut self, text: &str) -> Result<(), CopyError>;

    /// Reads back the clipboard where the mechanism allows it.
    fn get_text(&mut self) -> Result<String, CopyError> {
        Err(CopyError::Unavailable {
            mechanism: self.name(),
            reason: "reading is not supported".to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMechanism {
    Primary,
    Fallback,
}

/// Primary mechanism with a fallback behind it.
pub struct Clipboard {
    primary: Box<dyn ClipboardBackend>,
    fallback: Box<dyn ClipboardBackend>,
}

impl Clipboard {
    pub fn new(primary: Box<dyn ClipboardBackend>, fallback: Box<dyn ClipboardBackend>) -> Self {
        Self { primary, fallback }
    }

    /// In-process clipboard for tests and headless runs.
    pub fn in_memory() -> (Self, MemoryClipboard) {
        let memory = MemoryClipboard::default();
        let clipboard = Self::new(Box::new(memory.clone()), Box::new(Unavailable("fallback")));
        (clipboard, memory)
    }

    pub fn copy(&mut self, text: &str) -> Result<CopyMechanism, CopyError> {
        let primary_err = match self.primary.set_text(text) {
            Ok(()) => return Ok(CopyMechanism::Primary),
            Err(e) => e,
        };
        tracing::debug!(
            mechanism = self.primary.name(),
            error = %primary_err,
            "primary clipboard failed, trying fallback"
        );

        match self.fallback.set_text(text) {
            Ok(()) => Ok(CopyMechanism::Fallback),
            Err(fallback_err) => Err(CopyError::Exhausted {
                primary: primary_err.to_string(),
                fallback: fallback_err.to_string(),
            }),
        }
    }

    pub fn read_primary(&mut self) -> Result<String, CopyError> {
        self.primary.get_text()
    }
}

/// Shared in-memory clipboard. Clones see the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn set_text(&mut self, text: &str) -> Result<(), CopyError> {
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }

    fn get_text(&mut self) -> Result<String, CopyError> {
        self.contents().ok_or(CopyError::Unavailable {
            mechanism: "memory",
            reason: "clipboard is empty".to_string(),
        })
    }
}

/// A mechanism that is switched off or missing on this platform.
#[derive(Debug, Clone, Copy)]
pub struct Unavailable(pub &'static str);

impl ClipboardBackend for Unavailable {
    fn name(&self) -> &'static str {
        self.0
    }

    fn set_text(&mut self, _text: &str) -> Result<(), CopyError> {
        Err(CopyError::Unavailable {
            mechanism: self.0,
            reason: "disabled".to_string(),
        })
    }
}
