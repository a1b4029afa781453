use arboard::Clipboard as SystemHandle;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crossterm::{execute, style::Print};
use petnamer_core::clipboard::Unavailable;
use petnamer_core::{Clipboard, ClipboardBackend, ClipboardConfig, CopyError};
use std::io::{stdout, Write};

/// Builds the clipboard used by the TUI: the system clipboard first, then the
/// terminal's OSC 52 channel when enabled.
pub fn build(config: &ClipboardConfig) -> Clipboard {
    let fallback: Box<dyn ClipboardBackend> = if config.osc52_fallback {
        Box::new(Osc52Clipboard::new(stdout()))
    } else {
        Box::new(Unavailable("osc52"))
    };
    Clipboard::new(Box::new(SystemClipboard::new()), fallback)
}

pub struct SystemClipboard {
    clipboard: Option<SystemHandle>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let clipboard = match SystemHandle::new() {
            Ok(cb) => {
                tracing::info!("Clipboard initialized successfully");
                Some(cb)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize clipboard: {} - falling back to terminal copy",
                    e
                );
                None
            }
        };
        Self { clipboard }
    }

    fn handle(&mut self) -> Result<&mut SystemHandle, CopyError> {
        self.clipboard.as_mut().ok_or_else(|| CopyError::Unavailable {
            mechanism: "system",
            reason: "clipboard not initialized".to_string(),
        })
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn set_text(&mut self, text: &str) -> Result<(), CopyError> {
        self.handle()?
            .set_text(text.to_string())
            .map_err(|e| CopyError::Unavailable {
                mechanism: "system",
                reason: e.to_string(),
            })
    }

    fn get_text(&mut self) -> Result<String, CopyError> {
        self.handle()?.get_text().map_err(|e| CopyError::Unavailable {
            mechanism: "system",
            reason: e.to_string(),
        })
    }
}

/// Asks the terminal emulator to set the clipboard. Write-only.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write> ClipboardBackend for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn set_text(&mut self, text: &str) -> Result<(), CopyError> {
        execute!(self.out, Print(osc52_sequence(text))).map_err(|e| CopyError::Unavailable {
            mechanism: "osc52",
            reason: e.to_string(),
        })
    }
}
