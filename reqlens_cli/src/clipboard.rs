//! Clipboard access with a terminal escape fallback
//!
//! arboard needs a display server; inside SSH sessions or bare terminals it
//! can fail, so a best-effort OSC 52 write is attempted before the original
//! error is reported. Callers surface failures on the status line only.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::io::Write;

pub fn copy_text(text: &str) -> Result<()> {
    let primary = arboard::Clipboard::new().and_then(|mut c| c.set_text(text.to_string()));
    match primary {
        Ok(()) => Ok(()),
        Err(err) => {
            if osc52_copy(text).is_ok() {
                tracing::debug!("Clipboard fell back to OSC 52: {}", err);
                return Ok(());
            }
            Err(err).context("Failed to copy to clipboard")
        }
    }
}

/// Ask the terminal emulator to set the clipboard via the OSC 52 sequence
fn osc52_copy(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
    stdout.flush()
}
