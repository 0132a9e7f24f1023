//! Clipboard helper for copying text to the system clipboard
//!
//! Uses `arboard` for cross-platform support. A fresh clipboard handle is
//! created per copy so no resources are held between calls.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Fails when no clipboard is available (headless Linux without a display
/// server is the common case).
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(text)
        .context("failed to write clipboard")?;
    Ok(())
}
