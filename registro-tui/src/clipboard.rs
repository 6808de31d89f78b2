//! Terminal clipboard through the OSC 52 escape sequence

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use registro_client::Clipboard;
use shared::error::{AppError, AppResult, ErrorCode};
use std::io::{self, Write};

/// `ESC ] 52 ; c ; <base64> BEL`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Asks the terminal emulator to set the system clipboard
///
/// Terminals that do not support OSC 52 ignore the sequence silently, so a
/// successful write does not guarantee the text arrived.
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn copy(&mut self, text: &str) -> AppResult<()> {
        let mut out = io::stdout();
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| {
                tracing::warn!(error = %e, "Clipboard write failed");
                AppError::new(ErrorCode::ClipboardError).with_detail("reason", e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hola"), "\x1b]52;c;aG9sYQ==\x07");
    }
}
