use shared::error::{AppError, AppResult, ErrorCode};

/// Destination for copied registration links
pub trait Clipboard: Send {
    fn copy(&mut self, text: &str) -> AppResult<()>;
}

/// Keeps the last copied text; can be told to fail
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    failing: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            contents: None,
            failing: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> AppResult<()> {
        if self.failing {
            return Err(AppError::new(ErrorCode::ClipboardError));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
