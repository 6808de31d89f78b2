//! Organizer access: the shared-secret gate and the link panel behind it

mod access;
mod clipboard;
mod links;

pub use access::{AccessGate, LOCKOUT, MAX_ATTEMPTS, SESSION_TTL, SESSION_WARNING};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use links::{CODE_LEN, LinkPanel, LinkRow, LinkStats};
