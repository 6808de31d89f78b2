//! Shared types for the personnel registry
//!
//! Data model, option sets, geography catalog, display formatters and the
//! unified error codes used by `registro-client` and `registro-tui`.

pub mod catalog;
pub mod error;
pub mod format;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{Empleado, EmpleadoInput, ListParams, ProjectTag};
pub use serde::{Deserialize, Serialize};
