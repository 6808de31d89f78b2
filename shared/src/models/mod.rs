//! Data models
//!
//! The employee record mirrors the `empleados` table column for column;
//! option sets serialize to the stored strings.

pub mod empleado;
pub mod list;
pub mod options;
pub mod project;

// Re-exports
pub use empleado::*;
pub use list::*;
pub use options::*;
pub use project::*;
