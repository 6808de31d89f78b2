//! Unified error system for the personnel registry
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`AppError`]: Error with code, message, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Access gate errors
//! - 4xxx: Registration form errors
//! - 8xxx: Employee / project errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::InvalidEmail);
//! assert_eq!(err.message, "Debe contener @");
//!
//! let err = AppError::required("nombre").with_detail("step", 1);
//! assert_eq!(err.code, ErrorCode::RequiredField);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
