//! Application error type

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Carries:
/// - a standardized [`ErrorCode`]
/// - a human-readable (Spanish) message ready for display
/// - optional structured details (field name, remaining attempts, ...)
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Look up a detail entry
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }

    // ==================== Convenience constructors ====================

    /// Create a required-field error tagged with the field name
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(ErrorCode::RequiredField).with_detail("field", field.into())
    }

    /// Create an invalid-option error for an enum field
    pub fn invalid_option(field: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self::with_message(ErrorCode::InvalidOption, format!("Opción inválida: {value}"))
            .with_detail("field", field.into())
            .with_detail("value", value)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{r} no encontrado"))
            .with_detail("resource", r)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Wrong shared secret, with the attempts still available
    pub fn invalid_secret(remaining_attempts: u32) -> Self {
        Self::with_message(
            ErrorCode::InvalidSecret,
            format!("Clave incorrecta. Intentos restantes: {remaining_attempts}"),
        )
        .with_detail("remaining_attempts", remaining_attempts)
    }

    /// Gate is locked, with the seconds until it reopens
    pub fn access_locked(remaining_secs: u64) -> Self {
        Self::with_message(
            ErrorCode::AccessLocked,
            format!("Demasiados intentos fallidos. Espera {remaining_secs} segundos."),
        )
        .with_detail("remaining_secs", remaining_secs)
    }

    /// Organizer session ran out
    pub fn session_expired() -> Self {
        Self::new(ErrorCode::SessionExpired)
    }

    /// Organizer action attempted without a session
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
