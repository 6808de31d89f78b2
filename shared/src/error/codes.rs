//! Unified error codes for the personnel registry
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Access gate errors
//! - 4xxx: Registration form errors
//! - 8xxx: Employee / project errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the terminal front end
/// and logs can carry them without the enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Access gate ====================
    /// Shared secret did not match
    InvalidSecret = 1001,
    /// Too many failed attempts, gate is locked
    AccessLocked = 1002,
    /// Organizer session has expired
    SessionExpired = 1003,
    /// Organizer panel used without a session
    NotAuthenticated = 1004,

    // ==================== 4xxx: Registration form ====================
    /// Entry URL has no `nv` parameter
    ProjectTagMissing = 4001,
    /// Entry URL `nv` parameter is malformed
    ProjectTagInvalid = 4002,
    /// Current step has missing or invalid fields
    StepIncomplete = 4003,
    /// Email address is invalid
    InvalidEmail = 4004,
    /// Account number exceeds the bank's digit limit
    AccountNumberTooLong = 4005,
    /// Value is not one of the field's options
    InvalidOption = 4006,
    /// Commune does not belong to the selected region
    CommuneNotInRegion = 4007,
    /// Birth date is malformed or in the future
    InvalidBirthDate = 4008,
    /// Shoe size outside the supported range
    ShoeSizeOutOfRange = 4009,
    /// Form is in a state that accepts no input
    FormNotEditable = 4010,
    /// Remote insert of the registration failed
    SubmitFailed = 4011,

    // ==================== 8xxx: Employee / project ====================
    /// New project code is not exactly three digits
    ProjectCodeInvalid = 8101,
    /// Project tag already has a registration link
    ProjectTagExists = 8102,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// Clipboard write failed
    ClipboardError = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default user-facing message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::NotFound => "Recurso no encontrado",
            ErrorCode::InvalidRequest => "Solicitud inválida",
            ErrorCode::RequiredField => "Campo requerido",

            // Access gate
            ErrorCode::InvalidSecret => "Clave incorrecta",
            ErrorCode::AccessLocked => "Demasiados intentos fallidos. Espera 5 minutos.",
            ErrorCode::SessionExpired => "Sesión expirada. Ingresa la clave nuevamente.",
            ErrorCode::NotAuthenticated => "Acceso de organizador requerido",

            // Registration form
            ErrorCode::ProjectTagMissing => "Falta el código de proyecto (nv) en el enlace",
            ErrorCode::ProjectTagInvalid => "Código de proyecto inválido en el enlace",
            ErrorCode::StepIncomplete => "Completa los campos requeridos de esta sección",
            ErrorCode::InvalidEmail => "Debe contener @",
            ErrorCode::AccountNumberTooLong => "Banco Estado: máximo 8 dígitos",
            ErrorCode::InvalidOption => "Opción inválida",
            ErrorCode::CommuneNotInRegion => "La comuna no pertenece a la región",
            ErrorCode::InvalidBirthDate => "Fecha de nacimiento inválida",
            ErrorCode::ShoeSizeOutOfRange => "Talla de zapato fuera de rango (36-46)",
            ErrorCode::FormNotEditable => "El formulario no admite cambios",
            ErrorCode::SubmitFailed => "Error al enviar el formulario",

            // Employee / project
            ErrorCode::ProjectCodeInvalid => "Debe ingresar exactamente 3 dígitos (ej: 499)",
            ErrorCode::ProjectTagExists => "El código ya existe",

            // System
            ErrorCode::DatabaseError => "Error de base de datos",
            ErrorCode::ClipboardError => "Error al copiar al portapapeles",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Access gate
            1001 => Ok(ErrorCode::InvalidSecret),
            1002 => Ok(ErrorCode::AccessLocked),
            1003 => Ok(ErrorCode::SessionExpired),
            1004 => Ok(ErrorCode::NotAuthenticated),

            // Registration form
            4001 => Ok(ErrorCode::ProjectTagMissing),
            4002 => Ok(ErrorCode::ProjectTagInvalid),
            4003 => Ok(ErrorCode::StepIncomplete),
            4004 => Ok(ErrorCode::InvalidEmail),
            4005 => Ok(ErrorCode::AccountNumberTooLong),
            4006 => Ok(ErrorCode::InvalidOption),
            4007 => Ok(ErrorCode::CommuneNotInRegion),
            4008 => Ok(ErrorCode::InvalidBirthDate),
            4009 => Ok(ErrorCode::ShoeSizeOutOfRange),
            4010 => Ok(ErrorCode::FormNotEditable),
            4011 => Ok(ErrorCode::SubmitFailed),

            // Employee / project
            8101 => Ok(ErrorCode::ProjectCodeInvalid),
            8102 => Ok(ErrorCode::ProjectTagExists),

            // System
            9002 => Ok(ErrorCode::DatabaseError),
            9101 => Ok(ErrorCode::ClipboardError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
