//! # API Error Type
//!
//! Unified error type for backoffice commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  createContact(form)                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation failed? ── FieldErrors ──► ApiError with `fields` ──►│  │
//! │  │         │                              (inline form messages)    │  │
//! │  │         ▼                                                        │  │
//! │  │  Stale id? ──────────────────────────► ApiError NOT_FOUND ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) { e.fields?.email === "email is not a valid address" }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! User-visible failure behavior is limited to inline field messages; there
//! is no global error boundary or retry mechanism.

use std::collections::BTreeMap;

use serde::Serialize;

use agenda_core::error::FieldErrors;

/// API error returned from backoffice commands.
///
/// ## Serialization
/// This is what the frontend receives when a command fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "validation failed",
///   "fields": { "email": "email is not a valid address" }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Field-keyed validation messages, present only for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (stale id)
    NotFound,

    /// Input validation failed; `fields` carries the per-field messages
    ValidationError,

    /// Unexpected internal failure
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// A failed validation becomes a field-keyed API error.
impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: "validation failed".to_string(),
            fields: Some(errors.messages()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::error::ValidationError;

    #[test]
    fn test_validation_error_carries_field_messages() {
        let mut errors = FieldErrors::new();
        errors.insert("email", ValidationError::InvalidEmail);

        let api: ApiError = errors.into();
        assert_eq!(api.code, ErrorCode::ValidationError);
        let fields = api.fields.unwrap();
        assert_eq!(
            fields.get("email"),
            Some(&"email is not a valid address".to_string())
        );
    }

    #[test]
    fn test_not_found_message() {
        let api = ApiError::not_found("Contact", "c9");
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "Contact not found: c9");
        assert!(api.fields.is_none());
    }

    #[test]
    fn test_serializes_screaming_snake_code() {
        let api = ApiError::not_found("Product", "p1");
        let json = serde_json::to_string(&api).unwrap();
        assert!(json.contains("\"code\":\"NOT_FOUND\""));
        assert!(!json.contains("fields"));
    }
}
