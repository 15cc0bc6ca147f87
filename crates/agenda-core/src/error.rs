//! # Error Types
//!
//! Domain-specific error types for agenda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  agenda-core errors (this file)                                         │
//! │  ├── MoneyParseError  - Decimal form text that is not money             │
//! │  ├── ValidationError  - A single field-level rule violation             │
//! │  └── FieldErrors      - Field-keyed set of ValidationErrors             │
//! │                                                                         │
//! │  agenda-store errors (separate crate)                                   │
//! │  └── PersistenceError - Key-value read/write failures                   │
//! │                                                                         │
//! │  Backoffice API errors (in app)                                         │
//! │  └── ApiError         - What the frontend sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → FieldErrors → ApiError → Frontend              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Each error variant maps to a user-facing message
//! 4. Validation failures are collected per field, never thrown

use std::collections::BTreeMap;

use thiserror::Error;

// =============================================================================
// Money Parse Error
// =============================================================================

/// Failure to parse a decimal form field into a monetary value.
///
/// Form inputs arrive as raw text ("899.99"). Parsing is an explicit step
/// with a visible error, so validation can reject bad input instead of a
/// silent coercion to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// The input was empty or whitespace only.
    #[error("amount is empty")]
    Empty,

    /// The input contained characters other than digits, one dot, and an
    /// optional leading minus.
    #[error("amount is not a valid number")]
    Malformed,

    /// More than two decimal places were supplied.
    #[error("amount has more than two decimal places")]
    TooManyDecimals,
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field-level validation failure.
///
/// The `Display` output of each variant is the message shown inline next to
/// the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty after trimming.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// The email does not have a `local@domain.tld` shape.
    #[error("email is not a valid address")]
    InvalidEmail,

    /// A numeric field did not parse.
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    /// A numeric field parsed but must be strictly greater than zero.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: &'static str },

    /// A numeric field parsed but must be zero or greater.
    #[error("{field} must be 0 or greater")]
    MustBeNonNegative { field: &'static str },

    /// A purchase needs at least one item with a product and a positive
    /// integer quantity.
    #[error("at least one product with a valid quantity is required")]
    NoValidItems,

    /// The same product appears in more than one purchase line.
    #[error("the same product cannot be added more than once")]
    DuplicateProduct,
}

// =============================================================================
// Field Errors
// =============================================================================

/// Field-keyed set of validation errors for one submitted form.
///
/// Keys are the frontend form field names (`firstName`, `precio`, `items`,
/// ...). Ordered so error lists render deterministically.
///
/// ## Usage
/// ```rust
/// use agenda_core::error::{FieldErrors, ValidationError};
///
/// let mut errors = FieldErrors::new();
/// errors.insert("firstName", ValidationError::Required { field: "firstName" });
/// assert!(!errors.is_empty());
/// assert_eq!(
///     errors.message("firstName"),
///     Some("firstName is required".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, ValidationError>,
}

impl FieldErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        FieldErrors {
            errors: BTreeMap::new(),
        }
    }

    /// Records an error for a field. A later error for the same field
    /// replaces the earlier one (last rule wins, as the form does).
    pub fn insert(&mut self, field: &'static str, error: ValidationError) {
        self.errors.insert(field, error);
    }

    /// True when no field has an error (the form may be submitted).
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.get(field)
    }

    /// The user-facing message for a field, if any.
    pub fn message(&self, field: &str) -> Option<String> {
        self.errors.get(field).map(|e| e.to_string())
    }

    /// Iterates over `(field, error)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ValidationError)> {
        self.errors.iter().map(|(k, v)| (*k, v))
    }

    /// Renders the whole set as `field → message`, ready to serialize for
    /// the frontend.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(field, error)| (field.to_string(), error.to_string()))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "firstName" };
        assert_eq!(err.to_string(), "firstName is required");

        let err = ValidationError::MustBePositive { field: "precio" };
        assert_eq!(err.to_string(), "precio must be greater than 0");

        assert_eq!(
            ValidationError::DuplicateProduct.to_string(),
            "the same product cannot be added more than once"
        );
    }

    #[test]
    fn test_field_errors_collects_and_reports() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());

        errors.insert("email", ValidationError::InvalidEmail);
        errors.insert("phone", ValidationError::Required { field: "phone" });

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some(&ValidationError::InvalidEmail));
        assert_eq!(errors.message("phone"), Some("phone is required".into()));
        assert_eq!(errors.get("firstName"), None);
    }

    #[test]
    fn test_field_errors_last_rule_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("items", ValidationError::NoValidItems);
        errors.insert("items", ValidationError::DuplicateProduct);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("items"), Some(&ValidationError::DuplicateProduct));
    }

    #[test]
    fn test_messages_map_is_serializable_shape() {
        let mut errors = FieldErrors::new();
        errors.insert("stock", ValidationError::MustBeNonNegative { field: "stock" });

        let map = errors.messages();
        assert_eq!(map.get("stock"), Some(&"stock must be 0 or greater".to_string()));
    }
}
