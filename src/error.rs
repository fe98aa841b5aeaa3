//! Error types and handling.

use thiserror::Error;

use crate::models::employee::FormField;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Date text is not a valid `MM/DD/YYYY` entry or ISO instant
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// A reference list (states, departments) could not be loaded
    #[error("Reference data unavailable ({what}): {reason}")]
    ReferenceDataUnavailable { what: &'static str, reason: String },

    /// Persisted snapshot exists but cannot be decoded
    #[error("Persisted state unreadable: {0}")]
    PersistedStateUnreadable(String),

    /// Required form fields are blank
    #[error("Missing required fields: {}", format_fields(.0))]
    MissingFields(Vec<FormField>),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

fn format_fields(fields: &[FormField]) -> String {
    fields.iter().map(|f| f.label()).collect::<Vec<_>>().join(", ")
}

impl AppError {
    /// Create an invalid date error for the given input
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDateFormat(input.into())
    }

    /// Create a reference data error
    pub fn reference(what: &'static str, reason: impl ToString) -> Self {
        Self::ReferenceDataUnavailable {
            what,
            reason: reason.to_string(),
        }
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_labels() {
        let err = AppError::MissingFields(vec![FormField::FirstName, FormField::ZipCode]);
        assert_eq!(err.to_string(), "Missing required fields: First Name, Zip code");
    }

    #[test]
    fn test_reference_error_message() {
        let err = AppError::reference("states", "connection refused");
        assert_eq!(
            err.to_string(),
            "Reference data unavailable (states): connection refused"
        );
    }
}
