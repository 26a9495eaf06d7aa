//! Input validation utilities.
//!
//! Functions here turn caller-supplied values into the forms the engine works with, failing
//! with a [`ValidationError`] rather than silently repairing bad input.

use crate::error::ValidationError;
use chw_types::NonEmptyText;

/// Normalise symptom tokens for scoring.
///
/// Tokens are trimmed and lowercased; blank tokens are dropped because an empty string is a
/// substring of every symptom and would match the whole catalog. Input order and duplicates are
/// preserved.
///
/// # Errors
///
/// Returns [`ValidationError::EmptySymptoms`] if no non-blank token remains.
pub fn normalise_symptoms<S: AsRef<str>>(symptoms: &[S]) -> Result<Vec<String>, ValidationError> {
    let tokens: Vec<String> = symptoms
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(ValidationError::EmptySymptoms);
    }

    Ok(tokens)
}

/// Wrap a required identifier, mapping blank input to `missing`.
pub fn require_text(value: &str, missing: ValidationError) -> Result<NonEmptyText, ValidationError> {
    NonEmptyText::new(value).map_err(|_| missing)
}
