// File: src/error.rs
// Purpose: Violation collection returned by the validation engine

use std::collections::HashMap;

use serde::Serialize;

/// HTTP status a violation collection maps to at a transport boundary
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Classification of a single violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A request parameter failed validation
    Param,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Param => write!(f, "param"),
        }
    }
}

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// External name of the failing field
    pub field: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl Violation {
    pub fn param(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ErrorKind::Param,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered collection of violations
///
/// Nested records merge into their parent flat: entries keep their own local field
/// names, with no parent prefix. An empty collection means "valid" and is never
/// surfaced as an error; use [`ValidationErrors::into_result`] at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Validation error: {} invalid field value(s)", .details.len())]
pub struct ValidationErrors {
    details: Vec<Violation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter violation for `field`
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.details.push(Violation::param(field, message));
    }

    /// Appends every entry of a nested collection
    pub fn merge(&mut self, other: ValidationErrors) {
        self.details.extend(other.details);
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.details.iter()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.details
    }

    /// Get all messages for a specific field
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.details
            .iter()
            .filter(move |violation| violation.field == field)
            .map(|violation| violation.message.as_str())
    }

    /// Check whether a field has at least one violation
    pub fn has_field(&self, field: &str) -> bool {
        self.details.iter().any(|violation| violation.field == field)
    }

    /// Messages grouped by field name, in insertion order per field
    pub fn field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        for violation in &self.details {
            grouped
                .entry(violation.field.clone())
                .or_default()
                .push(violation.message.clone());
        }
        grouped
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn status_code(&self) -> u16 {
        STATUS_BAD_REQUEST
    }

    /// Transport-facing error body
    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({
            "code": "validation",
            "message": "Validation error",
            "status": self.status_code(),
            "details": self.details,
        })
    }
}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.details.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.details.iter()
    }
}

impl Extend<Violation> for ValidationErrors {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.details.extend(iter);
    }
}
