//! Request validation
//!
//! Every request type exposes `validate()`, which collects per-field
//! failures into [`ValidationErrors`] before any network call is made.
//! Fields are reported sorted by name so multi-field failures render
//! deterministically.

use std::collections::BTreeMap;
use std::fmt;

/// Collected field validation failures for one request.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    /// Start an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Require a non-zero integer identifier.
    pub fn require_id(&mut self, field: &'static str, value: i64) {
        if value == 0 {
            self.add(field, "cannot be blank");
        }
    }

    /// Require a non-empty string.
    pub fn require_str(&mut self, field: &'static str, value: &str) {
        if value.is_empty() {
            self.add(field, "cannot be blank");
        }
    }

    /// Require a string value to be one of two allowed values, reporting
    /// the allowed set on failure.
    pub fn require_one_of(
        &mut self,
        field: &'static str,
        value: &str,
        allowed: [&'static str; 2],
    ) {
        if value.is_empty() {
            self.add(field, "cannot be blank");
        } else if !allowed.contains(&value) {
            self.add(
                field,
                format!(
                    "value '{value}' is invalid. Must be one of: '{}' or '{}'",
                    allowed[0], allowed[1]
                ),
            );
        }
    }

    /// Whether any failure was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The failure message recorded for a field, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Finish the collection: `Ok(())` when no failure was recorded.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
