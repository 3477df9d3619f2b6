//! Error types for the input pipeline
//!
//! Two families live here:
//!
//! - [`ValidationError`] / [`ValidationErrors`]: the expected outcome of a
//!   failing validator unit. They carry a machine-readable code and a
//!   human-readable message and end up in an input's [`Messages`].
//! - [`InputError`]: genuine faults at the conversion and configuration
//!   boundary (malformed upload metadata, unsupported numbers, bad options).
//!
//! Like the rest of the crate, codes and messages use `Cow<'static, str>` so
//! the common case of static text does not allocate.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

/// Key under which an input's error-message override is reported.
pub const ERROR_MESSAGE_KEY: &str = "errorMessage";

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single failure reported by a validator unit.
///
/// # Examples
///
/// ```rust
/// use nebula_input::ValidationError;
///
/// let error = ValidationError::new("notDigits", "The input must contain only digits")
///     .with_param("actual", "12a");
/// assert_eq!(error.code, "notDigits");
/// assert_eq!(error.param("actual"), Some("12a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Failure code, used as the key in [`Messages`].
    pub code: Cow<'static, str>,

    /// Human-readable message in English.
    pub message: Cow<'static, str>,

    /// Ordered parameters describing the failure (typically 0-2).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// Every failure collected during one validator-chain run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Moves every error of `other` into this collection.
    pub fn append(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors in the order they were reported.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `Ok(())` when nothing was collected, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// MESSAGES
// ============================================================================

/// Failure code → message mapping exposed by an input after a failed run.
///
/// Insertion order is preserved. When two failures share a code, the later
/// message wins, so a multi-file run reports each code once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages {
    entries: IndexMap<String, String>,
}

impl Messages {
    /// Creates an empty message set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the message set for a failed chain run.
    #[must_use]
    pub fn from_errors(errors: &ValidationErrors) -> Self {
        errors
            .errors()
            .iter()
            .map(|e| (e.code.to_string(), e.message.to_string()))
            .collect()
    }

    /// A message set holding only the caller's override text.
    #[must_use]
    pub fn overridden(message: impl Into<String>) -> Self {
        let mut messages = Self::new();
        messages.insert(ERROR_MESSAGE_KEY, message);
        messages
    }

    /// Inserts (or replaces) the message for `code`.
    pub fn insert(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(code.into(), message.into());
    }

    /// Message reported for `code`, if any.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Returns true if a message is reported under `code`.
    #[must_use]
    pub fn contains_code(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Returns true if any reported message equals `message`.
    #[must_use]
    pub fn contains_message(&self, message: &str) -> bool {
        self.entries.values().any(|m| m == message)
    }

    /// Failure codes in reporting order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(code, message)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of reported codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every message.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V> FromIterator<(K, V)> for Messages
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// INPUT ERROR
// ============================================================================

/// Faults raised while building values or options from external data.
#[derive(Debug, Error)]
pub enum InputError {
    /// An object carrying `tmp_name` could not be read as upload metadata.
    #[error("malformed upload record: {0}")]
    InvalidUpload(#[source] serde_json::Error),

    /// A JSON number that fits neither `i64` nor is a float.
    #[error("number {0} is out of the supported integer range")]
    UnsupportedNumber(serde_json::Number),

    /// Input options could not be parsed.
    #[error("invalid input options: {0}")]
    InvalidOptions(#[source] serde_json::Error),
}

/// Result alias for fallible conversions in this crate.
pub type InputResult<T> = Result<T, InputError>;

// ============================================================================
// TESTS
// ============================================================================
