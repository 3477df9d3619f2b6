//! General-purpose validators

use std::borrow::Cow;
use std::fmt;

use super::{Validate, ValidatorKind};
use crate::error::ValidationError;
use crate::value::Value;

// ============================================================================
// NOT EMPTY
// ============================================================================

/// Rejects `Null`, `""`, an empty list and an empty map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotEmpty;

impl NotEmpty {
    /// The value is empty.
    pub const IS_EMPTY: &'static str = "isEmpty";

    /// The failure reported for an empty value.
    #[must_use]
    pub fn failure() -> ValidationError {
        ValidationError::new(Self::IS_EMPTY, "Value is required and can't be empty")
    }
}

impl Validate for NotEmpty {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if value.is_empty() {
            Err(Self::failure())
        } else {
            Ok(())
        }
    }

    fn kind(&self) -> ValidatorKind {
        ValidatorKind::NotEmpty
    }
}

// ============================================================================
// DIGITS
// ============================================================================

/// Accepts only values made of ASCII digits.
///
/// Non-negative integers pass; strings must be non-empty and contain nothing
/// but `0-9`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Digits;

impl Digits {
    /// The value contains something other than digits.
    pub const NOT_DIGITS: &'static str = "notDigits";
    /// The value is an empty string.
    pub const STRING_EMPTY: &'static str = "digitsStringEmpty";
    /// The value is neither a string nor an integer.
    pub const INVALID: &'static str = "digitsInvalid";
}

impl Validate for Digits {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let text = match value {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            Value::Int(n) => Cow::Owned(n.to_string()),
            other => {
                return Err(ValidationError::new(
                    Self::INVALID,
                    "Invalid type given. String, integer or float expected",
                )
                .with_param("type", other.kind_name()));
            }
        };

        if text.is_empty() {
            return Err(ValidationError::new(
                Self::STRING_EMPTY,
                "The input is an empty string",
            ));
        }

        if text.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(
                ValidationError::new(Self::NOT_DIGITS, "The input must contain only digits")
                    .with_param("actual", text.into_owned()),
            )
        }
    }
}

// ============================================================================
// CALLBACK
// ============================================================================

/// Validator backed by a closure predicate.
///
/// # Examples
///
/// ```rust
/// use nebula_input::validator::Callback;
/// use nebula_input::{Validate, Value};
///
/// let positive = Callback::new(|v| matches!(v, Value::Int(n) if *n > 0))
///     .with_message("Must be positive");
/// let error = positive.validate(&Value::Int(-1)).unwrap_err();
/// assert_eq!(error.code, Callback::VALUE);
/// assert_eq!(error.message, "Must be positive");
/// ```
pub struct Callback {
    predicate: Box<dyn Fn(&Value) -> bool + Send + Sync>,
    message: Cow<'static, str>,
}

impl Callback {
    /// The predicate returned false.
    pub const VALUE: &'static str = "callbackValue";

    /// Wraps a predicate with the default failure message.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            message: Cow::Borrowed("The input is not valid"),
        }
    }

    /// Replaces the failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validate for Callback {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if (self.predicate)(value) {
            Ok(())
        } else {
            Err(ValidationError::new(Self::VALUE, self.message.clone()))
        }
    }

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("callback")
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
