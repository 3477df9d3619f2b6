//! Declarative input configuration
//!
//! [`InputOptions`] mirrors the configuration flags of a pipeline. It is
//! what [`Input::with_options`](crate::Input::with_options) and
//! [`FileInput::with_options`](crate::FileInput::with_options) consume and what
//! [`Pipeline::options`](crate::Pipeline::options) hands back. Chains are not
//! part of it.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, InputResult};
use crate::value::Value;

/// Configuration flags shared by both input variants.
///
/// Every field is optional in serialized form; missing fields take the
/// [`Default`] values (`required` and `auto_prepend_upload_validator` on,
/// everything else off).
///
/// # Examples
///
/// ```rust
/// use nebula_input::InputOptions;
///
/// let options = InputOptions::from_json(r#"{"required": false, "fallback_value": "n/a"}"#)?;
/// assert!(!options.required);
/// assert!(options.auto_prepend_upload_validator);
/// # Ok::<(), nebula_input::InputError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputOptions {
    /// Reject empty values.
    pub required: bool,
    /// Accept empty values even when required.
    pub allow_empty: bool,
    /// Run the validator chain even for empty values.
    pub continue_if_empty: bool,
    /// Value substituted for empty or invalid input (base input only).
    pub fallback_value: Option<Value>,
    /// Replaces every generated message on failure.
    pub error_message: Option<String>,
    /// Prepend the upload check on validation (file input only).
    pub auto_prepend_upload_validator: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            required: true,
            allow_empty: false,
            continue_if_empty: false,
            fallback_value: None,
            error_message: None,
            auto_prepend_upload_validator: true,
        }
    }
}

impl InputOptions {
    /// Parses options from a JSON document.
    pub fn from_json(json: &str) -> InputResult<Self> {
        serde_json::from_str(json).map_err(InputError::InvalidOptions)
    }

    /// Serializes the options as JSON.
    pub fn to_json(&self) -> InputResult<String> {
        serde_json::to_string(self).map_err(InputError::InvalidOptions)
    }
}
