//! File existence check

use std::path::Path;

use super::Validate;
use crate::error::ValidationError;
use crate::value::Value;

/// Validator asserting that a file exists on disk.
///
/// Accepts either an upload record (its `tmp_name` is checked) or a string
/// path. Any other value fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileExists;

impl FileExists {
    /// The file is missing.
    pub const DOES_NOT_EXIST: &'static str = "fileExistsDoesNotExist";

    /// Creates the validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Validate for FileExists {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let path = match value {
            Value::Upload(record) => Some(record.tmp_name.as_str()),
            Value::String(path) => Some(path.as_str()),
            _ => None,
        };

        match path {
            Some(path) if !path.is_empty() && Path::new(path).is_file() => Ok(()),
            _ => Err(
                ValidationError::new(Self::DOES_NOT_EXIST, "File does not exist")
                    .with_param("path", path.unwrap_or_default().to_owned()),
            ),
        }
    }
}
