//! The value model flowing through a pipeline
//!
//! [`Value`] is a closed, JSON-like enum with one extra variant for upload
//! metadata. A non-empty [`Value::List`] whose every element is an upload is
//! a *multi-upload* value (a file field with the `multiple` attribute).
//!
//! Conversions from `serde_json::Value` recognise upload metadata: any object
//! with a `tmp_name` key becomes [`Value::Upload`]. Deserializing a [`Value`]
//! goes through the same conversion, so it rejects what `try_from` rejects.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{InputError, InputResult};
use crate::upload::UploadRecord;

/// A raw or filtered input value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Metadata of one uploaded file.
    Upload(UploadRecord),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Structured value that is not upload metadata.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for the scalar variants (including `Null`).
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_)
        )
    }

    /// Generic emptiness: `Null`, `""`, an empty list or an empty map.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
            Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Upload(_) => false,
        }
    }

    /// String content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Upload metadata, if this is a single upload.
    #[must_use]
    pub fn as_upload(&self) -> Option<&UploadRecord> {
        match self {
            Self::Upload(record) => Some(record),
            _ => None,
        }
    }

    /// Elements of a multi-upload value.
    ///
    /// Returns `None` unless this is a non-empty list made only of uploads.
    #[must_use]
    pub fn as_multi_upload(&self) -> Option<&[Value]> {
        match self {
            Self::List(items)
                if !items.is_empty() && items.iter().all(|item| item.as_upload().is_some()) =>
            {
                Some(items)
            }
            _ => None,
        }
    }

    /// Textual form of a scalar; structured values render as `""`.
    #[must_use]
    pub fn scalar_text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(x) => x.to_string(),
            Self::String(s) => s.clone(),
            Self::Null | Self::Upload(_) | Self::List(_) | Self::Map(_) => String::new(),
        }
    }

    /// Short name of the variant, for logs and error params.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Upload(_) => "upload",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<UploadRecord> for Value {
    fn from(record: UploadRecord) -> Self {
        Self::Upload(record)
    }
}

impl From<Vec<UploadRecord>> for Value {
    fn from(records: Vec<UploadRecord>) -> Self {
        Self::List(records.into_iter().map(Self::Upload).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = InputError;

    fn try_from(json: serde_json::Value) -> InputResult<Self> {
        use serde_json::Value as Json;

        Ok(match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if n.is_f64() {
                    n.as_f64()
                        .map(Self::Float)
                        .ok_or(InputError::UnsupportedNumber(n))?
                } else {
                    return Err(InputError::UnsupportedNumber(n));
                }
            }
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<InputResult<_>>()?,
            ),
            Json::Object(map) if map.contains_key("tmp_name") => Self::Upload(
                serde_json::from_value(Json::Object(map)).map_err(InputError::InvalidUpload)?,
            ),
            Json::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| Ok((k, Self::try_from(v)?)))
                    .collect::<InputResult<_>>()?,
            ),
        })
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Self::try_from(json).map_err(serde::de::Error::custom)
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(b),
            Value::Int(n) => Json::from(n),
            Value::Float(x) => serde_json::Number::from_f64(x).map_or(Json::Null, Json::Number),
            Value::String(s) => Json::String(s),
            Value::Upload(record) => serde_json::to_value(record).unwrap_or(Json::Null),
            Value::List(items) => Json::Array(items.into_iter().map(Into::into).collect()),
            Value::Map(map) => Json::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
