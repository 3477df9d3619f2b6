//! Upload metadata
//!
//! An [`UploadRecord`] describes one file-upload attempt as the request layer
//! reports it: where the temporary file landed, the client-side name, the
//! declared size and media type, and an [`UploadStatus`] code.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

// ============================================================================
// UPLOAD STATUS
// ============================================================================

/// Outcome code of a single upload attempt.
///
/// This is the one place the numeric codes are defined; everything else in
/// the crate compares against the variants. Serialized as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum UploadStatus {
    /// The file was uploaded successfully.
    Ok,
    /// The file exceeds the server-wide size limit.
    IniSize,
    /// The file exceeds the size limit declared by the form.
    FormSize,
    /// The file was only partially received.
    Partial,
    /// No file was sent for this field.
    NoFile,
    /// No temporary directory was available.
    NoTmpDir,
    /// The temporary file could not be written.
    CantWrite,
    /// An extension stopped the upload.
    Extension,
    /// Any code outside the table above.
    Other(i64),
}

impl UploadStatus {
    /// Numeric code of this status.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Ok => 0,
            Self::IniSize => 1,
            Self::FormSize => 2,
            Self::Partial => 3,
            Self::NoFile => 4,
            Self::NoTmpDir => 6,
            Self::CantWrite => 7,
            Self::Extension => 8,
            Self::Other(code) => code,
        }
    }

    /// Status for a numeric code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::IniSize,
            2 => Self::FormSize,
            3 => Self::Partial,
            4 => Self::NoFile,
            6 => Self::NoTmpDir,
            7 => Self::CantWrite,
            8 => Self::Extension,
            other => Self::Other(other),
        }
    }

    /// Returns true for [`UploadStatus::Ok`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl From<i64> for UploadStatus {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl From<UploadStatus> for i64 {
    fn from(status: UploadStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// UPLOAD RECORD
// ============================================================================

/// Metadata of one uploaded file.
///
/// Only `tmp_name` is mandatory; everything else is optional because request
/// layers (and tests) often supply partial records. A record without an
/// `error` field is treated as successfully uploaded.
///
/// # Examples
///
/// ```rust
/// use nebula_input::{UploadRecord, UploadStatus};
///
/// let record = UploadRecord::new("/tmp/php1234")
///     .with_name("avatar.png")
///     .with_size(1024)
///     .with_error(UploadStatus::Ok);
/// assert!(!record.is_no_file());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Path of the temporary file holding the upload (may be empty).
    pub tmp_name: String,

    /// Client-side file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Declared size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Declared media type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Upload status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<UploadStatus>,
}

impl UploadRecord {
    /// Creates a record with only `tmp_name` set.
    pub fn new(tmp_name: impl Into<String>) -> Self {
        Self {
            tmp_name: tmp_name.into(),
            ..Self::default()
        }
    }

    /// The record a field without any file metadata is presented as.
    ///
    /// Used when a client posts a plain string for a file field (for
    /// instance an AJAX form without the file array).
    pub fn missing(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            name: Some(text.clone()),
            tmp_name: text,
            size: Some(0),
            media_type: Some(String::new()),
            error: Some(UploadStatus::NoFile),
        }
    }

    /// Sets the client-side name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the declared size.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the declared media type.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Sets the upload status.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error(mut self, status: UploadStatus) -> Self {
        self.error = Some(status);
        self
    }

    /// Effective status; a missing `error` counts as [`UploadStatus::Ok`].
    #[must_use]
    pub fn status(&self) -> UploadStatus {
        self.error.unwrap_or(UploadStatus::Ok)
    }

    /// Returns true when the record says no file was sent.
    #[must_use]
    pub fn is_no_file(&self) -> bool {
        self.error == Some(UploadStatus::NoFile)
    }

    /// `tmp_name` as a filesystem path.
    #[must_use]
    pub fn tmp_path(&self) -> &Path {
        Path::new(&self.tmp_name)
    }
}
