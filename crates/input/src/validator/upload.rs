//! Upload check
//!
//! [`UploadFile`] asserts that a value describes a file that actually arrived:
//! the status code is `Ok`, the temporary file exists, and (optionally) a
//! host-supplied verifier confirms the file was produced by the upload
//! mechanism rather than named by the client.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::{Validate, ValidatorKind};
use crate::error::ValidationError;
use crate::upload::{UploadRecord, UploadStatus};
use crate::value::Value;

/// Host hook confirming that a temporary path came from a real upload.
pub type UploadVerifier = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// Validator asserting that a file was genuinely uploaded.
///
/// # Examples
///
/// ```rust
/// use nebula_input::validator::UploadFile;
/// use nebula_input::{UploadRecord, UploadStatus, Validate, Value};
///
/// let missing = Value::from(UploadRecord::new("").with_error(UploadStatus::NoFile));
/// let error = UploadFile::new().validate(&missing).unwrap_err();
/// assert_eq!(error.code, UploadFile::ERROR_NO_FILE);
/// ```
#[derive(Clone, Default)]
pub struct UploadFile {
    verifier: Option<UploadVerifier>,
}

impl UploadFile {
    /// The file exceeds the server-wide size limit.
    pub const ERROR_INI_SIZE: &'static str = "fileUploadFileErrorIniSize";
    /// The file exceeds the form size limit.
    pub const ERROR_FORM_SIZE: &'static str = "fileUploadFileErrorFormSize";
    /// The file was only partially uploaded.
    pub const ERROR_PARTIAL: &'static str = "fileUploadFileErrorPartial";
    /// No file was uploaded.
    pub const ERROR_NO_FILE: &'static str = "fileUploadFileErrorNoFile";
    /// No temporary directory was available.
    pub const ERROR_NO_TMP_DIR: &'static str = "fileUploadFileErrorNoTmpDir";
    /// The file could not be written.
    pub const ERROR_CANT_WRITE: &'static str = "fileUploadFileErrorCantWrite";
    /// An extension stopped the upload.
    pub const ERROR_EXTENSION: &'static str = "fileUploadFileErrorExtension";
    /// The temporary file was not produced by the upload mechanism.
    pub const ERROR_ATTACK: &'static str = "fileUploadFileErrorAttack";
    /// The temporary file does not exist.
    pub const ERROR_FILE_NOT_FOUND: &'static str = "fileUploadFileErrorFileNotFound";
    /// Any other status code.
    pub const ERROR_UNKNOWN: &'static str = "fileUploadFileErrorUnknown";

    /// Creates the validator without a host verifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host verifier consulted for successfully uploaded files.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_verifier<F>(mut self, verifier: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    fn check_record(&self, record: &UploadRecord) -> Result<(), ValidationError> {
        let code = match record.status() {
            UploadStatus::Ok => {
                let path = record.tmp_path();
                if record.tmp_name.is_empty() || !path.exists() {
                    Self::ERROR_FILE_NOT_FOUND
                } else if self.verifier.as_ref().is_some_and(|verify| !verify(path)) {
                    Self::ERROR_ATTACK
                } else {
                    return Ok(());
                }
            }
            UploadStatus::IniSize => Self::ERROR_INI_SIZE,
            UploadStatus::FormSize => Self::ERROR_FORM_SIZE,
            UploadStatus::Partial => Self::ERROR_PARTIAL,
            UploadStatus::NoFile => Self::ERROR_NO_FILE,
            UploadStatus::NoTmpDir => Self::ERROR_NO_TMP_DIR,
            UploadStatus::CantWrite => Self::ERROR_CANT_WRITE,
            UploadStatus::Extension => Self::ERROR_EXTENSION,
            UploadStatus::Other(_) => Self::ERROR_UNKNOWN,
        };

        Err(failure(code).with_param("file", record.name.clone().unwrap_or_default()))
    }
}

fn message_for(code: &str) -> &'static str {
    match code {
        UploadFile::ERROR_INI_SIZE => "File exceeds the defined ini size",
        UploadFile::ERROR_FORM_SIZE => "File exceeds the defined form size",
        UploadFile::ERROR_PARTIAL => "File was only partially uploaded",
        UploadFile::ERROR_NO_FILE => "File was not uploaded",
        UploadFile::ERROR_NO_TMP_DIR => "No temporary directory was found for file",
        UploadFile::ERROR_CANT_WRITE => "File can't be written",
        UploadFile::ERROR_EXTENSION => "An extension returned an error while uploading the file",
        UploadFile::ERROR_ATTACK => "File was illegally uploaded. This could be a possible attack",
        UploadFile::ERROR_FILE_NOT_FOUND => "File was not found",
        _ => "Unknown error while uploading file",
    }
}

fn failure(code: &'static str) -> ValidationError {
    ValidationError::new(code, message_for(code))
}

impl Validate for UploadFile {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value {
            Value::Upload(record) => self.check_record(record),
            _ => Err(failure(Self::ERROR_NO_FILE)),
        }
    }

    fn kind(&self) -> ValidatorKind {
        ValidatorKind::UploadCheck
    }

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("UploadFile")
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("verifier", &self.verifier.is_some())
            .finish()
    }
}
