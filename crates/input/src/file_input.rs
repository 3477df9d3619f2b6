//! File-upload input: validate, then filter
//!
//! [`FileInput`] differs from the base [`Input`](crate::Input) in three ways:
//!
//! - emptiness is judged on upload metadata ([`FileInput::is_empty_file`]);
//! - filters run only on a value that passed validation, so a rename filter
//!   never touches a file that failed its checks;
//! - an [`UploadFile`] check is pinned to the front of the validator chain on
//!   the first validation run, unless the chain already holds an upload check.
//!
//! Multi-upload values are validated and filtered record by record. The file
//! variant has no fallback substitution.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::ValidationErrors;
use crate::options::InputOptions;
use crate::pipeline::{InputState, Pipeline, ValidationState};
use crate::upload::UploadRecord;
use crate::validator::{UploadFile, UploadVerifier, ValidatorKind};
use crate::value::Value;

/// Input pipeline for file-upload fields.
///
/// A fallback value set through [`Pipeline::set_fallback_value`] is stored and
/// merged like any other option, but a file input never substitutes it.
///
/// # Examples
///
/// ```rust
/// use nebula_input::{FileInput, Pipeline, UploadRecord, UploadStatus};
///
/// let mut input = FileInput::new("avatar");
/// input.set_value(UploadRecord::new("").with_error(UploadStatus::NoFile));
///
/// assert!(!input.is_valid());
/// assert!(input.messages().contains_code("fileUploadFileErrorNoFile"));
/// assert_eq!(input.validator_chain().count(), 1);
/// ```
#[derive(Clone)]
pub struct FileInput {
    state: InputState,
    auto_prepend_upload_validator: bool,
    upload_verifier: Option<UploadVerifier>,
    // set only when the validator chain ran and passed
    checks_passed: bool,
}

impl FileInput {
    /// Creates a file input with default options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: InputState::new(name),
            auto_prepend_upload_validator: InputOptions::default().auto_prepend_upload_validator,
            upload_verifier: None,
            checks_passed: false,
        }
    }

    /// Creates a file input configured from `options`.
    pub fn with_options(name: impl Into<String>, options: &InputOptions) -> Self {
        let mut input = Self::new(name);
        input.state.apply_options(options);
        input.auto_prepend_upload_validator = options.auto_prepend_upload_validator;
        input
    }

    /// Turns the automatic upload check on or off.
    pub fn set_auto_prepend_upload_validator(&mut self, enabled: bool) {
        self.auto_prepend_upload_validator = enabled;
    }

    /// Whether the upload check is prepended on validation.
    pub fn auto_prepend_upload_validator(&self) -> bool {
        self.auto_prepend_upload_validator
    }

    /// Sets the host hook handed to the automatically prepended [`UploadFile`].
    ///
    /// Has no effect once the check has been prepended.
    pub fn set_upload_verifier<F>(&mut self, verifier: F)
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.upload_verifier = Some(Arc::new(verifier));
    }

    /// Upload-aware emptiness.
    ///
    /// - anything that is not upload metadata is empty;
    /// - a single record is empty iff its status is `NoFile`;
    /// - a multi-upload value is empty iff every record is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nebula_input::{FileInput, UploadRecord, UploadStatus, Value};
    ///
    /// assert!(FileInput::is_empty_file(&Value::from("file")));
    /// assert!(FileInput::is_empty_file(
    ///     &UploadRecord::new("").with_error(UploadStatus::NoFile).into()
    /// ));
    /// assert!(!FileInput::is_empty_file(
    ///     &UploadRecord::new("name").with_error(UploadStatus::Ok).into()
    /// ));
    /// ```
    #[must_use]
    pub fn is_empty_file(value: &Value) -> bool {
        if let Some(record) = value.as_upload() {
            return record.is_no_file();
        }
        match value.as_multi_upload() {
            Some(records) => records.iter().all(Self::is_empty_file),
            None => true,
        }
    }

    fn inject_upload_validator(&mut self) {
        if !self.auto_prepend_upload_validator
            || self.state.validators.contains_kind(ValidatorKind::UploadCheck)
        {
            return;
        }

        debug!(input = %self.state.name, "pinning upload validator to the front");
        let mut validator = UploadFile::new();
        if let Some(verifier) = &self.upload_verifier {
            let verifier = Arc::clone(verifier);
            validator = validator.with_verifier(move |path| verifier(path));
        }
        self.state.validators.pin_front(Arc::new(validator));
    }

    /// The raw value as the validator chain sees it.
    ///
    /// A scalar posted for a file field (an AJAX form without the file array)
    /// is presented as a record that says no file was sent.
    fn presented(raw: &Value) -> Cow<'_, Value> {
        if raw.is_scalar() {
            Cow::Owned(UploadRecord::missing(raw.scalar_text()).into())
        } else {
            Cow::Borrowed(raw)
        }
    }

    fn run_validators(&self) -> Result<(), ValidationErrors> {
        let chain = &self.state.validators;
        let Some(records) = self.state.raw.as_multi_upload() else {
            return chain.validate(&Self::presented(&self.state.raw));
        };

        let mut errors = ValidationErrors::new();
        for record in records {
            if let Err(failures) = chain.validate(record) {
                errors.append(failures);
            }
        }
        errors.into_result()
    }
}

impl Pipeline for FileInput {
    fn state(&self) -> &InputState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    fn is_empty_value(&self, value: &Value) -> bool {
        Self::is_empty_file(value)
    }

    fn is_valid(&mut self) -> bool {
        self.state.begin_validation();
        self.checks_passed = false;
        let short_circuit =
            self.is_empty_value(&self.state.raw) && !self.state.continue_if_empty;

        if short_circuit && self.state.accepts_empty() {
            trace!(input = %self.state.name, "no file and none needed, validators skipped");
            return self.state.finish(Ok(()));
        }

        self.inject_upload_validator();

        if short_circuit && !self.state.validators.has_enabled() {
            return self.state.finish(Err(InputState::required_failure()));
        }

        let outcome = self.run_validators();
        self.checks_passed = outcome.is_ok();
        self.state.finish(outcome)
    }

    fn value(&self) -> Value {
        let raw = &self.state.raw;
        let filterable = self.checks_passed && self.state.validation == ValidationState::Valid;
        if !filterable || raw.is_scalar() {
            return raw.clone();
        }

        let filters = &self.state.filters;
        match raw.as_multi_upload() {
            Some(records) => Value::List(
                records
                    .iter()
                    .map(|record| filters.filter(record.clone()))
                    .collect(),
            ),
            None => filters.filter(raw.clone()),
        }
    }

    fn as_file_input(&self) -> Option<&FileInput> {
        Some(self)
    }

    fn merge(&mut self, source: &dyn Pipeline) {
        self.state.merge_from(source.state());
        if let Some(file) = source.as_file_input() {
            self.auto_prepend_upload_validator = file.auto_prepend_upload_validator;
            self.upload_verifier.clone_from(&file.upload_verifier);
        }
    }
}

impl std::fmt::Debug for FileInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileInput")
            .field("state", &self.state)
            .field(
                "auto_prepend_upload_validator",
                &self.auto_prepend_upload_validator,
            )
            .field("upload_verifier", &self.upload_verifier.is_some())
            .field("checks_passed", &self.checks_passed)
            .finish()
    }
}
