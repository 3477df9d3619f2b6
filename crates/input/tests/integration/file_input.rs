//! File input: validate-before-filter, upload check injection, multi-file.

use std::sync::Arc;

use nebula_input::filter::StringToUpper;
use nebula_input::validator::{Callback, Digits, FileExists, UploadFile};
use nebula_input::{
    FileInput, InputOptions, Pipeline, UploadRecord, UploadStatus, Validate, ValidationError,
    ValidatorKind, Value,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::support::{
    MockRename, init_tracing, no_file, real_file, upload_check_mock, uploaded,
};

/// File input with the upload check switched off, as most scenarios use.
fn plain_input() -> FileInput {
    let mut input = FileInput::new("foo");
    input.set_auto_prepend_upload_validator(false);
    input
}

fn renaming_filter(times: usize) -> Arc<MockRename> {
    let mut rename = MockRename::new();
    rename
        .expect_filter()
        .times(times)
        .returning(|_| UploadRecord::new("new").into());
    Arc::new(rename)
}

#[test]
fn value_may_be_injected() {
    let mut input = plain_input();
    input.set_value(UploadRecord::new("bar"));
    assert_eq!(input.value(), Value::from(UploadRecord::new("bar")));
}

#[test]
fn value_is_filtered_only_after_validating() {
    init_tracing();
    let mut input = plain_input();
    input.set_value(UploadRecord::new("X"));
    input.filter_chain_mut().attach(renaming_filter(1));

    assert_eq!(input.value(), Value::from(UploadRecord::new("X")));
    assert!(input.is_valid());
    assert_eq!(input.raw_value(), &Value::from(UploadRecord::new("X")));
    assert_eq!(input.value(), Value::from(UploadRecord::new("new")));
}

#[test]
fn multi_file_values_are_filtered_per_record() {
    let values = Value::from(vec![
        UploadRecord::new("foo"),
        UploadRecord::new("bar"),
        UploadRecord::new("baz"),
    ]);
    let mut input = plain_input();
    input.set_value(values.clone());
    input.filter_chain_mut().attach(renaming_filter(3));

    assert_eq!(input.value(), values);
    assert!(input.is_valid());
    assert_eq!(
        input.value(),
        Value::from(vec![
            UploadRecord::new("new"),
            UploadRecord::new("new"),
            UploadRecord::new("new"),
        ])
    );
}

#[rstest]
#[case::optional(false, false)]
#[case::allow_empty(true, true)]
fn skipped_checks_leave_the_value_unfiltered(#[case] required: bool, #[case] allow_empty: bool) {
    let mut input = plain_input();
    input.set_required(required);
    input.set_allow_empty(allow_empty);
    input.filter_chain_mut().attach(renaming_filter(0));
    input.set_value(no_file(""));

    assert!(input.is_valid());
    assert_eq!(input.value(), Value::from(no_file("")));
}

#[test]
fn raw_value_survives_filtering() {
    let mut input = plain_input();
    input.filter_chain_mut().attach(Arc::new(StringToUpper));
    input.set_value(UploadRecord::new("bar"));

    assert!(input.is_valid());
    assert_eq!(input.raw_value(), &Value::from(UploadRecord::new("bar")));
    assert_eq!(input.value(), Value::from(UploadRecord::new("BAR")));
}

#[test]
fn failed_validation_keeps_the_value_unfiltered() {
    let mut input = plain_input();
    input
        .filter_chain_mut()
        .attach_fn(|_| UploadRecord::new("new").into());
    input.validator_chain_mut().attach(Arc::new(FileExists));

    let bad = UploadRecord::new("/no/such/upload")
        .with_name("foo")
        .with_size(1)
        .with_error(UploadStatus::Ok);
    input.set_value(bad.clone());
    assert!(!input.is_valid());
    assert_eq!(input.value(), Value::from(bad));

    let file = real_file();
    input.set_value(uploaded(&file, "foo"));
    assert!(input.is_valid());
    assert_eq!(input.value(), Value::from(UploadRecord::new("new")));
}

#[test]
fn multi_file_values_are_validated_per_record() {
    let files = [real_file(), real_file(), real_file()];
    let mut records: Vec<UploadRecord> = files
        .iter()
        .zip(["foo", "bar", "baz"])
        .map(|(file, name)| uploaded(file, name))
        .collect();

    let mut input = plain_input();
    input.validator_chain_mut().attach(Arc::new(FileExists));
    input.set_value(records.clone());
    assert!(input.is_valid());

    records[1].tmp_name = "file-not-found".into();
    input.set_value(records);
    assert!(!input.is_valid());
    assert!(input.messages().contains_code(FileExists::DOES_NOT_EXIST));
}

#[test]
fn error_message_replaces_generated_messages() {
    let mut input = plain_input();
    input.set_value(UploadRecord::new("bar"));
    input.validator_chain_mut().attach(Arc::new(Digits));
    input.set_error_message(Some("Please enter only digits".into()));

    assert!(!input.is_valid());
    assert!(!input.messages().contains_code(Digits::NOT_DIGITS));
    assert!(input.messages().contains_message("Please enter only digits"));
}

#[test]
fn upload_validator_is_added_when_validating() {
    let file = real_file();
    let mut input = FileInput::new("foo");
    input.set_upload_verifier(|_| false);
    input.set_value(uploaded(&file, "foo"));
    assert!(input.auto_prepend_upload_validator());
    assert!(input.is_required());
    assert_eq!(input.validator_chain().count(), 0);

    assert!(!input.is_valid());
    assert!(input.messages().contains_code(UploadFile::ERROR_ATTACK));

    let chain = input.validator_chain();
    assert_eq!(chain.count(), 1);
    assert_eq!(chain.entries()[0].unit().kind(), ValidatorKind::UploadCheck);
}

#[test]
fn genuine_upload_passes_the_injected_check() {
    let file = real_file();
    let mut input = FileInput::new("foo");
    input.set_upload_verifier(|_| true);
    input.set_value(uploaded(&file, "foo"));

    assert!(input.is_valid());
    assert!(input.messages().is_empty());
}

#[test]
fn upload_validator_goes_in_front_of_caller_validators() {
    let mut input = FileInput::new("foo");
    input.validator_chain_mut().attach(Arc::new(FileExists));
    input.set_value(no_file(""));

    assert!(!input.is_valid());
    let chain = input.validator_chain();
    assert_eq!(chain.count(), 2);
    assert_eq!(chain.entries()[0].unit().kind(), ValidatorKind::UploadCheck);
    assert!(input.messages().contains_code(UploadFile::ERROR_NO_FILE));
}

#[test]
fn upload_validator_stays_first_after_later_attaches() {
    let mut input = FileInput::new("foo");
    input.set_value(no_file(""));
    assert!(!input.is_valid());

    input
        .validator_chain_mut()
        .attach_with_priority(Arc::new(Callback::new(|_| false)), 10);
    assert!(!input.is_valid());

    let kinds: Vec<ValidatorKind> = input
        .validator_chain()
        .units()
        .map(|unit| unit.kind())
        .collect();
    assert_eq!(kinds, vec![ValidatorKind::UploadCheck, ValidatorKind::Generic]);
    let codes: Vec<&str> = input.messages().codes().collect();
    assert_eq!(codes, vec![UploadFile::ERROR_NO_FILE, Callback::VALUE]);
}

#[test]
fn upload_validator_is_not_added_when_disabled() {
    let mut input = plain_input();
    input.set_value(UploadRecord::new("bar"));

    assert!(input.is_valid());
    assert_eq!(input.validator_chain().count(), 0);
}

#[test]
fn upload_validator_is_not_added_when_one_exists() {
    let mut check = upload_check_mock();
    check.expect_validate().times(1).returning(|_| Ok(()));
    let check: Arc<dyn Validate> = Arc::new(check);

    let mut input = FileInput::new("foo");
    input.set_value(UploadRecord::new("bar"));
    input.validator_chain_mut().prepend(Arc::clone(&check));

    assert!(input.is_valid());
    let chain = input.validator_chain();
    assert_eq!(chain.count(), 1);
    assert!(Arc::ptr_eq(chain.entries()[0].unit(), &check));
}

#[test]
fn existing_upload_check_is_found_anywhere_in_the_chain() {
    let mut input = FileInput::new("foo");
    input
        .validator_chain_mut()
        .attach(Arc::new(Callback::new(|_| true)))
        .attach(Arc::new(UploadFile::new().with_verifier(|_| true)));
    let before = input.validator_chain().count();

    let file = real_file();
    input.set_value(uploaded(&file, "foo"));
    assert!(input.is_valid());
    assert!(input.is_valid());
    assert_eq!(input.validator_chain().count(), before);
}

#[test]
fn validators_run_for_ajax_post_without_file_array() {
    let mut check = upload_check_mock();
    check
        .expect_validate()
        .withf(|value| value == &Value::from(UploadRecord::missing("")))
        .times(1)
        .returning(|_| {
            Err(ValidationError::new(
                UploadFile::ERROR_NO_FILE,
                "File was not uploaded",
            ))
        });
    let check: Arc<dyn Validate> = Arc::new(check);

    let mut input = FileInput::new("foo");
    assert!(input.auto_prepend_upload_validator());
    assert!(input.is_required());
    input.set_value("");
    input.validator_chain_mut().prepend(Arc::clone(&check));

    assert!(!input.is_valid());
    assert!(input.messages().contains_code(UploadFile::ERROR_NO_FILE));
    let chain = input.validator_chain();
    assert_eq!(chain.count(), 1);
    assert!(Arc::ptr_eq(chain.entries()[0].unit(), &check));
}

#[test]
fn ajax_post_fails_through_the_injected_check() {
    let mut input = FileInput::new("foo");
    input.set_value("");

    assert!(!input.is_valid());
    assert_eq!(
        input.messages().get(UploadFile::ERROR_NO_FILE),
        Some("File was not uploaded")
    );
}

#[rstest]
#[case::partial(UploadStatus::Partial, UploadFile::ERROR_PARTIAL)]
#[case::ini_size(UploadStatus::IniSize, UploadFile::ERROR_INI_SIZE)]
#[case::cant_write(UploadStatus::CantWrite, UploadFile::ERROR_CANT_WRITE)]
#[case::unknown(UploadStatus::Other(42), UploadFile::ERROR_UNKNOWN)]
fn upload_failures_are_reported_by_status(#[case] status: UploadStatus, #[case] code: &str) {
    let mut input = FileInput::new("foo");
    input.set_value(UploadRecord::new("/tmp/partial").with_error(status));

    assert!(!input.is_valid());
    assert!(input.messages().contains_code(code));
}

fn empty_file_values() -> [Value; 3] {
    [
        Value::from("file"),
        Value::from(no_file("")),
        Value::from(vec![no_file("foo")]),
    ]
}

#[rstest]
fn allow_empty_skips_validators(#[values(0, 1, 2)] case: usize) {
    let mut input = plain_input();
    input
        .validator_chain_mut()
        .attach(Arc::new(Callback::new(|_| false)));
    input.set_allow_empty(true);
    input.set_value(empty_file_values()[case].clone());

    assert!(input.is_valid());
    assert!(input.messages().is_empty());
}

#[rstest]
fn optional_empty_skips_validators(#[values(0, 1, 2)] case: usize) {
    let mut input = FileInput::new("foo");
    input.set_required(false);
    input.set_value(empty_file_values()[case].clone());

    assert!(input.is_valid());
    assert!(input.validator_chain().is_empty());
}

#[rstest]
fn required_empty_runs_validators(#[values(0, 1, 2)] case: usize) {
    let message = "pretend failing UploadFile validator";
    let mut input = plain_input();
    input
        .validator_chain_mut()
        .attach(Arc::new(Callback::new(|_| false).with_message(message)));
    input.set_value(empty_file_values()[case].clone());

    assert!(!input.is_valid());
    let messages: Vec<(&str, &str)> = input.messages().iter().collect();
    assert_eq!(messages, vec![(Callback::VALUE, message)]);
}

#[test]
fn built_from_json_options() {
    let options = InputOptions::from_json(
        r#"{"required": false, "auto_prepend_upload_validator": false}"#,
    )
    .unwrap();
    let input = FileInput::with_options("foo", &options);

    assert!(!input.is_required());
    assert!(!input.auto_prepend_upload_validator());
    assert_eq!(input.options(), options);
}
