//! Base input: filter-then-validate, emptiness flags, fallback, overrides.

use std::sync::Arc;

use indexmap::IndexMap;
use nebula_input::filter::{StringToUpper, StringTrim};
use nebula_input::validator::{Callback, Digits, NotEmpty};
use nebula_input::{Input, InputOptions, Messages, Pipeline, ValidationState, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::support::init_tracing;

fn never_passes(message: &'static str) -> Arc<Callback> {
    Arc::new(Callback::new(|_| false).with_message(message))
}

#[test]
fn value_is_filtered_and_raw_value_kept() {
    init_tracing();
    let mut input = Input::new("foo");
    input
        .filter_chain_mut()
        .attach(Arc::new(StringTrim))
        .attach(Arc::new(StringToUpper));
    input.set_value("  bar ");

    assert_eq!(input.value(), Value::from("BAR"));
    assert_eq!(input.raw_value(), &Value::from("  bar "));
}

#[test]
fn value_filters_the_raw_value_on_every_call() {
    let mut input = Input::new("foo");
    input
        .filter_chain_mut()
        .attach_fn(|v| Value::from(format!("{}x", v.scalar_text())));
    input.set_value("bar");

    assert_eq!(input.value(), Value::from("barx"));
    assert_eq!(input.value(), Value::from("barx"));
}

#[test]
fn validators_see_the_filtered_value() {
    let mut input = Input::new("zip");
    input.filter_chain_mut().attach(Arc::new(StringTrim));
    input.validator_chain_mut().attach(Arc::new(Digits));

    input.set_value(" 123 ");
    assert!(input.is_valid());
    assert_eq!(input.validation_state(), ValidationState::Valid);

    input.set_value(" 12a ");
    assert!(!input.is_valid());
    assert_eq!(
        input.messages().get(Digits::NOT_DIGITS),
        Some("The input must contain only digits")
    );
}

#[test]
fn every_failure_is_reported() {
    let mut input = Input::new("foo");
    input
        .validator_chain_mut()
        .attach(Arc::new(Digits))
        .attach(never_passes("callback says no"));
    input.set_value("abc");

    assert!(!input.is_valid());
    let codes: Vec<&str> = input.messages().codes().collect();
    assert_eq!(codes, vec![Digits::NOT_DIGITS, Callback::VALUE]);
}

#[test]
fn messages_are_cleared_by_a_passing_run() {
    let mut input = Input::new("foo");
    input.validator_chain_mut().attach(Arc::new(Digits));

    input.set_value("x");
    assert!(!input.is_valid());
    assert!(!input.messages().is_empty());

    input.set_value("1");
    assert!(input.is_valid());
    assert!(input.messages().is_empty());
}

#[test]
fn error_message_replaces_generated_messages() {
    let mut input = Input::new("foo");
    input.validator_chain_mut().attach(Arc::new(Digits));
    input.set_error_message(Some("Please enter only digits".into()));
    input.set_value("abc");

    assert!(!input.is_valid());
    assert!(!input.messages().contains_code(Digits::NOT_DIGITS));
    assert!(input.messages().contains_message("Please enter only digits"));
    assert_eq!(input.messages(), &Messages::overridden("Please enter only digits"));
}

#[rstest]
#[case::null(Value::Null)]
#[case::empty_string(Value::from(""))]
#[case::empty_list(Value::List(vec![]))]
#[case::empty_map(Value::Map(IndexMap::new()))]
fn required_empty_value_is_rejected(#[case] value: Value) {
    let mut input = Input::new("foo");
    input.set_value(value);

    assert!(!input.is_valid());
    assert_eq!(
        input.messages().get(NotEmpty::IS_EMPTY),
        Some("Value is required and can't be empty")
    );
}

#[rstest]
#[case::null(Value::Null)]
#[case::empty_string(Value::from(""))]
#[case::empty_list(Value::List(vec![]))]
fn allow_empty_skips_validators(#[case] value: Value) {
    let mut input = Input::new("foo");
    input.set_allow_empty(true);
    input.validator_chain_mut().attach(never_passes("should never run"));
    input.set_value(value);

    assert!(input.is_valid());
    assert!(input.messages().is_empty());
}

#[rstest]
#[case::required(true)]
#[case::optional(false)]
fn continue_if_empty_runs_validators(#[case] required: bool) {
    let mut input = Input::new("foo");
    input.set_required(required);
    input.set_continue_if_empty(true);
    input.validator_chain_mut().attach(never_passes("empty is not ok"));
    input.set_value("");

    assert!(!input.is_valid());
    assert_eq!(input.messages().get(Callback::VALUE), Some("empty is not ok"));
}

#[test]
fn filter_turning_empty_into_value_makes_it_valid() {
    let mut input = Input::new("foo");
    input.filter_chain_mut().attach_fn(|v| {
        if v.is_empty() { Value::from("nonempty") } else { v }
    });
    input.set_value("");

    assert!(input.is_valid());
    assert_eq!(input.value(), Value::from("nonempty"));
}

#[test]
fn filter_turning_value_into_empty_makes_it_invalid() {
    let mut input = Input::new("foo");
    input.filter_chain_mut().attach_fn(|_| Value::Null);
    input.set_value("bar");

    assert!(!input.is_valid());
    assert!(input.messages().contains_code(NotEmpty::IS_EMPTY));
}

#[rstest]
#[case::string(Value::from("fallback"))]
#[case::int(Value::Int(0))]
#[case::list(Value::List(vec![Value::from("a")]))]
fn fallback_replaces_missing_required_value(#[case] fallback: Value) {
    let mut input = Input::new("foo");
    input.set_fallback_value(Some(fallback.clone()));

    assert!(input.is_valid());
    assert!(input.messages().is_empty());
    assert_eq!(input.value(), fallback);
    assert!(input.raw_value().is_null());
}

#[test]
fn fallback_replaces_rejected_value() {
    let mut input = Input::new("foo");
    input.validator_chain_mut().attach(Arc::new(Digits));
    input.set_fallback_value(Some(Value::from("0")));
    input.set_value("abc");

    assert!(input.is_valid());
    assert_eq!(input.value(), Value::from("0"));

    input.set_value("42");
    assert!(input.is_valid());
    assert_eq!(input.value(), Value::from("42"));
}

#[test]
fn without_fallback_value_is_still_the_filtered_value() {
    let mut input = Input::new("foo");
    input.set_required(false);
    input.filter_chain_mut().attach(Arc::new(StringToUpper));
    input.set_value("");

    assert!(input.is_valid());
    assert_eq!(input.value(), Value::from(""));
}

#[test]
fn built_from_json_options() {
    let options = InputOptions::from_json(
        r#"{
            "required": false,
            "fallback_value": "n/a",
            "error_message": "Invalid value"
        }"#,
    )
    .unwrap();
    let mut input = Input::with_options("foo", &options);

    assert!(!input.is_required());
    assert_eq!(input.fallback_value(), Some(&Value::from("n/a")));
    assert_eq!(input.error_message(), Some("Invalid value"));

    assert!(input.is_valid());
    assert_eq!(input.value(), Value::from("n/a"));
    assert_eq!(input.options(), options);
}
