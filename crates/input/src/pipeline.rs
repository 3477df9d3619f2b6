//! The shared pipeline contract
//!
//! Both input variants hold the same [`InputState`] and expose it through the
//! [`Pipeline`] trait. The trait supplies every accessor, configuration setter
//! and the merge protocol once; a variant only decides how emptiness is
//! judged, in which order filtering and validation happen, and what
//! [`Pipeline::value`] returns.
//!
//! # Lifecycle
//!
//! ```text
//! set_value ──► Unvalidated ──is_valid()──► Valid | Invalid
//!                   ▲                          │
//!                   └──────── set_value / merge┘
//! ```
//!
//! `messages` are cleared at the start of every [`Pipeline::is_valid`] call
//! and filled only when that call fails.

use tracing::debug;

use crate::error::{Messages, ValidationErrors};
use crate::file_input::FileInput;
use crate::filter::FilterChain;
use crate::options::InputOptions;
use crate::validator::{NotEmpty, ValidatorChain};
use crate::value::Value;

// ============================================================================
// STATE
// ============================================================================

/// Outcome of the most recent validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationState {
    /// No run since the value was last assigned.
    #[default]
    Unvalidated,
    /// The last run accepted the value.
    Valid,
    /// The last run rejected the value.
    Invalid,
}

/// Configuration, chains and run state of one input.
#[derive(Debug, Clone)]
pub struct InputState {
    pub(crate) name: String,
    pub(crate) raw: Value,
    pub(crate) required: bool,
    pub(crate) allow_empty: bool,
    pub(crate) continue_if_empty: bool,
    pub(crate) fallback: Option<Value>,
    pub(crate) error_message: Option<String>,
    pub(crate) filters: FilterChain,
    pub(crate) validators: ValidatorChain,
    pub(crate) messages: Messages,
    pub(crate) validation: ValidationState,
    pub(crate) fallback_applied: bool,
}

impl InputState {
    /// Fresh state with default flags.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let defaults = InputOptions::default();
        Self {
            name: name.into(),
            raw: Value::Null,
            required: defaults.required,
            allow_empty: defaults.allow_empty,
            continue_if_empty: defaults.continue_if_empty,
            fallback: None,
            error_message: None,
            filters: FilterChain::new(),
            validators: ValidatorChain::new(),
            messages: Messages::new(),
            validation: ValidationState::Unvalidated,
            fallback_applied: false,
        }
    }

    /// Stores a new raw value and forgets the previous run.
    pub(crate) fn assign(&mut self, value: Value) {
        self.raw = value;
        self.reset_run();
    }

    pub(crate) fn apply_options(&mut self, options: &InputOptions) {
        self.required = options.required;
        self.allow_empty = options.allow_empty;
        self.continue_if_empty = options.continue_if_empty;
        self.fallback.clone_from(&options.fallback_value);
        self.error_message.clone_from(&options.error_message);
    }

    /// Prepares for a validation run.
    pub(crate) fn begin_validation(&mut self) {
        self.messages.clear();
        self.fallback_applied = false;
    }

    /// Returns true when an empty value needs no further checks.
    pub(crate) fn accepts_empty(&self) -> bool {
        !self.required || self.allow_empty
    }

    /// Marks the fallback as the exposed value; false if none is configured.
    pub(crate) fn apply_fallback(&mut self) -> bool {
        if self.fallback.is_none() {
            return false;
        }
        debug!(input = %self.name, "fallback value substituted");
        self.fallback_applied = true;
        true
    }

    /// The failure reported for a required value that is empty.
    pub(crate) fn required_failure() -> ValidationErrors {
        NotEmpty::failure().into()
    }

    /// Records the outcome of a run and returns it as a bool.
    pub(crate) fn finish(&mut self, outcome: Result<(), ValidationErrors>) -> bool {
        match outcome {
            Ok(()) => {
                self.validation = ValidationState::Valid;
                true
            }
            Err(errors) => {
                debug!(input = %self.name, failures = errors.len(), "input rejected");
                self.messages = match &self.error_message {
                    Some(text) => Messages::overridden(text.as_str()),
                    None => Messages::from_errors(&errors),
                };
                self.validation = ValidationState::Invalid;
                false
            }
        }
    }

    /// Copies configuration, raw value and chains from `source`.
    pub(crate) fn merge_from(&mut self, source: &InputState) {
        debug!(input = %self.name, source = %source.name, "merging input");
        self.required = source.required;
        self.allow_empty = source.allow_empty;
        self.continue_if_empty = source.continue_if_empty;
        self.fallback.clone_from(&source.fallback);
        self.error_message.clone_from(&source.error_message);
        self.filters = source.filters.clone();
        self.validators = source.validators.clone();
        self.assign(source.raw.clone());
    }

    fn reset_run(&mut self) {
        self.messages.clear();
        self.validation = ValidationState::Unvalidated;
        self.fallback_applied = false;
    }
}

// ============================================================================
// PIPELINE TRAIT
// ============================================================================

/// Shared contract of the base [`Input`](crate::Input) and
/// [`FileInput`].
///
/// # Examples
///
/// ```rust
/// use nebula_input::{FileInput, Input, Pipeline};
///
/// let mut source = Input::new("age");
/// source.set_required(false);
/// source.set_value("42");
///
/// let mut target = FileInput::new("avatar");
/// target.merge(&source);
/// assert_eq!(target.name(), "avatar");
/// assert!(!target.is_required());
/// ```
pub trait Pipeline {
    /// Shared state.
    fn state(&self) -> &InputState;

    /// Shared state, mutably.
    fn state_mut(&mut self) -> &mut InputState;

    /// Emptiness predicate of this variant.
    fn is_empty_value(&self, value: &Value) -> bool;

    /// Runs the validation state machine over the current raw value.
    fn is_valid(&mut self) -> bool;

    /// The value to hand downstream.
    fn value(&self) -> Value;

    /// Downcast to the file variant.
    fn as_file_input(&self) -> Option<&FileInput> {
        None
    }

    /// Identifier given at construction.
    fn name(&self) -> &str {
        &self.state().name
    }

    /// Assigns the raw value.
    fn set_value<V>(&mut self, value: V)
    where
        V: Into<Value>,
        Self: Sized,
    {
        self.set_raw_value(value.into());
    }

    /// Object-safe form of [`Pipeline::set_value`].
    fn set_raw_value(&mut self, value: Value) {
        self.state_mut().assign(value);
    }

    /// The last assigned value, unmodified.
    fn raw_value(&self) -> &Value {
        &self.state().raw
    }

    /// Failure messages of the last run.
    fn messages(&self) -> &Messages {
        &self.state().messages
    }

    /// Outcome of the last run.
    fn validation_state(&self) -> ValidationState {
        self.state().validation
    }

    fn set_required(&mut self, required: bool) {
        self.state_mut().required = required;
    }

    fn is_required(&self) -> bool {
        self.state().required
    }

    fn set_allow_empty(&mut self, allow_empty: bool) {
        self.state_mut().allow_empty = allow_empty;
    }

    fn allow_empty(&self) -> bool {
        self.state().allow_empty
    }

    fn set_continue_if_empty(&mut self, continue_if_empty: bool) {
        self.state_mut().continue_if_empty = continue_if_empty;
    }

    fn continue_if_empty(&self) -> bool {
        self.state().continue_if_empty
    }

    /// Sets or clears the fallback value.
    fn set_fallback_value(&mut self, fallback: Option<Value>) {
        self.state_mut().fallback = fallback;
    }

    fn fallback_value(&self) -> Option<&Value> {
        self.state().fallback.as_ref()
    }

    /// Replaces every generated failure message with `message`.
    fn set_error_message(&mut self, message: Option<String>) {
        self.state_mut().error_message = message;
    }

    fn error_message(&self) -> Option<&str> {
        self.state().error_message.as_deref()
    }

    fn filter_chain(&self) -> &FilterChain {
        &self.state().filters
    }

    fn filter_chain_mut(&mut self) -> &mut FilterChain {
        &mut self.state_mut().filters
    }

    fn validator_chain(&self) -> &ValidatorChain {
        &self.state().validators
    }

    fn validator_chain_mut(&mut self) -> &mut ValidatorChain {
        &mut self.state_mut().validators
    }

    /// Snapshot of the current configuration.
    fn options(&self) -> InputOptions {
        let state = self.state();
        InputOptions {
            required: state.required,
            allow_empty: state.allow_empty,
            continue_if_empty: state.continue_if_empty,
            fallback_value: state.fallback.clone(),
            error_message: state.error_message.clone(),
            auto_prepend_upload_validator: self
                .as_file_input()
                .is_none_or(FileInput::auto_prepend_upload_validator),
        }
    }

    /// Replaces configuration, raw value and chain contents with those of
    /// `source`. The name is kept.
    fn merge(&mut self, source: &dyn Pipeline) {
        self.state_mut().merge_from(source.state());
    }
}

// ============================================================================
// TESTS
// ============================================================================
