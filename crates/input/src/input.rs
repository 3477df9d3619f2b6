//! Base input: filter, then validate
//!
//! [`Input`] judges emptiness on the *filtered* value, runs the validator
//! chain against that same filtered value, and can substitute a configured
//! fallback when the value is empty or rejected.

use tracing::{debug, trace};

use crate::options::InputOptions;
use crate::pipeline::{InputState, Pipeline};
use crate::value::Value;

/// Single-value input pipeline for scalar and structured data.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use nebula_input::filter::StringTrim;
/// use nebula_input::validator::Digits;
/// use nebula_input::{Input, Pipeline, Value};
///
/// let mut input = Input::new("age");
/// input.filter_chain_mut().attach(Arc::new(StringTrim));
/// input.validator_chain_mut().attach(Arc::new(Digits));
///
/// input.set_value(" 42 ");
/// assert!(input.is_valid());
/// assert_eq!(input.value(), Value::from("42"));
/// assert_eq!(input.raw_value(), &Value::from(" 42 "));
/// ```
#[derive(Debug, Clone)]
pub struct Input {
    state: InputState,
}

impl Input {
    /// Creates an input with default options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: InputState::new(name),
        }
    }

    /// Creates an input configured from `options`.
    pub fn with_options(name: impl Into<String>, options: &InputOptions) -> Self {
        let mut input = Self::new(name);
        input.state.apply_options(options);
        input
    }

    fn filtered(&self) -> Value {
        self.state.filters.filter(self.state.raw.clone())
    }
}

impl Pipeline for Input {
    fn state(&self) -> &InputState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    fn is_empty_value(&self, value: &Value) -> bool {
        value.is_empty()
    }

    fn is_valid(&mut self) -> bool {
        self.state.begin_validation();
        let filtered = self.filtered();

        if self.is_empty_value(&filtered) && !self.state.continue_if_empty {
            trace!(input = %self.state.name, "empty value, validators skipped");
            let accepted = if self.state.required {
                self.state.allow_empty || self.state.apply_fallback()
            } else {
                self.state.apply_fallback();
                true
            };
            let outcome = if accepted {
                Ok(())
            } else {
                Err(InputState::required_failure())
            };
            return self.state.finish(outcome);
        }

        let outcome = match self.state.validators.validate(&filtered) {
            Err(errors) if self.state.apply_fallback() => {
                debug!(input = %self.state.name, failures = errors.len(), "rejected value replaced by fallback");
                Ok(())
            }
            outcome => outcome,
        };
        self.state.finish(outcome)
    }

    fn value(&self) -> Value {
        match &self.state.fallback {
            Some(fallback) if self.state.fallback_applied => fallback.clone(),
            _ => self.filtered(),
        }
    }
}
