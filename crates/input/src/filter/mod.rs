//! Filter units and the filter chain
//!
//! A filter is a pure `Value -> Value` transformation. A [`FilterChain`] pipes
//! a value through every enabled filter in execution order, each filter's
//! output becoming the next one's input.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use nebula_input::filter::{FilterChain, StringToUpper, StringTrim};
//! use nebula_input::Value;
//!
//! let mut chain = FilterChain::new();
//! chain.attach(Arc::new(StringTrim)).attach(Arc::new(StringToUpper));
//! assert_eq!(chain.filter(Value::from("  abc ")), Value::from("ABC"));
//! ```

mod string;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::chain::Chain;
use crate::value::Value;

pub use string::{StringToUpper, StringTrim};

// ============================================================================
// FILTER TRAIT
// ============================================================================

/// A transformation applied to an input value.
pub trait Filter: Send + Sync {
    /// Transforms `value`.
    fn filter(&self, value: Value) -> Value;

    /// Name used in diagnostics.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// Chain of filters, executed as a pipe.
pub type FilterChain = Chain<dyn Filter>;

impl Chain<dyn Filter> {
    /// Attaches a closure as a filter at the default priority.
    pub fn attach_fn<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.attach(Arc::new(Callback::new(f)))
    }

    /// Runs `value` through every enabled filter.
    #[must_use]
    pub fn filter(&self, value: Value) -> Value {
        self.enabled_entries()
            .fold(value, |acc, entry| entry.unit().filter(acc))
    }
}

impl fmt::Debug for Chain<dyn Filter> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.units().map(|unit| unit.name()))
            .finish()
    }
}

// ============================================================================
// CALLBACK FILTER
// ============================================================================

/// Filter backed by a closure.
pub struct Callback {
    f: Box<dyn Fn(Value) -> Value + Send + Sync>,
}

impl Callback {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl Filter for Callback {
    fn filter(&self, value: Value) -> Value {
        (self.f)(value)
    }

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("callback")
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
