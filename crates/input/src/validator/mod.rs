//! Validator units and the validator chain
//!
//! A validator inspects a [`Value`] and either accepts it or reports a coded
//! [`ValidationError`]. Every validator also carries a [`ValidatorKind`] tag,
//! which is how an input recognises units it manages itself (the upload check
//! a [`FileInput`](crate::FileInput) prepends, for instance) without runtime
//! type inspection.
//!
//! A [`ValidatorChain`] run executes *every* enabled unit and aggregates all
//! failures. Only an entry explicitly attached with
//! [`ChainEntry::breaking`](crate::ChainEntry::breaking) stops the run when it
//! fails.

mod basic;
mod file;
mod upload;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::chain::{Chain, ChainEntry};
use crate::error::{ValidationError, ValidationErrors};
use crate::value::Value;

pub use basic::{Callback, Digits, NotEmpty};
pub use file::FileExists;
pub use upload::{UploadFile, UploadVerifier};

// ============================================================================
// VALIDATOR TRAIT
// ============================================================================

/// Capability tag of a validator unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidatorKind {
    /// Any caller-supplied check.
    #[default]
    Generic,
    /// Rejects empty values.
    NotEmpty,
    /// Asserts that a file was actually uploaded.
    UploadCheck,
}

/// A check applied to an input value.
///
/// # Examples
///
/// ```rust
/// use nebula_input::{Validate, ValidationError, Value};
///
/// struct Even;
///
/// impl Validate for Even {
///     fn validate(&self, value: &Value) -> Result<(), ValidationError> {
///         match value {
///             Value::Int(n) if n % 2 == 0 => Ok(()),
///             _ => Err(ValidationError::new("notEven", "The input must be even")),
///         }
///     }
/// }
///
/// assert!(Even.validate(&Value::Int(4)).is_ok());
/// ```
pub trait Validate: Send + Sync {
    /// Validates `value`.
    fn validate(&self, value: &Value) -> Result<(), ValidationError>;

    /// Capability tag of this unit.
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Generic
    }

    /// Name used in diagnostics.
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// Chain of validators, executed with failure aggregation.
pub type ValidatorChain = Chain<dyn Validate>;

impl Chain<dyn Validate> {
    /// Attaches a unit that ends the run when it fails.
    pub fn attach_breaking(&mut self, validator: Arc<dyn Validate>) -> &mut Self {
        self.insert(ChainEntry::new(validator).breaking())
    }

    /// Attaches a closure predicate, reported under [`Callback::VALUE`].
    pub fn attach_fn<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.attach(Arc::new(Callback::new(predicate)))
    }

    /// Returns true if any unit, enabled or not, carries `kind`.
    #[must_use]
    pub fn contains_kind(&self, kind: ValidatorKind) -> bool {
        self.units().any(|unit| unit.kind() == kind)
    }

    /// Runs every enabled unit against `value`.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for entry in self.enabled_entries() {
            let Err(error) = entry.unit().validate(value) else {
                continue;
            };
            trace!(validator = %entry.unit().name(), code = %error.code, "validator failed");
            errors.add(error);
            if entry.breaks_chain_on_failure() {
                break;
            }
        }

        errors.into_result()
    }

    /// Convenience wrapper returning only the overall outcome.
    #[must_use]
    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }
}

impl fmt::Debug for Chain<dyn Validate> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.units().map(|unit| unit.name()))
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
