//! # nebula-input
//!
//! Single-value input pipelines: take one raw, user-submitted value, run it
//! through an ordered chain of filters and an ordered chain of validators, and
//! decide whether it is acceptable.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use nebula_input::prelude::*;
//!
//! let mut input = Input::new("zip");
//! input.filter_chain_mut().attach(Arc::new(StringTrim));
//! input.validator_chain_mut().attach(Arc::new(Digits));
//!
//! input.set_value(" 12a ");
//! assert!(!input.is_valid());
//! assert!(input.messages().contains_code(Digits::NOT_DIGITS));
//! ```
//!
//! ## Variants
//!
//! - [`Input`]: filters first, then validates the filtered value. Supports a
//!   fallback value.
//! - [`FileInput`]: validates upload metadata first and filters only a value
//!   that passed, record by record for multi-file fields. Prepends an
//!   [`UploadFile`](validator::UploadFile) check unless one is present.
//!
//! Both implement [`Pipeline`], which also carries the merge protocol.
//!
//! ## Chains
//!
//! [`FilterChain`] and [`ValidatorChain`] are the same priority-ordered
//! [`Chain`] container over different unit traits. Units are shared through
//! `Arc`, so callers keep a handle on anything they attach.

pub mod chain;
pub mod error;
pub mod file_input;
pub mod filter;
pub mod input;
pub mod options;
pub mod pipeline;
pub mod prelude;
pub mod upload;
pub mod validator;
pub mod value;

pub use chain::{Chain, ChainEntry, DEFAULT_PRIORITY};
pub use error::{
    ERROR_MESSAGE_KEY, InputError, InputResult, Messages, ValidationError, ValidationErrors,
};
pub use file_input::FileInput;
pub use filter::{Filter, FilterChain};
pub use input::Input;
pub use options::InputOptions;
pub use pipeline::{InputState, Pipeline, ValidationState};
pub use upload::{UploadRecord, UploadStatus};
pub use validator::{Validate, ValidatorChain, ValidatorKind};
pub use value::Value;
