//! Prelude module for convenient imports.
//!
//! `use nebula_input::prelude::*;` brings in both input variants, the
//! [`Pipeline`] trait, the unit traits and every bundled unit.
//!
//! The filter and validator `Callback` types share a name and are left out;
//! reach them through [`crate::filter`] and [`crate::validator`].

// ============================================================================
// PIPELINES
// ============================================================================

pub use crate::file_input::FileInput;
pub use crate::input::Input;
pub use crate::options::InputOptions;
pub use crate::pipeline::{Pipeline, ValidationState};

// ============================================================================
// CHAINS AND UNITS
// ============================================================================

pub use crate::chain::{Chain, ChainEntry};
pub use crate::filter::{Filter, FilterChain, StringToUpper, StringTrim};
pub use crate::validator::{
    Digits, FileExists, NotEmpty, UploadFile, Validate, ValidatorChain, ValidatorKind,
};

// ============================================================================
// VALUES AND ERRORS
// ============================================================================

pub use crate::error::{InputError, Messages, ValidationError, ValidationErrors};
pub use crate::upload::{UploadRecord, UploadStatus};
pub use crate::value::Value;
