//! String filters
//!
//! Both filters act on string scalars and on the `tmp_name` of an upload
//! record. Every other value passes through untouched.

use super::Filter;
use crate::value::Value;

fn map_text(value: Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        Value::Upload(mut record) => {
            record.tmp_name = f(&record.tmp_name);
            Value::Upload(record)
        }
        other => other,
    }
}

/// Strips leading and trailing whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringTrim;

impl Filter for StringTrim {
    fn filter(&self, value: Value) -> Value {
        map_text(value, |s| s.trim().to_owned())
    }
}

/// Converts to upper case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringToUpper;

impl Filter for StringToUpper {
    fn filter(&self, value: Value) -> Value {
        map_text(value, str::to_uppercase)
    }
}
