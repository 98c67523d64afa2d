//! # Value Object Contract
//!
//! The capability every value type exposes, temporal or not: a pure validity
//! predicate over raw input, a canonical string form through `Display`, and
//! a serialization form that is that same canonical string.

use serde::Serialize;

/// An immutable, self-validating wrapper around a raw scalar.
///
/// Implementors guarantee that a constructed value always satisfies its
/// format or range invariant, so consumers never re-validate.
pub trait ValueObject: std::fmt::Display + Serialize + Sized {
    /// Human-readable type name used in error messages and CLI output.
    const KIND: &'static str;

    /// Returns whether `value` would construct a valid instance.
    ///
    /// Never panics. Any construction failure maps to `false`.
    fn is_valid(value: &str) -> bool;

    /// Like [`ValueObject::is_valid`], for loosely typed input.
    ///
    /// Any JSON value that is not a string (booleans, numbers, arrays, ...)
    /// is the wrong kind of input and is rejected.
    fn is_value_valid(value: &serde_json::Value) -> bool {
        value.as_str().is_some_and(Self::is_valid)
    }

    /// The serialization form: a JSON string holding the canonical text.
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_string())
    }
}
