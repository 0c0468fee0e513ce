//! The closed set of value types a published property may carry.
//!
//! The client-visible contract supports exactly five value kinds: booleans,
//! UTF-8 text, 32-bit integers, double-precision floats, and one opaque
//! JSON-like structured value. Modelling the set as an enum (rather than an
//! open type check) makes every dispatch over it exhaustive at compile time,
//! and the sealed [`PropertyValueType`] trait makes declaring a property of
//! an unsupported Rust type a compile error rather than a startup failure.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The kind tag of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// A `true`/`false` flag.
    Boolean,
    /// UTF-8 text.
    String,
    /// A 32-bit signed integer.
    Integer,
    /// A double-precision float.
    Double,
    /// An opaque JSON value.
    Json,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

/// A property value of one of the supported kinds.
///
/// Serializes untagged, so the wire shape is the plain JSON value the client
/// expects (`true`, `3`, `"text"`, `{...}`), not an enum wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A `true`/`false` flag.
    Boolean(bool),
    /// A 32-bit signed integer.
    Integer(i32),
    /// A double-precision float.
    Double(f64),
    /// UTF-8 text.
    String(String),
    /// An opaque JSON value.
    Json(serde_json::Value),
}

impl PropertyValue {
    /// Returns the kind tag of this value.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        match self {
            Self::Boolean(_) => PropertyKind::Boolean,
            Self::Integer(_) => PropertyKind::Integer,
            Self::Double(_) => PropertyKind::Double,
            Self::String(_) => PropertyKind::String,
            Self::Json(_) => PropertyKind::Json,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for i32 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for serde_json::Value {}
}

/// A Rust type usable as the value type of a published property.
///
/// Implemented for exactly [`bool`], [`i32`], [`f64`], [`String`] and
/// [`serde_json::Value`]; the trait is sealed, so the supported set cannot
/// grow outside this crate.
pub trait PropertyValueType: sealed::Sealed + Clone + Send + Sync + 'static {
    /// The kind tag corresponding to this Rust type.
    fn kind() -> PropertyKind;

    /// Wraps a typed value into the dynamic representation.
    fn into_value(self) -> PropertyValue;

    /// Unwraps a dynamic value, or `None` when the kinds disagree.
    fn from_value(value: PropertyValue) -> Option<Self>;
}

impl PropertyValueType for bool {
    fn kind() -> PropertyKind {
        PropertyKind::Boolean
    }

    fn into_value(self) -> PropertyValue {
        PropertyValue::Boolean(self)
    }

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Boolean(value) => Some(value),
            _ => None,
        }
    }
}

impl PropertyValueType for i32 {
    fn kind() -> PropertyKind {
        PropertyKind::Integer
    }

    fn into_value(self) -> PropertyValue {
        PropertyValue::Integer(self)
    }

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Integer(value) => Some(value),
            _ => None,
        }
    }
}

impl PropertyValueType for f64 {
    fn kind() -> PropertyKind {
        PropertyKind::Double
    }

    fn into_value(self) -> PropertyValue {
        PropertyValue::Double(self)
    }

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Double(value) => Some(value),
            _ => None,
        }
    }
}

impl PropertyValueType for String {
    fn kind() -> PropertyKind {
        PropertyKind::String
    }

    fn into_value(self) -> PropertyValue {
        PropertyValue::String(self)
    }

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl PropertyValueType for serde_json::Value {
    fn kind() -> PropertyKind {
        PropertyKind::Json
    }

    fn into_value(self) -> PropertyValue {
        PropertyValue::Json(self)
    }

    fn from_value(value: PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Json(value) => Some(value),
            _ => None,
        }
    }
}
