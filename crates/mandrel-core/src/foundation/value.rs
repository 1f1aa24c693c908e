//! Attribute values and identity types.
//!
//! Attribute values, operation parameters and operation results are all
//! [`serde_json::Value`] — the dynamic payload currency of the crate. This
//! module adds the small records built on top of it: the [`Attribute`]
//! name/value pair used by the plural entry points, and the [`ObjectName`]
//! identity a managed object is assigned at registration time.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Empty parameter list passed when invoking attribute getters.
pub const NO_ARGS: &[Value] = &[];

// =============================================================================
// Object Identity
// =============================================================================

/// Opaque identifier assigned to a managed object at registration time.
///
/// The adapter never interprets the name; it records whatever the registry
/// (or the resource's own pre-register hook) decides and hands it back on
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectName(String);

impl ObjectName {
    /// Creates a name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ObjectName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// A named attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value.
    pub value: Value,
}

impl Attribute {
    /// Creates a new name/value pair.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Ordered list of attributes returned by the plural entry points.
pub type AttributeList = Vec<Attribute>;

/// Returns the type name of a value, used as the declared type of an
/// attribute change.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
