//! Operation signature resolution.
//!
//! Signatures travel as plain type-name strings, the way the management
//! surface receives them from callers. This module resolves those names to
//! [`ParamType`]s and checks incoming argument lists against them; metadata
//! resolvers use it to pick the right overload before handing back a
//! handle.

use std::str::FromStr;

use serde_json::Value;

/// Parameter types a signature element can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Boolean.
    Bool,
    /// Integer number.
    Int,
    /// Floating-point number.
    Float,
    /// String.
    Str,
    /// Array of values.
    Array,
    /// Object / map of values.
    Object,
    /// Any value; never rejects an argument.
    Any,
}

impl FromStr for ParamType {
    type Err = ();

    /// Accepts the Rust primitive spellings alongside the JSON family
    /// names, so signatures written against either vocabulary resolve.
    fn from_str(signature: &str) -> Result<Self, Self::Err> {
        Ok(match signature {
            "bool" | "boolean" => ParamType::Bool,
            "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "int" | "integer" => {
                ParamType::Int
            }
            "f32" | "f64" | "float" | "double" => ParamType::Float,
            "str" | "string" | "String" => ParamType::Str,
            "array" | "list" => ParamType::Array,
            "object" | "map" => ParamType::Object,
            "value" | "any" => ParamType::Any,
            _ => return Err(()),
        })
    }
}

impl ParamType {
    /// Checks that `value` is acceptable for this parameter type.
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (ParamType::Any, _) => true,
            (ParamType::Bool, Value::Bool(_)) => true,
            (ParamType::Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (ParamType::Float, Value::Number(_)) => true,
            (ParamType::Str, Value::String(_)) => true,
            (ParamType::Array, Value::Array(_)) => true,
            (ParamType::Object, Value::Object(_)) => true,
            _ => false,
        }
    }
}

/// Resolves a full signature, failing on the first unknown element.
pub fn resolve_signature(signature: &[String]) -> Option<Vec<ParamType>> {
    signature
        .iter()
        .map(|element| element.parse().ok())
        .collect()
}

/// Checks an argument list against a resolved signature.
pub fn check_params(types: &[ParamType], params: &[Value]) -> bool {
    types.len() == params.len()
        && types
            .iter()
            .zip(params)
            .all(|(param_type, value)| param_type.admits(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rust_and_json_spellings_both_resolve() {
        assert_eq!("i64".parse(), Ok(ParamType::Int));
        assert_eq!("integer".parse(), Ok(ParamType::Int));
        assert_eq!("f64".parse(), Ok(ParamType::Float));
        assert_eq!("string".parse(), Ok(ParamType::Str));
        assert_eq!("bool".parse(), Ok(ParamType::Bool));
        assert!("widget".parse::<ParamType>().is_err());
    }

    #[test]
    fn int_rejects_fractions_but_float_admits_them() {
        assert!(ParamType::Int.admits(&json!(7)));
        assert!(!ParamType::Int.admits(&json!(7.5)));
        assert!(ParamType::Float.admits(&json!(7.5)));
        assert!(ParamType::Float.admits(&json!(7)));
    }

    #[test]
    fn any_admits_everything() {
        assert!(ParamType::Any.admits(&Value::Null));
        assert!(ParamType::Any.admits(&json!({"k": []})));
    }

    #[test]
    fn signature_check_requires_arity_and_types() {
        let types = resolve_signature(&["i64".to_string(), "string".to_string()]).unwrap();
        assert!(check_params(&types, &[json!(1), json!("x")]));
        assert!(!check_params(&types, &[json!(1)]));
        assert!(!check_params(&types, &[json!("x"), json!("y")]));
    }

    #[test]
    fn unknown_signature_element_fails_resolution() {
        assert!(resolve_signature(&["i64".to_string(), "blob".to_string()]).is_none());
        assert_eq!(resolve_signature(&[]), Some(Vec::new()));
    }
}
