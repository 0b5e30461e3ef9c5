//! Traits which, typically, may be imported without concern: `use argkit::prelude::*`.
use crate::model::{ParameterType, Value};

/// Behaviour to read a typed `Self` back out of a parameter's [`Value`].
///
/// This is the checked replacement for writing into an untyped output slot:
/// a query whose type disagrees with the parameter's declared type is reported, not reinterpreted.
// Needs to be imported in order to implement a custom accessor.
pub trait FromValue: Sized {
    /// The parameter type this accessor reads.
    fn expected() -> ParameterType;

    /// Extract the typed value, or `None` when `value` holds a different type.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    fn expected() -> ParameterType {
        ParameterType::Bool
    }

    // Switches and booleans both read as `bool`.
    fn from_value(value: &Value) -> Option<Self> {
        value.as_switch()
    }
}

impl FromValue for i64 {
    fn expected() -> ParameterType {
        ParameterType::Integer
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn expected() -> ParameterType {
        ParameterType::Float
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn expected() -> ParameterType {
        ParameterType::String
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}
