use std::str::FromStr;

use crate::parser::ConfigError;

/// The declared value type of a [`Parameter`](crate::Parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterType {
    /// A switch that takes no value; matching it marks the parameter as present.
    #[default]
    None,
    /// A 64-bit signed integer (see [`Parameter::base`](crate::Parameter::base) for radix and signedness).
    Integer,
    /// Text, stored verbatim.
    String,
    /// A 64-bit float.
    Float,
    /// A boolean, from one of `1`, `true`, `yes`, `on` (case-insensitive); anything else is `false`.
    Bool,
}

impl ParameterType {
    /// Whether the parameter consumes the token following its flag.
    pub fn takes_value(&self) -> bool {
        !matches!(self, ParameterType::None)
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParameterType::None => "none",
            ParameterType::Integer => "integer",
            ParameterType::String => "string",
            ParameterType::Float => "float",
            ParameterType::Bool => "bool",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ParameterType {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "none" | "flag" => Ok(ParameterType::None),
            "integer" | "int" => Ok(ParameterType::Integer),
            "string" | "str" => Ok(ParameterType::String),
            "float" | "double" => Ok(ParameterType::Float),
            "bool" | "boolean" => Ok(ParameterType::Bool),
            _ => Err(ConfigError::UnsupportedType {
                type_name: value.to_string(),
            }),
        }
    }
}

/// The current value held by a [`Parameter`](crate::Parameter).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Held by [`ParameterType::None`]: whether the switch was matched.
    Flag(bool),
    /// Held by [`ParameterType::Integer`].
    Integer(i64),
    /// Held by [`ParameterType::Float`].
    Float(f64),
    /// Held by [`ParameterType::String`].
    String(String),
    /// Held by [`ParameterType::Bool`].
    Bool(bool),
}

impl Value {
    /// The value a freshly registered parameter holds, before any default is applied.
    pub fn initial(parameter_type: ParameterType) -> Self {
        match parameter_type {
            ParameterType::None => Value::Flag(false),
            ParameterType::Integer => Value::Integer(0),
            ParameterType::String => Value::String(String::default()),
            ParameterType::Float => Value::Float(0.0),
            ParameterType::Bool => Value::Bool(false),
        }
    }

    /// The parameter type this value belongs to.
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            Value::Flag(_) => ParameterType::None,
            Value::Integer(_) => ParameterType::Integer,
            Value::Float(_) => ParameterType::Float,
            Value::String(_) => ParameterType::String,
            Value::Bool(_) => ParameterType::Bool,
        }
    }

    /// `Some(true)` for a matched switch or a true boolean; `None` for non-boolean values.
    pub fn as_switch(&self) -> Option<bool> {
        match self {
            Value::Flag(b) | Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Flag(b) | Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}
