use thiserror::Error;

use crate::model::{ParameterType, Value};

/// Behaviour to convert an input `&str` into the [`Value`] of one parameter type.
///
/// One implementation exists per [`ParameterType`]; a [`Parameter`](crate::Parameter) holds the cell matching its declared type.
pub(crate) trait ValueCell: std::fmt::Debug {
    /// The parameter type this cell produces.
    fn parameter_type(&self) -> ParameterType;

    /// The name used to describe this cell's target in conversion errors.
    fn type_name(&self) -> &'static str;

    /// Convert a raw token into a staged value, without touching any parameter.
    fn convert(&self, token: &str) -> Result<Value, InvalidConversion>;
}

/// A raw token could not be converted into the parameter's type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot convert '{token}' to {type_name}.")]
pub struct InvalidConversion {
    /// The offending raw token.
    pub token: String,
    /// The target type description (ex: `i64`).
    pub type_name: &'static str,
}

impl InvalidConversion {
    pub(crate) fn new(token: impl Into<String>, type_name: &'static str) -> Self {
        Self {
            token: token.into(),
            type_name,
        }
    }
}
