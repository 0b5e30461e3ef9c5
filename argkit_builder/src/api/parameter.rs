use crate::api::{create_cell, InvalidConversion, ValueCell};
use crate::constant::*;
use crate::model::{ParameterType, Value};
use crate::parser::QueryError;
use crate::prelude::FromValue;

/// A single named option: its names, description, declared type and current value.
///
/// Either name may be empty, but not both (an unnamed parameter fails help rendering).
///
/// ### Example
/// ```
/// # use argkit_builder as argkit;
/// use argkit::{Parameter, ParameterType, Parser};
///
/// let mut parser = Parser::new();
/// parser
///     .add(
///         Parameter::new("m", "mask", "The permission mask.", ParameterType::Integer)
///             .base(8)
///             .unsigned()
///             .default_value("644"),
///     )
///     .unwrap();
///
/// parser.parse_tokens(&["chmod", "--mask", "755"]).unwrap();
/// assert_eq!(parser.value::<i64>("mask").unwrap(), Some(0o755));
/// ```
#[derive(Debug)]
pub struct Parameter {
    short_name: String,
    name: String,
    description: String,
    parameter_type: ParameterType,
    required: bool,
    default_value: Option<String>,
    radix: u32,
    signed: bool,
    cell: Box<dyn ValueCell>,
    value: Value,
    held: bool,
}

impl Parameter {
    /// Create a parameter.
    /// Pass an empty string for whichever of `short_name`/`name` the parameter does not use.
    pub fn new(
        short_name: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        parameter_type: ParameterType,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            name: name.into(),
            description: description.into(),
            parameter_type,
            required: false,
            default_value: None,
            radix: DEFAULT_BASE,
            signed: true,
            cell: create_cell(parameter_type, DEFAULT_BASE, true),
            value: Value::initial(parameter_type),
            held: false,
        }
    }

    /// Declare whether the parameter must hold a value once a parse completes.
    /// A non-empty default, or a value from an earlier parse, satisfies it.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// The raw text converted into the value at registration.
    /// Ignored for [`ParameterType::None`]; an empty default keeps the type's initial value.
    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value.replace(default_value.into());
        self
    }

    /// The radix used to parse an [`ParameterType::Integer`] (`2..=36`, default `10`).
    /// Has no effect on other types.
    pub fn base(mut self, base: u32) -> Self {
        self.radix = base;
        self.cell = create_cell(self.parameter_type, self.radix, self.signed);
        self
    }

    /// Reject negative [`ParameterType::Integer`] values (and values needing the sign bit).
    /// Has no effect on other types.
    pub fn unsigned(mut self) -> Self {
        self.signed = false;
        self.cell = create_cell(self.parameter_type, self.radix, self.signed);
        self
    }

    /// The short name, without the leading `-` (may be empty).
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// The long name, without the leading `--` (may be empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The help text for this parameter.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The declared value type.
    pub fn parameter_type(&self) -> ParameterType {
        self.parameter_type
    }

    /// Whether the parameter must hold a value once a parse completes.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Change whether the parameter must hold a value once a parse completes.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// The current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// How this parameter is named in messages: `--name` when it has a long name, otherwise `-s`.
    pub fn flag(&self) -> String {
        if !self.name.is_empty() {
            format!("--{}", self.name)
        } else if !self.short_name.is_empty() {
            format!("-{}", self.short_name)
        } else {
            "<unnamed>".to_string()
        }
    }

    /// Convert `raw` and store it as the current value.
    /// On failure the current value is left as it was.
    pub fn set(&mut self, raw: &str) -> Result<(), InvalidConversion> {
        self.value = self.cell.convert(raw)?;
        self.held = true;
        Ok(())
    }

    /// Write the current value into `slot`.
    /// Fails if `T` disagrees with the declared type, leaving `slot` untouched.
    pub fn get_value_to<T: FromValue>(&self, slot: &mut T) -> Result<(), QueryError> {
        *slot = self.value_as()?;
        Ok(())
    }

    /// Read the current value as `T`.
    pub fn value_as<T: FromValue>(&self) -> Result<T, QueryError> {
        T::from_value(&self.value).ok_or_else(|| QueryError::TypeMismatch {
            flag: self.flag(),
            expected: T::expected(),
            actual: self.parameter_type,
        })
    }

    /// Whether a default or an earlier parse has given the parameter a value.
    pub(crate) fn holds_value(&self) -> bool {
        self.held
    }

    pub(crate) fn radix(&self) -> u32 {
        self.radix
    }

    pub(crate) fn convert(&self, raw: &str) -> Result<Value, InvalidConversion> {
        self.cell.convert(raw)
    }

    pub(crate) fn assign(&mut self, value: Value) {
        debug_assert_eq!(value.parameter_type(), self.cell.parameter_type());
        self.value = value;
        self.held = true;
    }

    pub(crate) fn apply_default(&mut self) -> Result<(), InvalidConversion> {
        if !self.parameter_type.takes_value() {
            return Ok(());
        }

        match self.default_value.clone() {
            Some(default_value) if !default_value.is_empty() => self.set(&default_value),
            _ => Ok(()),
        }
    }
}
