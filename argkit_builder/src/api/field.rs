use crate::api::capture::*;
use crate::constant::*;
use crate::model::{ParameterType, Value};

/// The cell factory: one cell per parameter type.
pub(crate) fn create_cell(parameter_type: ParameterType, base: u32, signed: bool) -> Box<dyn ValueCell> {
    match parameter_type {
        ParameterType::None => Box::new(Switch),
        ParameterType::Integer => Box::new(Integer::new(base, signed)),
        ParameterType::String => Box::new(Text),
        ParameterType::Float => Box::new(Float),
        ParameterType::Bool => Box::new(Toggle),
    }
}

/// A parameter that takes no value: any conversion marks it as present.
#[derive(Debug)]
pub(crate) struct Switch;

impl ValueCell for Switch {
    fn parameter_type(&self) -> ParameterType {
        ParameterType::None
    }

    fn type_name(&self) -> &'static str {
        "flag"
    }

    fn convert(&self, _token: &str) -> Result<Value, InvalidConversion> {
        Ok(Value::Flag(true))
    }
}

/// A boolean parameter; never fails to convert.
#[derive(Debug)]
pub(crate) struct Toggle;

impl ValueCell for Toggle {
    fn parameter_type(&self) -> ParameterType {
        ParameterType::Bool
    }

    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn convert(&self, token: &str) -> Result<Value, InvalidConversion> {
        let lower = token.to_lowercase();
        Ok(Value::Bool(TRUE_TOKENS.contains(&lower.as_str())))
    }
}

/// An integer parameter with a radix and signedness.
#[derive(Debug)]
pub(crate) struct Integer {
    base: u32,
    signed: bool,
}

impl Integer {
    pub(crate) fn new(base: u32, signed: bool) -> Self {
        Self { base, signed }
    }
}

impl ValueCell for Integer {
    fn parameter_type(&self) -> ParameterType {
        ParameterType::Integer
    }

    fn type_name(&self) -> &'static str {
        if self.signed {
            "i64"
        } else {
            "u64"
        }
    }

    fn convert(&self, token: &str) -> Result<Value, InvalidConversion> {
        let invalid = || InvalidConversion::new(token, self.type_name());

        // `from_str_radix` panics outside this range.
        if !(MIN_BASE..=MAX_BASE).contains(&self.base) {
            return Err(invalid());
        }

        if self.signed {
            i64::from_str_radix(token, self.base)
                .map(Value::Integer)
                .map_err(|_| invalid())
        } else {
            // Unsigned values still live in an i64, so anything needing the sign bit is out of range.
            let unsigned = u64::from_str_radix(token, self.base).map_err(|_| invalid())?;
            i64::try_from(unsigned)
                .map(Value::Integer)
                .map_err(|_| invalid())
        }
    }
}

/// A 64-bit float parameter.
#[derive(Debug)]
pub(crate) struct Float;

impl ValueCell for Float {
    fn parameter_type(&self) -> ParameterType {
        ParameterType::Float
    }

    fn type_name(&self) -> &'static str {
        "f64"
    }

    fn convert(&self, token: &str) -> Result<Value, InvalidConversion> {
        token
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| InvalidConversion::new(token, self.type_name()))
    }
}

/// A text parameter, stored verbatim.
#[derive(Debug)]
pub(crate) struct Text;

impl ValueCell for Text {
    fn parameter_type(&self) -> ParameterType {
        ParameterType::String
    }

    fn type_name(&self) -> &'static str {
        "string"
    }

    fn convert(&self, token: &str) -> Result<Value, InvalidConversion> {
        Ok(Value::String(token.to_string()))
    }
}
