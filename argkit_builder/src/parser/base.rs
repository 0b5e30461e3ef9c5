use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::api::{InvalidConversion, Parameter};
use crate::constant::*;
use crate::matcher::*;
use crate::model::{ParameterType, Value};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A parameter could not be registered, or the registry cannot be rendered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter type name did not match any [`ParameterType`].
    #[error("Config error: unsupported parameter type '{type_name}'.")]
    UnsupportedType {
        /// The unrecognised type name.
        type_name: String,
    },

    /// A parameter has neither a short nor a long name.
    #[error("Config error: parameter has no name or short name.")]
    UnnamedParameter,

    /// A short or long name is already taken by another parameter.
    #[error("Config error: cannot duplicate the parameter '{name}'.")]
    DuplicateName {
        /// The taken name, with its dashes.
        name: String,
    },

    /// An integer radix outside `2..=36`.
    #[error("Config error: integer base {base} is not within 2..=36.")]
    InvalidBase {
        /// The rejected radix.
        base: u32,
    },

    /// The default value does not convert to the parameter's type.
    #[error("Config error: invalid default for parameter '{flag}': {source}")]
    InvalidDefault {
        /// The parameter, as named in messages.
        flag: String,
        /// The conversion failure.
        source: InvalidConversion,
    },
}

/// The argument vector could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A flag that no parameter is registered under.
    #[error("Parse error: unknown parameter '{token}'.")]
    UnknownParameter {
        /// The flag as it appeared in the input.
        token: String,
    },

    /// A value-taking flag at the end of input, or followed by another flag.
    #[error("Parse error: parameter '{flag}' requires a value.")]
    MissingValue {
        /// The flag as it appeared in the input.
        flag: String,
    },

    /// A token that is not a flag; positional arguments are not supported.
    #[error("Parse error: unexpected token '{token}', expected a '-' or '--' flag.")]
    MalformedInput {
        /// The offending token.
        token: String,
    },

    /// A value that does not convert to its parameter's type.
    #[error("Parse error: '{raw_value}' cannot convert to {type_name} for parameter '{flag}'.")]
    ConversionError {
        /// The flag as it appeared in the input.
        flag: String,
        /// The offending value token.
        raw_value: String,
        /// The target type description (ex: `i64`).
        type_name: &'static str,
    },

    /// A required parameter with no default, never set before, and absent from the input.
    #[error("Parse error: parameter '{flag}' is required.")]
    MissingRequired {
        /// The parameter, as named in messages.
        flag: String,
    },
}

impl From<MatchError> for ParseError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::UnknownParameter(token) => ParseError::UnknownParameter { token },
            MatchError::MissingValue(flag) => ParseError::MissingValue { flag },
            MatchError::MalformedInput(token) => ParseError::MalformedInput { token },
        }
    }
}

impl ParseError {
    pub(crate) fn conversion(flag: impl Into<String>, error: InvalidConversion) -> Self {
        let InvalidConversion { token, type_name } = error;
        ParseError::ConversionError {
            flag: flag.into(),
            raw_value: token,
            type_name,
        }
    }
}

/// A value query disagrees with the parameter's declared type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The requested type is not the one the parameter holds.
    #[error("Query error: parameter '{flag}' holds a {actual} value, not {expected}.")]
    TypeMismatch {
        /// The parameter, as named in messages.
        flag: String,
        /// The type that was asked for.
        expected: ParameterType,
        /// The parameter's declared type.
        actual: ParameterType,
    },
}

/// The result of a successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// All tokens were applied.
    Success,
    /// All tokens were applied, and the `-h`/`--help` switch is set.
    HelpRequested,
}

/// The parameters of a parser: keyed by short+long name pair, indexed by each name, and kept in registration order.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    parameters: HashMap<ParameterKey, Parameter>,
    order: Vec<ParameterKey>,
    index: NameIndex,
}

impl Registry {
    pub(crate) fn register(&mut self, mut parameter: Parameter) -> Result<(), ConfigError> {
        let key = ParameterKey::new(parameter.short_name(), parameter.name());

        if !key.short().is_empty() && self.index.contains_short(key.short()) {
            return Err(ConfigError::DuplicateName {
                name: format!("-{}", key.short()),
            });
        }

        if !key.long().is_empty() && self.index.contains_long(key.long()) {
            return Err(ConfigError::DuplicateName {
                name: format!("--{}", key.long()),
            });
        }

        // Only reachable for a second unnamed parameter.
        if self.parameters.contains_key(&key) {
            return Err(ConfigError::DuplicateName {
                name: parameter.flag(),
            });
        }

        if parameter.parameter_type() == ParameterType::Integer
            && !(MIN_BASE..=MAX_BASE).contains(&parameter.radix())
        {
            return Err(ConfigError::InvalidBase {
                base: parameter.radix(),
            });
        }

        parameter
            .apply_default()
            .map_err(|source| ConfigError::InvalidDefault {
                flag: parameter.flag(),
                source,
            })?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Registered {} ({}, required={}) as {:?}.",
                parameter.flag(),
                parameter.parameter_type(),
                parameter.is_required(),
                key
            );
        }

        self.index
            .insert(&key, parameter.parameter_type().takes_value());
        self.order.push(key.clone());
        self.parameters.insert(key, parameter);
        Ok(())
    }

    /// Resolve a name given with or without its dashes.
    pub(crate) fn get(&self, name: &str) -> Option<&Parameter> {
        self.index
            .resolve(Lookup::from_flag(name))
            .and_then(|target| self.parameters.get(&target.key))
    }

    /// The parameters in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.order.iter().map(|key| {
            self.parameters
                .get(key)
                .expect("internal error - mismatch between order and parameters")
        })
    }

    /// Apply the option tokens (the program path already removed).
    ///
    /// Either every token is applied, or none are: on failure, each parameter keeps its prior value.
    pub(crate) fn consume(&mut self, tokens: &[&str]) -> Result<ParseOutcome, (usize, ParseError)> {
        // 1. Match the raw tokens to parameters; this is where the scan fails fast.
        let mut token_matcher = TokenMatcher::new(&self.index);

        for (offset, token) in tokens.iter().enumerate() {
            token_matcher
                .feed(token)
                .map_err(|e| (offset, ParseError::from(e)))?;
        }

        let matches = token_matcher
            .close()
            .map_err(|(offset, e)| (offset, ParseError::from(e)))?;

        // 2. Convert each raw value into a staged value, without touching the parameters.
        let mut staged: Vec<(ParameterKey, Value)> = Vec::with_capacity(matches.len());

        for MatchTokens {
            key,
            flag,
            offset,
            value,
        } in matches
        {
            let parameter = self
                .parameters
                .get(&key)
                .expect("internal error - mismatch between index and parameters");
            // Switches are set with an empty value.
            let (value_offset, raw) = value.unwrap_or((offset, String::default()));
            let converted = parameter
                .convert(&raw)
                .map_err(|error| (value_offset, ParseError::conversion(flag, error)))?;
            staged.push((key, converted));
        }

        // 3. A required parameter must hold a value: from its default, an earlier parse, or this one.
        // A help request takes precedence over the required check.
        let help_requested = self.help_requested(&staged);

        if !help_requested {
            let seen: HashSet<&ParameterKey> = staged.iter().map(|(key, _)| key).collect();

            for parameter in self.iter() {
                let key = ParameterKey::new(parameter.short_name(), parameter.name());

                if parameter.is_required() && !parameter.holds_value() && !seen.contains(&key) {
                    return Err((
                        tokens.len(),
                        ParseError::MissingRequired {
                            flag: parameter.flag(),
                        },
                    ));
                }
            }
        }

        // 4. Commit in input order, so repeated flags keep the last occurrence.
        for (key, value) in staged {
            self.parameters
                .get_mut(&key)
                .expect("internal error - mismatch between staged and parameters")
                .assign(value);
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Consumed {} tokens, help_requested={help_requested}.", tokens.len());
        }

        if help_requested {
            Ok(ParseOutcome::HelpRequested)
        } else {
            Ok(ParseOutcome::Success)
        }
    }

    fn help_requested(&self, staged: &[(ParameterKey, Value)]) -> bool {
        // Each help name is tried as a short name, then as a long name.
        [Lookup::Either(HELP_SHORT), Lookup::Either(HELP_NAME)]
            .into_iter()
            .filter_map(|lookup| self.index.resolve(lookup))
            .any(|target| {
                let value = staged
                    .iter()
                    .rev()
                    .find(|(key, _)| key == &target.key)
                    .map(|(_, value)| value)
                    .or_else(|| self.parameters.get(&target.key).map(Parameter::value));
                matches!(value.and_then(Value::as_switch), Some(true))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn registry() -> Registry {
        let mut registry = Registry::default();
        registry
            .register(Parameter::new("v", "verbose", "", ParameterType::None))
            .unwrap();
        registry
            .register(
                Parameter::new("f", "file", "", ParameterType::String).default_value("input.txt"),
            )
            .unwrap();
        registry
            .register(Parameter::new("n", "number", "", ParameterType::Integer).default_value("42"))
            .unwrap();
        registry
            .register(Parameter::new("r", "", "", ParameterType::Float))
            .unwrap();
        registry
            .register(Parameter::new("", "color", "", ParameterType::Bool))
            .unwrap();
        registry
    }

    fn snapshot(registry: &Registry) -> Vec<Value> {
        registry.iter().map(|p| p.value().clone()).collect()
    }

    #[test]
    fn registry_empty() {
        // Setup
        let mut registry = Registry::default();

        // Execute
        let outcome = registry.consume(&[]).unwrap();

        // Verify
        assert_eq!(outcome, ParseOutcome::Success);
        assert_eq!(registry.iter().count(), 0);
    }

    #[test]
    fn register_applies_default() {
        let registry = registry();
        assert_eq!(
            registry.get("file").unwrap().value(),
            &Value::String("input.txt".to_string())
        );
        assert_eq!(registry.get("-n").unwrap().value(), &Value::Integer(42));
        assert_eq!(registry.get("verbose").unwrap().value(), &Value::Flag(false));
    }

    #[test]
    fn register_order() {
        let registry = registry();
        let flags: Vec<String> = registry.iter().map(Parameter::flag).collect();
        assert_eq!(flags, vec!["--verbose", "--file", "--number", "-r", "--color"]);
    }

    #[rstest]
    #[case(Parameter::new("v", "other", "", ParameterType::None), "-v")]
    #[case(Parameter::new("o", "verbose", "", ParameterType::None), "--verbose")]
    #[case(Parameter::new("", "file", "", ParameterType::String), "--file")]
    #[case(Parameter::new("r", "", "", ParameterType::String), "-r")]
    #[case(Parameter::new("color", "", "", ParameterType::String), "")]
    fn register_duplicate(#[case] parameter: Parameter, #[case] name: &str) {
        // Setup
        let mut registry = registry();

        // Execute
        let result = registry.register(parameter);

        // Verify
        if name.is_empty() {
            // A short name may equal another parameter's long name.
            result.unwrap();
            assert_eq!(registry.iter().count(), 6);
        } else {
            assert_eq!(
                result.unwrap_err(),
                ConfigError::DuplicateName {
                    name: name.to_string()
                }
            );
            assert_eq!(registry.iter().count(), 5);
        }
    }

    #[test]
    fn register_duplicate_unnamed() {
        let mut registry = Registry::default();
        registry
            .register(Parameter::new("", "", "first", ParameterType::None))
            .unwrap();
        let error = registry
            .register(Parameter::new("", "", "second", ParameterType::None))
            .unwrap_err();
        assert_eq!(
            error,
            ConfigError::DuplicateName {
                name: "<unnamed>".to_string()
            }
        );
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(37)]
    fn register_invalid_base(#[case] base: u32) {
        let mut registry = Registry::default();
        let error = registry
            .register(Parameter::new("n", "", "", ParameterType::Integer).base(base))
            .unwrap_err();
        assert_eq!(error, ConfigError::InvalidBase { base });
        assert_eq!(registry.iter().count(), 0);
    }

    #[test]
    fn register_invalid_default() {
        let mut registry = Registry::default();
        let error = registry
            .register(Parameter::new("n", "number", "", ParameterType::Integer).default_value("x"))
            .unwrap_err();
        assert_matches!(error, ConfigError::InvalidDefault { flag, source } => {
            assert_eq!(flag, "--number");
            assert_eq!(source, InvalidConversion::new("x", "i64"));
        });
        assert!(registry.get("n").is_none());
    }

    #[rstest]
    #[case(vec!["-v"], "v", Value::Flag(true))]
    #[case(vec!["--verbose"], "verbose", Value::Flag(true))]
    #[case(vec!["-f", "a.txt"], "file", Value::String("a.txt".to_string()))]
    #[case(vec!["--number", "7"], "n", Value::Integer(7))]
    #[case(vec!["-r", "2.5"], "r", Value::Float(2.5))]
    #[case(vec!["--color", "on"], "color", Value::Bool(true))]
    #[case(vec!["--color", "off"], "color", Value::Bool(false))]
    fn consume(#[case] tokens: Vec<&str>, #[case] name: &str, #[case] expected: Value) {
        // Setup
        let mut registry = registry();

        // Execute
        let outcome = registry.consume(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(outcome, ParseOutcome::Success);
        assert_eq!(registry.get(name).unwrap().value(), &expected);
    }

    #[test]
    fn consume_last_occurrence_wins() {
        for _ in 0..100 {
            // Setup
            let mut registry = registry();
            let values: Vec<i64> = (0..thread_rng().gen_range(1..10))
                .map(|_| thread_rng().gen_range(0..i64::MAX))
                .collect();
            let value_tokens: Vec<String> = values.iter().map(i64::to_string).collect();
            let mut tokens: Vec<&str> = Vec::default();

            for value in &value_tokens {
                tokens.push(if thread_rng().gen() { "-n" } else { "--number" });
                tokens.push(value);
            }

            // Execute
            registry.consume(tokens.as_slice()).unwrap();

            // Verify
            assert_eq!(
                registry.get("number").unwrap().value(),
                &Value::Integer(*values.last().unwrap())
            );
        }
    }

    #[rstest]
    #[case(vec!["-x"], 0, ParseError::UnknownParameter { token: "-x".to_string() })]
    #[case(vec!["-v", "-f", "a", "--nope"], 3, ParseError::UnknownParameter { token: "--nope".to_string() })]
    #[case(vec!["-f"], 1, ParseError::MissingValue { flag: "-f".to_string() })]
    #[case(vec!["-n", "-5"], 1, ParseError::MissingValue { flag: "-n".to_string() })]
    #[case(vec!["-v", "a.txt"], 1, ParseError::MalformedInput { token: "a.txt".to_string() })]
    #[case(vec!["-f", "b", "-n", "seven"], 3, ParseError::ConversionError {
        flag: "-n".to_string(),
        raw_value: "seven".to_string(),
        type_name: "i64",
    })]
    #[case(vec!["-r", "fast", "-v"], 1, ParseError::ConversionError {
        flag: "-r".to_string(),
        raw_value: "fast".to_string(),
        type_name: "f64",
    })]
    fn consume_error_is_atomic(
        #[case] tokens: Vec<&str>,
        #[case] offset: usize,
        #[case] expected: ParseError,
    ) {
        // Setup
        let mut registry = registry();
        let before = snapshot(&registry);

        // Execute
        let error = registry.consume(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error, (offset, expected));
        assert_eq!(snapshot(&registry), before);
    }

    #[test]
    fn consume_required() {
        // Setup
        let mut registry = registry();
        registry
            .register(Parameter::new("o", "output", "", ParameterType::String).required(true))
            .unwrap();
        let before = snapshot(&registry);

        // Execute
        let error = registry.consume(&["-f", "a.txt"]).unwrap_err();

        // Verify
        assert_eq!(
            error,
            (
                2,
                ParseError::MissingRequired {
                    flag: "--output".to_string()
                }
            )
        );
        assert_eq!(snapshot(&registry), before);

        // Satisfied.
        assert_eq!(
            registry.consume(&["-o", "b.txt"]).unwrap(),
            ParseOutcome::Success
        );
        assert_eq!(
            registry.get("output").unwrap().value(),
            &Value::String("b.txt".to_string())
        );
    }

    #[test]
    fn consume_required_held_from_earlier_parse() {
        // Setup
        let mut registry = registry();
        registry
            .register(Parameter::new("o", "output", "", ParameterType::String).required(true))
            .unwrap();
        registry.consume(&["-o", "x"]).unwrap();

        // Execute
        let outcome = registry.consume(&["-v"]).unwrap();

        // Verify
        assert_eq!(outcome, ParseOutcome::Success);
        assert_eq!(
            registry.get("o").unwrap().value(),
            &Value::String("x".to_string())
        );
    }

    #[test]
    fn consume_required_held_from_default() {
        // Setup
        let mut registry = registry();
        registry
            .register(
                Parameter::new("o", "output", "", ParameterType::String)
                    .required(true)
                    .default_value("out.txt"),
            )
            .unwrap();

        // Execute
        let outcome = registry.consume(&[]).unwrap();

        // Verify
        assert_eq!(outcome, ParseOutcome::Success);
        assert_eq!(
            registry.get("output").unwrap().value(),
            &Value::String("out.txt".to_string())
        );
    }

    #[test]
    fn consume_required_switch() {
        let mut registry = Registry::default();
        registry
            .register(Parameter::new("y", "yes", "", ParameterType::None).required(true))
            .unwrap();
        assert_matches!(
            registry.consume(&[]),
            Err((0, ParseError::MissingRequired { .. }))
        );
        assert_eq!(registry.consume(&["-y"]).unwrap(), ParseOutcome::Success);
        assert_eq!(registry.consume(&[]).unwrap(), ParseOutcome::Success);
    }

    #[rstest]
    #[case(vec!["-h"])]
    #[case(vec!["--help"])]
    #[case(vec!["-v", "--help", "-f", "a.txt"])]
    fn consume_help(#[case] tokens: Vec<&str>) {
        // Setup
        let mut registry = registry();
        registry
            .register(Parameter::new("h", "help", "", ParameterType::None))
            .unwrap();
        registry
            .register(Parameter::new("o", "output", "", ParameterType::String).required(true))
            .unwrap();

        // Execute
        let outcome = registry.consume(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(outcome, ParseOutcome::HelpRequested);
        assert_eq!(registry.get("h").unwrap().value(), &Value::Flag(true));
    }

    #[rstest]
    #[case("h", "", vec!["-h"])]
    #[case("", "help", vec!["--help"])]
    fn consume_help_single_name(#[case] short: &str, #[case] long: &str, #[case] tokens: Vec<&str>) {
        let mut registry = Registry::default();
        registry
            .register(Parameter::new(short, long, "", ParameterType::None))
            .unwrap();
        assert_eq!(
            registry.consume(tokens.as_slice()).unwrap(),
            ParseOutcome::HelpRequested
        );
    }

    #[rstest]
    #[case("", "h", vec!["--h"])]
    #[case("help", "", vec!["-help"])]
    fn consume_help_swapped_name(
        #[case] short: &str,
        #[case] long: &str,
        #[case] tokens: Vec<&str>,
    ) {
        let mut registry = Registry::default();
        registry
            .register(Parameter::new(short, long, "", ParameterType::None))
            .unwrap();
        assert_eq!(
            registry.consume(tokens.as_slice()).unwrap(),
            ParseOutcome::HelpRequested
        );
    }

    #[test]
    fn consume_help_bool() {
        // Setup
        let mut registry = Registry::default();
        registry
            .register(Parameter::new("h", "help", "", ParameterType::Bool))
            .unwrap();

        // Execute & verify
        assert_eq!(
            registry.consume(&["--help", "no"]).unwrap(),
            ParseOutcome::Success
        );
        assert_eq!(
            registry.consume(&["--help", "yes"]).unwrap(),
            ParseOutcome::HelpRequested
        );
    }

    #[test]
    fn consume_help_not_switch() {
        let mut registry = Registry::default();
        registry
            .register(Parameter::new("h", "help", "", ParameterType::String))
            .unwrap();
        assert_eq!(
            registry.consume(&["-h", "true"]).unwrap(),
            ParseOutcome::Success
        );
    }

    #[test]
    fn consume_switch_stays_set() {
        // Setup
        let mut registry = registry();
        registry.consume(&["-v"]).unwrap();

        // Execute
        registry.consume(&["-f", "b.txt"]).unwrap();

        // Verify
        assert_eq!(registry.get("v").unwrap().value(), &Value::Flag(true));
    }
}
