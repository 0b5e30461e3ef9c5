use std::env;

use crate::api::Parameter;
use crate::model::ParameterType;
use crate::parser::{
    settle, ConfigError, ConsoleInterface, HelpLayout, HelpMode, ParseError, ParseOutcome, Printer,
    QueryError, Registry, Settlement, UserInterface,
};
use crate::prelude::FromValue;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The command line parser: a registry of named [`Parameter`]s, the program name, and the help behaviour.
///
/// Parameters are registered up front, then an argument vector is parsed and the values are read back by name.
/// A failed parse leaves every value as it was before the parse.
///
/// ### Example
/// ```
/// # use argkit_builder as argkit;
/// use argkit::{ParameterType, ParseOutcome, Parser};
///
/// let mut parser = Parser::new();
/// parser
///     .add_parameter("f", "file", "Input file", ParameterType::String, false, "input.txt")
///     .unwrap()
///     .add_parameter("v", "verbose", "Verbose output", ParameterType::None, false, "")
///     .unwrap();
///
/// assert_eq!(parser.parse_tokens(&["prog", "-v"]).unwrap(), ParseOutcome::Success);
/// assert_eq!(parser.value::<String>("file").unwrap(), Some("input.txt".to_string()));
/// assert_eq!(parser.value::<bool>("-v").unwrap(), Some(true));
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    program: String,
    registry: Registry,
    help_mode: HelpMode,
    help_layout: HelpLayout,
}

impl Parser {
    /// Create an empty parser in [`HelpMode::Manual`].
    /// The program name is empty until the first parse supplies it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose what [`Parser::parse_args`] and [`Parser::parse`] do on a help request or a failure.
    pub fn set_help_mode(&mut self, help_mode: HelpMode) -> &mut Self {
        self.help_mode = help_mode;
        self
    }

    /// Shorthand: `true` for [`HelpMode::AutoExit`], `false` for [`HelpMode::Manual`].
    pub fn set_auto_help(&mut self, auto_help: bool) -> &mut Self {
        self.set_help_mode(if auto_help {
            HelpMode::AutoExit
        } else {
            HelpMode::Manual
        })
    }

    /// The current help mode.
    pub fn help_mode(&self) -> HelpMode {
        self.help_mode
    }

    /// Choose the layout printed in [`HelpMode::AutoExit`].
    pub fn set_help_layout(&mut self, help_layout: HelpLayout) -> &mut Self {
        self.help_layout = help_layout;
        self
    }

    /// Register a parameter.
    ///
    /// Fails when either of its names is already taken, when its integer base is outside `2..=36`,
    /// or when its default does not convert to its type.
    /// On failure the parser is left unchanged.
    pub fn add(&mut self, parameter: Parameter) -> Result<&mut Self, ConfigError> {
        self.registry.register(parameter)?;
        Ok(self)
    }

    /// Register a parameter from its parts.
    /// Pass an empty `default_value` to keep the type's initial value.
    pub fn add_parameter(
        &mut self,
        short_name: &str,
        name: &str,
        description: &str,
        parameter_type: ParameterType,
        required: bool,
        default_value: &str,
    ) -> Result<&mut Self, ConfigError> {
        self.add(
            Parameter::new(short_name, name, description, parameter_type)
                .required(required)
                .default_value(default_value),
        )
    }

    /// Register a parameter whose type is given by name (ex: `"integer"`, `"string"`).
    pub fn add_parameter_typed(
        &mut self,
        short_name: &str,
        name: &str,
        description: &str,
        type_name: &str,
        required: bool,
        default_value: &str,
    ) -> Result<&mut Self, ConfigError> {
        let parameter_type: ParameterType = type_name.parse()?;
        self.add_parameter(
            short_name,
            name,
            description,
            parameter_type,
            required,
            default_value,
        )
    }

    /// Register a [`ParameterType::Bool`] parameter.
    pub fn add_bool(
        &mut self,
        short_name: &str,
        name: &str,
        description: &str,
        required: bool,
        default_value: bool,
    ) -> Result<&mut Self, ConfigError> {
        let default_value = if default_value { "true" } else { "false" };
        self.add_parameter(
            short_name,
            name,
            description,
            ParameterType::Bool,
            required,
            default_value,
        )
    }

    /// Find a parameter by name.
    ///
    /// `--name` looks up long names only, `-n` short names only,
    /// and a bare `n` tries the short names before the long names.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.registry.get(name)
    }

    /// The registered parameters, in registration order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.registry.iter()
    }

    /// Write the named parameter's value into `slot`.
    ///
    /// Returns `Ok(false)` when no parameter goes by `name`, leaving `slot` untouched.
    /// Fails when `T` disagrees with the parameter's type.
    /// See [`Parser::get`] for how `name` is resolved.
    pub fn get_parameter_value_to<T: FromValue>(
        &self,
        name: &str,
        slot: &mut T,
    ) -> Result<bool, QueryError> {
        match self.get(name) {
            Some(parameter) => {
                parameter.get_value_to(slot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Read the named parameter's value as `T`, or `None` when no parameter goes by `name`.
    pub fn value<T: FromValue>(&self, name: &str) -> Result<Option<T>, QueryError> {
        self.get(name)
            .map(|parameter| parameter.value_as::<T>())
            .transpose()
    }

    /// The program name taken from the last parsed argument vector, with its directories removed.
    pub fn program_name(&self) -> &str {
        &self.program
    }

    /// The help text: `Usage: <program> [options]`, then one `-s, --long<TAB>description` line per parameter.
    ///
    /// Fails when a parameter has neither a short nor a long name.
    pub fn get_help_message(&self) -> Result<String, ConfigError> {
        Printer::new(&self.program, &self.registry).plain()
    }

    /// The help text laid out in columns, wrapped to `total_width`.
    pub fn get_help_columns(&self, total_width: usize) -> Result<String, ConfigError> {
        Printer::new(&self.program, &self.registry).columns(total_width)
    }

    /// Parse an argument vector whose first element is the program path.
    ///
    /// This never prints nor exits, regardless of the [`HelpMode`].
    /// Parsing stops at the first bad token, in which case no parameter is changed.
    /// Otherwise every value is applied; a flag given more than once keeps its last value.
    ///
    /// ### Example
    /// ```
    /// # use argkit_builder as argkit;
    /// use argkit::{ParameterType, ParseError, Parser};
    ///
    /// let mut parser = Parser::new();
    /// parser
    ///     .add_parameter("x", "", "Some text", ParameterType::String, false, "")
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     parser.parse_tokens(&["prog", "-x"]).unwrap_err(),
    ///     ParseError::MissingValue { flag: "-x".to_string() },
    /// );
    /// ```
    pub fn parse_tokens(&mut self, args: &[&str]) -> Result<ParseOutcome, ParseError> {
        self.consume(args).map_err(|(_, parse_error)| parse_error)
    }

    /// Parse an argument vector whose first element is the program path, honouring the [`HelpMode`].
    ///
    /// In [`HelpMode::AutoExit`], a help request prints the help and exits `0`,
    /// while a failure prints the error and the help, then exits `1`.
    pub fn parse_args<I, S>(&mut self, args: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match self.parse_with_interface(&args, &ConsoleInterface::default()) {
            Settlement::Return(result) => result,
            Settlement::Exit(code) => std::process::exit(code),
        }
    }

    /// Parse the process's own arguments, honouring the [`HelpMode`].
    /// See [`Parser::parse_args`].
    pub fn parse(&mut self) -> Result<ParseOutcome, ParseError> {
        self.parse_args(env::args())
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Parse option tokens alone, as though the program were called `test-dummy`.
    #[cfg(feature = "unit_test")]
    pub fn test_parse(&mut self, tokens: &[&str]) -> Result<ParseOutcome, ParseError> {
        let args: Vec<&str> = std::iter::once("test-dummy")
            .chain(tokens.iter().copied())
            .collect();
        self.parse_tokens(&args)
    }

    pub(crate) fn parse_with_interface(
        &mut self,
        args: &[&str],
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Settlement {
        let result = self.consume(args);
        let tokens = args.get(1..).unwrap_or_default();
        let help_layout = self.help_layout;
        let printer = Printer::new(&self.program, &self.registry);

        settle(
            self.help_mode,
            result,
            tokens,
            || printer.render(help_layout),
            user_interface,
        )
    }

    // Error offsets index the option tokens, not `args`.
    fn consume(&mut self, args: &[&str]) -> Result<ParseOutcome, (usize, ParseError)> {
        let tokens = match args.split_first() {
            Some((program_path, tokens)) => {
                self.program = basename(program_path).to_string();
                tokens
            }
            None => args,
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsing {tokens:?} for program '{}'.", self.program);
        }

        self.registry.consume(tokens)
    }
}

fn basename(path: &str) -> &str {
    path.rsplit(&['/', '\\'][..]).next().unwrap_or(path)
}
