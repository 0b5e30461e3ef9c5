use terminal_size::{terminal_size, Width};

use crate::api::Parameter;
use crate::constant::*;
use crate::parser::{ColumnRenderer, ConfigError, Registry};

/// How help text is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpLayout {
    /// `Usage: <program> [options]`, then one `-s, --long<TAB>description` line per parameter.
    #[default]
    Plain,
    /// The same content in padded columns, descriptions wrapped to the terminal width.
    Columns,
}

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

pub(crate) struct Printer<'r> {
    program: &'r str,
    registry: &'r Registry,
}

impl<'r> Printer<'r> {
    pub(crate) fn new(program: &'r str, registry: &'r Registry) -> Self {
        Self { program, registry }
    }

    pub(crate) fn render(&self, layout: HelpLayout) -> Result<String, ConfigError> {
        match layout {
            HelpLayout::Plain => self.plain(),
            HelpLayout::Columns => self.columns(terminal_width()),
        }
    }

    fn usage(&self) -> String {
        format!("Usage: {} {USAGE_SUFFIX}", self.program)
    }

    pub(crate) fn plain(&self) -> Result<String, ConfigError> {
        let mut lines = vec![self.usage()];

        for parameter in self.registry.iter() {
            lines.push(format!(
                "{}\t{}",
                flags(parameter, false)?,
                parameter.description()
            ));
        }

        Ok(lines.join("\n"))
    }

    pub(crate) fn columns(&self, total_width: usize) -> Result<String, ConfigError> {
        let mut rows = Vec::default();
        let mut left_column_width = 1;
        let mut middle_column_width = 1;

        for parameter in self.registry.iter() {
            let left = flags(parameter, true)?;
            let middle = if parameter.is_required() {
                format!("{} (required)", parameter.description())
            } else {
                parameter.description().to_string()
            };
            left_column_width = std::cmp::max(left_column_width, left.chars().count());
            middle_column_width = std::cmp::max(middle_column_width, middle.chars().count() + MAIN_INDENT);
            rows.push((left, middle));
        }

        let mut lines = vec![self.usage()];

        if !rows.is_empty() {
            let column_renderer = ColumnRenderer::guided(
                PADDING_WIDTH,
                left_column_width + MAIN_INDENT,
                middle_column_width,
                total_width,
            );
            lines.push("".to_string());
            lines.push("options:".to_string());

            for (left, middle) in rows {
                lines.extend(column_renderer.render(MAIN_INDENT, &left, &middle));
            }
        }

        Ok(lines.join("\n"))
    }
}

pub(crate) fn terminal_width() -> usize {
    match terminal_size() {
        Some((Width(width), _)) => width as usize,
        None => FALLBACK_TERMINAL_WIDTH,
    }
}

/// `-s, --long`, leaving out whichever name is empty.
/// With `grammar`, value-taking flags are followed by a placeholder (ex: `-f FILE, --file FILE`).
fn flags(parameter: &Parameter, grammar: bool) -> Result<String, ConfigError> {
    let placeholder = if grammar && parameter.parameter_type().takes_value() {
        let name = if parameter.name().is_empty() {
            parameter.short_name()
        } else {
            parameter.name()
        };
        format!(" {}", name.to_ascii_uppercase().replace('-', "_"))
    } else {
        String::default()
    };

    match (parameter.short_name(), parameter.name()) {
        ("", "") => Err(ConfigError::UnnamedParameter),
        (short, "") => Ok(format!("-{short}{placeholder}")),
        ("", long) => Ok(format!("--{long}{placeholder}")),
        (short, long) => Ok(format!("-{short}{placeholder}, --{long}{placeholder}")),
    }
}

/// The option tokens, with a caret under the one that failed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // An offset past the last token points just after it (ex: a missing value).
        let column: usize = self
            .tokens
            .iter()
            .take(self.offset)
            .map(|token| token.chars().count() + 1)
            .sum();

        write!(f, "{}\n{:column$}^", self.tokens.join(" "), "")
    }
}
