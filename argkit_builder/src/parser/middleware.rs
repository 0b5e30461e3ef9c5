use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::ErrorContext;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// What the parser does itself when a parse asks for help or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpMode {
    /// Hand every outcome back to the caller; nothing is printed.
    #[default]
    Manual,
    /// Print the help and exit `0` on a help request.
    /// Print the error, its context and the help, then exit `1`, on a parse error.
    AutoExit,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Settlement {
    Return(Result<ParseOutcome, ParseError>),
    Exit(i32),
}

/// Decide what a finished parse turns into under `help_mode`.
pub(crate) fn settle(
    help_mode: HelpMode,
    result: Result<ParseOutcome, (usize, ParseError)>,
    tokens: &[&str],
    help: impl FnOnce() -> Result<String, ConfigError>,
    user_interface: &(impl UserInterface + ?Sized),
) -> Settlement {
    match help_mode {
        HelpMode::Manual => Settlement::Return(result.map_err(|(_, parse_error)| parse_error)),
        HelpMode::AutoExit => match result {
            Ok(ParseOutcome::Success) => Settlement::Return(Ok(ParseOutcome::Success)),
            Ok(ParseOutcome::HelpRequested) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Help requested, exiting.");
                }

                match help() {
                    Ok(message) => {
                        user_interface.print(message);
                        Settlement::Exit(0)
                    }
                    Err(config_error) => {
                        user_interface.print_error(config_error.to_string());
                        Settlement::Exit(1)
                    }
                }
            }
            Err((offset, parse_error)) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Parse failed at token {offset}, exiting.");
                }

                user_interface.print_error(parse_error.to_string());
                user_interface.print_error_context(ErrorContext::new(offset, tokens));

                if let Ok(message) = help() {
                    user_interface.print(message);
                }

                Settlement::Exit(1)
            }
        },
    }
}
