mod base;
mod interface;
mod middleware;
mod printer;

pub use base::{ConfigError, ParseError, ParseOutcome, QueryError};
pub use middleware::HelpMode;
pub use printer::HelpLayout;

pub(crate) use base::Registry;
pub(crate) use interface::{ColumnRenderer, ConsoleInterface, UserInterface};
pub(crate) use middleware::{settle, Settlement};
pub(crate) use printer::{ErrorContext, Printer};

#[cfg(test)]
pub(crate) use interface::util;
