//! Builder module for `argkit`.
//! See [documentation root](https://docs.rs/argkit/latest/argkit/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{ConfigError, HelpLayout, HelpMode, ParseError, ParseOutcome, QueryError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
