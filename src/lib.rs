//! `argkit` is a small command line parser for Rust.
//!
//! Programs register named *parameters*, each with a short name (`-f`), a long name (`--file`), or both.
//! A parameter has one of five types: a valueless switch, an integer, a string, a float, or a boolean.
//! The parser walks the argument vector once, left to right, and the values are read back by name.
//!
//! The design is deliberately small:
//! * *Flags only*:
//! every token is either a `-s`/`--long` flag or the value directly after a value-taking flag.
//! There are no positional arguments, sub-commands, or `--key=value` forms.
//! * *Fail fast, change nothing*:
//! parsing stops at the first bad token, and a failed parse leaves every value as it was.
//! * *Checked queries*:
//! reading a value as the wrong type is an error, never a reinterpretation.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/auto_help.rs")]
//! ```
//!
//! ```console
//! $ auto_help --help
//! Usage: auto_help [options]
//!
//! options:
//!  -h, --help                    Show this help message
//!  -f FILE, --file FILE          Input file path
//!  -v, --verbose                 Enable verbose output
//!  -n NUMBER, --number NUMBER    A number parameter
//!
//! $ auto_help -f data.csv -n 7
//! Arguments parsed successfully!
//! File: data.csv
//! Number: 7
//!
//! $ auto_help -n seven
//! Parse error: 'seven' cannot convert to i64 for parameter '-n'.
//! -n seven
//!    ^
//! ...
//! ```
//!
//! # Help
//! [`HelpMode::Manual`] (the default) hands every outcome back: check for [`ParseOutcome::HelpRequested`] and print
//! [`Parser::get_help_message`] yourself.
//! [`HelpMode::AutoExit`] prints the help and exits on a help request, and prints the error plus the help and exits `1`
//! on a failure.
//! In either mode, [`Parser::parse_tokens`] only ever returns.
//!
//! A help request is a `-h` or `--help` parameter of type [`ParameterType::None`] (or [`ParameterType::Bool`])
//! holding `true` once parsing completes.
//! The parser does not register one for you.
//!
//! # Values
//! Integers parse in base 10 by default; see [`Parameter::base`] and [`Parameter::unsigned`].
//! Booleans read `1`, `true`, `yes` and `on` (any case) as `true`, and anything else as `false`.
//! Values may not start with `-`, so negative numbers cannot be passed on the command line.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events while registering and parsing.
pub use argkit_builder::*;
