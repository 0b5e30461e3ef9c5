pub(crate) const HELP_SHORT: &str = "h";
pub(crate) const HELP_NAME: &str = "help";
pub(crate) const USAGE_SUFFIX: &str = "[options]";

// Case-insensitive tokens a boolean parameter accepts as `true`.
// Anything else (including the empty string) is `false`.
pub(crate) const TRUE_TOKENS: [&str; 4] = ["1", "true", "yes", "on"];

pub(crate) const DEFAULT_BASE: u32 = 10;
pub(crate) const MIN_BASE: u32 = 2;
pub(crate) const MAX_BASE: u32 = 36;

pub(crate) const FALLBACK_TERMINAL_WIDTH: usize = 80;
