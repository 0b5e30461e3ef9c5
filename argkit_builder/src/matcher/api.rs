use std::collections::HashMap;

/// The registry key of a parameter: its short and long name pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ParameterKey {
    short: String,
    long: String,
}

impl ParameterKey {
    pub(crate) fn new(short: impl Into<String>, long: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            long: long.into(),
        }
    }

    pub(crate) fn short(&self) -> &str {
        &self.short
    }

    pub(crate) fn long(&self) -> &str {
        &self.long
    }
}

/// What a name resolves to: the owning key, and whether its flag consumes the following token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub key: ParameterKey,
    pub takes_value: bool,
}

/// Which name index a flag or query should be resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup<'n> {
    /// `-x`
    Short(&'n str),
    /// `--xx`
    Long(&'n str),
    /// `x` or `xx`: short first, then long.
    Either(&'n str),
}

impl<'n> Lookup<'n> {
    /// Strip one or two leading dashes to decide the lookup.
    pub(crate) fn from_flag(flag: &'n str) -> Self {
        if let Some(name) = flag.strip_prefix("--") {
            Lookup::Long(name)
        } else if let Some(name) = flag.strip_prefix('-') {
            Lookup::Short(name)
        } else {
            Lookup::Either(flag)
        }
    }
}

/// The short-name and long-name indices of the registry.
#[derive(Debug, Default)]
pub(crate) struct NameIndex {
    short_names: HashMap<String, Target>,
    long_names: HashMap<String, Target>,
}

impl NameIndex {
    pub(crate) fn contains_short(&self, name: &str) -> bool {
        self.short_names.contains_key(name)
    }

    pub(crate) fn contains_long(&self, name: &str) -> bool {
        self.long_names.contains_key(name)
    }

    /// Index `key` under whichever of its names are non-empty.
    /// Callers check for duplicates first; an existing entry would be rebound.
    pub(crate) fn insert(&mut self, key: &ParameterKey, takes_value: bool) {
        let target = Target {
            key: key.clone(),
            takes_value,
        };

        if !key.short().is_empty() {
            self.short_names
                .insert(key.short().to_string(), target.clone());
        }

        if !key.long().is_empty() {
            self.long_names.insert(key.long().to_string(), target);
        }
    }

    pub(crate) fn resolve(&self, lookup: Lookup) -> Option<&Target> {
        match lookup {
            Lookup::Short(name) => self.short_names.get(name),
            Lookup::Long(name) => self.long_names.get(name),
            Lookup::Either(name) => self
                .short_names
                .get(name)
                .or_else(|| self.long_names.get(name)),
        }
    }
}
