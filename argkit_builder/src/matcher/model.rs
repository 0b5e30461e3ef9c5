use crate::matcher::api::ParameterKey;

pub(crate) type OffsetValue = (usize, String);

/// One matched flag and, for value-taking parameters, the token consumed as its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchTokens {
    pub key: ParameterKey,
    /// The flag as it appeared in the input (ex: `-f` or `--file`).
    pub flag: String,
    pub offset: usize,
    pub value: Option<OffsetValue>,
}

/// A value-taking flag waiting for its value token.
#[derive(Debug)]
pub(super) struct PendingValue {
    key: ParameterKey,
    flag: String,
    offset: usize,
}

impl PendingValue {
    pub(super) fn new(key: ParameterKey, flag: impl Into<String>, offset: usize) -> Self {
        Self {
            key,
            flag: flag.into(),
            offset,
        }
    }

    pub(super) fn flag(&self) -> &str {
        &self.flag
    }

    pub(super) fn close(self, offset: usize, value: impl Into<String>) -> MatchTokens {
        MatchTokens {
            key: self.key,
            flag: self.flag,
            offset: self.offset,
            value: Some((offset, value.into())),
        }
    }
}
