use thiserror::Error;

use crate::matcher::api::*;
use crate::matcher::model::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("Unknown parameter '{0}'.")]
    UnknownParameter(String),

    #[error("Parameter '{0}' requires a value.")]
    MissingValue(String),

    #[error("Unexpected token '{0}'.")]
    MalformedInput(String),
}

/// Aligns option tokens (the program path already removed) to registered parameters.
///
/// The matcher is fed one token at a time.
/// Between feeds it is either scanning for the next flag, or holding a pending value-taking flag.
/// It never converts values; that is left to the capture phase.
#[derive(Debug)]
pub(crate) struct TokenMatcher<'r> {
    index: &'r NameIndex,
    fed: usize,
    matches: Vec<MatchTokens>,
    pending: Option<PendingValue>,
}

impl<'r> TokenMatcher<'r> {
    pub(crate) fn new(index: &'r NameIndex) -> Self {
        Self {
            index,
            fed: 0,
            matches: Vec::default(),
            pending: None,
        }
    }

    pub(crate) fn feed(&mut self, token: &str) -> Result<(), MatchError> {
        // 1. A pending flag consumes this token as its value, such as:
        //  --file input.txt
        //  -n 7
        // 2. Otherwise the token must itself be a flag:
        //  -f
        //  --file
        // 3. Anything else is malformed (there are no positional arguments).
        let result = match self.pending.take() {
            Some(pending) => self.match_value(pending, token),
            None => {
                if token.starts_with('-') {
                    self.match_flag(token)
                } else {
                    Err(MatchError::MalformedInput(token.to_string()))
                }
            }
        };

        self.fed += 1;
        result
    }

    fn match_value(&mut self, pending: PendingValue, token: &str) -> Result<(), MatchError> {
        // A dash-leading token is always another flag, never a value.
        // This also means negative numbers cannot be passed as values.
        if token.starts_with('-') {
            return Err(MatchError::MissingValue(pending.flag().to_string()));
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched value '{token}' to '{}'.", pending.flag());
        }

        self.matches.push(pending.close(self.fed, token));
        Ok(())
    }

    fn match_flag(&mut self, token: &str) -> Result<(), MatchError> {
        let target = self
            .index
            .resolve(Lookup::from_flag(token))
            .ok_or_else(|| MatchError::UnknownParameter(token.to_string()))?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched flag '{token}' to {:?}.", target.key);
        }

        if target.takes_value {
            let pending = PendingValue::new(target.key.clone(), token, self.fed);

            if self.pending.replace(pending).is_some() {
                unreachable!("internal error - the pending value is expected to be None");
            }
        } else {
            self.matches.push(MatchTokens {
                key: target.key.clone(),
                flag: token.to_string(),
                offset: self.fed,
                value: None,
            });
        }

        Ok(())
    }

    /// Finish matching; a flag still waiting for its value fails here.
    pub(crate) fn close(self) -> Result<Vec<MatchTokens>, (usize, MatchError)> {
        match self.pending {
            Some(pending) => Err((
                self.fed,
                MatchError::MissingValue(pending.flag().to_string()),
            )),
            None => Ok(self.matches),
        }
    }
}
