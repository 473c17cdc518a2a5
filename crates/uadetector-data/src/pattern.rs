//! Delimited regular expressions (`/body/flags`) used by detection records.

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern must be written as /body/flags")]
    MissingDelimiter,
    #[error("unknown pattern flag `{0}`")]
    UnknownFlag(char),
    #[error("invalid regular expression: {0}")]
    Regex(#[from] regex::Error),
}

/// A compiled regular expression together with its delimited source form.
///
/// Flags are kept sorted and de-duplicated, so `/a/si` and `/a/iss` parse to
/// equal patterns that both print as `/a/is`.
#[derive(Clone)]
pub struct Pattern {
    body: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    /// Parse a delimited pattern. The last `/` closes the body, so the body
    /// itself may contain slashes.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        let rest = source
            .strip_prefix('/')
            .ok_or(PatternError::MissingDelimiter)?;
        let end = rest.rfind('/').ok_or(PatternError::MissingDelimiter)?;
        let (body, flags) = (&rest[..end], &rest[end + 1..]);

        let mut normalized: Vec<char> = Vec::with_capacity(flags.len());
        for flag in flags.chars() {
            if !matches!(flag, 'i' | 'm' | 's' | 'x') {
                return Err(PatternError::UnknownFlag(flag));
            }
            if !normalized.contains(&flag) {
                normalized.push(flag);
            }
        }
        normalized.sort_unstable();

        let regex = RegexBuilder::new(body)
            .case_insensitive(normalized.contains(&'i'))
            .multi_line(normalized.contains(&'m'))
            .dot_matches_new_line(normalized.contains(&'s'))
            .ignore_whitespace(normalized.contains(&'x'))
            .build()?;

        Ok(Self {
            body: body.to_string(),
            flags: normalized.into_iter().collect(),
            regex,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, user_agent: &str) -> bool {
        self.regex.is_match(user_agent)
    }

    /// First capture group of the first match, used by version patterns.
    pub fn extract<'a>(&self, user_agent: &'a str) -> Option<&'a str> {
        self.regex
            .captures(user_agent)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body && self.flags == other.flags
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({self})")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.body, self.flags)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
