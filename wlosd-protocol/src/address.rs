//! Message addresses: `window` or `window.sub`.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// External identifier of a window or of one item inside it.
///
/// The split happens on the first `.`, so `a.b.c` names item `b.c` of window
/// `a`. An empty `sub` addresses the window as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    pub window: String,
    pub sub: String,
}

impl Address {
    pub fn new(window: impl Into<String>, sub: impl Into<String>) -> Self {
        Self {
            window: window.into(),
            sub: sub.into(),
        }
    }

    /// Split a uid into `(window, sub)` without validating it.
    pub fn split(uid: &str) -> (&str, &str) {
        uid.split_once('.').unwrap_or((uid, ""))
    }

    /// Parse a uid, rejecting an empty window part.
    pub fn parse(uid: &str) -> Result<Self, ParseError> {
        let (window, sub) = Self::split(uid);
        if window.is_empty() {
            return Err(ParseError::EmptyWindowUid(uid.to_string()));
        }
        Ok(Self::new(window, sub))
    }

    /// True when this addresses the whole window rather than one list item.
    pub fn is_window(&self) -> bool {
        self.sub.is_empty()
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sub.is_empty() {
            f.write_str(&self.window)
        } else {
            write!(f, "{}.{}", self.window, self.sub)
        }
    }
}
