//! Protocol error types

use thiserror::Error;

/// Errors from parsing a command line
#[derive(Error, Debug)]
pub enum ParseError {
    /// Line held no tokens
    #[error("empty command line")]
    Empty,

    /// Unknown command, missing argument or malformed flag value
    #[error("{0}")]
    Syntax(String),

    /// Address with nothing before the first '.'
    #[error("invalid uid '{0}': the window uid must not be empty")]
    EmptyWindowUid(String),

    /// `hide -r` pattern that does not compile
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl From<clap::Error> for ParseError {
    fn from(e: clap::Error) -> Self {
        ParseError::Syntax(e.render().to_string().trim_end().to_string())
    }
}
