//! Line protocol for the wlosd on-screen display daemon
//!
//! Commands arrive one per line on standard input. A `show` line is followed
//! by the message body, terminated by an end-mark line (the first empty line
//! unless `--end-mark` says otherwise):
//!
//! ```text
//! show -s 2 -t volume.level
//! Volume 40%
//!
//! hide -r ^volume
//! list-uids
//! ```
//!
//! This crate only turns text into typed commands; it owns no display state.

pub mod address;
pub mod anchor;
pub mod body;
pub mod command;
pub mod error;

pub use address::Address;
pub use anchor::{Anchors, Edge};
pub use body::read_body;
pub use command::{help_text, parse_line, Command, Hide, Show, UidPatterns, COMMAND_NAMES};
pub use error::ParseError;
