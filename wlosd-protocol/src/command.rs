//! Command line grammar
//!
//! Each input line is split on whitespace (no quoting) and handed to a clap
//! parser with no binary name, so the first token selects the command. The
//! same clap definition renders the text printed by `help`.

use std::time::Duration;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use regex::Regex;

use crate::address::Address;
use crate::anchor::{Anchors, Edge};
use crate::error::ParseError;

/// Every command word the daemon understands
pub const COMMAND_NAMES: &[&str] = &[
    "exit",
    "help",
    "hide",
    "list-uids",
    "quit",
    "reload-css",
    "show",
];

const SHOW_ABOUT: &str = "Show a message. \
The following input lines compose the message text, read until the first empty \
line unless --end-mark names another terminator. \
By default the message is displayed in the centre of the screen; -t, -b, -l and -r \
anchor it to screen edges and can be combined (-tl is the top-left corner). \
The margin property in the style sheet adjusts the position further. \
A new message replaces the previous message with the same uid. \
Messages with uids of the form 'list_uid.sub_uid' that share list_uid are shown \
as a list, new entries below old ones; reusing a sub_uid replaces that entry in place.";

#[derive(Parser, Debug)]
#[command(
    name = "wlosd",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    override_usage = "<CMD> [ARGS]...",
    subcommand_value_name = "CMD",
    subcommand_help_heading = "Commands",
    after_help = "'help CMD' for more information about 'CMD'."
)]
struct Line {
    #[command(subcommand)]
    command: LineCommand,
}

#[derive(Subcommand, Debug)]
enum LineCommand {
    /// Terminate the program.
    #[command(disable_help_flag = true)]
    Exit,

    /// Display help information about CMD.
    #[command(disable_help_flag = true)]
    Help {
        #[arg(
            value_name = "CMD",
            value_parser = clap::builder::PossibleValuesParser::new(COMMAND_NAMES.iter().copied())
        )]
        cmd: Option<String>,
    },

    /// Hide messages.
    #[command(disable_help_flag = true)]
    Hide(HideArgs),

    /// List all currently showing uids.
    #[command(disable_help_flag = true)]
    ListUids,

    /// Terminate the program.
    #[command(disable_help_flag = true)]
    Quit,

    /// Reload and reapply the css file.
    #[command(disable_help_flag = true)]
    ReloadCss,

    /// Show a message.
    #[command(disable_help_flag = true, long_about = SHOW_ABOUT)]
    Show(ShowArgs),
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Display the message at the top of the screen.
    #[arg(short = 't', long = "top", action = ArgAction::Count)]
    top: u8,

    /// Display the message at the bottom of the screen.
    #[arg(short = 'b', long = "bottom", action = ArgAction::Count)]
    bottom: u8,

    /// Display the message on the left side of the screen.
    #[arg(short = 'l', long = "left", action = ArgAction::Count)]
    left: u8,

    /// Display the message on the right side of the screen.
    #[arg(short = 'r', long = "right", action = ArgAction::Count)]
    right: u8,

    /// Assign CLASS to the label element of the message (for use with css).
    #[arg(short = 'c', long = "class", value_name = "CLASS")]
    classes: Vec<String>,

    /// Assign CLASS to the window of the message (for use with css).
    #[arg(short = 'w', long = "window-class", value_name = "CLASS")]
    window_classes: Vec<String>,

    /// Terminate the message input when reading MARK (default: empty line).
    #[arg(short = 'e', long = "end-mark", value_name = "MARK")]
    end_mark: Option<String>,

    /// The text uses Pango markup ('<', '>' and '&' must be escaped as
    /// '&lt;', '&gt;' and '&amp;').
    #[arg(short = 'm', long = "markup")]
    markup: bool,

    /// Show the message on output OUT (e.g. DP-1).
    #[arg(short = 'o', long = "output", value_name = "OUT")]
    output: Option<String>,

    /// Hide the message after SEC seconds.
    #[arg(
        short = 's',
        long = "sec",
        value_name = "SEC",
        value_parser = parse_seconds,
        allow_negative_numbers = true
    )]
    sec: Option<Duration>,

    /// A unique identifier; used to replace the message (by another show
    /// command) or to hide it.
    #[arg(value_name = "UID[.SUBUID]")]
    uid: String,
}

#[derive(Args, Debug)]
struct HideArgs {
    /// Interpret each UID as a regular expression searched for in every
    /// currently showing uid.
    #[arg(short = 'r', long = "regex")]
    regex: bool,

    /// uids to hide.
    #[arg(value_name = "UID", required = true)]
    uids: Vec<String>,
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("'{value}' is not a non-negative, finite number of seconds"))
}

// ── Typed commands ───────────────────────────────────────────────────

/// A parsed protocol command
#[derive(Debug, Clone)]
pub enum Command {
    Show(Show),
    Hide(Hide),
    ListUids,
    ReloadCss,
    /// Usage text for one command, or for all of them
    Help(Option<String>),
    /// `exit` or `quit`
    Exit,
}

/// A `show` request. `text` is empty until the body has been read.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    pub address: Address,
    /// Classes for the item's label
    pub classes: Vec<String>,
    /// Classes for the whole window
    pub window_classes: Vec<String>,
    pub end_mark: String,
    pub markup: bool,
    /// Output connector name, e.g. `DP-1`
    pub output: Option<String>,
    /// Auto-hide delay; `None` keeps the message until it is hidden
    pub hide_after: Option<Duration>,
    pub anchors: Anchors,
    pub text: String,
}

/// Targets of a `hide` request
#[derive(Debug, Clone)]
pub enum Hide {
    /// Literal addresses
    Uids(Vec<Address>),
    /// `hide -r`: every listed uid matching any of these is hidden
    Patterns(UidPatterns),
}

/// Regular expressions from `hide -r`
#[derive(Debug, Clone)]
pub struct UidPatterns(Vec<Regex>);

impl UidPatterns {
    /// Whether any pattern is found in `uid`.
    pub fn matches(&self, uid: &str) -> bool {
        self.0.iter().any(|p| p.is_match(uid))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl LineCommand {
    fn into_command(self) -> Result<Command, ParseError> {
        Ok(match self {
            LineCommand::Exit | LineCommand::Quit => Command::Exit,
            LineCommand::Help { cmd } => Command::Help(cmd),
            LineCommand::ListUids => Command::ListUids,
            LineCommand::ReloadCss => Command::ReloadCss,
            LineCommand::Hide(args) => Command::Hide(args.into_hide()?),
            LineCommand::Show(args) => Command::Show(args.into_show()?),
        })
    }
}

impl ShowArgs {
    fn into_show(self) -> Result<Show, ParseError> {
        let address = Address::parse(&self.uid)?;
        let anchors = [
            (self.left, Edge::Left),
            (self.right, Edge::Right),
            (self.top, Edge::Top),
            (self.bottom, Edge::Bottom),
        ]
        .into_iter()
        .filter(|&(count, _)| count > 0)
        .map(|(_, edge)| edge)
        .collect();

        Ok(Show {
            address,
            classes: self.classes,
            window_classes: self.window_classes,
            end_mark: self.end_mark.unwrap_or_default(),
            markup: self.markup,
            output: self.output,
            hide_after: self.sec,
            anchors,
            text: String::new(),
        })
    }
}

impl HideArgs {
    fn into_hide(self) -> Result<Hide, ParseError> {
        if self.regex {
            let patterns = self
                .uids
                .into_iter()
                .map(|pattern| match Regex::new(&pattern) {
                    Ok(re) => Ok(re),
                    Err(source) => Err(ParseError::Pattern { pattern, source }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Hide::Patterns(UidPatterns(patterns)))
        } else {
            let addrs = self
                .uids
                .iter()
                .map(|uid| Address::parse(uid))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Hide::Uids(addrs))
        }
    }
}

/// Parse one protocol line (without its line terminator).
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let parsed = Line::try_parse_from(tokens)?;
    parsed.command.into_command()
}

/// Usage text for `help [CMD]`.
///
/// Unknown names fall back to the overview; the parser already rejects them
/// before a `Help` command is produced.
pub fn help_text(cmd: Option<&str>) -> String {
    let mut root = Line::command();
    match cmd.and_then(|name| root.find_subcommand_mut(name)) {
        Some(sub) => sub.render_long_help().to_string(),
        None => root.render_help().to_string(),
    }
}
