//! Command parsing and dispatch.
//!
//! A line of user input becomes a [`Command`] plus its arguments. [`execute`]
//! runs the matching handler and is the single error boundary: any
//! [`CommandError`](crate::error::CommandError) raised by any handler is
//! reported as `Error: <message>` instead of ending the session.

mod handlers;

use crate::models::{AddressBook, DEFAULT_UPCOMING_DAYS};
use chrono::NaiveDate;
use std::str::FromStr;
use tracing::{debug, warn};

/// Reply for commands that aren't recognized.
pub const INVALID_COMMAND: &str = "Invalid command.";

/// A recognized command word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hello,
    Add,
    Change,
    Phone,
    All,
    AddBirthday,
    ShowBirthday,
    Birthdays,
    Delete,
    RemovePhone,
    Exit,
}

impl FromStr for Command {
    type Err = String;

    /// Match a command word, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hello" => Ok(Command::Hello),
            "add" => Ok(Command::Add),
            "change" => Ok(Command::Change),
            "phone" => Ok(Command::Phone),
            "all" => Ok(Command::All),
            "add-birthday" => Ok(Command::AddBirthday),
            "show-birthday" => Ok(Command::ShowBirthday),
            "birthdays" => Ok(Command::Birthdays),
            "delete" => Ok(Command::Delete),
            "remove-phone" => Ok(Command::RemovePhone),
            "close" | "exit" => Ok(Command::Exit),
            _ => Err(format!("Unknown command: {}", s)),
        }
    }
}

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input<'a> {
    /// `None` when the command word wasn't recognized
    pub command: Option<Command>,
    pub args: Vec<&'a str>,
}

impl<'a> Input<'a> {
    /// Split a line on whitespace into a command word and its arguments.
    ///
    /// Returns `None` for a blank line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let token = parts.next()?;
        Some(Self {
            command: token.parse().ok(),
            args: parts.collect(),
        })
    }
}

/// Values a command needs besides the book itself.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub today: NaiveDate,
    pub upcoming_days: u32,
}

impl Context {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
        }
    }
}

/// What the session should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and keep reading input
    Reply(String),
    /// Save and leave the loop
    Exit,
}

/// Run one parsed input against `book`.
pub fn execute(input: &Input<'_>, book: &mut AddressBook, ctx: &Context) -> Outcome {
    let Some(command) = input.command else {
        debug!("Unrecognized input");
        return Outcome::Reply(INVALID_COMMAND.to_string());
    };
    debug!("Executing {:?} with {} argument(s)", command, input.args.len());

    let args = input.args.as_slice();
    let result = match command {
        Command::Exit => return Outcome::Exit,
        Command::Hello => Ok(handlers::hello()),
        Command::Add => handlers::add(args, book),
        Command::Change => handlers::change(args, book),
        Command::Phone => handlers::phone(args, book),
        Command::All => Ok(handlers::all(book)),
        Command::AddBirthday => handlers::add_birthday(args, book),
        Command::ShowBirthday => handlers::show_birthday(args, book),
        Command::Birthdays => Ok(handlers::birthdays(book, ctx)),
        Command::Delete => handlers::delete(args, book),
        Command::RemovePhone => handlers::remove_phone(args, book),
    };

    match result {
        Ok(reply) => Outcome::Reply(reply),
        Err(e) => {
            warn!("{:?} failed: {}", command, e);
            Outcome::Reply(format!("Error: {}", e))
        }
    }
}
