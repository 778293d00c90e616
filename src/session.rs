//! The interactive session: read a line, run it, print the reply, repeat.
//!
//! The session owns the address book for the whole run. It is loaded when
//! the session opens and saved when the user leaves with `close`/`exit` or
//! input runs out.

use crate::commands::{execute, Context, Input, Outcome};
use crate::config::Config;
use crate::error::StorageResult;
use crate::models::AddressBook;
use crate::storage::BookStore;
use anyhow::Context as _;
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

pub const WELCOME: &str = "Welcome to the assistant bot!";
pub const PROMPT: &str = "Enter a command: ";
pub const GOODBYE: &str = "Good bye!";
pub const INVALID_UTF8: &str = "Error: Input must be valid UTF-8 text";

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A running conversation backed by a [`BookStore`].
pub struct Session<S: BookStore> {
    store: S,
    book: AddressBook,
    upcoming_days: u32,
    clock: fn() -> NaiveDate,
}

impl<S: BookStore> Session<S> {
    /// Load the book from `store`, starting empty if nothing was saved.
    pub fn open(store: S, config: &Config) -> StorageResult<Self> {
        let book = store.load()?;
        Ok(Self {
            store,
            book,
            upcoming_days: config.upcoming_days,
            clock: local_today,
        })
    }

    /// Use `clock` instead of the local date for birthday lookups.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    /// Run the command loop until `close`/`exit` or end of input, then save.
    ///
    /// The book is saved however the loop ends, including on a read or write
    /// failure; that failure is returned after the save.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> anyhow::Result<()> {
        let conversation = self.converse(&mut input, &mut output);

        self.store
            .save(&self.book)
            .context("Failed to save the address book")?;
        info!("Session closed with {} contact(s)", self.book.len());

        conversation?;
        writeln!(output, "{}", GOODBYE)?;
        Ok(())
    }

    fn converse<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> anyhow::Result<()> {
        writeln!(output, "{}", WELCOME)?;

        let mut buf = Vec::new();
        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            buf.clear();
            if input
                .read_until(b'\n', &mut buf)
                .context("Failed to read input")?
                == 0
            {
                debug!("End of input");
                writeln!(output)?;
                return Ok(());
            }

            let Ok(line) = std::str::from_utf8(&buf) else {
                warn!("Skipping input line that is not valid UTF-8");
                writeln!(output, "{}", INVALID_UTF8)?;
                continue;
            };

            let Some(parsed) = Input::parse(line) else {
                continue;
            };

            let ctx = Context {
                today: (self.clock)(),
                upcoming_days: self.upcoming_days,
            };
            match execute(&parsed, &mut self.book, &ctx) {
                Outcome::Reply(reply) => writeln!(output, "{}", reply)?,
                Outcome::Exit => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::models::Record;
    use std::cell::RefCell;
    use std::io::Cursor;

    #[derive(Default)]
    struct MemoryStore {
        initial: AddressBook,
        saved: RefCell<Option<AddressBook>>,
        fail_save: bool,
    }

    impl BookStore for MemoryStore {
        fn load(&self) -> StorageResult<AddressBook> {
            Ok(self.initial.clone())
        }

        fn save(&self, book: &AddressBook) -> StorageResult<()> {
            if self.fail_save {
                return Err(StorageError::UnsupportedVersion {
                    found: 0,
                    expected: 1,
                });
            }
            *self.saved.borrow_mut() = Some(book.clone());
            Ok(())
        }
    }

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn run_script(session: &mut Session<MemoryStore>, script: &str) -> String {
        let mut out = Vec::new();
        session.run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_open_uses_stored_book() {
        let mut initial = AddressBook::new();
        initial.add_record(Record::new("Alice").unwrap());
        let store = MemoryStore {
            initial,
            ..Default::default()
        };

        let session = Session::open(store, &Config::default()).unwrap();
        assert!(session.book().find("Alice").is_some());
    }

    #[test]
    fn test_exit_saves_and_says_goodbye() {
        let mut session = Session::open(MemoryStore::default(), &Config::default()).unwrap();
        let out = run_script(&mut session, "add Alice 1234567890\nexit\nadd Bob 1234567890\n");

        assert!(out.starts_with("Welcome to the assistant bot!\n"));
        assert!(out.contains("Contact added."));
        assert!(out.ends_with("Good bye!\n"));

        let saved = session.store.saved.borrow();
        let saved = saved.as_ref().unwrap();
        assert!(saved.find("Alice").is_some());
        assert!(saved.find("Bob").is_none());
    }

    #[test]
    fn test_end_of_input_also_saves() {
        let mut session = Session::open(MemoryStore::default(), &Config::default()).unwrap();
        run_script(&mut session, "add Alice 1234567890\n");
        assert!(session.store.saved.borrow().is_some());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut session = Session::open(MemoryStore::default(), &Config::default()).unwrap();
        let out = run_script(&mut session, "\n   \nhello\nclose\n");
        assert_eq!(
            out,
            "Welcome to the assistant bot!\n\
             Enter a command: Enter a command: Enter a command: How can I help you?\n\
             Enter a command: Good bye!\n"
        );
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let mut session = Session::open(MemoryStore::default(), &Config::default()).unwrap();
        let out = run_script(
            &mut session,
            "add Alice\nadd Alice 123\nphone\nfly\nadd Alice 1234567890\nexit\n",
        );
        assert!(out.contains("Error: Usage: add <name> <phone>"));
        assert!(out.contains("Error: Phone number must be a 10-digit number"));
        assert!(out.contains("Error: Usage: phone <name>"));
        assert!(out.contains("Invalid command."));
        assert!(out.contains("Contact added."));
    }

    #[test]
    fn test_birthdays_use_session_clock() {
        let mut session = Session::open(MemoryStore::default(), &Config::default())
            .unwrap()
            .with_clock(fixed_today);
        let out = run_script(
            &mut session,
            "add Alice 1234567890\nadd-birthday Alice 12.03.1990\nbirthdays\nexit\n",
        );
        assert!(out.contains("Alice's birthday on 12.03.2024"));
    }

    #[test]
    fn test_invalid_utf8_line_is_reported_and_session_continues() {
        let mut session = Session::open(MemoryStore::default(), &Config::default()).unwrap();
        let mut out = Vec::new();
        session
            .run(
                Cursor::new(&b"add Alice 1234567890\nadd \xe0\xe1 0987654321\nexit\n"[..]),
                &mut out,
            )
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Contact added."));
        assert!(out.contains("Error: Input must be valid UTF-8 text"));
        assert!(out.ends_with("Good bye!\n"));

        let saved = session.store.saved.borrow();
        let saved = saved.as_ref().unwrap();
        assert_eq!(saved.len(), 1);
        assert!(saved.find("Alice").is_some());
    }

    /// Accepts output until `marker` has been written, then fails.
    struct FailingWriter {
        written: Vec<u8>,
        marker: &'static str,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if String::from_utf8_lossy(&self.written).contains(self.marker) {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_failure_still_saves() {
        let mut session = Session::open(MemoryStore::default(), &Config::default()).unwrap();
        let writer = FailingWriter {
            written: Vec::new(),
            marker: "Contact added.",
        };
        let result = session.run(
            Cursor::new("add Alice 1234567890\nadd Bob 0987654321\nexit\n"),
            writer,
        );
        assert!(result.is_err());

        let saved = session.store.saved.borrow();
        assert!(saved.as_ref().unwrap().find("Alice").is_some());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let store = MemoryStore {
            fail_save: true,
            ..Default::default()
        };
        let mut session = Session::open(store, &Config::default()).unwrap();
        let mut out = Vec::new();
        let result = session.run(Cursor::new("exit\n"), &mut out);
        assert!(result.is_err());
    }
}
