//! Command handlers.
//!
//! Each handler checks its argument count, touches the book, and returns the
//! reply text. Missing contacts are ordinary replies; only bad input is an
//! error.

use super::Context;
use crate::domain::birthday::BIRTHDAY_FORMAT;
use crate::error::{CommandError, CommandResult};
use crate::models::{AddressBook, Record};
use tracing::info;

const ADD_USAGE: &str = "add <name> <phone>";
const CHANGE_USAGE: &str = "change <name> <old_phone> <new_phone>";
const PHONE_USAGE: &str = "phone <name>";
const ADD_BIRTHDAY_USAGE: &str = "add-birthday <name> <DD.MM.YYYY>";
const SHOW_BIRTHDAY_USAGE: &str = "show-birthday <name>";
const DELETE_USAGE: &str = "delete <name>";
const REMOVE_PHONE_USAGE: &str = "remove-phone <name> <phone>";

/// Require exactly `N` arguments.
fn expect_args<'a, const N: usize>(
    args: &[&'a str],
    usage: &'static str,
) -> CommandResult<[&'a str; N]> {
    <[&'a str; N]>::try_from(args).map_err(|_| CommandError::Usage(usage))
}

fn not_found(name: &str) -> String {
    format!("Contact {} not found.", name)
}

pub(super) fn hello() -> String {
    "How can I help you?".to_string()
}

pub(super) fn add(args: &[&str], book: &mut AddressBook) -> CommandResult<String> {
    let [name, phone] = expect_args::<2>(args, ADD_USAGE)?;

    if let Some(record) = book.find_mut(name) {
        record.add_phone(phone)?;
        return Ok("Phone number added/updated.".to_string());
    }

    let mut record = Record::new(name)?;
    record.add_phone(phone)?;
    book.add_record(record);
    info!("Created contact {}", name);
    Ok("Contact added.".to_string())
}

pub(super) fn change(args: &[&str], book: &mut AddressBook) -> CommandResult<String> {
    let [name, old_phone, new_phone] = expect_args::<3>(args, CHANGE_USAGE)?;

    let Some(record) = book.find_mut(name) else {
        return Ok(not_found(name));
    };
    if record.find_phone(old_phone).is_none() {
        return Ok(format!("Phone {} not found for {}.", old_phone, name));
    }

    record.edit_phone(old_phone, new_phone)?;
    Ok("Phone number updated.".to_string())
}

pub(super) fn phone(args: &[&str], book: &AddressBook) -> CommandResult<String> {
    let [name] = expect_args::<1>(args, PHONE_USAGE)?;

    let Some(record) = book.find(name) else {
        return Ok(not_found(name));
    };

    let mut lines = vec![format!("Phone number(s) for {}:", name)];
    lines.extend(record.phones().iter().map(ToString::to_string));
    Ok(lines.join("\n"))
}

pub(super) fn all(book: &AddressBook) -> String {
    if book.is_empty() {
        return "No contacts in the address book.".to_string();
    }

    let mut lines = vec!["All contacts:".to_string()];
    lines.extend(book.records().map(ToString::to_string));
    lines.join("\n")
}

pub(super) fn add_birthday(args: &[&str], book: &mut AddressBook) -> CommandResult<String> {
    let [name, birthday] = expect_args::<2>(args, ADD_BIRTHDAY_USAGE)?;

    match book.find_mut(name) {
        Some(record) => {
            record.add_birthday(birthday)?;
            Ok(format!("Birthday added for {}.", name))
        }
        None => Ok(not_found(name)),
    }
}

pub(super) fn show_birthday(args: &[&str], book: &AddressBook) -> CommandResult<String> {
    let [name] = expect_args::<1>(args, SHOW_BIRTHDAY_USAGE)?;

    Ok(match book.find(name) {
        Some(record) => match record.birthday() {
            Some(birthday) => format!("{}'s birthday is {}.", name, birthday),
            None => format!("{} doesn't have a birthday set.", name),
        },
        None => not_found(name),
    })
}

/// Lists upcoming birthdays with the date they fall on this time around.
pub(super) fn birthdays(book: &AddressBook, ctx: &Context) -> String {
    let lines: Vec<String> = book
        .upcoming_birthdays_within(ctx.today, ctx.upcoming_days)
        .into_iter()
        .filter_map(|record| {
            let next = record.birthday()?.next_occurrence(ctx.today)?;
            Some(format!(
                "{}'s birthday on {}",
                record.name(),
                next.format(BIRTHDAY_FORMAT)
            ))
        })
        .collect();

    if lines.is_empty() {
        "No upcoming birthdays.".to_string()
    } else {
        lines.join("\n")
    }
}

pub(super) fn delete(args: &[&str], book: &mut AddressBook) -> CommandResult<String> {
    let [name] = expect_args::<1>(args, DELETE_USAGE)?;

    Ok(match book.delete(name) {
        Some(_) => {
            info!("Deleted contact {}", name);
            format!("Contact {} deleted.", name)
        }
        None => not_found(name),
    })
}

pub(super) fn remove_phone(args: &[&str], book: &mut AddressBook) -> CommandResult<String> {
    let [name, phone] = expect_args::<2>(args, REMOVE_PHONE_USAGE)?;

    let Some(record) = book.find_mut(name) else {
        return Ok(not_found(name));
    };
    if record.find_phone(phone).is_none() {
        return Ok(format!("Phone {} not found for {}.", phone, name));
    }

    record.remove_phone(phone);
    Ok("Phone number removed.".to_string())
}
