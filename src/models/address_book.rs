//! The address book: contact records keyed by name.

use super::record::Record;
use chrono::{Days, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

/// Length of the window used by the `birthdays` command.
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// All contact records, keyed by name and kept in insertion order.
///
/// Every record is stored under its own name. Names are immutable, so the
/// key never goes stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: IndexMap<String, Record>,
}

impl AddressBook {
    /// Create an empty address book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` under its name, replacing any record already there.
    ///
    /// A replaced record keeps its original position in iteration order.
    pub fn add_record(&mut self, record: Record) {
        self.records
            .insert(record.name().as_str().to_string(), record);
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    /// Remove the record stored under `name`, if any.
    pub fn delete(&mut self, name: &str) -> Option<Record> {
        self.records.shift_remove(name)
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose next birthday falls within [`DEFAULT_UPCOMING_DAYS`]
    /// days of `today`.
    pub fn get_upcoming_birthdays(&self, today: NaiveDate) -> Vec<&Record> {
        self.upcoming_birthdays_within(today, DEFAULT_UPCOMING_DAYS)
    }

    /// Records whose next birthday lies in `today..=today + days`.
    ///
    /// Birth years are ignored: each birthday is compared by its next
    /// anniversary, so a window spanning New Year still matches early-January
    /// birthdays. Results follow insertion order, not date order.
    pub fn upcoming_birthdays_within(&self, today: NaiveDate, days: u32) -> Vec<&Record> {
        let end = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);

        self.records
            .values()
            .filter(|record| {
                record
                    .birthday()
                    .and_then(|b| b.next_occurrence(today))
                    .is_some_and(|next| next <= end)
            })
            .collect()
    }
}

impl Serialize for AddressBook {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.records.values())
    }
}

impl<'de> Deserialize<'de> for AddressBook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records = Vec::<Record>::deserialize(deserializer)?;
        let mut book = AddressBook::new();
        for record in records {
            if book.find(record.name().as_str()).is_some() {
                warn!(
                    "Duplicate contact {} in stored data; keeping the later entry",
                    record.name()
                );
            }
            book.add_record(record);
        }
        Ok(book)
    }
}
