use chrono::{DateTime, Local};
use rust_decimal::Decimal;

use super::transaction::TransactionKind;

/// Timestamp layout used wherever an entry is rendered.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Entry {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub timestamp: DateTime<Local>,
}

impl Entry {
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Append-only log of the transactions applied to one account.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<Entry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: TransactionKind, amount: Decimal) {
        self.entries.push(Entry {
            kind,
            amount,
            timestamp: Local::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order, optionally restricted to the kind whose
    /// label matches `kind` case-insensitively.
    ///
    /// Every call starts a fresh pass over the log.
    pub fn filter<'a>(&'a self, kind: Option<&'a str>) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| kind.map_or(true, |label| entry.kind.matches(label)))
    }
}
