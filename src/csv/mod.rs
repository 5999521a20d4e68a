use std::io::Write;

use csv::{Result, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{account::Account, history::Entry, transaction::TransactionKind};

#[derive(Debug, Serialize)]
struct StatementRow {
    timestamp: String,
    kind: TransactionKind,
    amount: Decimal,
}

impl From<&Entry> for StatementRow {
    fn from(entry: &Entry) -> Self {
        Self {
            timestamp: entry.formatted_timestamp(),
            kind: entry.kind,
            amount: entry.amount.round_dp(2),
        }
    }
}

/// Writes the history of `account`, optionally filtered by kind label, as
/// CSV with a `timestamp,kind,amount` header and a closing `Balance` row.
pub fn write_statement(account: &Account, kind: Option<&str>, writer: impl Write) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(["timestamp", "kind", "amount"])?;
    for entry in account.history().filter(kind) {
        writer.serialize(StatementRow::from(entry))?;
    }
    writer.write_record([
        String::new(),
        "Balance".to_owned(),
        account.balance().round_dp(2).to_string(),
    ])?;

    writer.flush()?;
    Ok(())
}
