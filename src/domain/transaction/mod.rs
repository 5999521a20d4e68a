use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::{account::Account, error::Result};

#[derive(Debug, Serialize, Hash, PartialEq, Eq, Clone, Copy)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
        }
    }

    /// Case-insensitive comparison against a kind label.
    pub fn matches(&self, label: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(label.trim())
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown transaction kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for TransactionKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        [Self::Deposit, Self::Withdrawal]
            .into_iter()
            .find(|kind| kind.matches(s))
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

/// A single request against an account. Never mutated once built; only its
/// [`History`](super::history::History) entry outlives it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Transaction {
    Deposit { amount: Decimal },
    Withdrawal { amount: Decimal },
}

impl Transaction {
    pub fn deposit(amount: Decimal) -> Self {
        Self::Deposit { amount }
    }

    pub fn withdrawal(amount: Decimal) -> Self {
        Self::Withdrawal { amount }
    }

    pub fn amount(&self) -> Decimal {
        match *self {
            Self::Deposit { amount } | Self::Withdrawal { amount } => amount,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Deposit { .. } => TransactionKind::Deposit,
            Self::Withdrawal { .. } => TransactionKind::Withdrawal,
        }
    }

    /// Applies the transaction and records it in the account history.
    ///
    /// Nothing is recorded when the account rejects the operation.
    pub fn apply(&self, account: &mut Account) -> Result<()> {
        match *self {
            Self::Deposit { amount } => account.deposit(amount)?,
            Self::Withdrawal { amount } => account.withdraw(amount)?,
        }

        account.history_mut().record(self.kind(), self.amount());
        tracing::info!(
            account = %account.number(),
            kind = %self.kind(),
            amount = %self.amount(),
            "transaction applied"
        );
        Ok(())
    }
}
