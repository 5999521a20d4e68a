use rust_decimal::Decimal;
use thiserror::Error;

use super::{account::AccountNumber, customer::TaxId};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("amount must be greater than zero, got {amount}")]
    InvalidAmount { amount: Decimal },
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },
    #[error("withdrawal of {requested} exceeds the per-operation limit of {limit}")]
    WithdrawalLimitExceeded { requested: Decimal, limit: Decimal },
    #[error("applying {amount} would overflow the account balance")]
    BalanceOverflow { amount: Decimal },
    #[error("maximum number of withdrawals ({max}) reached")]
    WithdrawalCountExceeded { max: u32 },
    #[error("a customer with tax id {tax_id} already exists")]
    DuplicateCustomer { tax_id: TaxId },
    #[error("no customer with tax id {tax_id}")]
    CustomerNotFound { tax_id: TaxId },
    #[error("account {number} not found")]
    AccountNotFound { number: AccountNumber },
}

pub type Result<T> = std::result::Result<T, Error>;
