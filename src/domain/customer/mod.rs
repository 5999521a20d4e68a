use std::fmt;

use chrono::NaiveDate;

use super::{
    account::{Account, AccountNumber},
    error::{Error, Result},
    transaction::Transaction,
};

/// Individual taxpayer identifier; unique per customer.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct TaxId(String);

impl TaxId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaxId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Customer {
    tax_id: TaxId,
    name: String,
    birth_date: NaiveDate,
    address: String,
    accounts: Vec<Account>,
}

impl Customer {
    pub fn new(tax_id: TaxId, name: String, birth_date: NaiveDate, address: String) -> Self {
        Self {
            tax_id,
            name,
            birth_date,
            address,
            accounts: Vec::new(),
        }
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    pub fn account(&self, number: AccountNumber) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|account| account.number() == number)
            .ok_or(Error::AccountNotFound { number })
    }

    /// The account interactive operations act upon.
    pub fn primary_account(&self) -> Option<&Account> {
        self.accounts.first()
    }

    pub fn primary_account_number(&self) -> Option<AccountNumber> {
        self.primary_account().map(Account::number)
    }

    /// Dispatches `transaction` to one of this customer's accounts.
    ///
    /// Authorization rules per customer kind belong here; individuals have
    /// none.
    pub fn execute(&mut self, number: AccountNumber, transaction: &Transaction) -> Result<()> {
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.number() == number)
            .ok_or(Error::AccountNotFound { number })?;

        transaction.apply(account)
    }
}
