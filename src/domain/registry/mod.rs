use chrono::NaiveDate;
use itertools::Itertools;

use super::{
    account::{Account, AccountNumber, WithdrawalPolicy},
    customer::{Customer, TaxId},
    error::{Error, Result},
    transaction::Transaction,
};

/// Linear scan returning the first customer holding `tax_id`.
pub fn find_customer_by_tax_id<'a>(tax_id: &TaxId, customers: &'a [Customer]) -> Option<&'a Customer> {
    customers.iter().find(|customer| customer.tax_id() == tax_id)
}

/// Row of the account listing.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AccountSummary<'a> {
    pub agency: &'a str,
    pub number: AccountNumber,
    pub owner_name: &'a str,
}

/// In-memory customers plus the account number counter.
#[derive(Debug, Clone)]
pub struct Registry {
    customers: Vec<Customer>,
    next_account_number: u32,
    policy: WithdrawalPolicy,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(WithdrawalPolicy::default())
    }
}

impl Registry {
    /// Empty registry opening accounts under `policy`. Numbering starts at 1.
    pub fn new(policy: WithdrawalPolicy) -> Self {
        Self {
            customers: Vec::new(),
            next_account_number: 1,
            policy,
        }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn contains(&self, tax_id: &TaxId) -> bool {
        find_customer_by_tax_id(tax_id, &self.customers).is_some()
    }

    pub fn customer(&self, tax_id: &TaxId) -> Result<&Customer> {
        find_customer_by_tax_id(tax_id, &self.customers).ok_or_else(|| Error::CustomerNotFound {
            tax_id: tax_id.clone(),
        })
    }

    fn customer_mut(&mut self, tax_id: &TaxId) -> Result<&mut Customer> {
        self.customers
            .iter_mut()
            .find(|customer| customer.tax_id() == tax_id)
            .ok_or_else(|| Error::CustomerNotFound {
                tax_id: tax_id.clone(),
            })
    }

    pub fn create_customer(
        &mut self,
        tax_id: TaxId,
        name: String,
        birth_date: NaiveDate,
        address: String,
    ) -> Result<&Customer> {
        if self.contains(&tax_id) {
            tracing::debug!(%tax_id, "duplicate customer rejected");
            return Err(Error::DuplicateCustomer { tax_id });
        }

        tracing::info!(%tax_id, "customer created");
        self.customers
            .push(Customer::new(tax_id.clone(), name, birth_date, address));
        self.customers
            .last()
            .ok_or(Error::CustomerNotFound { tax_id })
    }

    /// Opens a checking account for `tax_id` and returns its number.
    pub fn open_account(&mut self, tax_id: &TaxId) -> Result<AccountNumber> {
        let number = AccountNumber(self.next_account_number);
        let policy = self.policy;
        let customer = self.customer_mut(tax_id)?;

        customer.add_account(Account::new(number, tax_id.clone(), policy));
        self.next_account_number += 1;

        tracing::info!(%tax_id, account = %number, "account opened");
        Ok(number)
    }

    pub fn execute(
        &mut self,
        tax_id: &TaxId,
        number: AccountNumber,
        transaction: &Transaction,
    ) -> Result<()> {
        self.customer_mut(tax_id)?.execute(number, transaction)
    }

    pub fn account(&self, number: AccountNumber) -> Result<&Account> {
        self.customers
            .iter()
            .flat_map(Customer::accounts)
            .find(|account| account.number() == number)
            .ok_or(Error::AccountNotFound { number })
    }

    /// Every account in opening order.
    pub fn list_accounts(&self) -> impl Iterator<Item = AccountSummary<'_>> {
        self.customers
            .iter()
            .flat_map(|customer| {
                customer.accounts().iter().map(move |account| AccountSummary {
                    agency: account.agency(),
                    number: account.number(),
                    owner_name: customer.name(),
                })
            })
            .sorted_by_key(|summary| summary.number)
    }
}
