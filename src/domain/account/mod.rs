use std::fmt;

use rust_decimal::Decimal;

use super::{
    customer::TaxId,
    error::{Error, Result},
    history::History,
};

/// Branch code shared by every account.
pub const AGENCY: &str = "0001";

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct AccountNumber(pub u32);

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Rules constraining withdrawals beyond simple balance sufficiency.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WithdrawalPolicy {
    /// Only the balance bounds a withdrawal.
    Unrestricted,
    /// Checking account rules: a per-operation ceiling and a cap on the
    /// number of successful withdrawals.
    Limited {
        per_operation: Decimal,
        max_withdrawals: u32,
    },
}

impl WithdrawalPolicy {
    pub const DEFAULT_LIMIT: Decimal = Decimal::from_parts(500, 0, 0, false, 0);
    pub const DEFAULT_MAX_WITHDRAWALS: u32 = 3;

    pub fn limited(per_operation: Decimal, max_withdrawals: u32) -> Self {
        Self::Limited {
            per_operation,
            max_withdrawals,
        }
    }

    /// Checks evaluated ahead of the balance: limit first, then count.
    fn check(&self, amount: Decimal, withdrawals: u32) -> Result<()> {
        let Self::Limited {
            per_operation,
            max_withdrawals,
        } = *self
        else {
            return Ok(());
        };

        if amount > per_operation {
            return Err(Error::WithdrawalLimitExceeded {
                requested: amount,
                limit: per_operation,
            });
        }
        if withdrawals >= max_withdrawals {
            return Err(Error::WithdrawalCountExceeded {
                max: max_withdrawals,
            });
        }
        Ok(())
    }
}

impl Default for WithdrawalPolicy {
    fn default() -> Self {
        Self::limited(Self::DEFAULT_LIMIT, Self::DEFAULT_MAX_WITHDRAWALS)
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    owner: TaxId,
    balance: Decimal,
    withdrawals: u32,
    policy: WithdrawalPolicy,
    history: History,
}

impl Account {
    pub fn new(number: AccountNumber, owner: TaxId, policy: WithdrawalPolicy) -> Self {
        Self {
            number,
            owner,
            balance: Decimal::ZERO,
            withdrawals: 0,
            policy,
            history: History::new(),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn agency(&self) -> &'static str {
        AGENCY
    }

    /// Tax id of the owning customer.
    pub fn owner(&self) -> &TaxId {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn withdrawal_count(&self) -> u32 {
        self.withdrawals
    }

    pub fn policy(&self) -> WithdrawalPolicy {
        self.policy
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount { amount });
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(Error::BalanceOverflow { amount })?;
        Ok(())
    }

    /// Withdraws `amount`, checking in order: amount validity, the policy's
    /// per-operation limit, the withdrawal count, and finally the balance.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount { amount });
        }

        self.policy.check(amount, self.withdrawals)?;

        if amount > self.balance {
            return Err(Error::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(Error::BalanceOverflow { amount })?;
        self.withdrawals = self.withdrawals.saturating_add(1);
        Ok(())
    }
}
