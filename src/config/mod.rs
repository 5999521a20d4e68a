use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;

use crate::{audit::Auditor, domain::account::WithdrawalPolicy};

#[derive(Parser, Debug, Clone)]
#[command(name = "bank", version, about = "Interactive in-memory bank accounts")]
pub struct Config {
    /// File receiving one audit line per operation
    #[arg(long = "audit-log", default_value = "bank_audit.log")]
    pub audit_log: PathBuf,

    /// Do not write the audit log
    #[arg(long = "no-audit")]
    pub no_audit: bool,

    /// Largest amount a single withdrawal may take from a new account
    #[arg(long = "withdrawal-limit", default_value_t = WithdrawalPolicy::DEFAULT_LIMIT, value_parser = positive_decimal)]
    pub withdrawal_limit: Decimal,

    /// Successful withdrawals allowed per account
    #[arg(long = "max-withdrawals", default_value_t = WithdrawalPolicy::DEFAULT_MAX_WITHDRAWALS)]
    pub max_withdrawals: u32,
}

impl Config {
    pub fn policy(&self) -> WithdrawalPolicy {
        WithdrawalPolicy::limited(self.withdrawal_limit, self.max_withdrawals)
    }

    pub fn auditor(&self) -> Auditor {
        if self.no_audit {
            Auditor::disabled()
        } else {
            Auditor::to_file(&self.audit_log)
        }
    }
}

fn positive_decimal(value: &str) -> Result<Decimal, String> {
    let amount: Decimal = value.trim().parse().map_err(|err| format!("{err}"))?;
    if amount <= Decimal::ZERO {
        return Err(format!("expected a positive amount, got {amount}"));
    }
    Ok(amount)
}
