//! Line-based interactive menu over any reader/writer pair.

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    audit::Auditor,
    csv,
    domain::{
        account::AccountNumber,
        customer::{Customer, TaxId},
        error::Error as DomainError,
        history::Entry,
        registry::Registry,
        transaction::{Transaction, TransactionKind},
    },
    error::{Error, Result},
};

const MENU: &str = "
Options:
[d]\tDeposit
[s]\tWithdraw
[e]\tStatement
[nc]\tNew account
[lc]\tList accounts
[nu]\tNew customer
[r]\tTransaction report
[x]\tExport statement (CSV)
[q]\tQuit
=> ";

const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Command {
    Deposit,
    Withdraw,
    Statement,
    NewAccount,
    ListAccounts,
    NewCustomer,
    Report,
    Export,
    Quit,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "d" => Ok(Self::Deposit),
            "s" => Ok(Self::Withdraw),
            "e" => Ok(Self::Statement),
            "nc" => Ok(Self::NewAccount),
            "lc" => Ok(Self::ListAccounts),
            "nu" => Ok(Self::NewCustomer),
            "r" => Ok(Self::Report),
            "x" => Ok(Self::Export),
            "q" => Ok(Self::Quit),
            _ => Err(()),
        }
    }
}

pub struct Session<R, W> {
    input: R,
    output: W,
    registry: Registry,
    auditor: Auditor,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, registry: Registry, auditor: Auditor) -> Self {
        Self {
            input,
            output,
            registry,
            auditor,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn into_parts(self) -> (Registry, W) {
        (self.registry, self.output)
    }

    /// Runs until `q` or end of input. Only console I/O failures end the
    /// loop with an error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(choice) = self.prompt(MENU)? else {
                writeln!(self.output)?;
                return Ok(());
            };

            let Ok(command) = choice.parse::<Command>() else {
                writeln!(self.output, "\nInvalid option!")?;
                continue;
            };
            if command == Command::Quit {
                writeln!(self.output, "\nExiting the system...")?;
                return Ok(());
            }

            match self.dispatch(command) {
                Ok(()) => {}
                Err(Error::Io(err)) => return Err(Error::Io(err)),
                Err(err) => {
                    tracing::debug!(?command, error = %err, "operation rejected");
                    writeln!(self.output, "\nOperation failed! {err}.")?;
                }
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Deposit => self.transact(TransactionKind::Deposit),
            Command::Withdraw => self.transact(TransactionKind::Withdrawal),
            Command::Statement => self.statement(),
            Command::NewAccount => self.new_account(),
            Command::ListAccounts => self.list_accounts(),
            Command::NewCustomer => self.new_customer(),
            Command::Report => self.report(),
            Command::Export => self.export(),
            Command::Quit => Ok(()),
        }
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn prompt_tax_id(&mut self) -> Result<Option<TaxId>> {
        Ok(self.prompt("Customer tax id: ")?.map(TaxId::new))
    }

    /// Audits a rejection raised before `operation` itself could run.
    fn reject(&mut self, operation: &str, tax_id: &TaxId, err: DomainError) -> Result<()> {
        self.auditor
            .audited(operation, (tax_id.as_str(),), || Err::<(), _>(err))?;
        Ok(())
    }

    /// Resolves the customer's first account, telling the user when they
    /// have none yet.
    fn primary_account(&mut self, operation: &str) -> Result<Option<(TaxId, AccountNumber)>> {
        let Some(tax_id) = self.prompt_tax_id()? else {
            return Ok(None);
        };

        let lookup = self
            .registry
            .customer(&tax_id)
            .map(Customer::primary_account_number);
        let primary = match lookup {
            Ok(primary) => primary,
            Err(err) => {
                self.reject(operation, &tax_id, err)?;
                return Ok(None);
            }
        };

        match primary {
            Some(number) => Ok(Some((tax_id, number))),
            None => {
                writeln!(self.output, "\nCustomer has no account! Open an account first.")?;
                Ok(None)
            }
        }
    }

    fn new_customer(&mut self) -> Result<()> {
        let Some(tax_id) = self.prompt("Tax id (digits only): ")?.map(TaxId::new) else {
            return Ok(());
        };
        if self.registry.contains(&tax_id) {
            let err = DomainError::DuplicateCustomer {
                tax_id: tax_id.clone(),
            };
            return self.reject("create_customer", &tax_id, err);
        }

        let Some(name) = self.prompt("Full name: ")? else {
            return Ok(());
        };
        let Some(birth_date) = self.prompt("Birth date (dd-mm-yyyy): ")? else {
            return Ok(());
        };
        let birth_date = NaiveDate::parse_from_str(&birth_date, BIRTH_DATE_FORMAT)?;
        let Some(address) = self.prompt("Address: ")? else {
            return Ok(());
        };

        let args = (tax_id.as_str().to_owned(), name.clone(), birth_date, address.clone());
        let registry = &mut self.registry;
        self.auditor.audited("create_customer", args, || {
            registry
                .create_customer(tax_id, name, birth_date, address)
                .map(|customer| customer.tax_id().to_string())
        })?;

        writeln!(self.output, "\nCustomer created successfully!")?;
        Ok(())
    }

    fn new_account(&mut self) -> Result<()> {
        let Some(tax_id) = self.prompt_tax_id()? else {
            return Ok(());
        };

        let registry = &mut self.registry;
        let number = self
            .auditor
            .audited("open_account", (tax_id.as_str(),), || registry.open_account(&tax_id))?;

        writeln!(self.output, "\nAccount {number} created successfully!")?;
        Ok(())
    }

    fn transact(&mut self, kind: TransactionKind) -> Result<()> {
        let label = kind.as_str().to_lowercase();
        let Some((tax_id, number)) = self.primary_account(&label)? else {
            return Ok(());
        };

        let Some(amount) = self.prompt(&format!("Amount to {label}: "))? else {
            return Ok(());
        };
        let amount: Decimal = amount.parse()?;
        let transaction = match kind {
            TransactionKind::Deposit => Transaction::deposit(amount),
            TransactionKind::Withdrawal => Transaction::withdrawal(amount),
        };

        let registry = &mut self.registry;
        self.auditor.audited(&label, (tax_id.as_str(), number.0, amount), || {
            registry.execute(&tax_id, number, &transaction)
        })?;

        writeln!(
            self.output,
            "\n{} completed successfully!",
            transaction.kind()
        )?;
        Ok(())
    }

    fn statement(&mut self) -> Result<()> {
        let Some((tax_id, number)) = self.primary_account("statement")? else {
            return Ok(());
        };
        let registry = &self.registry;
        self.auditor.audited("statement", (tax_id.as_str(), number.0), || {
            registry.account(number).map(|account| account.balance())
        })?;
        let account = self.registry.account(number)?;

        writeln!(self.output, "\n================ STATEMENT ================")?;
        if account.history().is_empty() {
            writeln!(self.output, "No transactions recorded.")?;
        }
        for entry in account.history().filter(None) {
            write_entry(&mut self.output, entry)?;
        }
        writeln!(self.output, "\nBalance:\t$ {:.2}", account.balance())?;
        writeln!(self.output, "===========================================")?;
        Ok(())
    }

    fn report(&mut self) -> Result<()> {
        let Some((tax_id, number)) = self.primary_account("report")? else {
            return Ok(());
        };
        let Some(choice) = self.prompt("Filter by kind (d=deposit, s=withdrawal, [enter]=all): ")?
        else {
            return Ok(());
        };
        let kind = match choice.to_lowercase().as_str() {
            "" => None,
            "d" => Some(TransactionKind::Deposit),
            "s" => Some(TransactionKind::Withdrawal),
            other => Some(other.parse::<TransactionKind>()?),
        }
        .map(|kind| kind.as_str());

        let account = self.registry.account(number)?;
        let found = self.auditor.audited("report", (tax_id.as_str(), kind), || {
            Ok::<_, DomainError>(account.history().filter(kind).count())
        })?;

        writeln!(
            self.output,
            "\n===== TRANSACTION REPORT ({}) =====",
            kind.unwrap_or("All")
        )?;
        if found == 0 {
            writeln!(self.output, "No transactions found.")?;
        }
        for entry in account.history().filter(kind) {
            write_entry(&mut self.output, entry)?;
        }
        writeln!(self.output, "==================================================")?;
        Ok(())
    }

    fn list_accounts(&mut self) -> Result<()> {
        let registry = &self.registry;
        let found = self.auditor.audited("list_accounts", (), || {
            Ok::<_, DomainError>(registry.list_accounts().count())
        })?;
        if found == 0 {
            writeln!(self.output, "\nNo accounts registered.")?;
            return Ok(());
        }

        writeln!(self.output, "\n================ ACCOUNTS ================")?;
        for summary in self.registry.list_accounts() {
            writeln!(self.output, "Agency:\t\t{}", summary.agency)?;
            writeln!(self.output, "Account:\t{}", summary.number)?;
            writeln!(self.output, "Holder:\t\t{}", summary.owner_name)?;
            writeln!(self.output, "{}", "-".repeat(40))?;
        }
        writeln!(self.output, "==========================================")?;
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let Some((tax_id, number)) = self.primary_account("export")? else {
            return Ok(());
        };

        let account = self.registry.account(number)?;
        writeln!(self.output)?;
        let output = &mut self.output;
        self.auditor.audited("export", (tax_id.as_str(), number.0), || {
            csv::write_statement(account, None, output)
        })?;
        Ok(())
    }
}

fn write_entry(output: &mut impl Write, entry: &Entry) -> Result<()> {
    writeln!(
        output,
        "{}\t{}:\t$ {:.2}",
        entry.formatted_timestamp(),
        entry.kind,
        entry.amount
    )?;
    Ok(())
}
