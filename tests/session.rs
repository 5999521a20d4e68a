use std::io::Cursor;

use bank::{
    audit::{Auditor, MemorySink},
    cli::Session,
    domain::{
        account::{AccountNumber, WithdrawalPolicy},
        customer::TaxId,
        registry::Registry,
    },
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn run(script: &str, auditor: Auditor) -> (Registry, String) {
    let mut session = Session::new(
        Cursor::new(script.to_owned()),
        Vec::new(),
        Registry::default(),
        auditor,
    );
    session.run().unwrap();

    let (registry, output) = session.into_parts();
    (registry, String::from_utf8(output).unwrap())
}

const NEW_CUSTOMER: &str = "nu\n12345678900\nGrace Hopper\n09-12-1906\nArlington, VA\n";

#[test]
fn full_banking_day() {
    let script = [
        NEW_CUSTOMER,
        "nc\n12345678900\n",
        "d\n12345678900\n100\n",
        "s\n12345678900\n600\n",
        "s\n12345678900\n50\n",
        "e\n12345678900\n",
        "lc\n",
        "q\n",
    ]
    .concat();

    let (registry, output) = run(&script, Auditor::disabled());

    let account = registry.account(AccountNumber(1)).unwrap();
    assert_eq!(account.balance(), dec!(50));
    assert_eq!(account.withdrawal_count(), 1);
    assert_eq!(account.history().len(), 2);

    assert!(output.contains("Customer created successfully!"));
    assert!(output.contains("Account 1 created successfully!"));
    assert!(output.contains("Deposit completed successfully!"));
    assert!(output.contains("exceeds the per-operation limit of 500"));
    assert!(output.contains("Withdrawal completed successfully!"));
    assert!(output.contains("Deposit:\t$ 100.00"));
    assert!(output.contains("Withdrawal:\t$ 50.00"));
    assert!(output.contains("Balance:\t$ 50.00"));
    assert!(output.contains("Holder:\t\tGrace Hopper"));
    assert!(output.ends_with("Exiting the system...\n"));
}

#[test]
fn duplicate_customer_is_refused_before_details() {
    let script = [NEW_CUSTOMER, "nu\n12345678900\n", "q\n"].concat();

    let (registry, output) = run(&script, Auditor::disabled());

    assert_eq!(registry.len(), 1);
    assert!(output.contains("a customer with tax id 12345678900 already exists"));
}

#[test]
fn reports_missing_customer_and_account() {
    let script = [NEW_CUSTOMER, "d\n999\n", "d\n12345678900\n", "lc\n"].concat();

    let (_, output) = run(&script, Auditor::disabled());

    assert!(output.contains("no customer with tax id 999"));
    assert!(output.contains("Customer has no account! Open an account first."));
    assert!(output.contains("No accounts registered."));
}

#[test]
fn withdrawal_count_is_enforced() {
    let mut script = [NEW_CUSTOMER, "nc\n12345678900\n", "d\n12345678900\n100\n"].concat();
    for _ in 0..4 {
        script.push_str("s\n12345678900\n10\n");
    }

    let (registry, output) = run(&script, Auditor::disabled());

    let account = registry.account(AccountNumber(1)).unwrap();
    assert_eq!(account.balance(), dec!(70));
    assert_eq!(account.withdrawal_count(), 3);
    assert!(output.contains("maximum number of withdrawals (3) reached"));
}

#[test]
fn report_filters_by_kind() {
    let script = [
        NEW_CUSTOMER,
        "nc\n12345678900\n",
        "d\n12345678900\n10\n",
        "d\n12345678900\n20\n",
        "s\n12345678900\n5\n",
        "r\n12345678900\nd\n",
        "r\n12345678900\n\n",
    ]
    .concat();

    let (_, output) = run(&script, Auditor::disabled());

    let deposit_report = output
        .split("===== TRANSACTION REPORT (Deposit) =====")
        .nth(1)
        .and_then(|rest| rest.split("=====").next())
        .unwrap();
    assert_eq!(deposit_report.matches("Deposit:").count(), 2);
    assert!(!deposit_report.contains("Withdrawal:"));
    assert!(output.contains("===== TRANSACTION REPORT (All) ====="));
}

#[test]
fn invalid_input_keeps_the_loop_alive() {
    let script = [
        "zz\n",
        NEW_CUSTOMER,
        "nu\n111\nBad Date\n31-02-2000\n",
        "nc\n12345678900\n",
        "d\n12345678900\nlots\n",
        "d\n12345678900\n-5\n",
        "e\n12345678900\n",
    ]
    .concat();

    let (registry, output) = run(&script, Auditor::disabled());

    assert!(output.contains("Invalid option!"));
    assert!(output.contains("invalid date, expected dd-mm-yyyy"));
    assert!(output.contains("invalid amount"));
    assert!(output.contains("amount must be greater than zero"));
    assert!(output.contains("No transactions recorded."));
    assert!(!registry.contains(&TaxId::from("111")));
}

#[test]
fn export_writes_csv_statement() {
    let script = [
        NEW_CUSTOMER,
        "nc\n12345678900\n",
        "d\n12345678900\n42.5\n",
        "x\n12345678900\n",
    ]
    .concat();

    let (_, output) = run(&script, Auditor::disabled());

    assert!(output.contains("timestamp,kind,amount\n"));
    assert!(output.contains(",Deposit,42.5\n"));
    assert!(output.contains("\n,Balance,42.5\n"));
}

#[test]
fn operations_are_audited_including_failures() {
    let sink = MemorySink::default();
    let script = [
        NEW_CUSTOMER,
        "nc\n12345678900\n",
        "d\n12345678900\n0\n",
        "d\n12345678900\n5\n",
    ]
    .concat();

    run(&script, Auditor::new(sink.clone()));

    let lines = sink.lines();
    let operations: Vec<_> = lines
        .iter()
        .filter_map(|line| line.split(" operation=").nth(1))
        .filter_map(|rest| rest.split(' ').next())
        .collect();
    assert_eq!(
        operations,
        vec!["create_customer", "open_account", "deposit", "deposit"]
    );
    assert!(lines[2].contains("result=error: amount must be greater than zero"));
    assert!(lines[3].ends_with("result=()"));
}

#[test]
fn configured_policy_applies_to_new_accounts() {
    let mut session = Session::new(
        Cursor::new([NEW_CUSTOMER, "nc\n12345678900\n"].concat()),
        Vec::new(),
        Registry::new(WithdrawalPolicy::limited(dec!(50), 1)),
        Auditor::disabled(),
    );
    session.run().unwrap();

    let account = session.registry().account(AccountNumber(1)).unwrap();
    assert_eq!(account.policy(), WithdrawalPolicy::limited(dec!(50), 1));
}

#[test]
fn rejections_before_the_operation_are_audited() {
    let sink = MemorySink::default();
    let script = [
        NEW_CUSTOMER,
        NEW_CUSTOMER,
        "d\n404\n",
        "r\n404\n",
        "lc\n",
    ]
    .concat();

    run(&script, Auditor::new(sink.clone()));

    let lines = sink.lines();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].contains(
        r#"operation=create_customer args=("12345678900",) result=error: a customer with tax id 12345678900 already exists"#
    ));
    assert!(lines[2]
        .contains(r#"operation=deposit args=("404",) result=error: no customer with tax id 404"#));
    assert!(lines[3]
        .contains(r#"operation=report args=("404",) result=error: no customer with tax id 404"#));
    assert!(lines[4].ends_with("operation=list_accounts args=() result=0"));
}

#[test]
fn huge_deposits_are_refused_instead_of_crashing() {
    let script = [
        NEW_CUSTOMER,
        "nc\n12345678900\n",
        "d\n12345678900\n79228162514264337593543950335\n",
        "d\n12345678900\n79228162514264337593543950335\n",
    ]
    .concat();

    let (registry, output) = run(&script, Auditor::disabled());

    let account = registry.account(AccountNumber(1)).unwrap();
    assert_eq!(account.balance(), Decimal::MAX);
    assert_eq!(account.history().len(), 1);
    assert!(output.contains("would overflow the account balance"));
}

#[test]
fn report_accepts_full_kind_names_and_rejects_unknown_ones() {
    let script = [
        NEW_CUSTOMER,
        "nc\n12345678900\n",
        "d\n12345678900\n10\n",
        "r\n12345678900\nWITHDRAWAL\n",
        "r\n12345678900\ntransfer\n",
    ]
    .concat();

    let (_, output) = run(&script, Auditor::disabled());

    assert!(output.contains("===== TRANSACTION REPORT (Withdrawal) =====\nNo transactions found."));
    assert!(output.contains("unknown transaction kind `transfer`"));
}
