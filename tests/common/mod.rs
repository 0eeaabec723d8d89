#![allow(dead_code)]

use bank_analyzer::ledger::{AccountIdentity, AccountRecord, Balance, DateWindow, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn amount(raw: &str) -> Decimal {
    raw.parse().expect("valid decimal")
}

pub fn txn(on: NaiveDate, value: &str, memo: &str) -> Transaction {
    let value = amount(value);
    let kind = if value.is_sign_negative() { "DEBIT" } else { "CREDIT" };
    Transaction::new(on, kind, value, memo)
}

/// Builder for extracts used across the integration suites.
pub struct RecordBuilder {
    account_id: String,
    name: String,
    currency: String,
    reference: Balance,
    window: DateWindow,
    transactions: Vec<Transaction>,
}

impl RecordBuilder {
    pub fn new(account_id: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            account_id: account_id.into(),
            name: account_id.into(),
            currency: "EUR".into(),
            reference: Balance::new(end, Decimal::ZERO),
            window: DateWindow::new(start, end).expect("window"),
            transactions: Vec::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.into();
        self
    }

    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn reference(mut self, on: NaiveDate, value: &str) -> Self {
        self.reference = Balance::new(on, amount(value));
        self
    }

    pub fn txn(mut self, on: NaiveDate, value: &str, memo: &str) -> Self {
        self.transactions.push(txn(on, value, memo));
        self
    }

    pub fn build(self) -> AccountRecord {
        AccountRecord::new(
            AccountIdentity::new(self.account_id, self.name),
            self.reference,
            self.currency,
            self.window,
            self.transactions,
        )
    }
}

/// Checking account anchored mid-month with a booking on the anchor day.
pub fn checking() -> AccountRecord {
    RecordBuilder::new("FR76-CHK", date(2024, 1, 1), date(2024, 1, 31))
        .name("Checking")
        .reference(date(2024, 1, 15), "1000.00")
        .txn(date(2024, 1, 20), "-200", "Rent share")
        .txn(date(2024, 1, 3), "500", "Salary")
        .txn(date(2024, 1, 15), "-30", "Utilities")
        .txn(date(2024, 1, 28), "45.50", "Refund")
        .txn(date(2024, 1, 10), "-120.25", "Groceries")
        .build()
}
