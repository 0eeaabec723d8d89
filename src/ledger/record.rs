use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    balance::Balance, series::BalanceSeries, transaction::Transaction, window::DateWindow,
};

/// Composite key deciding whether two extracts describe the same bank account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AccountIdentity {
    pub account_id: String,
    pub name: String,
}

impl AccountIdentity {
    pub fn new(account_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.account_id {
            f.write_str(&self.account_id)
        } else {
            write!(f, "{} ({})", self.name, self.account_id)
        }
    }
}

/// One account extract: a trusted reference balance plus the transactions booked around it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountRecord {
    pub(crate) identity: AccountIdentity,
    pub(crate) reference_balance: Balance,
    pub(crate) currency: String,
    pub(crate) window: DateWindow,
    pub(crate) transactions: Vec<Transaction>,
}

impl AccountRecord {
    pub fn new(
        identity: AccountIdentity,
        reference_balance: Balance,
        currency: impl Into<String>,
        window: DateWindow,
        mut transactions: Vec<Transaction>,
    ) -> Self {
        transactions.sort_by_key(|txn| txn.date);
        Self {
            identity,
            reference_balance,
            currency: currency.into(),
            window,
            transactions,
        }
    }

    pub fn identity(&self) -> &AccountIdentity {
        &self.identity
    }

    pub fn account_id(&self) -> &str {
        &self.identity.account_id
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn reference_balance(&self) -> Balance {
        self.reference_balance
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn start_time(&self) -> NaiveDate {
        self.window.start
    }

    pub fn end_time(&self) -> NaiveDate {
        self.window.end
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Inserts a transaction after any existing entries booked on the same day.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        let index = self
            .transactions
            .partition_point(|txn| !transaction.is_before(txn));
        self.transactions.insert(index, transaction);
    }

    pub(crate) fn sort_transactions(&mut self) {
        self.transactions.sort_by_key(|txn| txn.date);
    }

    /// Balance at the end of `date`, walked from the reference balance.
    ///
    /// Going back in time subtracts every amount booked in `(date, reference_date]`;
    /// going forward adds every amount booked in `(reference_date, date]`. Dates
    /// outside the window are extrapolated the same way.
    pub fn balance_at(&self, date: NaiveDate) -> Balance {
        let anchor = self.reference_balance;
        let mut amount = anchor.amount;
        if date <= anchor.date {
            for txn in &self.transactions {
                if txn.date <= date {
                    continue;
                }
                if txn.date > anchor.date {
                    break;
                }
                amount -= txn.amount;
            }
        } else {
            for txn in &self.transactions {
                if txn.date <= anchor.date {
                    continue;
                }
                if txn.date > date {
                    break;
                }
                amount += txn.amount;
            }
        }
        Balance::new(date, amount)
    }

    /// Lazy daily balances over `span`, defaulting to the record's own window.
    pub fn balances(&self, span: Option<DateWindow>) -> BalanceSeries<'_> {
        BalanceSeries::new(
            &self.transactions,
            self.reference_balance,
            span.unwrap_or(self.window),
        )
    }

    /// One balance per calendar day of `span`, both bounds included.
    pub fn get_balances(&self, span: Option<DateWindow>) -> Vec<Balance> {
        self.balances(span).collect()
    }

    /// Mean absolute amount moved per day inside the window; zero for an empty ledger.
    pub fn average_daily_volume(&self) -> Decimal {
        let days = self.window.day_count();
        if days == 0 {
            return Decimal::ZERO;
        }
        let moved: Decimal = self
            .transactions
            .iter()
            .filter(|txn| self.window.contains(txn.date))
            .map(|txn| txn.amount.abs())
            .sum();
        moved / Decimal::from(days)
    }
}
