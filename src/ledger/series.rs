use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{balance::Balance, transaction::Transaction, window::DateWindow};

/// Lazily yields one end-of-day balance per calendar day of a span.
///
/// Every element equals `AccountRecord::balance_at` for the same day. Instead of
/// rescanning the ledger per day, the iterator keeps a running cumulative sum
/// `C(day)` of all amounts booked on or before `day`, so that
/// `balance(day) = anchor + C(day) - C(anchor_date)`.
#[derive(Debug, Clone)]
pub struct BalanceSeries<'a> {
    transactions: &'a [Transaction],
    anchor: Balance,
    anchor_cumulative: Decimal,
    cumulative: Decimal,
    cursor: usize,
    next_day: Option<NaiveDate>,
    end: NaiveDate,
}

impl<'a> BalanceSeries<'a> {
    /// `transactions` must be sorted ascending by date.
    pub(crate) fn new(transactions: &'a [Transaction], anchor: Balance, span: DateWindow) -> Self {
        let anchored = transactions.partition_point(|txn| txn.date <= anchor.date);
        let anchor_cumulative = transactions[..anchored]
            .iter()
            .map(|txn| txn.amount)
            .sum();
        Self {
            transactions,
            anchor,
            anchor_cumulative,
            cumulative: Decimal::ZERO,
            cursor: 0,
            next_day: Some(span.start),
            end: span.end,
        }
    }
}

impl Iterator for BalanceSeries<'_> {
    type Item = Balance;

    fn next(&mut self) -> Option<Balance> {
        let day = self.next_day.filter(|day| *day <= self.end)?;
        while let Some(txn) = self.transactions.get(self.cursor) {
            if txn.date > day {
                break;
            }
            self.cumulative += txn.amount;
            self.cursor += 1;
        }
        self.next_day = day.succ_opt();
        Some(Balance::new(
            day,
            self.anchor.amount + self.cumulative - self.anchor_cumulative,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next_day
            .map(|day| ((self.end - day).num_days() + 1).max(0) as usize)
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}
