use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{AnalyzerError, Result};
use crate::ledger::{AccountIdentity, AccountRecord, DateWindow};

/// Look-back of the trend line, in days, when none is configured.
pub const DEFAULT_TREND_WINDOW_DAYS: usize = 31;

/// Daily balances of one account on the shared timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountSeries {
    pub identity: AccountIdentity,
    pub label: String,
    pub average_daily_volume: Decimal,
    pub balances: Vec<Decimal>,
}

/// Accounts aligned on one timeline, least volatile first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompositeSeries {
    pub currency: String,
    pub window: Option<DateWindow>,
    pub dates: Vec<NaiveDate>,
    pub accounts: Vec<AccountSeries>,
    pub sum_line: Vec<Decimal>,
    pub trend_line: Vec<Decimal>,
    pub trend_window_days: usize,
}

pub struct CompositeService;

impl CompositeService {
    pub fn stack(records: &[AccountRecord], short_period: bool) -> Result<Option<CompositeSeries>> {
        Self::stack_with(records, short_period, DEFAULT_TREND_WINDOW_DAYS)
    }

    /// Aligns `records` on a common timeline. Returns `Ok(None)` when there is nothing to stack.
    ///
    /// With `short_period` the timeline is the intersection of all windows, otherwise their
    /// union; accounts are extrapolated outside their own window.
    pub fn stack_with(
        records: &[AccountRecord],
        short_period: bool,
        trend_window_days: usize,
    ) -> Result<Option<CompositeSeries>> {
        let Some(first) = records.first() else {
            tracing::info!("no accounts to stack");
            return Ok(None);
        };
        let currency = first.currency();
        if let Some(mismatch) = records.iter().find(|record| record.currency() != currency) {
            let err = AnalyzerError::CurrencyMismatch {
                expected: currency.to_string(),
                found: mismatch.currency().to_string(),
            };
            tracing::error!(error = %err, "composite aborted");
            return Err(err);
        }

        let window = Self::combined_window(records, short_period);
        let dates: Vec<NaiveDate> = match window {
            Some(window) => window.days().collect(),
            None => {
                tracing::warn!("accounts share no common day; composite timeline is empty");
                Vec::new()
            }
        };

        let mut ordered: Vec<&AccountRecord> = records.iter().collect();
        ordered.sort_by_cached_key(|record| record.average_daily_volume());

        let accounts: Vec<AccountSeries> = ordered
            .into_iter()
            .map(|record| AccountSeries {
                identity: record.identity().clone(),
                label: record.name().to_string(),
                average_daily_volume: record.average_daily_volume(),
                balances: match window {
                    Some(window) => record
                        .balances(Some(window))
                        .map(|balance| balance.amount)
                        .collect(),
                    None => Vec::new(),
                },
            })
            .collect();

        let sum_line: Vec<Decimal> = (0..dates.len())
            .map(|index| accounts.iter().map(|series| series.balances[index]).sum())
            .collect();
        let trend_line = trailing_average(&sum_line, trend_window_days);

        tracing::debug!(
            accounts = accounts.len(),
            days = dates.len(),
            short_period,
            "stacked accounts"
        );
        Ok(Some(CompositeSeries {
            currency: currency.to_string(),
            window,
            dates,
            accounts,
            sum_line,
            trend_line,
            trend_window_days,
        }))
    }

    /// Intersection (`short_period`) or union of every record's window.
    pub fn combined_window(records: &[AccountRecord], short_period: bool) -> Option<DateWindow> {
        let mut windows = records.iter().map(AccountRecord::window);
        let first = windows.next()?;
        if short_period {
            windows.try_fold(first, |acc, window| acc.intersection(&window))
        } else {
            Some(windows.fold(first, |acc, window| acc.union(&window)))
        }
    }
}

/// Mean of `values[max(0, k - look_back)..=k]` for every index `k`.
pub fn trailing_average(values: &[Decimal], look_back: usize) -> Vec<Decimal> {
    let mut prefix = Vec::with_capacity(values.len() + 1);
    prefix.push(Decimal::ZERO);
    for value in values {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + *value);
    }
    (0..values.len())
        .map(|index| {
            let low = index.saturating_sub(look_back);
            let total = prefix[index + 1] - prefix[low];
            total / Decimal::from(index + 1 - low)
        })
        .collect()
}
