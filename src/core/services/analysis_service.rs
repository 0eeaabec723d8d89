use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::Config;
use crate::ledger::{AccountIdentity, AccountRecord, Balance, DateWindow};

use super::{CompositeSeries, CompositeService, MergeService};

/// Daily balance series of one merged account.
#[derive(Debug, Clone, Serialize)]
pub struct AccountReport {
    pub identity: AccountIdentity,
    pub currency: String,
    pub window: DateWindow,
    pub reference_balance: Balance,
    pub transaction_count: usize,
    pub average_daily_volume: Decimal,
    pub balances: Vec<Balance>,
}

impl AccountReport {
    pub fn from_record(record: &AccountRecord) -> Self {
        Self {
            identity: record.identity().clone(),
            currency: record.currency().to_string(),
            window: record.window(),
            reference_balance: record.reference_balance(),
            transaction_count: record.transactions().len(),
            average_daily_volume: record.average_daily_volume(),
            balances: record.get_balances(None),
        }
    }
}

/// Everything a chart renderer needs from one batch, plus the failures met on the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub accounts: Vec<AccountReport>,
    pub composite: Option<CompositeSeries>,
    pub errors: Vec<String>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

pub struct AnalysisService;

impl AnalysisService {
    /// Merges the batch, reconstructs every account and builds the composite view.
    ///
    /// A composite failure is recorded in `errors`; per-account results are kept.
    pub fn run(records: Vec<AccountRecord>, config: &Config) -> AnalysisReport {
        let merged = MergeService::merge_all_with(records, config.overlap_policy);
        if merged.is_empty() {
            tracing::info!("nothing to do");
            return AnalysisReport::default();
        }

        let accounts = merged.iter().map(AccountReport::from_record).collect();
        let mut errors = Vec::new();
        let composite = match CompositeService::stack_with(
            &merged,
            config.short_period,
            config.trend_window_days,
        ) {
            Ok(composite) => composite,
            Err(err) => {
                errors.push(err.to_string());
                None
            }
        };

        AnalysisReport {
            accounts,
            composite,
            errors,
        }
    }
}
