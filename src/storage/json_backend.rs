use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    errors::{AnalyzerError, Result},
    ledger::{AccountIdentity, AccountRecord, Balance, DateWindow, Transaction, MAX_ABS_AMOUNT},
};

use super::RecordSource;

/// On-disk shape of one account extract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRecord {
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub currency: String,
    pub reference_balance: Balance,
    pub start_time: NaiveDate,
    pub end_time: NaiveDate,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl ExtractRecord {
    /// Validates the window and amounts, then sorts transactions. A missing name falls back
    /// to the account id.
    pub fn into_record(self) -> Result<AccountRecord> {
        let window = DateWindow::new(self.start_time, self.end_time)?;
        self.check_amounts()?;
        let currency = self.currency.trim().to_uppercase();
        if currency.is_empty() {
            return Err(AnalyzerError::InvalidRecord(format!(
                "account `{}` has no currency",
                self.account_id
            )));
        }
        let name = self.name.unwrap_or_else(|| self.account_id.clone());
        Ok(AccountRecord::new(
            AccountIdentity::new(self.account_id, name),
            self.reference_balance,
            currency,
            window,
            self.transactions,
        ))
    }

    fn check_amounts(&self) -> Result<()> {
        let amounts = std::iter::once(self.reference_balance.amount)
            .chain(self.transactions.iter().map(|txn| txn.amount));
        for (index, amount) in amounts.enumerate() {
            if amount.abs() > MAX_ABS_AMOUNT {
                let what = match index {
                    0 => "reference balance".to_string(),
                    n => format!("transaction #{n}"),
                };
                return Err(AnalyzerError::InvalidRecord(format!(
                    "account `{}`: {what} amount {amount} exceeds {MAX_ABS_AMOUNT}",
                    self.account_id
                )));
            }
        }
        Ok(())
    }
}

/// Parses an extract file. A leading `[` means an array of extracts, anything else a
/// single extract, so parse errors point at the offending field.
fn parse_extracts(data: &str) -> Result<Vec<ExtractRecord>> {
    if data.trim_start().starts_with('[') {
        Ok(serde_json::from_str(data)?)
    } else {
        Ok(vec![serde_json::from_str(data)?])
    }
}

/// Reads every extract file with the configured extension from one directory.
#[derive(Debug, Clone)]
pub struct JsonExtractStore {
    dir: PathBuf,
    extension: String,
}

impl JsonExtractStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    pub fn from_config(dir: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(dir, config.extract_extension.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Matching files sorted by name so batch order is reproducible.
    pub fn extract_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(AnalyzerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("extract directory `{}` not found", self.dir.display()),
            )));
        }
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            paths.push(path);
        }
        paths.sort();
        Ok(paths)
    }
}

impl RecordSource for JsonExtractStore {
    fn load_records(&self) -> Result<Vec<AccountRecord>> {
        let mut records = Vec::new();
        for path in self.extract_paths()? {
            let loaded = load_extract_file(&path)?;
            tracing::debug!(path = %path.display(), records = loaded.len(), "loaded extract");
            records.extend(loaded);
        }
        tracing::info!(
            dir = %self.dir.display(),
            records = records.len(),
            "loaded account extracts"
        );
        Ok(records)
    }
}

/// Loads one file holding either a single extract or an array of extracts.
pub fn load_extract_file(path: &Path) -> Result<Vec<AccountRecord>> {
    let data = fs::read_to_string(path)?;
    parse_extracts(&data)
        .map_err(|err| AnalyzerError::InvalidRecord(format!("{}: {}", path.display(), err)))?
        .into_iter()
        .map(|extract| {
            extract.into_record().map_err(|err| {
                AnalyzerError::InvalidRecord(format!("{}: {}", path.display(), err))
            })
        })
        .collect()
}
