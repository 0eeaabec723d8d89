use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{AnalyzerError, Result};
use crate::ledger::{AccountRecord, Transaction};

/// How transactions of the incoming record that fall inside the target's window are treated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Entries inside the target window are assumed to be present already and are dropped.
    #[default]
    TrustWindow,
    /// Entries inside the target window are kept unless an equal `(date, amount, memo)`
    /// booking already exists in the target, counted per occurrence.
    Deduplicate,
}

/// Summary of a successful merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    pub appended: usize,
    pub skipped: usize,
    pub overlapping: bool,
}

pub struct MergeService;

impl MergeService {
    /// Folds `other` into `target` using the window rule.
    pub fn merge(target: &mut AccountRecord, other: &AccountRecord) -> Result<MergeOutcome> {
        Self::merge_with(target, other, OverlapPolicy::TrustWindow)
    }

    /// Folds `other` into `target`. On error `target` is left untouched.
    pub fn merge_with(
        target: &mut AccountRecord,
        other: &AccountRecord,
        policy: OverlapPolicy,
    ) -> Result<MergeOutcome> {
        if target.account_id() != other.account_id() {
            return Err(AnalyzerError::IdentityMismatch {
                target: target.identity().to_string(),
                other: other.identity().to_string(),
            });
        }

        let window = target.window();
        let overlapping = window.overlaps(&other.window());
        let incoming = match policy {
            OverlapPolicy::TrustWindow => other
                .transactions()
                .iter()
                .filter(|txn| !window.contains(txn.date))
                .cloned()
                .collect::<Vec<_>>(),
            OverlapPolicy::Deduplicate => Self::reconcile(target, other),
        };
        let outcome = MergeOutcome {
            appended: incoming.len(),
            skipped: other.transactions().len() - incoming.len(),
            overlapping,
        };

        if overlapping && policy == OverlapPolicy::TrustWindow {
            tracing::warn!(
                account = %target.identity(),
                skipped = outcome.skipped,
                "merging overlapping extracts; entries inside the known window were not compared"
            );
        }

        target.transactions.extend(incoming);
        target.sort_transactions();
        if target.reference_balance().is_before(&other.reference_balance()) {
            target.reference_balance = other.reference_balance();
        }
        target.window = window.union(&other.window());

        tracing::debug!(
            account = %target.identity(),
            appended = outcome.appended,
            skipped = outcome.skipped,
            "merged extract"
        );
        Ok(outcome)
    }

    /// Collapses records sharing an identity, preserving first-seen order.
    pub fn merge_all(records: Vec<AccountRecord>) -> Vec<AccountRecord> {
        Self::merge_all_with(records, OverlapPolicy::TrustWindow)
    }

    pub fn merge_all_with(records: Vec<AccountRecord>, policy: OverlapPolicy) -> Vec<AccountRecord> {
        if records.is_empty() {
            tracing::info!("no account records to merge");
            return Vec::new();
        }
        let input_count = records.len();
        let mut output: Vec<AccountRecord> = Vec::new();
        for record in records {
            let existing = output
                .iter_mut()
                .find(|candidate| candidate.identity() == record.identity());
            match existing {
                Some(target) => {
                    if let Err(err) = Self::merge_with(target, &record, policy) {
                        tracing::error!(error = %err, "keeping extract as a separate record");
                        output.push(record);
                    }
                }
                None => output.push(record),
            }
        }
        tracing::info!(
            input = input_count,
            accounts = output.len(),
            "merged account records"
        );
        output
    }

    fn reconcile(target: &AccountRecord, other: &AccountRecord) -> Vec<Transaction> {
        let window = target.window();
        let mut known: HashMap<_, usize> = HashMap::new();
        for txn in target.transactions() {
            *known.entry(txn.dedup_key()).or_default() += 1;
        }
        let mut incoming = Vec::new();
        for txn in other.transactions() {
            if !window.contains(txn.date) {
                incoming.push(txn.clone());
                continue;
            }
            match known.get_mut(&txn.dedup_key()) {
                Some(count) if *count > 0 => *count -= 1,
                _ => incoming.push(txn.clone()),
            }
        }
        incoming
    }
}
