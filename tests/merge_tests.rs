mod common;

use bank_analyzer::{
    core::services::{MergeService, OverlapPolicy},
    AnalyzerError,
};
use common::{amount, checking, date, RecordBuilder};

fn december() -> bank_analyzer::ledger::AccountRecord {
    // Ends at 650.25, the balance `checking()` reconstructs for Jan 1.
    RecordBuilder::new("FR76-CHK", date(2023, 11, 30), date(2023, 12, 31))
        .name("Checking")
        .reference(date(2023, 12, 31), "650.25")
        .txn(date(2023, 12, 5), "500", "Salary")
        .txn(date(2023, 12, 24), "-80", "Gifts")
        .build()
}

#[test]
fn mismatched_accounts_leave_target_untouched() {
    let mut target = checking();
    let before = target.clone();
    let other = RecordBuilder::new("DE89-SAV", date(2024, 2, 1), date(2024, 2, 29))
        .txn(date(2024, 2, 2), "10", "Interest")
        .build();

    let err = MergeService::merge(&mut target, &other).unwrap_err();

    assert!(matches!(err, AnalyzerError::IdentityMismatch { .. }));
    assert_eq!(target, before);
}

#[test]
fn earlier_extract_is_prepended() {
    let mut target = checking();
    let other = december();
    let before = target.transactions().len();

    let outcome = MergeService::merge(&mut target, &other).expect("merge");

    assert_eq!(outcome.appended, other.transactions().len());
    assert_eq!(outcome.skipped, 0);
    assert!(!outcome.overlapping);
    assert_eq!(target.transactions().len(), before + other.transactions().len());
    assert_eq!(target.start_time(), date(2023, 11, 30));
    assert_eq!(target.end_time(), date(2024, 1, 31));
    assert_eq!(target.reference_balance().date, date(2024, 1, 15));
    assert_eq!(target.balance_at(date(2023, 12, 31)).amount, amount("650.25"));
    assert_eq!(target.balance_at(date(2023, 12, 1)).amount, amount("230.25"));
}

#[test]
fn later_reference_balance_wins() {
    let mut target = december();
    let other = checking();

    MergeService::merge(&mut target, &other).expect("merge");

    assert_eq!(target.reference_balance(), other.reference_balance());
    assert_eq!(target.end_time(), date(2024, 1, 31));
    let dates: Vec<_> = target.transactions().iter().map(|t| t.date).collect();
    assert!(dates.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn overlapping_extract_only_contributes_outside_known_window() {
    let mut target = checking();
    let other = RecordBuilder::new("FR76-CHK", date(2024, 1, 20), date(2024, 2, 15))
        .name("Checking")
        .reference(date(2024, 2, 15), "900")
        .txn(date(2024, 1, 28), "45.50", "Refund")
        .txn(date(2024, 1, 30), "-12", "Missing from first extract")
        .txn(date(2024, 2, 3), "54.50", "Cashback")
        .build();

    let outcome = MergeService::merge(&mut target, &other).expect("merge");

    assert!(outcome.overlapping);
    assert_eq!(outcome.appended, 1);
    assert_eq!(outcome.skipped, 2);
    assert_eq!(target.transactions().len(), 6);
    assert_eq!(target.reference_balance().amount, amount("900"));
}

#[test]
fn deduplicate_policy_keeps_unseen_bookings_inside_window() {
    let mut target = checking();
    let other = RecordBuilder::new("FR76-CHK", date(2024, 1, 20), date(2024, 2, 15))
        .name("Checking")
        .reference(date(2024, 2, 15), "900")
        .txn(date(2024, 1, 28), "45.5", "Refund")
        .txn(date(2024, 1, 30), "-12", "Missing from first extract")
        .txn(date(2024, 2, 3), "54.50", "Cashback")
        .build();

    let outcome =
        MergeService::merge_with(&mut target, &other, OverlapPolicy::Deduplicate).expect("merge");

    assert_eq!(outcome.appended, 2);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(target.transactions().len(), 7);
    let refunds = target
        .transactions()
        .iter()
        .filter(|t| t.memo == "Refund")
        .count();
    assert_eq!(refunds, 1);
}

#[test]
fn deduplicate_policy_counts_repeated_bookings() {
    let mut target = RecordBuilder::new("ACC", date(2024, 1, 1), date(2024, 1, 31))
        .txn(date(2024, 1, 5), "-3", "Bus")
        .build();
    let other = RecordBuilder::new("ACC", date(2024, 1, 1), date(2024, 1, 31))
        .txn(date(2024, 1, 5), "-3", "Bus")
        .txn(date(2024, 1, 5), "-3", "Bus")
        .build();

    let outcome =
        MergeService::merge_with(&mut target, &other, OverlapPolicy::Deduplicate).expect("merge");

    assert_eq!(outcome.appended, 1);
    assert_eq!(target.transactions().len(), 2);
}

#[test]
fn merge_all_keeps_distinct_identities_as_is() {
    let records = vec![
        checking(),
        RecordBuilder::new("DE89-SAV", date(2024, 1, 1), date(2024, 1, 31)).build(),
        RecordBuilder::new("FR76-CHK", date(2024, 1, 1), date(2024, 1, 31))
            .name("Joint checking")
            .build(),
    ];

    let merged = MergeService::merge_all(records.clone());

    assert_eq!(merged, records);
}

#[test]
fn merge_all_folds_same_identity() {
    let records = vec![checking(), december()];
    let expected = records[0].transactions().len() + records[1].transactions().len();

    let merged = MergeService::merge_all(records);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].transactions().len(), expected);
    assert_eq!(merged[0].start_time(), date(2023, 11, 30));
}

#[test]
fn merge_all_preserves_first_seen_order() {
    let savings = RecordBuilder::new("DE89-SAV", date(2024, 1, 1), date(2024, 1, 31)).build();
    let merged = MergeService::merge_all(vec![december(), savings.clone(), checking()]);

    let ids: Vec<_> = merged.iter().map(|r| r.account_id()).collect();
    assert_eq!(ids, vec!["FR76-CHK", "DE89-SAV"]);
    assert_eq!(merged[1], savings);
}

#[test]
fn merge_all_of_nothing_is_empty() {
    assert!(MergeService::merge_all(Vec::new()).is_empty());
}
