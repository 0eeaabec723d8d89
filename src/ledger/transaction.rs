use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest absolute amount (1e20) an extract may carry, so balance and composite sums
/// stay far inside the `Decimal` range.
pub const MAX_ABS_AMOUNT: Decimal = Decimal::from_parts(0x6310_0000, 0x6BC7_5E2D, 0x5, false, 0);

/// One booked ledger entry. Positive amounts credit the account, negative amounts debit it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub kind: String,
    pub amount: Decimal,
    #[serde(default)]
    pub memo: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        kind: impl Into<String>,
        amount: Decimal,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind: kind.into(),
            amount,
            memo: memo.into(),
        }
    }

    pub fn is_before(&self, other: &Transaction) -> bool {
        self.date < other.date
    }

    /// Key used to recognise the same booking across two overlapping extracts.
    pub fn dedup_key(&self) -> (NaiveDate, Decimal, &str) {
        (self.date, self.amount.normalize(), self.memo.trim())
    }
}
