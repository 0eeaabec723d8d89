use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account balance at the end of a given day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl Balance {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self { date, amount }
    }

    pub fn is_before(&self, other: &Balance) -> bool {
        self.date < other.date
    }
}
