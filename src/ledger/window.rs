use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{AnalyzerError, Result};

/// Known coverage of an extract: `start` is excluded, `end` is included.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(AnalyzerError::InvalidRecord(format!(
                "window end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// True when a transaction booked on `date` falls inside the known coverage.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date > self.start && date <= self.end
    }

    /// True when both coverages share at least one day.
    pub fn overlaps(&self, other: &DateWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Every calendar day in `[start, end]`, both bounds included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Number of days yielded by [`DateWindow::days`].
    pub fn day_count(&self) -> usize {
        ((self.end - self.start).num_days() + 1).max(0) as usize
    }

    pub fn union(&self, other: &DateWindow) -> DateWindow {
        DateWindow {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Days covered by both windows, or `None` when they are disjoint.
    pub fn intersection(&self, other: &DateWindow) -> Option<DateWindow> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateWindow { start, end })
    }
}
