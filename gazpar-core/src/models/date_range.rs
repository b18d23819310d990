//! Calendar date ranges for consumption queries.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An inclusive range of gas days used to parameterize a consumption query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First gas day of the range.
    pub start: NaiveDate,
    /// Last gas day of the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDateRange`] when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the range of the `days` days ending at `end`.
    pub fn ending_at(end: NaiveDate, days: u64) -> Self {
        let start = end.checked_sub_days(Days::new(days)).unwrap_or(end);
        Self { start, end }
    }

    /// Creates the range of the last `days` days, ending today.
    pub fn last_days(days: u64) -> Self {
        Self::ending_at(Local::now().date_naive(), days)
    }

    /// Returns the same window shifted back by `days` days.
    pub fn shifted_back(&self, days: u64) -> Self {
        let shift = Days::new(days);
        Self {
            start: self.start.checked_sub_days(shift).unwrap_or(self.start),
            end: self.end.checked_sub_days(shift).unwrap_or(self.end),
        }
    }
}
