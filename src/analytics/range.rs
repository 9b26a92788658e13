use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::store::entities::DailyRecord;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid range: start {start} is after end {end}")]
pub struct InvalidRangeError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One calendar day of a range. Days without a stored record are kept with no minutes, so gaps
/// show up in the data instead of vanishing from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DenseDay {
    date: NaiveDate,
    minutes: Option<u32>,
    missing: bool,
}

impl DenseDay {
    pub fn observed(date: NaiveDate, minutes: u32) -> Self {
        Self {
            date,
            minutes: Some(minutes),
            missing: false,
        }
    }

    pub fn missing(date: NaiveDate) -> Self {
        Self {
            date,
            minutes: None,
            missing: true,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn minutes(&self) -> Option<u32> {
        self.minutes
    }

    pub fn is_missing(&self) -> bool {
        self.missing
    }
}

/// Expands sparse `records` into one [DenseDay] per date from `start` to `end` (both inclusive),
/// in ascending order. Records outside of the range are ignored.
pub fn normalize(
    records: &[DailyRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DenseDay>, InvalidRangeError> {
    if start > end {
        return Err(InvalidRangeError { start, end });
    }

    let mut by_date = HashMap::<NaiveDate, u32>::new();
    for record in records
        .iter()
        .filter(|record| record.date >= start && record.date <= end)
    {
        by_date.entry(record.date).or_insert(record.minutes);
    }

    Ok(start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| match by_date.get(&date) {
            Some(&minutes) => DenseDay::observed(date, minutes),
            None => DenseDay::missing(date),
        })
        .collect())
}

/// Earliest and latest stored dates, the natural default range to look at.
pub fn stored_span(records: &[DailyRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let start = records.iter().map(|record| record.date).min()?;
    let end = records.iter().map(|record| record.date).max()?;
    Some((start, end))
}

/// Series for plotting. Missing days are drawn as 0 while [DenseDay] keeps them marked.
pub fn chart_series(days: &[DenseDay]) -> Vec<(NaiveDate, u32)> {
    days.iter()
        .map(|day| (day.date(), day.minutes().unwrap_or(0)))
        .collect()
}
