use std::fmt::Display;

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::ValueEnum;

use crate::utils::{clock::Clock, time::parse_record_date};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

pub const DATE_HELP: &str =
    "Examples are \"today\", \"yesterday\", \"2025-03-15\", \"15/03/2025\", \"last friday\"";

/// Turns user input into a calendar day. `2025-03-15` is always understood, anything else goes
/// through natural language parsing relative to the current time.
pub fn parse_user_date(input: &str, style: DateStyle, clock: &dyn Clock) -> Result<NaiveDate> {
    if let Some(date) = parse_record_date(input) {
        return Ok(date);
    }
    let now = clock.time().with_timezone(&Local);
    parse_date_string(input.trim(), now, style.into())
        .map(|v| v.date_naive())
        .map_err(|e| anyhow!("Failed to understand date \"{input}\": {e}"))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::utils::clock::FixedClock;

    use super::{parse_user_date, DateStyle};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
    }

    #[test]
    fn iso_dates_skip_dialects() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        assert_eq!(parse_user_date("2024-02-03", DateStyle::Us, &clock()).unwrap(), expected);
        assert_eq!(parse_user_date("2024-02-03", DateStyle::Uk, &clock()).unwrap(), expected);
    }

    #[test]
    fn dialect_decides_day_and_month() {
        assert_eq!(
            parse_user_date("03/02/2024", DateStyle::Uk, &clock()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()
        );
        assert_eq!(
            parse_user_date("03/02/2024", DateStyle::Us, &clock()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_user_date("the day after never", DateStyle::Uk, &clock()).is_err());
    }
}
