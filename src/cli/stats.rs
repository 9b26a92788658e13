use std::io::Write;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::debug;

use crate::{
    analytics::{
        range::{normalize, stored_span},
        RangeReport,
    },
    store::RecordStore,
    utils::{clock::Clock, threshold::Threshold},
};

use super::{
    config::{DEFAULT_GOAL_MINUTES, DEFAULT_STREAK_THRESHOLD_MINUTES, MAX_MINUTES},
    dates::{parse_user_date, DateStyle, DATE_HELP},
    report::write_report,
};

#[derive(Debug, Parser)]
pub struct StatsCommand {
    #[arg(
        long = "start",
        short,
        help = format!("Start of the range. Defaults to the first saved day. {DATE_HELP}")
    )]
    start_date: Option<String>,
    #[arg(
        long = "end",
        short,
        help = format!("End of the range. Defaults to the last saved day. {DATE_HELP}")
    )]
    end_date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(
        short,
        long,
        help = "Daily goal in minutes. Days at or below it count as meeting the goal",
        value_parser = parse_limit,
        default_value_t = Threshold::at_least_one(DEFAULT_GOAL_MINUTES)
    )]
    goal: Threshold,
    #[arg(
        short,
        long,
        help = "Streak threshold in minutes. Only days strictly under it extend the streak",
        value_parser = parse_limit,
        default_value_t = Threshold::at_least_one(DEFAULT_STREAK_THRESHOLD_MINUTES)
    )]
    threshold: Threshold,
    #[arg(long, help = "Print everything as a single JSON document")]
    json: bool,
    #[arg(long = "no-color", help = "Don't highlight missing days")]
    no_color: bool,
}

fn parse_limit(value: &str) -> Result<Threshold> {
    let threshold = value.parse::<Threshold>()?;
    if *threshold > MAX_MINUTES {
        return Err(anyhow!("At most {MAX_MINUTES} minutes are allowed"));
    }
    Ok(threshold)
}

/// Loads every record and reports on the selected range. An empty store is reported, not
/// treated as an error.
pub async fn process_stats_command<S: RecordStore + ?Sized>(
    store: &S,
    clock: &dyn Clock,
    StatsCommand {
        start_date,
        end_date,
        date_style,
        goal,
        threshold,
        json,
        no_color,
    }: StatsCommand,
    color_output: bool,
    out: &mut impl Write,
) -> Result<()> {
    let records = store.load_all().await?;
    let Some((first, last)) = stored_span(&records) else {
        writeln!(out, "No data yet.")?;
        return Ok(());
    };

    let start = match start_date {
        Some(input) => parse_user_date(&input, date_style, clock)?,
        None => first,
    };
    let end = match end_date {
        Some(input) => parse_user_date(&input, date_style, clock)?,
        None => last,
    };
    debug!("Building report for {start}..={end} over {} records", records.len());

    let days = normalize(&records, start, end)?;
    let report = RangeReport::build(days, goal, threshold);

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write_report(out, &report, color_output && !no_color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, TimeZone, Utc};
    use clap::Parser;

    use crate::{
        analytics::range::InvalidRangeError,
        store::{entities::DailyRecord, MockRecordStore},
        utils::{clock::FixedClock, logging::TEST_LOGGING},
    };

    use super::{process_stats_command, StatsCommand};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap())
    }

    fn store_with(records: Vec<DailyRecord>) -> MockRecordStore {
        let mut store = MockRecordStore::new();
        store
            .expect_load_all()
            .times(1)
            .returning(move || Ok(records.clone()));
        store
    }

    async fn run(store: &MockRecordStore, args: &[&str]) -> Result<String> {
        let command = StatsCommand::try_parse_from(std::iter::once("stats").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        process_stats_command(store, &clock(), command, false, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    fn sample() -> Vec<DailyRecord> {
        vec![
            DailyRecord::new(day(1), 5),
            DailyRecord::new(day(2), 15),
            DailyRecord::new(day(4), 8),
        ]
    }

    #[tokio::test]
    async fn test_empty_store() -> Result<()> {
        *TEST_LOGGING;
        let store = store_with(vec![]);
        assert_eq!(run(&store, &[]).await?, "No data yet.\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_text_report_over_stored_span() -> Result<()> {
        let store = store_with(sample());
        let text = run(&store, &[]).await?;

        assert!(text.starts_with("2024-01-01 .. 2024-01-04 (4 days)\n"));
        assert!(text.contains("Avg (min/day)\t9.3\n"));
        assert!(text.contains("Total minutes\t28\n"));
        assert!(text.contains("Days meeting goal\t2\t(<= 10 min)\n"));
        assert!(text.contains("Days over goal\t1\n"));
        assert!(text.contains("Missing days\t1\n"));
        assert!(text.contains("Current streak under 10 minutes: 1 day(s)\n"));
        assert!(text.contains("2024-01-03 Wed\t    -\tmissing\n"));
        assert!(text.contains(&format!("2024-01-02 Tue\t   15\t{}\n", "#".repeat(40))));
        assert!(text.contains("Mon\t    5\n"));
        assert!(!text.contains('\u{1b}'));
        Ok(())
    }

    #[tokio::test]
    async fn test_json_report_for_explicit_range() -> Result<()> {
        let store = store_with(sample());
        let text = run(
            &store,
            &["--start", "2024-01-01", "--end", "2024-01-05", "--goal", "6", "--threshold", "9", "--json"],
        )
        .await?;

        let value: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(value["summary"]["days_total"], 5);
        assert_eq!(value["summary"]["missing_days"], 2);
        assert_eq!(value["summary"]["above_goal"], 2);
        assert_eq!(value["summary"]["meeting_goal"], 1);
        assert_eq!(value["streak"], 0);
        assert_eq!(value["goal"], 6);
        assert_eq!(value["days"][2]["missing"], true);
        assert_eq!(value["days"][2]["minutes"], serde_json::Value::Null);
        assert_eq!(value["days"][0]["date"], "2024-01-01");
        assert_eq!(value["weekdays"]["Tue"], 15.0);
        assert_eq!(value["weekdays"].as_object().map(|v| v.len()), Some(7));
        Ok(())
    }

    #[tokio::test]
    async fn test_reversed_range_is_reported() -> Result<()> {
        let store = store_with(sample());
        let error = run(&store, &["--start", "2024-01-04", "--end", "2024-01-01"])
            .await
            .unwrap_err();
        assert_eq!(
            error.downcast_ref::<InvalidRangeError>(),
            Some(&InvalidRangeError {
                start: day(4),
                end: day(1)
            })
        );
        Ok(())
    }

    #[test]
    fn test_defaults_for_goal_and_threshold() -> Result<()> {
        let command = StatsCommand::try_parse_from(["stats"])?;
        assert_eq!(*command.goal, 10);
        assert_eq!(*command.threshold, 10);
        Ok(())
    }

    #[test]
    fn test_limits_are_validated() {
        assert!(StatsCommand::try_parse_from(["stats", "--goal", "0"]).is_err());
        assert!(StatsCommand::try_parse_from(["stats", "--goal", "2001"]).is_err());
        assert!(StatsCommand::try_parse_from(["stats", "--threshold", "90m"]).is_ok());
    }
}
