use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::{
    store::{entities::Source, RecordStore},
    utils::{clock::Clock, time::date_to_record_name},
};

use super::{
    config::MAX_MINUTES,
    dates::{parse_user_date, DateStyle, DATE_HELP},
};

#[derive(Debug, Parser)]
pub struct LogCommand {
    #[arg(
        help = "Screen time of the day in minutes",
        value_parser = clap::value_parser!(u32).range(0..=MAX_MINUTES as i64)
    )]
    minutes: u32,
    #[arg(long, short, help = format!("Day to save. Defaults to today. {DATE_HELP}"))]
    date: Option<String>,
    #[arg(long, short, default_value = "manual", help = "Where the number came from")]
    source: String,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

/// Saves one day. Saving the same day again replaces what was stored for it.
pub async fn process_log_command<S: RecordStore + ?Sized>(
    store: &S,
    clock: &dyn Clock,
    LogCommand {
        minutes,
        date,
        source,
        date_style,
    }: LogCommand,
    out: &mut impl Write,
) -> Result<()> {
    let date = match date {
        Some(input) => parse_user_date(&input, date_style, clock)?,
        None => clock.today(),
    };
    debug!("Logging {minutes} minutes for {date}");

    let outcome = store.upsert(date, minutes, Source::from(source)).await?;

    writeln!(
        out,
        "Saved {}: {minutes} min ({outcome})",
        date_to_record_name(date)
    )?;
    Ok(())
}
