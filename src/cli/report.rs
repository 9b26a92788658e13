use std::io::{self, Write};

use ansi_term::{Colour, Style};
use chrono::Datelike;

use crate::{
    analytics::{range::chart_series, weekday::weekday_label, RangeReport},
    utils::time::date_to_record_name,
};

const BAR_WIDTH: usize = 40;

/// Writes a [RangeReport] for a terminal. With `color` missing days are highlighted and weekday
/// averages are shaded by whether they fit the goal.
pub fn write_report(out: &mut impl Write, report: &RangeReport, color: bool) -> io::Result<()> {
    let paint = |style: Style, text: String| {
        if color {
            style.paint(text).to_string()
        } else {
            text
        }
    };

    let summary = &report.summary;
    if let (Some(first), Some(last)) = (report.days.first(), report.days.last()) {
        writeln!(
            out,
            "{}",
            paint(
                Style::new().bold(),
                format!(
                    "{} .. {} ({} days)",
                    date_to_record_name(first.date()),
                    date_to_record_name(last.date()),
                    summary.days_total
                )
            )
        )?;
    }
    writeln!(out, "Avg (min/day)\t{:.1}", summary.avg)?;
    writeln!(out, "Total minutes\t{}", summary.total)?;
    writeln!(out, "Days meeting goal\t{}\t(<= {} min)", summary.meeting_goal, report.goal)?;
    writeln!(out, "Days over goal\t{}", summary.above_goal)?;
    writeln!(out, "Missing days\t{}", summary.missing_days)?;
    writeln!(out)?;
    writeln!(
        out,
        "Current streak under {} minutes: {} day(s)",
        report.streak_threshold, report.streak
    )?;
    writeln!(out)?;

    let series = chart_series(&report.days);
    let max = series.iter().map(|(_, minutes)| *minutes).max().unwrap_or(0) as usize;
    for (day, (date, plotted)) in report.days.iter().zip(series) {
        let bar = if max == 0 {
            String::new()
        } else {
            "#".repeat((plotted as usize * BAR_WIDTH).div_ceil(max))
        };
        let line = match day.minutes() {
            Some(minutes) => format!(
                "{} {}\t{minutes:>5}\t{bar}",
                date_to_record_name(date),
                weekday_label(date.weekday())
            ),
            None => paint(
                Colour::Red.normal(),
                format!(
                    "{} {}\t{:>5}\tmissing",
                    date_to_record_name(date),
                    weekday_label(date.weekday()),
                    "-"
                ),
            ),
        };
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;

    writeln!(out, "Weekday averages")?;
    for (label, average) in report.weekdays.iter() {
        let text = format!("{label}\t{average:>5.0}");
        let style = if average > *report.goal as f64 {
            Colour::Red.normal()
        } else {
            Colour::Green.normal()
        };
        writeln!(out, "{}", paint(style, text))?;
    }

    Ok(())
}
