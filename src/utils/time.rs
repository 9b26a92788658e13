use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a date to a string in screentime.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format(RECORD_DATE_FORMAT).to_string()
}

/// Timestamp format stored in the `updated_at` column.
pub fn timestamp_to_record(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Lenient date parsing for stored rows. Accepts a plain date or a date-time, in which case the
/// time part is dropped.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, RECORD_DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|v| v.date())
}
