use chrono::{Datelike, Weekday};
use serde::{ser::SerializeMap, Serialize, Serializer};

use super::range::DenseDay;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Average minutes per weekday, always holding all seven days from Monday to Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekdayProfile {
    averages: [f64; 7],
}

impl WeekdayProfile {
    pub fn get(&self, weekday: Weekday) -> f64 {
        self.averages[weekday.num_days_from_monday() as usize]
    }

    /// Entries in Monday first order, labelled `Mon`..`Sun`.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        WEEKDAYS
            .into_iter()
            .map(|weekday| (weekday_label(weekday), self.get(weekday)))
    }
}

impl Serialize for WeekdayProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WEEKDAYS.len()))?;
        for (label, average) in self.iter() {
            map.serialize_entry(label, &average)?;
        }
        map.end()
    }
}

pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Groups observed days by weekday and averages their minutes. Missing days don't belong to any
/// weekday, weekdays without a single observed day stay at 0.
pub fn weekday_profile(days: &[DenseDay]) -> WeekdayProfile {
    let mut totals = [0u64; 7];
    let mut counts = [0u32; 7];

    for day in days {
        let Some(minutes) = day.minutes() else {
            continue;
        };
        let index = day.date().weekday().num_days_from_monday() as usize;
        totals[index] += minutes as u64;
        counts[index] += 1;
    }

    let mut profile = WeekdayProfile::default();
    for (index, average) in profile.averages.iter_mut().enumerate() {
        if counts[index] > 0 {
            *average = totals[index] as f64 / counts[index] as f64;
        }
    }
    profile
}
