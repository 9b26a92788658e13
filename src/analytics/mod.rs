//! Statistics over a sparse daily series. [range::normalize] turns stored records into one entry
//! per calendar day, everything else works on that dense sequence and is recomputed from scratch
//! on every call.

pub mod range;
pub mod streak;
pub mod summary;
pub mod weekday;

use serde::Serialize;

use crate::utils::threshold::Threshold;

use range::DenseDay;
use summary::RangeSummary;
use weekday::WeekdayProfile;

/// Everything shown for a range, computed independently from the same days.
#[derive(Debug, Clone, Serialize)]
pub struct RangeReport {
    pub summary: RangeSummary,
    pub goal: Threshold,
    pub streak: usize,
    pub streak_threshold: Threshold,
    pub weekdays: WeekdayProfile,
    pub days: Vec<DenseDay>,
}

impl RangeReport {
    pub fn build(days: Vec<DenseDay>, goal: Threshold, streak_threshold: Threshold) -> Self {
        Self {
            summary: summary::summarize(&days, goal),
            goal,
            streak: streak::trailing_streak(&days, streak_threshold),
            streak_threshold,
            weekdays: weekday::weekday_profile(&days),
            days,
        }
    }
}
