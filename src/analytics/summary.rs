use serde::Serialize;

use crate::utils::threshold::Threshold;

use super::range::DenseDay;

/// Scalar metrics of a range. Averages and goal counts only look at days with data, the day
/// counts include missing days.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RangeSummary {
    pub avg: f64,
    pub total: u64,
    pub days_total: usize,
    pub missing_days: usize,
    /// Days with more minutes than the goal.
    pub above_goal: usize,
    /// Days at or below the goal. Less screen time is the point, so the goal is a ceiling.
    pub meeting_goal: usize,
}

impl RangeSummary {
    pub fn available_days(&self) -> usize {
        self.days_total - self.missing_days
    }
}

pub fn summarize(days: &[DenseDay], goal: Threshold) -> RangeSummary {
    let mut summary = RangeSummary {
        days_total: days.len(),
        ..RangeSummary::default()
    };

    for day in days {
        let Some(minutes) = day.minutes() else {
            summary.missing_days += 1;
            continue;
        };
        summary.total += minutes as u64;
        if minutes > *goal {
            summary.above_goal += 1;
        } else {
            summary.meeting_goal += 1;
        }
    }

    let available = summary.available_days();
    if available > 0 {
        summary.avg = summary.total as f64 / available as f64;
    }
    summary
}
