use crate::utils::threshold::Threshold;

use super::range::DenseDay;

/// Number of consecutive days, ending at the last day of `days`, spent strictly under
/// `threshold`. A missing day ends the streak the same way a day over the threshold does.
pub fn trailing_streak(days: &[DenseDay], threshold: Threshold) -> usize {
    days.iter()
        .rev()
        .take_while(|day| matches!(day.minutes(), Some(minutes) if minutes < *threshold))
        .count()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{analytics::range::DenseDay, utils::threshold::Threshold};

    use super::trailing_streak;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn threshold(minutes: u32) -> Threshold {
        Threshold::new_opt(minutes).unwrap()
    }

    fn observed(minutes: &[Option<u32>]) -> Vec<DenseDay> {
        minutes
            .iter()
            .zip(1..)
            .map(|(m, d)| match m {
                Some(m) => DenseDay::observed(day(d), *m),
                None => DenseDay::missing(day(d)),
            })
            .collect()
    }

    #[test]
    fn empty_has_no_streak() {
        assert_eq!(trailing_streak(&[], threshold(10)), 0);
    }

    #[test]
    fn missing_day_breaks_streak() {
        let days = observed(&[Some(5), Some(15), None, Some(8)]);
        assert_eq!(trailing_streak(&days, threshold(10)), 1);
    }

    #[test]
    fn last_day_missing_means_zero() {
        let days = observed(&[Some(1), Some(2), Some(3), None]);
        assert_eq!(trailing_streak(&days, threshold(10)), 0);
    }

    #[test]
    fn threshold_is_strict() {
        let days = observed(&[Some(3), Some(9), Some(10)]);
        assert_eq!(trailing_streak(&days, threshold(10)), 0);
        let days = observed(&[Some(10), Some(9), Some(0)]);
        assert_eq!(trailing_streak(&days, threshold(10)), 2);
    }

    #[test]
    fn whole_range_qualifies() {
        let days = observed(&[Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(trailing_streak(&days, threshold(5)), 4);
    }
}
