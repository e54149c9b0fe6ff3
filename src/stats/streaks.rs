//! Consecutive-day upload streaks

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Longest run of consecutive calendar days with at least one post.
///
/// Days are walked backward from the most recent one; a gap of more than
/// one day closes the current run. The result is not anchored to today, so
/// a three-day run that ended last month still reports 3. No days means no
/// streak.
pub fn consecutive_days(days: impl IntoIterator<Item = NaiveDate>) -> u64 {
    let distinct: BTreeSet<NaiveDate> = days.into_iter().collect();
    let mut newest_first = distinct.into_iter().rev();

    let Some(mut previous) = newest_first.next() else {
        return 0;
    };

    let mut longest = 1;
    let mut run = 1;
    for day in newest_first {
        if previous.signed_duration_since(day).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
        previous = day;
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_gap_breaks_run() {
        assert_eq!(consecutive_days([day(1), day(2), day(3), day(5)]), 3);
        assert_eq!(consecutive_days([day(1), day(3), day(5)]), 1);
    }

    #[test]
    fn test_latest_run_counts_when_longest() {
        assert_eq!(consecutive_days([day(1), day(5), day(6), day(7), day(8)]), 4);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(consecutive_days([day(4), day(4), day(5), day(5)]), 2);
    }

    #[test]
    fn test_empty() {
        assert_eq!(consecutive_days(Vec::new()), 0);
    }

    #[test]
    fn test_month_boundary() {
        let feb_28 = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert_eq!(consecutive_days([feb_28, day(1), day(2)]), 3);
    }
}
