//! Target-day calculation, independent of any UI interaction.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// The calendar day the run should select.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TargetDate {
    pub date: NaiveDate,
    pub day_of_month: u32,
    /// The target falls in the month after `today`, so the date picker needs
    /// one "next month" activation before the day cell exists.
    pub month_rollover: bool,
}

/// Next occurrence of `target` strictly after `today`.
///
/// When today already is the target weekday the site still wants the
/// following week, so a zero offset is treated as seven days.
pub fn next_occurrence(today: NaiveDate, target: Weekday) -> TargetDate {
    let offset = (target.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    let offset = if offset == 0 { 7 } else { offset };
    // Adding at most 7 days never overflows the calendar range.
    let date = today
        .checked_add_days(Days::new(u64::from(offset)))
        .unwrap_or(today);
    TargetDate {
        date,
        day_of_month: date.day(),
        month_rollover: date.month() != today.month(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monday_targets_the_coming_sunday() {
        let target = next_occurrence(date(2024, 3, 18), Weekday::Sun);
        assert_eq!(target.date, date(2024, 3, 24));
        assert_eq!(target.day_of_month, 24);
        assert!(!target.month_rollover);
    }

    #[test]
    fn saturday_targets_tomorrow() {
        let target = next_occurrence(date(2024, 3, 30), Weekday::Sun);
        assert_eq!(target.date, date(2024, 3, 31));
        assert!(!target.month_rollover);
    }

    #[test]
    fn sunday_never_targets_itself() {
        let target = next_occurrence(date(2024, 3, 31), Weekday::Sun);
        assert_eq!(target.date, date(2024, 4, 7));
        assert_eq!(target.day_of_month, 7);
        assert!(target.month_rollover);
    }

    #[test]
    fn year_rollover_is_a_month_rollover() {
        let target = next_occurrence(date(2024, 12, 30), Weekday::Wed);
        assert_eq!(target.date, date(2025, 1, 1));
        assert!(target.month_rollover);
    }

    #[test]
    fn every_start_date_lands_strictly_after_within_a_week() {
        let mut today = date(2024, 1, 1);
        let end = date(2025, 1, 1);
        while today < end {
            for target_weekday in [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ] {
                let target = next_occurrence(today, target_weekday);
                assert!(target.date > today);
                assert!(target.date <= today + Days::new(7));
                assert_eq!(target.date.weekday(), target_weekday);
                assert_eq!(
                    target.month_rollover,
                    target.date.month() != today.month()
                );
            }
            today = today.succ_opt().unwrap();
        }
    }
}
