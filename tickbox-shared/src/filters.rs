/// Due-date window predicates for todo listing
///
/// The `filter` query value on the list endpoint selects one of three
/// windows. All three compare calendar components against today and ignore
/// the year entirely:
///
/// - `daily`: same day-of-month (a todo due 2023-07-15 matches on the 15th
///   of every month)
/// - `weekly`: same ISO week-of-year number
/// - `monthly`: same month number
///
/// The component-wise comparison is intentional and kept as-is; it is how
/// the service has always filtered. Unknown filter values mean "no filter".

use chrono::{Datelike, NaiveDate};

/// A due-date window filter parsed from the `filter` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    /// Due date's day-of-month equals today's
    Daily,

    /// Due date's ISO week number equals today's
    Weekly,

    /// Due date's month equals today's
    Monthly,
}

impl DueFilter {
    /// Parses a filter query value; anything unrecognized is `None`
    /// (unfiltered)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(DueFilter::Daily),
            "weekly" => Some(DueFilter::Weekly),
            "monthly" => Some(DueFilter::Monthly),
            _ => None,
        }
    }

    /// Whether a due date falls inside this window relative to `today`
    pub fn matches(&self, due_date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DueFilter::Daily => due_date.day() == today.day(),
            DueFilter::Weekly => due_date.iso_week().week() == today.iso_week().week(),
            DueFilter::Monthly => due_date.month() == today.month(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(DueFilter::parse("daily"), Some(DueFilter::Daily));
        assert_eq!(DueFilter::parse("weekly"), Some(DueFilter::Weekly));
        assert_eq!(DueFilter::parse("monthly"), Some(DueFilter::Monthly));
        assert_eq!(DueFilter::parse("yearly"), None);
        assert_eq!(DueFilter::parse(""), None);
        assert_eq!(DueFilter::parse("Daily"), None);
    }

    #[test]
    fn test_daily_matches_day_of_month_across_months() {
        let today = date(2024, 3, 15);

        assert!(DueFilter::Daily.matches(date(2024, 3, 15), today));
        // Day-of-month comparison only: the 15th of any month or year matches
        assert!(DueFilter::Daily.matches(date(2024, 7, 15), today));
        assert!(DueFilter::Daily.matches(date(2022, 1, 15), today));
        assert!(!DueFilter::Daily.matches(date(2024, 3, 14), today));
    }

    #[test]
    fn test_weekly_matches_iso_week_number() {
        // 2024-03-15 is in ISO week 11 of 2024
        let today = date(2024, 3, 15);

        assert!(DueFilter::Weekly.matches(date(2024, 3, 11), today)); // Monday, week 11
        assert!(DueFilter::Weekly.matches(date(2024, 3, 17), today)); // Sunday, week 11
        assert!(!DueFilter::Weekly.matches(date(2024, 3, 18), today)); // week 12
                                                                       // Year is ignored: week 11 of 2023 also matches
        assert!(DueFilter::Weekly.matches(date(2023, 3, 15), today));
    }

    #[test]
    fn test_monthly_matches_month_across_years() {
        let today = date(2024, 3, 15);

        assert!(DueFilter::Monthly.matches(date(2024, 3, 1), today));
        assert!(DueFilter::Monthly.matches(date(2021, 3, 31), today));
        assert!(!DueFilter::Monthly.matches(date(2024, 4, 15), today));
    }
}
