use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone, Weekday};
use serde::Deserialize;

/// Time bucket lower-bounding a session listing. Absence of a filter means no
/// lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionFilter {
    Day,
    Week,
    Month,
}

impl SessionFilter {
    /// Lower bound in unix seconds, evaluated against the given wall-clock
    /// "now" with local calendar boundaries:
    /// day starts at local midnight today, week at the most recent Monday,
    /// month at the first day of the current month.
    pub fn lower_bound(self, now: DateTime<Local>) -> i64 {
        let today = now.date_naive();
        let first_day = match self {
            SessionFilter::Day => today,
            SessionFilter::Week => today.week(Weekday::Mon).first_day(),
            SessionFilter::Month => today.with_day(1).unwrap_or(today),
        };
        local_midnight(first_day)
    }
}

fn local_midnight(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.timestamp(),
        // midnight skipped by a DST transition
        None => midnight.and_utc().timestamp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(h, min, 0)
                    .unwrap(),
            )
            .earliest()
            .unwrap()
    }

    fn midnight_ts(y: i32, m: u32, d: u32) -> i64 {
        local(y, m, d, 0, 0).timestamp()
    }

    #[test]
    fn day_bound_is_local_midnight_today() {
        // 2026-08-25 is a Tuesday
        let now = local(2026, 8, 25, 15, 30);
        assert_eq!(SessionFilter::Day.lower_bound(now), midnight_ts(2026, 8, 25));
    }

    #[test]
    fn week_bound_rolls_back_to_monday() {
        let now = local(2026, 8, 25, 15, 30);
        assert_eq!(
            SessionFilter::Week.lower_bound(now),
            midnight_ts(2026, 8, 24)
        );
    }

    #[test]
    fn week_bound_on_a_monday_is_that_day() {
        let now = local(2026, 8, 24, 0, 5);
        assert_eq!(
            SessionFilter::Week.lower_bound(now),
            midnight_ts(2026, 8, 24)
        );
    }

    #[test]
    fn month_bound_is_first_of_current_month() {
        let now = local(2026, 8, 25, 15, 30);
        assert_eq!(
            SessionFilter::Month.lower_bound(now),
            midnight_ts(2026, 8, 1)
        );
    }

    #[test]
    fn month_bound_on_the_first_is_that_day() {
        let now = local(2026, 8, 1, 23, 59);
        assert_eq!(
            SessionFilter::Month.lower_bound(now),
            midnight_ts(2026, 8, 1)
        );
    }
}
