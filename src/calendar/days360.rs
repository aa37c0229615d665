use crate::calendar::{fixed_month_of_day_of_year, CalendarDefinition, CalendarKind, FIXED_MONTH_DAYS};
use crate::field_type::MILLIS_PER_DAY;

const DAYS_PER_YEAR: i64 = 360;
const MONTHS_PER_YEAR: u32 = 12;

const MIN_YEAR: i32 = -296_533_307;
const MAX_YEAR: i32 = 296_533_308;

/// The 360-day calendar: every month is exactly 30 days and there are no leap years.
///
/// It starts at the same instant as the Gregorian calendar (0001-01-01 in both) and
/// drifts away from it by five or six days a year after that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Days360;

impl CalendarDefinition for Days360 {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Days360
    }

    fn min_year(&self) -> i32 {
        MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        MAX_YEAR
    }

    fn is_leap_year(&self, _year: i32) -> bool {
        false
    }

    fn year_start_days(&self, year: i32) -> i64 {
        (year as i64 - 1) * DAYS_PER_YEAR
    }

    fn month_count(&self, _year: i32) -> u32 {
        MONTHS_PER_YEAR
    }

    fn days_in_month(&self, _year: i32, _month: u32) -> u32 {
        FIXED_MONTH_DAYS
    }

    fn max_days_in_month(&self, _month: u32) -> u32 {
        FIXED_MONTH_DAYS
    }

    fn leap_month(&self, _year: i32) -> Option<u32> {
        None
    }

    fn average_millis_per_year(&self) -> i64 {
        DAYS_PER_YEAR * MILLIS_PER_DAY
    }

    fn average_millis_per_month(&self) -> i64 {
        FIXED_MONTH_DAYS as i64 * MILLIS_PER_DAY
    }

    fn days_in_year(&self, _year: i32) -> u32 {
        DAYS_PER_YEAR as u32
    }

    fn days_before_month(&self, _year: i32, month: u32) -> u32 {
        (month - 1) * FIXED_MONTH_DAYS
    }

    fn month_of_day_of_year(&self, _year: i32, day_of_year: u32) -> u32 {
        fixed_month_of_day_of_year(day_of_year, MONTHS_PER_YEAR)
    }
}
