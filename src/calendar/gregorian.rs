// The gregorian calendar works in cycles of 400 years. From the start of a cycle every 4th
// year is a leap year, except for every 100th year, but the 400th year is a leap year again.
// So 1600 and 2000 are leap years but 1700, 1800 and 1900 are not. Each cycle has 97 leap
// years and 303 normal years, or 97*366 + 303*365 = 146097 days.
//
// Year starts are counted from 0001-01-01. The number of days before year y is 365 days for
// each of the n = y - 1 preceding years, plus one for each leap year in 1..=n. That count is
// floor(n/4) - floor(n/100) + floor(n/400), which also holds for n < 0 (where it counts the
// leap years in n+1..=0 negatively) as long as every division rounds towards negative
// infinity. An arithmetic right shift does that for the powers of two; the division by 100
// needs an explicit floor division since `/` truncates towards zero.

use num_integer::Integer;

use crate::calendar::{CalendarDefinition, CalendarKind};
use crate::div_rem::RemFloor;
use crate::field_type::MILLIS_PER_DAY;

const GREGORIAN_MONTH_LENGTHS_NON_LEAP_YEAR: [u32; 12] =
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const GREGORIAN_CYCLE_DAYS: i64 = 97 * 366 + 303 * 365;
const GREGORIAN_CYCLE_YEARS: i64 = 400;

const MIN_YEAR: i32 = -292_277_023;
const MAX_YEAR: i32 = 292_277_024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gregorian;

impl CalendarDefinition for Gregorian {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Gregorian
    }

    fn min_year(&self) -> i32 {
        MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        MAX_YEAR
    }

    fn is_leap_year(&self, year: i32) -> bool {
        // Get offset into cycle first so negative years behave like positive ones.
        let year = year.rem_floor(400);
        year % 4 == 0 && (year % 100 != 0 || year == 0)
    }

    fn year_start_days(&self, year: i32) -> i64 {
        let preceding = year as i64 - 1;
        let centuries = preceding.div_floor(&100);
        let leap_days = (preceding >> 2) - centuries + (centuries >> 2);
        preceding * 365 + leap_days
    }

    fn month_count(&self, _year: i32) -> u32 {
        12
    }

    fn days_in_month(&self, year: i32, month: u32) -> u32 {
        debug_assert!((1..=12).contains(&month), "Month must be in range 1-12");
        if month == 2 && self.is_leap_year(year) {
            29
        } else {
            GREGORIAN_MONTH_LENGTHS_NON_LEAP_YEAR[(month - 1) as usize]
        }
    }

    fn max_days_in_month(&self, month: u32) -> u32 {
        if month == 2 {
            29
        } else {
            GREGORIAN_MONTH_LENGTHS_NON_LEAP_YEAR[(month - 1) as usize]
        }
    }

    fn leap_month(&self, year: i32) -> Option<u32> {
        self.is_leap_year(year).then_some(2)
    }

    fn average_millis_per_year(&self) -> i64 {
        GREGORIAN_CYCLE_DAYS * MILLIS_PER_DAY / GREGORIAN_CYCLE_YEARS
    }

    fn average_millis_per_month(&self) -> i64 {
        self.average_millis_per_year() / 12
    }

    fn days_in_year(&self, year: i32) -> u32 {
        if self.is_leap_year(year) {
            366
        } else {
            365
        }
    }

    fn days_before_month(&self, year: i32, month: u32) -> u32 {
        let days: u32 = GREGORIAN_MONTH_LENGTHS_NON_LEAP_YEAR[..(month - 1) as usize]
            .iter()
            .sum();
        if month > 2 && self.is_leap_year(year) {
            days + 1
        } else {
            days
        }
    }
}
