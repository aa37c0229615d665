use crate::calendar::{fixed_month_of_day_of_year, CalendarDefinition, CalendarKind, FIXED_MONTH_DAYS};
use crate::div_rem::RemFloor;
use crate::field_type::MILLIS_PER_DAY;

const MONTHS_PER_YEAR: u32 = 13;
const EPAGOMENAL_MONTH: u32 = 13;
const DAYS_PER_COMMON_YEAR: i64 = 365;
// 365.25 days, in milliseconds.
const AVERAGE_MILLIS_PER_YEAR: i64 = (4 * DAYS_PER_COMMON_YEAR + 1) * MILLIS_PER_DAY / 4;

const MIN_YEAR: i32 = -292_271_022;
const MAX_YEAR: i32 = 292_271_023;

/// A 365/366-day calendar made of twelve 30-day months and a short 13th month of
/// five "epagomenal" days, or six in leap years. Every fourth year is a leap year,
/// which keeps the calendar year aligned with the solar year on average.
///
/// Leap years are the years one before a multiple of four (3, 7, 11, ..., -1, -5, ...),
/// so that the leap day falls at the very end of each four-year cycle that starts at
/// the epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Epagomenal;

impl CalendarDefinition for Epagomenal {
    fn kind(&self) -> CalendarKind {
        CalendarKind::Epagomenal
    }

    fn min_year(&self) -> i32 {
        MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        MAX_YEAR
    }

    fn is_leap_year(&self, year: i32) -> bool {
        year.rem_floor(4) == 3
    }

    fn year_start_days(&self, year: i32) -> i64 {
        // Leap years before `year` are the ones in 3, 7, 11, ... below it, which is
        // floor(year / 4) of them; the shift floors for negative years as well.
        let preceding = year as i64 - 1;
        preceding * DAYS_PER_COMMON_YEAR + ((preceding + 1) >> 2)
    }

    fn month_count(&self, _year: i32) -> u32 {
        MONTHS_PER_YEAR
    }

    fn days_in_month(&self, year: i32, month: u32) -> u32 {
        debug_assert!((1..=MONTHS_PER_YEAR).contains(&month));
        if month < EPAGOMENAL_MONTH {
            FIXED_MONTH_DAYS
        } else if self.is_leap_year(year) {
            6
        } else {
            5
        }
    }

    fn max_days_in_month(&self, month: u32) -> u32 {
        if month < EPAGOMENAL_MONTH {
            FIXED_MONTH_DAYS
        } else {
            6
        }
    }

    fn leap_month(&self, year: i32) -> Option<u32> {
        self.is_leap_year(year).then_some(EPAGOMENAL_MONTH)
    }

    fn average_millis_per_year(&self) -> i64 {
        AVERAGE_MILLIS_PER_YEAR
    }

    fn average_millis_per_month(&self) -> i64 {
        AVERAGE_MILLIS_PER_YEAR / MONTHS_PER_YEAR as i64
    }

    fn days_in_year(&self, year: i32) -> u32 {
        if self.is_leap_year(year) {
            366
        } else {
            365
        }
    }

    fn days_before_month(&self, _year: i32, month: u32) -> u32 {
        (month - 1) * FIXED_MONTH_DAYS
    }

    fn month_of_day_of_year(&self, _year: i32, day_of_year: u32) -> u32 {
        fixed_month_of_day_of_year(day_of_year, MONTHS_PER_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years_are_one_before_multiples_of_four() {
        for year in [3, 7, 11, 2003, -1, -5] {
            assert!(Epagomenal.is_leap_year(year), "{year}");
        }
        for year in [0, 1, 2, 4, 100, 2000, -2, -3, -4] {
            assert!(!Epagomenal.is_leap_year(year), "{year}");
        }
    }

    #[test]
    fn thirteenth_month() {
        assert_eq!(Epagomenal.days_in_month(1, 13), 5);
        assert_eq!(Epagomenal.days_in_month(3, 13), 6);
        assert_eq!(Epagomenal.days_in_month(3, 12), 30);
        assert_eq!(Epagomenal.max_days_in_month(13), 6);
        assert_eq!(Epagomenal.max_days_in_year(), 366);
        assert_eq!(Epagomenal.leap_month(3), Some(13));
        assert_eq!(Epagomenal.leap_month(4), None);
    }

    #[test]
    fn year_starts_count_leap_days_on_both_sides_of_the_epoch() {
        assert_eq!(Epagomenal.year_start_days(1), 0);
        assert_eq!(Epagomenal.year_start_days(2), 365);
        assert_eq!(Epagomenal.year_start_days(4), 3 * 365 + 1);
        assert_eq!(Epagomenal.year_start_days(5), 4 * 365 + 1);
        assert_eq!(Epagomenal.year_start_days(0), -365);
        // Year -1 is a leap year.
        assert_eq!(Epagomenal.year_start_days(-1), -365 - 366);
        assert_eq!(Epagomenal.year_start_days(-3), -365 - 366 - 2 * 365);

        for year in -400..400 {
            let length = Epagomenal.year_start_days(year + 1) - Epagomenal.year_start_days(year);
            assert_eq!(length, Epagomenal.days_in_year(year) as i64, "{year}");
        }
    }

    #[test]
    fn month_lookup_includes_epagomenal_days() {
        assert_eq!(Epagomenal.month_of_day_of_year(1, 359), 12);
        assert_eq!(Epagomenal.month_of_day_of_year(1, 360), 13);
        assert_eq!(Epagomenal.month_of_day_of_year(1, 364), 13);
        assert_eq!(Epagomenal.month_of_day_of_year(3, 365), 13);
    }

    #[test]
    fn average_lengths() {
        assert_eq!(Epagomenal.average_millis_per_year(), 31_557_600_000);
        // Thirteen months share the year, so the mean month is about 28.1 days.
        assert_eq!(Epagomenal.average_millis_per_month(), 2_427_507_692);
        assert_eq!(
            Epagomenal.average_millis_per_month() * MONTHS_PER_YEAR as i64 / MILLIS_PER_DAY,
            365
        );
    }
}
