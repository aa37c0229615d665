//! Calendar definitions: the small set of pure functions that pin down one calendar
//! system. Everything else (instant decomposition, field arithmetic, week rules) is done
//! generically by [`crate::Chronology`] on top of these primitives.

use std::fmt::Debug;

pub use days360::Days360;
pub use epagomenal::Epagomenal;
pub use gregorian::Gregorian;

use crate::field_type::MILLIS_PER_DAY;

mod days360;
mod epagomenal;
mod gregorian;

/// The calendar systems known to the engine.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum CalendarKind {
    /// Proleptic Gregorian calendar.
    Gregorian,
    /// Twelve months of exactly 30 days and no leap years.
    Days360,
    /// Twelve 30-day months followed by a 13th month of 5 days, or 6 in leap years.
    Epagomenal,
}

impl CalendarKind {
    pub fn definition(self) -> &'static dyn CalendarDefinition {
        match self {
            CalendarKind::Gregorian => &Gregorian,
            CalendarKind::Days360 => &Days360,
            CalendarKind::Epagomenal => &Epagomenal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CalendarKind::Gregorian => "Gregorian",
            CalendarKind::Days360 => "Days360",
            CalendarKind::Epagomenal => "Epagomenal",
        }
    }
}

/// A stateless description of a calendar system.
///
/// Years are numbered so that year 1 starts at the epoch (instant 0). Year starts must
/// be strictly increasing across the whole `min_year()..=max_year()` range, and
/// `year_start_days` must be defined (without overflow) for every `i32`, since week
/// computations look one year past either end of the range.
pub trait CalendarDefinition: Debug + Send + Sync {
    fn kind(&self) -> CalendarKind;

    fn min_year(&self) -> i32;

    fn max_year(&self) -> i32;

    fn is_leap_year(&self, year: i32) -> bool;

    /// Number of days from the epoch to the first day of `year`.
    fn year_start_days(&self, year: i32) -> i64;

    /// Number of months in `year`. Constant for all calendars defined here.
    fn month_count(&self, year: i32) -> u32;

    /// Length of `month` (1-based) in `year`. `month` must be in `1..=month_count(year)`.
    fn days_in_month(&self, year: i32, month: u32) -> u32;

    /// The longest `month` can be in any year.
    fn max_days_in_month(&self, month: u32) -> u32;

    /// The month that gains a day in leap years, if `year` is a leap year.
    fn leap_month(&self, year: i32) -> Option<u32>;

    /// Mean year length, only used to estimate imprecise quantities.
    fn average_millis_per_year(&self) -> i64;

    /// Mean month length, only used to estimate imprecise quantities.
    fn average_millis_per_month(&self) -> i64;

    fn year_start_millis(&self, year: i32) -> i64 {
        self.year_start_days(year) * MILLIS_PER_DAY
    }

    fn days_in_year(&self, year: i32) -> u32 {
        (self.year_start_days(year + 1) - self.year_start_days(year)) as u32
    }

    fn max_days_in_year(&self) -> u32 {
        (1..=self.month_count(0))
            .map(|month| self.max_days_in_month(month))
            .sum()
    }

    /// Days from the start of `year` to the start of `month`.
    fn days_before_month(&self, year: i32, month: u32) -> u32 {
        (1..month).map(|m| self.days_in_month(year, m)).sum()
    }

    /// The 1-based month containing the 0-based `day_of_year`.
    fn month_of_day_of_year(&self, year: i32, day_of_year: u32) -> u32 {
        let mut remaining = day_of_year;
        let last = self.month_count(year);
        for month in 1..last {
            let length = self.days_in_month(year, month);
            if remaining < length {
                return month;
            }
            remaining -= length;
        }
        last
    }

    /// Half the approximate distance from the start of year 0 to the epoch. Only used
    /// to seed the year search for an instant; halving keeps the estimate from
    /// overflowing at the extremes of the instant range.
    fn approx_millis_at_epoch_divided_by_two(&self) -> i64 {
        self.average_millis_per_year() / 2
    }
}

/// Shared shape of calendars made of 30-day months. Month lookups are plain
/// divisions instead of walks over a table.
pub(crate) const FIXED_MONTH_DAYS: u32 = 30;

pub(crate) fn fixed_month_of_day_of_year(day_of_year: u32, month_count: u32) -> u32 {
    use crate::div_rem::ClampedDivRem;
    let (month, _) = day_of_year.clamped_div_rem(FIXED_MONTH_DAYS, month_count - 1);
    month + 1
}
