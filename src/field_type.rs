pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_HALFDAY: i64 = 12 * MILLIS_PER_HOUR;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

pub const DAYS_PER_WEEK: i64 = 7;

/// A unit of calendar duration. Ordered from the largest unit to the smallest.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum DurationFieldType {
    Eras,
    Centuries,
    WeekYears,
    Years,
    Months,
    Weeks,
    Days,
    HalfDays,
    Hours,
    Minutes,
    Seconds,
    Millis,
}

impl DurationFieldType {
    /// Length of the unit when it does not depend on the calendar or the zone.
    pub(crate) fn fixed_millis(self) -> Option<i64> {
        match self {
            DurationFieldType::Weeks => Some(MILLIS_PER_WEEK),
            DurationFieldType::Days => Some(MILLIS_PER_DAY),
            DurationFieldType::HalfDays => Some(MILLIS_PER_HALFDAY),
            DurationFieldType::Hours => Some(MILLIS_PER_HOUR),
            DurationFieldType::Minutes => Some(MILLIS_PER_MINUTE),
            DurationFieldType::Seconds => Some(MILLIS_PER_SECOND),
            DurationFieldType::Millis => Some(1),
            _ => None,
        }
    }

    /// Units that are made of whole local days, and so stretch or shrink with
    /// the offset transitions of a variable zone.
    pub(crate) fn is_day_based(self) -> bool {
        matches!(
            self,
            DurationFieldType::Weeks | DurationFieldType::Days | DurationFieldType::HalfDays
        )
    }
}

/// A named calendar component with an integer value.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum DateTimeFieldType {
    Era,
    CenturyOfEra,
    YearOfCentury,
    YearOfEra,
    Year,
    Weekyear,
    WeekOfWeekyear,
    MonthOfYear,
    DayOfYear,
    DayOfMonth,
    DayOfWeek,
    HalfdayOfDay,
    HourOfDay,
    MinuteOfHour,
    SecondOfMinute,
    MillisOfSecond,
    MillisOfDay,
}

impl DateTimeFieldType {
    /// The unit that one step of this field spans.
    pub fn duration_type(self) -> DurationFieldType {
        match self {
            DateTimeFieldType::Era => DurationFieldType::Eras,
            DateTimeFieldType::CenturyOfEra => DurationFieldType::Centuries,
            DateTimeFieldType::YearOfCentury
            | DateTimeFieldType::YearOfEra
            | DateTimeFieldType::Year => DurationFieldType::Years,
            DateTimeFieldType::Weekyear => DurationFieldType::WeekYears,
            DateTimeFieldType::WeekOfWeekyear => DurationFieldType::Weeks,
            DateTimeFieldType::MonthOfYear => DurationFieldType::Months,
            DateTimeFieldType::DayOfYear
            | DateTimeFieldType::DayOfMonth
            | DateTimeFieldType::DayOfWeek => DurationFieldType::Days,
            DateTimeFieldType::HalfdayOfDay => DurationFieldType::HalfDays,
            DateTimeFieldType::HourOfDay => DurationFieldType::Hours,
            DateTimeFieldType::MinuteOfHour => DurationFieldType::Minutes,
            DateTimeFieldType::SecondOfMinute => DurationFieldType::Seconds,
            DateTimeFieldType::MillisOfSecond | DateTimeFieldType::MillisOfDay => {
                DurationFieldType::Millis
            }
        }
    }

    /// The unit the field's value cycles within, or `None` for unbounded fields.
    pub fn range_duration_type(self) -> Option<DurationFieldType> {
        match self {
            DateTimeFieldType::Era | DateTimeFieldType::Year | DateTimeFieldType::Weekyear => None,
            DateTimeFieldType::CenturyOfEra | DateTimeFieldType::YearOfEra => {
                Some(DurationFieldType::Eras)
            }
            DateTimeFieldType::YearOfCentury => Some(DurationFieldType::Centuries),
            DateTimeFieldType::WeekOfWeekyear => Some(DurationFieldType::WeekYears),
            DateTimeFieldType::MonthOfYear | DateTimeFieldType::DayOfYear => {
                Some(DurationFieldType::Years)
            }
            DateTimeFieldType::DayOfMonth => Some(DurationFieldType::Months),
            DateTimeFieldType::DayOfWeek => Some(DurationFieldType::Weeks),
            DateTimeFieldType::HalfdayOfDay
            | DateTimeFieldType::HourOfDay
            | DateTimeFieldType::MillisOfDay => Some(DurationFieldType::Days),
            DateTimeFieldType::MinuteOfHour => Some(DurationFieldType::Hours),
            DateTimeFieldType::SecondOfMinute => Some(DurationFieldType::Minutes),
            DateTimeFieldType::MillisOfSecond => Some(DurationFieldType::Seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_lengths() {
        assert_eq!(MILLIS_PER_DAY, 86_400_000);
        assert_eq!(DurationFieldType::Weeks.fixed_millis(), Some(604_800_000));
        assert_eq!(DurationFieldType::Months.fixed_millis(), None);
        assert_eq!(DurationFieldType::Eras.fixed_millis(), None);
    }

    #[test]
    fn field_units() {
        assert_eq!(
            DateTimeFieldType::DayOfMonth.duration_type(),
            DurationFieldType::Days
        );
        assert_eq!(
            DateTimeFieldType::DayOfMonth.range_duration_type(),
            Some(DurationFieldType::Months)
        );
        assert_eq!(DateTimeFieldType::Year.range_duration_type(), None);
        assert_eq!(
            DateTimeFieldType::WeekOfWeekyear.range_duration_type(),
            Some(DurationFieldType::WeekYears)
        );
        assert!(DurationFieldType::Years < DurationFieldType::Months);
    }
}
