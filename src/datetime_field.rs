use std::cmp::{max, min};

use num_integer::Integer;

use crate::chronology::Chronology;
use crate::duration::DurationField;
use crate::error::{Error, Result};
use crate::field_type::{
    DateTimeFieldType, DAYS_PER_WEEK, MILLIS_PER_DAY, MILLIS_PER_HALFDAY, MILLIS_PER_HOUR,
    MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MILLIS_PER_WEEK,
};
use crate::fields::{FieldSet, BCE, CE};

/// One calendar field of a chronology, with the operations to read, replace and round it.
///
/// Every operation takes and returns UTC instants. Values are computed on the local
/// instant in the chronology's zone.
#[derive(Debug, Clone)]
pub struct DateTimeField {
    chronology: Chronology,
    field_type: DateTimeFieldType,
}

impl DateTimeField {
    pub fn new(chronology: &Chronology, field_type: DateTimeFieldType) -> Self {
        DateTimeField {
            chronology: chronology.clone(),
            field_type,
        }
    }

    pub fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    /// The unit one step of the field spans.
    pub fn duration_field(&self) -> DurationField {
        self.chronology
            .duration_field(self.field_type.duration_type())
    }

    /// The unit the field cycles within, `None` for the unbounded year-like fields.
    pub fn range_duration_field(&self) -> Option<DurationField> {
        self.field_type
            .range_duration_type()
            .map(|unit| self.chronology.duration_field(unit))
    }

    pub fn get(&self, instant: i64) -> Result<i64> {
        Ok(self.chronology.decompose(instant)?.get(self.field_type))
    }

    pub fn minimum_value(&self, instant: i64) -> Result<i64> {
        let (_, fields) = self.local_fields(instant)?;
        Ok(self.range_at(&fields).0)
    }

    pub fn maximum_value(&self, instant: i64) -> Result<i64> {
        let (_, fields) = self.local_fields(instant)?;
        Ok(self.range_at(&fields).1)
    }

    /// Replaces the field's value, leaving larger fields unchanged. A value outside the
    /// field's range at `instant` is rejected. When the new value shortens the enclosing
    /// month (or week-year), the day of month (or week) is clamped to fit.
    pub fn set(&self, instant: i64, value: i64) -> Result<i64> {
        let (local, fields) = self.local_fields(instant)?;
        let (min_value, max_value) = self.range_at(&fields);
        if !(min_value..=max_value).contains(&value) {
            return Err(Error::invalid_field(
                self.field_type,
                value,
                min_value,
                max_value,
            ));
        }
        let local = self.set_local(local, &fields, value)?;
        self.chronology.zone().to_utc(local)
    }

    /// Like [`set`](Self::set), but clamps `value` into the field's range first.
    pub fn set_clamped(&self, instant: i64, value: i64) -> Result<i64> {
        let (_, fields) = self.local_fields(instant)?;
        let (min_value, max_value) = self.range_at(&fields);
        self.set(instant, value.clamp(min_value, max_value))
    }

    /// Whether the field's current value exists only because of a leap.
    pub fn is_leap(&self, instant: i64) -> Result<bool> {
        let (_, fields) = self.local_fields(instant)?;
        Ok(self.is_leap_at(&fields))
    }

    /// Units of the next smaller field gained by the leap, 0 when not leap.
    pub fn leap_amount(&self, instant: i64) -> Result<i64> {
        Ok(if self.is_leap(instant)? { 1 } else { 0 })
    }

    /// Start of the field's unit containing `instant`.
    pub fn round_floor(&self, instant: i64) -> Result<i64> {
        let (local, fields) = self.local_fields(instant)?;
        let floor = self.floor_local(local, &fields)?;
        self.chronology.zone().to_utc(floor)
    }

    /// The first unit boundary at or after `instant`.
    pub fn round_ceiling(&self, instant: i64) -> Result<i64> {
        let (local, fields) = self.local_fields(instant)?;
        let floor = self.floor_local(local, &fields)?;
        if floor == local {
            return Ok(instant);
        }
        let ceiling = self.next_boundary_local(floor, &fields)?;
        self.chronology.zone().to_utc(ceiling)
    }

    /// Milliseconds from the start of the field's unit to `instant`.
    pub fn remainder(&self, instant: i64) -> Result<i64> {
        Ok(instant - self.round_floor(instant)?)
    }

    fn local_fields(&self, instant: i64) -> Result<(i64, FieldSet)> {
        let local = self.chronology.zone().to_local(instant)?;
        let fields = self.chronology.decompose_local(local)?;
        Ok((local, fields))
    }

    fn max_year_of_era(&self, era: i64) -> i64 {
        if era == CE {
            self.chronology.max_year() as i64
        } else {
            1 - self.chronology.min_year() as i64
        }
    }

    fn range_at(&self, fields: &FieldSet) -> (i64, i64) {
        let chronology = &self.chronology;
        let calendar = chronology.calendar();
        match self.field_type {
            DateTimeFieldType::Era => (BCE, CE),
            DateTimeFieldType::CenturyOfEra => (0, self.max_year_of_era(fields.era()) / 100),
            DateTimeFieldType::YearOfCentury => (0, 99),
            DateTimeFieldType::YearOfEra => (1, self.max_year_of_era(fields.era())),
            DateTimeFieldType::Year | DateTimeFieldType::Weekyear => (
                chronology.min_year() as i64,
                chronology.max_year() as i64,
            ),
            DateTimeFieldType::WeekOfWeekyear => (
                1,
                chronology.weeks_in_weekyear_unchecked(fields.weekyear()) as i64,
            ),
            DateTimeFieldType::MonthOfYear => (1, calendar.month_count(fields.year()) as i64),
            DateTimeFieldType::DayOfYear => (1, calendar.days_in_year(fields.year()) as i64),
            DateTimeFieldType::DayOfMonth => (
                1,
                calendar.days_in_month(fields.year(), fields.month_of_year()) as i64,
            ),
            DateTimeFieldType::DayOfWeek => (1, DAYS_PER_WEEK),
            DateTimeFieldType::HalfdayOfDay => (0, 1),
            DateTimeFieldType::HourOfDay => (0, 23),
            DateTimeFieldType::MinuteOfHour | DateTimeFieldType::SecondOfMinute => (0, 59),
            DateTimeFieldType::MillisOfSecond => (0, MILLIS_PER_SECOND - 1),
            DateTimeFieldType::MillisOfDay => (0, MILLIS_PER_DAY - 1),
        }
    }

    fn set_local(&self, local: i64, fields: &FieldSet, value: i64) -> Result<i64> {
        let chronology = &self.chronology;
        let shift = |current: i64, unit: i64| -> Result<i64> {
            let shifted = local + (value - current) * unit;
            chronology.check_local(shifted)?;
            Ok(shifted)
        };
        match self.field_type {
            DateTimeFieldType::Era => {
                let year_of_era = fields.year_of_era();
                self.with_year(fields, year_in_era(value, year_of_era))
            }
            DateTimeFieldType::YearOfEra => self.with_year(fields, year_in_era(fields.era(), value)),
            DateTimeFieldType::CenturyOfEra => {
                self.with_year_of_era(fields, value * 100 + fields.year_of_century())
            }
            DateTimeFieldType::YearOfCentury => {
                self.with_year_of_era(fields, fields.century_of_era() * 100 + value)
            }
            DateTimeFieldType::Year => self.with_year(fields, value),
            DateTimeFieldType::Weekyear => {
                let weekyear = chronology.check_year(value)?;
                let week = min(
                    fields.week_of_weekyear(),
                    chronology.weeks_in_weekyear_unchecked(weekyear),
                );
                chronology.local_from_week_date(
                    value,
                    week as i64,
                    fields.day_of_week() as i64,
                    fields.millis_of_day() as i64,
                )
            }
            DateTimeFieldType::WeekOfWeekyear => {
                shift(fields.week_of_weekyear() as i64, MILLIS_PER_WEEK)
            }
            DateTimeFieldType::MonthOfYear => {
                let month = value as u32;
                let day = min(
                    fields.day_of_month(),
                    chronology.calendar().days_in_month(fields.year(), month),
                );
                chronology.local_from_date(
                    fields.year() as i64,
                    value,
                    day as i64,
                    fields.millis_of_day() as i64,
                )
            }
            DateTimeFieldType::DayOfYear => shift(fields.day_of_year() as i64, MILLIS_PER_DAY),
            DateTimeFieldType::DayOfMonth => shift(fields.day_of_month() as i64, MILLIS_PER_DAY),
            DateTimeFieldType::DayOfWeek => shift(fields.day_of_week() as i64, MILLIS_PER_DAY),
            DateTimeFieldType::HalfdayOfDay => {
                shift(fields.halfday_of_day() as i64, MILLIS_PER_HALFDAY)
            }
            DateTimeFieldType::HourOfDay => shift(fields.hour_of_day() as i64, MILLIS_PER_HOUR),
            DateTimeFieldType::MinuteOfHour => {
                shift(fields.minute_of_hour() as i64, MILLIS_PER_MINUTE)
            }
            DateTimeFieldType::SecondOfMinute => {
                shift(fields.second_of_minute() as i64, MILLIS_PER_SECOND)
            }
            DateTimeFieldType::MillisOfSecond => shift(fields.millis_of_second() as i64, 1),
            DateTimeFieldType::MillisOfDay => shift(fields.millis_of_day() as i64, 1),
        }
    }

    /// Same month, day and time in `year`, with the day clamped to the month's length.
    fn with_year(&self, fields: &FieldSet, year: i64) -> Result<i64> {
        let chronology = &self.chronology;
        let checked_year = chronology.check_year(year)?;
        let month = min(fields.month_of_year(), chronology.month_count(checked_year));
        let day = min(
            fields.day_of_month(),
            chronology.calendar().days_in_month(checked_year, month),
        );
        chronology.local_from_date(
            year,
            month as i64,
            day as i64,
            fields.millis_of_day() as i64,
        )
    }

    fn with_year_of_era(&self, fields: &FieldSet, year_of_era: i64) -> Result<i64> {
        let max_year_of_era = self.max_year_of_era(fields.era());
        if !(1..=max_year_of_era).contains(&year_of_era) {
            return Err(Error::invalid_field(
                DateTimeFieldType::YearOfEra,
                year_of_era,
                1,
                max_year_of_era,
            ));
        }
        self.with_year(fields, year_in_era(fields.era(), year_of_era))
    }

    fn is_leap_at(&self, fields: &FieldSet) -> bool {
        let chronology = &self.chronology;
        let calendar = chronology.calendar();
        let year = fields.year();
        let in_leap_month = calendar.leap_month(year) == Some(fields.month_of_year());
        match self.field_type {
            DateTimeFieldType::Year
            | DateTimeFieldType::YearOfEra
            | DateTimeFieldType::YearOfCentury
            | DateTimeFieldType::CenturyOfEra => calendar.is_leap_year(year),
            DateTimeFieldType::MonthOfYear => in_leap_month,
            DateTimeFieldType::DayOfMonth => {
                in_leap_month
                    && fields.day_of_month() == calendar.days_in_month(year, fields.month_of_year())
            }
            DateTimeFieldType::DayOfYear => {
                calendar.is_leap_year(year) && fields.day_of_year() == calendar.days_in_year(year)
            }
            DateTimeFieldType::Weekyear => {
                // More weeks than fit whole in the calendar year, e.g. 53 for Gregorian.
                let weekyear = fields.weekyear();
                let weeks = chronology.weeks_in_weekyear_unchecked(weekyear) as i64;
                weeks > calendar.days_in_year(weekyear) as i64 / DAYS_PER_WEEK
            }
            _ => false,
        }
    }

    fn floor_local(&self, local: i64, fields: &FieldSet) -> Result<i64> {
        let chronology = &self.chronology;
        let day = local.div_floor(&MILLIS_PER_DAY);
        let floor = match self.field_type {
            DateTimeFieldType::Era => {
                if fields.era() == CE {
                    chronology.calendar().year_start_millis(1)
                } else {
                    chronology.min_local_instant()
                }
            }
            DateTimeFieldType::CenturyOfEra => {
                let year = self.first_year_of_century(fields.era(), fields.century_of_era());
                let year = max(year, chronology.min_year() as i64);
                chronology.local_from_date(year, 1, 1, 0)?
            }
            DateTimeFieldType::YearOfCentury
            | DateTimeFieldType::YearOfEra
            | DateTimeFieldType::Year => chronology.local_from_date(fields.year() as i64, 1, 1, 0)?,
            DateTimeFieldType::Weekyear => {
                chronology.first_week_start_day(fields.weekyear()) * MILLIS_PER_DAY
            }
            DateTimeFieldType::WeekOfWeekyear => {
                (day - (fields.day_of_week() as i64 - 1)) * MILLIS_PER_DAY
            }
            DateTimeFieldType::MonthOfYear => chronology.local_from_date(
                fields.year() as i64,
                fields.month_of_year() as i64,
                1,
                0,
            )?,
            DateTimeFieldType::DayOfYear
            | DateTimeFieldType::DayOfMonth
            | DateTimeFieldType::DayOfWeek => day * MILLIS_PER_DAY,
            DateTimeFieldType::HalfdayOfDay => local - local.mod_floor(&MILLIS_PER_HALFDAY),
            DateTimeFieldType::HourOfDay => local - local.mod_floor(&MILLIS_PER_HOUR),
            DateTimeFieldType::MinuteOfHour => local - local.mod_floor(&MILLIS_PER_MINUTE),
            DateTimeFieldType::SecondOfMinute => local - local.mod_floor(&MILLIS_PER_SECOND),
            DateTimeFieldType::MillisOfSecond | DateTimeFieldType::MillisOfDay => local,
        };
        chronology.check_local(floor)?;
        Ok(floor)
    }

    fn next_boundary_local(&self, floor: i64, fields: &FieldSet) -> Result<i64> {
        let chronology = &self.chronology;
        let next = match self.field_type {
            DateTimeFieldType::Era => {
                if fields.era() == CE {
                    // No era follows the current one.
                    let max = chronology.max_local_instant();
                    return Err(Error::range(max + 1, chronology.min_local_instant(), max));
                }
                chronology.calendar().year_start_millis(1)
            }
            DateTimeFieldType::CenturyOfEra => {
                let century = fields.century_of_era();
                let year = match fields.era() {
                    CE => (century + 1) * 100,
                    _ if century == 0 => 1,
                    _ => 1 - (century * 100 - 1),
                };
                chronology.local_from_date(year, 1, 1, 0)?
            }
            DateTimeFieldType::YearOfCentury
            | DateTimeFieldType::YearOfEra
            | DateTimeFieldType::Year => chronology.add_years_local(floor, 1)?,
            DateTimeFieldType::Weekyear => chronology.add_weekyears_local(floor, 1)?,
            DateTimeFieldType::MonthOfYear => chronology.add_months_local(floor, 1)?,
            field_type => {
                let unit = chronology
                    .duration_field(field_type.duration_type())
                    .unit_millis()?;
                floor.checked_add(unit).ok_or(Error::Overflow)?
            }
        };
        chronology.check_local(next)?;
        Ok(next)
    }

    /// The year at the start of the century block holding `century` in `era`. BCE blocks
    /// run backwards, so their first year has the largest year of era.
    fn first_year_of_century(&self, era: i64, century: i64) -> i64 {
        if era == CE {
            max(century * 100, 1)
        } else {
            1 - (century * 100 + 99)
        }
    }
}

fn year_in_era(era: i64, year_of_era: i64) -> i64 {
    if era == CE {
        year_of_era
    } else {
        1 - year_of_era
    }
}

/// Field access on instants.
impl Chronology {
    pub fn field(&self, field_type: DateTimeFieldType) -> DateTimeField {
        DateTimeField::new(self, field_type)
    }

    pub fn get(&self, field_type: DateTimeFieldType, instant: i64) -> Result<i64> {
        self.field(field_type).get(instant)
    }

    pub fn set(&self, field_type: DateTimeFieldType, instant: i64, value: i64) -> Result<i64> {
        self.field(field_type).set(instant, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarKind;

    const DAY: i64 = MILLIS_PER_DAY;

    fn gregorian() -> Chronology {
        Chronology::utc(CalendarKind::Gregorian)
    }

    fn days360() -> Chronology {
        Chronology::utc(CalendarKind::Days360)
    }

    fn epagomenal() -> Chronology {
        Chronology::utc(CalendarKind::Epagomenal)
    }

    fn at(c: &Chronology, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
        c.date_time_millis(year, month, day, hour, minute, 0, 0).unwrap()
    }

    fn ymd(c: &Chronology, instant: i64) -> (i32, u32, u32) {
        let fields = c.decompose(instant).unwrap();
        (fields.year(), fields.month_of_year(), fields.day_of_month())
    }

    #[test]
    fn get_fields() {
        let c = gregorian();
        let instant = at(&c, 2008, 3, 15, 14, 45);
        assert_eq!(c.get(DateTimeFieldType::Year, instant), Ok(2008));
        assert_eq!(c.get(DateTimeFieldType::DayOfYear, instant), Ok(75));
        assert_eq!(c.get(DateTimeFieldType::HalfdayOfDay, instant), Ok(1));
        assert_eq!(c.get(DateTimeFieldType::MinuteOfHour, instant), Ok(45));
        assert!(matches!(
            c.get(DateTimeFieldType::Year, i64::MAX),
            Err(Error::Range { .. })
        ));
    }

    #[test]
    fn ranges_depend_on_instant() {
        let c = gregorian();
        let day = c.field(DateTimeFieldType::DayOfMonth);
        assert_eq!(day.maximum_value(at(&c, 2008, 2, 3, 0, 0)), Ok(29));
        assert_eq!(day.maximum_value(at(&c, 2009, 2, 3, 0, 0)), Ok(28));
        assert_eq!(day.minimum_value(at(&c, 2009, 2, 3, 0, 0)), Ok(1));
        let week = c.field(DateTimeFieldType::WeekOfWeekyear);
        assert_eq!(week.maximum_value(at(&c, 2009, 6, 1, 0, 0)), Ok(53));
        let month = epagomenal().field(DateTimeFieldType::MonthOfYear);
        assert_eq!(month.maximum_value(0), Ok(13));
        let year_of_era = c.field(DateTimeFieldType::YearOfEra);
        assert_eq!(year_of_era.maximum_value(0), Ok(c.max_year() as i64));
    }

    #[test]
    fn strict_set_rejects_out_of_range() {
        let c = days360();
        let instant = at(&c, 2008, 1, 15, 0, 0);
        assert!(matches!(
            c.set(DateTimeFieldType::DayOfMonth, instant, 31),
            Err(Error::InvalidField {
                field: DateTimeFieldType::DayOfMonth,
                value: 31,
                min: 1,
                max: 30,
            })
        ));
        assert!(matches!(
            c.set(DateTimeFieldType::MonthOfYear, instant, 0),
            Err(Error::InvalidField { .. })
        ));
        let clamped = c.field(DateTimeFieldType::DayOfMonth).set_clamped(instant, 31).unwrap();
        assert_eq!(ymd(&c, clamped), (2008, 1, 30));
    }

    #[test]
    fn set_keeps_larger_fields() {
        let c = gregorian();
        let instant = at(&c, 2008, 3, 31, 10, 30);
        let set = |field, value| c.set(field, instant, value).unwrap();
        assert_eq!(ymd(&c, set(DateTimeFieldType::DayOfMonth, 1)), (2008, 3, 1));
        assert_eq!(ymd(&c, set(DateTimeFieldType::DayOfYear, 1)), (2008, 1, 1));
        assert_eq!(ymd(&c, set(DateTimeFieldType::MonthOfYear, 2)), (2008, 2, 29));
        assert_eq!(ymd(&c, set(DateTimeFieldType::Year, 2009)), (2009, 3, 31));
        // 2008-03-31 is a Monday.
        assert_eq!(ymd(&c, set(DateTimeFieldType::DayOfWeek, 7)), (2008, 4, 6));
        let hour = set(DateTimeFieldType::HourOfDay, 23);
        assert_eq!(hour - instant, 13 * MILLIS_PER_HOUR);
        let noon = set(DateTimeFieldType::HalfdayOfDay, 1);
        assert_eq!(c.get(DateTimeFieldType::HourOfDay, noon), Ok(22));
    }

    #[test]
    fn set_era_fields() {
        let c = gregorian();
        let instant = at(&c, 2008, 2, 29, 0, 0);
        let bce = c.set(DateTimeFieldType::Era, instant, BCE).unwrap();
        // 2008 BCE is year -2007, not a leap year.
        assert_eq!(ymd(&c, bce), (-2007, 2, 28));
        assert_eq!(c.get(DateTimeFieldType::YearOfEra, bce), Ok(2008));
        let century = c.set(DateTimeFieldType::CenturyOfEra, instant, 19).unwrap();
        assert_eq!(ymd(&c, century), (1908, 2, 29));
        let year_of_century = c.set(DateTimeFieldType::YearOfCentury, instant, 99).unwrap();
        assert_eq!(ymd(&c, year_of_century), (2099, 2, 28));
        let century_start = at(&c, 100, 1, 1, 0, 0);
        assert!(matches!(
            c.set(DateTimeFieldType::CenturyOfEra, century_start, 0),
            Err(Error::InvalidField {
                field: DateTimeFieldType::YearOfEra,
                value: 0,
                ..
            })
        ));
    }

    #[test]
    fn set_weekyear_clamps_week() {
        let c = gregorian();
        let week53 = at(&c, 2010, 1, 3, 0, 0);
        let moved = c.set(DateTimeFieldType::Weekyear, week53, 2010).unwrap();
        assert_eq!(ymd(&c, moved), (2011, 1, 2));
        let week1 = c.set(DateTimeFieldType::WeekOfWeekyear, week53, 1).unwrap();
        assert_eq!(ymd(&c, week1), (2009, 1, 4));
    }

    #[test]
    fn leap_fields() {
        let c = gregorian();
        let leap_day = at(&c, 2008, 2, 29, 0, 0);
        let feb28 = at(&c, 2008, 2, 28, 0, 0);
        let dec31 = at(&c, 2008, 12, 31, 0, 0);
        let leap = |field, instant| c.field(field).is_leap(instant).unwrap();
        assert!(leap(DateTimeFieldType::Year, feb28));
        assert!(leap(DateTimeFieldType::CenturyOfEra, feb28));
        assert!(leap(DateTimeFieldType::MonthOfYear, feb28));
        assert!(!leap(DateTimeFieldType::MonthOfYear, dec31));
        assert!(leap(DateTimeFieldType::DayOfMonth, leap_day));
        assert!(!leap(DateTimeFieldType::DayOfMonth, feb28));
        assert!(leap(DateTimeFieldType::DayOfYear, dec31));
        assert!(!leap(DateTimeFieldType::DayOfYear, leap_day));
        assert!(!leap(DateTimeFieldType::HourOfDay, leap_day));
        assert!(!leap(DateTimeFieldType::Year, at(&c, 2009, 2, 28, 0, 0)));
        assert!(leap(DateTimeFieldType::Weekyear, at(&c, 2009, 6, 1, 0, 0)));
        assert!(!leap(DateTimeFieldType::Weekyear, at(&c, 2010, 6, 1, 0, 0)));
        assert_eq!(c.field(DateTimeFieldType::DayOfMonth).leap_amount(leap_day), Ok(1));
        assert_eq!(c.field(DateTimeFieldType::DayOfMonth).leap_amount(feb28), Ok(0));
    }

    #[test]
    fn leap_fields_in_other_calendars() {
        let c = days360();
        let instant = at(&c, 2008, 12, 30, 0, 0);
        for field in [
            DateTimeFieldType::Year,
            DateTimeFieldType::MonthOfYear,
            DateTimeFieldType::DayOfMonth,
            DateTimeFieldType::DayOfYear,
        ] {
            assert_eq!(c.field(field).is_leap(instant), Ok(false), "{field:?}");
        }
        let c = epagomenal();
        let sixth = at(&c, 3, 13, 6, 0, 0);
        assert_eq!(c.field(DateTimeFieldType::DayOfMonth).is_leap(sixth), Ok(true));
        assert_eq!(c.field(DateTimeFieldType::DayOfYear).is_leap(sixth), Ok(true));
        assert_eq!(c.field(DateTimeFieldType::MonthOfYear).is_leap(sixth), Ok(true));
        let fifth = at(&c, 3, 13, 5, 0, 0);
        assert_eq!(c.field(DateTimeFieldType::DayOfMonth).is_leap(fifth), Ok(false));
    }

    #[test]
    fn rounding() {
        let c = gregorian();
        let instant = at(&c, 2008, 3, 12, 14, 45) + 1_234;
        let month = c.field(DateTimeFieldType::MonthOfYear);
        assert_eq!(month.round_floor(instant), Ok(at(&c, 2008, 3, 1, 0, 0)));
        assert_eq!(month.round_ceiling(instant), Ok(at(&c, 2008, 4, 1, 0, 0)));
        assert_eq!(
            month.remainder(instant),
            Ok(instant - at(&c, 2008, 3, 1, 0, 0))
        );
        let hour = c.field(DateTimeFieldType::HourOfDay);
        assert_eq!(hour.round_floor(instant), Ok(at(&c, 2008, 3, 12, 14, 0)));
        assert_eq!(hour.round_ceiling(instant), Ok(at(&c, 2008, 3, 12, 15, 0)));
        // 2008-03-12 is a Wednesday.
        let week = c.field(DateTimeFieldType::WeekOfWeekyear);
        assert_eq!(week.round_floor(instant), Ok(at(&c, 2008, 3, 10, 0, 0)));
        let year = c.field(DateTimeFieldType::Year);
        assert_eq!(year.round_ceiling(instant), Ok(at(&c, 2009, 1, 1, 0, 0)));
        let weekyear = c.field(DateTimeFieldType::Weekyear);
        assert_eq!(weekyear.round_floor(instant), Ok(at(&c, 2007, 12, 31, 0, 0)));
        assert_eq!(weekyear.round_ceiling(instant), Ok(at(&c, 2008, 12, 29, 0, 0)));
        // Boundaries round to themselves.
        let boundary = at(&c, 2008, 3, 1, 0, 0);
        assert_eq!(month.round_ceiling(boundary), Ok(boundary));
        assert_eq!(month.remainder(boundary), Ok(0));
    }

    #[test]
    fn rounding_negative_instants() {
        let c = days360();
        let day = c.field(DateTimeFieldType::DayOfMonth);
        assert_eq!(day.round_floor(-1), Ok(-DAY));
        assert_eq!(day.round_ceiling(-1), Ok(0));
        assert_eq!(day.remainder(-1), Ok(DAY - 1));
        let year = c.field(DateTimeFieldType::Year);
        assert_eq!(year.round_floor(-1), Ok(-360 * DAY));
    }

    #[test]
    fn rounding_eras_and_centuries() {
        let c = gregorian();
        let era = c.field(DateTimeFieldType::Era);
        let bce = at(&c, -50, 6, 1, 0, 0);
        assert_eq!(era.round_ceiling(bce), Ok(0));
        assert_eq!(era.round_floor(at(&c, 50, 6, 1, 0, 0)), Ok(0));
        assert!(matches!(era.round_ceiling(DAY), Err(Error::Range { .. })));

        let century = c.field(DateTimeFieldType::CenturyOfEra);
        let instant = at(&c, 1999, 6, 1, 0, 0);
        assert_eq!(century.round_floor(instant), Ok(at(&c, 1900, 1, 1, 0, 0)));
        assert_eq!(century.round_ceiling(instant), Ok(at(&c, 2000, 1, 1, 0, 0)));
        assert_eq!(century.round_floor(at(&c, 50, 1, 2, 0, 0)), Ok(0));
        // 151 BCE lies in the block 199 BCE..=100 BCE, years -198..=-99.
        let instant = at(&c, -150, 1, 2, 0, 0);
        assert_eq!(century.round_floor(instant), Ok(at(&c, -198, 1, 1, 0, 0)));
        assert_eq!(century.round_ceiling(instant), Ok(at(&c, -98, 1, 1, 0, 0)));
        assert_eq!(century.round_ceiling(at(&c, -20, 1, 2, 0, 0)), Ok(0));
    }

    #[test]
    fn field_units() {
        let c = gregorian();
        let field = c.field(DateTimeFieldType::DayOfMonth);
        assert_eq!(field.field_type(), DateTimeFieldType::DayOfMonth);
        assert_eq!(field.duration_field().unit_millis(), Ok(DAY));
        assert!(!field.range_duration_field().unwrap().is_precise());
        assert!(c.field(DateTimeFieldType::Year).range_duration_field().is_none());
    }
}
