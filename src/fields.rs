use crate::calendar::CalendarKind;
use crate::chronology::Chronology;
use crate::error::{Error, Result};
use crate::field_type::{
    DateTimeFieldType, MILLIS_PER_HALFDAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND,
};

/// Era value for years before year 1.
pub const BCE: i64 = 0;
/// Era value for year 1 and later.
pub const CE: i64 = 1;

/// The calendar fields of one instant, as computed by [`Chronology::decompose`].
///
/// The primary fields are the year, month, day of month and time of day. Everything else
/// is derived from those, either stored (day of year, day of week, week date) or computed
/// on access (era, year of era, hour, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSet {
    year: i32,
    month_of_year: u32,
    day_of_month: u32,
    day_of_year: u32,
    day_of_week: u32,
    weekyear: i32,
    week_of_weekyear: u32,
    millis_of_day: u32,
}

impl FieldSet {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        year: i32,
        month_of_year: u32,
        day_of_month: u32,
        day_of_year: u32,
        day_of_week: u32,
        weekyear: i32,
        week_of_weekyear: u32,
        millis_of_day: u32,
    ) -> Self {
        FieldSet {
            year,
            month_of_year,
            day_of_month,
            day_of_year,
            day_of_week,
            weekyear,
            week_of_weekyear,
            millis_of_day,
        }
    }

    pub fn builder() -> FieldSetBuilder {
        FieldSetBuilder::new()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month_of_year(&self) -> u32 {
        self.month_of_year
    }

    pub fn day_of_month(&self) -> u32 {
        self.day_of_month
    }

    /// 1-based.
    pub fn day_of_year(&self) -> u32 {
        self.day_of_year
    }

    /// Monday = 1 to Sunday = 7.
    pub fn day_of_week(&self) -> u32 {
        self.day_of_week
    }

    pub fn weekyear(&self) -> i32 {
        self.weekyear
    }

    pub fn week_of_weekyear(&self) -> u32 {
        self.week_of_weekyear
    }

    pub fn millis_of_day(&self) -> u32 {
        self.millis_of_day
    }

    /// [`CE`] from year 1 on, [`BCE`] before.
    pub fn era(&self) -> i64 {
        if self.year >= 1 {
            CE
        } else {
            BCE
        }
    }

    /// Year counted from 1 within the era. Year 0 is 1 BCE, year -1 is 2 BCE.
    pub fn year_of_era(&self) -> i64 {
        let year = self.year as i64;
        if year >= 1 {
            year
        } else {
            1 - year
        }
    }

    pub fn century_of_era(&self) -> i64 {
        self.year_of_era() / 100
    }

    pub fn year_of_century(&self) -> i64 {
        self.year_of_era() % 100
    }

    pub fn halfday_of_day(&self) -> u32 {
        self.millis_of_day / MILLIS_PER_HALFDAY as u32
    }

    pub fn hour_of_day(&self) -> u32 {
        self.millis_of_day / MILLIS_PER_HOUR as u32
    }

    pub fn minute_of_hour(&self) -> u32 {
        self.millis_of_day / MILLIS_PER_MINUTE as u32 % 60
    }

    pub fn second_of_minute(&self) -> u32 {
        self.millis_of_day / MILLIS_PER_SECOND as u32 % 60
    }

    pub fn millis_of_second(&self) -> u32 {
        self.millis_of_day % MILLIS_PER_SECOND as u32
    }

    pub fn get(&self, field: DateTimeFieldType) -> i64 {
        match field {
            DateTimeFieldType::Era => self.era(),
            DateTimeFieldType::CenturyOfEra => self.century_of_era(),
            DateTimeFieldType::YearOfCentury => self.year_of_century(),
            DateTimeFieldType::YearOfEra => self.year_of_era(),
            DateTimeFieldType::Year => self.year as i64,
            DateTimeFieldType::Weekyear => self.weekyear as i64,
            DateTimeFieldType::WeekOfWeekyear => self.week_of_weekyear as i64,
            DateTimeFieldType::MonthOfYear => self.month_of_year as i64,
            DateTimeFieldType::DayOfYear => self.day_of_year as i64,
            DateTimeFieldType::DayOfMonth => self.day_of_month as i64,
            DateTimeFieldType::DayOfWeek => self.day_of_week as i64,
            DateTimeFieldType::HalfdayOfDay => self.halfday_of_day() as i64,
            DateTimeFieldType::HourOfDay => self.hour_of_day() as i64,
            DateTimeFieldType::MinuteOfHour => self.minute_of_hour() as i64,
            DateTimeFieldType::SecondOfMinute => self.second_of_minute() as i64,
            DateTimeFieldType::MillisOfSecond => self.millis_of_second() as i64,
            DateTimeFieldType::MillisOfDay => self.millis_of_day as i64,
        }
    }
}

/// Assembles a [`FieldSet`] from whichever fields are known.
///
/// The date can be given as a year with a month and day, as a year with a day of the year,
/// or as a week date (week-year, week and day of week). The year can be given directly or
/// as an era and year of era. Unset fields default to the start of their range, so an
/// empty builder gives 0001-01-01T00:00 of the chosen chronology.
///
/// When more than one form is given, the first one set in this order wins and the others
/// are ignored:
///
/// 1. `weekyear` (with `week_of_weekyear` and `day_of_week`); `year`, `month`, `day` and
///    `day_of_year` are ignored.
/// 2. `day_of_year`; `month` and `day` are ignored.
/// 3. `month` and `day`.
///
/// Likewise `year` takes precedence over `era` and `year_of_era`.
#[derive(Debug, Default)]
pub struct FieldSetBuilder {
    chronology: Option<Chronology>,
    era: Option<i64>,
    year_of_era: Option<i64>,
    year: Option<i64>,
    month: Option<i64>,
    day: Option<i64>,
    day_of_year: Option<i64>,
    weekyear: Option<i64>,
    week_of_weekyear: Option<i64>,
    day_of_week: Option<i64>,
    hour: Option<i64>,
    minute: Option<i64>,
    second: Option<i64>,
    millisecond: Option<i64>,
}

impl FieldSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chronology(&mut self, chronology: &Chronology) -> &mut Self {
        self.chronology = Some(chronology.clone());
        self
    }

    pub fn era(&mut self, era: i64) -> &mut Self {
        self.era = Some(era);
        self
    }

    pub fn year_of_era(&mut self, year_of_era: i64) -> &mut Self {
        self.year_of_era = Some(year_of_era);
        self
    }

    pub fn year(&mut self, year: i64) -> &mut Self {
        self.year = Some(year);
        self
    }

    pub fn month(&mut self, month: i64) -> &mut Self {
        self.month = Some(month);
        self
    }

    pub fn day(&mut self, day: i64) -> &mut Self {
        self.day = Some(day);
        self
    }

    pub fn day_of_year(&mut self, day_of_year: i64) -> &mut Self {
        self.day_of_year = Some(day_of_year);
        self
    }

    pub fn weekyear(&mut self, weekyear: i64) -> &mut Self {
        self.weekyear = Some(weekyear);
        self
    }

    pub fn week_of_weekyear(&mut self, week: i64) -> &mut Self {
        self.week_of_weekyear = Some(week);
        self
    }

    pub fn day_of_week(&mut self, day_of_week: i64) -> &mut Self {
        self.day_of_week = Some(day_of_week);
        self
    }

    pub fn hour(&mut self, hour: i64) -> &mut Self {
        self.hour = Some(hour);
        self
    }

    pub fn minute(&mut self, minute: i64) -> &mut Self {
        self.minute = Some(minute);
        self
    }

    pub fn second(&mut self, second: i64) -> &mut Self {
        self.second = Some(second);
        self
    }

    pub fn millisecond(&mut self, millisecond: i64) -> &mut Self {
        self.millisecond = Some(millisecond);
        self
    }

    /// Validates the fields against the chronology and returns the full field set,
    /// derived fields included.
    pub fn build(&self) -> Result<FieldSet> {
        let chronology = self.resolve_chronology();
        let local = self.local_instant(&chronology)?;
        chronology.decompose_local(local)
    }

    /// The UTC instant the fields describe.
    pub fn instant(&self) -> Result<i64> {
        let chronology = self.resolve_chronology();
        let local = self.local_instant(&chronology)?;
        chronology.zone().to_utc(local)
    }

    fn resolve_chronology(&self) -> Chronology {
        match self.chronology {
            Some(ref chronology) => chronology.clone(),
            None => Chronology::default_instance(CalendarKind::Gregorian),
        }
    }

    fn local_instant(&self, chronology: &Chronology) -> Result<i64> {
        let millis_of_day = millis_of_day_from_parts(
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.millisecond.unwrap_or(0),
        )?;
        if let Some(weekyear) = self.weekyear {
            return chronology.local_from_week_date(
                weekyear,
                self.week_of_weekyear.unwrap_or(1),
                self.day_of_week.unwrap_or(1),
                millis_of_day,
            );
        }
        let year = self.resolve_year()?;
        if let Some(day_of_year) = self.day_of_year {
            return chronology.local_from_ordinal(year, day_of_year, millis_of_day);
        }
        chronology.local_from_date(
            year,
            self.month.unwrap_or(1),
            self.day.unwrap_or(1),
            millis_of_day,
        )
    }

    fn resolve_year(&self) -> Result<i64> {
        if let Some(year) = self.year {
            return Ok(year);
        }
        let Some(year_of_era) = self.year_of_era else {
            return Ok(1);
        };
        if year_of_era < 1 {
            return Err(Error::invalid_field(
                DateTimeFieldType::YearOfEra,
                year_of_era,
                1,
                i32::MAX as i64,
            ));
        }
        match self.era.unwrap_or(CE) {
            CE => Ok(year_of_era),
            BCE => Ok(1 - year_of_era),
            era => Err(Error::invalid_field(DateTimeFieldType::Era, era, BCE, CE)),
        }
    }
}

/// Millisecond of the day for a time of day, checking each component.
pub(crate) fn millis_of_day_from_parts(
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
) -> Result<i64> {
    check_component(DateTimeFieldType::HourOfDay, hour, 23)?;
    check_component(DateTimeFieldType::MinuteOfHour, minute, 59)?;
    check_component(DateTimeFieldType::SecondOfMinute, second, 59)?;
    check_component(DateTimeFieldType::MillisOfSecond, millisecond, 999)?;
    Ok(hour * MILLIS_PER_HOUR
        + minute * MILLIS_PER_MINUTE
        + second * MILLIS_PER_SECOND
        + millisecond)
}

fn check_component(field: DateTimeFieldType, value: i64, max: i64) -> Result<()> {
    if (0..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_field(field, value, 0, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_type::MILLIS_PER_DAY;

    fn days360() -> Chronology {
        Chronology::utc(CalendarKind::Days360)
    }

    fn gregorian() -> Chronology {
        Chronology::utc(CalendarKind::Gregorian)
    }

    #[test]
    fn build_from_month_and_day() {
        let fields = FieldSet::builder()
            .chronology(&days360())
            .year(2008)
            .month(2)
            .day(30)
            .hour(12)
            .build()
            .unwrap();
        assert_eq!(fields.day_of_year(), 60);
        assert_eq!(fields.hour_of_day(), 12);
        assert_eq!(fields.halfday_of_day(), 1);
        assert_eq!(fields.get(DateTimeFieldType::MonthOfYear), 2);
    }

    #[test]
    fn empty_builder_is_the_epoch() {
        let instant = FieldSet::builder().chronology(&days360()).instant().unwrap();
        assert_eq!(instant, 0);
    }

    #[test]
    fn build_from_day_of_year() {
        let fields = FieldSet::builder()
            .chronology(&gregorian())
            .year(2000)
            .day_of_year(366)
            .build()
            .unwrap();
        assert_eq!(
            (fields.month_of_year(), fields.day_of_month()),
            (12, 31)
        );
    }

    #[test]
    fn build_from_week_date() {
        let fields = FieldSet::builder()
            .chronology(&gregorian())
            .weekyear(2009)
            .week_of_weekyear(53)
            .day_of_week(7)
            .build()
            .unwrap();
        assert_eq!(
            (fields.year(), fields.month_of_year(), fields.day_of_month()),
            (2010, 1, 3)
        );
        let result = FieldSet::builder()
            .chronology(&gregorian())
            .weekyear(2010)
            .week_of_weekyear(53)
            .build();
        assert!(matches!(
            result,
            Err(Error::InvalidField {
                field: DateTimeFieldType::WeekOfWeekyear,
                max: 52,
                ..
            })
        ));
    }

    #[test]
    fn era_fields() {
        let c = gregorian();
        let bce = FieldSet::builder()
            .chronology(&c)
            .era(BCE)
            .year_of_era(1)
            .build()
            .unwrap();
        assert_eq!(bce.year(), 0);
        assert_eq!(bce.era(), BCE);
        assert_eq!(bce.year_of_era(), 1);

        let fields = FieldSet::builder().chronology(&c).year(-1234).build().unwrap();
        assert_eq!(fields.year_of_era(), 1235);
        assert_eq!(fields.century_of_era(), 12);
        assert_eq!(fields.year_of_century(), 35);

        let fields = FieldSet::builder().chronology(&c).year(1999).build().unwrap();
        assert_eq!(fields.era(), CE);
        assert_eq!(fields.get(DateTimeFieldType::CenturyOfEra), 19);
        assert_eq!(fields.get(DateTimeFieldType::YearOfCentury), 99);

        assert!(FieldSet::builder().chronology(&c).era(2).year_of_era(5).build().is_err());
        assert!(FieldSet::builder().chronology(&c).year_of_era(0).build().is_err());
    }

    #[test]
    fn precedence_between_date_forms() {
        let c = gregorian();
        let week_date = FieldSet::builder()
            .chronology(&c)
            .year(1999)
            .month(7)
            .day(4)
            .day_of_year(200)
            .weekyear(2009)
            .week_of_weekyear(1)
            .build()
            .unwrap();
        assert_eq!(
            (week_date.year(), week_date.month_of_year(), week_date.day_of_month()),
            (2008, 12, 29)
        );
        let ordinal = FieldSet::builder()
            .chronology(&c)
            .year(2001)
            .month(7)
            .day(4)
            .day_of_year(32)
            .build()
            .unwrap();
        assert_eq!((ordinal.month_of_year(), ordinal.day_of_month()), (2, 1));
        let year = FieldSet::builder()
            .chronology(&c)
            .era(BCE)
            .year_of_era(10)
            .year(2001)
            .build()
            .unwrap();
        assert_eq!(year.year(), 2001);
    }

    #[test]
    fn time_of_day_components() {
        let fields = FieldSet::builder()
            .chronology(&days360())
            .hour(23)
            .minute(59)
            .second(58)
            .millisecond(997)
            .build()
            .unwrap();
        assert_eq!(fields.millis_of_day() as i64, MILLIS_PER_DAY - 1_003);
        assert_eq!(fields.minute_of_hour(), 59);
        assert_eq!(fields.second_of_minute(), 58);
        assert_eq!(fields.millis_of_second(), 997);
        assert!(matches!(
            FieldSet::builder().chronology(&days360()).hour(24).build(),
            Err(Error::InvalidField {
                field: DateTimeFieldType::HourOfDay,
                value: 24,
                ..
            })
        ));
    }

    #[test]
    fn invalid_dates_are_rejected() {
        let c = days360();
        assert!(matches!(
            FieldSet::builder().chronology(&c).year(2008).month(13).build(),
            Err(Error::InvalidField {
                field: DateTimeFieldType::MonthOfYear,
                ..
            })
        ));
        assert!(matches!(
            FieldSet::builder().chronology(&c).year(2008).month(2).day(31).build(),
            Err(Error::InvalidField {
                field: DateTimeFieldType::DayOfMonth,
                max: 30,
                ..
            })
        ));
        assert!(matches!(
            FieldSet::builder().chronology(&c).year(i64::MAX).build(),
            Err(Error::Range { .. })
        ));
    }
}
