use std::cmp::{max, min};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use num_integer::Integer;

use crate::calendar::{CalendarDefinition, CalendarKind};
use crate::error::{Error, Result};
use crate::field_type::{DateTimeFieldType, DAYS_PER_WEEK, MILLIS_PER_DAY};
use crate::fields::FieldSet;
use crate::registry;
use crate::zone::{default_zone, TimeZone, Utc};

/// ISO-8601 rule: week 1 is the first week with at least four days in the new year.
pub const DEFAULT_MIN_DAYS_IN_FIRST_WEEK: u8 = 4;

/// The field calculus engine for one calendar system, time zone and first-week rule.
///
/// A `Chronology` is immutable and cheap to clone; clones share the same underlying
/// instance. Instances obtained through the registry ([`Chronology::utc`],
/// [`Chronology::builder`], ...) are shared per configuration, so equal configurations
/// give `ptr_eq` instances.
#[derive(Debug, Clone)]
pub struct Chronology {
    pimpl: Arc<SharedChronology>,
}

#[derive(Debug)]
pub(crate) struct SharedChronology {
    calendar: &'static dyn CalendarDefinition,
    zone: Arc<dyn TimeZone>,
    min_days_in_first_week: u8,
}

impl Chronology {
    pub(crate) fn new(
        kind: CalendarKind,
        zone: Arc<dyn TimeZone>,
        min_days_in_first_week: u8,
    ) -> Self {
        Chronology {
            pimpl: Arc::new(SharedChronology {
                calendar: kind.definition(),
                zone,
                min_days_in_first_week,
            }),
        }
    }

    pub fn builder() -> ChronologyBuilder {
        ChronologyBuilder::new()
    }

    /// The shared UTC instance for `kind`, using the ISO first-week rule.
    pub fn utc(kind: CalendarKind) -> Self {
        registry::global().get_or_create(kind, Arc::new(Utc), DEFAULT_MIN_DAYS_IN_FIRST_WEEK)
    }

    /// The shared instance for `kind` in `zone`, using the ISO first-week rule.
    pub fn get_instance(kind: CalendarKind, zone: Arc<dyn TimeZone>) -> Self {
        registry::global().get_or_create(kind, zone, DEFAULT_MIN_DAYS_IN_FIRST_WEEK)
    }

    /// The shared instance for `kind` in the configured default zone.
    pub fn default_instance(kind: CalendarKind) -> Self {
        Self::get_instance(kind, default_zone())
    }

    pub fn with_zone(&self, zone: Arc<dyn TimeZone>) -> Self {
        if zone.id() == self.zone().id() {
            return self.clone();
        }
        registry::global().get_or_create(self.kind(), zone, self.min_days_in_first_week())
    }

    pub fn with_utc(&self) -> Self {
        self.with_zone(Arc::new(Utc))
    }

    pub fn kind(&self) -> CalendarKind {
        self.pimpl.calendar.kind()
    }

    pub fn calendar(&self) -> &'static dyn CalendarDefinition {
        self.pimpl.calendar
    }

    pub fn zone(&self) -> &Arc<dyn TimeZone> {
        &self.pimpl.zone
    }

    pub fn min_days_in_first_week(&self) -> u8 {
        self.pimpl.min_days_in_first_week
    }

    /// Whether both handles refer to the same shared instance.
    pub fn ptr_eq(&self, other: &Chronology) -> bool {
        Arc::ptr_eq(&self.pimpl, &other.pimpl)
    }
}

impl PartialEq for Chronology {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.kind() == other.kind()
                && self.zone().id() == other.zone().id()
                && self.min_days_in_first_week() == other.min_days_in_first_week())
    }
}

impl Eq for Chronology {}

impl Hash for Chronology {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.zone().id().hash(state);
        self.min_days_in_first_week().hash(state);
    }
}

impl fmt::Display for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Chronology[{}", self.kind().name(), self.zone().id())?;
        if self.min_days_in_first_week() != DEFAULT_MIN_DAYS_IN_FIRST_WEEK {
            write!(f, ",mdfw={}", self.min_days_in_first_week())?;
        }
        write!(f, "]")
    }
}

/// Calendar facts, forwarded from the calendar definition with range checks.
impl Chronology {
    pub fn is_leap_year(&self, year: i32) -> bool {
        self.calendar().is_leap_year(year)
    }

    pub fn month_count(&self, year: i32) -> u32 {
        self.calendar().month_count(year)
    }

    pub fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        self.check_year(year as i64)?;
        self.check_month(year, month as i64)?;
        Ok(self.calendar().days_in_month(year, month))
    }

    pub fn days_in_year(&self, year: i32) -> Result<u32> {
        self.check_year(year as i64)?;
        Ok(self.calendar().days_in_year(year))
    }

    pub fn year_start_millis(&self, year: i32) -> Result<i64> {
        self.check_year(year as i64)?;
        Ok(self.calendar().year_start_millis(year))
    }

    pub fn min_year(&self) -> i32 {
        self.calendar().min_year()
    }

    pub fn max_year(&self) -> i32 {
        self.calendar().max_year()
    }

    /// First representable local instant.
    pub fn min_local_instant(&self) -> i64 {
        self.calendar().year_start_millis(self.min_year())
    }

    /// Last representable local instant.
    pub fn max_local_instant(&self) -> i64 {
        self.calendar().year_start_millis(self.max_year() + 1) - 1
    }

    pub fn weeks_in_weekyear(&self, weekyear: i32) -> Result<u32> {
        self.check_year(weekyear as i64)?;
        Ok(self.weeks_in_weekyear_unchecked(weekyear))
    }
}

/// Instant to fields and back.
impl Chronology {
    /// Splits `instant` (UTC milliseconds since the epoch) into calendar fields in this
    /// chronology's zone.
    pub fn decompose(&self, instant: i64) -> Result<FieldSet> {
        let local = self.zone().to_local(instant)?;
        self.decompose_local(local)
    }

    /// Inverse of [`decompose`](Self::decompose). Reads the year, month, day-of-month and
    /// millis-of-day of `fields`; the other fields are derived from those and ignored.
    /// Values out of range for this calendar are rejected.
    pub fn compose(&self, fields: &FieldSet) -> Result<i64> {
        let local = self.local_from_date(
            fields.year() as i64,
            fields.month_of_year() as i64,
            fields.day_of_month() as i64,
            fields.millis_of_day() as i64,
        )?;
        self.zone().to_utc(local)
    }

    /// UTC instant of the given date and time of day.
    #[allow(clippy::too_many_arguments)]
    pub fn date_time_millis(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Result<i64> {
        let millis_of_day = crate::fields::millis_of_day_from_parts(
            hour as i64,
            minute as i64,
            second as i64,
            millisecond as i64,
        )?;
        let local = self.local_from_date(year as i64, month as i64, day as i64, millis_of_day)?;
        self.zone().to_utc(local)
    }

    /// The year containing `instant`.
    pub fn year(&self, instant: i64) -> Result<i32> {
        let local = self.zone().to_local(instant)?;
        self.check_local(local)?;
        Ok(self.year_of(local))
    }

    pub(crate) fn decompose_local(&self, local: i64) -> Result<FieldSet> {
        self.check_local(local)?;
        let calendar = self.calendar();
        let (day, millis_of_day) = local.div_mod_floor(&MILLIS_PER_DAY);
        let year = self.year_of(local);
        let day_of_year = (day - calendar.year_start_days(year)) as u32;
        let month = calendar.month_of_day_of_year(year, day_of_year);
        let day_of_month = day_of_year - calendar.days_before_month(year, month) + 1;
        let (weekyear, week_of_weekyear) = self.week_date_of_day(day, year);
        Ok(FieldSet::new(
            year,
            month,
            day_of_month,
            day_of_year + 1,
            day_of_week_of_day(day),
            weekyear,
            week_of_weekyear,
            millis_of_day as u32,
        ))
    }

    /// Local instant of a year/month/day plus a time of day, validating every value.
    pub(crate) fn local_from_date(
        &self,
        year: i64,
        month: i64,
        day: i64,
        millis_of_day: i64,
    ) -> Result<i64> {
        let year = self.check_year(year)?;
        self.check_month(year, month)?;
        let month = month as u32;
        let days_in_month = self.calendar().days_in_month(year, month) as i64;
        if !(1..=days_in_month).contains(&day) {
            return Err(Error::invalid_field(
                DateTimeFieldType::DayOfMonth,
                day,
                1,
                days_in_month,
            ));
        }
        check_millis_of_day(millis_of_day)?;
        let days = self.calendar().year_start_days(year)
            + self.calendar().days_before_month(year, month) as i64
            + day
            - 1;
        Ok(days * MILLIS_PER_DAY + millis_of_day)
    }

    /// Local instant of a year and 1-based day of the year.
    pub(crate) fn local_from_ordinal(
        &self,
        year: i64,
        day_of_year: i64,
        millis_of_day: i64,
    ) -> Result<i64> {
        let year = self.check_year(year)?;
        let days_in_year = self.calendar().days_in_year(year) as i64;
        if !(1..=days_in_year).contains(&day_of_year) {
            return Err(Error::invalid_field(
                DateTimeFieldType::DayOfYear,
                day_of_year,
                1,
                days_in_year,
            ));
        }
        check_millis_of_day(millis_of_day)?;
        let days = self.calendar().year_start_days(year) + day_of_year - 1;
        Ok(days * MILLIS_PER_DAY + millis_of_day)
    }

    /// Local instant of a week date. Week dates at the very ends of the supported range may
    /// fall outside it, in which case a range error is returned.
    pub(crate) fn local_from_week_date(
        &self,
        weekyear: i64,
        week: i64,
        day_of_week: i64,
        millis_of_day: i64,
    ) -> Result<i64> {
        let weekyear = self.check_year(weekyear)?;
        let weeks = self.weeks_in_weekyear_unchecked(weekyear) as i64;
        if !(1..=weeks).contains(&week) {
            return Err(Error::invalid_field(
                DateTimeFieldType::WeekOfWeekyear,
                week,
                1,
                weeks,
            ));
        }
        if !(1..=DAYS_PER_WEEK).contains(&day_of_week) {
            return Err(Error::invalid_field(
                DateTimeFieldType::DayOfWeek,
                day_of_week,
                1,
                DAYS_PER_WEEK,
            ));
        }
        check_millis_of_day(millis_of_day)?;
        let day =
            self.first_week_start_day(weekyear) + (week - 1) * DAYS_PER_WEEK + day_of_week - 1;
        let local = day
            .checked_mul(MILLIS_PER_DAY)
            .and_then(|millis| millis.checked_add(millis_of_day))
            .ok_or(Error::Overflow)?;
        self.check_local(local)?;
        Ok(local)
    }

    pub(crate) fn check_local(&self, local: i64) -> Result<()> {
        let min = self.min_local_instant();
        let max = self.max_local_instant();
        if (min..=max).contains(&local) {
            Ok(())
        } else {
            Err(Error::range(local, min, max))
        }
    }

    pub(crate) fn check_year(&self, year: i64) -> Result<i32> {
        let min = self.min_year() as i64;
        let max = self.max_year() as i64;
        if (min..=max).contains(&year) {
            Ok(year as i32)
        } else {
            Err(Error::range(year, min, max))
        }
    }

    fn check_month(&self, year: i32, month: i64) -> Result<()> {
        let count = self.month_count(year) as i64;
        if (1..=count).contains(&month) {
            Ok(())
        } else {
            Err(Error::invalid_field(
                DateTimeFieldType::MonthOfYear,
                month,
                1,
                count,
            ))
        }
    }
}

/// Year search.
impl Chronology {
    /// Year of an in-range local instant.
    pub(crate) fn year_of(&self, local: i64) -> i32 {
        let day = local.div_floor(&MILLIS_PER_DAY);
        self.year_containing_day(self.estimate_year(local), day)
    }

    /// Guess at the year of `local` from the average year length. Both operands are halved
    /// so the sum cannot overflow for any instant.
    fn estimate_year(&self, local: i64) -> i32 {
        let calendar = self.calendar();
        let half_year = calendar.average_millis_per_year() / 2;
        let shifted = (local >> 1) + calendar.approx_millis_at_epoch_divided_by_two();
        let estimate = shifted.div_floor(&half_year);
        estimate.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Finds the year whose start is the last one at or before `day`, starting from an
    /// estimate that is usually right or off by one.
    fn year_containing_day(&self, estimate: i32, day: i64) -> i32 {
        let calendar = self.calendar();
        let floor = calendar.min_year() as i64 - 1;
        let ceiling = calendar.max_year() as i64 + 1;
        let start = |year: i64| calendar.year_start_days(year as i32);

        // Widen a bracket around the estimate until start(low) <= day < start(high + 1).
        let estimate = (estimate as i64).clamp(floor, ceiling);
        let mut low = estimate;
        let mut step = 1;
        while low > floor && start(low) > day {
            low = max(low - step, floor);
            step *= 2;
        }
        let mut high = estimate;
        step = 1;
        while high < ceiling && start(high + 1) <= day {
            high = min(high + step, ceiling);
            step *= 2;
        }

        // Largest year in [low, high] starting at or before the day.
        while low < high {
            let mid = low + (high - low + 1) / 2;
            if start(mid) <= day {
                low = mid;
            } else {
                high = mid - 1;
            }
        }
        low as i32
    }
}

/// Week-based fields. Everything here works in whole days so it never overflows, even one
/// year beyond either end of the range.
impl Chronology {
    /// Day number on which week 1 of `weekyear` starts.
    pub(crate) fn first_week_start_day(&self, weekyear: i32) -> i64 {
        let first_day = self.calendar().year_start_days(weekyear);
        let day_of_week = day_of_week_of_day(first_day) as i64;
        let min_days = self.min_days_in_first_week() as i64;
        if day_of_week > 8 - min_days {
            // The first partial week is too short; week 1 starts on the following Monday.
            first_day + 8 - day_of_week
        } else {
            // Week 1 includes the first day, and starts on the Monday on or before it.
            first_day - (day_of_week - 1)
        }
    }

    pub(crate) fn weeks_in_weekyear_unchecked(&self, weekyear: i32) -> u32 {
        let start = self.first_week_start_day(weekyear);
        let end = self.first_week_start_day(weekyear + 1);
        ((end - start) / DAYS_PER_WEEK) as u32
    }

    /// Week-year and week number of `day`, which lies in calendar year `year`.
    pub(crate) fn week_date_of_day(&self, day: i64, year: i32) -> (i32, u32) {
        let weekyear = if day < self.first_week_start_day(year) {
            year - 1
        } else if day >= self.first_week_start_day(year + 1) {
            year + 1
        } else {
            year
        };
        let week = (day - self.first_week_start_day(weekyear)) / DAYS_PER_WEEK + 1;
        (weekyear, week as u32)
    }
}

/// ISO day of week (Monday = 1, Sunday = 7) of a day number. Day 0, 0001-01-01 in the
/// proleptic Gregorian calendar, was a Monday; the same anchor is used for every calendar.
pub(crate) fn day_of_week_of_day(day: i64) -> u32 {
    day.mod_floor(&DAYS_PER_WEEK) as u32 + 1
}

fn check_millis_of_day(millis_of_day: i64) -> Result<()> {
    if (0..MILLIS_PER_DAY).contains(&millis_of_day) {
        Ok(())
    } else {
        Err(Error::invalid_field(
            DateTimeFieldType::MillisOfDay,
            millis_of_day,
            0,
            MILLIS_PER_DAY - 1,
        ))
    }
}

/// Builder for a registry-shared [`Chronology`]. Unset values default to the Gregorian
/// calendar, the configured default zone and the ISO first-week rule.
#[derive(Debug, Default)]
pub struct ChronologyBuilder {
    kind: Option<CalendarKind>,
    zone: Option<Arc<dyn TimeZone>>,
    min_days_in_first_week: Option<u8>,
}

impl ChronologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&mut self, kind: CalendarKind) -> &mut Self {
        self.kind = Some(kind);
        self
    }

    pub fn zone(&mut self, zone: Arc<dyn TimeZone>) -> &mut Self {
        self.zone = Some(zone);
        self
    }

    pub fn min_days_in_first_week(&mut self, min_days: u8) -> &mut Self {
        self.min_days_in_first_week = Some(min_days);
        self
    }

    pub fn build(&self) -> Result<Chronology> {
        let kind = self.kind.unwrap_or(CalendarKind::Gregorian);
        let zone = match self.zone {
            Some(ref zone) => zone.clone(),
            None => default_zone(),
        };
        let min_days = self
            .min_days_in_first_week
            .unwrap_or(DEFAULT_MIN_DAYS_IN_FIRST_WEEK);
        registry::global().get(kind, zone, min_days)
    }
}
