use std::cmp::{max, min};

use num_integer::Integer;
use num_traits::ToPrimitive;

use crate::chronology::Chronology;
use crate::error::{Error, Result};
use crate::field_type::DurationFieldType;

/// Arithmetic in one unit of duration, bound to a chronology.
///
/// A precise field has a constant length in milliseconds and adds by multiplication.
/// An imprecise field (years, months, week-years, centuries, and day-based units in a
/// zone with changing offsets) adds by moving calendar fields and needs the starting
/// instant to know how long a unit is.
#[derive(Debug, Clone)]
pub struct DurationField {
    chronology: Chronology,
    unit: DurationFieldType,
}

impl DurationField {
    pub fn new(chronology: &Chronology, unit: DurationFieldType) -> Self {
        DurationField {
            chronology: chronology.clone(),
            unit,
        }
    }

    pub fn unit(&self) -> DurationFieldType {
        self.unit
    }

    pub fn is_supported(&self) -> bool {
        self.unit != DurationFieldType::Eras
    }

    pub fn is_precise(&self) -> bool {
        match self.unit.fixed_millis() {
            Some(_) if self.unit.is_day_based() => self.chronology.zone().is_fixed(),
            Some(_) => true,
            None => false,
        }
    }

    /// Exact length of a precise unit, or the average length of an imprecise one.
    pub fn unit_millis(&self) -> Result<i64> {
        if let Some(millis) = self.unit.fixed_millis() {
            return Ok(millis);
        }
        let calendar = self.chronology.calendar();
        match self.unit {
            DurationFieldType::Years | DurationFieldType::WeekYears => {
                Ok(calendar.average_millis_per_year())
            }
            DurationFieldType::Months => Ok(calendar.average_millis_per_month()),
            DurationFieldType::Centuries => Ok(calendar.average_millis_per_year() * 100),
            unit => Err(Error::UnsupportedField(unit)),
        }
    }

    pub fn add(&self, instant: i64, amount: i64) -> Result<i64> {
        self.check_supported()?;
        if self.is_precise() {
            let unit_millis = self.unit_millis()?;
            return amount
                .checked_mul(unit_millis)
                .and_then(|delta| instant.checked_add(delta))
                .ok_or(Error::Overflow);
        }
        if amount == 0 {
            return Ok(instant);
        }
        let zone = self.chronology.zone();
        let local = zone.to_local(instant)?;
        let local = match self.unit {
            DurationFieldType::Centuries => {
                let years = amount.checked_mul(100).ok_or(Error::Overflow)?;
                self.chronology.add_years_local(local, years)?
            }
            DurationFieldType::Years => self.chronology.add_years_local(local, amount)?,
            DurationFieldType::Months => self.chronology.add_months_local(local, amount)?,
            DurationFieldType::WeekYears => self.chronology.add_weekyears_local(local, amount)?,
            _ => {
                // Day-based unit in a variable zone: move whole local days, keeping the
                // local time of day.
                let unit_millis = self.unit_millis()?;
                let local = amount
                    .checked_mul(unit_millis)
                    .and_then(|delta| local.checked_add(delta))
                    .ok_or(Error::Overflow)?;
                self.chronology.check_local(local)?;
                local
            }
        };
        zone.to_utc(local)
    }

    pub fn subtract(&self, instant: i64, amount: i64) -> Result<i64> {
        let amount = amount.checked_neg().ok_or(Error::Overflow)?;
        self.add(instant, amount)
    }

    /// Whole units from `subtrahend` to `minuend`, rounded towards negative infinity for
    /// precise units. For imprecise units and `minuend >= subtrahend` it is the largest `d`
    /// with `add(subtrahend, d) <= minuend`; swapping the operands negates the result.
    pub fn difference(&self, minuend: i64, subtrahend: i64) -> Result<i64> {
        self.check_supported()?;
        let unit_millis = self.unit_millis()?;
        if self.is_precise() {
            let difference = (minuend as i128 - subtrahend as i128).div_floor(&(unit_millis as i128));
            return difference.to_i64().ok_or(Error::Overflow);
        }
        if minuend < subtrahend {
            let difference = self.difference(subtrahend, minuend)?;
            return difference.checked_neg().ok_or(Error::Overflow);
        }

        let zone = self.chronology.zone();
        self.chronology.check_local(zone.to_local(minuend)?)?;
        self.chronology.check_local(zone.to_local(subtrahend)?)?;

        // Units from an endpoint past the end of the range cannot fit; report those as
        // overshooting rather than failing.
        let fits = |amount: i64| -> Result<bool> {
            match self.add(subtrahend, amount) {
                Ok(instant) => Ok(instant <= minuend),
                Err(Error::Range { .. }) | Err(Error::Overflow) if amount > 0 => Ok(false),
                Err(e) => Err(e),
            }
        };

        let estimate = ((minuend as i128 - subtrahend as i128) / unit_millis as i128) as i64;
        largest_fitting(estimate, fits)
    }

    fn check_supported(&self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(Error::UnsupportedField(self.unit))
        }
    }
}

/// The largest `amount` for which `fits` holds, given that `fits(0)` holds and that `fits`
/// turns false once and stays false. Gallops away from `estimate` to bracket the answer,
/// then bisects, so a poor estimate costs a logarithmic number of calls.
fn largest_fitting<F>(estimate: i64, mut fits: F) -> Result<i64>
where
    F: FnMut(i64) -> Result<bool>,
{
    let estimate = max(estimate, 0);
    let mut step: i64 = 1;
    // low always fits, high never does.
    let (mut low, mut high) = if fits(estimate)? {
        let mut low = estimate;
        loop {
            let candidate = low.saturating_add(step);
            if candidate == low {
                return Ok(low);
            }
            if !fits(candidate)? {
                break (low, candidate);
            }
            low = candidate;
            step = step.saturating_mul(2);
        }
    } else {
        let mut high = estimate;
        loop {
            let candidate = max(high.saturating_sub(step), 0);
            if fits(candidate)? {
                break (candidate, high);
            }
            high = candidate;
            step = step.saturating_mul(2);
        }
    };
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        if fits(mid)? {
            low = mid;
        } else {
            high = mid;
        }
    }
    Ok(low)
}

/// Duration arithmetic on instants.
impl Chronology {
    pub fn duration_field(&self, unit: DurationFieldType) -> DurationField {
        DurationField::new(self, unit)
    }

    pub fn add(&self, instant: i64, unit: DurationFieldType, amount: i64) -> Result<i64> {
        self.duration_field(unit).add(instant, amount)
    }

    pub fn subtract(&self, instant: i64, unit: DurationFieldType, amount: i64) -> Result<i64> {
        self.duration_field(unit).subtract(instant, amount)
    }

    /// Whole `unit`s from `subtrahend` to `minuend`. See [`DurationField::difference`].
    pub fn difference(&self, minuend: i64, subtrahend: i64, unit: DurationFieldType) -> Result<i64> {
        self.duration_field(unit).difference(minuend, subtrahend)
    }

    /// Moves `local` by whole years, keeping month and time of day and clamping the day
    /// of month to the target month's length.
    pub(crate) fn add_years_local(&self, local: i64, years: i64) -> Result<i64> {
        let fields = self.decompose_local(local)?;
        let year = (fields.year() as i64)
            .checked_add(years)
            .ok_or(Error::Overflow)?;
        let year = self.check_year(year)?;
        let month = min(fields.month_of_year(), self.month_count(year));
        let day = min(
            fields.day_of_month(),
            self.calendar().days_in_month(year, month),
        );
        self.local_from_date(
            year as i64,
            month as i64,
            day as i64,
            fields.millis_of_day() as i64,
        )
    }

    /// Moves `local` by whole months, carrying into the year, and clamping the day of month.
    pub(crate) fn add_months_local(&self, local: i64, months: i64) -> Result<i64> {
        let fields = self.decompose_local(local)?;
        let months_per_year = self.month_count(fields.year()) as i64;
        let month_index = (fields.year() as i64 * months_per_year
            + fields.month_of_year() as i64
            - 1)
            .checked_add(months)
            .ok_or(Error::Overflow)?;
        let (year, month) = month_index.div_mod_floor(&months_per_year);
        let year = self.check_year(year)?;
        let month = month as u32 + 1;
        let day = min(
            fields.day_of_month(),
            self.calendar().days_in_month(year, month),
        );
        self.local_from_date(
            year as i64,
            month as i64,
            day as i64,
            fields.millis_of_day() as i64,
        )
    }

    /// Moves `local` by whole week-years, keeping week and day of week and clamping the
    /// week to the target week-year's length.
    pub(crate) fn add_weekyears_local(&self, local: i64, weekyears: i64) -> Result<i64> {
        let fields = self.decompose_local(local)?;
        let weekyear = (fields.weekyear() as i64)
            .checked_add(weekyears)
            .ok_or(Error::Overflow)?;
        let weekyear = self.check_year(weekyear)?;
        let week = min(
            fields.week_of_weekyear(),
            self.weeks_in_weekyear_unchecked(weekyear),
        );
        self.local_from_week_date(
            weekyear as i64,
            week as i64,
            fields.day_of_week() as i64,
            fields.millis_of_day() as i64,
        )
    }
}
