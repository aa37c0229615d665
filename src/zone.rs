//! Time-zone transforms applied around field computation.
//!
//! The engine computes fields on "local" instants. Mapping between UTC and local time is
//! the job of a [`TimeZone`]; only the fixed-offset zones needed to drive the engine are
//! provided here. Rule-based zones can be plugged in by implementing the trait.

use std::fmt::Debug;
use std::sync::Arc;

use log::warn;

use crate::error::{Error, Result};
use crate::field_type::{MILLIS_PER_HOUR, MILLIS_PER_MINUTE};

/// Environment variable holding the default zone: `UTC`, `Z`, or a fixed offset such as
/// `+05:30` or `-08:00`.
pub const DEFAULT_ZONE_ENV_VAR: &str = "ALMANAC_ZONE";

const MAX_OFFSET_MILLIS: i64 = 18 * MILLIS_PER_HOUR;

pub trait TimeZone: Debug + Send + Sync {
    /// Identifier used to tell zones apart, e.g. `UTC` or `+02:00`.
    fn id(&self) -> &str;

    /// Offset to add to `utc` to get local time.
    fn offset_from_utc(&self, utc: i64) -> i64;

    /// Offset that was added to get `local` from UTC.
    fn offset_from_local(&self, local: i64) -> i64;

    /// Whether the offset is the same at every instant.
    fn is_fixed(&self) -> bool;

    fn to_local(&self, utc: i64) -> Result<i64> {
        utc.checked_add(self.offset_from_utc(utc))
            .ok_or(Error::Overflow)
    }

    fn to_utc(&self, local: i64) -> Result<i64> {
        local
            .checked_sub(self.offset_from_local(local))
            .ok_or(Error::Overflow)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Utc;

impl TimeZone for Utc {
    fn id(&self) -> &str {
        "UTC"
    }

    fn offset_from_utc(&self, _utc: i64) -> i64 {
        0
    }

    fn offset_from_local(&self, _local: i64) -> i64 {
        0
    }

    fn is_fixed(&self) -> bool {
        true
    }

    fn to_local(&self, utc: i64) -> Result<i64> {
        Ok(utc)
    }

    fn to_utc(&self, local: i64) -> Result<i64> {
        Ok(local)
    }
}

/// A zone whose offset from UTC never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedOffset {
    id: String,
    offset_millis: i64,
}

impl FixedOffset {
    /// Creates a zone `offset_millis` ahead of UTC. Offsets are limited to ±18 hours.
    pub fn new(offset_millis: i64) -> Result<Self> {
        if !(-MAX_OFFSET_MILLIS..=MAX_OFFSET_MILLIS).contains(&offset_millis) {
            return Err(Error::range(
                offset_millis,
                -MAX_OFFSET_MILLIS,
                MAX_OFFSET_MILLIS,
            ));
        }
        Ok(FixedOffset {
            id: format_offset(offset_millis),
            offset_millis,
        })
    }

    pub fn hours_minutes(hours: i64, minutes: i64) -> Result<Self> {
        let sign = if hours < 0 { -1 } else { 1 };
        Self::new(hours * MILLIS_PER_HOUR + sign * minutes * MILLIS_PER_MINUTE)
    }

    /// Parses `UTC`, `Z` or `±HH:MM`. `UTC` and `Z` give a zero offset.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("utc") || text == "Z" {
            return Self::new(0).ok();
        }
        let (sign, rest) = match text.as_bytes().first()? {
            b'+' => (1, &text[1..]),
            b'-' => (-1, &text[1..]),
            _ => return None,
        };
        let (hours, minutes) = rest.split_once(':')?;
        if hours.len() != 2 || minutes.len() != 2 {
            return None;
        }
        let hours: i64 = hours.parse().ok()?;
        let minutes: i64 = minutes.parse().ok()?;
        if minutes >= 60 {
            return None;
        }
        Self::new(sign * (hours * MILLIS_PER_HOUR + minutes * MILLIS_PER_MINUTE)).ok()
    }

    pub fn offset_millis(&self) -> i64 {
        self.offset_millis
    }
}

impl TimeZone for FixedOffset {
    fn id(&self) -> &str {
        &self.id
    }

    fn offset_from_utc(&self, _utc: i64) -> i64 {
        self.offset_millis
    }

    fn offset_from_local(&self, _local: i64) -> i64 {
        self.offset_millis
    }

    fn is_fixed(&self) -> bool {
        true
    }
}

fn format_offset(offset_millis: i64) -> String {
    if offset_millis == 0 {
        return "UTC".to_string();
    }
    let sign = if offset_millis < 0 { '-' } else { '+' };
    let magnitude = offset_millis.abs();
    let hours = magnitude / MILLIS_PER_HOUR;
    let minutes = magnitude % MILLIS_PER_HOUR / MILLIS_PER_MINUTE;
    let millis = magnitude % MILLIS_PER_MINUTE;
    if millis == 0 {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!(
            "{}{:02}:{:02}:{:02}.{:03}",
            sign,
            hours,
            minutes,
            millis / 1000,
            millis % 1000
        )
    }
}

/// The zone named by the `ALMANAC_ZONE` environment variable, falling back to UTC when it
/// is unset or cannot be understood.
pub fn default_zone() -> Arc<dyn TimeZone> {
    match std::env::var(DEFAULT_ZONE_ENV_VAR) {
        Ok(value) => zone_from_setting(&value),
        Err(_) => Arc::new(Utc),
    }
}

fn zone_from_setting(value: &str) -> Arc<dyn TimeZone> {
    match FixedOffset::parse(value) {
        Some(zone) if zone.offset_millis() == 0 => Arc::new(Utc),
        Some(zone) => Arc::new(zone),
        None => {
            warn!(
                "unrecognized {} value {:?}, falling back to UTC",
                DEFAULT_ZONE_ENV_VAR, value
            );
            Arc::new(Utc)
        }
    }
}
