pub use calendar::{CalendarDefinition, CalendarKind, Days360, Epagomenal, Gregorian};
pub use chronology::{Chronology, ChronologyBuilder, DEFAULT_MIN_DAYS_IN_FIRST_WEEK};
pub use datetime_field::DateTimeField;
pub use duration::DurationField;
pub use error::{Error, Result};
pub use field_type::{
    DateTimeFieldType, DurationFieldType, DAYS_PER_WEEK, MILLIS_PER_DAY, MILLIS_PER_HALFDAY,
    MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MILLIS_PER_WEEK,
};
pub use fields::{FieldSet, FieldSetBuilder, BCE, CE};
pub use registry::Registry;
pub use zone::{default_zone, FixedOffset, TimeZone, Utc, DEFAULT_ZONE_ENV_VAR};

pub mod calendar;
mod chronology;
mod datetime_field;
mod div_rem;
mod duration;
mod error;
mod field_type;
mod fields;
pub mod registry;
pub mod zone;
