//! Shared chronology instances, one per configuration.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use lazy_static::lazy_static;
use log::debug;

use crate::calendar::CalendarKind;
use crate::chronology::Chronology;
use crate::error::{Error, Result};
use crate::zone::TimeZone;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RegistryKey {
    kind: CalendarKind,
    zone_id: String,
    min_days_in_first_week: u8,
}

/// A cache of chronologies keyed by calendar, zone id and first-week rule.
///
/// Lookups for the same key return handles to the same instance, even when several
/// threads ask for a new key at once. Published instances are never replaced.
#[derive(Debug, Default)]
pub struct Registry {
    instances: Mutex<HashMap<RegistryKey, Chronology>>,
}

lazy_static! {
    static ref GLOBAL_REGISTRY: Registry = Registry::new();
}

/// The process-wide registry behind [`Chronology::utc`] and friends.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The instance for the given configuration, created on first use.
    /// `min_days_in_first_week` must be in `1..=7`.
    pub fn get(
        &self,
        kind: CalendarKind,
        zone: Arc<dyn TimeZone>,
        min_days_in_first_week: u8,
    ) -> Result<Chronology> {
        if !(1..=7).contains(&min_days_in_first_week) {
            return Err(Error::range(min_days_in_first_week as i64, 1, 7));
        }
        Ok(self.get_or_create(kind, zone, min_days_in_first_week))
    }

    pub(crate) fn get_or_create(
        &self,
        kind: CalendarKind,
        zone: Arc<dyn TimeZone>,
        min_days_in_first_week: u8,
    ) -> Chronology {
        let key = RegistryKey {
            kind,
            zone_id: zone.id().to_string(),
            min_days_in_first_week,
        };
        // Inserts never leave the map half-updated, so a poisoned lock is still usable.
        let mut instances = self
            .instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        instances
            .entry(key)
            .or_insert_with(|| {
                let chronology = Chronology::new(kind, zone, min_days_in_first_week);
                debug!("Publishing chronology {}", chronology);
                chronology
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::zone::{FixedOffset, Utc};

    #[test]
    fn same_key_same_instance() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        let a = registry.get(CalendarKind::Days360, Arc::new(Utc), 4).unwrap();
        let b = registry.get(CalendarKind::Days360, Arc::new(Utc), 4).unwrap();
        assert!(a.ptr_eq(&b));
        let c = registry.get(CalendarKind::Days360, Arc::new(Utc), 1).unwrap();
        assert!(!a.ptr_eq(&c));
        let d = registry.get(CalendarKind::Gregorian, Arc::new(Utc), 4).unwrap();
        assert!(!a.ptr_eq(&d));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn zones_are_keyed_by_id() {
        let registry = Registry::new();
        let a = registry
            .get(CalendarKind::Gregorian, Arc::new(FixedOffset::hours_minutes(2, 0).unwrap()), 4)
            .unwrap();
        let b = registry
            .get(CalendarKind::Gregorian, Arc::new(FixedOffset::parse("+02:00").unwrap()), 4)
            .unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn local_registries_are_independent() {
        let local = Registry::new();
        let a = local.get(CalendarKind::Epagomenal, Arc::new(Utc), 4).unwrap();
        let b = Chronology::utc(CalendarKind::Epagomenal);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn rejects_invalid_first_week_rule() {
        let registry = Registry::new();
        assert_eq!(
            registry.get(CalendarKind::Gregorian, Arc::new(Utc), 0),
            Err(Error::Range {
                value: 0,
                min: 1,
                max: 7
            })
        );
        assert!(registry.get(CalendarKind::Gregorian, Arc::new(Utc), 8).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn concurrent_first_use_publishes_once() {
        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    registry
                        .get(CalendarKind::Days360, Arc::new(Utc), 4)
                        .unwrap()
                })
            })
            .collect();
        let instances: Vec<Chronology> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        for instance in &instances[1..] {
            assert!(instance.ptr_eq(&instances[0]));
        }
        assert_eq!(registry.len(), 1);
    }
}
