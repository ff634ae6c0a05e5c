//! Nominal shelf life before any environmental correction

use chrono::{Duration, NaiveDate};

use super::config::ShelfLifeDefaults;

/// Unadjusted expiry and span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseShelfLife {
    pub expiry: NaiveDate,
    /// May be zero or negative when a supplier expiry precedes manufacture
    pub shelf_days: i64,
}

impl BaseShelfLife {
    /// Days from `today` until base expiry, never negative
    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        days_between(today, self.expiry).max(0)
    }
}

/// Resolves base shelf life from a supplier expiry or the crop table
pub struct BaseShelfLifeResolver<'a> {
    defaults: &'a ShelfLifeDefaults,
}

impl<'a> BaseShelfLifeResolver<'a> {
    pub fn new(defaults: &'a ShelfLifeDefaults) -> Self {
        Self { defaults }
    }

    /// Default days for a crop; lookup is case-insensitive
    pub fn default_days(&self, crop_type: &str) -> i64 {
        self.defaults
            .crop_days
            .get(&crop_type.to_lowercase())
            .copied()
            .unwrap_or(self.defaults.unknown_crop_days)
    }

    pub fn resolve(
        &self,
        crop_type: &str,
        manufacture: NaiveDate,
        supplier_expiry: Option<NaiveDate>,
    ) -> BaseShelfLife {
        match supplier_expiry {
            Some(expiry) => BaseShelfLife {
                expiry,
                shelf_days: days_between(manufacture, expiry),
            },
            None => {
                let shelf_days = self.default_days(crop_type);
                BaseShelfLife {
                    expiry: add_days(manufacture, shelf_days),
                    shelf_days,
                }
            }
        }
    }

    /// As `resolve`, with the hybrid floor applied to the span.
    ///
    /// A supplier expiry is kept as the base expiry; otherwise the expiry follows
    /// the floored span.
    pub fn resolve_with_floor(
        &self,
        crop_type: &str,
        manufacture: NaiveDate,
        supplier_expiry: Option<NaiveDate>,
    ) -> BaseShelfLife {
        let base = self.resolve(crop_type, manufacture, supplier_expiry);
        let shelf_days = base.shelf_days.max(self.defaults.hybrid_floor_days);
        let expiry = match supplier_expiry {
            Some(expiry) => expiry,
            None => add_days(manufacture, shelf_days),
        };
        BaseShelfLife { expiry, shelf_days }
    }
}

/// Signed whole days from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// `date` shifted by a signed number of days, saturating at the calendar bounds
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_supplier_expiry_wins() {
        let defaults = ShelfLifeDefaults::default();
        let resolver = BaseShelfLifeResolver::new(&defaults);
        let base = resolver.resolve("rice", date(2025, 1, 15), Some(date(2026, 1, 15)));
        assert_eq!(base.expiry, date(2026, 1, 15));
        assert_eq!(base.shelf_days, 365);
    }

    #[test]
    fn test_crop_table_lookup_is_case_insensitive() {
        let defaults = ShelfLifeDefaults::default();
        let resolver = BaseShelfLifeResolver::new(&defaults);
        let base = resolver.resolve("Maize", date(2025, 1, 1), None);
        assert_eq!(base.shelf_days, 270);
        assert_eq!(base.expiry, date(2025, 9, 28));
    }

    #[test]
    fn test_unknown_crop_uses_fallback() {
        let defaults = ShelfLifeDefaults::default();
        let resolver = BaseShelfLifeResolver::new(&defaults);
        assert_eq!(resolver.default_days("quinoa"), 240);
        assert_eq!(resolver.default_days("default"), 240);
    }

    #[test]
    fn test_expiry_before_manufacture_is_tolerated() {
        let defaults = ShelfLifeDefaults::default();
        let resolver = BaseShelfLifeResolver::new(&defaults);
        let base = resolver.resolve("wheat", date(2025, 3, 1), Some(date(2025, 2, 1)));
        assert_eq!(base.shelf_days, -28);
        assert_eq!(base.remaining_days(date(2025, 3, 10)), 0);
    }

    #[test]
    fn test_hybrid_floor() {
        let defaults = ShelfLifeDefaults::default();
        let resolver = BaseShelfLifeResolver::new(&defaults);
        let base = resolver.resolve_with_floor("wheat", date(2025, 3, 1), Some(date(2025, 3, 11)));
        assert_eq!(base.shelf_days, 30);
        assert_eq!(base.expiry, date(2025, 3, 11));
    }

    #[test]
    fn test_remaining_days() {
        let base = BaseShelfLife {
            expiry: date(2025, 7, 20),
            shelf_days: 200,
        };
        assert_eq!(base.remaining_days(date(2025, 1, 1)), 200);
        assert_eq!(base.remaining_days(date(2025, 8, 1)), 0);
    }
}
