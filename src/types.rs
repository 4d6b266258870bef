use crate::DateError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_AD_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
/// Shared by both calendars: BS month 1 is Baisakh, AD month 1 is January.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(DateError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Zero-based position, for indexing month-length rows
    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Gregorian helpers

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in an AD year: 365, or 366 in leap years.
pub const fn days_in_ad_year(year: u16) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Days in an AD month.
///
/// # Errors
/// Returns `DateError::InvalidMonth` if `month` is outside `1..=12`.
pub fn days_in_ad_month(year: u16, month: u8) -> Result<u8, DateError> {
    let month = Month::new(month)?;
    Ok(days_in_month(year, month.get()))
}

pub(crate) const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_AD_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(DateError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(DateError::InvalidMonth(13))));
        assert!(matches!(Month::new(255), Err(DateError::InvalidMonth(255))));
    }

    #[test]
    fn test_month_get_and_index() {
        let month = Month::new(8).unwrap();
        assert_eq!(month.get(), 8);
        assert_eq!(month.index(), 7);
        assert_eq!(month.to_string(), "8");
    }

    #[test]
    fn test_month_try_from_u8() {
        let month: Month = 8.try_into().unwrap();
        assert_eq!(u8::from(month), 8);

        let result: Result<Month, _> = 0.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_month_serde() {
        let month = Month::new(8).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "8");

        let parsed: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(month, parsed);

        assert!(serde_json::from_str::<Month>("13").is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        u16,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2004,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2001,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1700,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        1800,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        1600,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        2400,
                is_leap:     true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_ad_month() {
        for month in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(days_in_ad_month(2024, month).unwrap(), 31, "Month {month}");
        }
        for month in [4, 6, 9, 11] {
            assert_eq!(days_in_ad_month(2024, month).unwrap(), 30, "Month {month}");
        }
        assert_eq!(days_in_ad_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_ad_month(2004, 2).unwrap(), 29);
        assert_eq!(days_in_ad_month(2001, 2).unwrap(), 28);
        assert_eq!(days_in_ad_month(1900, 2).unwrap(), 28);
    }

    #[test]
    fn test_days_in_ad_month_invalid() {
        assert_eq!(days_in_ad_month(2024, 0), Err(DateError::InvalidMonth(0)));
        assert_eq!(days_in_ad_month(2024, 13), Err(DateError::InvalidMonth(13)));
    }

    #[test]
    fn test_days_in_ad_year() {
        assert_eq!(days_in_ad_year(2024), 366);
        assert_eq!(days_in_ad_year(2023), 365);
        assert_eq!(days_in_ad_year(1900), 365);
    }
}
