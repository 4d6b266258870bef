use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FORMAT, MAX_AD_YEAR, MIN_DAY};
use crate::format::{parse_date_components, render};
use crate::prelude::*;
use crate::types::{Month, days_in_month};
use crate::{CalendarSystem, DateError, data};

/// A valid Gregorian date.
///
/// Ordering is chronological and matches the ordering of the
/// zero-padded `YYYY-MM-DD` rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year", "month.get()", "day")]
pub struct AdDate {
    year:  u16,
    month: Month,
    day:   u8,
}

/// A valid Bikram Sambat date within the tabulated range.
///
/// Ordering is chronological and matches the ordering of the
/// zero-padded `YYYY-MM-DD` rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year", "month.get()", "day")]
pub struct BsDate {
    year:  u16,
    month: Month,
    day:   u8,
}

/// A date in either calendar, for output that follows the configured
/// calendar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
pub enum CalendarDate {
    #[display(fmt = "{_0}")]
    Ad(AdDate),
    #[display(fmt = "{_0}")]
    Bs(BsDate),
}

impl AdDate {
    /// Creates a Gregorian date.
    ///
    /// # Errors
    /// Returns `DateError::InvalidAdYear` for year 0 or years past 9999,
    /// `DateError::InvalidMonth` or `DateError::InvalidDay` for impossible
    /// month/day values.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        if year == 0 || year > MAX_AD_YEAR {
            return Err(DateError::InvalidAdYear(year));
        }
        let month_typed = Month::new(month)?;
        if !(MIN_DAY..=days_in_month(year, month)).contains(&day) {
            return Err(DateError::InvalidDay {
                calendar: CalendarSystem::Ad,
                year,
                month,
                day,
            });
        }
        Ok(Self {
            year,
            month: month_typed,
            day,
        })
    }

    /// Builds a date the caller has already checked.
    pub(crate) const fn from_parts(year: u16, month: Month, day: u8) -> Self {
        Self { year, month, day }
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// (year, month, day)
    pub const fn to_tuple(&self) -> (u16, u8, u8) {
        (self.year, self.month.get(), self.day)
    }

    /// Renders the date with a `YYYY`/`MM`/`DD` template.
    pub fn format(&self, template: &str) -> String {
        render(self.year, self.month.get(), self.day, template)
    }
}

impl BsDate {
    /// Creates a Bikram Sambat date.
    ///
    /// # Errors
    /// Returns `DateError::YearOutOfRange` when the year is not tabulated,
    /// `DateError::InvalidMonth` or `DateError::InvalidDay` for impossible
    /// month/day values.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let row = data::bs_month_lengths(year).ok_or(DateError::YearOutOfRange(year))?;
        let month_typed = Month::new(month)?;
        if !(MIN_DAY..=row[month_typed.index()]).contains(&day) {
            return Err(DateError::InvalidDay {
                calendar: CalendarSystem::Bs,
                year,
                month,
                day,
            });
        }
        Ok(Self {
            year,
            month: month_typed,
            day,
        })
    }

    /// Builds a date the caller has already checked against the table.
    pub(crate) const fn from_parts(year: u16, month: Month, day: u8) -> Self {
        Self { year, month, day }
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// (year, month, day)
    pub const fn to_tuple(&self) -> (u16, u8, u8) {
        (self.year, self.month.get(), self.day)
    }

    /// Renders the date with a `YYYY`/`MM`/`DD` template.
    pub fn format(&self, template: &str) -> String {
        render(self.year, self.month.get(), self.day, template)
    }

    /// Days in this date's month.
    ///
    /// # Errors
    /// Returns `DateError::YearOutOfRange` if the year is not tabulated,
    /// which `new` already rules out.
    pub fn days_in_month(&self) -> Result<u8, DateError> {
        let row = data::bs_month_lengths(self.year).ok_or(DateError::YearOutOfRange(self.year))?;
        Ok(row[self.month.index()])
    }
}

impl CalendarDate {
    pub const fn calendar_system(&self) -> CalendarSystem {
        match self {
            Self::Ad(_) => CalendarSystem::Ad,
            Self::Bs(_) => CalendarSystem::Bs,
        }
    }

    /// Renders the date with a `YYYY`/`MM`/`DD` template.
    pub fn format(&self, template: &str) -> String {
        match self {
            Self::Ad(date) => date.format(template),
            Self::Bs(date) => date.format(template),
        }
    }
}

impl FromStr for AdDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_date_components(s)?;
        Self::new(year, month, day)
    }
}

impl FromStr for BsDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_date_components(s)?;
        Self::new(year, month, day)
    }
}

impl TryFrom<jiff::civil::Date> for AdDate {
    type Error = DateError;

    fn try_from(value: jiff::civil::Date) -> Result<Self, Self::Error> {
        let year = u16::try_from(value.year()).map_err(|_| DateError::InvalidAdYear(0))?;
        let month = u8::try_from(value.month()).map_err(|_| DateError::InvalidMonth(0))?;
        let day = u8::try_from(value.day()).map_err(|_| DateError::InvalidDay {
            calendar: CalendarSystem::Ad,
            year,
            month,
            day: 0,
        })?;
        Self::new(year, month, day)
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.format(DEFAULT_FORMAT))
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(AdDate);
string_serde!(BsDate);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, FormatError};

    #[test]
    fn test_parse_ad_date() {
        let date = "2024-11-04".parse::<AdDate>().unwrap();
        assert_eq!(date.to_tuple(), (2024, 11, 4));
        assert_eq!(date.to_string(), "2024-11-04");
    }

    #[test]
    fn test_parse_ad_date_with_time_suffix() {
        let date = "2024-11-04T14:12:38.258Z".parse::<AdDate>().unwrap();
        assert_eq!(date.to_tuple(), (2024, 11, 4));
    }

    #[test]
    fn test_parse_bs_date() {
        let date = "2080-02-32".parse::<BsDate>().unwrap();
        assert_eq!(date.to_tuple(), (2080, 2, 32));
        assert_eq!(date.days_in_month(), Ok(32));
        assert_eq!(BsDate::new(2080, 12, 1).unwrap().days_in_month(), Ok(30));
    }

    #[test]
    fn test_bs_day_checked_against_table() {
        // 2080 Chaitra has 30 days
        assert!(BsDate::new(2080, 12, 30).is_ok());
        let err = BsDate::new(2080, 12, 31).unwrap_err();
        assert!(matches!(
            err,
            DateError::InvalidDay {
                calendar: CalendarSystem::Bs,
                year: 2080,
                month: 12,
                day: 31
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_bs_year_range() {
        struct TestCase {
            year:           u16,
            should_succeed: bool,
        }

        let cases = [
            TestCase {
                year:           1999,
                should_succeed: false,
            },
            TestCase {
                year:           2000,
                should_succeed: true,
            },
            TestCase {
                year:           2100,
                should_succeed: true,
            },
            TestCase {
                year:           2101,
                should_succeed: false,
            },
        ];

        for case in &cases {
            let result = BsDate::new(case.year, 1, 1);
            if case.should_succeed {
                assert!(result.is_ok(), "BS year {} should be supported", case.year);
            } else {
                assert_eq!(result, Err(DateError::YearOutOfRange(case.year)));
            }
        }
    }

    #[test]
    fn test_ad_leap_day() {
        assert!(AdDate::new(2024, 2, 29).is_ok());
        assert!(matches!(AdDate::new(2023, 2, 29), Err(DateError::InvalidDay { .. })));
        assert!(matches!(AdDate::new(0, 1, 1), Err(DateError::InvalidAdYear(0))));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "".parse::<AdDate>(),
            Err(DateError::Format(FormatError::EmptyInput))
        ));
        assert!(matches!(
            "Invalid date".parse::<AdDate>(),
            Err(DateError::Format(_))
        ));
        assert!(matches!(
            "2080-13-01".parse::<BsDate>(),
            Err(DateError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_ordering_matches_string_ordering() {
        let dates = ["2080-01-31", "2080-02-01", "2080-10-05", "2081-01-01"];
        let parsed: Vec<BsDate> = dates.iter().map(|s| s.parse().unwrap()).collect();
        for pair in parsed.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].to_string() < pair[1].to_string());
        }
    }

    #[test]
    fn test_format_templates() {
        let date = BsDate::new(2081, 7, 9).unwrap();
        assert_eq!(date.format("DD/MM/YYYY"), "09/07/2081");
        assert_eq!(date.format(DEFAULT_FORMAT), "2081-07-09");
    }

    #[test]
    fn test_calendar_date() {
        let bs = CalendarDate::from(BsDate::new(2081, 7, 19).unwrap());
        let ad = CalendarDate::from(AdDate::new(2024, 11, 4).unwrap());
        assert_eq!(bs.to_string(), "2081-07-19");
        assert_eq!(ad.to_string(), "2024-11-04");
        assert_eq!(bs.calendar_system(), CalendarSystem::Bs);
        assert_eq!(ad.calendar_system(), CalendarSystem::Ad);
        assert_eq!(ad.format("MM/DD/YYYY"), "11/04/2024");
    }

    #[test]
    fn test_from_jiff_date() {
        let date = AdDate::try_from(jiff::civil::date(2024, 11, 4)).unwrap();
        assert_eq!(date.to_tuple(), (2024, 11, 4));
        assert!(AdDate::try_from(jiff::civil::date(-5, 1, 1)).is_err());
    }

    #[test]
    fn test_serde_string_format() {
        let date = BsDate::new(2081, 7, 19).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""2081-07-19""#);

        let parsed: BsDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        assert!(serde_json::from_str::<BsDate>(r#""2101-01-01""#).is_err());
        assert!(serde_json::from_str::<AdDate>(r#""2024-02-30""#).is_err());
    }
}
