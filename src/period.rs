//! Accounting periods over the BS calendar.
//!
//! A year is twelve consecutive rows of the month-length table: months 1-12
//! for calendar years, or months 4-12 plus months 1-3 of the following year
//! for financial years. Periods are numbered by their position inside that
//! rotated year.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::{
    FISCAL_MONTH_SHIFT, FISCAL_START_MONTH, MAX_BS_YEAR, MAX_MONTH, MIN_BS_YEAR, MIN_DAY,
    MONTHS_PER_YEAR,
};
use crate::data::bs_month_lengths;
use crate::prelude::*;
use crate::types::Month;
use crate::{AccountingYearType, AdDate, BsDate, DateError};

/// Length of an accounting period, also used as a payment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodType {
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl PeriodType {
    const EXPECTED: &'static str = "month, quarter, half-year, year";

    /// Months spanned by one period.
    pub const fn months(self) -> u8 {
        match self {
            Self::Month => 1,
            Self::Quarter => 3,
            Self::HalfYear => 6,
            Self::Year => 12,
        }
    }

    /// Periods in one accounting year.
    pub const fn periods_per_year(self) -> u8 {
        MAX_MONTH / self.months()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::HalfYear => "half-year",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "half-year" => Ok(Self::HalfYear),
            "year" => Ok(Self::Year),
            other => Err(DateError::InvalidValue {
                field:    "period type",
                value:    other.to_owned(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// A numbered period of an accounting year, e.g. the third quarter of 2081.
///
/// `year` names the accounting year, so financial year 2080 runs from
/// 2080-04-01 to the end of month 3 of 2081. Years run from 1999, whose
/// financial year ends in the first tabulated months, through 2100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPeriod")]
pub struct Period {
    year:        u16,
    index:       u8,
    period_type: PeriodType,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPeriod {
    year:        u16,
    index:       u8,
    period_type: PeriodType,
}

impl TryFrom<RawPeriod> for Period {
    type Error = DateError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.period_type, raw.index)
    }
}

impl Period {
    const YEARS: RangeInclusive<u16> = MIN_BS_YEAR - 1..=MAX_BS_YEAR;

    /// Creates a period reference.
    ///
    /// # Errors
    /// Returns `DateError::YearOutOfRange` when `year` is outside
    /// `1999..=2100` and `DateError::InvalidPeriodIndex` when `index` is
    /// outside `1..=period_type.periods_per_year()`.
    pub fn new(year: u16, period_type: PeriodType, index: u8) -> Result<Self, DateError> {
        if !Self::YEARS.contains(&year) {
            return Err(DateError::YearOutOfRange(year));
        }
        let max = period_type.periods_per_year();
        if !(1..=max).contains(&index) {
            return Err(DateError::InvalidPeriodIndex {
                period_type,
                index,
                max,
            });
        }
        Ok(Self {
            year,
            index,
            period_type,
        })
    }

    /// Quarter `1..=4` of `year`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidPeriodIndex` for any other quarter.
    pub fn quarter(year: u16, quarter: u8) -> Result<Self, DateError> {
        Self::new(year, PeriodType::Quarter, quarter)
    }

    /// Half `1..=2` of `year`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidPeriodIndex` for any other half.
    pub fn half_year(year: u16, half: u8) -> Result<Self, DateError> {
        Self::new(year, PeriodType::HalfYear, half)
    }

    /// Month position `1..=12` of `year`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidPeriodIndex` for any other position.
    pub fn month(year: u16, month: u8) -> Result<Self, DateError> {
        Self::new(year, PeriodType::Month, month)
    }

    /// The whole of `year`.
    ///
    /// # Errors
    /// Returns `DateError::YearOutOfRange` outside `1999..=2100`.
    pub fn year_of(year: u16) -> Result<Self, DateError> {
        Self::new(year, PeriodType::Year, 1)
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn index(&self) -> u8 {
        self.index
    }

    pub const fn period_type(&self) -> PeriodType {
        self.period_type
    }

    /// The period immediately after this one, rolling into the next year
    /// after the last period.
    ///
    /// # Errors
    /// Returns `DateError::YearOutOfRange` when rolling past 2100.
    pub fn next(self) -> Result<Self, DateError> {
        if self.index < self.period_type.periods_per_year() {
            return Ok(Self {
                index: self.index + 1,
                ..self
            });
        }
        let year = self
            .year
            .checked_add(1)
            .filter(|year| Self::YEARS.contains(year))
            .ok_or(DateError::YearOutOfRange(self.year.saturating_add(1)))?;
        Ok(Self {
            year,
            index: 1,
            ..self
        })
    }

    // 1-based positions inside the rotated year
    const fn first_position(&self) -> u8 {
        (self.index - 1) * self.period_type.months() + 1
    }

    const fn last_position(&self) -> u8 {
        self.index * self.period_type.months()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.period_type {
            PeriodType::Month => write!(f, "{:04}-M{:02}", self.year, self.index),
            PeriodType::Quarter => write!(f, "{:04}-Q{}", self.year, self.index),
            PeriodType::HalfYear => write!(f, "{:04}-H{}", self.year, self.index),
            PeriodType::Year => write!(f, "{:04}", self.year),
        }
    }
}

/// AD dates of the first and last day of a BS month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Into)]
#[serde(rename_all = "camelCase")]
pub struct AdMonthRange {
    pub month_start_date: AdDate,
    pub month_end_date:   AdDate,
}

/// Days in a BS month.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` for untabulated years and
/// `DateError::InvalidMonth` outside `1..=12`.
pub fn days_in_bs_month(year: u16, month: u8) -> Result<u8, DateError> {
    let row = bs_month_lengths(year).ok_or(DateError::YearOutOfRange(year))?;
    Ok(row[Month::new(month)?.index()])
}

/// The twelve month lengths making up accounting year `year`.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` if `year`, or for financial years
/// `year + 1`, is not tabulated.
pub fn month_lengths_for_year(
    year: u16,
    year_type: AccountingYearType,
) -> Result<[u8; MONTHS_PER_YEAR], DateError> {
    let row = bs_month_lengths(year).ok_or(DateError::YearOutOfRange(year))?;
    match year_type {
        AccountingYearType::Calendar => Ok(*row),
        AccountingYearType::Financial => {
            let next_year = year + 1;
            let next = bs_month_lengths(next_year).ok_or(DateError::YearOutOfRange(next_year))?;
            let shift = usize::from(FISCAL_MONTH_SHIFT);

            let mut lengths = [0; MONTHS_PER_YEAR];
            lengths[..MONTHS_PER_YEAR - shift].copy_from_slice(&row[shift..]);
            lengths[MONTHS_PER_YEAR - shift..].copy_from_slice(&next[..shift]);
            Ok(lengths)
        },
    }
}

/// Days in a period.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` when the period's months are not
/// tabulated.
pub fn period_length(period: &Period, year_type: AccountingYearType) -> Result<u16, DateError> {
    (period.first_position()..=period.last_position()).try_fold(0, |total, position| {
        let (_, _, days) = rotated_month(period.year, position, year_type)?;
        Ok(total + u16::from(days))
    })
}

/// Days in quarter `1..=4` of an accounting year.
///
/// # Errors
/// Returns `DateError::InvalidPeriodIndex` for a bad quarter and
/// `DateError::YearOutOfRange` for untabulated years.
pub fn quarter_length(
    year: u16,
    quarter: u8,
    year_type: AccountingYearType,
) -> Result<u16, DateError> {
    period_length(&Period::quarter(year, quarter)?, year_type)
}

/// Days in half `1..=2` of an accounting year.
///
/// # Errors
/// Returns `DateError::InvalidPeriodIndex` for a bad half and
/// `DateError::YearOutOfRange` for untabulated years.
pub fn half_year_length(
    year: u16,
    half: u8,
    year_type: AccountingYearType,
) -> Result<u16, DateError> {
    period_length(&Period::half_year(year, half)?, year_type)
}

/// Days in an accounting year.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` for untabulated years.
pub fn year_length(year: u16, year_type: AccountingYearType) -> Result<u16, DateError> {
    period_length(&Period::year_of(year)?, year_type)
}

/// Maps a position of the rotated year back to its calendar year and month.
const fn calendar_month(year: u16, position: u8, year_type: AccountingYearType) -> (u16, u8) {
    match year_type {
        AccountingYearType::Calendar => (year, position),
        AccountingYearType::Financial => {
            let month = position + FISCAL_MONTH_SHIFT;
            if month > MAX_MONTH {
                (year + 1, month - MAX_MONTH)
            } else {
                (year, month)
            }
        },
    }
}

/// Calendar year, month and length at a position of the rotated year.
fn rotated_month(
    year: u16,
    position: u8,
    year_type: AccountingYearType,
) -> Result<(u16, Month, u8), DateError> {
    let (year, month) = calendar_month(year, position, year_type);
    let month = Month::new(month)?;
    let row = bs_month_lengths(year).ok_or(DateError::YearOutOfRange(year))?;
    Ok((year, month, row[month.index()]))
}

/// First day of a period.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` when the period's first month is not
/// tabulated.
pub fn period_start_date(
    period: &Period,
    year_type: AccountingYearType,
) -> Result<BsDate, DateError> {
    let (year, month, _) = rotated_month(period.year, period.first_position(), year_type)?;
    Ok(BsDate::from_parts(year, month, MIN_DAY))
}

/// Last day of a period.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` when the period's last month is not
/// tabulated.
pub fn period_end_date(
    period: &Period,
    year_type: AccountingYearType,
) -> Result<BsDate, DateError> {
    let (year, month, days) = rotated_month(period.year, period.last_position(), year_type)?;
    Ok(BsDate::from_parts(year, month, days))
}

/// Last day of a BS calendar month.
///
/// # Errors
/// Returns `DateError::InvalidPeriodIndex` for a bad month and
/// `DateError::YearOutOfRange` for untabulated years.
pub fn month_end_date(year: u16, month: u8) -> Result<BsDate, DateError> {
    period_end_date(&Period::month(year, month)?, AccountingYearType::Calendar)
}

/// Last day of quarter `1..=4` of an accounting year.
///
/// # Errors
/// Returns `DateError::InvalidPeriodIndex` for a bad quarter and
/// `DateError::YearOutOfRange` for untabulated years.
pub fn quarter_end_date(
    year: u16,
    quarter: u8,
    year_type: AccountingYearType,
) -> Result<BsDate, DateError> {
    period_end_date(&Period::quarter(year, quarter)?, year_type)
}

/// Last day of half `1..=2` of an accounting year.
///
/// # Errors
/// Returns `DateError::InvalidPeriodIndex` for a bad half and
/// `DateError::YearOutOfRange` for untabulated years.
pub fn half_year_end_date(
    year: u16,
    half: u8,
    year_type: AccountingYearType,
) -> Result<BsDate, DateError> {
    period_end_date(&Period::half_year(year, half)?, year_type)
}

/// Last day of an accounting year.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` for untabulated years.
pub fn year_end_date(year: u16, year_type: AccountingYearType) -> Result<BsDate, DateError> {
    period_end_date(&Period::year_of(year)?, year_type)
}

/// AD dates spanned by a BS month.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` for untabulated years and
/// `DateError::InvalidMonth` outside `1..=12`.
pub fn ad_month_range(year: u16, month: u8) -> Result<AdMonthRange, DateError> {
    let last_day = days_in_bs_month(year, month)?;
    Ok(AdMonthRange {
        month_start_date: BsDate::new(year, month, MIN_DAY)?.to_ad()?,
        month_end_date:   BsDate::new(year, month, last_day)?.to_ad()?,
    })
}

/// The period containing `date`.
///
/// In financial years, months 1-3 belong to the previous year's last
/// quarter.
pub fn derive_period(
    date: &BsDate,
    period_type: PeriodType,
    year_type: AccountingYearType,
) -> Period {
    let (year, month) = match year_type {
        AccountingYearType::Calendar => (date.year(), date.month()),
        AccountingYearType::Financial if date.month() < FISCAL_START_MONTH => {
            (date.year() - 1, date.month() + MAX_MONTH - FISCAL_MONTH_SHIFT)
        },
        AccountingYearType::Financial => (date.year(), date.month() - FISCAL_MONTH_SHIFT),
    };
    Period {
        year,
        index: (month - 1) / period_type.months() + 1,
        period_type,
    }
}

/// The period after the one containing `date`.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` past the last period of 2100.
pub fn next_period(
    date: &BsDate,
    period_type: PeriodType,
    year_type: AccountingYearType,
) -> Result<Period, DateError> {
    derive_period(date, period_type, year_type).next()
}

/// Period boundaries from `start` to `end`.
///
/// Returns `start`, every period end strictly between the two, then `end`.
/// An `end` before `start` yields just `[start, end]`.
///
/// # Errors
/// Returns `DateError::IterationLimit` if the walk outlasts the supported
/// range.
pub fn enumerate_period_boundaries(
    start: &BsDate,
    end: &BsDate,
    period_type: PeriodType,
    year_type: AccountingYearType,
) -> Result<Vec<BsDate>, DateError> {
    let limit =
        usize::from(period_type.periods_per_year()) * usize::from(MAX_BS_YEAR - MIN_BS_YEAR + 2);

    let mut boundaries = vec![*start];
    let mut period = derive_period(start, period_type, year_type);
    for _ in 0..limit {
        let reaches_end = match period_end_date(&period, year_type) {
            Ok(period_end) if period_end < *end => {
                if period_end > *start {
                    boundaries.push(period_end);
                }
                false
            },
            Ok(_) => true,
            // a period ending past the table ends after any valid `end`
            Err(DateError::YearOutOfRange(year)) if year > MAX_BS_YEAR => true,
            Err(err) => return Err(err),
        };
        if reaches_end {
            boundaries.push(*end);
            debug!(
                "{} {period_type} boundaries from {start} to {end} ({year_type})",
                boundaries.len()
            );
            return Ok(boundaries);
        }
        period = period.next()?;
    }
    Err(DateError::IterationLimit(limit))
}
