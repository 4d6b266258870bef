//! AD/BS conversion by counting days from a fixed anchor.
//!
//! BS 2000-01-01 falls on AD 1943-04-14. A date is converted by measuring
//! its distance from the anchor in its own calendar, then walking the same
//! number of days forward through the other calendar.

use log::debug;

use crate::consts::{
    AD_ANCHOR_DAY, AD_ANCHOR_MONTH, AD_ANCHOR_MONTH_OFFSET, AD_ANCHOR_YEAR, BS_ANCHOR_DAY,
    BS_ANCHOR_MONTH, BS_ANCHOR_YEAR, JANUARY, MAX_MONTH,
};
use crate::data::{bs_month_lengths, sum_bs_years};
use crate::types::{Month, days_in_ad_year, days_in_month};
use crate::{AdDate, BsDate, DateError};

/// Signed number of days from AD 1943-04-14 to `date`.
///
/// Dates before the anchor give a negative count.
pub fn days_from_ad_anchor(date: &AdDate) -> i64 {
    let (year, month, day) = date.to_tuple();

    let whole_years: i64 = if year >= AD_ANCHOR_YEAR {
        (AD_ANCHOR_YEAR..year).map(|y| i64::from(days_in_ad_year(y))).sum()
    } else {
        -(year..AD_ANCHOR_YEAR).map(|y| i64::from(days_in_ad_year(y))).sum::<i64>()
    };
    let whole_months: i64 = (JANUARY..month)
        .map(|m| i64::from(days_in_month(year, m)))
        .sum();

    AD_ANCHOR_MONTH_OFFSET + whole_years + whole_months + i64::from(day) - i64::from(AD_ANCHOR_DAY)
}

/// Number of days from BS 2000-01-01 to `date`.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` if the year is not tabulated.
pub fn days_from_bs_anchor(date: &BsDate) -> Result<u32, DateError> {
    let (year, _, day) = date.to_tuple();
    let row = bs_month_lengths(year).ok_or(DateError::YearOutOfRange(year))?;

    let whole_years = sum_bs_years(BS_ANCHOR_YEAR, year);
    let whole_months: u32 = row[..date.month_typed().index()]
        .iter()
        .map(|&days| u32::from(days))
        .sum();

    Ok(whole_years + whole_months + u32::from(day) - 1)
}

/// Converts a Gregorian date to Bikram Sambat.
///
/// # Errors
/// Returns `DateError::BeforeAnchor` for dates before AD 1943-04-14 and
/// `DateError::BeyondTable` when the result would fall after the last
/// tabulated BS year.
pub fn ad_to_bs(date: &AdDate) -> Result<BsDate, DateError> {
    if date.to_tuple() < (AD_ANCHOR_YEAR, AD_ANCHOR_MONTH, AD_ANCHOR_DAY) {
        return Err(DateError::BeforeAnchor(*date));
    }
    let beyond = || DateError::BeyondTable(*date);

    let mut remaining = u32::try_from(days_from_ad_anchor(date)).map_err(|_| beyond())?;
    let mut year = BS_ANCHOR_YEAR;
    let mut month = BS_ANCHOR_MONTH;
    let mut row = bs_month_lengths(year).ok_or_else(beyond)?;

    // whole months
    while remaining >= u32::from(row[usize::from(month - 1)]) {
        remaining -= u32::from(row[usize::from(month - 1)]);
        month += 1;
        if month > MAX_MONTH {
            month = JANUARY;
            year += 1;
            row = bs_month_lengths(year).ok_or_else(beyond)?;
        }
    }

    let mut day = u32::from(BS_ANCHOR_DAY) + remaining;
    let month_length = u32::from(row[usize::from(month - 1)]);
    if day > month_length {
        day -= month_length;
        month += 1;
        if month > MAX_MONTH {
            month = JANUARY;
            year += 1;
            if bs_month_lengths(year).is_none() {
                return Err(beyond());
            }
        }
    }

    let day = u8::try_from(day).map_err(|_| beyond())?;
    let result = BsDate::from_parts(year, Month::new(month)?, day);
    debug!("converted AD {date} to BS {result}");
    Ok(result)
}

/// Converts a Bikram Sambat date to Gregorian.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` if the BS year is not tabulated.
pub fn bs_to_ad(date: &BsDate) -> Result<AdDate, DateError> {
    let mut remaining = days_from_bs_anchor(date)?;
    let mut year = AD_ANCHOR_YEAR;
    let mut month = AD_ANCHOR_MONTH;
    let mut day = AD_ANCHOR_DAY;

    while remaining > 0 {
        let month_length = days_in_month(year, month);
        if remaining < u32::from(month_length) {
            // remaining < 31 here
            day += u8::try_from(remaining).map_err(|_| DateError::YearOutOfRange(date.year()))?;
            if day > month_length {
                day -= month_length;
                month += 1;
            }
            if month > MAX_MONTH {
                month = JANUARY;
                year += 1;
            }
            remaining = 0;
        } else {
            remaining -= u32::from(month_length);
            month += 1;
            if month > MAX_MONTH {
                month = JANUARY;
                year += 1;
            }
        }
    }

    let result = AdDate::from_parts(year, Month::new(month)?, day);
    debug!("converted BS {date} to AD {result}");
    Ok(result)
}

impl AdDate {
    /// Bikram Sambat equivalent of this date. See [`ad_to_bs`].
    ///
    /// # Errors
    /// Fails when the date is outside the convertible range.
    pub fn to_bs(&self) -> Result<BsDate, DateError> {
        ad_to_bs(self)
    }
}

impl BsDate {
    /// Gregorian equivalent of this date. See [`bs_to_ad`].
    ///
    /// # Errors
    /// Fails when the year is outside the tabulated range.
    pub fn to_ad(&self) -> Result<AdDate, DateError> {
        bs_to_ad(self)
    }
}

impl TryFrom<AdDate> for BsDate {
    type Error = DateError;

    fn try_from(value: AdDate) -> Result<Self, Self::Error> {
        ad_to_bs(&value)
    }
}

impl TryFrom<BsDate> for AdDate {
    type Error = DateError;

    fn try_from(value: BsDate) -> Result<Self, Self::Error> {
        bs_to_ad(&value)
    }
}
