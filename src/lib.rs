//! Conversion between the Gregorian (AD) and Bikram Sambat (BS) calendars,
//! and accounting periods over BS years.
//!
//! The BS calendar has no closed-form rule, so every BS computation reads a
//! table of month lengths covering BS 2000 through 2100. Conversions count
//! days from the correspondence BS 2000-01-01 = AD 1943-04-14.
//!
//! ```
//! use bikram_sambat::{AccountingYearType, BsDate, PeriodType, convert_to_bs, quarter_end_date};
//!
//! let bs = convert_to_bs("2024-11-04").unwrap();
//! assert_eq!(bs.to_string(), "2081-07-19");
//!
//! let end = quarter_end_date(2081, 1, AccountingYearType::Financial).unwrap();
//! assert_eq!(end, BsDate::new(2081, 6, 30).unwrap());
//! assert_eq!(PeriodType::HalfYear.months(), 6);
//! ```

mod config;
mod consts;
mod convert;
mod data;
mod date;
mod error;
mod format;
mod period;
mod prelude;
mod today;
mod types;

pub use config::{
    AccountingYearType, CalendarSystem, Config, config, set_accounting_year_type,
    set_calendar_system, set_config,
};
pub use consts::*;
pub use convert::{ad_to_bs, bs_to_ad, days_from_ad_anchor, days_from_bs_anchor};
pub use data::{bs_month_lengths, bs_year_length};
pub use date::{AdDate, BsDate, CalendarDate};
pub use error::{DateError, ErrorKind, FormatError};
pub use format::{
    DateDifference, DifferenceUnit, FormatDateParams, date_difference, format_date,
    parse_date_components, validate_month, validate_year,
};
pub use period::{
    AdMonthRange, Period, PeriodType, ad_month_range, days_in_bs_month, derive_period,
    enumerate_period_boundaries, half_year_end_date, half_year_length, month_end_date,
    month_lengths_for_year, next_period, period_end_date, period_length, period_start_date,
    quarter_end_date, quarter_length, year_end_date, year_length,
};
pub use today::{ad_date_at, resolve_time_zone, today, todays_ad_date, todays_bs_date};
pub use types::{Month, days_in_ad_month, days_in_ad_year, is_leap_year};

/// Converts a `YYYY-MM-DD` Gregorian date string to Bikram Sambat.
///
/// A trailing time such as `T14:12:38.258Z` is ignored.
///
/// # Errors
/// Returns `DateError::Format` for unreadable input, a domain error for an
/// impossible date, or a range error outside AD 1943-04-14 to 2044-04-14.
pub fn convert_to_bs(ad_date: &str) -> Result<BsDate, DateError> {
    ad_date.parse::<AdDate>()?.to_bs()
}

/// Converts a `YYYY-MM-DD` Bikram Sambat date string to Gregorian.
///
/// # Errors
/// Returns `DateError::Format` for unreadable input, a domain error for an
/// impossible date, or `DateError::YearOutOfRange` outside BS 2000-2100.
pub fn convert_to_ad(bs_date: &str) -> Result<AdDate, DateError> {
    bs_date.parse::<BsDate>()?.to_ad()
}

/// Whether `bs_date` names a real day of the tabulated BS calendar.
pub fn is_valid_bs_date(bs_date: &str) -> bool {
    bs_date.parse::<BsDate>().is_ok()
}

/// The period containing a BS date string.
///
/// `year_type` falls back to the configured accounting year type.
///
/// # Errors
/// Returns a `DateError` when `bs_date` is not a valid BS date.
pub fn period_of(
    bs_date: &str,
    period_type: PeriodType,
    year_type: Option<AccountingYearType>,
) -> Result<Period, DateError> {
    let date = bs_date.parse::<BsDate>()?;
    Ok(derive_period(&date, period_type, config().year_type_or_default(year_type)))
}

/// Period boundaries between two BS date strings, rendered as `YYYY-MM-DD`.
///
/// `year_type` falls back to the configured accounting year type. See
/// [`enumerate_period_boundaries`].
///
/// # Errors
/// Returns a `DateError` when either date is invalid or a period leaves the
/// supported range.
pub fn period_boundaries(
    start: &str,
    end: &str,
    period_type: PeriodType,
    year_type: Option<AccountingYearType>,
) -> Result<Vec<String>, DateError> {
    let start = start.parse::<BsDate>()?;
    let end = end.parse::<BsDate>()?;
    let year_type = config().year_type_or_default(year_type);
    Ok(enumerate_period_boundaries(&start, &end, period_type, year_type)?
        .iter()
        .map(ToString::to_string)
        .collect())
}
