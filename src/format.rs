use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    AVERAGE_MONTH_HUNDREDTHS, DATE_SEPARATOR, DAY_TOKEN, DAYS_PER_WEEK, DEFAULT_FORMAT, MAX_BS_YEAR,
    MIN_BS_YEAR, MONTH_TOKEN, TIME_SEPARATORS, UTC_DESIGNATORS, UTC_OFFSET_LEN, YEAR_TOKEN,
};
use crate::convert::days_from_ad_anchor;
use crate::types::Month;
use crate::{AdDate, DateError, FormatError};

/// Inputs to [`format_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDateParams<'a> {
    pub year:   u16,
    pub month:  u8,
    pub day:    u8,
    /// Template with `YYYY`, `MM` and `DD` tokens; `YYYY-MM-DD` when `None`.
    pub format: Option<&'a str>,
}

impl<'a> FormatDateParams<'a> {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            format: None,
        }
    }

    #[must_use]
    pub const fn with_format(mut self, format: &'a str) -> Self {
        self.format = Some(format);
        self
    }
}

/// Renders raw date components into a template.
///
/// Each token is substituted once, leftmost first.
///
/// # Errors
/// Returns `DateError::InvalidMonth` for a month outside `1..=12` and
/// `DateError::InvalidDay` for day 0.
pub fn format_date(params: &FormatDateParams<'_>) -> Result<String, DateError> {
    let month = validate_month(params.month)?;
    if params.day == 0 {
        return Err(DateError::InvalidDay {
            calendar: crate::CalendarSystem::Ad,
            year:     params.year,
            month:    params.month,
            day:      params.day,
        });
    }
    Ok(render(
        params.year,
        month.get(),
        params.day,
        params.format.unwrap_or(DEFAULT_FORMAT),
    ))
}

pub(crate) fn render(year: u16, month: u8, day: u8, template: &str) -> String {
    template
        .replacen(YEAR_TOKEN, &format!("{year:04}"), 1)
        .replacen(MONTH_TOKEN, &format!("{month:02}"), 1)
        .replacen(DAY_TOKEN, &format!("{day:02}"), 1)
}

/// Splits a `YYYY-MM-DD` string into its numeric components.
///
/// A time suffix starting with `T` or a space is ignored, so
/// `2024-11-04T14:12:38.258Z` reads as `2024-11-04`. So is a zone designator
/// right after the day, as in `2024-11-04Z` or `2024-11-04+05:45`. Components are not
/// range-checked beyond being non-zero.
///
/// # Errors
/// Returns `FormatError` when the string is empty, does not have exactly
/// three components, or any component is non-numeric or zero.
pub fn parse_date_components(input: &str) -> Result<(u16, u8, u8), FormatError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FormatError::EmptyInput);
    }
    let date_part = strip_zone_suffix(trimmed.split(TIME_SEPARATORS).next().unwrap_or_default());

    let parts: Vec<&str> = date_part.split(DATE_SEPARATOR).collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(FormatError::InvalidFormat(input.to_owned()));
    };

    Ok((
        parse_component(year, input)?,
        parse_component(month, input)?,
        parse_component(day, input)?,
    ))
}

/// Drops a trailing `Z` or `+HH:MM`/`-HH:MM` zone designator.
fn strip_zone_suffix(date: &str) -> &str {
    if let Some(head) = date.strip_suffix(UTC_DESIGNATORS) {
        return head;
    }
    let Some(split) = date.len().checked_sub(UTC_OFFSET_LEN) else {
        return date;
    };
    match (date.get(..split), date.get(split..)) {
        (Some(head), Some(offset)) if is_utc_offset(offset) => head,
        _ => date,
    }
}

fn is_utc_offset(offset: &str) -> bool {
    matches!(
        offset.as_bytes(),
        [b'+' | b'-', h1, h2, b':', m1, m2]
            if [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
    )
}

fn parse_component<T>(part: &str, input: &str) -> Result<T, FormatError>
where
    T: FromStr + PartialEq + Default,
{
    let invalid = || FormatError::InvalidComponent(part.to_owned(), input.to_owned());
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value = part.parse::<T>().map_err(|_| invalid())?;
    if value == T::default() {
        return Err(invalid());
    }
    Ok(value)
}

/// Checks that a BS year is covered by the month-length table.
///
/// # Errors
/// Returns `DateError::YearOutOfRange` outside `2000..=2100`.
pub fn validate_year(year: u16) -> Result<u16, DateError> {
    if !(MIN_BS_YEAR..=MAX_BS_YEAR).contains(&year) {
        return Err(DateError::YearOutOfRange(year));
    }
    Ok(year)
}

/// Checks that a month is within `1..=12`.
///
/// # Errors
/// Returns `DateError::InvalidMonth` otherwise.
pub fn validate_month(month: u8) -> Result<Month, DateError> {
    Month::new(month)
}

/// Unit used to decompose a [`DateDifference`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DifferenceUnit {
    #[default]
    Days,
    Weeks,
    Months,
}

impl fmt::Display for DifferenceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
        })
    }
}

impl FromStr for DifferenceUnit {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "days" => Ok(Self::Days),
            "weeks" => Ok(Self::Weeks),
            "months" => Ok(Self::Months),
            other => Err(DateError::InvalidValue {
                field:    "difference unit",
                value:    other.to_owned(),
                expected: "days, weeks, months",
            }),
        }
    }
}

/// Distance between two dates. `days` holds the remainder once weeks or
/// months are taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateDifference {
    pub days:   u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weeks:  Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<u32>,
}

/// Absolute distance between two AD dates.
///
/// Months use a fixed 30.44-day average and are an approximation, not a
/// calendar-aware count.
pub fn date_difference(a: &AdDate, b: &AdDate, unit: DifferenceUnit) -> DateDifference {
    let total = u32::try_from(days_from_ad_anchor(a).abs_diff(days_from_ad_anchor(b)))
        .unwrap_or(u32::MAX);

    match unit {
        DifferenceUnit::Days => DateDifference {
            days:   total,
            weeks:  None,
            months: None,
        },
        DifferenceUnit::Weeks => DateDifference {
            days:   total % DAYS_PER_WEEK,
            weeks:  Some(total / DAYS_PER_WEEK),
            months: None,
        },
        DifferenceUnit::Months => {
            let hundredths = u64::from(total) * 100;
            let months = hundredths / u64::from(AVERAGE_MONTH_HUNDREDTHS);
            let rest = (hundredths - months * u64::from(AVERAGE_MONTH_HUNDREDTHS)) / 100;
            DateDifference {
                days:   u32::try_from(rest).unwrap_or(u32::MAX),
                weeks:  None,
                months: Some(u32::try_from(months).unwrap_or(u32::MAX)),
            }
        },
    }
}
