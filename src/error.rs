use crate::consts::{MAX_BS_YEAR, MAX_MONTH, MIN_BS_YEAR};
use crate::prelude::*;
use crate::{AdDate, CalendarSystem, PeriodType};

/// Failure to read a date string.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FormatError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid date component {_0:?} in {_1:?}")]
    InvalidComponent(String, String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for FormatError {}

/// Broad classification of a [`DateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value outside its domain: month, day, period index, configuration value.
    Domain,
    /// A date outside what the month-length table can represent.
    Range,
    /// An unparseable date string.
    Format,
}

/// Error type for every fallible operation in the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Month outside `1..=12`.
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    /// Day outside the length of its month.
    #[error("Invalid day {day} for {calendar} month {year:04}-{month:02}")]
    InvalidDay {
        calendar: CalendarSystem,
        year:     u16,
        month:    u8,
        day:      u8,
    },

    /// AD year outside `1..=9999`.
    #[error("Invalid AD year: {0}")]
    InvalidAdYear(u16),

    /// Quarter, half-year or month index outside its period count.
    #[error("Invalid {period_type} index: {index} (must be 1-{max})")]
    InvalidPeriodIndex {
        period_type: PeriodType,
        index:       u8,
        max:         u8,
    },

    /// Unrecognized enumeration value, e.g. from configuration.
    #[error("Invalid {field}: {value:?} (expected one of {expected})")]
    InvalidValue {
        field:    &'static str,
        value:    String,
        expected: &'static str,
    },

    /// BS year not covered by the month-length table.
    #[error(
        "BS year {0} is outside the supported range ({min}-{max})",
        min = MIN_BS_YEAR,
        max = MAX_BS_YEAR
    )]
    YearOutOfRange(u16),

    /// AD date earlier than the anchor correspondence.
    #[error("AD date {0} precedes the earliest convertible date")]
    BeforeAnchor(AdDate),

    /// AD date whose BS equivalent lies past the end of the table.
    #[error(
        "AD date {0} falls beyond the supported BS range ({min}-{max})",
        min = MIN_BS_YEAR,
        max = MAX_BS_YEAR
    )]
    BeyondTable(AdDate),

    /// Period enumeration did not reach its end date within the supported range.
    #[error("Period enumeration exceeded {0} periods without reaching the end date")]
    IterationLimit(usize),

    /// Error parsing a date string.
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl DateError {
    /// Returns the broad class of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMonth(_)
            | Self::InvalidDay { .. }
            | Self::InvalidAdYear(_)
            | Self::InvalidPeriodIndex { .. }
            | Self::InvalidValue { .. } => ErrorKind::Domain,
            Self::YearOutOfRange(_)
            | Self::BeforeAnchor(_)
            | Self::BeyondTable(_)
            | Self::IterationLimit(_) => ErrorKind::Range,
            Self::Format(_) => ErrorKind::Format,
        }
    }
}
