/// First BS year covered by the month-length table (inclusive)
pub const MIN_BS_YEAR: u16 = 2000;
/// Last BS year covered by the month-length table (inclusive)
pub const MAX_BS_YEAR: u16 = 2100;

/// Maximum valid AD year (inclusive)
pub const MAX_AD_YEAR: u16 = 9999;

/// Maximum valid month
pub const MAX_MONTH: u8 = 12;
/// Number of months in a year, as a table width
pub const MONTHS_PER_YEAR: usize = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days in each AD month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_AD_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// BS side of the anchor correspondence: 2000-01-01 BS
pub const BS_ANCHOR_YEAR: u16 = 2000;
pub const BS_ANCHOR_MONTH: u8 = 1;
pub const BS_ANCHOR_DAY: u8 = 1;

/// AD side of the anchor correspondence: 1943-04-14 AD
pub const AD_ANCHOR_YEAR: u16 = 1943;
pub const AD_ANCHOR_MONTH: u8 = 4;
pub const AD_ANCHOR_DAY: u8 = 14;

/// Starting value of the AD day count: January through March of the anchor year
pub(crate) const AD_ANCHOR_MONTH_OFFSET: i64 = -90;

/// BS month that opens a financial year
pub const FISCAL_START_MONTH: u8 = 4;
/// Months of the previous calendar year that precede the financial year start
pub(crate) const FISCAL_MONTH_SHIFT: u8 = FISCAL_START_MONTH - 1;

/// Average month length used by approximate month differences, in hundredths of a day
pub(crate) const AVERAGE_MONTH_HUNDREDTHS: u32 = 3044;
pub(crate) const DAYS_PER_WEEK: u32 = 7;

/// Default rendering template
pub const DEFAULT_FORMAT: &str = "YYYY-MM-DD";
pub(crate) const YEAR_TOKEN: &str = "YYYY";
pub(crate) const MONTH_TOKEN: &str = "MM";
pub(crate) const DAY_TOKEN: &str = "DD";

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separators that start a time suffix, which is dropped when parsing
pub(crate) const TIME_SEPARATORS: [char; 2] = ['T', ' '];
/// Zone designators for UTC, dropped when parsing
pub(crate) const UTC_DESIGNATORS: [char; 2] = ['Z', 'z'];
/// Length of a `+HH:MM` zone offset
pub(crate) const UTC_OFFSET_LEN: usize = 6;

/// Environment variable consulted first when resolving the time zone
pub const TIME_ZONE_ENV: &str = "TZ";
/// Time zone used when neither the environment nor the host provides one
pub const FALLBACK_TIME_ZONE: &str = "Asia/Kathmandu";
