//! Calendar defaults and the process-wide configuration.
//!
//! Every core function takes its [`AccountingYearType`] explicitly. The
//! global [`Config`] only backs the string-level helpers in the crate root,
//! which accept `Option` overrides and fall back to the value stored here at
//! call time.

use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::DateError;

/// Which twelve months make up an accounting year.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountingYearType {
    /// Months 1-12 of a BS year.
    #[default]
    Calendar,
    /// Months 4-12 of a BS year followed by months 1-3 of the next.
    Financial,
}

impl AccountingYearType {
    const EXPECTED: &'static str = "calendar, financial";

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Financial => "financial",
        }
    }
}

impl fmt::Display for AccountingYearType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountingYearType {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "calendar" => Ok(Self::Calendar),
            "financial" => Ok(Self::Financial),
            other => Err(DateError::InvalidValue {
                field:    "accounting year type",
                value:    other.to_owned(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Calendar system used for calendar-agnostic output such as "today".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarSystem {
    /// Gregorian.
    Ad,
    /// Bikram Sambat.
    #[default]
    Bs,
}

impl CalendarSystem {
    const EXPECTED: &'static str = "ad, bs";

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ad => "ad",
            Self::Bs => "bs",
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarSystem {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ad" => Ok(Self::Ad),
            "bs" => Ok(Self::Bs),
            other => Err(DateError::InvalidValue {
                field:    "calendar system",
                value:    other.to_owned(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

/// Defaults used when a caller does not pass an explicit override.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub accounting_year_type: AccountingYearType,
    pub calendar_system:      CalendarSystem,
}

impl Config {
    /// Calendar accounting years, BS output.
    pub const DEFAULT: Self = Self {
        accounting_year_type: AccountingYearType::Calendar,
        calendar_system:      CalendarSystem::Bs,
    };

    /// Returns `year_type`, or this configuration's default when absent.
    pub fn year_type_or_default(
        &self,
        year_type: Option<AccountingYearType>,
    ) -> AccountingYearType {
        year_type.unwrap_or(self.accounting_year_type)
    }

    /// Returns `system`, or this configuration's default when absent.
    pub fn calendar_system_or_default(&self, system: Option<CalendarSystem>) -> CalendarSystem {
        system.unwrap_or(self.calendar_system)
    }
}

static GLOBAL: RwLock<Config> = RwLock::new(Config::DEFAULT);

/// Current process-wide configuration.
pub fn config() -> Config {
    *GLOBAL.read().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the process-wide configuration.
pub fn set_config(config: Config) {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = config;
}

/// Sets the default accounting year type from its name.
///
/// # Errors
/// Returns `DateError::InvalidValue` for anything but `calendar` or
/// `financial`; the configuration is left unchanged.
pub fn set_accounting_year_type(value: &str) -> Result<(), DateError> {
    let year_type = value.parse::<AccountingYearType>()?;
    GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .accounting_year_type = year_type;
    Ok(())
}

/// Sets the default calendar system from its name.
///
/// # Errors
/// Returns `DateError::InvalidValue` for anything but `ad` or `bs`; the
/// configuration is left unchanged.
pub fn set_calendar_system(value: &str) -> Result<(), DateError> {
    let system = value.parse::<CalendarSystem>()?;
    GLOBAL.write().unwrap_or_else(PoisonError::into_inner).calendar_system = system;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::sync::Mutex;

    /// Serializes tests that touch the process-wide configuration.
    pub(crate) static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_parse_accounting_year_type() {
        assert_eq!(
            "calendar".parse::<AccountingYearType>().unwrap(),
            AccountingYearType::Calendar
        );
        assert_eq!(
            " financial ".parse::<AccountingYearType>().unwrap(),
            AccountingYearType::Financial
        );
        let err = "fiscal".parse::<AccountingYearType>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert!(err.to_string().contains("calendar, financial"));
    }

    #[test]
    fn test_parse_calendar_system() {
        assert_eq!("ad".parse::<CalendarSystem>().unwrap(), CalendarSystem::Ad);
        assert_eq!("bs".parse::<CalendarSystem>().unwrap(), CalendarSystem::Bs);
        assert!("AD".parse::<CalendarSystem>().is_err());
    }

    #[test]
    fn test_display_round_trips_parse() {
        for year_type in [AccountingYearType::Calendar, AccountingYearType::Financial] {
            assert_eq!(year_type.to_string().parse::<AccountingYearType>().unwrap(), year_type);
        }
        for system in [CalendarSystem::Ad, CalendarSystem::Bs] {
            assert_eq!(system.to_string().parse::<CalendarSystem>().unwrap(), system);
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Config::default(), Config::DEFAULT);
        let config = Config::DEFAULT;
        assert_eq!(config.year_type_or_default(None), AccountingYearType::Calendar);
        assert_eq!(
            config.year_type_or_default(Some(AccountingYearType::Financial)),
            AccountingYearType::Financial
        );
        assert_eq!(config.calendar_system_or_default(None), CalendarSystem::Bs);
    }

    #[test]
    fn test_setters_validate_and_keep_previous_value() {
        let _guard = GLOBAL_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = config();

        set_accounting_year_type("financial").unwrap();
        set_calendar_system("ad").unwrap();
        assert_eq!(config().accounting_year_type, AccountingYearType::Financial);
        assert_eq!(config().calendar_system, CalendarSystem::Ad);

        assert!(set_accounting_year_type("quarterly").is_err());
        assert!(set_calendar_system("nepali").is_err());
        assert_eq!(config().accounting_year_type, AccountingYearType::Financial);
        assert_eq!(config().calendar_system, CalendarSystem::Ad);

        set_config(saved);
        assert_eq!(config(), saved);
    }

    #[test]
    fn test_config_serde() {
        let config = Config {
            accounting_year_type: AccountingYearType::Financial,
            calendar_system:      CalendarSystem::Ad,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"accountingYearType":"financial","calendarSystem":"ad"}"#);

        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let partial: Config = serde_json::from_str(r#"{"calendarSystem":"ad"}"#).unwrap();
        assert_eq!(partial.accounting_year_type, AccountingYearType::Calendar);
    }
}
