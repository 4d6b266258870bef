//! The current date as seen from the host.

use std::env;

use jiff::Timestamp;
use jiff::tz::TimeZone;
use log::{debug, warn};

use crate::consts::{FALLBACK_TIME_ZONE, TIME_ZONE_ENV};
use crate::{AdDate, BsDate, CalendarDate, CalendarSystem, DateError, config};

/// Name of the time zone "today" is evaluated in.
///
/// Uses the `TZ` environment variable when set and non-empty, then the host
/// zone, then `Asia/Kathmandu`.
pub fn resolve_time_zone() -> String {
    if let Ok(name) = env::var(TIME_ZONE_ENV) {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_owned();
        }
    }
    match iana_time_zone::get_timezone() {
        Ok(name) => name,
        Err(err) => {
            warn!("could not read the host time zone ({err}), using {FALLBACK_TIME_ZONE}");
            FALLBACK_TIME_ZONE.to_owned()
        },
    }
}

fn lookup_zone(name: &str) -> TimeZone {
    TimeZone::get(name).unwrap_or_else(|err| {
        warn!("unknown time zone {name:?} ({err}), using the system zone");
        TimeZone::system()
    })
}

/// Gregorian date of `timestamp` in the zone named `zone`.
///
/// An unknown zone name falls back to the system zone.
///
/// # Errors
/// Returns a `DateError` when the civil date lies outside years `1..=9999`.
pub fn ad_date_at(timestamp: Timestamp, zone: &str) -> Result<AdDate, DateError> {
    let date = timestamp.to_zoned(lookup_zone(zone)).date();
    debug!("{timestamp} is {date} in {zone}");
    AdDate::try_from(date)
}

/// Today's Gregorian date in the resolved time zone.
///
/// # Errors
/// See [`ad_date_at`].
pub fn todays_ad_date() -> Result<AdDate, DateError> {
    ad_date_at(Timestamp::now(), &resolve_time_zone())
}

/// Today's Bikram Sambat date in the resolved time zone.
///
/// # Errors
/// Fails once today lies past the last tabulated BS year.
pub fn todays_bs_date() -> Result<BsDate, DateError> {
    todays_ad_date()?.to_bs()
}

/// Today's date in `system`, or in the configured calendar system.
///
/// # Errors
/// See [`todays_ad_date`] and [`todays_bs_date`].
pub fn today(system: Option<CalendarSystem>) -> Result<CalendarDate, DateError> {
    match config().calendar_system_or_default(system) {
        CalendarSystem::Ad => todays_ad_date().map(CalendarDate::from),
        CalendarSystem::Bs => todays_bs_date().map(CalendarDate::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::GLOBAL_LOCK;
    use crate::{Config, set_config};
    use std::sync::PoisonError;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_resolve_time_zone_is_never_empty() {
        assert!(!resolve_time_zone().is_empty());
    }

    #[test]
    fn test_ad_date_at_depends_on_zone() {
        struct TestCase {
            timestamp: &'static str,
            zone:      &'static str,
            expected:  &'static str,
        }

        let cases = [
            TestCase {
                timestamp: "2024-11-04T14:12:38.258Z",
                zone:      "Asia/Kathmandu",
                expected:  "2024-11-04",
            },
            TestCase {
                timestamp: "2024-11-04T20:00:00Z",
                zone:      "Asia/Kathmandu",
                expected:  "2024-11-05",
            },
            TestCase {
                timestamp: "2024-11-04T20:00:00Z",
                zone:      "UTC",
                expected:  "2024-11-04",
            },
            TestCase {
                timestamp: "2024-11-04T02:00:00Z",
                zone:      "America/New_York",
                expected:  "2024-11-03",
            },
        ];

        for case in &cases {
            let date = ad_date_at(ts(case.timestamp), case.zone).unwrap();
            assert_eq!(date.to_string(), case.expected, "{} in {}", case.timestamp, case.zone);
        }
    }

    #[test]
    fn test_unknown_zone_falls_back() {
        assert!(ad_date_at(ts("2024-11-04T12:00:00Z"), "Not/AZone").is_ok());
    }

    #[test]
    fn test_kathmandu_evening_maps_to_next_bs_day() {
        let date = ad_date_at(ts("2026-10-16T18:30:00Z"), "Asia/Kathmandu").unwrap();
        assert_eq!(date.to_string(), "2026-10-17");
        assert_eq!(date.to_bs().unwrap().to_string(), "2083-07-01");
    }

    #[test]
    fn test_today_follows_calendar_system() {
        assert!(matches!(today(Some(CalendarSystem::Ad)), Ok(CalendarDate::Ad(_))));
        assert!(matches!(today(Some(CalendarSystem::Bs)), Ok(CalendarDate::Bs(_))));
    }

    #[test]
    fn test_today_reads_configuration() {
        let _guard = GLOBAL_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = config();

        set_config(Config {
            calendar_system: CalendarSystem::Ad,
            ..Config::DEFAULT
        });
        assert_eq!(today(None).unwrap().calendar_system(), CalendarSystem::Ad);
        assert_eq!(
            today(Some(CalendarSystem::Bs)).unwrap().calendar_system(),
            CalendarSystem::Bs
        );

        set_config(saved);
    }
}
