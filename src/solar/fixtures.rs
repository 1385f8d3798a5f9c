//! Deterministic solar fixtures for tests.
//!
//! Real solar geometry makes expected values drift with the date and the
//! coordinates, so the test suites pin the four events to configurable
//! wall-clock times instead. Enabled through the `testing-support` feature
//! for integration tests, mirroring how unit tests use it directly.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::SolarProvider;
use crate::location::Location;

/// Provider that reports the same wall-clock event times every day.
///
/// Coordinates are ignored; only the fixture's timezone matters. Event
/// times resolve on the queried date in that timezone, so DST shifts are
/// still exercised by tests that want them.
#[derive(Debug, Clone)]
pub struct FixedSolarProvider {
    pub timezone: Tz,
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
    pub noon: NaiveTime,
    pub midnight: NaiveTime,
}

impl FixedSolarProvider {
    /// Fixture with sunrise 06:00, noon 12:00, sunset 18:00 and midnight
    /// 00:00 in the given timezone.
    pub fn symmetric(timezone: Tz) -> Self {
        Self {
            timezone,
            sunrise: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            sunset: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            noon: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            midnight: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        }
    }

    fn at(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let naive = date.and_time(time);
        let zoned = match self.timezone.from_local_datetime(&naive) {
            chrono::LocalResult::Single(dt) => dt,
            chrono::LocalResult::Ambiguous(earliest, _) => earliest,
            chrono::LocalResult::None => self.timezone.from_utc_datetime(&naive),
        };
        zoned.with_timezone(&Utc)
    }
}

impl SolarProvider for FixedSolarProvider {
    fn sunrise(&self, _location: &Location, date: NaiveDate) -> Result<DateTime<Utc>> {
        Ok(self.at(date, self.sunrise))
    }

    fn sunset(&self, _location: &Location, date: NaiveDate) -> Result<DateTime<Utc>> {
        Ok(self.at(date, self.sunset))
    }

    fn solar_noon(&self, _location: &Location, date: NaiveDate) -> Result<DateTime<Utc>> {
        Ok(self.at(date, self.noon))
    }

    fn solar_midnight(&self, _location: &Location, date: NaiveDate) -> Result<DateTime<Utc>> {
        Ok(self.at(date, self.midnight))
    }
}
