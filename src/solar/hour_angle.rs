//! Default solar provider backed by the `sunrise` crate.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use super::SolarProvider;
use crate::location::Location;

/// Hour-angle solar geometry via the `sunrise` crate.
///
/// Sunrise and sunset come straight from the crate; solar noon is the
/// midpoint of the two horizon crossings and solar midnight precedes noon
/// by twelve hours. On polar dates where the sun never crosses the horizon
/// the crate collapses both events toward the transit, so noon and midnight
/// remain well-defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct HourAngleProvider;

impl HourAngleProvider {
    fn solar_day(&self, location: &Location, date: NaiveDate) -> Result<SolarDay> {
        let coord = Coordinates::new(location.latitude, location.longitude).ok_or_else(|| {
            anyhow!(
                "invalid coordinates: lat={:.4}, lon={:.4}",
                location.latitude,
                location.longitude
            )
        })?;
        Ok(SolarDay::new(coord, date))
    }
}

impl SolarProvider for HourAngleProvider {
    fn sunrise(&self, location: &Location, date: NaiveDate) -> Result<DateTime<Utc>> {
        let solar_day = self.solar_day(location, date)?;
        Ok(solar_day.event_time(SolarEvent::Sunrise))
    }

    fn sunset(&self, location: &Location, date: NaiveDate) -> Result<DateTime<Utc>> {
        let solar_day = self.solar_day(location, date)?;
        Ok(solar_day.event_time(SolarEvent::Sunset))
    }

    fn solar_noon(&self, location: &Location, date: NaiveDate) -> Result<DateTime<Utc>> {
        let solar_day = self.solar_day(location, date)?;
        let sunrise = solar_day.event_time(SolarEvent::Sunrise);
        let sunset = solar_day.event_time(SolarEvent::Sunset);
        let mid_ms = (sunrise.timestamp_millis() + sunset.timestamp_millis()) / 2;
        DateTime::<Utc>::from_timestamp_millis(mid_ms)
            .ok_or_else(|| anyhow!("solar noon out of representable range for {date}"))
    }

    fn solar_midnight(&self, location: &Location, date: NaiveDate) -> Result<DateTime<Utc>> {
        let noon = self.solar_noon(location, date)?;
        Ok(noon - Duration::hours(12))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn amsterdam() -> Location {
        Location {
            latitude: 52.379189,
            longitude: 4.899431,
            timezone: Tz::Europe__Amsterdam,
        }
    }

    #[test]
    fn sunrise_precedes_sunset_at_mid_latitude() {
        let provider = HourAngleProvider;
        let location = amsterdam();
        let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();

        let sunrise = provider.sunrise(&location, date).unwrap();
        let sunset = provider.sunset(&location, date).unwrap();
        assert!(sunrise < sunset);
    }

    #[test]
    fn noon_is_midpoint_and_midnight_precedes_by_half_day() {
        let provider = HourAngleProvider;
        let location = amsterdam();
        let date = NaiveDate::from_ymd_opt(2022, 6, 21).unwrap();

        let sunrise = provider.sunrise(&location, date).unwrap();
        let sunset = provider.sunset(&location, date).unwrap();
        let noon = provider.solar_noon(&location, date).unwrap();
        let midnight = provider.solar_midnight(&location, date).unwrap();

        assert!(sunrise < noon && noon < sunset);
        assert_eq!(noon - midnight, Duration::hours(12));
    }

    #[test]
    fn invalid_coordinates_are_rejected() {
        let provider = HourAngleProvider;
        let location = Location {
            latitude: 120.0,
            longitude: 0.0,
            timezone: Tz::UTC,
        };
        let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();

        assert!(provider.sunrise(&location, date).is_err());
    }

    #[test]
    fn results_are_deterministic() {
        let provider = HourAngleProvider;
        let location = amsterdam();
        let date = NaiveDate::from_ymd_opt(2022, 3, 15).unwrap();

        let a = provider.sunrise(&location, date).unwrap();
        let b = provider.sunrise(&location, date).unwrap();
        assert_eq!(a, b);
    }
}
