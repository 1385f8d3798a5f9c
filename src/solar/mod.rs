//! Astronomical provider capability.
//!
//! The calendar never computes solar geometry itself; it consumes a
//! [`SolarProvider`] supplied at construction. The bundled
//! [`HourAngleProvider`] adapts the `sunrise` crate's hour-angle solar
//! calculations, while tests substitute deterministic fixtures.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use crate::location::Location;

mod hour_angle;

#[cfg(any(test, feature = "testing-support"))]
pub mod fixtures;

pub use hour_angle::HourAngleProvider;

/// Source of the four canonical solar events for a (location, date) pair.
///
/// Implementations must be total over standard dates and locations and
/// deterministic: repeated queries with identical inputs return identical
/// timestamps. For degenerate locations (polar day/night) an implementation
/// either returns its own well-defined convention or surfaces an error,
/// which the calendar propagates unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait SolarProvider {
    /// Absolute instant of sunrise on the given date.
    fn sunrise(&self, location: &Location, date: NaiveDate) -> Result<DateTime<Utc>>;

    /// Absolute instant of sunset on the given date.
    fn sunset(&self, location: &Location, date: NaiveDate) -> Result<DateTime<Utc>>;

    /// Absolute instant of solar noon (upper transit) on the given date.
    fn solar_noon(&self, location: &Location, date: NaiveDate) -> Result<DateTime<Utc>>;

    /// Absolute instant of solar midnight (lower transit) on the given date.
    fn solar_midnight(&self, location: &Location, date: NaiveDate) -> Result<DateTime<Utc>>;
}
