//! Geographic location used for solar event queries.

use chrono_tz::Tz;
use serde::Deserialize;

/// Geographic coordinates plus the timezone they live in.
///
/// Owned by the caller and passed by reference into [`SunEventCalendar`];
/// immutable for the calendar's lifetime.
///
/// [`SunEventCalendar`]: crate::calendar::SunEventCalendar
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    /// Geographic latitude in degrees (-90 to +90)
    pub latitude: f64,
    /// Geographic longitude in degrees (-180 to +180)
    pub longitude: f64,
    /// The timezone of the coordinates
    pub timezone: Tz,
}
