//! Sun event calendar with fixed-time overrides and clamp bounds.
//!
//! This module reconciles astronomical truth with user configuration. For a
//! given date it produces the four canonical events (sunrise, sunset, solar
//! noon, solar midnight) as absolute timestamps, applying fixed-time
//! overrides and earliest/latest clamp bounds, and exposes a continuous
//! day-position signal derived from them.
//!
//! # Key Insight
//! Events are stored as `DateTime<Tz>` rather than `NaiveTime`, preserving
//! full date and timezone information. Comparisons automatically handle day
//! boundaries, and bracketing an instant near midnight only requires
//! materializing the event window of the adjacent dates.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::constants::{ANCHOR_HORIZON, ANCHOR_MIDNIGHT, ANCHOR_NOON};
use crate::location::Location;
use crate::solar::SolarProvider;

/// The four canonical solar events of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunEventKind {
    Sunrise,
    Sunset,
    Noon,
    Midnight,
}

impl SunEventKind {
    /// Day-position anchor value of this event.
    ///
    /// Sunrise and sunset sit at the horizon (0), noon at +1 and midnight
    /// at -1; the day-position signal interpolates linearly between the
    /// anchors of consecutive events.
    pub fn anchor(&self) -> f64 {
        match self {
            Self::Sunrise | Self::Sunset => ANCHOR_HORIZON,
            Self::Noon => ANCHOR_NOON,
            Self::Midnight => ANCHOR_MIDNIGHT,
        }
    }

    /// Returns true for the horizon crossings (sunrise and sunset).
    pub fn is_horizon_crossing(&self) -> bool {
        matches!(self, Self::Sunrise | Self::Sunset)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::Noon => "noon",
            Self::Midnight => "midnight",
        }
    }
}

/// A solar event pinned to an absolute, zone-aware instant.
///
/// Produced fresh per query; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SunEvent {
    pub kind: SunEventKind,
    pub time: DateTime<Tz>,
}

impl SunEvent {
    /// Unix timestamp of the event in whole seconds.
    pub fn unix_timestamp(&self) -> i64 {
        self.time.timestamp()
    }

    fn timestamp_millis(&self) -> i64 {
        self.time.timestamp_millis()
    }
}

/// User-facing calendar configuration.
///
/// A fixed clock time for sunrise or sunset always wins over astronomy.
/// Without a fixed time, the optional min/max bounds clamp the astronomical
/// event by wall-clock time-of-day in the configured timezone. Each field
/// is independent; absent bound means no clamp.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Name used in diagnostics and log messages
    pub name: String,
    /// Timezone in which fixed times and clamp bounds are interpreted
    pub timezone: Tz,
    /// Fixed sunrise clock time, overriding the astronomical event
    pub sunrise_time: Option<NaiveTime>,
    /// Earliest permissible sunrise clock time
    pub min_sunrise_time: Option<NaiveTime>,
    /// Latest permissible sunrise clock time
    pub max_sunrise_time: Option<NaiveTime>,
    /// Fixed sunset clock time, overriding the astronomical event
    pub sunset_time: Option<NaiveTime>,
    /// Earliest permissible sunset clock time
    pub min_sunset_time: Option<NaiveTime>,
    /// Latest permissible sunset clock time
    pub max_sunset_time: Option<NaiveTime>,
}

impl CalendarConfig {
    /// Configuration with no overrides and no clamps.
    pub fn named(name: impl Into<String>, timezone: Tz) -> Self {
        Self {
            name: name.into(),
            timezone,
            sunrise_time: None,
            min_sunrise_time: None,
            max_sunrise_time: None,
            sunset_time: None,
            min_sunset_time: None,
            max_sunset_time: None,
        }
    }
}

/// Calendar of solar events for one location and configuration.
///
/// Stateless across calls: every query is a pure function of the date or
/// instant, the immutable configuration, and the injected provider.
pub struct SunEventCalendar<'a> {
    config: CalendarConfig,
    location: &'a Location,
    provider: &'a dyn SolarProvider,
}

impl<'a> SunEventCalendar<'a> {
    pub fn new(
        config: CalendarConfig,
        location: &'a Location,
        provider: &'a dyn SolarProvider,
    ) -> Self {
        Self {
            config,
            location,
            provider,
        }
    }

    /// Name of this calendar, for diagnostics.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Configured timezone.
    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }

    /// Combine a calendar date with a wall-clock time in the configured
    /// timezone.
    ///
    /// Total for any valid date/time pair: an ambiguous local time (DST
    /// fold) resolves to the earliest mapping, a nonexistent local time
    /// (DST gap) falls back to interpreting the naive value as UTC.
    pub fn replace_time(&self, date: NaiveDate, clock_time: NaiveTime) -> DateTime<Tz> {
        let naive = date.and_time(clock_time);
        match self.config.timezone.from_local_datetime(&naive) {
            chrono::LocalResult::Single(dt) => dt,
            chrono::LocalResult::Ambiguous(earliest, _) => earliest,
            chrono::LocalResult::None => self.config.timezone.from_utc_datetime(&naive),
        }
    }

    /// Sunrise for the given date, honoring the fixed-time override and the
    /// min/max clamp bounds.
    pub fn sunrise(&self, date: NaiveDate) -> Result<DateTime<Tz>> {
        if let Some(fixed) = self.config.sunrise_time {
            return Ok(self.replace_time(date, fixed));
        }
        let event = self
            .provider
            .sunrise(self.location, date)
            .with_context(|| format!("{}: sunrise unavailable for {date}", self.config.name))?
            .with_timezone(&self.config.timezone);
        Ok(self.clamp_event(
            "sunrise",
            event,
            self.config.min_sunrise_time,
            self.config.max_sunrise_time,
        ))
    }

    /// Sunset for the given date, honoring the fixed-time override and the
    /// min/max clamp bounds.
    pub fn sunset(&self, date: NaiveDate) -> Result<DateTime<Tz>> {
        if let Some(fixed) = self.config.sunset_time {
            return Ok(self.replace_time(date, fixed));
        }
        let event = self
            .provider
            .sunset(self.location, date)
            .with_context(|| format!("{}: sunset unavailable for {date}", self.config.name))?
            .with_timezone(&self.config.timezone);
        Ok(self.clamp_event(
            "sunset",
            event,
            self.config.min_sunset_time,
            self.config.max_sunset_time,
        ))
    }

    /// Solar noon and solar midnight for the given date.
    ///
    /// Always delegates to the provider; transits have no fixed-time or
    /// clamp concept.
    pub fn noon_and_midnight(&self, date: NaiveDate) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
        let noon = self
            .provider
            .solar_noon(self.location, date)
            .with_context(|| format!("{}: solar noon unavailable for {date}", self.config.name))?
            .with_timezone(&self.config.timezone);
        let midnight = self
            .provider
            .solar_midnight(self.location, date)
            .with_context(|| {
                format!("{}: solar midnight unavailable for {date}", self.config.name)
            })?
            .with_timezone(&self.config.timezone);
        Ok((noon, midnight))
    }

    /// The four canonical events for the given date.
    pub fn sun_events(&self, date: NaiveDate) -> Result<Vec<SunEvent>> {
        let (noon, midnight) = self.noon_and_midnight(date)?;
        Ok(vec![
            SunEvent {
                kind: SunEventKind::Sunrise,
                time: self.sunrise(date)?,
            },
            SunEvent {
                kind: SunEventKind::Sunset,
                time: self.sunset(date)?,
            },
            SunEvent {
                kind: SunEventKind::Noon,
                time: noon,
            },
            SunEvent {
                kind: SunEventKind::Midnight,
                time: midnight,
            },
        ])
    }

    /// The tightest pair of events bracketing `instant`, with
    /// `prev.time <= instant < next.time`.
    ///
    /// The window is materialized from the instant's date plus both
    /// adjacent dates, so instants near a date boundary bracket correctly
    /// without wrap-around special cases. An instant coinciding exactly
    /// with an event makes that event `prev`.
    pub fn prev_and_next_events(&self, instant: DateTime<Utc>) -> Result<(SunEvent, SunEvent)> {
        let events = self.event_window(instant)?;
        let instant_ms = instant.timestamp_millis();
        let idx = events.partition_point(|event| event.timestamp_millis() <= instant_ms);
        if idx == 0 || idx == events.len() {
            bail!(
                "{}: no bracketing events around {instant} (provider window degenerate)",
                self.config.name
            );
        }
        Ok((events[idx - 1].clone(), events[idx].clone()))
    }

    /// Whichever of the bracketing events is nearest to `instant`, ties
    /// broken toward the earlier event.
    pub fn closest_event(&self, instant: DateTime<Utc>) -> Result<SunEvent> {
        let (prev, next) = self.prev_and_next_events(instant)?;
        let instant_ms = instant.timestamp_millis();
        let to_prev = instant_ms - prev.timestamp_millis();
        let to_next = next.timestamp_millis() - instant_ms;
        Ok(if to_prev <= to_next { prev } else { next })
    }

    /// Continuous day-position signal in `[-1, 1]`.
    ///
    /// Exactly 0 at sunrise and sunset, +1 at solar noon, -1 at solar
    /// midnight; linear in elapsed time between consecutive events. The
    /// linear shape keeps the signal monotone between anchors, which is
    /// what makes downstream lighting transitions predictable.
    pub fn day_position(&self, instant: DateTime<Utc>) -> Result<f64> {
        let (prev, next) = self.prev_and_next_events(instant)?;
        let span = next.timestamp_millis() - prev.timestamp_millis();
        if span == 0 {
            return Ok(prev.kind.anchor());
        }
        let elapsed = instant.timestamp_millis() - prev.timestamp_millis();
        let fraction = elapsed as f64 / span as f64;
        let from = prev.kind.anchor();
        let to = next.kind.anchor();
        Ok(from + (to - from) * fraction)
    }

    /// Sorted events for the instant's date and both adjacent dates.
    fn event_window(&self, instant: DateTime<Utc>) -> Result<Vec<SunEvent>> {
        let date = instant.with_timezone(&self.config.timezone).date_naive();
        let mut events = Vec::with_capacity(12);
        for offset in -1..=1 {
            events.extend(self.sun_events(date + Duration::days(offset))?);
        }
        events.sort_by_key(SunEvent::timestamp_millis);
        Ok(events)
    }

    fn clamp_event(
        &self,
        label: &str,
        event: DateTime<Tz>,
        earliest: Option<NaiveTime>,
        latest: Option<NaiveTime>,
    ) -> DateTime<Tz> {
        // Bounds compare wall-clock time-of-day in the configured timezone,
        // not absolute duration.
        let mut clamped = event;
        if let Some(min) = earliest
            && clamped.time() < min
        {
            clamped = self.replace_time(clamped.date_naive(), min);
            log::debug!(
                "{}: {label} {} clamped to earliest bound {min}",
                self.config.name,
                event.time()
            );
        }
        if let Some(max) = latest
            && clamped.time() > max
        {
            clamped = self.replace_time(clamped.date_naive(), max);
            log::debug!(
                "{}: {label} {} clamped to latest bound {max}",
                self.config.name,
                event.time()
            );
        }
        clamped
    }
}
