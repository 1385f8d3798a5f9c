//! # Sunlux
//!
//! Analytic core of an adaptive-lighting control loop: given an instant (and
//! optionally an ambient illuminance reading), compute the brightness
//! percentage and color temperature a lighting controller should apply right
//! now, smoothly and without discontinuities.
//!
//! ## Architecture
//!
//! The library is organized in two layers, the second built on the first:
//!
//! - **Calendar**: [`SunEventCalendar`] reconciles true solar
//!   sunrise/sunset/noon/midnight with user-configured fixed times and
//!   min/max clamps, and exposes a continuous day-position signal in
//!   `[-1, 1]`.
//! - **Engine**: [`LightCurveEngine`] maps the day-position signal (or a lux
//!   reading) into a brightness percentage and a color temperature under a
//!   selectable curve shape, with inversion and sleep overrides.
//!
//! The raw ephemeris is an injected capability: implement [`SolarProvider`]
//! or use the bundled [`HourAngleProvider`]. All configuration is supplied
//! once at construction and every evaluation is a pure function of its
//! inputs, so any number of evaluations may run concurrently.
//!
//! ## Example
//!
//! ```no_run
//! use chrono::Utc;
//! use sunlux::{
//!     CalendarConfig, EngineConfig, HourAngleProvider, LightCurveEngine, Location,
//!     SunEventCalendar,
//! };
//!
//! let location = Location {
//!     latitude: 52.379189,
//!     longitude: 4.899431,
//!     timezone: chrono_tz::Europe::Amsterdam,
//! };
//! let provider = HourAngleProvider;
//! let calendar = SunEventCalendar::new(
//!     CalendarConfig::named("living_room", chrono_tz::Europe::Amsterdam),
//!     &location,
//!     &provider,
//! );
//! let engine = LightCurveEngine::new(EngineConfig::default(), calendar);
//!
//! let brightness = engine.brightness_pct(Utc::now(), false, None)?;
//! let color = engine.color_temp(Utc::now(), false)?;
//! # anyhow::Ok(())
//! ```

pub mod calendar;
pub mod constants;
pub mod engine;
pub mod location;
pub mod solar;

pub use calendar::{CalendarConfig, SunEvent, SunEventCalendar, SunEventKind};
pub use engine::{
    BrightnessMode, ColorSetting, EngineConfig, LightCurveEngine, LuxRange, SleepColorMode,
};
pub use location::Location;
pub use solar::{HourAngleProvider, SolarProvider};
