//! Brightness and color-temperature derivation engine.
//!
//! [`LightCurveEngine`] turns the calendar's day-position signal, or an
//! ambient illuminance reading, into the brightness percentage and color
//! temperature a lighting controller should apply. Three curve shapes are
//! supported for brightness, plus inversion and an unconditional sleep
//! override.
//!
//! Precedence for brightness is fixed: sleep beats everything, a lux
//! reading (when a sensor is configured) beats the sun, and the sun-driven
//! curve is the fallback. Every output is clamped into its configured
//! range before returning.

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::time::Duration as StdDuration;

use crate::calendar::{SunEvent, SunEventCalendar, SunEventKind};
use crate::constants::KELVIN_STEP;

pub mod curve;

use curve::{lerp_clamped, linear_ramp, rescale_position, round_to_step, tanh_ramp};

/// Curve shape used to derive brightness from the sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrightnessMode {
    /// Affine rescaling of the day position: max at noon, min at midnight,
    /// the range midpoint at sunrise and sunset.
    Default,
    /// Proportional ramp through the transition window around
    /// sunrise/sunset, saturating at the window edges.
    Linear,
    /// Same ramp shaped through a hyperbolic tangent for a softer approach
    /// to the day/night asymptotes.
    Tanh,
}

/// Which representation sleep mode uses for color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepColorMode {
    ColorTemp,
    RgbColor,
}

/// Calibrated bounds of an ambient-light sensor, in lux.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LuxRange {
    pub min: f64,
    pub max: f64,
}

/// A color target for the controller, matched exhaustively downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSetting {
    /// Color temperature in Kelvin
    Kelvin(f64),
    /// RGB triple, used by sleep mode when so configured
    Rgb([u8; 3]),
}

/// Immutable engine configuration.
///
/// Supplied once at construction; every evaluation method is a pure
/// function of (instant, sleep flag, optional lux reading) over these
/// values. Invariants (`min <= max` per dimension, `lux.min < lux.max`)
/// are a construction-time concern of the configuration-loading layer;
/// [`EngineConfig::validate`] is provided for it but is not invoked on the
/// evaluation path.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Lowest brightness the engine may emit, in percent
    pub min_brightness: f64,
    /// Highest brightness the engine may emit, in percent
    pub max_brightness: f64,
    /// Warmest color temperature, in Kelvin
    pub min_color_temp: f64,
    /// Coolest color temperature, in Kelvin
    pub max_color_temp: f64,
    /// Brightness returned verbatim while sleep mode is active
    pub sleep_brightness: f64,
    /// Color temperature used by sleep mode under [`SleepColorMode::ColorTemp`]
    pub sleep_color_temp: f64,
    /// RGB color used by sleep mode under [`SleepColorMode::RgbColor`]
    pub sleep_rgb_color: [u8; 3],
    /// Which of the two sleep color representations applies
    pub sleep_color_mode: SleepColorMode,
    /// Curve shape for sun-driven brightness
    pub brightness_mode: BrightnessMode,
    /// Reflect sun/lux-derived brightness about the range midpoint
    pub invert_brightness: bool,
    /// Ambient-light sensor bounds; `None` means no sensor is configured
    /// and any supplied reading is ignored
    pub lux_range: Option<LuxRange>,
    /// Transition half-width while the sun is up (linear/tanh modes)
    pub transition_time_light: StdDuration,
    /// Transition half-width while the sun is down (linear/tanh modes)
    pub transition_time_dark: StdDuration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_brightness: 1.0,
            max_brightness: 100.0,
            min_color_temp: 2000.0,
            max_color_temp: 5500.0,
            sleep_brightness: 1.0,
            sleep_color_temp: 1000.0,
            sleep_rgb_color: [255, 56, 0],
            sleep_color_mode: SleepColorMode::ColorTemp,
            brightness_mode: BrightnessMode::Default,
            invert_brightness: false,
            lux_range: None,
            transition_time_light: StdDuration::from_secs(3600),
            transition_time_dark: StdDuration::from_secs(900),
        }
    }
}

impl EngineConfig {
    /// Invariant checks for the configuration-loading layer.
    pub fn validate(&self) -> Result<()> {
        if self.min_brightness > self.max_brightness {
            bail!(
                "min_brightness ({}) must not exceed max_brightness ({})",
                self.min_brightness,
                self.max_brightness
            );
        }
        if !(0.0..=100.0).contains(&self.min_brightness)
            || !(0.0..=100.0).contains(&self.max_brightness)
        {
            bail!("brightness bounds must be percentages between 0 and 100");
        }
        if self.min_color_temp > self.max_color_temp {
            bail!(
                "min_color_temp ({} K) must not exceed max_color_temp ({} K)",
                self.min_color_temp,
                self.max_color_temp
            );
        }
        if self.min_color_temp <= 0.0 {
            bail!(
                "min_color_temp ({} K) must be positive",
                self.min_color_temp
            );
        }
        if let Some(range) = self.lux_range
            && range.min >= range.max
        {
            bail!(
                "lux range minimum ({}) must be below its maximum ({})",
                range.min,
                range.max
            );
        }
        if !(0.0..=100.0).contains(&self.sleep_brightness) {
            bail!(
                "sleep_brightness ({}) must be a percentage between 0 and 100",
                self.sleep_brightness
            );
        }
        Ok(())
    }
}

/// Maps time (or illuminance) onto light settings for one configuration.
pub struct LightCurveEngine<'a> {
    config: EngineConfig,
    calendar: SunEventCalendar<'a>,
}

impl<'a> LightCurveEngine<'a> {
    pub fn new(config: EngineConfig, calendar: SunEventCalendar<'a>) -> Self {
        Self { config, calendar }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn calendar(&self) -> &SunEventCalendar<'a> {
        &self.calendar
    }

    /// Target brightness percentage for `instant`.
    ///
    /// Sleep mode returns the configured sleep brightness verbatim and
    /// unconditionally. Otherwise a lux reading drives the output whenever
    /// a sensor is configured; without one the sun-driven curve applies.
    /// The result is clamped into `[min_brightness, max_brightness]`.
    pub fn brightness_pct(
        &self,
        instant: DateTime<Utc>,
        is_sleep: bool,
        lux_reading: Option<f64>,
    ) -> Result<f64> {
        if is_sleep {
            return Ok(self.config.sleep_brightness);
        }
        if let (Some(range), Some(reading)) = (self.config.lux_range, lux_reading) {
            return Ok(self.brightness_from_lux(range, reading));
        }
        let raw = match self.config.brightness_mode {
            BrightnessMode::Default => rescale_position(
                self.calendar.day_position(instant)?,
                self.config.min_brightness,
                self.config.max_brightness,
            ),
            BrightnessMode::Linear => self.ramped_brightness(instant, linear_ramp)?,
            BrightnessMode::Tanh => self.ramped_brightness(instant, tanh_ramp)?,
        };
        let value = if self.config.invert_brightness {
            // Reflect about the range midpoint, so normal and inverted
            // outputs always sum to min + max.
            self.config.min_brightness + self.config.max_brightness - raw
        } else {
            raw
        };
        Ok(value.clamp(self.config.min_brightness, self.config.max_brightness))
    }

    /// Target color for `instant`.
    ///
    /// Sleep mode returns the configured sleep representation; otherwise
    /// the day position maps affinely onto the color-temperature range,
    /// warm at solar midnight and cool at solar noon, independent of the
    /// brightness curve mode.
    pub fn color_temp(&self, instant: DateTime<Utc>, is_sleep: bool) -> Result<ColorSetting> {
        if is_sleep {
            return Ok(match self.config.sleep_color_mode {
                SleepColorMode::ColorTemp => ColorSetting::Kelvin(self.config.sleep_color_temp),
                SleepColorMode::RgbColor => ColorSetting::Rgb(self.config.sleep_rgb_color),
            });
        }
        let position = self.calendar.day_position(instant)?;
        let kelvin = rescale_position(
            position,
            self.config.min_color_temp,
            self.config.max_color_temp,
        )
        .clamp(self.config.min_color_temp, self.config.max_color_temp);
        Ok(ColorSetting::Kelvin(kelvin))
    }

    /// Color temperature derived from an illuminance reading.
    ///
    /// The reading is clamped into the sensor bounds and mapped linearly,
    /// warm at the dark end and cool at the bright end, then rounded to the
    /// nearest 5 K for the downstream light drivers. Returns `None` when no
    /// sensor is configured.
    pub fn color_temp_from_lux(&self, lux_reading: f64) -> Option<f64> {
        let range = self.config.lux_range?;
        let kelvin = lerp_clamped(
            lux_reading,
            range.min,
            range.max,
            self.config.min_color_temp,
            self.config.max_color_temp,
        );
        Some(round_to_step(kelvin, KELVIN_STEP))
    }

    /// Illuminance and brightness move oppositely: the brighter the room,
    /// the less the electric light contributes. Inversion swaps the two
    /// endpoint targets instead of reflecting afterwards, so the same
    /// clamped-then-linear mapping applies either way.
    fn brightness_from_lux(&self, range: LuxRange, reading: f64) -> f64 {
        let (dark_target, bright_target) = if self.config.invert_brightness {
            (self.config.min_brightness, self.config.max_brightness)
        } else {
            (self.config.max_brightness, self.config.min_brightness)
        };
        lerp_clamped(reading, range.min, range.max, dark_target, bright_target)
            .clamp(self.config.min_brightness, self.config.max_brightness)
    }

    /// Transition ramp centered on the nearest sunrise/sunset crossover.
    ///
    /// Elapsed time since the crossover is signed toward the day side, then
    /// divided by the light window (sun up) or dark window (sun down). At
    /// the crossover itself the shaped value is exactly the midpoint of the
    /// configured range, which the inversion sum invariant depends on.
    fn ramped_brightness(&self, instant: DateTime<Utc>, ramp: fn(f64) -> f64) -> Result<f64> {
        let crossing = self.closest_horizon_crossing(instant)?;
        let elapsed_secs =
            (instant.timestamp_millis() - crossing.time.timestamp_millis()) as f64 / 1000.0;
        let day_side_secs = match crossing.kind {
            SunEventKind::Sunrise => elapsed_secs,
            SunEventKind::Sunset => -elapsed_secs,
            SunEventKind::Noon | SunEventKind::Midnight => {
                unreachable!("closest_horizon_crossing only yields horizon events")
            }
        };
        let window_secs = if day_side_secs >= 0.0 {
            self.config.transition_time_light.as_secs_f64()
        } else {
            self.config.transition_time_dark.as_secs_f64()
        };
        let shaped = if day_side_secs == 0.0 {
            0.0
        } else if window_secs <= 0.0 {
            if day_side_secs > 0.0 { 1.0 } else { -1.0 }
        } else {
            ramp(day_side_secs / window_secs)
        };
        Ok(rescale_position(
            shaped,
            self.config.min_brightness,
            self.config.max_brightness,
        ))
    }

    /// Nearest sunrise or sunset across the instant's date and both
    /// adjacent dates.
    fn closest_horizon_crossing(&self, instant: DateTime<Utc>) -> Result<SunEvent> {
        let date = instant
            .with_timezone(&self.calendar.timezone())
            .date_naive();
        let instant_ms = instant.timestamp_millis();
        let mut best: Option<(i64, SunEvent)> = None;
        for offset in -1..=1 {
            for event in self.calendar.sun_events(date + Duration::days(offset))? {
                if !event.kind.is_horizon_crossing() {
                    continue;
                }
                let distance = (event.time.timestamp_millis() - instant_ms).abs();
                if best.as_ref().map_or(true, |(closest, _)| distance < *closest) {
                    best = Some((distance, event));
                }
            }
        }
        best.map(|(_, event)| event).ok_or_else(|| {
            anyhow!(
                "{}: no horizon crossings available around {instant}",
                self.calendar.name()
            )
        })
    }
}
