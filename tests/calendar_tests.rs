use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use sunlux::solar::fixtures::FixedSolarProvider;
use sunlux::{
    CalendarConfig, HourAngleProvider, Location, SolarProvider, SunEventCalendar, SunEventKind,
};

// Timezones exercised by every fixture test: a positive UTC offset, a
// negative one, and UTC itself under two names.
const TIMEZONES: [Tz; 4] = [Tz::Europe__Amsterdam, Tz::US__Pacific, Tz::GMT, Tz::UTC];

fn location(timezone: Tz) -> Location {
    Location {
        latitude: 52.379189,
        longitude: 4.899431,
        timezone,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn replace_time_preserves_wall_clock_in_every_timezone() {
    for tz in TIMEZONES {
        let loc = location(tz);
        let provider = FixedSolarProvider::symmetric(tz);
        let calendar = SunEventCalendar::new(CalendarConfig::named("test", tz), &loc, &provider);

        let replaced = calendar.replace_time(date(2022, 1, 1), time(5, 30));
        assert_eq!(replaced.time(), time(5, 30), "timezone {tz}");
        assert_eq!(replaced.timezone(), tz);
    }
}

#[test]
fn sunrise_without_override_matches_the_provider() {
    for tz in TIMEZONES {
        let loc = location(tz);
        let provider = FixedSolarProvider::symmetric(tz);
        let calendar = SunEventCalendar::new(CalendarConfig::named("test", tz), &loc, &provider);

        let day = date(2022, 1, 1);
        let expected = provider.sunrise(&loc, day).unwrap();
        let actual = calendar.sunrise(day).unwrap();
        assert_eq!(actual.with_timezone(&Utc), expected, "timezone {tz}");
    }
}

#[test]
fn day_position_anchors_without_fixed_times() {
    for tz in TIMEZONES {
        let loc = location(tz);
        let provider = FixedSolarProvider::symmetric(tz);
        let calendar = SunEventCalendar::new(CalendarConfig::named("test", tz), &loc, &provider);
        let day = date(2022, 1, 1);

        let sunrise = calendar.sunrise(day).unwrap().with_timezone(&Utc);
        let sunset = calendar.sunset(day).unwrap().with_timezone(&Utc);
        let (noon, midnight) = calendar.noon_and_midnight(day).unwrap();

        assert_eq!(calendar.day_position(sunrise).unwrap(), 0.0, "timezone {tz}");
        assert_eq!(calendar.day_position(sunset).unwrap(), 0.0, "timezone {tz}");
        assert_eq!(
            calendar.day_position(noon.with_timezone(&Utc)).unwrap(),
            1.0,
            "timezone {tz}"
        );
        assert_eq!(
            calendar.day_position(midnight.with_timezone(&Utc)).unwrap(),
            -1.0,
            "timezone {tz}"
        );
    }
}

#[test]
fn day_position_anchors_with_fixed_sunrise_and_sunset() {
    for tz in TIMEZONES {
        let loc = location(tz);
        let provider = FixedSolarProvider::symmetric(tz);
        let mut config = CalendarConfig::named("test", tz);
        config.sunrise_time = Some(time(7, 0));
        config.sunset_time = Some(time(17, 0));
        let calendar = SunEventCalendar::new(config, &loc, &provider);
        let day = date(2022, 1, 1);

        let sunrise = calendar.sunrise(day).unwrap().with_timezone(&Utc);
        let sunset = calendar.sunset(day).unwrap().with_timezone(&Utc);
        let (noon, midnight) = calendar.noon_and_midnight(day).unwrap();

        assert_eq!(sunrise.with_timezone(&tz).time(), time(7, 0));
        assert_eq!(sunset.with_timezone(&tz).time(), time(17, 0));
        assert_eq!(calendar.day_position(sunrise).unwrap(), 0.0, "timezone {tz}");
        assert_eq!(calendar.day_position(sunset).unwrap(), 0.0, "timezone {tz}");
        assert_eq!(
            calendar.day_position(noon.with_timezone(&Utc)).unwrap(),
            1.0
        );
        assert_eq!(
            calendar.day_position(midnight.with_timezone(&Utc)).unwrap(),
            -1.0
        );
    }
}

#[test]
fn sun_events_has_four_distinct_kinds_with_provider_timestamps() {
    for tz in TIMEZONES {
        let loc = location(tz);
        let provider = FixedSolarProvider::symmetric(tz);
        let calendar = SunEventCalendar::new(CalendarConfig::named("test", tz), &loc, &provider);

        let day = date(2022, 1, 1);
        let events = calendar.sun_events(day).unwrap();
        assert_eq!(events.len(), 4);

        let expected_sunrise = provider.sunrise(&loc, day).unwrap().timestamp();
        assert!(
            events
                .iter()
                .any(|e| e.kind == SunEventKind::Sunrise && e.unix_timestamp() == expected_sunrise)
        );

        let mut kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        kinds.sort_by_key(|k| k.as_str());
        kinds.dedup();
        assert_eq!(kinds.len(), 4, "timezone {tz}");
    }
}

#[test]
fn one_hour_after_sunrise_brackets_sunrise_and_noon() {
    for tz in TIMEZONES {
        let loc = location(tz);
        let provider = FixedSolarProvider::symmetric(tz);
        let calendar = SunEventCalendar::new(CalendarConfig::named("test", tz), &loc, &provider);

        let sunrise = calendar.sunrise(date(2022, 1, 1)).unwrap();
        let instant = (sunrise + Duration::hours(1)).with_timezone(&Utc);
        let (prev, next) = calendar.prev_and_next_events(instant).unwrap();
        assert_eq!(prev.kind, SunEventKind::Sunrise, "timezone {tz}");
        assert_eq!(next.kind, SunEventKind::Noon, "timezone {tz}");
    }
}

#[test]
fn closest_event_at_sunrise_is_sunrise_itself() {
    for tz in TIMEZONES {
        let loc = location(tz);
        let provider = FixedSolarProvider::symmetric(tz);
        let calendar = SunEventCalendar::new(CalendarConfig::named("test", tz), &loc, &provider);

        let sunrise = calendar.sunrise(date(2022, 1, 1)).unwrap();
        let closest = calendar.closest_event(sunrise.with_timezone(&Utc)).unwrap();
        assert_eq!(closest.kind, SunEventKind::Sunrise);
        assert_eq!(closest.time, sunrise);
        assert_eq!(closest.unix_timestamp(), sunrise.timestamp());
    }
}

#[test]
fn bracketing_works_across_the_date_boundary() {
    let tz = Tz::UTC;
    let loc = location(tz);
    let provider = FixedSolarProvider::symmetric(tz);
    let calendar = SunEventCalendar::new(CalendarConfig::named("test", tz), &loc, &provider);

    // 23:00 sits between today's sunset (18:00) and tomorrow's solar
    // midnight (00:00)
    let instant = date(2022, 1, 1)
        .and_time(time(23, 0))
        .and_utc();
    let (prev, next) = calendar.prev_and_next_events(instant).unwrap();
    assert_eq!(prev.kind, SunEventKind::Sunset);
    assert_eq!(next.kind, SunEventKind::Midnight);
    assert_eq!(next.time.date_naive(), date(2022, 1, 2));
}

#[test]
fn real_provider_events_are_day_position_anchors() {
    let tz = Tz::Europe__Amsterdam;
    let loc = location(tz);
    let provider = HourAngleProvider;
    let calendar = SunEventCalendar::new(CalendarConfig::named("geo", tz), &loc, &provider);
    let day = date(2022, 1, 1);

    let sunrise = calendar.sunrise(day).unwrap().with_timezone(&Utc);
    let sunset = calendar.sunset(day).unwrap().with_timezone(&Utc);
    let (noon, midnight) = calendar.noon_and_midnight(day).unwrap();

    assert_eq!(calendar.day_position(sunrise).unwrap(), 0.0);
    assert_eq!(calendar.day_position(sunset).unwrap(), 0.0);
    assert_eq!(
        calendar.day_position(noon.with_timezone(&Utc)).unwrap(),
        1.0
    );
    assert_eq!(
        calendar.day_position(midnight.with_timezone(&Utc)).unwrap(),
        -1.0
    );
}
