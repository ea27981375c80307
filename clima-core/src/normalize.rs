//! Pure normalization of provider payloads into [`WeatherSnapshot`] values.
//!
//! Everything here is synchronous computation with no I/O: adapters fetch a
//! [`RawForecast`](crate::provider::RawForecast) over the network, then hand
//! its pieces to these mappers together with the provider's code-table
//! accessor.

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::WeatherError;
use crate::model::{
    CurrentConditions, DailyForecastEntry, LocationInfo, WeatherCondition, WeatherSnapshot,
};
use crate::provider::{ProviderCurrentPayload, ProviderDailyPayload};

/// Map a raw current-conditions payload. Units are copied verbatim; the
/// adapter is responsible for requesting metric units from the provider.
pub fn map_current<F>(
    raw: &ProviderCurrentPayload,
    resolve: F,
) -> Result<CurrentConditions, WeatherError>
where
    F: Fn(i64) -> WeatherCondition,
{
    let temperature_c = require(raw.temperature, "current temperature")?;
    let humidity_pct = require(raw.humidity, "current humidity")?;
    let wind_speed_ms = require(raw.wind_speed, "current wind speed")?;
    let code = raw
        .weather_code
        .ok_or_else(|| missing("current weather code"))?;

    Ok(CurrentConditions {
        temperature_c,
        humidity_pct,
        wind_speed_ms,
        condition: resolve(code),
    })
}

/// Zip the provider's parallel daily arrays into one entry per day,
/// preserving order. Timestamps are midnight local time in `timezone`.
pub fn map_daily<F>(
    raw: &ProviderDailyPayload,
    timezone: &str,
    resolve: F,
) -> Result<Vec<DailyForecastEntry>, WeatherError>
where
    F: Fn(i64) -> WeatherCondition,
{
    let days = raw.dates.len();
    if raw.weather_codes.len() != days || raw.temp_min.len() != days || raw.temp_max.len() != days
    {
        return Err(WeatherError::MalformedPayload(format!(
            "daily parallel arrays have mismatched lengths: {days} dates, {} codes, {} minima, {} maxima",
            raw.weather_codes.len(),
            raw.temp_min.len(),
            raw.temp_max.len(),
        )));
    }

    let tz: Tz = timezone
        .parse()
        .map_err(|_| WeatherError::MalformedPayload(format!("unknown timezone '{timezone}'")))?;

    let mut entries = Vec::with_capacity(days);
    for i in 0..days {
        let date = NaiveDate::parse_from_str(&raw.dates[i], "%Y-%m-%d").map_err(|e| {
            WeatherError::MalformedPayload(format!("invalid daily date '{}': {e}", raw.dates[i]))
        })?;

        entries.push(DailyForecastEntry {
            epoch_seconds: local_midnight_epoch(date, tz),
            temp_min_c: raw.temp_min[i],
            temp_max_c: raw.temp_max[i],
            condition: resolve(raw.weather_codes[i]),
        });
    }

    Ok(entries)
}

/// Compose [`map_current`] and [`map_daily`] with the passed-through
/// location. Deterministic given its inputs; adds no failure modes of its
/// own.
pub fn assemble<F>(
    location: LocationInfo,
    current: &ProviderCurrentPayload,
    daily: &ProviderDailyPayload,
    resolve: F,
) -> Result<WeatherSnapshot, WeatherError>
where
    F: Fn(i64) -> WeatherCondition,
{
    let current = map_current(current, &resolve)?;
    let daily = map_daily(daily, &location.timezone, &resolve)?;

    Ok(WeatherSnapshot {
        location,
        current,
        daily,
    })
}

fn local_midnight_epoch(date: NaiveDate, tz: Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        // A DST jump can make local midnight nonexistent; shift one hour in.
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map_or_else(|| tz.from_utc_datetime(&midnight).timestamp(), |dt| dt.timestamp())
}

fn require(value: Option<f64>, field: &str) -> Result<f64, WeatherError> {
    value.ok_or_else(|| missing(field))
}

fn missing(field: &str) -> WeatherError {
    WeatherError::MalformedPayload(format!("missing numeric field: {field}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::wmo_condition;
    use chrono::TimeZone;

    fn location(timezone: &str) -> LocationInfo {
        LocationInfo {
            name: "Tamalameque".to_string(),
            admin1: "Cesar".to_string(),
            country: "Colombia".to_string(),
            country_code: "CO".to_string(),
            timezone: timezone.to_string(),
            population: Some(13_789),
            latitude: 8.861,
            longitude: -73.812,
        }
    }

    fn current_payload() -> ProviderCurrentPayload {
        ProviderCurrentPayload {
            temperature: Some(31.4),
            humidity: Some(62.0),
            wind_speed: Some(3.2),
            weather_code: Some(0),
        }
    }

    fn daily_payload(days: usize) -> ProviderDailyPayload {
        ProviderDailyPayload {
            dates: (0..days).map(|i| format!("2026-08-{:02}", 23 + i)).collect(),
            weather_codes: vec![0; days],
            temp_min: (0..days).map(|i| 20.0 + i as f64).collect(),
            temp_max: (0..days).map(|i| 30.0 + i as f64).collect(),
        }
    }

    #[test]
    fn map_current_copies_fields_verbatim() {
        let current = map_current(&current_payload(), wmo_condition).unwrap();
        assert_eq!(current.temperature_c, 31.4);
        assert_eq!(current.humidity_pct, 62.0);
        assert_eq!(current.wind_speed_ms, 3.2);
        assert_eq!(current.condition, wmo_condition(0));
    }

    #[test]
    fn map_current_rejects_missing_field() {
        let mut payload = current_payload();
        payload.temperature = None;

        let err = map_current(&payload, wmo_condition).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedPayload(_)));
        assert!(err.to_string().contains("current temperature"));
    }

    #[test]
    fn map_daily_zips_five_days_positionally() {
        let entries = map_daily(&daily_payload(5), "America/Bogota", wmo_condition).unwrap();

        assert_eq!(entries.len(), 5);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.temp_min_c, 20.0 + i as f64);
            assert_eq!(entry.temp_max_c, 30.0 + i as f64);
        }
        // chronological, one day apart (Bogota has no DST)
        for pair in entries.windows(2) {
            assert_eq!(pair[1].epoch_seconds - pair[0].epoch_seconds, 86_400);
        }
    }

    #[test]
    fn map_daily_rejects_mismatched_lengths() {
        let mut payload = daily_payload(5);
        payload.temp_min.pop();

        let err = map_daily(&payload, "America/Bogota", wmo_condition).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedPayload(_)));
        assert!(err.to_string().contains("mismatched lengths"));
    }

    #[test]
    fn map_daily_rejects_unknown_timezone() {
        let err = map_daily(&daily_payload(2), "Marte/Olympus", wmo_condition).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedPayload(_)));
    }

    #[test]
    fn daily_timestamp_is_local_midnight() {
        let entries = map_daily(&daily_payload(1), "America/Bogota", wmo_condition).unwrap();

        let tz: Tz = "America/Bogota".parse().unwrap();
        let expected = tz.with_ymd_and_hms(2026, 8, 23, 0, 0, 0).unwrap().timestamp();
        assert_eq!(entries[0].epoch_seconds, expected);
    }

    #[test]
    fn unknown_code_falls_back_without_affecting_siblings() {
        let mut payload = daily_payload(3);
        payload.weather_codes = vec![0, 999, 61];

        let entries = map_daily(&payload, "America/Bogota", wmo_condition).unwrap();
        assert_eq!(entries[0].condition.category, "Despejado");
        assert_eq!(entries[1].condition.category, "Desconocido");
        assert_eq!(entries[1].condition.description, "clima desconocido");
        assert_eq!(entries[2].condition.category, "Lluvia");
    }

    #[test]
    fn assemble_is_deterministic() {
        let a = assemble(
            location("America/Bogota"),
            &current_payload(),
            &daily_payload(5),
            wmo_condition,
        )
        .unwrap();
        let b = assemble(
            location("America/Bogota"),
            &current_payload(),
            &daily_payload(5),
            wmo_condition,
        )
        .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn assemble_propagates_mapper_errors() {
        let mut daily = daily_payload(3);
        daily.weather_codes.pop();

        let err = assemble(
            location("America/Bogota"),
            &current_payload(),
            &daily,
            wmo_condition,
        )
        .unwrap_err();
        assert!(matches!(err, WeatherError::MalformedPayload(_)));
    }
}
