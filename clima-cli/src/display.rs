//! Human-friendly rendering of a [`WeatherSnapshot`]. Fixed Spanish string
//! table; windowing of the daily forecast happens here, not in the core.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use clima_core::WeatherSnapshot;
use std::fmt::Write;

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

/// Render a snapshot: location header, current conditions, then up to
/// `days` forecast entries starting tomorrow (index 0 is today).
pub fn render(snapshot: &WeatherSnapshot, days: usize) -> String {
    let mut out = String::new();
    let location = &snapshot.location;
    let tz: Option<Tz> = location.timezone.parse().ok();

    let _ = writeln!(out, "{} — {}, {}", location.name, location.admin1, location.country);
    if let Some(tz) = tz {
        let local = Utc::now().with_timezone(&tz);
        let _ = writeln!(out, "Hora local: {} ({})", local.format("%H:%M"), location.timezone);
    }
    if let Some(population) = location.population {
        let _ = writeln!(out, "Población: {population} habitantes");
    }

    let current = &snapshot.current;
    let _ = writeln!(out);
    let _ = writeln!(out, "{:.0}°C  {}", current.temperature_c, current.condition.description);
    let _ = writeln!(
        out,
        "Viento: {:.1} m/s   Humedad: {:.0}%",
        current.wind_speed_ms, current.humidity_pct
    );

    let window: Vec<_> = snapshot.daily.iter().skip(1).take(days).collect();
    if !window.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Pronóstico de {} días:", window.len());
        for entry in window {
            let _ = writeln!(
                out,
                "  {:<10} {:>3.0}° / {:>3.0}°  {}",
                weekday_name(entry.epoch_seconds, tz),
                entry.temp_max_c,
                entry.temp_min_c,
                entry.condition.description
            );
        }
    }

    out
}

fn weekday_name(epoch_seconds: i64, tz: Option<Tz>) -> &'static str {
    let Some(utc) = DateTime::from_timestamp(epoch_seconds, 0) else {
        return "?";
    };
    let weekday = match tz {
        Some(tz) => utc.with_timezone(&tz).weekday(),
        None => utc.weekday(),
    };
    WEEKDAYS[weekday.num_days_from_monday() as usize]
}
