use serde::{Deserialize, Serialize};

/// Location metadata produced by a geocoding search. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    /// First-level administrative region (state, department, ...).
    pub admin1: String,
    pub country: String,
    pub country_code: String,
    /// IANA timezone id, e.g. "America/Bogota".
    pub timezone: String,
    pub population: Option<u64>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Canonical, human-facing representation of a provider weather code.
///
/// Instances are only ever produced by the code tables in [`crate::codes`],
/// so two equal codes always normalize to equal conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub category: String,
    pub description: String,
    pub icon_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_ms: f64,
    pub condition: WeatherCondition,
}

/// One day of forecast. `epoch_seconds` is midnight local time for the
/// location's timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub epoch_seconds: i64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition: WeatherCondition,
}

/// The sole output of the normalization core: a point-in-time bundle of
/// current and forecast weather for one location. Pure value, safe to cache,
/// compare or serialize; `daily` is chronological with index 0 = today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecastEntry>,
}
