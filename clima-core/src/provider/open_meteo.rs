//! Canonical provider pairing: Open-Meteo geocoding + forecast. Keyless.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    codes,
    error::WeatherError,
    model::{LocationInfo, WeatherCondition},
    provider::truncate_body,
};

use super::{ProviderCurrentPayload, ProviderDailyPayload, ProviderId, RawForecast, WeatherProvider};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const GEOCODING_SERVICE: &str = "open-meteo geocoding";
const FORECAST_SERVICE: &str = "open-meteo forecast";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_endpoints(GEOCODING_URL, FORECAST_URL)
    }

    /// Override the upstream endpoints, e.g. to point at a mock server.
    pub fn with_endpoints(
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
        }
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenMeteo
    }

    async fn search(&self, query: &str, limit: u8) -> Result<Vec<LocationInfo>, WeatherError> {
        let count = limit.to_string();

        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", "es"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|source| WeatherError::Network {
                service: GEOCODING_SERVICE,
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| WeatherError::Network {
            service: GEOCODING_SERVICE,
            source,
        })?;

        if !status.is_success() {
            return Err(WeatherError::UpstreamUnavailable {
                service: GEOCODING_SERVICE,
                status,
                detail: truncate_body(&body),
            });
        }

        let parsed: GeoResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedPayload(format!("open-meteo geocoding JSON: {e}"))
        })?;

        Ok(parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .map(LocationInfo::from)
            .collect())
    }

    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<RawForecast, WeatherError> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let res = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code",
                ),
                ("daily", "weather_code,temperature_2m_max,temperature_2m_min"),
                // snapshot fields are metric / m-per-s; normalization copies
                // them verbatim
                ("wind_speed_unit", "ms"),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|source| WeatherError::Network {
                service: FORECAST_SERVICE,
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| WeatherError::Network {
            service: FORECAST_SERVICE,
            source,
        })?;

        if !status.is_success() {
            return Err(WeatherError::UpstreamUnavailable {
                service: FORECAST_SERVICE,
                status,
                detail: truncate_body(&body),
            });
        }

        let parsed: OmForecastResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedPayload(format!("open-meteo forecast JSON: {e}"))
        })?;

        Ok(RawForecast {
            current: ProviderCurrentPayload {
                temperature: parsed.current.temperature_2m,
                humidity: parsed.current.relative_humidity_2m,
                wind_speed: parsed.current.wind_speed_10m,
                weather_code: parsed.current.weather_code,
            },
            daily: ProviderDailyPayload {
                dates: parsed.daily.time,
                weather_codes: parsed.daily.weather_code,
                temp_min: parsed.daily.temperature_2m_min,
                temp_max: parsed.daily.temperature_2m_max,
            },
            // the geocoder already supplied an IANA timezone; keep it
            // authoritative
            timezone: None,
        })
    }

    fn resolve_condition(&self, code: i64) -> WeatherCondition {
        codes::wmo_condition(code)
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    admin1: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
    timezone: String,
    population: Option<u64>,
    latitude: f64,
    longitude: f64,
}

impl From<GeoResult> for LocationInfo {
    fn from(r: GeoResult) -> Self {
        LocationInfo {
            name: r.name,
            admin1: r.admin1.unwrap_or_default(),
            country: r.country.unwrap_or_default(),
            country_code: r.country_code.unwrap_or_default(),
            timezone: r.timezone,
            population: r.population,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    weather_code: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    weather_code: Vec<i64>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}
