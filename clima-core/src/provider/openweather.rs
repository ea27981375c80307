//! Alternate adapter: OpenWeatherMap geocoding + One Call 3.0. Requires an
//! API key.
//!
//! OWM's geocoder does not return an IANA timezone, so [`search`] fills in
//! `"UTC"` as a placeholder and [`forecast`] reports the One Call `timezone`
//! through [`RawForecast::timezone`], which the snapshot flow patches into
//! the location before assembly. One Call also returns a record per day
//! instead of parallel arrays; this adapter transposes into the common
//! shape.

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    codes,
    error::WeatherError,
    model::{LocationInfo, WeatherCondition},
    provider::truncate_body,
};

use super::{ProviderCurrentPayload, ProviderDailyPayload, ProviderId, RawForecast, WeatherProvider};

const GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
const ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

const GEOCODING_SERVICE: &str = "openweather geocoding";
const FORECAST_SERVICE: &str = "openweather onecall";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
    geocoding_url: String,
    onecall_url: String,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoints(api_key, GEOCODING_URL, ONECALL_URL)
    }

    /// Override the upstream endpoints, e.g. to point at a mock server.
    pub fn with_endpoints(
        api_key: String,
        geocoding_url: impl Into<String>,
        onecall_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key,
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
            onecall_url: onecall_url.into(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    async fn search(&self, query: &str, limit: u8) -> Result<Vec<LocationInfo>, WeatherError> {
        let count = limit.to_string();

        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("q", query),
                ("limit", count.as_str()),
                ("appid", self.api_key.as_str()),
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

        let parsed: Vec<OwGeoEntry> = serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedPayload(format!("openweather geocoding JSON: {e}"))
        })?;

        Ok(parsed.into_iter().map(LocationInfo::from).collect())
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
            .get(&self.onecall_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "metric"),
                ("exclude", "minutely,hourly,alerts"),
                ("appid", self.api_key.as_str()),
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

        let parsed: OneCallResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedPayload(format!("openweather onecall JSON: {e}"))
        })?;

        let tz: Tz = parsed.timezone.parse().map_err(|_| {
            WeatherError::MalformedPayload(format!(
                "openweather onecall reported unknown timezone '{}'",
                parsed.timezone
            ))
        })?;

        let mut daily = ProviderDailyPayload::default();
        for day in &parsed.daily {
            let date = DateTime::from_timestamp(day.dt, 0)
                .ok_or_else(|| {
                    WeatherError::MalformedPayload(format!(
                        "daily entry has out-of-range timestamp {}",
                        day.dt
                    ))
                })?
                .with_timezone(&tz)
                .date_naive();
            let code = day
                .weather
                .first()
                .map(|w| w.id)
                .ok_or_else(|| {
                    WeatherError::MalformedPayload("daily entry missing weather array".to_string())
                })?;

            daily.dates.push(date.format("%Y-%m-%d").to_string());
            daily.weather_codes.push(code);
            daily.temp_min.push(day.temp.min);
            daily.temp_max.push(day.temp.max);
        }

        Ok(RawForecast {
            current: ProviderCurrentPayload {
                temperature: parsed.current.temp,
                humidity: parsed.current.humidity,
                wind_speed: parsed.current.wind_speed,
                weather_code: parsed.current.weather.first().map(|w| w.id),
            },
            daily,
            timezone: Some(parsed.timezone),
        })
    }

    fn resolve_condition(&self, code: i64) -> WeatherCondition {
        codes::owm_condition(code)
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    name: String,
    lat: f64,
    lon: f64,
    country: Option<String>,
    state: Option<String>,
}

impl From<OwGeoEntry> for LocationInfo {
    fn from(e: OwGeoEntry) -> Self {
        let country = e.country.unwrap_or_default();
        LocationInfo {
            name: e.name,
            admin1: e.state.unwrap_or_default(),
            // the geocoder only returns an ISO country code
            country: country.clone(),
            country_code: country,
            // placeholder; replaced by the onecall timezone in the snapshot
            // flow
            timezone: "UTC".to_string(),
            population: None,
            latitude: e.lat,
            longitude: e.lon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    timezone: String,
    current: OcCurrent,
    daily: Vec<OcDaily>,
}

#[derive(Debug, Deserialize)]
struct OcCurrent {
    temp: Option<f64>,
    humidity: Option<f64>,
    wind_speed: Option<f64>,
    #[serde(default)]
    weather: Vec<OcWeather>,
}

#[derive(Debug, Deserialize)]
struct OcWeather {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct OcDaily {
    dt: i64,
    temp: OcTemp,
    #[serde(default)]
    weather: Vec<OcWeather>,
}

#[derive(Debug, Deserialize)]
struct OcTemp {
    min: f64,
    max: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_entry_uses_country_code_and_utc_placeholder() {
        let raw = r#"{"name": "Madrid", "lat": 40.4168, "lon": -3.7038, "country": "ES", "state": "Madrid"}"#;
        let parsed: OwGeoEntry = serde_json::from_str(raw).unwrap();
        let location = LocationInfo::from(parsed);

        assert_eq!(location.country_code, "ES");
        assert_eq!(location.admin1, "Madrid");
        assert_eq!(location.timezone, "UTC");
        assert_eq!(location.population, None);
    }

    #[test]
    fn onecall_parses_record_per_day() {
        let raw = r#"{
            "timezone": "Europe/Madrid",
            "current": {"temp": 28.0, "humidity": 40, "wind_speed": 2.1, "weather": [{"id": 800}]},
            "daily": [
                {"dt": 1767225600, "temp": {"min": 10.0, "max": 20.0}, "weather": [{"id": 500}]}
            ]
        }"#;
        let parsed: OneCallResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(parsed.timezone, "Europe/Madrid");
        assert_eq!(parsed.daily.len(), 1);
        assert_eq!(parsed.daily[0].weather[0].id, 500);
        assert_eq!(parsed.current.weather[0].id, 800);
    }
}
