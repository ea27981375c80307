use crate::{
    Config,
    error::WeatherError,
    model::{LocationInfo, WeatherCondition, WeatherSnapshot},
    normalize,
    provider::{open_meteo::OpenMeteoProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod open_meteo;
pub mod openweather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenMeteo,
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenMeteo => "open-meteo",
            ProviderId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenMeteo, ProviderId::OpenWeather]
    }

    /// Whether the provider needs an API key before it can be used.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, ProviderId::OpenWeather)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "open-meteo" | "openmeteo" => Ok(ProviderId::OpenMeteo),
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: open-meteo, openweather."
            )),
        }
    }
}

/// Current-conditions payload in the common adapter shape. Fields are
/// optional so that a missing upstream value surfaces as
/// [`WeatherError::MalformedPayload`] in the mapper instead of a silent
/// default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderCurrentPayload {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub weather_code: Option<i64>,
}

/// Daily forecast payload: parallel arrays indexed by day offset, the way
/// Open-Meteo returns them. Adapters for record-per-day providers transpose
/// into this shape. Dates are ISO `YYYY-MM-DD` in the location's local time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderDailyPayload {
    pub dates: Vec<String>,
    pub weather_codes: Vec<i64>,
    pub temp_min: Vec<f64>,
    pub temp_max: Vec<f64>,
}

/// Raw forecast for one coordinate pair, still in pre-normalization shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawForecast {
    pub current: ProviderCurrentPayload,
    pub daily: ProviderDailyPayload,
    /// IANA timezone reported by the forecast endpoint. Adapters whose
    /// geocoder cannot supply a timezone (OpenWeatherMap) set this so the
    /// snapshot flow can patch the location before assembly.
    pub timezone: Option<String>,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    /// Geocode a free-text place name. An empty result means "no match" and
    /// is not an error.
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<LocationInfo>, WeatherError>;

    /// Fetch raw current + daily forecast data for a coordinate pair.
    async fn forecast(&self, latitude: f64, longitude: f64)
    -> Result<RawForecast, WeatherError>;

    /// The provider's code-table accessor. Total: unknown codes resolve to
    /// the fixed fallback condition.
    fn resolve_condition(&self, code: i64) -> WeatherCondition;

    /// Resolve the first geocoding candidate, fetch its forecast and
    /// normalize everything into one snapshot.
    async fn snapshot(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let candidates = self.search(city, 1).await?;
        let Some(mut location) = candidates.into_iter().next() else {
            return Err(WeatherError::CityNotFound(city.to_string()));
        };

        let raw = self.forecast(location.latitude, location.longitude).await?;
        if let Some(tz) = raw.timezone.clone() {
            location.timezone = tz;
        }

        normalize::assemble(location, &raw.current, &raw.daily, |code| {
            self.resolve_condition(code)
        })
    }
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::OpenMeteo => Box::new(OpenMeteoProvider::new()),
        ProviderId::OpenWeather => {
            let api_key = config.provider_api_key(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{id}'.\n\
                     Hint: run `clima configure {id}` and enter your API key."
                )
            })?;
            Box::new(OpenWeatherProvider::new(api_key.to_owned()))
        }
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider`.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // back off to a char boundary so multibyte bodies can't panic
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
