//! Core library for the `clima` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over weather providers (geocoding + forecast adapters)
//! - The normalization service mapping provider payloads into one canonical
//!   [`WeatherSnapshot`]
//! - Static weather-code tables with a total lookup
//!
//! It is used by `clima-cli`, but can also be reused by other binaries or
//! services.

pub mod codes;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;

pub use config::{Config, ProviderConfig};
pub use error::WeatherError;
pub use model::{
    CurrentConditions, DailyForecastEntry, LocationInfo, WeatherCondition, WeatherSnapshot,
};
pub use provider::{
    ProviderCurrentPayload, ProviderDailyPayload, ProviderId, RawForecast, WeatherProvider,
    default_provider_from_config, provider_from_config,
};
