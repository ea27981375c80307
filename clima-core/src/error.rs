use thiserror::Error;

/// Failure taxonomy of the snapshot pipeline.
///
/// The core never catches and suppresses: everything raised by the mappers
/// or adapters propagates unchanged to the caller. The only place a bad
/// input is absorbed is the code-table fallback in [`crate::codes`].
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The geocoder returned zero candidates. User-correctable.
    #[error("ciudad no encontrada: '{0}'")]
    CityNotFound(String),

    /// Non-success HTTP status from an upstream service. Transient; no
    /// automatic retry.
    #[error("{service} request failed with status {status}: {detail}")]
    UpstreamUnavailable {
        service: &'static str,
        status: reqwest::StatusCode,
        detail: String,
    },

    /// Response shape violates the expected schema. Usually means the
    /// provider contract changed.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Transport-level failure before any status code was seen.
    #[error("request to {service} failed")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}
